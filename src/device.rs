//! Device operations
//!
//! Thin convenience layer over [`Session::execute`]: one method per KShell
//! operation, each a command formatter plus a reply parser. Malformed
//! replies surface as `Ok(None)` / `Ok(false)` rather than errors; only
//! transport and argument failures are hard errors.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{parse_message, Command, PortState, Response, ResponseCode};
use crate::session::Session;

/// A NETIO device, addressed through one session
pub struct Device {
    session: Session,
}

impl Device {
    /// Create a device handle from a configuration
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            session: Session::new(config)?,
        })
    }

    /// Wrap an existing session
    pub fn from_session(session: Session) -> Self {
        Self { session }
    }

    /// Access the underlying session (state inspection, raw commands)
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute a raw command line and return the raw reply line
    pub fn execute(&mut self, command: &str) -> Result<String> {
        self.session.execute(command)
    }

    // -------------------------------------------------------------------------
    // System Queries
    // -------------------------------------------------------------------------

    /// Firmware version
    pub fn version(&mut self) -> Result<Option<String>> {
        self.query_message(Command::Version)
    }

    /// Device uptime
    pub fn uptime(&mut self) -> Result<Option<String>> {
        self.query_message(Command::Uptime)
    }

    /// MAC address
    pub fn mac(&mut self) -> Result<Option<String>> {
        self.query_message(Command::SystemMac)
    }

    /// Current device time
    pub fn time(&mut self) -> Result<Option<String>> {
        self.query_message(Command::SystemTime)
    }

    /// HTTP port of the device's web interface
    pub fn web_port(&mut self) -> Result<Option<u16>> {
        self.query_port_number(Command::SystemWebPort)
    }

    /// KShell port
    pub fn kshell_port(&mut self) -> Result<Option<u16>> {
        self.query_port_number(Command::SystemKshellPort)
    }

    // -------------------------------------------------------------------------
    // Alias
    // -------------------------------------------------------------------------

    /// Device name, with surrounding quotes stripped
    pub fn alias(&mut self) -> Result<Option<String>> {
        Ok(self.query_message(Command::AliasGet)?.map(|m| strip_quotes(&m)))
    }

    /// Set the device name; the alias must be non-empty
    pub fn set_alias(&mut self, alias: &str) -> Result<bool> {
        let command = Command::alias_set(alias)?;
        self.command_ok(command)
    }

    // -------------------------------------------------------------------------
    // Session Maintenance
    // -------------------------------------------------------------------------

    /// Keep the connection alive; never changes session state
    pub fn noop(&mut self) -> Result<()> {
        self.session.execute(&Command::Noop.to_string())?;
        Ok(())
    }

    /// Reboot the device. Returns true when the device acknowledged with
    /// HELLO or REBOOTING.
    pub fn reboot(&mut self) -> Result<bool> {
        let line = self.session.execute(&Command::Reboot.to_string())?;
        let code = Response::parse(&line).code;
        Ok(matches!(
            code,
            Some(ResponseCode::Hello) | Some(ResponseCode::Rebooting)
        ))
    }

    // -------------------------------------------------------------------------
    // Outlets
    // -------------------------------------------------------------------------

    /// Current state of one outlet
    pub fn port_state(&mut self, port: u8) -> Result<Option<PortState>> {
        let command = Command::port_status(port)?;
        let line = self.session.execute(&command.to_string())?;
        Ok(parse_message(&line).and_then(|m| PortState::from_status_message(&m)))
    }

    /// True if the outlet is powered
    pub fn is_port_on(&mut self, port: u8) -> Result<bool> {
        Ok(self.port_state(port)? == Some(PortState::On))
    }

    /// True if the outlet is unpowered (or its state could not be read)
    pub fn is_port_off(&mut self, port: u8) -> Result<bool> {
        Ok(!self.is_port_on(port)?)
    }

    /// Switch one outlet on
    pub fn set_port_on(&mut self, port: u8) -> Result<bool> {
        self.command_ok(Command::port_set(port, PortState::On)?)
    }

    /// Switch one outlet off
    pub fn set_port_off(&mut self, port: u8) -> Result<bool> {
        self.command_ok(Command::port_set(port, PortState::Off)?)
    }

    /// Flip one outlet to the opposite of its current state
    pub fn toggle_port(&mut self, port: u8) -> Result<bool> {
        if self.is_port_on(port)? {
            self.set_port_off(port)
        } else {
            self.set_port_on(port)
        }
    }

    /// Put one outlet into manual operation mode
    pub fn set_port_manual(&mut self, port: u8) -> Result<bool> {
        self.command_ok(Command::port_manual(port)?)
    }

    /// Raw settings line for one outlet
    pub fn port_setup(&mut self, port: u8) -> Result<Option<String>> {
        let command = Command::port_setup(port)?;
        self.query_message(command)
    }

    /// Configured name of one outlet, extracted from its setup line.
    ///
    /// The setup line is `<name> <mode> <interrupt-delay> <pon-state> ...`
    /// with the name optionally quoted; extraction is positional.
    pub fn port_name(&mut self, port: u8) -> Result<Option<String>> {
        let setup = match self.port_setup(port)? {
            Some(setup) => setup,
            None => return Ok(None),
        };
        Ok(parse_port_name(&setup))
    }

    /// Set all four outlets at once from a state string like `"01iu"`
    /// (off / on / interrupt / unchanged per position).
    pub fn set_ports(&mut self, states: &str) -> Result<bool> {
        let command = Command::port_list(states)?;
        self.command_ok(command)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Execute and return the reply message, absent if malformed
    fn query_message(&mut self, command: Command) -> Result<Option<String>> {
        let line = self.session.execute(&command.to_string())?;
        Ok(parse_message(&line))
    }

    /// Execute and parse the reply message as a TCP port number
    fn query_port_number(&mut self, command: Command) -> Result<Option<u16>> {
        Ok(self
            .query_message(command)?
            .and_then(|m| m.parse::<u16>().ok()))
    }

    /// Execute and report whether the reply code was 250 OK
    fn command_ok(&mut self, command: Command) -> Result<bool> {
        let line = self.session.execute(&command.to_string())?;
        Ok(Response::parse(&line).is_ok())
    }
}

/// Extract the (optionally quoted) first field of a port setup line.
///
/// Requires the positional shape of a setup reply (name plus at least three
/// further fields) so an arbitrary reply is not mistaken for one.
fn parse_port_name(setup: &str) -> Option<String> {
    static PORT_NAME_RE: OnceLock<Regex> = OnceLock::new();
    let re = PORT_NAME_RE.get_or_init(|| {
        Regex::new(r#"^(?:"([^"]*)"|(\S+))\s+\S+\s+\S+\s+\S+"#).expect("port name pattern")
    });
    let captures = re.captures(setup.trim())?;
    let name = captures.get(1).or_else(|| captures.get(2))?.as_str();
    Some(name.trim().to_string())
}

/// Remove one leading and one trailing double quote, if present
fn strip_quotes(content: &str) -> String {
    let trimmed = content.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}
