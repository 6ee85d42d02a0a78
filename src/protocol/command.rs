//! Command formatting and argument validation
//!
//! Every operation the device understands renders to a single line. All
//! argument checks happen here, before anything touches the transport.

use std::fmt;

use crate::error::{NetioError, Result};

/// Lowest controllable outlet number
pub const PORT_MIN: u8 = 1;

/// Highest controllable outlet number (the hardware has four outlets)
pub const PORT_MAX: u8 = 4;

/// Desired state of a single outlet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    /// Outlet is off (`0`)
    Off,
    /// Outlet is on (`1`)
    On,
    /// Short off-on interrupt (`i`)
    Interrupt,
    /// Leave the outlet as it is (`u`)
    Unchanged,
}

impl PortState {
    /// Wire character for this state
    pub fn as_char(self) -> char {
        match self {
            PortState::Off => '0',
            PortState::On => '1',
            PortState::Interrupt => 'i',
            PortState::Unchanged => 'u',
        }
    }

    /// Parse a wire character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(PortState::Off),
            '1' => Some(PortState::On),
            'i' => Some(PortState::Interrupt),
            'u' => Some(PortState::Unchanged),
            _ => None,
        }
    }

    /// Parse the single-outlet status reply (`0` or `1`)
    pub fn from_status_message(message: &str) -> Option<Self> {
        match message.trim() {
            "0" => Some(PortState::Off),
            "1" => Some(PortState::On),
            _ => None,
        }
    }
}

/// A single outbound command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `version` - firmware version
    Version,
    /// `uptime` - device uptime
    Uptime,
    /// `system mac` - MAC address
    SystemMac,
    /// `system time` - current device time
    SystemTime,
    /// `system webport` - HTTP port
    SystemWebPort,
    /// `system kshport` - KShell port
    SystemKshellPort,
    /// `alias` - read the device name
    AliasGet,
    /// `alias <name>` - set the device name
    AliasSet(String),
    /// `noop` - keep the connection alive
    Noop,
    /// `reboot` - restart the device
    Reboot,
    /// `port <n>` - read one outlet's state
    PortStatus(u8),
    /// `port <n> <0|1>` - switch one outlet
    PortSet { port: u8, state: PortState },
    /// `port <n> manual` - put one outlet into manual mode
    PortManual(u8),
    /// `port setup <n>` - read one outlet's settings line
    PortSetup(u8),
    /// `port list <states>` - switch all four outlets at once
    PortList(String),
}

impl Command {
    /// Build an alias-set command; the alias must be non-empty
    pub fn alias_set(alias: &str) -> Result<Self> {
        let alias = alias.trim();
        if alias.is_empty() {
            return Err(NetioError::InvalidArgument("alias must not be empty".to_string()));
        }
        Ok(Command::AliasSet(alias.to_string()))
    }

    /// Build a single-outlet status query
    pub fn port_status(port: u8) -> Result<Self> {
        validate_port(port)?;
        Ok(Command::PortStatus(port))
    }

    /// Build a single-outlet switch command
    pub fn port_set(port: u8, state: PortState) -> Result<Self> {
        validate_port(port)?;
        Ok(Command::PortSet { port, state })
    }

    /// Build a manual-mode command for one outlet
    pub fn port_manual(port: u8) -> Result<Self> {
        validate_port(port)?;
        Ok(Command::PortManual(port))
    }

    /// Build a setup query for one outlet
    pub fn port_setup(port: u8) -> Result<Self> {
        validate_port(port)?;
        Ok(Command::PortSetup(port))
    }

    /// Build an all-outlets command from a 4-character state string
    pub fn port_list(states: &str) -> Result<Self> {
        validate_port_list(states)?;
        Ok(Command::PortList(states.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Version => write!(f, "version"),
            Command::Uptime => write!(f, "uptime"),
            Command::SystemMac => write!(f, "system mac"),
            Command::SystemTime => write!(f, "system time"),
            Command::SystemWebPort => write!(f, "system webport"),
            Command::SystemKshellPort => write!(f, "system kshport"),
            Command::AliasGet => write!(f, "alias"),
            Command::AliasSet(alias) => write!(f, "alias {alias}"),
            Command::Noop => write!(f, "noop"),
            Command::Reboot => write!(f, "reboot"),
            Command::PortStatus(port) => write!(f, "port {port}"),
            Command::PortSet { port, state } => write!(f, "port {port} {}", state.as_char()),
            Command::PortManual(port) => write!(f, "port {port} manual"),
            Command::PortSetup(port) => write!(f, "port setup {port}"),
            Command::PortList(states) => write!(f, "port list {states}"),
        }
    }
}

/// True for outlet numbers the hardware actually has (1..=4)
pub fn is_port_valid(port: u8) -> bool {
    (PORT_MIN..=PORT_MAX).contains(&port)
}

/// Reject outlet numbers outside 1..=4
pub fn validate_port(port: u8) -> Result<()> {
    if is_port_valid(port) {
        Ok(())
    } else {
        Err(NetioError::InvalidArgument(format!(
            "port {port} out of range ({PORT_MIN}..={PORT_MAX})"
        )))
    }
}

/// Reject all-outlets state strings that are not exactly 4 chars of `01iu`.
///
/// Checked before transmission so a bad string never reaches the device.
pub fn validate_port_list(states: &str) -> Result<()> {
    let valid = states.chars().count() == PORT_MAX as usize
        && states.chars().all(|c| PortState::from_char(c).is_some());
    if valid {
        Ok(())
    } else {
        Err(NetioError::InvalidArgument(format!(
            "invalid port list format ({states})"
        )))
    }
}
