//! Transport session and command executor
//!
//! Owns the TCP socket and the connection state machine:
//!
//! ```text
//!  DISCONNECTED ──connect + greeting──► CONNECTED ──clogin──► AUTHORIZED
//!        ▲                                  │                     │
//!        └────────── any I/O failure ───────┴─────────────────────┘
//! ```
//!
//! `execute` is the single request/response primitive. It lazily connects
//! and authorizes, writes one command line, and reads one reply line. The
//! protocol is strictly half-duplex; `execute` takes `&mut self`, so one
//! session never has two requests in flight.

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::auth;
use crate::config::Config;
use crate::error::{NetioError, Result};
use crate::protocol::{parse_code, ResponseCode};

/// Column of the raw greeting line where the session hash starts.
///
/// The greeting has a constant 10-character prefix (`250 HELLO `); the hash
/// is positional, not delimiter-separated. Changing either constant derives
/// a wrong login token and the device answers 503 instead of failing loudly.
const HASH_OFFSET: usize = 10;

/// Length of the session hash in the greeting
const HASH_LEN: usize = 8;

/// Connection state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No usable socket
    Disconnected,
    /// Socket open and greeting validated, not yet logged in
    Connected,
    /// Logged in, commands may be executed
    Authorized,
}

/// Buffered reader/writer pair over one TCP stream
struct Link {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Link {
    /// Open a connection and set up buffered I/O and timeouts
    fn open(config: &Config) -> io::Result<Self> {
        let stream = TcpStream::connect((config.host.as_str(), config.port))?;

        // Disable Nagle's algorithm; the protocol is one short line per turn
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone the stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
        })
    }

    /// Write one line followed by CRLF and flush
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.flush()
    }

    /// Read one line, without the terminator. EOF is an error: the device
    /// never closes the connection between a request and its reply.
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed by device",
            ));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// Shut the socket down; errors on an already-dead socket are ignored
    fn shutdown(&mut self) {
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }
}

/// One logical connection to one device
pub struct Session {
    config: Config,
    state: State,
    /// Session hash from the greeting, alive only while state >= Connected.
    /// Recomputed on every connect, never reused across reconnects.
    hash: Option<String>,
    link: Option<Link>,
}

impl Session {
    /// Create a disconnected session for the given device.
    ///
    /// Fails with a configuration error if no host is set; nothing is
    /// connected until the first command runs or `connect` is called.
    pub fn new(config: Config) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(NetioError::Config("host must be set".to_string()));
        }
        Ok(Self {
            config,
            state: State::Disconnected,
            hash: None,
            link: None,
        })
    }

    /// Current connection state
    pub fn state(&self) -> State {
        self.state
    }

    /// True while a validated socket is open (authorization implies connection)
    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected | State::Authorized)
    }

    /// True only after a successful login
    pub fn is_authorized(&self) -> bool {
        self.state == State::Authorized
    }

    /// Session hash issued by the device in the greeting, while connected
    pub fn session_hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// The configuration this session was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open the TCP connection and validate the greeting.
    ///
    /// On a greeting that does not carry 250 OK the session simply stays
    /// disconnected; the authorize path reports that as a login failure.
    /// I/O failures surface as connection errors.
    pub fn connect(&mut self) -> Result<()> {
        let mut link = Link::open(&self.config).map_err(|e| {
            self.force_disconnect();
            NetioError::Connection(format!(
                "error while connecting to {}:{}: {e}",
                self.config.host, self.config.port
            ))
        })?;

        let greeting = match link.read_line() {
            Ok(line) => line,
            Err(e) => {
                link.shutdown();
                self.force_disconnect();
                return Err(NetioError::Connection(format!(
                    "error reading greeting from {}:{}: {e}",
                    self.config.host, self.config.port
                )));
            }
        };
        tracing::debug!("<-- {greeting}");

        if parse_code(&greeting) == Some(ResponseCode::Ok) {
            // The hash occupies a fixed span of the raw, untrimmed line
            let hash = match greeting.get(HASH_OFFSET..HASH_OFFSET + HASH_LEN) {
                Some(span) => span.trim().to_string(),
                None => {
                    link.shutdown();
                    self.force_disconnect();
                    return Err(NetioError::Protocol(format!(
                        "greeting too short for session hash: {greeting:?}"
                    )));
                }
            };
            self.hash = Some(hash);
            self.link = Some(link);
            self.state = State::Connected;
        } else {
            tracing::warn!("unexpected greeting: {greeting}");
            link.shutdown();
        }
        Ok(())
    }

    /// Execute one command line and return the raw reply line.
    ///
    /// Connects and authorizes lazily if needed. Exactly one write and one
    /// read per call; no internal retries. Code/message extraction is left
    /// to the caller ([`crate::protocol::Response::parse`]) so malformed
    /// replies can be tolerated instead of failing.
    pub fn execute(&mut self, command: &str) -> Result<String> {
        if command.trim().is_empty() {
            return Err(NetioError::InvalidArgument(
                "command must not be empty".to_string(),
            ));
        }
        if command.contains(['\r', '\n']) {
            return Err(NetioError::InvalidArgument(
                "command must not contain a line terminator".to_string(),
            ));
        }

        if !self.is_authorized() {
            self.authorize()?;
        }

        tracing::debug!("--> {command}");
        self.write_line_or_disconnect(command)?;
        let response = self.read_line_or_disconnect()?;
        tracing::debug!("<-- {response}");
        Ok(response)
    }

    /// Perform the `clogin` exchange, connecting first if necessary.
    ///
    /// Every failure on this path is collapsed into a single authorization
    /// error so `execute` reports one coherent cause; the underlying
    /// connection failure is logged here.
    fn authorize(&mut self) -> Result<()> {
        if !self.is_connected() {
            if let Err(e) = self.connect() {
                tracing::error!(
                    "error while connecting to {}:{}: {e}",
                    self.config.host,
                    self.config.port
                );
                return Err(NetioError::Authorization("unable to authorize".to_string()));
            }
        }
        if !self.is_connected() {
            // Greeting did not carry 250 OK
            return Err(NetioError::Authorization(
                "device rejected the connection".to_string(),
            ));
        }

        let hash = match &self.hash {
            Some(hash) => hash.clone(),
            None => {
                return Err(NetioError::Authorization(
                    "no session hash available".to_string(),
                ))
            }
        };

        let token = auth::derive_token(&self.config.username, &self.config.password, &hash);
        let login = format!("clogin {} {token}", self.config.username);

        tracing::debug!("--> clogin {} <token>", self.config.username);
        if let Err(e) = self.write_line_or_disconnect(&login) {
            tracing::error!("login exchange failed: {e}");
            return Err(NetioError::Authorization("unable to authorize".to_string()));
        }
        let response = match self.read_line_or_disconnect() {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("login exchange failed: {e}");
                return Err(NetioError::Authorization("unable to authorize".to_string()));
            }
        };
        tracing::debug!("<-- {response}");

        if parse_code(&response) == Some(ResponseCode::Ok) {
            self.state = State::Authorized;
            Ok(())
        } else {
            // Connection stays open; a later attempt may retry on it
            Err(NetioError::Authorization(format!(
                "login rejected: {response}"
            )))
        }
    }

    /// Write one line; any I/O failure tears the session down
    fn write_line_or_disconnect(&mut self, line: &str) -> Result<()> {
        let link = match &mut self.link {
            Some(link) => link,
            None => {
                return Err(NetioError::Connection("not connected".to_string()));
            }
        };
        if let Err(e) = link.write_line(line) {
            self.force_disconnect();
            return Err(NetioError::Transport {
                message: "error while sending command".to_string(),
                source: e,
            });
        }
        Ok(())
    }

    /// Read one line; any I/O failure tears the session down
    fn read_line_or_disconnect(&mut self) -> Result<String> {
        let link = match &mut self.link {
            Some(link) => link,
            None => {
                return Err(NetioError::Connection("not connected".to_string()));
            }
        };
        match link.read_line() {
            Ok(line) => Ok(line),
            Err(e) => {
                self.force_disconnect();
                Err(NetioError::Transport {
                    message: "error while reading response".to_string(),
                    source: e,
                })
            }
        }
    }

    /// Close the socket and discard all per-connection state
    fn force_disconnect(&mut self) {
        if let Some(mut link) = self.link.take() {
            link.shutdown();
        }
        self.hash = None;
        self.state = State::Disconnected;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.force_disconnect();
    }
}
