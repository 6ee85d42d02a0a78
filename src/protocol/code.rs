//! Response code table
//!
//! The KShell protocol classifies every reply with a 3-digit code from a
//! fixed, closed set. Codes outside the table are treated as unknown.

/// Response status codes defined by the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ResponseCode {
    Hello = 100,
    Bye = 110,
    Rebooting = 120,
    ConnectionTimeout = 130,
    Ok = 250,
    InvalidValue = 500,
    InvalidParameter = 501,
    UnknownCommand = 502,
    InvalidLogin = 503,
    AlreadyLoggedIn = 504,
    Forbidden = 505,
    InputLineTooLong = 506,
    TooManyConnections = 507,
}

/// Coarse classification of a response code by its leading digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// 1xx - informational
    Info,
    /// 2xx - success
    Success,
    /// 5xx - error
    Error,
}

/// All codes, for reverse lookup
const ALL_CODES: [ResponseCode; 13] = [
    ResponseCode::Hello,
    ResponseCode::Bye,
    ResponseCode::Rebooting,
    ResponseCode::ConnectionTimeout,
    ResponseCode::Ok,
    ResponseCode::InvalidValue,
    ResponseCode::InvalidParameter,
    ResponseCode::UnknownCommand,
    ResponseCode::InvalidLogin,
    ResponseCode::AlreadyLoggedIn,
    ResponseCode::Forbidden,
    ResponseCode::InputLineTooLong,
    ResponseCode::TooManyConnections,
];

impl ResponseCode {
    /// Numeric value of the code as it appears on the wire
    pub fn value(self) -> u16 {
        self as u16
    }

    /// Look up a code by its numeric value.
    ///
    /// Returns `None` for values outside the table; the code space is
    /// closed, so callers must treat unknown values as malformed.
    pub fn from_value(value: u16) -> Option<Self> {
        ALL_CODES.iter().copied().find(|c| c.value() == value)
    }

    /// Classify the code by its numeric range
    pub fn category(self) -> Category {
        match self.value() {
            100..=199 => Category::Info,
            200..=299 => Category::Success,
            _ => Category::Error,
        }
    }

    /// True for `250 OK`, the success reply to most commands
    pub fn is_ok(self) -> bool {
        self == ResponseCode::Ok
    }
}
