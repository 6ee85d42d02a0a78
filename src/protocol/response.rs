//! Response line parsing
//!
//! Splits a raw reply line into code and message. Malformed lines parse to
//! absent fields rather than errors: the device tolerates partial protocol
//! compliance and callers apply their own fallback logic.

use super::ResponseCode;

/// A parsed reply line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code, absent if the line is malformed or the code is unknown
    pub code: Option<ResponseCode>,

    /// Trimmed message text after the code, absent if the line is malformed
    pub message: Option<String>,
}

impl Response {
    /// Parse a raw reply line.
    ///
    /// A valid line has the shape `<3 digits><space><message>`. Anything
    /// shorter than 4 characters after trimming, or without a space at
    /// index 3, yields a response with both fields absent.
    pub fn parse(line: &str) -> Self {
        Self {
            code: parse_code(line),
            message: parse_message(line),
        }
    }

    /// True if the line carried `250 OK`
    pub fn is_ok(&self) -> bool {
        matches!(self.code, Some(code) if code.is_ok())
    }
}

/// Extract the response code from a reply line, if well-formed and known
pub fn parse_code(line: &str) -> Option<ResponseCode> {
    let line = line.trim();
    if !has_code_framing(line) {
        return None;
    }
    let value: u16 = line[..3].parse().ok()?;
    ResponseCode::from_value(value)
}

/// Extract the message text from a reply line, if well-formed
pub fn parse_message(line: &str) -> Option<String> {
    let line = line.trim();
    if !has_code_framing(line) {
        return None;
    }
    Some(line[4..].trim().to_string())
}

/// Check the fixed framing: at least 4 chars, space at index 3
fn has_code_framing(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 4 && bytes[3] == b' ' && bytes[..3].iter().all(u8::is_ascii_digit)
}
