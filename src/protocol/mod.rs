//! Protocol Module
//!
//! Defines the KShell wire protocol spoken by NETIO devices.
//!
//! ## Protocol Format (text, line-terminated, greeting-first)
//!
//! ### Greeting (server -> client, immediately after accept)
//! ```text
//! 250 HELLO 12345678 - KSHELL V1.5
//!           └──────┘
//!    8-char session hash at columns 10..18 of the raw line
//! ```
//!
//! ### Login (client -> server)
//! ```text
//! clogin <username> <hex-md5(username + password + hash)>
//! ```
//!
//! ### Command / Response
//! ```text
//! client: any single line without an embedded line terminator
//! server: <3-digit code><space><message>
//! ```
//!
//! ### Response Codes
//! - 1xx informational (100 HELLO, 110 BYE, 120 REBOOTING, 130 TIMEOUT)
//! - 2xx success (250 OK)
//! - 5xx error (500..507)

mod code;
mod command;
mod response;

pub use code::{Category, ResponseCode};
pub use command::{
    is_port_valid, validate_port, validate_port_list, Command, PortState, PORT_MAX, PORT_MIN,
};
pub use response::{parse_code, parse_message, Response};
