//! # netio
//!
//! Client for Koukaam NETIO networked power sockets, speaking the KShell
//! control protocol over a raw TCP connection:
//! - Challenge-response login (per-connection session hash, MD5 token)
//! - Lazy connect and re-authentication guarding every command
//! - One blocking request/response in flight at a time
//! - Typed operations for outlets, aliases, and system queries
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Device                                │
//! │      (version / alias / port on|off|toggle / setup ...)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  execute(line) -> reply line
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Session                                │
//! │   DISCONNECTED -> CONNECTED (greeting) -> AUTHORIZED (clogin)│
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  one line out, one line in
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   TCP (blocking, CRLF lines)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use netio::{Config, Device};
//!
//! # fn main() -> netio::Result<()> {
//! let config = Config::builder()
//!     .host("192.168.1.10")
//!     .username("admin")
//!     .password("admin")
//!     .build();
//!
//! let mut device = Device::new(config)?;
//! device.set_port_on(1)?;
//! println!("firmware: {:?}", device.version()?);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod config;
pub mod device;
pub mod error;
pub mod protocol;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use device::Device;
pub use error::{NetioError, Result};
pub use protocol::{Command, PortState, Response, ResponseCode};
pub use session::{Session, State};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the netio crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
