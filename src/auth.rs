//! Credential derivation for the KShell `clogin` handshake
//!
//! The device issues an 8-character session hash in its greeting. The login
//! token is the MD5 digest of `username + password + hash` (literal
//! concatenation, no separators), rendered as lowercase hex.
//!
//! MD5 is mandated by the wire protocol; substituting a stronger digest
//! makes the device reject the login.

use md5::{Digest, Md5};

/// Derive the `clogin` token from credentials and the session hash.
///
/// Pure function; must be recomputed per connection because the session
/// hash changes on every connect.
pub fn derive_token(username: &str, password: &str, session_hash: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(username.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(session_hash.as_bytes());
    hex::encode(hasher.finalize())
}
