//! Configuration for a NETIO device connection
//!
//! Centralized configuration with the device's factory defaults.

/// Default KShell TCP port on NETIO devices
pub const DEFAULT_PORT: u16 = 1234;

/// Factory-default username
pub const DEFAULT_USERNAME: &str = "admin";

/// Factory-default password
pub const DEFAULT_PASSWORD: &str = "admin";

/// Connection settings for one device
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Address
    // -------------------------------------------------------------------------
    /// Hostname or IP address of the device (no default, must be supplied)
    pub host: String,

    /// KShell TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Credentials
    // -------------------------------------------------------------------------
    /// Login username
    pub username: String,

    /// Login password (only ever used as digest input, never sent raw)
    pub password: String,

    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Socket read timeout (milliseconds, 0 disables)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 disables)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device hostname or IP address
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into().trim().to_string();
        self
    }

    /// Set the KShell TCP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the login username
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = username.into().trim().to_string();
        self
    }

    /// Set the login password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into().trim().to_string();
        self
    }

    /// Set the socket read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the socket write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
