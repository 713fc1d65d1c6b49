// MIT License - Copyright (c) 2026 Peter Wright

use std::fmt;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT, DEFAULT_RESPONSE_LENGTH, DEFAULT_TIMEOUT,
};

/// Address of a projector's command port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Configuration for talking to a Christie projector.
#[derive(Debug, Clone)]
pub struct ProjectorConfig {
    /// Projector host name or IP address
    pub host: String,
    /// Projector TCP port (default: 3002)
    pub port: u16,
    /// Receive timeout for each transaction in milliseconds (default: 1000)
    pub timeout_ms: u64,
    /// TCP connect timeout in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,
    /// Maximum response size in bytes for query commands (default: 48)
    pub response_length: usize,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.128".to_string(),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT.as_millis() as u64,
            response_length: DEFAULT_RESPONSE_LENGTH,
        }
    }
}

impl ProjectorConfig {
    /// Create a new config builder starting from defaults.
    pub fn builder() -> ProjectorConfigBuilder {
        ProjectorConfigBuilder::default()
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Builder for ProjectorConfig.
#[derive(Debug, Clone, Default)]
pub struct ProjectorConfigBuilder {
    config: ProjectorConfig,
}

impl ProjectorConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    pub fn response_length(mut self, len: usize) -> Self {
        self.config.response_length = len;
        self
    }

    pub fn build(self) -> ProjectorConfig {
        self.config
    }
}
