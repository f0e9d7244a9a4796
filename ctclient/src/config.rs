// ctclient-rs/ctclient/src/config.rs
//! Client configuration: where the reader manager lives and how long a call
//! may block.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;
use crate::{Error, Result};

/// Environment variable holding the per-call timeout in whole seconds
pub const ENV_CALL_TIMEOUT: &str = "OPENCT_CALL_TIMEOUT";

/// Largest request or reply payload a socket packet may carry by default
pub const DEFAULT_MAX_PACKET: usize = 512;

/// Where to find the reader manager and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientConfig {
    /// Directory holding one socket per reader, named by reader index
    pub socket_dir: PathBuf,
    /// Status file published by the reader manager
    pub status_file: PathBuf,
    /// Read/write timeout applied to each socket call; `None` blocks forever
    pub call_timeout: Option<Duration>,
    /// Largest request or reply payload accepted on the socket
    pub max_packet: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let socket_dir = PathBuf::from(constants::DEFAULT_SOCKET_DIR);
        Self {
            status_file: socket_dir.join(constants::STATUS_FILE_NAME),
            socket_dir,
            call_timeout: None,
            max_packet: DEFAULT_MAX_PACKET,
        }
    }
}

impl ClientConfig {
    /// Same as `default()`
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with process environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`. `OPENCT_SOCKETDIR` also
    /// moves the status file unless `OPENCT_STATUS` names one explicitly.
    /// Unparseable timeouts are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(constants::ENV_SOCKET_DIR) {
            config = config.with_socket_dir(dir);
        }
        if let Some(file) = lookup(constants::ENV_STATUS_FILE) {
            config.status_file = PathBuf::from(file);
        }
        if let Some(secs) = lookup(ENV_CALL_TIMEOUT).and_then(|s| s.trim().parse::<u64>().ok()) {
            config.call_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        config
    }

    /// Move the socket directory; the status file follows it.
    pub fn with_socket_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.socket_dir = dir.into();
        self.status_file = self.socket_dir.join(constants::STATUS_FILE_NAME);
        self
    }

    /// Point at a status file outside the socket directory.
    pub fn with_status_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.status_file = file.into();
        self
    }

    /// Per-call socket timeout; `None` blocks.
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Payload size limit for socket packets.
    pub fn with_max_packet(mut self, max_packet: usize) -> Self {
        self.max_packet = max_packet;
        self
    }

    /// Socket path for a transport address
    pub fn socket_path(&self, address: &str) -> PathBuf {
        self.socket_dir.join(address)
    }

    /// Status file read by the default registry
    pub fn status_path(&self) -> &Path {
        &self.status_file
    }

    /// Reject a zero or oversized `max_packet` and a zero `call_timeout`.
    pub fn validate(&self) -> Result<()> {
        if self.max_packet == 0 || self.max_packet > u16::MAX as usize {
            return Err(Error::InvalidArgument(format!(
                "max_packet must be within 1..={}, got {}",
                u16::MAX,
                self.max_packet
            )));
        }
        if self.call_timeout == Some(Duration::ZERO) {
            return Err(Error::InvalidArgument(
                "call_timeout of zero; use None to block".into(),
            ));
        }
        Ok(())
    }
}
