//! Storefront configuration loaded via OrthoConfig.
//!
//! Values come from `STOREFRONT_*` environment variables, command-line flags
//! or a configuration file, in the precedence OrthoConfig applies.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Configuration values for the storefront server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct StorefrontSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// JSON menu document; the built-in menu is served when unset.
    pub menu_path: Option<PathBuf>,
    /// File holding the session cookie key.
    pub session_key_file: Option<PathBuf>,
    /// Permit a generated session key when the key file cannot be read.
    pub session_allow_ephemeral: Option<bool>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: Option<bool>,
}

impl StorefrontSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    pub fn menu_path(&self) -> Option<&Path> {
        self.menu_path.as_deref()
    }

    /// Return the configured session key path, falling back to the mounted
    /// secret location.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether a generated session key may replace an unreadable key file.
    /// Off unless configured.
    pub fn session_allow_ephemeral(&self) -> bool {
        self.session_allow_ephemeral.unwrap_or(false)
    }

    /// Whether session cookies are marked `Secure`. On unless configured.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }
}
