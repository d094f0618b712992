//! Service configuration

use anyhow::Result;
use std::{path::PathBuf, str::FromStr};

/// How passwords are kept in the users document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Stored as given
    Plaintext,
    /// Salted Argon2 hash in PHC string format
    Argon2,
}

impl FromStr for PasswordScheme {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plaintext" => Ok(PasswordScheme::Plaintext),
            "argon2" => Ok(PasswordScheme::Argon2),
            other => anyhow::bail!("Unknown password scheme: {}", other),
        }
    }
}

/// Cart service configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Root directory of the JSON documents
    pub data_dir: PathBuf,
    /// Directory served as static files
    pub public_dir: PathBuf,
    /// Directory holding pages that require a session; never served statically
    pub pages_dir: PathBuf,
    /// Credential scheme for new and existing users
    pub password_scheme: PasswordScheme,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `CART_HOST`: Bind address (default: 0.0.0.0)
    /// - `CART_PORT`: Listen port (default: 3000)
    /// - `CART_DATA_DIR`: Document directory (default: data)
    /// - `CART_PUBLIC_DIR`: Static asset directory (default: public)
    /// - `CART_PAGES_DIR`: Session-gated page directory (default: pages)
    /// - `CART_PASSWORD_SCHEME`: `plaintext` or `argon2` (default: plaintext)
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("CART_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("CART_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let data_dir = std::env::var("CART_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let public_dir = resolve_dir(
            &std::env::var("CART_PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
        );

        let pages_dir = resolve_dir(
            &std::env::var("CART_PAGES_DIR").unwrap_or_else(|_| "pages".to_string()),
        );

        let password_scheme = match std::env::var("CART_PASSWORD_SCHEME") {
            Ok(value) => value.parse()?,
            Err(_) => PasswordScheme::Plaintext,
        };

        Ok(ServerConfig {
            host,
            port,
            data_dir,
            public_dir,
            pages_dir,
            password_scheme,
        })
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Use `dir` if it exists relative to the working directory, else try the
/// crate root so `cargo run` works from the workspace root.
fn resolve_dir(dir: &str) -> PathBuf {
    let path = PathBuf::from(dir);
    if path.is_absolute() || path.is_dir() {
        return path;
    }

    let mut fallback = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fallback.push(dir);
    if fallback.is_dir() { fallback } else { path }
}
