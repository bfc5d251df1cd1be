//! Server settings loaded via OrthoConfig.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Values controlling the listener and startup behaviour.
///
/// Layered from CLI flags, `ROSTER_*` environment variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Seed the reference employees on startup; disable for an empty store.
    #[ortho_config(default = true)]
    pub seed_example_data: bool,
}

impl ServerSettings {
    /// Return the configured listen address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("roster")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("ROSTER_BIND_ADDR", None::<String>),
            ("ROSTER_SEED_EXAMPLE_DATA", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.seed_example_data);
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ROSTER_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("ROSTER_SEED_EXAMPLE_DATA", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.seed_example_data);
        assert_eq!(
            settings.bind_addr().expect("override parses"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("not-an-address".to_owned()),
            seed_example_data: false,
        };
        assert!(settings.bind_addr().is_err());
    }
}
