use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub auth_user: String,
    pub auth_pass: String,
    /// Address of the contracts gRPC service.
    pub repo_uri: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("AUTH_USER environment variable must be set")]
    MissingAuthUser,
    #[error("AUTH_PASS environment variable must be set")]
    MissingAuthPass,
    #[error("REPO_URI environment variable must be set")]
    MissingRepoUri,
    #[error("invalid BIND_HOST value '{value}'")]
    InvalidBindHost { value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `lookup` returns the raw
    /// value of a variable, if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let auth_user = non_empty("AUTH_USER").ok_or(ConfigError::MissingAuthUser)?;
        let auth_pass = non_empty("AUTH_PASS").ok_or(ConfigError::MissingAuthPass)?;
        let repo_uri = non_empty("REPO_URI")
            .map(|value| value.trim().to_string())
            .ok_or(ConfigError::MissingRepoUri)?;

        let bind_host_raw = non_empty("BIND_HOST").unwrap_or_else(|| DEFAULT_BIND_HOST.to_string());
        let bind_host: IpAddr =
            bind_host_raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBindHost {
                    value: bind_host_raw.clone(),
                })?;

        // An unparsable port is not fatal.
        let port = non_empty("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let log_filter = non_empty("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            bind_addr: SocketAddr::new(bind_host, port),
            log_filter,
            auth_user,
            auth_pass,
            repo_uri,
        })
    }
}

#[cfg(test)]
impl Config {
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            log_filter: "debug".to_string(),
            auth_user: "admin".to_string(),
            auth_pass: "secret".to_string(),
            repo_uri: "http://127.0.0.1:50051".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Config, ConfigError};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("AUTH_USER", "admin"),
        ("AUTH_PASS", "pass"),
        ("REPO_URI", "http://repo:50051"),
    ];

    #[test]
    fn required_variables_have_distinct_errors() {
        let without = |skip: &str| {
            let vars: Vec<(&str, &str)> = REQUIRED
                .iter()
                .copied()
                .filter(|(name, _)| *name != skip)
                .collect();
            Config::from_lookup(lookup(&vars)).map(|_| ())
        };

        assert_eq!(without("AUTH_USER"), Err(ConfigError::MissingAuthUser));
        assert_eq!(without("AUTH_PASS"), Err(ConfigError::MissingAuthPass));
        assert_eq!(without("REPO_URI"), Err(ConfigError::MissingRepoUri));
        assert_eq!(
            ConfigError::MissingAuthUser.to_string(),
            "AUTH_USER environment variable must be set"
        );
    }

    #[test]
    fn port_defaults_and_falls_back_to_8080() -> Result<(), ConfigError> {
        let config = Config::from_lookup(lookup(&REQUIRED))?;
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.bind_addr.ip().to_string(), "0.0.0.0");
        assert_eq!(config.log_filter, "info");

        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "not-a-port"));
        assert_eq!(Config::from_lookup(lookup(&vars))?.bind_addr.port(), 8080);

        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "9090"));
        vars.push(("BIND_HOST", "127.0.0.1"));
        let config = Config::from_lookup(lookup(&vars))?;
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9090");
        Ok(())
    }

    #[test]
    fn invalid_bind_host_is_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("BIND_HOST", "not an ip"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)),
            Err(ConfigError::InvalidBindHost { .. })
        ));
    }
}
