//! Runtime configuration from environment variables.
//!
//! - `FOO_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `FOO_SEED_NAME`: when set and non-empty, the store starts with one
//!   record of that name

use std::net::SocketAddr;

use crate::error::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub seed_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_name: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so parsing is testable without
    /// touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let raw_addr = lookup("FOO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e| Error::Config(format!("FOO_ADDR `{raw_addr}`: {e}")))?;
        let seed_name = lookup("FOO_SEED_NAME").filter(|name| !name.is_empty());
        Ok(Self { addr, seed_name })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.addr.to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn reads_addr_and_seed() {
        let cfg = Config::from_lookup(lookup(&[
            ("FOO_ADDR", "127.0.0.1:9000"),
            ("FOO_SEED_NAME", "first"),
        ]))
        .unwrap();
        assert_eq!(cfg.addr.port(), 9000);
        assert_eq!(cfg.seed_name.as_deref(), Some("first"));
    }

    #[test]
    fn empty_seed_is_no_seed() {
        let cfg = Config::from_lookup(lookup(&[("FOO_SEED_NAME", "")])).unwrap();
        assert_eq!(cfg.seed_name, None);
    }

    #[test]
    fn bad_addr_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("FOO_ADDR", "nope")])).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("nope")));
    }
}
