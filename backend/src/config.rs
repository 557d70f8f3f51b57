use anyhow::Result;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Read `HOUSES_DATA_DIR`, `HOUSES_BIND_ADDR` and `HOUSES_ALLOWED_ORIGINS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = lookup("HOUSES_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let bind_addr = lookup("HOUSES_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("Invalid HOUSES_BIND_ADDR {:?}: {}", bind_addr, e))?;
        let allowed_origins = lookup("HOUSES_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self { data_dir, bind_addr, allowed_origins })
    }
}

pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.data_dir, default_data_dir());
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(cfg.allowed_origins, ["http://localhost:5173", "http://127.0.0.1:8080"]);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            ("HOUSES_DATA_DIR", "/srv/houses"),
            ("HOUSES_BIND_ADDR", "127.0.0.1:9000"),
            ("HOUSES_ALLOWED_ORIGINS", " https://a.example , ,https://b.example"),
        ])
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/houses"));
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.allowed_origins, ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn bad_bind_addr_is_an_error() {
        assert!(config(&[("HOUSES_BIND_ADDR", "localhost")]).is_err());
    }
}
