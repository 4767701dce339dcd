use crate::ClientError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const PROTOCOL_VERSION: u32 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub team: String,
    pub players: u8,
    /// Formation file; the embedded 4-3-3 when absent.
    pub formation: Option<PathBuf>,
    pub log_dir: PathBuf,
    /// Actor network record; the classic engine when absent.
    pub policy: Option<PathBuf>,
    pub init_timeout: Duration,
    pub read_timeout: Duration,
    /// Delay between agent launches.
    pub stagger: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: String::from("127.0.0.1"),
            port: 6000,
            team: String::from("Right"),
            players: 11,
            formation: None,
            log_dir: PathBuf::from("logs"),
            policy: None,
            init_timeout: Duration::from_millis(4000),
            read_timeout: Duration::from_millis(1000),
            stagger: Duration::from_millis(50),
        }
    }
}

impl ClientConfig {
    /// Reads `RCSS_*` variables, keeping defaults for the unset ones.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(host) = get("RCSS_HOST") {
            config.host = host;
        }
        if let Some(port) = get("RCSS_PORT") {
            config.port = parse_number("RCSS_PORT", &port)?;
        }
        if let Some(team) = get("RCSS_TEAM") {
            config.team = team;
        }
        if let Some(players) = get("RCSS_PLAYERS") {
            config.players = parse_number("RCSS_PLAYERS", &players)?;
            if !(1..=11).contains(&config.players) {
                return Err(ClientError::Config {
                    name: "RCSS_PLAYERS",
                    value: players,
                });
            }
        }

        config.formation = get("RCSS_CONF").map(PathBuf::from);
        config.policy = get("RCSS_POLICY").map(PathBuf::from);

        if let Some(dir) = get("RCSS_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(ms) = get("RCSS_INIT_TIMEOUT_MS") {
            config.init_timeout = Duration::from_millis(parse_number("RCSS_INIT_TIMEOUT_MS", &ms)?);
        }
        if let Some(ms) = get("RCSS_READ_TIMEOUT_MS") {
            config.read_timeout = Duration::from_millis(parse_number("RCSS_READ_TIMEOUT_MS", &ms)?);
        }

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ClientError> {
    value.trim().parse().map_err(|_| ClientError::Config {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.server_address(), "127.0.0.1:6000");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("RCSS_HOST", "10.0.0.2"),
            ("RCSS_PORT", "6100"),
            ("RCSS_TEAM", "Left"),
            ("RCSS_PLAYERS", "3"),
            ("RCSS_CONF", "conf_file.conf"),
            ("RCSS_POLICY", "actor.bin"),
            ("RCSS_LOG_DIR", "/tmp/ticks"),
            ("RCSS_INIT_TIMEOUT_MS", "500"),
            ("RCSS_READ_TIMEOUT_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.server_address(), "10.0.0.2:6100");
        assert_eq!(config.team, "Left");
        assert_eq!(config.players, 3);
        assert_eq!(config.formation, Some(PathBuf::from("conf_file.conf")));
        assert_eq!(config.policy, Some(PathBuf::from("actor.bin")));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/ticks"));
        assert_eq!(config.init_timeout, Duration::from_millis(500));
        assert_eq!(config.read_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = ClientConfig::from_lookup(lookup(&[("RCSS_CONF", "  ")])).unwrap();
        assert_eq!(config.formation, None);
    }

    #[test]
    fn test_invalid_number() {
        let result = ClientConfig::from_lookup(lookup(&[("RCSS_PORT", "sixty")]));
        assert!(matches!(result, Err(ClientError::Config { name: "RCSS_PORT", .. })));
    }

    #[test]
    fn test_player_count_bounds() {
        let result = ClientConfig::from_lookup(lookup(&[("RCSS_PLAYERS", "12")]));
        assert!(matches!(result, Err(ClientError::Config { name: "RCSS_PLAYERS", .. })));

        let result = ClientConfig::from_lookup(lookup(&[("RCSS_PLAYERS", "0")]));
        assert!(result.is_err());
    }
}
