use std::net::SocketAddr;

use serde::Deserialize;

pub const DEFAULT_GATEWAY_PORT: u16 = 8080;
pub const GATEWAY_URL_ENV: &str = "MANGO_GATEWAY_URL";
pub const GATEWAY_PORT_ENV: &str = "MANGO_GATEWAY_PORT";

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub cookies: CookieConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        format!("{}:{}", self.bind, self.port).parse().ok()
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GatewayConfig {
    /// Full base URL including `/api`, or `auto` to derive it from `port`.
    pub url: Option<String>,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: None,
            port: DEFAULT_GATEWAY_PORT,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct CookieConfig {
    pub secure: bool,
}

impl Config {
    /// Environment wins over the file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(GATEWAY_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.gateway.url = Some(url);
        }
        if let Some(raw) = lookup(GATEWAY_PORT_ENV) {
            match raw.trim().parse() {
                Ok(port) => self.gateway.port = port,
                Err(e) => tracing::warn!("ignoring {GATEWAY_PORT_ENV}={raw}: {e}"),
            }
        }
    }

    pub fn gateway_url(&self) -> String {
        resolve_gateway_url(self.gateway.url.as_deref(), self.gateway.port)
    }
}

/// An unset or `auto` URL points at the `gateway` host of the compose network.
pub fn resolve_gateway_url(url: Option<&str>, port: u16) -> String {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() && !url.eq_ignore_ascii_case("auto") => {
            url.trim_end_matches('/').to_string()
        }
        _ => format!("http://gateway:{port}/api"),
    }
}

pub fn load(path: &str) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to parse config {path}: {e}, using defaults");
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read config {path}: {e}, using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_and_missing_urls_use_gateway_host() {
        assert_eq!(resolve_gateway_url(None, 8080), "http://gateway:8080/api");
        assert_eq!(resolve_gateway_url(Some("auto"), 9000), "http://gateway:9000/api");
        assert_eq!(resolve_gateway_url(Some("  "), 8080), "http://gateway:8080/api");
        assert_eq!(
            resolve_gateway_url(Some("http://localhost:8000/api/"), 8080),
            "http://localhost:8000/api"
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [gateway]
            url = "auto"
            port = 9090

            [cookies]
            secure = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.cookies.secure);
        assert_eq!(config.gateway_url(), "http://gateway:9090/api");
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            GATEWAY_URL_ENV => Some("http://10.0.0.5:8000/api".into()),
            GATEWAY_PORT_ENV => Some("not-a-port".into()),
            _ => None,
        });
        assert_eq!(config.gateway_url(), "http://10.0.0.5:8000/api");
        assert_eq!(config.gateway.port, DEFAULT_GATEWAY_PORT);

        let mut config = Config::default();
        config.apply_env(|key| (key == GATEWAY_PORT_ENV).then(|| "7000".into()));
        assert_eq!(config.gateway_url(), "http://gateway:7000/api");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load("/nonexistent/mango.toml");
        assert_eq!(config.server.bind, "0.0.0.0");
        assert!(!config.cookies.secure);
    }
}
