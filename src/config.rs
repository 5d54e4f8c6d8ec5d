use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Go,
    Rust,
    Node,
    #[default]
    Neutral,
}

impl Theme {
    pub fn from_backend_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "go" => Theme::Go,
            "rust" => Theme::Rust,
            "node" => Theme::Node,
            _ => Theme::Neutral,
        }
    }

    /// (panel background, button colour)
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Theme::Go => ("#ecfeff", "#0e7490"),
            Theme::Rust => ("#fff7ed", "#ea580c"),
            Theme::Node => ("#f0fdf4", "#22c55e"),
            Theme::Neutral => ("#f3f4f6", "#4b5563"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub port: u16,
    pub theme: Theme,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("NEXT_PUBLIC_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| {
                info!("NEXT_PUBLIC_API_URL not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            });

        let theme = lookup("BACKEND_NAME")
            .map(|name| Theme::from_backend_name(&name))
            .unwrap_or_default();

        let request_timeout = parse_or::<u64>(&lookup, "HABIT_API_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            api_url,
            port: parse_or(&lookup, "PORT").unwrap_or(DEFAULT_PORT),
            theme,
            request_timeout,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T::Err: Display,
{
    let raw = lookup(key)?;
    raw.trim()
        .parse()
        .map_err(|err| warn!("Invalid {key} value {raw:?}: {err}, using default"))
        .ok()
}
