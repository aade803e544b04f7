use crate::index::Extensions;
use dotenv::dotenv;
use std::{env::var, net::IpAddr, path::PathBuf, str::FromStr};

pub struct Config {
    pub media_dir: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub route: String,
    pub extensions: Extensions,
    pub default_limit: usize,
    pub workers: usize,
    pub feed_path: Option<String>,
}

impl Config {
    pub fn get() -> Self {
        dotenv().ok();

        Self::from_lookup(|key| var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let parse = |key: &str| lookup(key).map(|value| value.trim().to_string());

        Self {
            media_dir: parse("RMS_MEDIA_DIR")
                .filter(|media_dir| !media_dir.is_empty())
                .map_or_else(|| PathBuf::from("/videos"), PathBuf::from),
            host: parse_or(parse("RMS_HOST"), IpAddr::from([0, 0, 0, 0])),
            port: parse_or(parse("RMS_PORT"), 8000),
            route: parse("RMS_ROUTE")
                .map(|route| route.trim_matches('/').to_string())
                .filter(|route| !route.is_empty())
                .unwrap_or_else(|| "videos".into()),
            extensions: parse("RMS_EXTENSIONS")
                .map(|extensions| Extensions::new(extensions.split(',')))
                .filter(|extensions| !extensions.is_empty())
                .unwrap_or_default(),
            default_limit: parse_or(parse("RMS_DEFAULT_LIMIT"), 50),
            workers: parse_or(parse("RMS_WORKERS"), 4).max(1),
            feed_path: parse("RMS_FEED_PATH")
                .map(|feed_path| feed_path.trim_matches('/').to_string())
                .filter(|feed_path| !feed_path.is_empty()),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();

        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);

        assert_eq!(config.media_dir, PathBuf::from("/videos"));
        assert_eq!(config.port, 8000);
        assert_eq!(config.route, "videos");
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.workers, 4);
        assert!(config.feed_path.is_none());
        assert!(config.extensions.matches("a.mov"));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("RMS_MEDIA_DIR", "/srv/media"),
            ("RMS_PORT", " 9001 "),
            ("RMS_ROUTE", "/clips/"),
            ("RMS_EXTENSIONS", "png, .JPG"),
            ("RMS_DEFAULT_LIMIT", "10"),
            ("RMS_FEED_PATH", "/feed"),
        ]);

        assert_eq!(config.media_dir, PathBuf::from("/srv/media"));
        assert_eq!(config.port, 9001);
        assert_eq!(config.route, "clips");
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.feed_path.as_deref(), Some("feed"));
        assert!(config.extensions.matches("photo.jpg"));
        assert!(!config.extensions.matches("clip.mp4"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("RMS_PORT", "eighty"),
            ("RMS_WORKERS", "0"),
            ("RMS_ROUTE", "/"),
            ("RMS_EXTENSIONS", " , "),
        ]);

        assert_eq!(config.port, 8000);
        assert_eq!(config.workers, 1);
        assert_eq!(config.route, "videos");
        assert!(config.extensions.matches("a.webm"));
    }

    #[test]
    fn blank_feed_path_keeps_feed_disabled() {
        assert!(config_from(&[("RMS_FEED_PATH", "")]).feed_path.is_none());
        assert!(config_from(&[("RMS_FEED_PATH", " / ")]).feed_path.is_none());
    }
}
