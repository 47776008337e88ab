use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub auth_base_url: String,
    pub auth_api_key: String,
    pub front_end_urls: Vec<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "3000"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            auth_base_url: try_load("AUTH_BASE_URL", "http://localhost:9999"),
            auth_api_key: try_load("AUTH_API_KEY", ""),
            front_end_urls: split_urls(&try_load::<String>(
                "FRONT_END_URLS",
                "http://localhost:5173,http://localhost:1313",
            )),
        }
    }
}

fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::split_urls;

    #[test]
    fn splits_and_trims_origin_lists() {
        let urls = split_urls("http://localhost:5173, http://localhost:1313");
        assert_eq!(urls, vec!["http://localhost:5173", "http://localhost:1313"]);
    }

    #[test]
    fn drops_empty_entries() {
        assert!(split_urls("").is_empty());
        assert_eq!(split_urls("http://a,,").len(), 1);
    }
}
