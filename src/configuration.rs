use {
    clap::Parser,
    std::{io, time::Duration},
    thiserror::Error,
};

/// Default address.
pub const DEFAULT_ADDRESS: &str = "[::]:8080";

/// Default cache capacity (total of entry weights, in bytes).
pub const DEFAULT_CACHE_CAPACITY: u64 = 16 * 1024 * 1024; // 16 MiB

/// Default maximum cacheable body size.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024; // 1 MiB

/// Default TheCocktailDB API base URL.
pub const DEFAULT_COCKTAIL_API: &str = "https://www.thecocktaildb.com/api/json/v1/1";

/// Default timeout for fetching from TheCocktailDB.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

//
// Configuration
//

/// Demo server for page-level and function-level caching with lifetimes and tags.
#[derive(Clone, Debug, Parser)]
#[command(name = "cocktail-cache", version, about)]
pub struct Configuration {
    /// Address to bind to.
    #[arg(long, env = "COCKTAIL_CACHE_ADDRESS", default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// Cache capacity in bytes (an estimate of the total entry size, not a promise of memory use).
    #[arg(long, env = "COCKTAIL_CACHE_CAPACITY", default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: u64,

    /// Maximum size in bytes of response bodies to cache.
    #[arg(long, env = "COCKTAIL_CACHE_MAX_BODY_SIZE", default_value_t = DEFAULT_MAX_BODY_SIZE)]
    pub max_body_size: usize,

    /// TheCocktailDB API base URL.
    #[arg(long, env = "COCKTAIL_CACHE_API", default_value = DEFAULT_COCKTAIL_API)]
    pub cocktail_api: String,

    /// Timeout for fetching from TheCocktailDB (e.g. "10s", "500ms").
    #[arg(
        long,
        env = "COCKTAIL_CACHE_FETCH_TIMEOUT",
        default_value = "10s",
        value_parser = parse_duration
    )]
    pub fetch_timeout: Duration,

    /// Log level, used when `RUST_LOG` is not set.
    #[arg(long, env = "COCKTAIL_CACHE_LOG", default_value = "info")]
    pub log_level: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.into(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            cocktail_api: DEFAULT_COCKTAIL_API.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            log_level: "info".into(),
        }
    }
}

fn parse_duration(representation: &str) -> Result<Duration, String> {
    duration_str::parse(representation).map_err(|error| error.to_string())
}

//
// ConfigurationError
//

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// HTTP client.
    #[error("HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Bind.
    #[error("bind {address}: {source}")]
    Bind {
        /// Address.
        address: String,

        /// Source.
        source: io::Error,
    },

    /// Serve.
    #[error("serve: {0}")]
    Serve(io::Error),
}
