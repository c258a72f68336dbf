mod cache_life;
mod cache_tags;
mod cocktails;
mod component_level;
mod file_level;
mod function_level;
mod search_params;

#[allow(unused_imports)]
pub use {
    cache_life::*, cache_tags::*, cocktails::*, component_level::*, file_level::*,
    function_level::*, search_params::*,
};

use {
    rand::distr::{Alphanumeric, SampleString},
    std::time::Duration,
};

// Simulated latency of a data source
async fn simulate_latency(milliseconds: u64) {
    tokio::time::sleep(Duration::from_millis(milliseconds)).await;
}

// Short random identifier, to make recomputation visible
fn random_id() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 6).to_lowercase()
}
