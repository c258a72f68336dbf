use super::{super::super::cache::*, simulate_latency};

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

//
// LifeExample
//

/// The cache life examples.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LifeExample {
    /// "seconds" preset.
    Seconds,

    /// "minutes" preset.
    Minutes,

    /// "hours" preset.
    Hours,

    /// "days" preset.
    Days,

    /// Custom 5min / 15min / 1h.
    Custom,
}

impl LifeExample {
    /// All examples in display order.
    pub const ALL: [Self; 5] = [
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Custom,
    ];

    /// Name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Custom => "custom",
        }
    }

    /// Life.
    pub fn life(&self) -> CacheLife {
        match self {
            Self::Seconds => CacheLife::SECONDS,
            Self::Minutes => CacheLife::MINUTES,
            Self::Hours => CacheLife::HOURS,
            Self::Days => CacheLife::DAYS,
            Self::Custom => CacheLife::from_secs(300, 900, 3600),
        }
    }

    fn function_name(&self) -> &'static str {
        match self {
            Self::Seconds => "cached_with_seconds",
            Self::Minutes => "cached_with_minutes",
            Self::Hours => "cached_with_hours",
            Self::Days => "cached_with_days",
            Self::Custom => "cached_with_custom",
        }
    }
}

//
// LifeExampleData
//

/// Data of a cache life example.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LifeExampleData {
    /// Preset name (or "custom").
    pub preset: String,

    /// When it was computed.
    pub timestamp: DateTime<Utc>,

    /// Human-readable life.
    pub config: String,
}

/// Cached data for a cache life example.
pub async fn life_example_data<CacheT>(
    memoizer: &Memoizer<CacheT>,
    example: LifeExample,
) -> Result<Cached<LifeExampleData>, CacheError>
where
    CacheT: Cache,
{
    let life = example.life();

    memoizer
        .function(example.function_name())
        .life(life)
        .run(move || async move {
            tracing::info!("fetching with {} life", example.name());
            simulate_latency(50).await;

            Ok(LifeExampleData {
                preset: example.name().into(),
                timestamp: Utc::now(),
                config: life.to_string(),
            })
        })
        .await
}
