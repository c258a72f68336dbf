use super::{super::super::cache::*, random_id, simulate_latency};

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

//
// ComponentData
//

/// What a component renders.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ComponentData {
    /// When it was generated.
    pub generated_at: DateTime<Utc>,

    /// Random identifier.
    pub random: String,
}

impl ComponentData {
    async fn generate() -> Self {
        simulate_latency(50).await;
        Self {
            generated_at: Utc::now(),
            random: random_id(),
        }
    }
}

/// Component cached for an hour.
///
/// Components share a function but are cached independently via their scope.
pub async fn hourly_component<CacheT>(
    memoizer: &Memoizer<CacheT>,
) -> Result<Cached<ComponentData>, CacheError>
where
    CacheT: Cache,
{
    memoizer
        .function("component")
        .scope("hourly")
        .life(CacheLife::HOURS)
        .run(|| async { Ok(ComponentData::generate().await) })
        .await
}

/// Component cached for five minutes (5min / 10min / 1h).
pub async fn five_minute_component<CacheT>(
    memoizer: &Memoizer<CacheT>,
) -> Result<Cached<ComponentData>, CacheError>
where
    CacheT: Cache,
{
    memoizer
        .function("component")
        .scope("five-minutes")
        .life(CacheLife::from_secs(300, 600, 3600))
        .run(|| async { Ok(ComponentData::generate().await) })
        .await
}

/// Component that is never cached.
pub async fn uncached_component() -> ComponentData {
    ComponentData::generate().await
}

#[cfg(test)]
mod tests {
    use super::{super::super::super::cache::implementation::moka::*, *};

    #[tokio::test]
    async fn components_are_cached_independently() {
        let memoizer = Memoizer::new(MokaCacheImplementation::with_capacity("test", 1024 * 1024));

        let hourly = hourly_component(&memoizer).await.expect("component");
        let five_minutes = five_minute_component(&memoizer).await.expect("component");
        assert_eq!(five_minutes.status, CacheStatus::Miss);

        let hourly_again = hourly_component(&memoizer).await.expect("component");
        assert_eq!(hourly_again.status, CacheStatus::Hit);
        assert_eq!(hourly_again.value.random, hourly.value.random);

        let first = uncached_component().await;
        let second = uncached_component().await;
        assert!(second.generated_at >= first.generated_at);
    }
}
