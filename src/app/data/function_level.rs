use super::{super::super::cache::*, simulate_latency};

use {
    chrono::{DateTime, Utc},
    rand::Rng,
    serde::{Deserialize, Serialize},
};

//
// UserData
//

/// User data.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserData {
    /// ID.
    pub id: String,

    /// Name.
    pub name: String,

    /// When it was computed.
    pub timestamp: DateTime<Utc>,
}

/// Cached user data. Tagged `user-{id}`.
pub async fn user_data<CacheT>(
    memoizer: &Memoizer<CacheT>,
    id: &str,
) -> Result<Cached<UserData>, CacheError>
where
    CacheT: Cache,
{
    let id = id.to_string();

    memoizer
        .function("user_data")
        .argument(&id)
        .tag(format!("user-{}", id))
        .life(CacheLife::HOURS)
        .run(move || async move {
            tracing::info!("fetching user: {}", id);
            simulate_latency(100).await;

            let name = format!("User {}", id);
            Ok(UserData {
                id,
                name,
                timestamp: Utc::now(),
            })
        })
        .await
}

//
// Posts
//

/// Posts summary.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Posts {
    /// Number of posts.
    pub count: u32,

    /// Title of the latest post.
    pub latest: String,

    /// When it was computed.
    pub timestamp: DateTime<Utc>,
}

/// Cached posts summary. Tagged `posts`.
pub async fn posts<CacheT>(memoizer: &Memoizer<CacheT>) -> Result<Cached<Posts>, CacheError>
where
    CacheT: Cache,
{
    memoizer
        .function("posts")
        .tag("posts")
        .life(CacheLife::from_secs(300, 900, 3600))
        .run(|| async {
            tracing::info!("fetching posts");
            simulate_latency(100).await;

            Ok(Posts {
                count: 42,
                latest: "My Latest Post".into(),
                timestamp: Utc::now(),
            })
        })
        .await
}

//
// Stats
//

/// Stats.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Stats {
    /// Stats type.
    #[serde(rename = "type")]
    pub type_: String,

    /// Views.
    pub views: u32,

    /// When it was computed.
    pub timestamp: DateTime<Utc>,
}

/// Cached stats. Tagged `stats-{type}`.
pub async fn stats<CacheT>(
    memoizer: &Memoizer<CacheT>,
    type_: &str,
) -> Result<Cached<Stats>, CacheError>
where
    CacheT: Cache,
{
    let type_ = type_.to_string();

    memoizer
        .function("stats")
        .argument(&type_)
        .tag(format!("stats-{}", type_))
        .life(CacheLife::HOURS)
        .run(move || async move {
            tracing::info!("fetching stats: {}", type_);
            simulate_latency(100).await;

            let views = rand::rng().random_range(0..10_000);
            Ok(Stats {
                type_,
                views,
                timestamp: Utc::now(),
            })
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::{super::super::super::cache::implementation::moka::*, *};

    #[tokio::test]
    async fn stats_are_cached_per_type() {
        let memoizer = Memoizer::new(MokaCacheImplementation::with_capacity("test", 1024 * 1024));

        let daily = stats(&memoizer, "daily").await.expect("stats");
        let again = stats(&memoizer, "daily").await.expect("stats");
        assert_eq!(again.status, CacheStatus::Hit);
        assert_eq!(again.value.views, daily.value.views);

        let weekly = stats(&memoizer, "weekly").await.expect("stats");
        assert_eq!(weekly.status, CacheStatus::Miss);
        assert_eq!(weekly.value.type_, "weekly");
    }

    #[tokio::test]
    async fn user_tag_revalidates_only_that_user() {
        let cache = MokaCacheImplementation::with_capacity("test", 1024 * 1024);
        let memoizer = Memoizer::new(cache.clone());

        user_data(&memoizer, "user-123").await.expect("user");
        user_data(&memoizer, "user-456").await.expect("user");

        cache.revalidate_tag("user-user-123", RevalidateMode::Expire).await.expect("revalidate");

        assert_eq!(user_data(&memoizer, "user-123").await.expect("user").status, CacheStatus::Miss);
        assert_eq!(user_data(&memoizer, "user-456").await.expect("user").status, CacheStatus::Hit);
    }
}
