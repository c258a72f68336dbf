use super::{cache::*, entry::*, error::*, key::*, life::*, revalidation::*, tags::*};

use {
    chrono::{DateTime, Utc},
    serde::{Serialize, de::DeserializeOwned},
    serde_json::Value,
    std::{fmt, sync::*},
};

//
// CacheStatus
//

/// How a value was obtained.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CacheStatus {
    /// Fresh value from the cache.
    Hit,

    /// Stale value from the cache. A recomputation was triggered in the background.
    Stale,

    /// Computed now.
    Miss,
}

impl CacheStatus {
    /// As string (the `X-Cache` header value).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Stale => "STALE",
            Self::Miss => "MISS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), formatter)
    }
}

//
// Cached
//

/// Value with its cache metadata.
#[derive(Clone, Debug)]
pub struct Cached<ValueT> {
    /// Value.
    pub value: ValueT,

    /// Status.
    pub status: CacheStatus,

    /// When the value was computed.
    pub timestamp: DateTime<Utc>,

    /// Life.
    pub life: CacheLife,
}

//
// Memoizer
//

/// Caches function results by function identity and argument values.
///
/// Values are stored serialized, so a single cache can hold results of any type.
#[derive(Clone, Debug)]
pub struct Memoizer<CacheT> {
    cache: CacheT,
    revalidations: RevalidationSet,
}

impl<CacheT> Memoizer<CacheT>
where
    CacheT: Cache,
{
    /// Constructor.
    pub fn new(cache: CacheT) -> Self {
        Self {
            cache,
            revalidations: RevalidationSet::default(),
        }
    }

    /// Cache.
    pub fn cache(&self) -> &CacheT {
        &self.cache
    }

    /// Start a cached call.
    pub fn function(&self, name: &'static str) -> CachedCall<CacheT> {
        CachedCall {
            memoizer: self.clone(),
            name,
            arguments: Vec::default(),
            scope: None,
            life: CacheLife::DEFAULT,
            tags: Tags::default(),
        }
    }
}

//
// CachedCall
//

/// A call to a cached function.
///
/// Created by [Memoizer::function].
pub struct CachedCall<CacheT> {
    memoizer: Memoizer<CacheT>,
    name: &'static str,
    arguments: Vec<String>,
    scope: Option<String>,
    life: CacheLife,
    tags: Tags,
}

impl<CacheT> CachedCall<CacheT>
where
    CacheT: Cache,
{
    /// Add an argument. It will be part of the cache key.
    pub fn argument(mut self, argument: impl ToString) -> Self {
        self.arguments.push(argument.to_string());
        self
    }

    /// Narrow the cache key with an explicit scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the life.
    ///
    /// The default is [CacheLife::DEFAULT].
    pub fn life(mut self, life: CacheLife) -> Self {
        self.life = life;
        self
    }

    /// Add a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.add(tag);
        self
    }

    /// Cache key.
    pub fn key(&self) -> CacheKey {
        let key = CacheKey::function(self.name, self.arguments.clone());
        match &self.scope {
            Some(scope) => key.with_scope(scope.clone()),
            None => key,
        }
    }

    /// Get the value from the cache or compute it.
    ///
    /// * Fresh entry: `compute` is not called.
    /// * Stale entry: the stored value is returned and `compute` runs in the background (unless a
    ///   background recomputation for this key is already running).
    /// * Missing or expired entry: `compute` runs now and its value is stored.
    ///
    /// Errors from `compute` are returned as is and nothing is stored.
    pub async fn run<ValueT, ErrorT, ComputeT, FutureT>(
        self,
        compute: ComputeT,
    ) -> Result<Cached<ValueT>, ErrorT>
    where
        ValueT: 'static + DeserializeOwned + Send + Serialize,
        ErrorT: 'static + fmt::Display + From<CacheError> + Send,
        ComputeT: 'static + FnOnce() -> FutureT + Send,
        FutureT: 'static + Future<Output = Result<ValueT, ErrorT>> + Send,
    {
        let key = self.key();

        if let Some(entry) = self.memoizer.cache.get(&key).await {
            let freshness = entry.freshness();
            if freshness != Freshness::Expired
                && let CachedValue::Data(data) = &entry.value
            {
                match serde_json::from_value::<ValueT>(data.clone()) {
                    Ok(value) => {
                        let status = if freshness == Freshness::Fresh {
                            tracing::debug!("hit: {}", key);
                            CacheStatus::Hit
                        } else {
                            tracing::debug!("stale: {}", key);
                            self.revalidate_in_background(key, compute);
                            CacheStatus::Stale
                        };

                        return Ok(Cached {
                            value,
                            status,
                            timestamp: entry.timestamp,
                            life: entry.life,
                        });
                    }

                    Err(error) => tracing::warn!("ignoring cached value: {} {}", key, error),
                }
            }
        }

        tracing::info!("miss: {}", key);
        let value = compute().await?;
        let data = serde_json::to_value(&value).map_err(CacheError::from)?;
        let timestamp = store(&self.memoizer.cache, key, data, self.life, self.tags).await;

        Ok(Cached {
            value,
            status: CacheStatus::Miss,
            timestamp,
            life: self.life,
        })
    }

    fn revalidate_in_background<ValueT, ErrorT, ComputeT, FutureT>(
        self,
        key: CacheKey,
        compute: ComputeT,
    ) where
        ValueT: 'static + Send + Serialize,
        ErrorT: 'static + fmt::Display + From<CacheError> + Send,
        ComputeT: 'static + FnOnce() -> FutureT + Send,
        FutureT: 'static + Future<Output = Result<ValueT, ErrorT>> + Send,
    {
        let Some(guard) = self.memoizer.revalidations.claim(&key) else {
            tracing::debug!("already revalidating: {}", key);
            return;
        };

        let cache = self.memoizer.cache.clone();
        let life = self.life;
        let tags = self.tags;

        tokio::spawn(async move {
            let _guard = guard;
            tracing::info!("revalidating: {}", key);

            match compute().await {
                Ok(value) => match serde_json::to_value(&value) {
                    Ok(data) => {
                        store(&cache, key, data, life, tags).await;
                    }

                    Err(error) => {
                        tracing::error!("could not store revalidated value: {} {}", key, error)
                    }
                },

                Err(error) => {
                    tracing::error!("revalidation failed, keeping stale value: {} {}", key, error)
                }
            }
        });
    }
}

async fn store<CacheT>(
    cache: &CacheT,
    key: CacheKey,
    data: Value,
    life: CacheLife,
    tags: Tags,
) -> DateTime<Utc>
where
    CacheT: Cache,
{
    let entry = CachedEntry::new(CachedValue::Data(data), life, tags);
    let timestamp = entry.timestamp;
    cache.put(key, Arc::new(entry)).await;
    timestamp
}
