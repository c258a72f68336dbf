use super::{entry::*, error::*, key::*};

use std::{fmt, str::*};

//
// RevalidateMode
//

/// How to revalidate tagged entries.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RevalidateMode {
    /// Stale-while-revalidate: entries are marked stale and the next read serves them while they
    /// are recomputed in the background.
    #[default]
    Max,

    /// Entries are discarded immediately and the next read recomputes them.
    Expire,
}

impl fmt::Display for RevalidateMode {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Max => fmt::Display::fmt("max", formatter),
            Self::Expire => fmt::Display::fmt("expire", formatter),
        }
    }
}

impl FromStr for RevalidateMode {
    type Err = String;

    fn from_str(representation: &str) -> Result<Self, Self::Err> {
        match representation {
            "max" => Ok(Self::Max),
            "expire" => Ok(Self::Expire),
            _ => Err(format!("unsupported revalidation profile: {:?}", representation)),
        }
    }
}

//
// Cache
//

/// Tag-indexed cache.
///
/// Implementations should ensure that cloning is cheap and clones always refer to the same shared
/// state.
#[allow(async_fn_in_trait)]
pub trait Cache
where
    Self: 'static + Clone + Send + Sync,
{
    /// Get an entry from the cache.
    ///
    /// Note that this is an `async` function written in longer form in order to include the `Send`
    /// constraint. Implementations can simply use `async fn get`.
    fn get(&self, key: &CacheKey) -> impl Future<Output = Option<CachedEntryRef>> + Send;

    /// Put an entry in the cache.
    ///
    /// The cache should evict the entry after its
    /// [CacheLife::lifetime](super::CacheLife::lifetime), if it has one.
    fn put(&self, key: CacheKey, entry: CachedEntryRef) -> impl Future<Output = ()> + Send;

    /// Invalidate a cache entry.
    fn invalidate(&self, key: &CacheKey) -> impl Future<Output = ()> + Send;

    /// Invalidate all cache entries.
    fn invalidate_all(&self) -> impl Future<Output = ()> + Send;

    /// Revalidate all entries carrying a tag.
    ///
    /// Returns the number of affected entries.
    fn revalidate_tag(
        &self,
        tag: &str,
        mode: RevalidateMode,
    ) -> impl Future<Output = Result<usize, CacheError>> + Send;
}
