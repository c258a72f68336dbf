use super::{hooks::*, life::*};

//
// CachingConfiguration
//

/// Caching configuration.
#[derive(Clone)]
pub struct CachingConfiguration {
    /// Maximum body size.
    pub max_body_size: usize,

    /// Life for responses that don't specify one.
    ///
    /// If [None], such responses are not cached.
    pub default_life: Option<CacheLife>,

    /// Cache life (hook).
    pub cache_life: Option<CacheLifeHook>,
}

impl Default for CachingConfiguration {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1 MiB
            default_life: None,
            cache_life: None,
        }
    }
}
