use super::{
    super::{
        cache::{implementation::moka::*, *},
        configuration::*,
    },
    data::*,
};

/// The cache used by the app.
pub type AppCache = MokaCacheImplementation;

//
// AppState
//

/// App state.
///
/// A single cache holds both the memoized function results and the cached pages, so that a tag
/// revalidates both.
#[derive(Clone)]
pub struct AppState {
    /// Cache.
    pub cache: AppCache,

    /// Memoizer for data functions.
    pub memoizer: Memoizer<AppCache>,

    /// TheCocktailDB client.
    pub cocktails: CocktailClient,

    /// Maximum cacheable page body size.
    pub max_body_size: usize,
}

impl AppState {
    /// Constructor.
    pub fn new(configuration: &Configuration) -> Result<Self, ConfigurationError> {
        let cache =
            MokaCacheImplementation::with_capacity("cocktail-cache", configuration.cache_capacity);
        let cocktails =
            CocktailClient::new(&configuration.cocktail_api, configuration.fetch_timeout)?;

        Ok(Self {
            memoizer: Memoizer::new(cache.clone()),
            cache,
            cocktails,
            max_body_size: configuration.max_body_size,
        })
    }
}
