use super::{super::super::cache::*, simulate_latency};

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Results per page.
pub const PAGE_SIZE: u32 = 10;

/// Highest page. Higher pages are clamped to it.
pub const MAX_PAGE: u32 = 10_000;

/// Results generated per request.
const RESULT_COUNT: u32 = 5;

//
// SearchResults
//

/// Search results.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchResults {
    /// Filter.
    pub filter: String,

    /// Sort.
    pub sort: String,

    /// Page (1-based).
    pub page: u32,

    /// When it was computed.
    pub timestamp: DateTime<Utc>,

    /// Query string.
    pub query: String,

    /// Results.
    pub results: Vec<String>,
}

/// Cached search results.
///
/// The search parameters are extracted from the request by the caller and passed in as arguments,
/// making them part of the cache key.
pub async fn data_with_params<CacheT>(
    memoizer: &Memoizer<CacheT>,
    filter: &str,
    sort: &str,
    page: u32,
) -> Result<Cached<SearchResults>, CacheError>
where
    CacheT: Cache,
{
    let filter = filter.to_string();
    let sort = sort.to_string();
    let page = page.clamp(1, MAX_PAGE);

    memoizer
        .function("data_with_params")
        .argument(&filter)
        .argument(&sort)
        .argument(page)
        .tag(format!("search-{}", filter))
        .tag(format!("sort-{}", sort))
        .life(CacheLife::from_secs(300, 900, 3600))
        .run(move || async move {
            tracing::info!("fetching data: filter={}, sort={}, page={}", filter, sort, page);
            simulate_latency(200).await;

            let results = generate_results(&filter, &sort, page);
            let query = format!("filter={}&sort={}&page={}", filter, sort, page);
            Ok(SearchResults {
                filter,
                sort,
                page,
                timestamp: Utc::now(),
                query,
                results,
            })
        })
        .await
}

/// Results for a page.
pub fn generate_results(filter: &str, sort: &str, page: u32) -> Vec<String> {
    let first = (page.clamp(1, MAX_PAGE) - 1) * PAGE_SIZE + 1;
    (first..first + RESULT_COUNT)
        .map(|item| format!("Item {} (filter: {}, sort: {})", item, filter, sort))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_follow_page() {
        let results = generate_results("active", "priority", 2);
        assert_eq!(results.len(), 5);
        assert_eq!(results[0], "Item 11 (filter: active, sort: priority)");
        assert_eq!(results[4], "Item 15 (filter: active, sort: priority)");

        assert_eq!(generate_results("all", "name", 0)[0], "Item 1 (filter: all, sort: name)");
    }

    #[test]
    fn huge_page_is_clamped() {
        let results = generate_results("all", "name", u32::MAX);
        assert_eq!(results.len(), 5);
        assert_eq!(results[0], "Item 99991 (filter: all, sort: name)");
    }
}
