use super::{
    super::{
        super::cache::{middleware::*, *},
        data::*,
        error::*,
        state::*,
    },
    layout::*,
};

use {
    axum::{
        extract::{Query, State},
        response::{IntoResponse, Response},
    },
    serde::Deserialize,
};

/// The examples with their titles and descriptions.
pub const EXAMPLES: &[(&str, &str, &str)] = &[
    (
        "/examples/file-level",
        "File Level Cache",
        "The whole page is cached as a unit by the caching layer.",
    ),
    (
        "/examples/component-level",
        "Component Level Cache",
        "Parts of a page are cached independently, each with its own life.",
    ),
    (
        "/examples/function-level",
        "Function Level Cache",
        "Data functions are memoized; their arguments are part of the cache key.",
    ),
    (
        "/examples/with-searchparams?filter=active&sort=name",
        "With Search Params",
        "Query parameters are extracted outside the cached function and passed in as arguments.",
    ),
    (
        "/examples/with-cache-tags",
        "With Cache Tags",
        "Tags group cache entries for on-demand revalidation.",
    ),
    (
        "/examples/custom-cache-life",
        "Custom Cache Life",
        "Lifetime presets (seconds, minutes, hours, days, weeks, max) and custom lives.",
    ),
];

/// Examples index page.
///
/// Static, so cached with the "max" life.
pub async fn examples_page() -> Response {
    let mut examples = String::new();
    for (href, title, description) in EXAMPLES {
        examples.push_str(&format!(
            "<li><a href=\"{}\">{}</a>: {}</li>\n",
            escape(href),
            escape(title),
            escape(description)
        ));
    }

    let content = format!(
        r#"<h1>Caching Examples</h1>
<p>Different ways to cache pages, components, and data.</p>
<ul>
{}</ul>
<p><a href="/">&larr; Back to Home</a></p>
"#,
        examples
    );

    page("Examples", &content).with_cache_life(&CacheLife::MAX)
}

/// File level example page.
///
/// The whole page is cached with the "hours" life. Refreshing shows the same timestamp and ID
/// until the entry goes stale.
pub async fn file_level_page() -> Response {
    let data = page_data().await;

    let content = format!(
        r#"{back}
<h1>File Level Cache</h1>
<p>The handler marks its response with <code>XX-Cache-Life: hours</code> and the caching layer
caches the whole page. Check the <code>X-Cache</code> response header.</p>
<section>
<p>Page generated at: <strong>{timestamp}</strong></p>
<p>Random ID: <strong>{random_id}</strong></p>
</section>
<ul>
<li>Ideal for fully static pages.</li>
<li>Cannot depend on per-request data (cookies, headers).</li>
<li>All or nothing: no granularity.</li>
</ul>
"#,
        back = BACK_TO_EXAMPLES,
        timestamp = timestamp(&data.timestamp),
        random_id = escape(&data.random_id),
    );

    page("File Level Cache", &content).with_cache_life(&CacheLife::HOURS)
}

/// Component level example page.
///
/// The page is not cached, but two of its components are, each with its own life.
pub async fn component_level_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let hourly = hourly_component(&state.memoizer).await?;
    let five_minutes = five_minute_component(&state.memoizer).await?;
    let uncached = uncached_component().await;

    let mut content = format!(
        "{}\n<h1>Component Level Cache</h1>\n<p>Each component is cached independently.</p>\n",
        BACK_TO_EXAMPLES
    );
    content.push_str(&cached_details(
        "Cached for 1 hour",
        &hourly,
        &component_body(&hourly.value),
    ));
    content.push_str(&cached_details(
        "Cached for 5 minutes",
        &five_minutes,
        &component_body(&five_minutes.value),
    ));
    content.push_str(&format!(
        "<section class=\"uncached\">\n<h3>No cache (always dynamic)</h3>\n{}</section>\n",
        component_body(&uncached)
    ));

    Ok(page("Component Level Cache", &content).into_response())
}

fn component_body(data: &ComponentData) -> String {
    format!(
        "<p>Generated at: {}</p>\n<p>Random: {}</p>\n",
        timestamp(&data.generated_at),
        escape(&data.random)
    )
}

/// Function level example page.
pub async fn function_level_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let user = user_data(&state.memoizer, "user-123").await?;
    let posts = posts(&state.memoizer).await?;
    let stats = stats(&state.memoizer, "daily").await?;

    let mut content = format!(
        "{}\n<h1>Function Level Cache</h1>\n<p>Memoized functions are reusable, and their arguments are part of the cache key.</p>\n",
        BACK_TO_EXAMPLES
    );
    content.push_str(&cached_details(
        "User (tag: user-user-123)",
        &user,
        &format!("<p>{} ({})</p>\n", escape(&user.value.name), escape(&user.value.id)),
    ));
    content.push_str(&cached_details(
        "Posts (tag: posts)",
        &posts,
        &format!("<p>{} posts, latest: {}</p>\n", posts.value.count, escape(&posts.value.latest)),
    ));
    content.push_str(&cached_details(
        "Stats (tag: stats-daily)",
        &stats,
        &format!("<p>{} views ({})</p>\n", stats.value.views, escape(&stats.value.type_)),
    ));

    Ok(page("Function Level Cache", &content).into_response())
}

//
// SearchQuery
//

/// Query of the search params example.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Filter. Defaults to "all".
    pub filter: Option<String>,

    /// Sort. Defaults to "name".
    pub sort: Option<String>,

    /// Page. Defaults to 1, clamped to [MAX_PAGE].
    pub page: Option<String>,
}

impl SearchQuery {
    /// Filter, sort, and page, with defaults.
    pub fn parameters(&self) -> (&str, &str, u32) {
        let filter = self
            .filter
            .as_deref()
            .filter(|filter| !filter.is_empty())
            .unwrap_or("all");
        let sort = self
            .sort
            .as_deref()
            .filter(|sort| !sort.is_empty())
            .unwrap_or("name");
        let page = self
            .page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(1)
            .clamp(1, MAX_PAGE);
        (filter, sort, page)
    }
}

/// Search params example page.
pub async fn search_params_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let (filter, sort, page_number) = query.parameters();
    let results = data_with_params(&state.memoizer, filter, sort, page_number).await?;

    let items: String = results
        .value
        .results
        .iter()
        .map(|item| format!("<li>{}</li>\n", escape(item)))
        .collect();

    let links: String = [
        "filter=active&sort=name&page=1",
        "filter=completed&sort=date&page=1",
        "filter=active&sort=priority&page=2",
        "filter=all&sort=name&page=1",
    ]
    .iter()
    .map(|query| {
        format!(
            "<li><a href=\"/examples/with-searchparams?{0}\">?{0}</a></li>\n",
            escape(query)
        )
    })
    .collect();

    let mut content = format!(
        r#"{}
<h1>Caching with Search Params</h1>
<p>Extract the query parameters outside the cached function and pass them in as arguments. The
arguments become the cache key.</p>
<ul>
{}</ul>
"#,
        BACK_TO_EXAMPLES, links
    );
    content.push_str(&cached_details(
        &format!(
            r#"Cache key: {{ filter: "{}", sort: "{}", page: {} }}"#,
            filter, sort, page_number
        ),
        &results,
        &format!(
            "<p>Query: <code>{}</code></p>\n<ul>\n{}</ul>\n<p>Tags: search-{}, sort-{}</p>\n",
            escape(&results.value.query),
            items,
            escape(filter),
            escape(sort)
        ),
    ));

    Ok(page("With Search Params", &content).into_response())
}

/// Cache tags example page.
pub async fn cache_tags_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut content = format!(
        r#"{}
<h1>Cache Tags &amp; Revalidation</h1>
<p>Tags let you revalidate groups of cache entries on demand:</p>
<ul>
<li><code>POST /api/revalidate?tag=user-123</code> revalidates one resource</li>
<li><code>POST /api/revalidate?tag=type-user</code> revalidates all users</li>
<li><code>POST /api/revalidate?tag=all-data</code> revalidates everything</li>
</ul>
"#,
        BACK_TO_EXAMPLES
    );

    for (type_, id) in [("user", "123"), ("product", "456"), ("category", "electronics")] {
        let data = data_with_tags(&state.memoizer, type_, id).await?;
        let tags = data_tags(type_, id)
            .map(|tag| format!("<code>{}</code>", escape(&tag)))
            .join(" ");
        content.push_str(&cached_details(
            &format!("{}: {}", type_, id),
            &data,
            &format!("<p>{}</p>\n<p>Tags: {}</p>\n", escape(&data.value.data), tags),
        ));
    }

    Ok(page("With Cache Tags", &content).into_response())
}

/// Custom cache life example page.
pub async fn custom_cache_life_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let presets: String = CacheLife::PRESETS
        .iter()
        .map(|(name, life)| {
            format!("<li><code>{}</code>: {}</li>\n", name, escape(&life.to_string()))
        })
        .collect();

    let mut content = format!(
        r#"{}
<h1>Custom Cache Lifetimes</h1>
<p>A life is a preset or a custom stale / revalidate / expire triple.</p>
<ul>
{}</ul>
"#,
        BACK_TO_EXAMPLES, presets
    );

    for example in LifeExample::ALL {
        let data = life_example_data(&state.memoizer, example).await?;
        content.push_str(&cached_details(
            &format!("Preset: {}", data.value.preset),
            &data,
            &format!("<p>{}</p>\n", escape(&data.value.config)),
        ));
    }

    Ok(page("Custom Cache Life", &content).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_defaults() {
        assert_eq!(SearchQuery::default().parameters(), ("all", "name", 1));

        let query = SearchQuery {
            filter: Some("active".into()),
            sort: None,
            page: Some("nope".into()),
        };
        assert_eq!(query.parameters(), ("active", "name", 1));

        let query = SearchQuery {
            filter: None,
            sort: Some("date".into()),
            page: Some("3".into()),
        };
        assert_eq!(query.parameters(), ("all", "date", 3));

        let query = SearchQuery {
            filter: None,
            sort: None,
            page: Some("4294967295".into()),
        };
        assert_eq!(query.parameters(), ("all", "name", MAX_PAGE));
    }
}
