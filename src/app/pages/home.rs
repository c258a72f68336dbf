use super::{
    super::{
        super::cache::{middleware::*, *},
        data::*,
    },
    layout::*,
};

use axum::response::Response;

/// Cocktails featured on the home page with their variants.
pub const FEATURED_COCKTAILS: &[(&str, &str, &[Variant])] = &[
    ("11007", "Margarita", &[Variant::Classic, Variant::Frozen, Variant::Double]),
    ("11000", "Mojito", &[Variant::Classic, Variant::Frozen]),
    ("17222", "A1", &[Variant::Classic]),
];

/// Home page.
///
/// Static, so cached with the "max" life.
pub async fn home_page() -> Response {
    let mut cocktails = String::new();
    for (id, name, variants) in FEATURED_COCKTAILS {
        let links: Vec<_> = variants
            .iter()
            .map(|variant| format!(r#"<a href="/p/{id}?v={variant}">{variant}</a>"#))
            .collect();
        cocktails.push_str(&format!("<li><strong>{}</strong> {}</li>\n", name, links.join(" ")));
    }

    let content = format!(
        r#"<h1>&#127864; CocktailCache</h1>
<p>Page-level and function-level caching with a real public API.</p>

<h2>Popular Cocktails</h2>
<ul>
{cocktails}</ul>
<p>Every <code>?v=variant</code> has its own cache entry.</p>

<h2>Caching with a Real API and Query Parameters</h2>
<ol>
<li><strong>First visit:</strong> fetched from TheCocktailDB, logged by the server.</li>
<li><strong>Refresh:</strong> cache hit, no log, instant response.</li>
<li><strong>Change the variant</strong> (<code>?v=frozen</code>): new cache entry, fetched again.</li>
<li><strong>Back to the previous variant:</strong> cache hit, it's still in memory.</li>
<li><strong>Manual revalidation:</strong> <code>POST /api/revalidate?tag=cocktail-11007</code></li>
</ol>

<p><a href="/examples">Caching examples &rarr;</a></p>
"#
    );

    page("Home", &content).with_cache_life(&CacheLife::MAX)
}
