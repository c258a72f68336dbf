use super::super::super::cache::*;

use {
    axum::response::Html,
    chrono::{DateTime, SecondsFormat, Utc},
};

/// Escape text for HTML.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a timestamp the way the pages show it.
pub fn timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Wrap content in the site shell: header, main, and footer.
///
/// `content` must already be escaped.
pub fn page(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | CocktailCache</title>
</head>
<body>
{header}
<main>
{content}
</main>
{footer}
</body>
</html>
"#,
        title = escape(title),
        header = HEADER,
        content = content,
        footer = FOOTER,
    ))
}

/// Link back to the examples.
pub const BACK_TO_EXAMPLES: &str = r#"<p><a href="/examples">&larr; Back to Examples</a></p>"#;

/// A box describing a cached value: its status, when it was computed, and its life.
pub fn cached_details<ValueT>(title: &str, cached: &Cached<ValueT>, body: &str) -> String {
    format!(
        r#"<section class="cached {status}">
<h3>{title}</h3>
{body}
<p><small>Cache: <strong>{status_text}</strong> &middot; computed at {timestamp} &middot; {life}</small></p>
</section>
"#,
        status = cached.status.as_str().to_lowercase(),
        title = escape(title),
        body = body,
        status_text = cached.status,
        timestamp = timestamp(&cached.timestamp),
        life = escape(&cached.life.to_string()),
    )
}

const HEADER: &str = r#"<header>
<nav>
<strong><a href="/">&#127864; CocktailCache</a></strong>
<a href="/examples">Examples</a>
<a href="/p/11007?v=classic">Margarita</a>
<a href="/p/11000?v=classic">Mojito</a>
<a href="/api/revalidate">Revalidate API</a>
</nav>
</header>"#;

const FOOTER: &str = r#"<footer>
<div>
<h3>&#127864; CocktailCache</h3>
<p>Page-level and function-level caching with lifetimes and tags, using a real public API.</p>
</div>
<div>
<h3>Features</h3>
<ul>
<li>Page caching with stale-while-revalidate</li>
<li>Memoized data functions</li>
<li>TheCocktailDB API</li>
<li>Cache tags &amp; on-demand revalidation</li>
</ul>
</div>
<div>
<h3>Resources</h3>
<ul>
<li><a href="https://www.thecocktaildb.com/api.php" target="_blank" rel="noopener noreferrer">CocktailDB API</a></li>
<li><a href="/api/revalidate">API Revalidate Docs</a></li>
</ul>
</div>
</footer>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn shell() {
        let Html(html) = page("<Title>", "<p>content</p>");
        assert!(html.contains("<title>&lt;Title&gt; | CocktailCache</title>"));
        assert!(html.contains("<p>content</p>"));
        assert!(html.contains("<header>") && html.contains("<footer>"));
    }
}
