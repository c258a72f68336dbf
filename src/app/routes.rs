use super::{
    super::{cache::*, layer::*},
    pages::*,
    state::*,
};

use {
    axum::{
        Json, Router,
        extract::{Query, State},
        response::{IntoResponse, Response},
        routing::*,
    },
    chrono::{SecondsFormat, Utc},
    http::StatusCode,
    serde_json::json,
    tower_http::trace::*,
};

/// The app's router, with the caching and tracing layers.
pub fn router(state: AppState) -> Router {
    let caching = CachingLayer::new()
        .cache(state.cache.clone())
        .max_cacheable_body_size(state.max_body_size);

    Router::default()
        .route("/", get(home_page))
        .route("/examples", get(examples_page))
        .route("/examples/file-level", get(file_level_page))
        .route("/examples/component-level", get(component_level_page))
        .route("/examples/function-level", get(function_level_page))
        .route("/examples/with-searchparams", get(search_params_page))
        .route("/examples/with-cache-tags", get(cache_tags_page))
        .route("/examples/custom-cache-life", get(custom_cache_life_page))
        .route("/p/{*slug}", get(cocktail_page))
        .route("/api/revalidate", post(revalidate_handler).get(revalidate_usage_handler))
        .with_state(state)
        .layer(caching)
        .layer(TraceLayer::new_for_http())
}

//
// RevalidateQuery
//

/// Query of the revalidate API.
#[derive(Debug, Default)]
pub struct RevalidateQuery {
    /// Tag.
    pub tag: Option<String>,

    /// Profile: "max" (the default) or "expire".
    pub profile: Option<String>,
}

impl RevalidateQuery {
    /// From query parameters. The first value of each parameter wins.
    pub fn from_parameters(parameters: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (name, value) in parameters {
            match name.as_str() {
                "tag" if query.tag.is_none() => query.tag = Some(value),
                "profile" if query.profile.is_none() => query.profile = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Revalidate a tag.
///
/// With the "max" profile, tagged entries are served stale while they are recomputed in the
/// background. With "expire" they are discarded.
///
/// The query is read as plain pairs so that any malformed query still gets a JSON error.
pub async fn revalidate_handler(
    State(state): State<AppState>,
    Query(parameters): Query<Vec<(String, String)>>,
) -> Response {
    let query = RevalidateQuery::from_parameters(parameters);

    let Some(tag) = query.tag.filter(|tag| !tag.is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Missing 'tag' query parameter" }),
        );
    };

    let mode = match query.profile.as_deref() {
        None => RevalidateMode::default(),
        Some(profile) => match profile.parse::<RevalidateMode>() {
            Ok(mode) => mode,
            Err(error) => return error_response(StatusCode::BAD_REQUEST, json!({ "error": error })),
        },
    };

    match state.cache.revalidate_tag(&tag, mode).await {
        Ok(count) => {
            tracing::info!("revalidated tag ({}): {} ({} entries)", mode, tag, count);
            Json(json!({
                "success": true,
                "message": format!("Revalidated tag: {}", tag),
                "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            }))
            .into_response()
        }

        Err(error) => {
            tracing::error!("could not revalidate tag: {} {}", tag, error);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to revalidate", "details": error.to_string() }),
            )
        }
    }
}

/// Usage of the revalidate API.
pub async fn revalidate_usage_handler() -> Response {
    Json(json!({
        "description": "API for on-demand cache revalidation",
        "usage": {
            "method": "POST",
            "url": "/api/revalidate?tag=<cache-tag>",
        },
        "profiles": {
            "max": "stale-while-revalidate (default)",
            "expire": "discard immediately",
        },
        "availableTags": [
            "cocktail-{id} - revalidates a specific cocktail (e.g. cocktail-11007)",
            "variant-{variant} - revalidates all cocktails of a variant (e.g. variant-frozen)",
            "{type}-{id}, type-{type}, all-data - the cache tags example",
            "search-{filter}, sort-{sort} - the search params example",
            "user-{id}, posts, stats-{type} - the function level example",
        ],
    }))
    .into_response()
}

fn error_response(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn first_value_wins() {
        let query = RevalidateQuery::from_parameters(parameters(&[
            ("tag", "a"),
            ("other", "x"),
            ("tag", "b"),
            ("profile", "expire"),
            ("profile", "max"),
        ]));
        assert_eq!(query.tag.as_deref(), Some("a"));
        assert_eq!(query.profile.as_deref(), Some("expire"));

        let query = RevalidateQuery::from_parameters(Vec::default());
        assert!(query.tag.is_none() && query.profile.is_none());
    }
}
