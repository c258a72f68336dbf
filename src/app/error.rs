use super::{super::cache::*, data::*, pages::*};

use {
    axum::response::{IntoResponse, Response},
    http::StatusCode,
    thiserror::Error,
};

//
// AppError
//

/// App error.
///
/// Rendered as an HTML page. Error pages are never cached, as their status is not a success.
#[derive(Debug, Error)]
pub enum AppError {
    /// Not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Fetch.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Cache.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl AppError {
    /// Status code.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Fetch(FetchError::Cache(_)) | Self::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (title, message) = match &self {
            Self::NotFound(what) => ("Not found", format!("&#127864; {} not found", escape(what))),
            _ => {
                tracing::error!("{}", self);
                ("Error", format!("Something went wrong: {}", escape(&self.to_string())))
            }
        };

        let content = format!(
            r#"<h1>{}</h1><p>{}</p><p><a href="/">&larr; Back to Home</a></p>"#,
            title, message
        );
        (status, page(title, &content)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(AppError::NotFound("Cocktail".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Fetch(FetchError::Status(StatusCode::SERVICE_UNAVAILABLE)).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Cache(CacheError::InvalidLife("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
