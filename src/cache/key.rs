use super::weight::*;

use {
    http::{uri::*, *},
    kutil::{http::*, std::immutable::*},
    std::fmt,
};

//
// CacheKey
//

/// Cache key.
///
/// Function keys are derived from the function's identity and its argument values (in order).
/// Page keys are derived from the request method, path, and query (sorted by key, so parameter
/// order does not matter).
///
/// Both can be narrowed with an explicit scope, e.g. for a component cached independently inside
/// a page.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum CacheKey {
    /// Function result.
    Function {
        /// Function identity.
        name: &'static str,

        /// Argument values.
        arguments: Vec<String>,

        /// Optional scope.
        scope: Option<String>,
    },

    /// Page response.
    Page {
        /// Method.
        method: Method,

        /// Optional path.
        path: Option<ByteString>,

        /// Optional query (sorted by key).
        query: Option<QueryMap>,

        /// Optional scope.
        scope: Option<String>,
    },
}

impl CacheKey {
    /// Function key constructor.
    pub fn function(name: &'static str, arguments: Vec<String>) -> Self {
        Self::Function {
            name,
            arguments,
            scope: None,
        }
    }

    /// Page key for a request.
    pub fn for_request(method: &Method, uri: &Uri) -> Self {
        let (path, query) = uri
            .path_and_query()
            .map(|path_and_query| {
                (
                    Some(path_and_query.path().into()),
                    path_and_query.decoded_query_map(),
                )
            })
            .unwrap_or_default();

        Self::Page {
            method: method.clone(),
            path,
            query,
            scope: None,
        }
    }

    /// With explicit scope.
    pub fn with_scope(mut self, new_scope: impl Into<String>) -> Self {
        match &mut self {
            Self::Function { scope, .. } | Self::Page { scope, .. } => {
                *scope = Some(new_scope.into())
            }
        }
        self
    }

    /// Whether this is a page key.
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page { .. })
    }
}

impl CacheWeight for CacheKey {
    fn cache_weight(&self) -> usize {
        const SELF_SIZE: usize = size_of::<CacheKey>();

        let mut size = SELF_SIZE;

        match self {
            Self::Function { name, arguments, scope } => {
                size += name.len();
                for argument in arguments {
                    size += argument.cache_weight();
                }
                if let Some(scope) = scope {
                    size += scope.len();
                }
            }

            Self::Page { path, query, scope, .. } => {
                if let Some(path) = path {
                    size += path.len();
                }

                if let Some(query) = query {
                    for (key, values) in query {
                        size += key.len();
                        for value in values {
                            size += value.len();
                        }
                    }
                }

                if let Some(scope) = scope {
                    size += scope.len();
                }
            }
        }

        size
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Function { name, arguments, scope } => {
                let scope = scope.as_deref().unwrap_or_default();
                write!(formatter, "fn|{}({})|{}", name, arguments.join(","), scope)
            }

            Self::Page { method, path, query, scope } => {
                let path = path
                    .as_ref()
                    .map(|path| AsRef::<str>::as_ref(path))
                    .unwrap_or_default();

                let query = query
                    .as_ref()
                    .map(|parameter| {
                        let mut string = String::default();
                        for (key, values) in parameter {
                            for value in values {
                                if !string.is_empty() {
                                    string += "&"
                                }
                                string += &format!("{}={}", key, value);
                            }
                        }
                        string
                    })
                    .unwrap_or_default();

                let scope = scope.as_deref().unwrap_or_default();

                write!(formatter, "page|{}|{}|{}|{}", method, path, query, scope)
            }
        }
    }
}
