use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("locale resources could not be read from {path}: {source}")]
    ResourceIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("locale resources are not valid JSON: {0}")]
    ResourceFormat(#[from] serde_json::Error),

    #[error("`{key}` for locale `{locale}` must be a {expected}")]
    ResourceShape {
        locale: String,
        key: String,
        expected: &'static str,
    },

    #[error("locale `{locale}` is missing message keys: {missing}")]
    MissingMessages { locale: String, missing: String },

    #[error("locale `{locale}` defines no plant facts")]
    EmptyFacts { locale: String },

    #[error("locale `{0}` is defined more than once")]
    DuplicateLocale(String),

    #[error("fallback locale `en` is not defined")]
    MissingFallbackLocale,

    #[error("unable to find a suitable request handler for `{request_type}`")]
    NoHandler { request_type: String },

    #[error("localization attributes were not attached to the request")]
    TranslatorMissing,

    #[error("handler `{handler}` failed: {message}")]
    Handler {
        handler: &'static str,
        message: String,
    },
}

impl SkillError {
    /// Errors raised while a request is being handled, as opposed to
    /// start-up errors from loading locale resources.
    pub fn is_handler_failure(&self) -> bool {
        matches!(
            self,
            Self::NoHandler { .. } | Self::TranslatorMissing | Self::Handler { .. }
        )
    }
}
