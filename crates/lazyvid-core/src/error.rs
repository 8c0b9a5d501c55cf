use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    #[error("video container missing {attribute} attribute")]
    MissingUrl { attribute: String },

    #[error("unsupported video URL: {0}")]
    UnsupportedUrl(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("config error: {0}")]
    Config(String),
}

/// The thumbnail image could not be loaded. Never surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("thumbnail failed to load: {url}")]
pub struct ThumbnailError {
    pub url: String,
}
