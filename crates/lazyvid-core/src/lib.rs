pub mod config;
pub mod container;
pub mod error;
pub mod loader;
pub mod markup;
pub mod provider;

#[cfg(test)]
mod testing;

pub use config::{ConfigOverrides, LoaderConfig};
pub use container::{Container, Document, ThumbnailFuture};
pub use error::{LoaderError, ThumbnailError};
pub use loader::{load_video, LazyVideoLoader, ScanReport};
pub use markup::{EmbedFrame, PlayButton, Thumbnail};
pub use provider::{parse_video_url, Provider, ProviderConfig, VideoInfo, PROVIDERS};
