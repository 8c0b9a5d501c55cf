//! Descriptions of the elements the loader inserts into a container.
//!
//! These are plain values; a [`Container`](crate::Container) implementation
//! turns them into real nodes.

use crate::config::LoaderConfig;
use crate::provider::VideoInfo;

/// Value of the embed frame's `allow` attribute.
pub const EMBED_ALLOW: &str = "autoplay; fullscreen";

/// Clickable play affordance: an outer element holding a single icon element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayButton {
    pub class: String,
    pub icon_class: String,
    pub aria_label: String,
}

impl PlayButton {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            class: config.classes.play_button.clone(),
            icon_class: config.classes.play_icon.clone(),
            aria_label: config.text.play_label.clone(),
        }
    }
}

/// Preview image for the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub src: String,
    pub alt: String,
}

impl Thumbnail {
    pub fn new(video: &VideoInfo, config: &LoaderConfig) -> Self {
        Self {
            src: video.thumbnail_url(),
            alt: config.text.thumbnail_alt.clone(),
        }
    }
}

/// The provider's player, autoplaying with fullscreen permitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFrame {
    pub src: String,
    pub allow: &'static str,
    pub allow_fullscreen: bool,
    pub frame_border: &'static str,
}

impl EmbedFrame {
    pub fn new(video: &VideoInfo) -> Self {
        Self {
            src: video.embed_url(),
            allow: EMBED_ALLOW,
            allow_fullscreen: true,
            frame_border: "0",
        }
    }
}
