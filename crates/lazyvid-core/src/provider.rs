use std::fmt;
use std::sync::LazyLock;

use phf::phf_ordered_map;
use regex::Regex;

// ── Regex patterns ──────────────────────────────────────────────

/// "youtube.com/embed/<id>" or "youtu.be/<id>", 11-character video ID.
static RE_YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/embed/|youtu\.be/)([a-zA-Z0-9_-]{11})").unwrap()
});

/// "vimeo.com/video/<digits>" or "player.vimeo.com/video/<digits>".
static RE_VIMEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:vimeo\.com/video/|player\.vimeo\.com/video/)([0-9]+)").unwrap()
});

/// A supported video host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    YouTube,
    Vimeo,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::YouTube => "youtube",
            Provider::Vimeo => "vimeo",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a provider's URLs are recognized and how its derived URLs are built.
pub struct ProviderConfig {
    pub provider: Provider,
    /// Capture group 1 holds the video ID.
    pub embed_pattern: &'static LazyLock<Regex>,
    pub thumbnail_url: fn(&str) -> String,
    pub embed_url: fn(&str) -> String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("embed_pattern", &self.embed_pattern.as_str())
            .finish_non_exhaustive()
    }
}

static YOUTUBE: ProviderConfig = ProviderConfig {
    provider: Provider::YouTube,
    embed_pattern: &RE_YOUTUBE,
    thumbnail_url: youtube_thumbnail_url,
    embed_url: youtube_embed_url,
};

static VIMEO: ProviderConfig = ProviderConfig {
    provider: Provider::Vimeo,
    embed_pattern: &RE_VIMEO,
    thumbnail_url: vimeo_thumbnail_url,
    embed_url: vimeo_embed_url,
};

/// Provider table keyed by name, in match order.
pub static PROVIDERS: phf::OrderedMap<&'static str, &'static ProviderConfig> = phf_ordered_map! {
    "youtube" => &YOUTUBE,
    "vimeo" => &VIMEO,
};

fn youtube_thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/sddefault.jpg")
}

fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}?autoplay=1&rel=0")
}

fn vimeo_thumbnail_url(id: &str) -> String {
    format!("https://vumbnail.com/{id}.jpg")
}

fn vimeo_embed_url(id: &str) -> String {
    format!("https://player.vimeo.com/video/{id}?autoplay=1")
}

/// A video recognized in a container's URL.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub provider: Provider,
    /// Captured as-is from the URL, never normalized.
    pub id: String,
    pub config: &'static ProviderConfig,
}

impl VideoInfo {
    pub fn thumbnail_url(&self) -> String {
        (self.config.thumbnail_url)(&self.id)
    }

    pub fn embed_url(&self) -> String {
        (self.config.embed_url)(&self.id)
    }
}

/// Match `url` against each provider in table order.
///
/// Returns the first provider whose pattern matches, with the captured ID.
/// No trimming or validation is applied to either the input or the capture.
pub fn parse_video_url(url: &str) -> Option<VideoInfo> {
    PROVIDERS.values().copied().find_map(|config| {
        let caps = config.embed_pattern.captures(url)?;
        let id = caps.get(1)?.as_str().to_string();
        Some(VideoInfo {
            provider: config.provider,
            id,
            config,
        })
    })
}
