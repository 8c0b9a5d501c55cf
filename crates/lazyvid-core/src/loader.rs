use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};
use tracing::{debug, warn};

use crate::config::LoaderConfig;
use crate::container::{Container, Document};
use crate::error::LoaderError;
use crate::markup::{EmbedFrame, PlayButton, Thumbnail};
use crate::provider::{parse_video_url, VideoInfo};

/// Outcome of a document scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Containers that received a placeholder and click handler.
    pub initialized: usize,
    /// Why each remaining container was left inert.
    pub skipped: Vec<LoaderError>,
}

/// Turns annotated containers into click-to-load video placeholders.
///
/// Thumbnail loads are spawned on `spawner`; everything else runs
/// synchronously on the caller's thread.
pub struct LazyVideoLoader<S> {
    config: Rc<LoaderConfig>,
    spawner: S,
}

impl<S: LocalSpawn> LazyVideoLoader<S> {
    pub fn new(config: LoaderConfig, spawner: S) -> Self {
        Self {
            config: Rc::new(config),
            spawner,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Set up every container in `document`.
    ///
    /// A container that cannot be set up is skipped and does not affect the
    /// others. Only a failing query aborts the scan.
    pub fn initialize<D: Document>(&self, document: &D) -> Result<ScanReport, LoaderError> {
        let containers = document.query_containers(&self.config.markup.container_selector)?;
        let mut report = ScanReport::default();

        for container in &containers {
            match self.setup_container(container) {
                Ok(_) => report.initialized += 1,
                Err(e) => report.skipped.push(e),
            }
        }

        debug!(
            found = containers.len(),
            initialized = report.initialized,
            skipped = report.skipped.len(),
            "lazy video scan complete"
        );
        Ok(report)
    }

    /// Set up a single container: play button, thumbnail load, click handler.
    ///
    /// Every error is logged as a warning. A missing or unsupported URL leaves
    /// the container untouched; a DOM failure may leave a partial placeholder
    /// without a click handler.
    pub fn setup_container<C: Container>(&self, container: &C) -> Result<VideoInfo, LoaderError> {
        self.try_setup(container).inspect_err(|e| warn!("skipping video container: {e}"))
    }

    fn try_setup<C: Container>(&self, container: &C) -> Result<VideoInfo, LoaderError> {
        let attribute = &self.config.markup.url_attribute;
        let url = container
            .attribute(attribute)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| LoaderError::MissingUrl {
                attribute: attribute.clone(),
            })?;

        let video = parse_video_url(&url).ok_or(LoaderError::UnsupportedUrl(url))?;

        container.append_play_button(&PlayButton::new(&self.config))?;
        self.spawn_thumbnail(container, &video);

        let target = container.clone();
        let clicked = video.clone();
        let config = Rc::clone(&self.config);
        container.on_click(Box::new(move || {
            if let Err(e) = load_video(&clicked, &target, &config) {
                warn!("failed to load {} video {}: {e}", clicked.provider, clicked.id);
            }
        }))?;

        debug!(provider = %video.provider, id = %video.id, "video placeholder ready");
        Ok(video)
    }

    fn spawn_thumbnail<C: Container>(&self, container: &C, video: &VideoInfo) {
        let thumbnail = Thumbnail::new(video, &self.config);
        let load = container.load_thumbnail(&thumbnail);
        let target = container.clone();
        let config = Rc::clone(&self.config);

        let task = async move {
            let outcome = load.await;
            // A click may have swapped in the player while the image was in flight.
            if target.has_class(&config.classes.playing) {
                return;
            }
            match outcome {
                Ok(image) => {
                    if let Err(e) = target.append_image(image) {
                        warn!("failed to attach thumbnail {}: {e}", thumbnail.src);
                    }
                }
                Err(e) => debug!("{e}; showing play button only"),
            }
            mark_loaded(&target, &config);
        };

        if let Err(e) = self.spawner.spawn_local(task) {
            warn!("could not schedule thumbnail load: {e}");
            mark_loaded(container, &self.config);
        }
    }
}

fn mark_loaded<C: Container>(container: &C, config: &LoaderConfig) {
    if let Err(e) = container.add_class(&config.classes.loaded) {
        warn!("failed to mark video container loaded: {e}");
    }
}

/// Replace the container's content with the provider's player.
///
/// Running this again rebuilds the same frame from the same `video`.
pub fn load_video<C: Container>(
    video: &VideoInfo,
    container: &C,
    config: &LoaderConfig,
) -> Result<(), LoaderError> {
    let frame = EmbedFrame::new(video);
    container.replace_with_embed(&frame)?;
    container.add_class(&config.classes.playing)?;
    debug!(provider = %video.provider, id = %video.id, src = %frame.src, "video embed loaded");
    Ok(())
}
