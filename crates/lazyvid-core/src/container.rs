use futures::future::LocalBoxFuture;

use crate::error::{LoaderError, ThumbnailError};
use crate::markup::{EmbedFrame, PlayButton, Thumbnail};

/// Single-shot thumbnail load. Resolves to the loaded image or a failure.
pub type ThumbnailFuture<I> = LocalBoxFuture<'static, Result<I, ThumbnailError>>;

/// A page element designated to hold a lazy-loaded video.
///
/// Handles are cheap clones referring to the same underlying element, so one
/// can be moved into the click handler and the thumbnail task.
pub trait Container: Clone + 'static {
    /// A loaded, not yet attached thumbnail image.
    type Image: 'static;

    fn attribute(&self, name: &str) -> Option<String>;

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str) -> Result<(), LoaderError>;

    fn append_play_button(&self, button: &PlayButton) -> Result<(), LoaderError>;

    /// Start fetching the thumbnail. The request is issued immediately; the
    /// returned future only reports the outcome.
    fn load_thumbnail(&self, thumbnail: &Thumbnail) -> ThumbnailFuture<Self::Image>;

    fn append_image(&self, image: Self::Image) -> Result<(), LoaderError>;

    /// Remove every child and insert `frame` as the only one.
    fn replace_with_embed(&self, frame: &EmbedFrame) -> Result<(), LoaderError>;

    /// Register a click listener for the lifetime of the element.
    fn on_click(&self, handler: Box<dyn FnMut()>) -> Result<(), LoaderError>;
}

/// The page being scanned for containers.
pub trait Document {
    type Container: Container;

    /// All elements matching `selector`, in document order.
    fn query_containers(&self, selector: &str) -> Result<Vec<Self::Container>, LoaderError>;
}
