//! In-memory DOM used by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::channel::oneshot;
use futures::FutureExt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::container::{Container, Document, ThumbnailFuture};
use crate::error::{LoaderError, ThumbnailError};
use crate::markup::{EmbedFrame, PlayButton, Thumbnail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    PlayButton(PlayButton),
    Image(Thumbnail),
    Frame(EmbedFrame),
}

#[derive(Default)]
struct State {
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    children: Vec<Node>,
    handlers: Vec<Box<dyn FnMut()>>,
    pending: Vec<oneshot::Sender<bool>>,
    requested: Vec<String>,
    reject_listeners: bool,
}

#[derive(Clone, Default)]
pub struct FakeContainer(Rc<RefCell<State>>);

impl FakeContainer {
    pub fn new() -> Self {
        Self::default().with_class("video-lazy-container")
    }

    pub fn with_url(url: &str) -> Self {
        Self::new().with_attribute("data-video-url", url)
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.0.borrow_mut().classes.push(class.to_string());
        self
    }

    /// Make `on_click` fail like a detached or sandboxed element would.
    pub fn rejecting_listeners(self) -> Self {
        self.0.borrow_mut().reject_listeners = true;
        self
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn handler_count(&self) -> usize {
        self.0.borrow().handlers.len()
    }

    /// Thumbnail URLs requested so far.
    pub fn requested(&self) -> Vec<String> {
        self.0.borrow().requested.clone()
    }

    pub fn play_button_count(&self) -> usize {
        self.children()
            .iter()
            .filter(|n| matches!(n, Node::PlayButton(_)))
            .count()
    }

    /// Settle every in-flight thumbnail request.
    pub fn finish_thumbnails(&self, success: bool) {
        let pending = std::mem::take(&mut self.0.borrow_mut().pending);
        for tx in pending {
            let _ = tx.send(success);
        }
    }

    pub fn click(&self) {
        let mut handlers = std::mem::take(&mut self.0.borrow_mut().handlers);
        for handler in handlers.iter_mut() {
            handler();
        }
        let mut state = self.0.borrow_mut();
        handlers.append(&mut state.handlers);
        state.handlers = handlers;
    }
}

impl Container for FakeContainer {
    type Image = Thumbnail;

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) -> Result<(), LoaderError> {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
        Ok(())
    }

    fn append_play_button(&self, button: &PlayButton) -> Result<(), LoaderError> {
        self.0
            .borrow_mut()
            .children
            .push(Node::PlayButton(button.clone()));
        Ok(())
    }

    fn load_thumbnail(&self, thumbnail: &Thumbnail) -> ThumbnailFuture<Thumbnail> {
        let (tx, rx) = oneshot::channel();
        let mut state = self.0.borrow_mut();
        state.requested.push(thumbnail.src.clone());
        state.pending.push(tx);

        let thumbnail = thumbnail.clone();
        rx.map(move |outcome| match outcome {
            Ok(true) => Ok(thumbnail),
            _ => Err(ThumbnailError {
                url: thumbnail.src,
            }),
        })
        .boxed_local()
    }

    fn append_image(&self, image: Thumbnail) -> Result<(), LoaderError> {
        self.0.borrow_mut().children.push(Node::Image(image));
        Ok(())
    }

    fn replace_with_embed(&self, frame: &EmbedFrame) -> Result<(), LoaderError> {
        let mut state = self.0.borrow_mut();
        state.children.clear();
        state.children.push(Node::Frame(frame.clone()));
        Ok(())
    }

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Result<(), LoaderError> {
        let mut state = self.0.borrow_mut();
        if state.reject_listeners {
            return Err(LoaderError::Dom("addEventListener rejected".into()));
        }
        state.handlers.push(handler);
        Ok(())
    }
}

/// Supports `.class` and `[attribute]` selectors only.
#[derive(Clone, Default)]
pub struct FakeDocument {
    pub containers: Vec<FakeContainer>,
}

impl Document for FakeDocument {
    type Container = FakeContainer;

    fn query_containers(&self, selector: &str) -> Result<Vec<FakeContainer>, LoaderError> {
        let is_match: Box<dyn Fn(&FakeContainer) -> bool> =
            if let Some(class) = selector.strip_prefix('.') {
                let class = class.to_string();
                Box::new(move |c| c.has_class(&class))
            } else if let Some(attr) = selector
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
            {
                let attr = attr.to_string();
                Box::new(move |c| c.attribute(&attr).is_some())
            } else {
                return Err(LoaderError::Dom(format!("unsupported selector: {selector}")));
            };

        Ok(self.containers.iter().filter(|&c| is_match(c)).cloned().collect())
    }
}

/// Counts `WARN` events seen while installed as the default subscriber.
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
