//! `Container` and `Document` over the real browser DOM.

use futures::future::{self, FutureExt};
use js_sys::Promise;
use lazyvid_core::{
    Container, EmbedFrame, LoaderError, PlayButton, Thumbnail, ThumbnailError, ThumbnailFuture,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlIFrameElement, HtmlImageElement};

/// Map a thrown JS value (usually a `DOMException`) into a loader error.
pub(crate) fn js_error(err: JsValue) -> LoaderError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    LoaderError::Dom(message)
}

#[derive(Debug, Clone)]
pub struct BrowserContainer {
    element: Element,
}

impl BrowserContainer {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    fn document(&self) -> Result<web_sys::Document, LoaderError> {
        self.element
            .owner_document()
            .ok_or_else(|| LoaderError::Dom("container is not attached to a document".into()))
    }
}

impl Container for BrowserContainer {
    type Image = HtmlImageElement;

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn add_class(&self, class: &str) -> Result<(), LoaderError> {
        self.element.class_list().add_1(class).map_err(js_error)
    }

    fn append_play_button(&self, button: &PlayButton) -> Result<(), LoaderError> {
        let document = self.document()?;

        let outer = document.create_element("div").map_err(js_error)?;
        outer.set_class_name(&button.class);
        outer
            .set_attribute("aria-label", &button.aria_label)
            .map_err(js_error)?;

        let icon = document.create_element("div").map_err(js_error)?;
        icon.set_class_name(&button.icon_class);
        outer.append_child(&icon).map_err(js_error)?;

        self.element.append_child(&outer).map_err(js_error)?;
        Ok(())
    }

    fn load_thumbnail(&self, thumbnail: &Thumbnail) -> ThumbnailFuture<HtmlImageElement> {
        let url = thumbnail.src.clone();
        let Ok(image) = HtmlImageElement::new() else {
            return future::ready(Err(ThumbnailError { url })).boxed_local();
        };

        let settled = Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(&url);
        image.set_alt(&thumbnail.alt);

        async move {
            let outcome = JsFuture::from(settled).await;
            image.set_onload(None);
            image.set_onerror(None);
            match outcome {
                Ok(_) => Ok(image),
                Err(_) => Err(ThumbnailError { url }),
            }
        }
        .boxed_local()
    }

    fn append_image(&self, image: HtmlImageElement) -> Result<(), LoaderError> {
        self.element.append_child(&image).map_err(js_error)?;
        Ok(())
    }

    fn replace_with_embed(&self, frame: &EmbedFrame) -> Result<(), LoaderError> {
        let iframe: HtmlIFrameElement = self
            .document()?
            .create_element("iframe")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| LoaderError::Dom("created iframe has unexpected type".into()))?;

        iframe.set_src(&frame.src);
        iframe.set_frame_border(frame.frame_border);
        iframe.set_allow_fullscreen(frame.allow_fullscreen);
        iframe.set_attribute("allow", frame.allow).map_err(js_error)?;

        self.element.set_inner_html("");
        self.element.append_child(&iframe).map_err(js_error)?;
        Ok(())
    }

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Result<(), LoaderError> {
        let listener = Closure::<dyn FnMut()>::wrap(handler);
        self.element
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(js_error)?;
        // Lives as long as the page.
        listener.forget();
        Ok(())
    }
}

pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window.
    pub fn current() -> Result<Self, LoaderError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| LoaderError::Dom("no document available".into()))
    }
}

impl lazyvid_core::Document for BrowserDocument {
    type Container = BrowserContainer;

    fn query_containers(&self, selector: &str) -> Result<Vec<BrowserContainer>, LoaderError> {
        let nodes = self.document.query_selector_all(selector).map_err(js_error)?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(BrowserContainer::new)
            .collect())
    }
}
