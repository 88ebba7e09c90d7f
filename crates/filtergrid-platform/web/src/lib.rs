//! Browser DOM host for filtergrid.
//!
//! [`WebHost`] implements [`NodeHost`] over `web_sys::HtmlElement`, so a
//! [`FilterContainer`](filtergrid_core::FilterContainer) can run directly against
//! a page.

use filtergrid_core::{LifecycleEvent, NodeError, NodeHost, Size, StyleProperty};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Document, HtmlElement, NodeList};

pub struct WebHost {
    document: Document,
}

impl WebHost {
    /// Host bound to the current window's document.
    pub fn new() -> Result<Self, NodeError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| NodeError::Host("no document available".to_string()))?;
        Ok(Self::with_document(document))
    }

    pub fn with_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn js_error(err: JsValue) -> NodeError {
    NodeError::Host(format!("{:?}", err))
}

/// Collects the HTML elements of `list`, skipping nodes of other kinds (SVG, text).
fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| match node.dyn_into::<HtmlElement>() {
            Ok(element) => Some(element),
            Err(other) => {
                log::warn!("skipping non-HTML node {:?}", other.node_name());
                None
            }
        })
        .collect()
}

impl NodeHost for WebHost {
    type Node = HtmlElement;

    fn resolve(&self, locator: &str) -> Result<Vec<HtmlElement>, NodeError> {
        let list = self.document.query_selector_all(locator).map_err(js_error)?;
        Ok(html_elements(list))
    }

    fn inner_width(&self, node: &HtmlElement) -> f32 {
        node.client_width() as f32
    }

    fn measure(&self, node: &HtmlElement) -> Size {
        Size::new(node.offset_width() as f32, node.offset_height() as f32)
    }

    fn set_style(&self, node: &HtmlElement, properties: &[StyleProperty]) -> Result<(), NodeError> {
        let style = node.style();
        for property in properties {
            style
                .set_property(property.name(), &property.css_value())
                .map_err(js_error)?;
        }
        Ok(())
    }

    fn clear_style(&self, node: &HtmlElement) -> Result<(), NodeError> {
        node.remove_attribute("style").map_err(js_error)
    }

    fn append_child(&self, container: &HtmlElement, child: &HtmlElement) -> Result<(), NodeError> {
        container.append_child(child).map_err(js_error)?;
        Ok(())
    }

    fn find_descendants(
        &self,
        container: &HtmlElement,
        selector: &str,
    ) -> Result<Vec<HtmlElement>, NodeError> {
        let list = container.query_selector_all(selector).map_err(js_error)?;
        Ok(html_elements(list))
    }

    fn emit(&self, node: &HtmlElement, event: LifecycleEvent) -> Result<(), NodeError> {
        let custom = CustomEvent::new(event.name()).map_err(js_error)?;
        node.dispatch_event(&custom).map_err(js_error)?;
        Ok(())
    }
}
