//! Build live DOM nodes from `folio_core` markup trees.
//!
//! Text is inserted with `createTextNode` and attributes with
//! `setAttribute`; nothing goes through `innerHTML`.

use folio_core::markup::Node;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// Create the DOM subtree for `node`.
pub fn build(document: &Document, node: &Node) -> Result<web_sys::Node, JsValue> {
    match node {
        Node::Text(text) => Ok(document.create_text_node(text).into()),
        Node::Element(element) => {
            let el = document.create_element(element.tag)?;
            for (name, value) in &element.attrs {
                el.set_attribute(name, value)?;
            }
            for child in &element.children {
                el.append_child(&build(document, child)?)?;
            }
            Ok(el.into())
        }
    }
}

/// Create an element subtree; fails if `node` is bare text.
pub fn build_element(document: &Document, node: &Node) -> Result<Element, JsValue> {
    build(document, node)?
        .dyn_into::<Element>()
        .map_err(|_| JsValue::from_str("expected an element node"))
}

/// Replace all children of `parent` with `content` (or nothing).
pub fn replace_children(document: &Document, parent: &Element, content: Option<&Node>) -> Result<(), JsValue> {
    parent.set_text_content(None);
    if let Some(node) = content {
        parent.append_child(&build(document, node)?)?;
    }
    Ok(())
}
