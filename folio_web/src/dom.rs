//! DOM cache: fixed page elements resolved once at startup.
//!
//! Every element except `window`/`document` is optional. A missing element
//! only disables the feature that needs it.

use folio_core::errors::{FolioError, FolioResult};
use folio_core::scroll::SectionBounds;
use folio_core::validation::Field;
use folio_core::Target;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, Window};

pub const NAVBAR_ID: &str = "navbar";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const HAMBURGER_ID: &str = "hamburger";
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const MODAL_ID: &str = "case-study-modal";
pub const MODAL_OVERLAY_ID: &str = "modal-overlay";
pub const MODAL_CLOSE_ID: &str = "modal-close";
pub const MODAL_CONTENT_ID: &str = "case-study-content";

pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const PROJECT_CARD_SELECTOR: &str = ".project-card";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const HERO_IMAGE_SELECTOR: &str = ".profile-image";
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const SUBMIT_SELECTOR: &str = "[type=\"submit\"]";

/// Attribute on project cards naming their case study
pub const PROJECT_ID_ATTR: &str = "data-project";

/// Convert a JS exception into a core error.
pub fn js_error(context: &str, err: JsValue) -> FolioError {
    let detail = err
        .as_string()
        .or_else(|| err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{err:?}"));
    FolioError::internal(format!("{context}: {detail}"))
}

pub struct DomCache {
    pub window: Window,
    pub document: Document,
    pub body: Option<HtmlElement>,
    pub navbar: Option<HtmlElement>,
    pub nav_menu: Option<HtmlElement>,
    pub hamburger: Option<HtmlElement>,
    pub contact_form: Option<HtmlFormElement>,
    pub submit_button: Option<HtmlElement>,
    pub modal: Option<HtmlElement>,
    pub modal_overlay: Option<HtmlElement>,
    pub modal_close: Option<HtmlElement>,
    pub modal_content: Option<HtmlElement>,
    pub hero_image: Option<HtmlElement>,
}

impl DomCache {
    pub fn resolve() -> FolioResult<Self> {
        let window = web_sys::window().ok_or_else(|| FolioError::missing_element("window"))?;
        let document = window
            .document()
            .ok_or_else(|| FolioError::missing_element("document"))?;

        let contact_form: Option<HtmlFormElement> = by_id(&document, CONTACT_FORM_ID);
        let submit_button = contact_form
            .as_ref()
            .and_then(|form| form.query_selector(SUBMIT_SELECTOR).ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let hero_image = document
            .query_selector(HERO_IMAGE_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        Ok(DomCache {
            body: document.body(),
            navbar: by_id(&document, NAVBAR_ID),
            nav_menu: by_id(&document, NAV_MENU_ID),
            hamburger: by_id(&document, HAMBURGER_ID),
            modal: by_id(&document, MODAL_ID),
            modal_overlay: by_id(&document, MODAL_OVERLAY_ID),
            modal_close: by_id(&document, MODAL_CLOSE_ID),
            modal_content: by_id(&document, MODAL_CONTENT_ID),
            contact_form,
            submit_button,
            hero_image,
            window,
            document,
        })
    }

    /// Element an effect addresses, if the page has it.
    pub fn element(&self, target: &Target) -> Option<&HtmlElement> {
        match target {
            Target::Navbar => self.navbar.as_ref(),
            Target::NavMenu => self.nav_menu.as_ref(),
            Target::Hamburger => self.hamburger.as_ref(),
            Target::Modal => self.modal.as_ref(),
            Target::ModalContent => self.modal_content.as_ref(),
            Target::ModalClose => self.modal_close.as_ref(),
            Target::ContactForm => self.contact_form.as_deref(),
            Target::HeroImage => self.hero_image.as_ref(),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        query_node_list(self.document.query_selector_all(selector))
    }

    /// The contact form control for `field`.
    pub fn field(&self, field: Field) -> Option<HtmlElement> {
        let form = self.contact_form.as_ref()?;
        let selector = format!("[name=\"{}\"]", field.control_name());
        form.query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    /// Current value of a form control (input or textarea).
    pub fn field_value(&self, field: Field) -> String {
        self.field(field)
            .map(|el| control_value(&el))
            .unwrap_or_default()
    }

    /// Document-relative bounds of every `section[id]`. Forces layout.
    pub fn section_bounds(&self) -> Vec<SectionBounds> {
        self.query_all(SECTION_SELECTOR)
            .iter()
            .map(|section| {
                SectionBounds::new(
                    section.id(),
                    self.document_top(section),
                    section.get_bounding_client_rect().height(),
                )
            })
            .collect()
    }

    /// Vertical scroll offset of the window.
    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    /// Document-relative top of an element.
    pub fn document_top(&self, element: &Element) -> f64 {
        element.get_bounding_client_rect().top() + self.scroll_y()
    }

    pub fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

/// Look up an element by id and cast it, logging when the page lacks it.
fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let found = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok());
    if found.is_none() {
        debug!(id, "page element not found, feature disabled");
    }
    found
}

/// All elements under `root` matching `selector`.
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    query_node_list(root.query_selector_all(selector))
}

fn query_node_list(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Value of an input or textarea; empty for anything else.
pub fn control_value(element: &HtmlElement) -> String {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}
