//! Event wiring: each browser listener reduces its event to a [`Message`]
//! and dispatches it.

use std::rc::Rc;

use folio_core::errors::FolioResult;
use folio_core::scroll::anchor_fragment;
use folio_core::validation::{ContactFormData, Field};
use folio_core::views::FORM_ERRORS_CLOSE_CLASS;
use folio_core::Message;
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use crate::dom::{
    control_value, js_error, ANCHOR_SELECTOR, PROJECT_CARD_SELECTOR, PROJECT_ID_ATTR,
};
use crate::host::{dispatch, Runtime};

/// Attach a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> FolioResult<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| js_error(event, e))?;
    closure.forget();
    Ok(())
}

/// Attach a capture-phase listener, for events that do not bubble.
pub fn listen_capture<F>(target: &EventTarget, event: &str, handler: F) -> FolioResult<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback_and_bool(event, closure.as_ref().unchecked_ref(), true)
        .map_err(|e| js_error(event, e))?;
    closure.forget();
    Ok(())
}

/// Wire every page listener, then sync with the initial scroll position.
pub fn wire(runtime: &Rc<Runtime>) -> FolioResult<()> {
    wire_navigation(runtime)?;
    wire_form(runtime)?;
    wire_modal(runtime)?;

    dispatch(runtime, scrolled(runtime));
    Ok(())
}

fn wire_navigation(runtime: &Rc<Runtime>) -> FolioResult<()> {
    let dom = &runtime.dom;

    if let Some(hamburger) = &dom.hamburger {
        let rt = Rc::clone(runtime);
        listen(hamburger, "click", move |_| dispatch(&rt, Message::MenuToggled))?;
    }

    let rt = Rc::clone(runtime);
    listen(&dom.window, "scroll", move |_| {
        let message = scrolled(&rt);
        dispatch(&rt, message);
    })?;

    let rt = Rc::clone(runtime);
    listen(&dom.window, "resize", move |_| {
        let width = rt
            .dom
            .window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or_default();
        dispatch(&rt, Message::Resized { width });
    })?;

    let anchors = dom.query_all(ANCHOR_SELECTOR);
    debug!(count = anchors.len(), "wiring in-page links");
    for anchor in anchors {
        let rt = Rc::clone(runtime);
        let link = anchor.clone();
        listen(&anchor, "click", move |event| {
            event.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let target_top = anchor_fragment(&href)
                .and_then(|id| rt.dom.document.get_element_by_id(id))
                .map(|el| rt.dom.document_top(&el));
            dispatch(&rt, Message::AnchorClicked { href, target_top });
        })?;
    }
    Ok(())
}

fn wire_form(runtime: &Rc<Runtime>) -> FolioResult<()> {
    let Some(form) = &runtime.dom.contact_form else {
        return Ok(());
    };

    let rt = Rc::clone(runtime);
    listen(form, "submit", move |event| {
        event.prevent_default();
        let data = ContactFormData::new(
            rt.dom.field_value(Field::Name),
            rt.dom.field_value(Field::Email),
            rt.dom.field_value(Field::Message),
        );
        dispatch(&rt, Message::FormSubmitted(data));
    })?;

    for field in Field::ALL {
        let Some(control) = runtime.dom.field(field) else {
            debug!(field = field.control_name(), "form control not found");
            continue;
        };
        let rt = Rc::clone(runtime);
        let input = control.clone();
        listen(&control, "blur", move |_| {
            let value = control_value(&input);
            dispatch(&rt, Message::FieldBlurred { field, value });
        })?;
    }

    // The error block is rebuilt on every submit, so its close control is
    // handled by delegation on the form.
    let rt = Rc::clone(runtime);
    let selector = format!(".{FORM_ERRORS_CLOSE_CLASS}");
    listen(form, "click", move |event| {
        let hit = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&selector).ok().flatten())
            .is_some();
        if hit {
            dispatch(&rt, Message::FormErrorsDismissed);
        }
    })?;
    Ok(())
}

fn wire_modal(runtime: &Rc<Runtime>) -> FolioResult<()> {
    let dom = &runtime.dom;

    for card in dom.query_all(PROJECT_CARD_SELECTOR) {
        let Some(project_id) = card.get_attribute(PROJECT_ID_ATTR) else {
            continue;
        };
        let rt = Rc::clone(runtime);
        listen(&card, "click", move |_| {
            dispatch(
                &rt,
                Message::ProjectCardClicked {
                    project_id: project_id.clone(),
                },
            );
        })?;
    }

    if let Some(close) = &dom.modal_close {
        let rt = Rc::clone(runtime);
        listen(close, "click", move |_| dispatch(&rt, Message::ModalCloseClicked))?;
    }

    if let Some(overlay) = &dom.modal_overlay {
        let rt = Rc::clone(runtime);
        listen(overlay, "click", move |event| {
            // Clicks inside the dialog body bubble up; only the backdrop closes
            if event.target() == event.current_target() {
                dispatch(&rt, Message::OverlayClicked);
            }
        })?;
    }

    let rt = Rc::clone(runtime);
    listen(&dom.document, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            dispatch(&rt, Message::KeyPressed { key });
        }
    })?;
    Ok(())
}

/// Current scroll position. Section geometry is measured separately, only
/// when the portfolio asks for it.
fn scrolled(runtime: &Runtime) -> Message {
    Message::Scrolled {
        now_ms: runtime.dom.now_ms(),
        scroll_y: runtime.dom.scroll_y(),
    }
}
