//! Runtime: owns the [`Portfolio`], dispatches messages to it and applies
//! the effects it returns to the live page.
//!
//! The portfolio borrow is released before any effect runs, so effects that
//! synchronously trigger new events (focus moving, form reset) can dispatch
//! again without a double borrow.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use folio_core::errors::FolioResult;
use folio_core::validation::Field;
use folio_core::views::{
    ACTIVE_CLASS, FIELD_ERROR_BORDER, FIELD_ERROR_CLASS, FORM_ERRORS_CLASS, FORM_SUCCESS_CLASS,
    SUBMIT_BUSY_LABEL,
};
use folio_core::{Effect, Message, Portfolio, Target, TimerId};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom::{js_error, query_all_in, DomCache, NAV_LINK_SELECTOR};
use crate::render;
use crate::smooth_scroll::SmoothScroller;

pub struct Runtime {
    pub dom: DomCache,
    app: RefCell<Portfolio>,
    timers: RefCell<HashMap<TimerId, i32>>,
    scroller: SmoothScroller,
    submit_label: Option<String>,
}

impl Runtime {
    pub fn new(app: Portfolio, dom: DomCache) -> Rc<Self> {
        let scroller = SmoothScroller::new(dom.window.clone(), app.settings().smooth_scroll_duration_ms);
        debug!(native = scroller.is_native(), "smooth scrolling ready");
        let submit_label = dom.submit_button.as_ref().and_then(|b| b.text_content());
        Rc::new(Runtime {
            dom,
            app: RefCell::new(app),
            timers: RefCell::new(HashMap::new()),
            scroller,
            submit_label,
        })
    }

    /// Read-only access to the portfolio (settings, state).
    pub fn with_app<R>(&self, f: impl FnOnce(&Portfolio) -> R) -> R {
        f(&self.app.borrow())
    }
}

/// Run one message through the portfolio and apply the resulting effects.
pub fn dispatch(runtime: &Rc<Runtime>, message: Message) {
    let effects = runtime.app.borrow_mut().update(message);
    for effect in effects {
        if let Err(err) = apply(runtime, effect) {
            warn!(%err, "could not apply page effect");
        }
    }
}

fn apply(runtime: &Rc<Runtime>, effect: Effect) -> FolioResult<()> {
    let dom = &runtime.dom;
    match effect {
        Effect::SetClass {
            target,
            class,
            enabled,
        } => {
            if let Some(el) = element_or_skip(dom, &target) {
                el.class_list()
                    .toggle_with_force(class, enabled)
                    .map_err(|e| js_error("toggle class", e))?;
            }
        }
        Effect::SetActiveLink(section) => {
            let wanted = section.map(|id| format!("#{id}"));
            for link in dom.query_all(NAV_LINK_SELECTOR) {
                let active = wanted.is_some() && link.get_attribute("href") == wanted;
                link.class_list()
                    .toggle_with_force(ACTIVE_CLASS, active)
                    .map_err(|e| js_error("toggle nav link", e))?;
            }
        }
        Effect::LockScroll(locked) => {
            if let Some(body) = &dom.body {
                body.style()
                    .set_property("overflow", if locked { "hidden" } else { "" })
                    .map_err(|e| js_error("lock scroll", e))?;
            }
        }
        Effect::SetContent { target, content } => {
            if let Some(el) = element_or_skip(dom, &target) {
                render::replace_children(&dom.document, el, content.as_ref())
                    .map_err(|e| js_error("render content", e))?;
            }
        }
        Effect::Focus(target) => {
            if let Some(el) = element_or_skip(dom, &target) {
                el.focus().map_err(|e| js_error("focus", e))?;
            }
        }
        Effect::ScrollTo { y } => {
            runtime
                .scroller
                .scroll_to(y)
                .map_err(|e| js_error("scroll", e))?;
        }
        Effect::MeasureSections => {
            let message = Message::SectionsMeasured {
                scroll_y: dom.scroll_y(),
                sections: dom.section_bounds(),
            };
            dispatch(runtime, message);
        }
        Effect::TranslateY { target, px } => {
            if let Some(el) = dom.element(&target) {
                el.style()
                    .set_property("transform", &format!("translateY({px}px)"))
                    .map_err(|e| js_error("translate", e))?;
            }
        }
        Effect::ShowFormErrors(block) => {
            if let Some(form) = &dom.contact_form {
                remove_all(form, FORM_ERRORS_CLASS);
                let el = render::build_element(&dom.document, &block)
                    .map_err(|e| js_error("render errors", e))?;
                form.prepend_with_node_1(&el)
                    .map_err(|e| js_error("insert errors", e))?;
            }
        }
        Effect::ClearFormErrors => {
            if let Some(form) = &dom.contact_form {
                remove_all(form, FORM_ERRORS_CLASS);
            }
        }
        Effect::ShowFieldError { field, content } => {
            if let Some(control) = dom.field(field) {
                remove_field_error(&control);
                let el = render::build_element(&dom.document, &content)
                    .map_err(|e| js_error("render field error", e))?;
                control
                    .after_with_node_1(&el)
                    .map_err(|e| js_error("insert field error", e))?;
                control
                    .style()
                    .set_property("border-color", FIELD_ERROR_BORDER)
                    .map_err(|e| js_error("mark field", e))?;
            }
        }
        Effect::ClearFieldError(field) => clear_field_error(dom, field)?,
        Effect::ShowSuccess(banner) => {
            if let Some(form) = &dom.contact_form {
                remove_all(form, FORM_SUCCESS_CLASS);
                let el = render::build_element(&dom.document, &banner)
                    .map_err(|e| js_error("render banner", e))?;
                form.prepend_with_node_1(&el)
                    .map_err(|e| js_error("insert banner", e))?;
            }
        }
        Effect::HideSuccess => {
            if let Some(form) = &dom.contact_form {
                remove_all(form, FORM_SUCCESS_CLASS);
            }
        }
        Effect::SetSubmitBusy(busy) => {
            if let Some(button) = &dom.submit_button {
                if busy {
                    button
                        .set_attribute("disabled", "")
                        .map_err(|e| js_error("disable submit", e))?;
                    button.set_text_content(Some(SUBMIT_BUSY_LABEL));
                } else {
                    button
                        .remove_attribute("disabled")
                        .map_err(|e| js_error("enable submit", e))?;
                    button.set_text_content(runtime.submit_label.as_deref());
                }
            }
        }
        Effect::ResetForm => {
            if let Some(form) = &dom.contact_form {
                form.reset();
            }
        }
        Effect::Schedule { timer, delay_ms } => schedule(runtime, timer, delay_ms)?,
        Effect::CancelTimer(timer) => {
            if let Some(handle) = runtime.timers.borrow_mut().remove(&timer) {
                dom.window.clear_timeout_with_handle(handle);
            }
        }
    }
    Ok(())
}

fn element_or_skip<'a>(dom: &'a DomCache, target: &Target) -> Option<&'a web_sys::HtmlElement> {
    let el = dom.element(target);
    if el.is_none() {
        debug!(?target, "effect target missing, skipped");
    }
    el
}

fn schedule(runtime: &Rc<Runtime>, timer: TimerId, delay_ms: u32) -> FolioResult<()> {
    let rt = Rc::clone(runtime);
    let callback = Closure::once_into_js(move || {
        rt.timers.borrow_mut().remove(&timer);
        dispatch(&rt, Message::TimerElapsed(timer));
    });
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    let handle = runtime
        .dom
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        .map_err(|e| js_error("set timeout", e))?;
    runtime.timers.borrow_mut().insert(timer, handle);
    Ok(())
}

/// Remove every descendant of `root` carrying `class`.
fn remove_all(root: &Element, class: &str) {
    for el in query_all_in(root, &format!(".{class}")) {
        el.remove();
    }
}

fn remove_field_error(control: &Element) {
    if let Some(next) = control.next_element_sibling() {
        if next.class_list().contains(FIELD_ERROR_CLASS) {
            next.remove();
        }
    }
}

fn clear_field_error(dom: &DomCache, field: Field) -> FolioResult<()> {
    if let Some(control) = dom.field(field) {
        remove_field_error(&control);
        control
            .style()
            .remove_property("border-color")
            .map_err(|e| js_error("restore field", e))?;
    }
    Ok(())
}
