//! Smooth scrolling: native `behavior: "smooth"` where the browser supports
//! it, otherwise an animation-frame loop driven by
//! [`ScrollAnimation`](folio_core::scroll::ScrollAnimation).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::scroll::ScrollAnimation;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct SmoothScroller {
    window: Window,
    native: bool,
    duration_ms: f64,
    /// Bumped per animation; a running loop stops once it is outdated
    token: Rc<Cell<u64>>,
}

impl SmoothScroller {
    pub fn new(window: Window, duration_ms: f64) -> Self {
        let native = supports_native_smooth_scroll(&window);
        SmoothScroller {
            window,
            native,
            duration_ms,
            token: Rc::new(Cell::new(0)),
        }
    }

    pub fn is_native(&self) -> bool {
        self.native
    }

    /// Scroll the window to `y`, replacing any animation in flight.
    pub fn scroll_to(&self, y: f64) -> Result<(), JsValue> {
        let token = self.token.get() + 1;
        self.token.set(token);

        if self.native {
            let options = ScrollToOptions::new();
            options.set_top(y);
            options.set_behavior(ScrollBehavior::Smooth);
            self.window.scroll_to_with_scroll_to_options(&options);
            return Ok(());
        }

        let from = self.window.scroll_y()?;
        let mut animation = ScrollAnimation::new(from, y, self.duration_ms);
        let window = self.window.clone();
        let current = Rc::clone(&self.token);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let next = Rc::clone(&callback);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if current.get() != token {
                // Superseded; drop our handle so the closure is freed
                let _ = next.borrow_mut().take();
                return;
            }
            let frame = animation.frame(timestamp);
            window.scroll_to_with_x_and_y(0.0, frame.y);
            if frame.done {
                let _ = next.borrow_mut().take();
            } else if let Some(cb) = next.borrow().as_ref() {
                let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = callback.borrow().as_ref() {
            self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

/// `"scrollBehavior" in document.documentElement.style`
fn supports_native_smooth_scroll(window: &Window) -> bool {
    window
        .document()
        .and_then(|doc| doc.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .and_then(|el| js_sys::Reflect::has(&el.style(), &JsValue::from_str("scrollBehavior")).ok())
        .unwrap_or(false)
}
