//! Intersection observers for reveal animations and lazy images, plus the
//! broken-image fallback.

use std::rc::Rc;

use folio_core::errors::FolioResult;
use folio_core::reveal::{
    fallback_source, lazy_image_action, reveal_action, LazyImageAction, ObserverOptions,
    RevealAction, FALLBACK_MARKER_ATTR, LAZY_SOURCE_ATTR,
};
use folio_core::views::REVEALED_CLASS;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::dom::{js_error, LAZY_IMAGE_SELECTOR};
use crate::events::listen_capture;
use crate::host::Runtime;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Install every visibility feature. Each one fails on its own: a broken
/// observer only loses its animation, never the other features.
pub fn install(runtime: &Rc<Runtime>) {
    let (selectors, placeholder, options) = runtime.with_app(|app| {
        let settings = app.settings();
        (
            settings.reveal_selectors.join(", "),
            settings.placeholder_image.clone(),
            ObserverOptions::reveal(settings),
        )
    });

    let targets = if selectors.is_empty() {
        Vec::new()
    } else {
        runtime.dom.query_all(&selectors)
    };
    let images = runtime.dom.query_all(LAZY_IMAGE_SELECTOR);

    if observer_supported(&runtime.dom.window) {
        if let Err(err) = observe_reveals(&targets, &options) {
            warn!(%err, "reveal observer failed, revealing everything now");
            reveal_all(&targets);
        }
        if let Err(err) = observe_lazy_images(&images) {
            warn!(%err, "lazy image observer failed, loading images now");
            images.iter().for_each(load_image);
        }
    } else {
        debug!("IntersectionObserver unavailable, revealing everything now");
        reveal_all(&targets);
        images.iter().for_each(load_image);
    }

    if let Err(err) = install_image_fallback(runtime, placeholder) {
        warn!(%err, "broken image fallback unavailable");
    }
}

fn observer_supported(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn new_observer(
    options: &ObserverOptions,
    mut on_entry: impl FnMut(IntersectionObserverEntry, &IntersectionObserver) + 'static,
) -> FolioResult<IntersectionObserver> {
    let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                on_entry(entry, &observer);
            }
        }
    });

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|e| js_error("create observer", e))?;
    callback.forget();
    Ok(observer)
}

fn observe_reveals(targets: &[Element], options: &ObserverOptions) -> FolioResult<()> {
    if targets.is_empty() {
        return Ok(());
    }
    let observer = new_observer(options, |entry, _| {
        if reveal_action(entry.is_intersecting()) == RevealAction::Reveal {
            if let Err(err) = reveal(&entry.target()) {
                warn!(%err, "reveal failed");
            }
        }
    })?;
    for el in targets {
        observer.observe(el);
    }
    debug!(count = targets.len(), "reveal targets observed");
    Ok(())
}

fn observe_lazy_images(images: &[Element]) -> FolioResult<()> {
    if images.is_empty() {
        return Ok(());
    }
    let observer = new_observer(&ObserverOptions::lazy_images(), |entry, observer| {
        let img = entry.target();
        let deferred = img.get_attribute(LAZY_SOURCE_ATTR);
        match lazy_image_action(entry.is_intersecting(), deferred.as_deref()) {
            LazyImageAction::Wait => {}
            LazyImageAction::Load { src } => {
                set_source(&img, &src);
                observer.unobserve(&img);
            }
            LazyImageAction::Discard => observer.unobserve(&img),
        }
    })?;
    for img in images {
        observer.observe(img);
    }
    debug!(count = images.len(), "lazy images observed");
    Ok(())
}

fn reveal(el: &Element) -> FolioResult<()> {
    el.class_list()
        .add_1(REVEALED_CLASS)
        .map_err(|e| js_error("reveal", e))
}

fn reveal_all(targets: &[Element]) {
    for el in targets {
        if let Err(err) = reveal(el) {
            warn!(%err, "reveal failed");
        }
    }
}

fn load_image(img: &Element) {
    let deferred = img.get_attribute(LAZY_SOURCE_ATTR);
    if let LazyImageAction::Load { src } = lazy_image_action(true, deferred.as_deref()) {
        set_source(img, &src);
    }
}

fn set_source(img: &Element, src: &str) {
    if let Some(img) = img.dyn_ref::<HtmlImageElement>() {
        img.set_src(src);
    }
    if let Err(err) = img.remove_attribute(LAZY_SOURCE_ATTR) {
        warn!(err = %js_error("clear data-src", err), "lazy image keeps its deferred source");
    }
}

/// Swap broken images for the placeholder, once per image.
///
/// `error` does not bubble, so one capturing listener on the document sees
/// every image, including the ones rendered into the case-study dialog later.
fn install_image_fallback(runtime: &Rc<Runtime>, placeholder: String) -> FolioResult<()> {
    listen_capture(&runtime.dom.document, "error", move |event| {
        let Some(image) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
        else {
            return;
        };
        let failed = image.src();
        let already = image.has_attribute(FALLBACK_MARKER_ATTR);
        let Some(replacement) = fallback_source(already, &placeholder) else {
            warn!(src = %failed, "placeholder image failed to load");
            return;
        };
        // Without the marker a missing placeholder would loop forever
        if let Err(err) = image.set_attribute(FALLBACK_MARKER_ATTR, "") {
            warn!(src = %failed, err = %js_error("mark fallback", err), "image failed to load, left as is");
            return;
        }
        warn!(src = %failed, "image failed to load, using placeholder");
        image.set_src(replacement);
    })
}
