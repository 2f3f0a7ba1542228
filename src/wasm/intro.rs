use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Document, HtmlElement};

use crate::intro::Sequence;

fn now_seconds() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

/// Plays `sequence` against the DOM, writing `style.opacity` on every frame
/// until the last tween has finished.
pub fn play(document: &Document, sequence: Sequence) -> Result<(), JsValue> {
    let mut targets: Vec<(&'static str, HtmlElement)> = Vec::new();
    for selector in sequence.selectors() {
        match document
            .query_selector(selector)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            Some(el) => targets.push((selector, el)),
            None => log::debug!("intro target {selector} not found, skipping"),
        }
    }

    let started = now_seconds();
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let t = now_seconds() - started;
        for (selector, el) in &targets {
            if let Some(opacity) = sequence.sample(selector, t) {
                let _ = el.style().set_property("opacity", &format!("{opacity:.4}"));
            }
        }

        if sequence.is_complete(t) {
            log::debug!("intro finished after {t:.2}s");
            // stop rescheduling; `f` keeps owning the closure
            return;
        }
        if let (Some(win), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    let cb = first.as_ref().ok_or("intro closure missing")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(cb.as_ref().unchecked_ref())?;
    Ok(())
}
