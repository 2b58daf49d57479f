//! Browser visibility observation backed by `IntersectionObserver`.

use js_sys::Array;
use thiserror::Error;
use wasm_bindgen::{JsCast as _, JsValue, closure::Closure};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::deferred::Observation;

/// Distance outside the viewport at which loading starts.
pub const DEFAULT_ROOT_MARGIN: &str = "50px";
/// Smallest visible fraction that counts as intersecting.
pub const DEFAULT_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObserveError {
    #[error("IntersectionObserver is not available in this environment")]
    Unsupported,
    #[error("failed to construct IntersectionObserver: {0}")]
    Construct(String),
}

impl From<JsValue> for ObserveError {
    fn from(value: JsValue) -> Self {
        Self::Construct(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: DEFAULT_ROOT_MARGIN.to_owned(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ObserverOptions {
    fn to_init(&self) -> IntersectionObserverInit {
        let init = IntersectionObserverInit::new();
        init.set_root_margin(&self.root_margin);
        init.set_threshold(&JsValue::from_f64(self.threshold));
        init
    }
}

/// A one-shot `IntersectionObserver` watching a single element.
///
/// The observer disconnects itself after the first intersecting entry. The
/// callback closure lives as long as this handle, so the handle must outlive
/// any notification the browser may still deliver.
pub struct BrowserObservation {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl BrowserObservation {
    /// Starts watching `target` and calls `on_visible` once it intersects.
    ///
    /// # Errors
    ///
    /// Returns [`ObserveError::Unsupported`] when the host has no
    /// `IntersectionObserver`, or [`ObserveError::Construct`] if creating it
    /// throws.
    pub fn observe(
        target: &Element,
        options: &ObserverOptions,
        on_visible: impl FnOnce() + 'static,
    ) -> Result<Self, ObserveError> {
        if !is_supported() {
            return Err(ObserveError::Unsupported);
        }

        let mut on_visible = Some(on_visible);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let intersecting = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .any(|entry| entry.is_intersecting());
                if fire_once(&mut on_visible, intersecting) {
                    observer.disconnect();
                }
            },
        );

        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options.to_init(),
        )?;
        observer.observe(target);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Observation for BrowserObservation {
    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

/// Runs the pending callback on the first intersecting notification.
/// Returns whether this notification was that first hit.
fn fire_once(pending: &mut Option<impl FnOnce()>, intersecting: bool) -> bool {
    if !intersecting {
        return false;
    }
    match pending.take() {
        Some(on_visible) => {
            on_visible();
            true
        }
        None => false,
    }
}

fn is_supported() -> bool {
    let global = js_sys::global();
    js_sys::Reflect::has(&global, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}
