//! This module defines the `lazy_image` component, an `<img>` wrapper that
//! holds back the real source until the element is about to scroll into view.
//!
//! Until then a 1×1 placeholder keeps the element renderable and its box
//! stable. Priority images skip observation and load right away. The image
//! fades in once the browser reports it has finished loading.

use leptos::{ev, html::img, logging, prelude::*};

use crate::{
    deferred::{DeferredImage, ObservationSlot, resync},
    types::LoadingMode,
    visibility::{BrowserObservation, ObserverOptions},
};

const BASE_CLASS: &str = "transition-opacity duration-300";

/// Inputs for [`component`].
#[derive(Clone)]
pub struct LazyImageProps {
    pub src: Signal<String>,
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub class: String,
    pub loading: LoadingMode,
    pub priority: Signal<bool>,
}

impl LazyImageProps {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::reactive(Signal::stored(src.into()), alt)
    }

    /// Like [`LazyImageProps::new`], but the source may change after mount.
    pub fn reactive(src: Signal<String>, alt: impl Into<String>) -> Self {
        Self {
            src,
            alt: alt.into(),
            width: None,
            height: None,
            class: String::new(),
            loading: LoadingMode::default(),
            priority: Signal::stored(false),
        }
    }

    #[must_use]
    pub const fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub const fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    #[must_use]
    pub const fn loading(mut self, loading: LoadingMode) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn priority(self, priority: bool) -> Self {
        self.priority_signal(Signal::stored(priority))
    }

    #[must_use]
    pub const fn priority_signal(mut self, priority: Signal<bool>) -> Self {
        self.priority = priority;
        self
    }

    /// `aspect-ratio` style reserving the box when both dimensions are known.
    #[must_use]
    pub fn aspect_style(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(width), Some(height)) if height > 0 => {
                Some(format!("aspect-ratio: {width} / {height};"))
            }
            _ => None,
        }
    }
}

fn class_list(state: &DeferredImage, extra: &str) -> String {
    format!("{BASE_CLASS} {} {extra}", state.opacity_class())
        .trim_end()
        .to_owned()
}

/// Renders a deferred image.
///
/// The visibility observer is registered from an effect, so it only exists in
/// the browser. It is released when the component is cleaned up and whenever
/// `src` or `priority` change, at which point the state starts over.
pub fn component(props: LazyImageProps) -> impl IntoView {
    let aspect_style = props.aspect_style();
    let LazyImageProps {
        src,
        alt,
        width,
        height,
        class,
        loading,
        priority,
    } = props;

    let state = RwSignal::new(DeferredImage::new(
        src.get_untracked(),
        priority.get_untracked(),
    ));
    let observation = StoredValue::new_local(ObservationSlot::<BrowserObservation>::default());
    let node_ref = NodeRef::<leptos::html::Img>::new();

    Effect::new(move |_| {
        let source = src.get();
        let priority = priority.get();
        let Some(element) = node_ref.get() else {
            return;
        };

        let Some((mut next, armed)) = observation.try_update_value(|slot| {
            state.with_untracked(|current| {
                resync(current, source, priority, slot, || {
                    BrowserObservation::observe(&element, &ObserverOptions::default(), move || {
                        state.update(|state| {
                            state.reveal();
                        });
                    })
                })
            })
        }) else {
            return;
        };
        if let Err(err) = armed {
            logging::warn!("deferred image falling back to immediate load: {err}");
        }
        // The load event may have fired before hydration attached a listener.
        // Only the real source counts, never the placeholder still on screen.
        let showing_source =
            element.get_attribute("src").as_deref() == Some(next.current_source());
        next.sync_complete(showing_source && element.complete() && element.natural_width() > 0);
        if state.with_untracked(|current| *current != next) {
            state.set(next);
        }
    });

    on_cleanup(move || {
        observation.try_update_value(ObservationSlot::release);
    });

    img()
        .node_ref(node_ref)
        .src(move || state.with(|state| state.rendered_src().to_owned()))
        .alt(alt)
        .width(width.map(|width| width.to_string()))
        .height(height.map(|height| height.to_string()))
        .attr("loading", loading.as_str())
        .attr("decoding", "async")
        .attr("style", aspect_style)
        .class(move || state.with(|state| class_list(state, &class)))
        .on(ev::load, move |_| {
            state.update(|state| {
                state.mark_loaded();
            });
        })
}
