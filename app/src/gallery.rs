//! This module defines the `gallery` page, the demo route showing both
//! components.
//!
//! The spinner section renders every size category plus the one named by the
//! `?size=` query parameter. The image section starts with a priority hero
//! image followed by a column of deferred images that load as they are
//! scrolled towards.

use leptos::{
    html::{div, figcaption, figure, h2, p, section, span},
    prelude::*,
};
use leptos_meta::{Title, TitleProps};
use leptos_router::hooks::use_query_map;

use crate::{
    components::{
        lazy_image::{self, LazyImageProps},
        spinner,
    },
    types::{LoadingMode, SpinnerSize},
};

const DEFERRED_IMAGE_COUNT: u32 = 12;
const IMAGE_WIDTH: u32 = 640;
const IMAGE_HEIGHT: u32 = 400;

/// Source for the `index`th sample image.
#[must_use]
pub fn sample_source(index: u32) -> String {
    format!("https://picsum.photos/seed/glimmer-{index}/{IMAGE_WIDTH}/{IMAGE_HEIGHT}")
}

fn spinner_section() -> impl IntoView {
    let query = use_query_map();
    let selected = move || {
        query.with(|query| {
            query
                .get("size")
                .map_or_else(SpinnerSize::default, |size| SpinnerSize::from(size.as_str()))
        })
    };

    section().id("spinners").class("flex flex-col gap-4").child((
        h2().class("text-2xl font-semibold").child("Spinners"),
        div().class("flex flex-row flex-wrap gap-8 items-end").child(
            SpinnerSize::ALL
                .iter()
                .map(|&size| {
                    figure().class("flex flex-col gap-2 items-center").child((
                        spinner::component(size, "text-[#ffef5c]"),
                        figcaption()
                            .class("text-xs text-gray-400")
                            .child(format!("{} · {}px", size.as_str(), size.dimension())),
                    ))
                })
                .collect::<Vec<_>>(),
        ),
        div().class("flex flex-row gap-3 items-center text-sm text-gray-400").child((
            span().child("?size="),
            move || {
                let size = selected();
                (
                    spinner::component(size, "text-white"),
                    span().child(size.as_str()),
                )
            },
        )),
    ))
}

fn image_section() -> impl IntoView {
    section().id("images").class("flex flex-col gap-6").child((
        h2().class("text-2xl font-semibold").child("Deferred images"),
        p().class("text-sm text-gray-400").child(
            "The first image is marked as priority and loads immediately. The rest wait until they are within 50px of the viewport.",
        ),
        lazy_image::component(
            LazyImageProps::new(sample_source(0), "Priority sample image")
                .width(IMAGE_WIDTH)
                .height(IMAGE_HEIGHT)
                .class("w-full rounded-lg")
                .loading(LoadingMode::Eager)
                .priority(true),
        ),
        // Push the deferred images below the fold.
        div().class("h-[100vh]"),
        (1..=DEFERRED_IMAGE_COUNT)
            .map(|index| {
                lazy_image::component(
                    LazyImageProps::new(sample_source(index), format!("Deferred sample image {index}"))
                        .width(IMAGE_WIDTH)
                        .height(IMAGE_HEIGHT)
                        .class("w-full rounded-lg bg-card"),
                )
            })
            .collect::<Vec<_>>(),
    ))
}

pub fn component() -> impl IntoView {
    div().class("flex flex-col gap-12").child((
        Title(TitleProps::builder().text("Glimmer \u{2013} Component Gallery").build()),
        spinner_section(),
        image_section(),
    ))
}
