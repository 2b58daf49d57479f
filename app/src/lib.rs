//! Spinner and deferred image components for Leptos, plus the gallery
//! application that server-renders and hydrates them.

use crate::components::{error_template, header};
use chrono::{Datelike as _, Utc};
use leptos::{
    html::{a, body, div, footer, head, html, meta, p},
    prelude::*,
};
use leptos_meta::{MetaTags, Stylesheet, StylesheetProps, Title, TitleProps, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{FlatRoutes, Route, Router},
};

pub mod components;
pub mod deferred;
mod gallery;
pub mod types;
pub mod visibility;

pub use components::{lazy_image, spinner};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let html_comp = html().lang("en").child((
        head().child((
            meta().charset("utf-8"),
            meta()
                .name("viewport")
                .content("width=device-width, initial-scale=1"),
            HydrationScripts(HydrationScriptsProps::builder().options(options).build()),
            MetaTags(),
            Stylesheet(
                StylesheetProps::builder()
                    .id("leptos")
                    .href("/pkg/glimmer.css")
                    .build(),
            ),
            Title(TitleProps::builder().text("Glimmer").build()),
        )),
        body().class("bg-[#1e1e1e]").child(self::component),
    ));

    view! {
        <!DOCTYPE html>
        {html_comp}
    }
}

#[must_use]
pub fn component() -> impl IntoView {
    view! {
        <Router>
            <div class="overflow-auto text-white font-poppins">
                {header::component}
                <main class="container flex flex-col gap-8 px-4 pt-10 pb-14 mx-auto mt-16 max-w-4xl md:px-0">
                    <FlatRoutes fallback=|| {
                        let mut outside_errors = Errors::default();
                        outside_errors.insert_with_default_key(error_template::AppError::NotFound);
                        error_template::component(Some(outside_errors), None)
                    }>
                        <Route path=StaticSegment("") view=gallery::component/>
                    </FlatRoutes>
                </main>
                {footer_component()}
            </div>
        </Router>
    }
}

fn footer_component() -> impl IntoView {
    footer()
        .class("fixed right-0 bottom-0 left-0 z-10 py-2 text-center md:py-4 bg-[#1e1e1e]/80 backdrop-blur-md")
        .child(
            div().class("flex flex-col gap-1 justify-center items-center").child(
                p().class("text-gray-400").child((
                    "Built with",
                    a()
                        .href("https://leptos.dev")
                        .class("hover:underline text-[#ffef5c]")
                        .child(" Leptos"),
                    format!(" \u{a9} {}", Utc::now().year()),
                )),
            ),
        )
}
