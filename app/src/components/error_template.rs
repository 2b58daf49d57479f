//! This module defines the `error_template` component, rendered when the
//! router has nothing to show for the requested path.
//!
//! On the server it also sets the response status from the first [`AppError`].

use http::status::StatusCode;
use leptos::{
    html::{div, h1, p},
    prelude::*,
};
use leptos_router::components::{A, AProps};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    /// Returns the HTTP status code associated with the error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Collects the [`AppError`]s out of a Leptos error bag, ignoring anything else.
fn app_errors(errors: Errors) -> Vec<AppError> {
    errors
        .into_iter()
        .filter_map(|(_key, error)| error.downcast_ref::<AppError>().cloned())
        .collect()
}

/// Renders the error page for either server-side errors (`outside_errors`) or
/// a client-side error signal.
pub fn component(
    outside_errors: Option<Errors>,
    errors: Option<RwSignal<Errors>>,
) -> impl IntoView {
    let errors = outside_errors
        .or_else(|| errors.map(|errors| errors.get_untracked()))
        .map(app_errors)
        .unwrap_or_default();

    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let (Some(response), Some(first)) = (use_context::<ResponseOptions>(), errors.first()) {
            response.set_status(first.status_code());
        }
    }

    div().class("grid place-content-center px-4 h-full antialiased").child((
        h1().class("mb-6 text-center").child(if errors.len() > 1 { "Errors" } else { "Error" }),
        errors
            .into_iter()
            .map(|error| {
                p().class("text-xl tracking-widest text-center text-gray-400 uppercase")
                    .child(format!("{}| {error}", error.status_code()))
            })
            .collect::<Vec<_>>(),
        div().class("mt-6 text-center duration-200 hover:text-[#68b5fc]").child(A(AProps::builder()
            .href("/")
            .children(ToChildren::to_children(|| "Back to the gallery"))
            .build())),
    ))
}
