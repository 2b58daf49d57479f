//! Reusable UI components.
//!
//! `spinner` and `lazy_image` are the library components; `error_template` and
//! `header` make up the gallery shell around them.

pub mod error_template;
pub mod header;
pub mod lazy_image;
pub mod spinner;
