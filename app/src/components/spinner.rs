//! This module defines the `spinner` component, a decorative loading indicator
//! drawn as inline SVG.
//!
//! The drawing is an outlined diamond holding four nested diamond facets of
//! increasing opacity and a center dot. Only the outer size changes between
//! size categories; the geometry lives in a fixed `0 0 100 100` view box.

use leptos::{
    prelude::*,
    svg::{circle, polygon, svg},
};

use crate::types::SpinnerSize;

const VIEW_BOX: &str = "0 0 100 100";
const CENTER: u32 = 50;
const OUTLINE_RADIUS: u32 = 48;
const DOT_RADIUS: u32 = 4;

/// Half-diagonal and opacity of each facet, outermost first.
pub const FACETS: [(u32, f32); 4] = [(40, 0.2), (30, 0.4), (20, 0.6), (10, 0.8)];

/// Points of a diamond centered in the view box.
fn diamond(radius: u32) -> String {
    format!(
        "{CENTER},{top} {right},{CENTER} {CENTER},{bottom} {left},{CENTER}",
        top = CENTER - radius,
        right = CENTER + radius,
        bottom = CENTER + radius,
        left = CENTER - radius,
    )
}

/// Renders the spinner at the given size with `class` appended to the base
/// classes.
pub fn component(size: SpinnerSize, class: &str) -> impl IntoView + use<> {
    let dimension = size.dimension().to_string();

    svg()
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("viewBox", VIEW_BOX)
        .attr("width", dimension.clone())
        .attr("height", dimension)
        .attr("fill", "none")
        .attr("role", "status")
        .attr("aria-label", "Loading")
        .attr("data-size", size.as_str())
        .class(format!("animate-spin {class}").trim_end().to_owned())
        .child((
            polygon()
                .attr("points", diamond(OUTLINE_RADIUS))
                .attr("stroke", "currentColor")
                .attr("stroke-width", "3")
                .attr("stroke-linejoin", "round"),
            FACETS
                .iter()
                .map(|&(radius, opacity)| {
                    polygon()
                        .attr("points", diamond(radius))
                        .attr("fill", "currentColor")
                        .attr("fill-opacity", opacity.to_string())
                })
                .collect::<Vec<_>>(),
            circle()
                .attr("cx", CENTER.to_string())
                .attr("cy", CENTER.to_string())
                .attr("r", DOT_RADIUS.to_string())
                .attr("fill", "currentColor"),
        ))
}
