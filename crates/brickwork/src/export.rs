//! Export of laid-out scenes.
//!
//! Only SVG is supported. The exporter reads the positions a grid wrote onto
//! a headless [`Scene`](brickwork_core::scene::Scene); it never lays
//! anything out itself.

pub mod svg;

pub use svg::{SvgExporter, render_svg};
