//! Isometric SVG rendering of 3-D surface functions.
//!
//! A surface z = f(x, y) is sampled on a square lattice, each lattice cell is
//! projected onto a 2-D canvas with a fixed 30° isometric transform, and the
//! resulting quadrilaterals are shaded by elevation and written out as SVG.

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod projection;
pub mod render;
pub mod sampler;
pub mod surface;
pub mod svg;

pub use color::Rgba;
pub use config::RenderConfig;
pub use error::{ColorParseError, ConfigError, RenderError};
pub use render::{render, render_to_string, render_with};
pub use surface::SurfaceFn;
