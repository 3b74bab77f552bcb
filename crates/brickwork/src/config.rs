//! Configuration types for Brickwork grids.
//!
//! This module provides the structures that control how a grid detects
//! readiness and lays out its items. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining grid and style settings.
//! - [`GridConfig`] - Options of a single grid, validated when the grid is built.
//! - [`StyleConfig`] - Colors used when exporting a laid-out scene.
//!
//! # Example
//!
//! ```
//! # use brickwork::config::GridConfig;
//! let config = GridConfig::new()
//!     .with_container(".grid")
//!     .with_items(20)
//!     .with_gutter(10.0)
//!     .with_use_min(true);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use brickwork_core::host::Positioning;

use crate::{
    color::Color,
    error::BrickworkError,
    layout::{LayoutEngine, Placement},
};

/// Top-level configuration combining grid and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Grid configuration section.
    #[serde(default)]
    grid: GridConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified grid and style configurations.
    pub fn new(grid: GridConfig, style: StyleConfig) -> Self {
        Self { grid, style }
    }

    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the grid configuration.
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }
}

/// Options of one grid.
///
/// Immutable once a grid is built from it. Every field is optional at the
/// deserialization level so that partial files merge with builder calls;
/// [`GridConfig::validate`] enforces what is actually required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Selector of the grid container.
    container: Option<String>,

    /// Number of items that must be present before the first layout.
    items: Option<usize>,

    /// Spacing between items, horizontally and vertically.
    gutter: Option<f32>,

    /// Skip readiness polling and assume all items are present.
    #[serde(rename = "static")]
    static_items: bool,

    /// Upper bound on the number of columns. Zero means no cap.
    max_columns: Option<usize>,

    /// Place each item into the currently shortest column.
    use_min: bool,

    /// Position items with a translate transform instead of offsets.
    use_transform: bool,

    /// Apply a transition to positioned items.
    animate: bool,

    /// Center the block of columns within the leftover horizontal space.
    center: bool,
}

impl GridConfig {
    /// Creates an empty configuration. At least a container and a gutter
    /// must be set before it validates.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, selector: impl Into<String>) -> Self {
        self.container = Some(selector.into());
        self
    }

    pub fn with_items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_gutter(mut self, gutter: f32) -> Self {
        self.gutter = Some(gutter);
        self
    }

    pub fn with_static(mut self, static_items: bool) -> Self {
        self.static_items = static_items;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = Some(max_columns);
        self
    }

    pub fn with_use_min(mut self, use_min: bool) -> Self {
        self.use_min = use_min;
        self
    }

    pub fn with_use_transform(mut self, use_transform: bool) -> Self {
        self.use_transform = use_transform;
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Returns the container selector, if configured.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Returns the expected item count used for readiness detection.
    pub fn items(&self) -> Option<usize> {
        self.items
    }

    /// Returns the gutter, or `0.0` when unset (an unset gutter never validates).
    pub fn gutter(&self) -> f32 {
        self.gutter.unwrap_or_default()
    }

    pub fn is_static(&self) -> bool {
        self.static_items
    }

    /// Returns the column cap; an explicit zero reads as no cap.
    pub fn max_columns(&self) -> Option<usize> {
        self.max_columns.filter(|&max| max > 0)
    }

    pub fn use_min(&self) -> bool {
        self.use_min
    }

    pub fn use_transform(&self) -> bool {
        self.use_transform
    }

    pub fn animate(&self) -> bool {
        self.animate
    }

    pub fn center(&self) -> bool {
        self.center
    }

    /// Returns the column placement policy selected by `use_min`.
    pub fn placement(&self) -> Placement {
        Placement::from_use_min(self.use_min)
    }

    /// Returns the technique used to move items.
    pub fn positioning(&self) -> Positioning {
        if self.use_transform {
            Positioning::Transform
        } else {
            Positioning::Offset
        }
    }

    /// Builds the layout engine these options describe.
    pub fn engine(&self) -> LayoutEngine {
        let engine = LayoutEngine::new()
            .with_gutter(self.gutter())
            .with_placement(self.placement())
            .with_center(self.center);
        match self.max_columns() {
            Some(max_columns) => engine.with_max_columns(max_columns),
            None => engine,
        }
    }

    /// Checks every option that does not depend on a container handle.
    ///
    /// The container itself may also be supplied as a handle when building a
    /// grid, so a missing selector is only rejected by [`GridConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`BrickworkError::Configuration`] if the gutter is missing,
    /// negative or not finite, if neither `items` nor `static` is set, or if
    /// the selector is blank.
    pub fn validate_options(&self) -> Result<(), BrickworkError> {
        match self.gutter {
            None => return Err(BrickworkError::configuration("missing `gutter`")),
            Some(gutter) if !gutter.is_finite() || gutter < 0.0 => {
                return Err(BrickworkError::configuration(format!(
                    "`gutter` must be a non-negative number, got {gutter}"
                )));
            }
            Some(_) => {}
        }

        if self.items.is_none() && !self.static_items {
            return Err(BrickworkError::configuration(
                "missing `items`: provide the expected item count or enable `static`",
            ));
        }

        if self
            .container
            .as_deref()
            .is_some_and(|selector| selector.trim().is_empty())
        {
            return Err(BrickworkError::configuration("`container` selector is empty"));
        }

        Ok(())
    }

    /// Validates a configuration that identifies its container by selector.
    ///
    /// # Errors
    ///
    /// Everything [`GridConfig::validate_options`] rejects, plus a missing
    /// `container`.
    pub fn validate(&self) -> Result<(), BrickworkError> {
        if self.container.is_none() {
            return Err(BrickworkError::configuration("missing `container`"));
        }
        self.validate_options()
    }
}

/// Visual styling used when exporting a scene.
///
/// Fields that are not set fall back to exporter defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] of the container, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Fill [`Color`] of items, as a color string.
    #[serde(default)]
    item_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style configuration from optional color strings.
    pub fn new(background_color: Option<String>, item_color: Option<String>) -> Self {
        Self {
            background_color,
            item_color,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, BrickworkError> {
        parse_color(self.background_color.as_deref(), "background_color")
    }

    /// Returns the parsed item fill [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn item_color(&self) -> Result<Option<Color>, BrickworkError> {
        parse_color(self.item_color.as_deref(), "item_color")
    }
}

fn parse_color(value: Option<&str>, field: &str) -> Result<Option<Color>, BrickworkError> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| BrickworkError::configuration(format!("invalid `{field}` in config: {err}")))
}
