//! SVG rendering of a container and its positioned items.

use log::{debug, warn};
use svg::{
    Document,
    node::element::{Group, Rectangle},
};

use brickwork_core::{
    host::Host,
    scene::{ElementId, Scene},
};

use crate::{color::Color, config::StyleConfig, error::BrickworkError};

const DEFAULT_BACKGROUND: &str = "#f5f5f5";
const DEFAULT_ITEM_FILL: &str = "#4682b4";
const ITEM_STROKE: &str = "#ffffff";

/// Renders one container of a [`Scene`] to an SVG document.
///
/// # Examples
///
/// ```
/// # use brickwork::{config::StyleConfig, export::SvgExporter};
/// # use brickwork_core::{geometry::Size, scene::Scene};
/// let mut scene = Scene::new(800.0);
/// let container = scene.add_container(None, Some(200.0)).unwrap();
/// scene.insert_item(container, Size::new(90.0, 40.0)).unwrap();
///
/// let exporter = SvgExporter::new(&StyleConfig::default()).unwrap();
/// let svg = exporter.render(&scene, container).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Color,
    item_fill: Color,
}

impl SvgExporter {
    /// Creates an exporter using the colors of `style`.
    ///
    /// # Errors
    ///
    /// Returns [`BrickworkError::Configuration`] if a configured color is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, BrickworkError> {
        let background = match style.background_color()? {
            Some(color) => color,
            None => default_color(DEFAULT_BACKGROUND)?,
        };
        let item_fill = match style.item_color()? {
            Some(color) => color,
            None => default_color(DEFAULT_ITEM_FILL)?,
        };

        Ok(Self {
            background,
            item_fill,
        })
    }

    /// Renders `container` and every positioned item in it.
    ///
    /// Items that were never positioned are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BrickworkError::Export`] if `container` is not a container
    /// of `scene`.
    pub fn render(&self, scene: &Scene, container: ElementId) -> Result<String, BrickworkError> {
        if !scene.containers().any(|id| id == container) {
            return Err(BrickworkError::Export(format!(
                "{container} is not a container"
            )));
        }

        let size = scene.measure(&container);
        let width = size.width().max(1.0);
        let height = size.height().max(1.0);

        let background = Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", &self.background);

        let mut items = Group::new().set("class", "items");
        let mut rendered = 0usize;
        for item in scene.children(&container) {
            let Some(bounds) = scene.item_bounds(item) else {
                warn!(item:% = item; "Item was never positioned, skipping");
                continue;
            };
            items = items.add(
                Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", &self.item_fill)
                    .set("stroke", ITEM_STROKE)
                    .set("data-item", item.raw()),
            );
            rendered += 1;
        }

        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .add(background)
            .add(items);

        debug!(container:% = container, items = rendered, width, height; "SVG rendered");
        Ok(document.to_string())
    }
}

fn default_color(value: &str) -> Result<Color, BrickworkError> {
    Color::new(value).map_err(BrickworkError::Export)
}

/// Renders `container` of `scene` with the colors of `style`.
///
/// # Errors
///
/// See [`SvgExporter::new`] and [`SvgExporter::render`].
pub fn render_svg(
    scene: &Scene,
    container: ElementId,
    style: &StyleConfig,
) -> Result<String, BrickworkError> {
    SvgExporter::new(style)?.render(scene, container)
}
