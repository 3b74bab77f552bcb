//! Scene descriptions read by the CLI.
//!
//! A scene file is TOML:
//!
//! ```toml
//! viewport = 800.0
//!
//! [container]
//! selector = ".gallery"   # optional
//! width = 600.0           # omit for a fluid container
//!
//! [grid]                  # optional, replaces the configured [grid]
//! gutter = 10.0
//! use_min = true
//!
//! [[items]]
//! width = 90.0
//! height = 120.0
//! arrive_ms = 250         # optional, inserted once simulated time gets there
//! ```

use serde::Deserialize;
use thiserror::Error;

use brickwork::{BrickworkError, config::GridConfig, geometry::Size};

const DEFAULT_VIEWPORT: f32 = 1024.0;

/// Errors raised while reading a scene file.
#[derive(Debug, Error)]
pub enum SceneFileError {
    #[error("Failed to parse scene file: {0}")]
    Parse(String),
}

impl From<SceneFileError> for BrickworkError {
    fn from(err: SceneFileError) -> Self {
        BrickworkError::configuration(err.to_string())
    }
}

/// A parsed scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    #[serde(default = "default_viewport")]
    viewport: f32,

    #[serde(default)]
    container: ContainerSpec,

    #[serde(default)]
    grid: Option<GridConfig>,

    #[serde(default)]
    items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContainerSpec {
    selector: Option<String>,
    width: Option<f32>,
}

impl ContainerSpec {
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// Fixed width, or `None` for a container that follows the viewport.
    pub fn width(&self) -> Option<f32> {
        self.width
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ItemSpec {
    #[serde(flatten)]
    size: Size,
    #[serde(default)]
    arrive_ms: Option<u64>,
}

impl ItemSpec {
    pub fn size(&self) -> Size {
        self.size
    }

    /// Simulated arrival time in milliseconds; zero when present from the start.
    pub fn arrive_ms(&self) -> u64 {
        self.arrive_ms.unwrap_or_default()
    }
}

fn default_viewport() -> f32 {
    DEFAULT_VIEWPORT
}

impl SceneFile {
    /// Parses a scene file.
    ///
    /// # Errors
    ///
    /// Returns [`BrickworkError::Configuration`] if `source` is not a valid scene.
    pub fn from_toml(source: &str) -> Result<Self, BrickworkError> {
        let scene: Self =
            toml::from_str(source).map_err(|e| SceneFileError::Parse(e.to_string()))?;
        Ok(scene)
    }

    pub fn viewport(&self) -> f32 {
        self.viewport
    }

    pub fn container(&self) -> &ContainerSpec {
        &self.container
    }

    pub fn items(&self) -> &[ItemSpec] {
        &self.items
    }

    /// Grid options for this scene.
    ///
    /// A `[grid]` table in the scene replaces `configured`. When neither an
    /// item count nor `static` is given, every item of the scene is expected.
    pub fn grid_config(&self, configured: &GridConfig) -> GridConfig {
        let config = self.grid.clone().unwrap_or_else(|| configured.clone());
        if config.items().is_none() && !config.is_static() {
            config.with_items(self.items.len())
        } else {
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scene() {
        let scene = SceneFile::from_toml(
            r#"
            viewport = 640.0

            [container]
            width = 300.0

            [grid]
            gutter = 10.0

            [[items]]
            width = 90.0
            height = 50.0

            [[items]]
            width = 90.0
            height = 80.0
            arrive_ms = 150
            "#,
        )
        .unwrap();

        assert_eq!(scene.viewport(), 640.0);
        assert_eq!(scene.container().width(), Some(300.0));
        assert_eq!(scene.container().selector(), None);
        assert_eq!(scene.items().len(), 2);
        assert_eq!(scene.items()[0].arrive_ms(), 0);
        assert_eq!(scene.items()[1].arrive_ms(), 150);
        assert_eq!(scene.items()[1].size(), Size::new(90.0, 80.0));

        let config = scene.grid_config(&GridConfig::default());
        assert_eq!(config.items(), Some(2));
        assert_eq!(config.gutter(), 10.0);
    }

    #[test]
    fn test_defaults_and_configured_grid() {
        let scene = SceneFile::from_toml("").unwrap();
        assert_eq!(scene.viewport(), DEFAULT_VIEWPORT);
        assert_eq!(scene.container().width(), None);

        let configured = GridConfig::new().with_gutter(4.0).with_static(true);
        let config = scene.grid_config(&configured);
        assert_eq!(config, configured);
    }

    #[test]
    fn test_invalid_scene() {
        let err = SceneFile::from_toml("[[items]]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, BrickworkError::Configuration(_)));
        assert!(err.to_string().contains("Failed to parse scene file"));
    }
}
