//! Configuration types for SimView layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file. Every field is optional; missing
//! values fall back to the defaults documented on each field.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Layout engine choice, canvas size, margins and spacings.
//! - [`StyleConfig`] - Background color and block-type color overrides.
//!
//! # Example
//!
//! ```
//! # use simview::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().canvas().width(), 800.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use simview_core::{color::Color, geometry::Size};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns a mutable reference to the layout configuration.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout algorithm used when no block carries source coordinates.
///
/// Diagrams whose blocks carry coordinates are always laid out by
/// normalizing those coordinates into the canvas, whichever engine is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// Topological layers from left to right.
    #[default]
    Layered,
    /// Square grid in input order.
    Grid,
}

/// Layout configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Engine for diagrams without source coordinates. Default: `layered`.
    engine: LayoutEngine,

    /// Drawing area width. Default: 800.
    canvas_width: f32,

    /// Drawing area height. Default: 600.
    canvas_height: f32,

    /// Horizontal distance between the canvas edge and the outermost block centers. Default: 60.
    margin_x: f32,

    /// Vertical distance between the canvas edge and the outermost block centers. Default: 40.
    margin_y: f32,

    /// Distance between layer columns. Default: 180.
    column_spacing: f32,

    /// Distance between rows within a layer. Default: 90.
    row_spacing: f32,

    /// Width of a rendered block. Default: 100.
    block_width: f32,

    /// Height of a rendered block. Default: 48.
    block_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            canvas_width: 800.0,
            canvas_height: 600.0,
            margin_x: 60.0,
            margin_y: 40.0,
            column_spacing: 180.0,
            row_spacing: 90.0,
            block_width: 100.0,
            block_height: 48.0,
        }
    }
}

impl LayoutConfig {
    /// Returns the [`LayoutEngine`] used for diagrams without coordinates.
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Sets the [`LayoutEngine`].
    pub fn set_engine(&mut self, engine: LayoutEngine) -> &mut Self {
        self.engine = engine;
        self
    }

    /// Returns the canvas size.
    pub fn canvas(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Overrides the canvas size.
    pub fn set_canvas(&mut self, canvas: Size) -> &mut Self {
        self.canvas_width = canvas.width();
        self.canvas_height = canvas.height();
        self
    }

    /// Returns the horizontal and vertical margins.
    pub fn margins(&self) -> (f32, f32) {
        (self.margin_x, self.margin_y)
    }

    /// Returns the distance between layer columns.
    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    /// Returns the distance between rows within a layer.
    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    /// Returns the size of a rendered block.
    pub fn block_size(&self) -> Size {
        Size::new(self.block_width, self.block_height)
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color as a color string. No background is drawn when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Color for block types without an entry. Defaults to `#334155`.
    #[serde(default)]
    default_block_color: Option<String>,

    /// Per block type color overrides, keyed by the exact type string.
    #[serde(default)]
    block_colors: HashMap<String, String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_optional(self.background_color.as_deref())
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed fallback block [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn default_block_color(&self) -> Result<Option<Color>, String> {
        parse_optional(self.default_block_color.as_deref())
            .map_err(|err| format!("Invalid default block color in config: {err}"))
    }

    /// Returns the parsed per-type color overrides.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first block type whose color cannot be parsed.
    pub fn block_colors(&self) -> Result<Vec<(&str, Color)>, String> {
        let mut colors = self
            .block_colors
            .iter()
            .map(|(block_type, color)| {
                Color::new(color)
                    .map(|color| (block_type.as_str(), color))
                    .map_err(|err| format!("Invalid color for block type `{block_type}`: {err}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        colors.sort_by(|a, b| a.0.cmp(b.0));
        Ok(colors)
    }
}

fn parse_optional(color: Option<&str>) -> Result<Option<Color>, String> {
    color.map(Color::new).transpose()
}
