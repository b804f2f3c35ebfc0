//! Block styling by block type.
//!
//! Every block type maps to a [`BlockStyle`] derived from a single accent
//! color. Types without an entry use the fallback style.

use std::collections::HashMap;

use log::debug;

use simview_core::color::Color;

use crate::config::StyleConfig;

/// Alpha of the block fill relative to its stroke color (`0x22 / 0xFF`).
const FILL_ALPHA: f32 = 34.0 / 255.0;

const FALLBACK_COLOR: &str = "#334155";
const NAME_COLOR: &str = "rgba(255, 255, 255, 0.55)";

const BUILTIN_COLORS: &[(&str, &str)] = &[
    ("Gain", "#4d9fff"),
    ("TransferFcn", "#4d9fff"),
    ("Product", "#4d9fff"),
    ("Sum", "#00ff88"),
    ("Step", "#00ff88"),
    ("Integrator", "#8b5cf6"),
    ("Derivative", "#8b5cf6"),
    ("PIDController", "#8b5cf6"),
    ("Inport", "#00d4ff"),
    ("SineWave", "#00d4ff"),
    ("Outport", "#ff6b35"),
    ("Saturation", "#ff6b35"),
    ("Constant", "#ffd700"),
    ("Switch", "#ffd700"),
    ("Scope", "#ff4d88"),
];

/// Visual style of a rendered block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    stroke: Color,
    fill: Color,
    name_color: Color,
}

impl BlockStyle {
    /// Creates a style from an accent color.
    ///
    /// The outline and type label use `accent`; the fill is `accent` at low
    /// opacity.
    pub fn new(accent: Color) -> Self {
        Self {
            stroke: accent,
            fill: accent.with_alpha(FILL_ALPHA),
            name_color: parse_builtin(NAME_COLOR),
        }
    }

    /// Returns the outline and type label color
    pub fn stroke(&self) -> Color {
        self.stroke
    }

    /// Returns the translucent fill color
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Returns the block name label color
    pub fn name_color(&self) -> Color {
        self.name_color
    }
}

/// Lookup table from block type to [`BlockStyle`].
///
/// Lookup matches the type string exactly, including case.
#[derive(Debug, Clone)]
pub struct StyleMap {
    styles: HashMap<String, BlockStyle>,
    fallback: BlockStyle,
}

impl Default for StyleMap {
    fn default() -> Self {
        let styles = BUILTIN_COLORS
            .iter()
            .map(|(block_type, color)| {
                (
                    (*block_type).to_string(),
                    BlockStyle::new(parse_builtin(color)),
                )
            })
            .collect();

        Self {
            styles,
            fallback: BlockStyle::new(parse_builtin(FALLBACK_COLOR)),
        }
    }
}

impl StyleMap {
    /// Builds the built-in table with the overrides from `config` applied.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured color cannot be parsed.
    pub fn from_config(config: &StyleConfig) -> Result<Self, String> {
        let mut map = Self::default();

        if let Some(color) = config.default_block_color()? {
            map.with_fallback(BlockStyle::new(color));
        }
        for (block_type, color) in config.block_colors()? {
            debug!(block_type, color:%; "Overriding block color");
            map.with_style(block_type, BlockStyle::new(color));
        }

        Ok(map)
    }

    /// Sets the style for a block type
    pub fn with_style(&mut self, block_type: impl Into<String>, style: BlockStyle) -> &mut Self {
        self.styles.insert(block_type.into(), style);
        self
    }

    /// Sets the style used for types without an entry
    pub fn with_fallback(&mut self, style: BlockStyle) -> &mut Self {
        self.fallback = style;
        self
    }

    /// Returns the style for `block_type`, or the fallback style
    pub fn style_for(&self, block_type: &str) -> BlockStyle {
        self.styles
            .get(block_type)
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Returns the fallback style
    pub fn fallback(&self) -> BlockStyle {
        self.fallback
    }
}

/// Parses a color from the built-in tables.
fn parse_builtin(color: &str) -> Color {
    Color::new(color).unwrap_or_default()
}
