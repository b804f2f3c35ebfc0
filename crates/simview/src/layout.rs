//! Diagram layout.
//!
//! The [`Engine`] assigns every block a center position in rendering space.
//! It picks one of two modes per diagram:
//!
//! - **Coordinate normalization** when at least one block carries a non-zero
//!   source coordinate. The supplied coordinates are mapped into the canvas
//!   with a single affine transform.
//! - **Auto layout** otherwise, using the configured [`LayoutEngine`]:
//!   topological layers from left to right, or a square grid.
//!
//! Layout never fails. Dangling connections, cycles, self-loops, duplicate
//! ids and degenerate canvas sizes all produce a best-effort result in which
//! every distinct block id has exactly one finite position.

mod grid;
mod layered;
mod normalize;

use indexmap::IndexMap;
use log::{debug, info, warn};

use simview_core::{
    geometry::{Point, Size},
    identifier::BlockId,
    model::{Block, Connection},
};

use crate::{
    config::{LayoutConfig, LayoutEngine},
    structure::DiagramGraph,
};

/// Which strategy produced a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Supplied coordinates rescaled into the canvas.
    Normalized,
    /// Topological layers from left to right.
    Layered,
    /// Square grid in input order.
    Grid,
}

/// Computed block positions.
///
/// Positions are block centers and are kept in block input order.
#[derive(Debug, Clone)]
pub struct Layout {
    mode: LayoutMode,
    positions: IndexMap<BlockId, Point>,
    layers: Vec<Vec<BlockId>>,
}

impl Layout {
    fn empty(mode: LayoutMode) -> Self {
        Self {
            mode,
            positions: IndexMap::new(),
            layers: Vec::new(),
        }
    }

    /// Returns the strategy that produced this layout
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Returns the position of a block, if it was laid out
    pub fn position(&self, id: BlockId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Returns all positions in block input order
    pub fn positions(&self) -> impl Iterator<Item = (BlockId, Point)> + '_ {
        self.positions.iter().map(|(id, point)| (*id, *point))
    }

    /// Returns the number of positioned blocks
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no block was positioned
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the layers of a [`LayoutMode::Layered`] layout, left to right.
    ///
    /// Empty for the other modes.
    pub fn layers(&self) -> &[Vec<BlockId>] {
        &self.layers
    }

    /// Returns the layer index of a block in a layered layout
    pub fn layer_of(&self, id: BlockId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.contains(&id))
    }
}

/// Spacing constants shared by the auto layout strategies.
#[derive(Debug, Clone, Copy)]
struct Spacing {
    margin_x: f32,
    margin_y: f32,
    column: f32,
    row: f32,
}

impl Spacing {
    /// Position of the cell at `column`, `row`.
    fn cell(self, column: usize, row: usize) -> Point {
        Point::new(
            self.margin_x + column as f32 * self.column,
            self.margin_y + row as f32 * self.row,
        )
    }
}

/// The diagram layout engine.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Strategy for diagrams without source coordinates
    engine: LayoutEngine,

    /// Horizontal canvas margin
    margin_x: f32,

    /// Vertical canvas margin
    margin_y: f32,

    /// Horizontal distance between layers
    column_spacing: f32,

    /// Vertical distance between rows
    row_spacing: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a layout engine with the default configuration
    pub fn new() -> Self {
        Self::from_config(&LayoutConfig::default())
    }

    /// Create a layout engine from the layout section of the configuration
    pub fn from_config(config: &LayoutConfig) -> Self {
        let (margin_x, margin_y) = config.margins();
        Self {
            engine: config.engine(),
            margin_x,
            margin_y,
            column_spacing: config.column_spacing(),
            row_spacing: config.row_spacing(),
        }
    }

    /// Set the strategy for diagrams without source coordinates
    pub fn set_engine(&mut self, engine: LayoutEngine) -> &mut Self {
        self.engine = engine;
        self
    }

    /// Set the horizontal and vertical canvas margins
    pub fn set_margins(&mut self, margin_x: f32, margin_y: f32) -> &mut Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }

    /// Set the horizontal distance between layers
    pub fn set_column_spacing(&mut self, spacing: f32) -> &mut Self {
        self.column_spacing = spacing;
        self
    }

    /// Set the vertical distance between rows
    pub fn set_row_spacing(&mut self, spacing: f32) -> &mut Self {
        self.row_spacing = spacing;
        self
    }

    /// Compute positions for `blocks`.
    ///
    /// `canvas` describes the drawing area. It only matters for coordinate
    /// normalization; a degenerate axis pins positions on that axis to zero.
    pub fn compute(&self, blocks: &[Block], connections: &[Connection], canvas: Size) -> Layout {
        if blocks.is_empty() {
            debug!("No blocks to lay out");
            return Layout::empty(LayoutMode::Layered);
        }

        let graph = DiagramGraph::new(blocks, connections);
        info!(
            blocks = graph.node_count(),
            connections = graph.edge_count(),
            dropped_connections = graph.dropped_connections(),
            duplicate_blocks = graph.duplicate_blocks();
            "Computing layout"
        );

        let distinct: Vec<&Block> = graph.blocks().collect();
        let mut layout = if distinct.iter().any(|block| block.has_coordinates()) {
            let positions = normalize::positions(
                &distinct,
                canvas,
                non_negative(self.margin_x),
                non_negative(self.margin_y),
            );
            Layout {
                mode: LayoutMode::Normalized,
                positions,
                layers: Vec::new(),
            }
        } else {
            let spacing = self.spacing();
            match self.engine {
                LayoutEngine::Layered => layered::layout(&graph, spacing),
                LayoutEngine::Grid => grid::layout(&graph, spacing),
            }
        };

        for (id, position) in layout.positions.iter_mut() {
            if !position.is_finite() {
                warn!(block:% = id; "Layout produced a non-finite position, pinning to origin");
                *position = Point::default();
            }
        }

        debug!(mode:? = layout.mode(), positioned = layout.len(); "Layout computed");
        layout
    }

    fn spacing(&self) -> Spacing {
        Spacing {
            margin_x: non_negative(self.margin_x),
            margin_y: non_negative(self.margin_y),
            column: non_negative(self.column_spacing),
            row: non_negative(self.row_spacing),
        }
    }
}

/// Replaces negative and non-finite configuration values with zero.
fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Compute a layout with the default engine configuration.
///
/// # Examples
///
/// ```
/// use simview::{
///     geometry::Size,
///     identifier::BlockId,
///     layout::compute_layout,
///     model::{Block, Connection},
/// };
///
/// let blocks = vec![Block::new("1", "Inport", "In1"), Block::new("2", "Gain", "K")];
/// let connections = vec![Connection::new("1", "2")];
///
/// let layout = compute_layout(&blocks, &connections, Size::new(800.0, 600.0));
/// let source = layout.position(BlockId::new("1")).unwrap();
/// let target = layout.position(BlockId::new("2")).unwrap();
/// assert!(source.x() < target.x());
/// ```
pub fn compute_layout(blocks: &[Block], connections: &[Connection], canvas: Size) -> Layout {
    Engine::new().compute(blocks, connections, canvas)
}
