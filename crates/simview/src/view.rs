//! Renderable view of a laid out diagram.
//!
//! A [`DiagramView`] joins a diagram with its [`Layout`] and [`StyleMap`] and
//! carries the pan and zoom state of the drawing. It is built once per render
//! call; nothing is cached between calls.

use std::collections::HashSet;

use log::{debug, trace};

use simview_core::{
    geometry::{Bounds, Point, Size},
    identifier::BlockId,
    model::{Block, Diagram},
};

use crate::{
    layout::Layout,
    style::{BlockStyle, StyleMap},
};

/// Smallest allowed zoom factor
pub const MIN_ZOOM: f32 = 0.25;

/// Largest allowed zoom factor
pub const MAX_ZOOM: f32 = 5.0;

/// Largest scale applied when fitting content to the canvas
pub const MAX_FIT_SCALE: f32 = 1.8;

/// Space kept free on the right and bottom of the canvas when fitting.
const FIT_PADDING: f32 = 40.0;

/// Extra room added past the right and bottom content edges when fitting.
const FIT_MARGIN: f32 = 20.0;

/// A uniform scale followed by a translation: `screen = point * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    k: f32,
    x: f32,
    y: f32,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ZoomTransform {
    /// The transform that leaves every point in place
    pub fn identity() -> Self {
        Self {
            k: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Returns the zoom factor
    pub fn scale(self) -> f32 {
        self.k
    }

    /// Returns the translation applied after scaling
    pub fn translation(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Maps a diagram point into screen space
    pub fn apply(self, point: Point) -> Point {
        point.scale(self.k).add_point(self.translation())
    }

    /// Maps a screen point back into diagram space
    pub fn invert(self, point: Point) -> Point {
        point.sub_point(self.translation()).scale(1.0 / self.k)
    }

    /// Formats the transform as an SVG `transform` attribute value.
    ///
    /// ```
    /// use simview::view::ZoomTransform;
    ///
    /// assert_eq!(
    ///     ZoomTransform::identity().to_svg_transform(),
    ///     "translate(0, 0) scale(1)"
    /// );
    /// ```
    pub fn to_svg_transform(self) -> String {
        format!("translate({}, {}) scale({})", self.x, self.y, self.k)
    }
}

/// A block together with its position and style.
#[derive(Debug, Clone, Copy)]
pub struct PlacedBlock<'a> {
    block: &'a Block,
    position: Point,
    style: BlockStyle,
}

impl<'a> PlacedBlock<'a> {
    /// Returns the block
    pub fn block(&self) -> &'a Block {
        self.block
    }

    /// Returns the block center
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the block style
    pub fn style(&self) -> BlockStyle {
        self.style
    }
}

/// A connection between two placed blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewEdge {
    source: BlockId,
    target: BlockId,
    from: Point,
    to: Point,
}

impl ViewEdge {
    /// Returns the id of the source block
    pub fn source(&self) -> BlockId {
        self.source
    }

    /// Returns the id of the target block
    pub fn target(&self) -> BlockId {
        self.target
    }

    /// Returns the centers of the source and target blocks
    pub fn centers(&self) -> (Point, Point) {
        (self.from, self.to)
    }

    /// Returns true if the edge starts and ends at the same block
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns the edge endpoints clipped to the block outlines.
    ///
    /// Each end is moved from the block center to where the center line
    /// crosses a `block_size` rectangle. Overlapping blocks keep their
    /// centers.
    pub fn clipped(&self, block_size: Size) -> (Point, Point) {
        (
            clip_to_rectangle(self.from, self.to, block_size),
            clip_to_rectangle(self.to, self.from, block_size),
        )
    }
}

/// Finds where the segment from `center` towards `toward` leaves a rectangle
/// of `size` centered at `center`.
fn clip_to_rectangle(center: Point, toward: Point, size: Size) -> Point {
    let delta = toward.sub_point(center);
    let (dx, dy) = (delta.x().abs(), delta.y().abs());
    if dx < 0.001 && dy < 0.001 {
        return center;
    }

    let half_width = size.width() / 2.0;
    let half_height = size.height() / 2.0;
    let t_x = if dx > 0.0 { half_width / dx } else { f32::MAX };
    let t_y = if dy > 0.0 { half_height / dy } else { f32::MAX };
    let t = t_x.min(t_y);

    if !t.is_finite() || t >= 1.0 {
        return center;
    }
    center.add_point(delta.scale(t))
}

/// A diagram prepared for rendering.
#[derive(Debug, Clone)]
pub struct DiagramView<'a> {
    canvas: Size,
    block_size: Size,
    blocks: Vec<PlacedBlock<'a>>,
    edges: Vec<ViewEdge>,
    transform: ZoomTransform,
}

impl<'a> DiagramView<'a> {
    /// Builds a view of `diagram` at the positions from `layout`.
    ///
    /// Blocks without a position and repeated block ids are skipped.
    /// Connections are kept only if both of their endpoints were placed.
    pub fn new(
        diagram: &'a Diagram,
        layout: &Layout,
        styles: &StyleMap,
        canvas: Size,
        block_size: Size,
    ) -> Self {
        let mut seen = HashSet::with_capacity(diagram.blocks().len());
        let blocks: Vec<_> = diagram
            .blocks()
            .iter()
            .filter(|block| seen.insert(block.id()))
            .filter_map(|block| {
                let position = layout.position(block.id())?;
                Some(PlacedBlock {
                    block,
                    position,
                    style: styles.style_for(block.block_type()),
                })
            })
            .collect();

        let edges: Vec<_> = diagram
            .connections()
            .iter()
            .filter_map(|connection| {
                let from = layout.position(connection.source())?;
                let to = layout.position(connection.target())?;
                Some(ViewEdge {
                    source: connection.source(),
                    target: connection.target(),
                    from,
                    to,
                })
            })
            .collect();

        let dropped = diagram.connections().len() - edges.len();
        if dropped > 0 {
            debug!(dropped; "Skipping connections without placed endpoints");
        }

        Self {
            canvas,
            block_size,
            blocks,
            edges,
            transform: ZoomTransform::identity(),
        }
    }

    /// Returns the canvas size used as the SVG view box
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Returns the size of a rendered block
    pub fn block_size(&self) -> Size {
        self.block_size
    }

    /// Returns the placed blocks in input order
    pub fn blocks(&self) -> &[PlacedBlock<'a>] {
        &self.blocks
    }

    /// Returns the drawable connections in input order
    pub fn edges(&self) -> &[ViewEdge] {
        &self.edges
    }

    /// Returns the current pan and zoom
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Returns the bounds of all block rectangles in diagram space.
    ///
    /// Returns `None` if no block was placed.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.blocks
            .iter()
            .map(|placed| Bounds::new_from_center(placed.position, self.block_size))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Sets the zoom factor, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    ///
    /// The translation is left unchanged.
    pub fn zoom_to(&mut self, k: f32) -> &mut Self {
        self.transform.k = clamp_zoom(k);
        self
    }

    /// Multiplies the zoom factor by `factor` while keeping `anchor`, a point
    /// in screen space, fixed.
    pub fn zoom_by(&mut self, factor: f32, anchor: Point) -> &mut Self {
        let before = self.transform;
        let k = clamp_zoom(before.k * factor);
        let focus = before.invert(anchor);

        self.transform = ZoomTransform {
            k,
            x: anchor.x() - focus.x() * k,
            y: anchor.y() - focus.y() * k,
        };
        trace!(k, x = self.transform.x, y = self.transform.y; "Zoomed view");
        self
    }

    /// Moves the view by `dx`, `dy` screen units
    pub fn pan_by(&mut self, dx: f32, dy: f32) -> &mut Self {
        if dx.is_finite() && dy.is_finite() {
            self.transform.x += dx;
            self.transform.y += dy;
        }
        self
    }

    /// Restores the identity transform
    pub fn reset_zoom(&mut self) -> &mut Self {
        self.transform = ZoomTransform::identity();
        self
    }

    /// Scales the content so its right and bottom edges fit inside the
    /// canvas, never enlarging beyond [`MAX_FIT_SCALE`].
    ///
    /// The translation is reset so the diagram origin stays at the top left.
    pub fn fit_to_canvas(&mut self) -> &mut Self {
        let Some(bounds) = self.content_bounds() else {
            return self.reset_zoom();
        };

        let fit_x = fit_ratio(self.canvas.width(), bounds.max_x());
        let fit_y = fit_ratio(self.canvas.height(), bounds.max_y());
        let k = clamp_zoom(fit_x.min(fit_y).min(MAX_FIT_SCALE));

        debug!(k; "Fitting diagram to canvas");
        self.transform = ZoomTransform { k, x: 0.0, y: 0.0 };
        self
    }
}

/// Scale that fits content reaching `content_max` into `extent`.
fn fit_ratio(extent: f32, content_max: f32) -> f32 {
    let needed = content_max + FIT_MARGIN;
    if !(needed.is_finite() && needed > 0.0) {
        return MAX_FIT_SCALE;
    }
    (extent - FIT_PADDING) / needed
}

fn clamp_zoom(k: f32) -> f32 {
    if k.is_nan() {
        return 1.0;
    }
    k.clamp(MIN_ZOOM, MAX_ZOOM)
}
