//! Coordinate normalization.
//!
//! Maps supplied block coordinates into
//! `[margin_x, width - margin_x] × [margin_y, height - margin_y]` with one
//! affine transform per axis, shared by all blocks.

use indexmap::IndexMap;

use simview_core::{
    geometry::{Point, Size},
    identifier::BlockId,
    model::Block,
};

/// Linear mapping of one axis from source range into canvas space.
#[derive(Debug, Clone, Copy)]
struct AxisMap {
    min: f64,
    range: f64,
    start: f64,
    span: f64,
    pinned: bool,
}

impl AxisMap {
    fn new(values: impl Iterator<Item = f32>, extent: f32, margin: f32) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(f64::from(v)), max.max(f64::from(v)))
        });

        let range = max - min;
        let range = if range > 0.0 && range.is_finite() {
            range
        } else {
            1.0
        };

        if !(extent.is_finite() && extent > 0.0) {
            return Self {
                min,
                range,
                start: 0.0,
                span: 0.0,
                pinned: true,
            };
        }

        let extent = f64::from(extent);
        let margin = f64::from(margin).min(extent / 2.0);

        Self {
            min,
            range,
            start: margin,
            span: extent - 2.0 * margin,
            pinned: false,
        }
    }

    fn map(self, value: f32) -> f32 {
        if self.pinned {
            return 0.0;
        }
        let t = (f64::from(value) - self.min) / self.range;
        (self.start + t * self.span) as f32
    }
}

/// Rescales the supplied coordinates of `blocks` into the canvas.
///
/// Absent or non-finite coordinates count as zero. An axis whose source
/// values are all equal maps every block to the margin on that axis.
pub(super) fn positions(
    blocks: &[&Block],
    canvas: Size,
    margin_x: f32,
    margin_y: f32,
) -> IndexMap<BlockId, Point> {
    let x_axis = AxisMap::new(
        blocks.iter().map(|b| b.coordinates().x()),
        canvas.width(),
        margin_x,
    );
    let y_axis = AxisMap::new(
        blocks.iter().map(|b| b.coordinates().y()),
        canvas.height(),
        margin_y,
    );

    blocks
        .iter()
        .map(|block| {
            let source = block.coordinates();
            (
                block.id(),
                Point::new(x_axis.map(source.x()), y_axis.map(source.y())),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn canvas() -> Size {
        Size::new(800.0, 600.0)
    }

    fn normalize(blocks: &[Block], canvas: Size) -> IndexMap<BlockId, Point> {
        let blocks: Vec<&Block> = blocks.iter().collect();
        positions(&blocks, canvas, 60.0, 40.0)
    }

    #[test]
    fn test_extremes_map_to_margins() {
        let blocks = [
            Block::new("a", "Inport", "a").with_position(100.0, 50.0),
            Block::new("b", "Gain", "b").with_position(300.0, 250.0),
            Block::new("c", "Outport", "c").with_position(500.0, 150.0),
        ];
        let positions = normalize(&blocks, canvas());

        let a = positions[&BlockId::new("a")];
        let b = positions[&BlockId::new("b")];
        let c = positions[&BlockId::new("c")];

        assert_approx_eq!(f32, a.x(), 60.0);
        assert_approx_eq!(f32, c.x(), 740.0);
        assert_approx_eq!(f32, b.x(), 400.0);
        assert_approx_eq!(f32, a.y(), 40.0);
        assert_approx_eq!(f32, b.y(), 560.0);
        assert_approx_eq!(f32, c.y(), 300.0);
    }

    #[test]
    fn test_zero_range_axis_uses_margin() {
        let blocks = [
            Block::new("a", "Inport", "a").with_position(10.0, 75.0),
            Block::new("b", "Gain", "b").with_position(90.0, 75.0),
        ];
        let positions = normalize(&blocks, canvas());

        for point in positions.values() {
            assert_approx_eq!(f32, point.y(), 40.0);
        }
    }

    #[test]
    fn test_absent_coordinates_count_as_zero() {
        let blocks = [
            Block::new("a", "Inport", "a"),
            Block::new("b", "Gain", "b").with_position(200.0, 100.0),
        ];
        let positions = normalize(&blocks, canvas());

        assert_eq!(positions[&BlockId::new("a")], Point::new(60.0, 40.0));
        assert_eq!(positions[&BlockId::new("b")], Point::new(740.0, 560.0));
    }

    #[test]
    fn test_degenerate_canvas_pins_to_origin() {
        let blocks = [
            Block::new("a", "Inport", "a").with_position(10.0, 20.0),
            Block::new("b", "Gain", "b").with_position(90.0, 80.0),
        ];
        let positions = normalize(&blocks, Size::new(0.0, -5.0));

        for point in positions.values() {
            assert_eq!(*point, Point::default());
        }
    }

    #[test]
    fn test_narrow_canvas_clamps_margin() {
        let blocks = [
            Block::new("a", "Inport", "a").with_position(10.0, 20.0),
            Block::new("b", "Gain", "b").with_position(90.0, 80.0),
        ];
        let positions = normalize(&blocks, Size::new(50.0, 600.0));

        for point in positions.values() {
            assert_approx_eq!(f32, point.x(), 25.0);
        }
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let blocks = [
            Block::new("a", "Inport", "a").with_position(-f32::MAX, 0.0),
            Block::new("b", "Gain", "b").with_position(f32::MAX, 1.0),
        ];
        let positions = normalize(&blocks, canvas());

        assert_approx_eq!(f32, positions[&BlockId::new("a")].x(), 60.0);
        assert_approx_eq!(f32, positions[&BlockId::new("b")].x(), 740.0);
    }
}
