//! Property tests for the layout engine.

use std::collections::HashSet;

use proptest::prelude::*;

use simview::{
    geometry::Size,
    identifier::BlockId,
    layout::{LayoutMode, compute_layout},
    model::{Block, Connection},
};

const TYPES: &[&str] = &["Inport", "Gain", "Sum", "Integrator", "Outport", "Custom"];

/// Up to 24 blocks drawn from 32 ids, so repeated ids occur, plus connections
/// that may point at ids without a block.
fn diagram_strategy(
    with_coordinates: bool,
) -> impl Strategy<Value = (Vec<Block>, Vec<Connection>)> {
    let coordinate = if with_coordinates {
        prop_oneof![Just(0.0_f32), -1.0e4_f32..1.0e4_f32].boxed()
    } else {
        Just(0.0_f32).boxed()
    };
    let block = (0_u64..32, 0..TYPES.len(), coordinate.clone(), coordinate).prop_map(
        |(id, ty, x, y)| Block::new(id, TYPES[ty], format!("B{id}")).with_position(x, y),
    );
    let connection = (0_u64..40, 0_u64..40).prop_map(|(from, to)| Connection::new(from, to));

    (
        prop::collection::vec(block, 1..24),
        prop::collection::vec(connection, 0..48),
    )
}

fn distinct_ids(blocks: &[Block]) -> HashSet<BlockId> {
    blocks.iter().map(Block::id).collect()
}

proptest! {
    #[test]
    fn every_block_positioned_once((blocks, connections) in diagram_strategy(true)) {
        let layout = compute_layout(&blocks, &connections, Size::new(800.0, 600.0));
        let ids = distinct_ids(&blocks);

        prop_assert_eq!(layout.len(), ids.len());
        for id in &ids {
            prop_assert!(layout.position(*id).is_some());
        }
        for (id, point) in layout.positions() {
            prop_assert!(ids.contains(&id));
            prop_assert!(point.is_finite());
        }
    }

    #[test]
    fn zero_coordinates_use_layers((blocks, connections) in diagram_strategy(false)) {
        let layout = compute_layout(&blocks, &connections, Size::new(800.0, 600.0));

        prop_assert_eq!(layout.mode(), LayoutMode::Layered);
        let layered: usize = layout.layers().iter().map(Vec::len).sum();
        prop_assert_eq!(layered, distinct_ids(&blocks).len());

        for connection in &connections {
            let (Some(source), Some(target)) = (
                layout.layer_of(connection.source()),
                layout.layer_of(connection.target()),
            ) else {
                continue;
            };
            let (Some(from), Some(to)) = (
                layout.position(connection.source()),
                layout.position(connection.target()),
            ) else {
                continue;
            };
            // Layer index and x grow together.
            prop_assert_eq!(source < target, from.x() < to.x());
        }
    }

    #[test]
    fn normalized_positions_stay_inside_canvas(
        (blocks, connections) in diagram_strategy(true),
        width in 1.0_f32..2000.0,
        height in 1.0_f32..2000.0,
    ) {
        let layout = compute_layout(&blocks, &connections, Size::new(width, height));
        prop_assume!(layout.mode() == LayoutMode::Normalized);

        for (_, point) in layout.positions() {
            prop_assert!(point.x() >= 0.0 && point.x() <= width);
            prop_assert!(point.y() >= 0.0 && point.y() <= height);
        }
    }
}
