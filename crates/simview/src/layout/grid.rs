//! Square grid layout.
//!
//! Blocks fill a grid of `ceil(sqrt(n))` columns row by row in input order.
//! Connections are ignored.

use indexmap::IndexMap;

use super::{Layout, LayoutMode, Spacing};
use crate::structure::DiagramGraph;

/// Number of grid columns for `count` blocks.
fn columns(count: usize) -> usize {
    (count as f64).sqrt().ceil().max(1.0) as usize
}

pub(super) fn layout(graph: &DiagramGraph<'_>, spacing: Spacing) -> Layout {
    let columns = columns(graph.node_count());
    let positions: IndexMap<_, _> = graph
        .blocks()
        .enumerate()
        .map(|(i, block)| (block.id(), spacing.cell(i % columns, i / columns)))
        .collect();

    Layout {
        mode: LayoutMode::Grid,
        positions,
        layers: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use simview_core::{
        geometry::Point,
        model::{Block, Connection},
    };

    use super::*;

    #[test]
    fn test_columns() {
        assert_eq!(columns(0), 1);
        assert_eq!(columns(1), 1);
        assert_eq!(columns(4), 2);
        assert_eq!(columns(5), 3);
        assert_eq!(columns(9), 3);
        assert_eq!(columns(10), 4);
    }

    #[test]
    fn test_fills_rows_in_input_order() {
        let blocks: Vec<_> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| Block::new(*id, "Constant", *id))
            .collect();
        let connections = [Connection::new("e", "a")];
        let graph = DiagramGraph::new(&blocks, &connections);
        let spacing = Spacing {
            margin_x: 10.0,
            margin_y: 20.0,
            column: 100.0,
            row: 50.0,
        };

        let layout = layout(&graph, spacing);

        assert_eq!(layout.position("a".into()), Some(Point::new(10.0, 20.0)));
        assert_eq!(layout.position("c".into()), Some(Point::new(210.0, 20.0)));
        assert_eq!(layout.position("d".into()), Some(Point::new(10.0, 70.0)));
        assert_eq!(layout.position("e".into()), Some(Point::new(110.0, 70.0)));
    }
}
