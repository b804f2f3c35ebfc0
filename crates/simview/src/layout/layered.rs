//! Layered left-to-right layout.
//!
//! Blocks are grouped into layers by breadth-first topological layering
//! (Kahn's algorithm): each layer holds the unplaced blocks whose remaining
//! in-degree is zero. When a cycle leaves no such block, the first unplaced
//! block in input order is forced into a layer of its own and layering
//! continues from there. Every pass places at least one block, so the loop
//! runs at most once per block.

use std::mem;

use indexmap::IndexMap;
use log::debug;
use petgraph::graph::NodeIndex;

use simview_core::{geometry::Point, identifier::BlockId};

use super::{Layout, LayoutMode, Spacing};
use crate::structure::DiagramGraph;

/// Assigns every node of `graph` to a layer. Layers are ordered left to
/// right; nodes within a layer keep input order.
pub(super) fn layers(graph: &DiagramGraph<'_>) -> Vec<Vec<NodeIndex>> {
    let count = graph.node_count();
    let mut in_degree: Vec<usize> = graph.node_indices().map(|n| graph.in_degree(n)).collect();
    let mut placed = vec![false; count];
    let mut placed_count = 0;
    let mut cursor = 0;

    let mut frontier: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|n| in_degree[n.index()] == 0)
        .collect();
    let mut layers = Vec::new();

    while placed_count < count {
        let layer = if frontier.is_empty() {
            while placed[cursor] {
                cursor += 1;
            }
            let forced = NodeIndex::new(cursor);
            debug!(
                block:% = graph.block(forced).id(),
                layer = layers.len();
                "Breaking cycle by forcing block into its own layer"
            );
            vec![forced]
        } else {
            mem::take(&mut frontier)
        };

        for node in &layer {
            placed[node.index()] = true;
        }
        placed_count += layer.len();

        let mut next = Vec::new();
        for &node in &layer {
            for successor in graph.successors(node) {
                let degree = &mut in_degree[successor.index()];
                if *degree == 0 {
                    continue;
                }
                *degree -= 1;
                if *degree == 0 && !placed[successor.index()] {
                    next.push(successor);
                }
            }
        }
        next.sort_unstable();
        frontier = next;

        layers.push(layer);
    }

    layers
}

/// Places each layer in its own column and stacks its blocks top to bottom.
pub(super) fn layout(graph: &DiagramGraph<'_>, spacing: Spacing) -> Layout {
    let layers = layers(graph);
    let mut cells = vec![Point::default(); graph.node_count()];
    let mut layer_ids: Vec<Vec<BlockId>> = Vec::with_capacity(layers.len());

    for (column, layer) in layers.iter().enumerate() {
        for (row, node) in layer.iter().enumerate() {
            cells[node.index()] = spacing.cell(column, row);
        }
        layer_ids.push(layer.iter().map(|&n| graph.block(n).id()).collect());
    }

    // Positions follow block input order regardless of layer order.
    let positions: IndexMap<_, _> = graph
        .node_indices()
        .map(|n| (graph.block(n).id(), cells[n.index()]))
        .collect();

    debug!(layers = layer_ids.len(); "Layered layout computed");

    Layout {
        mode: LayoutMode::Layered,
        positions,
        layers: layer_ids,
    }
}
