//! Directed graph view of a diagram.
//!
//! [`DiagramGraph`] turns the flat block and connection lists into a petgraph
//! multigraph. Node indices follow the input order of the blocks, which the
//! layout engines rely on for deterministic tie-breaking.

use std::collections::{HashMap, hash_map::Entry};

use log::debug;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use simview_core::{
    identifier::BlockId,
    model::{Block, Connection},
};

/// Directed multigraph of blocks and the connections between them.
///
/// - One node per distinct block id; a repeated id keeps its first occurrence.
/// - One edge per connection whose endpoints both exist. Parallel edges and
///   self-loops are kept.
#[derive(Debug)]
pub struct DiagramGraph<'a> {
    graph: DiGraph<&'a Block, ()>,
    dropped_connections: usize,
    duplicate_blocks: usize,
}

impl<'a> DiagramGraph<'a> {
    /// Builds the graph from blocks and connections.
    ///
    /// Connections that reference unknown block ids are skipped and counted.
    pub fn new(blocks: &'a [Block], connections: &[Connection]) -> Self {
        let mut graph = DiGraph::with_capacity(blocks.len(), connections.len());
        let mut indices: HashMap<BlockId, NodeIndex> = HashMap::with_capacity(blocks.len());
        let mut duplicate_blocks = 0;

        for block in blocks {
            match indices.entry(block.id()) {
                Entry::Vacant(entry) => {
                    entry.insert(graph.add_node(block));
                }
                Entry::Occupied(_) => {
                    debug!(block:% = block.id(); "Ignoring block with duplicate id");
                    duplicate_blocks += 1;
                }
            }
        }

        let mut dropped_connections = 0;
        for connection in connections {
            match (
                indices.get(&connection.source()),
                indices.get(&connection.target()),
            ) {
                (Some(&source), Some(&target)) => {
                    graph.add_edge(source, target, ());
                }
                _ => {
                    debug!(
                        from:% = connection.source(),
                        to:% = connection.target();
                        "Ignoring connection with unknown endpoint"
                    );
                    dropped_connections += 1;
                }
            }
        }

        Self {
            graph,
            dropped_connections,
            duplicate_blocks,
        }
    }

    /// Returns the number of distinct blocks
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of connections kept in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns node indices in block input order
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Returns the block stored at `index`
    pub fn block(&self, index: NodeIndex) -> &'a Block {
        self.graph[index]
    }

    /// Returns distinct blocks in input order
    pub fn blocks(&self) -> impl Iterator<Item = &'a Block> + '_ {
        self.graph.node_weights().copied()
    }

    /// Returns the number of incoming connections, counting parallel edges
    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .count()
    }

    /// Returns the target of each outgoing connection, once per connection
    pub fn successors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(index, Direction::Outgoing)
    }

    /// Returns how many connections referenced unknown blocks
    pub fn dropped_connections(&self) -> usize {
        self.dropped_connections
    }

    /// Returns how many blocks were ignored because their id repeated
    pub fn duplicate_blocks(&self) -> usize {
        self.duplicate_blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str) -> Block {
        Block::new(id, "Gain", id)
    }

    #[test]
    fn test_nodes_follow_input_order() {
        let blocks = vec![block("c"), block("a"), block("b")];
        let graph = DiagramGraph::new(&blocks, &[]);

        let ids: Vec<_> = graph.blocks().map(|b| b.id().to_string()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_dangling_connections_are_dropped() {
        let blocks = vec![block("a"), block("b")];
        let connections = vec![
            Connection::new("a", "b"),
            Connection::new("a", "missing"),
            Connection::new("ghost", "b"),
        ];
        let graph = DiagramGraph::new(&blocks, &connections);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.dropped_connections(), 2);
        assert_eq!(graph.in_degree(NodeIndex::new(1)), 1);
    }

    #[test]
    fn test_parallel_edges_and_self_loops_count() {
        let blocks = vec![block("a"), block("b")];
        let connections = vec![
            Connection::new("a", "b"),
            Connection::new("a", "b"),
            Connection::new("b", "b"),
        ];
        let graph = DiagramGraph::new(&blocks, &connections);

        assert_eq!(graph.in_degree(NodeIndex::new(1)), 3);
        assert_eq!(graph.successors(NodeIndex::new(0)).count(), 2);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let blocks = vec![
            Block::new("a", "Inport", "first"),
            Block::new("a", "Outport", "second"),
        ];
        let graph = DiagramGraph::new(&blocks, &[]);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.duplicate_blocks(), 1);
        assert_eq!(graph.block(NodeIndex::new(0)).name(), "first");
    }
}
