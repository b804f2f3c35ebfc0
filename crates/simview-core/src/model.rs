//! Diagram data model.
//!
//! These types mirror the `diagram` object returned by the conversion
//! service:
//!
//! ```json
//! {
//!   "blocks": [{"id": "1", "type": "Inport", "name": "In1", "x": 0.0, "y": 0.0}],
//!   "connections": [{"from": "1", "to": "2"}]
//! }
//! ```
//!
//! Decoding is lenient: coordinates may be missing or `null`, a missing name
//! becomes `Block_<id>`, and a missing type becomes the empty string (which
//! later resolves to the fallback style).

use log::trace;
use serde::Deserialize;

use crate::{geometry::Point, identifier::BlockId};

/// A node in the diagram graph representing one computational unit of the
/// converted model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBlock")]
pub struct Block {
    id: BlockId,
    block_type: String,
    name: String,
    x: Option<f32>,
    y: Option<f32>,
}

impl Block {
    /// Creates a block without source coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use simview_core::model::Block;
    ///
    /// let gain = Block::new("2", "Gain", "K").with_position(120.0, 45.0);
    /// assert_eq!(gain.block_type(), "Gain");
    /// assert!(gain.has_coordinates());
    /// ```
    pub fn new(
        id: impl Into<BlockId>,
        block_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            name: name.into(),
            x: None,
            y: None,
        }
    }

    /// Sets the source coordinates reported by the conversion service.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Returns the block identifier
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Returns the block type label, e.g. `Gain` or `Inport`
    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the supplied source coordinates.
    ///
    /// Absent and non-finite coordinates read as `0.0`.
    pub fn coordinates(&self) -> Point {
        let usable = |value: Option<f32>| value.filter(|v| v.is_finite()).unwrap_or(0.0);
        Point::new(usable(self.x), usable(self.y))
    }

    /// Returns true if the block carries at least one non-zero source coordinate.
    pub fn has_coordinates(&self) -> bool {
        !self.coordinates().is_zero()
    }
}

/// Wire shape of a block before defaults are applied.
#[derive(Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(default, rename = "type")]
    block_type: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let name = match raw.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                trace!(id:% = raw.id; "Block has no name, using generated one");
                format!("Block_{}", raw.id)
            }
        };

        Self {
            id: raw.id,
            block_type: raw.block_type,
            name,
            x: raw.x,
            y: raw.y,
        }
    }
}

/// A directed edge from one block's output to another block's input.
///
/// Multiple connections between the same pair and self-loops are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Connection {
    from: BlockId,
    to: BlockId,
}

impl Connection {
    pub fn new(from: impl Into<BlockId>, to: impl Into<BlockId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns the source block identifier
    pub fn source(&self) -> BlockId {
        self.from
    }

    /// Returns the target block identifier
    pub fn target(&self) -> BlockId {
        self.to
    }

    /// Returns true if the connection starts and ends at the same block
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Blocks and connections of one converted model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    blocks: Vec<Block>,
    #[serde(default)]
    connections: Vec<Connection>,
}

impl Diagram {
    pub fn new(blocks: Vec<Block>, connections: Vec<Connection>) -> Self {
        Self {
            blocks,
            connections,
        }
    }

    /// Returns the blocks in the order the service reported them
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the connections in the order the service reported them
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns true if there is nothing to render
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_block_with_coordinates() {
        let block: Block =
            serde_json::from_str(r#"{"id": "3", "type": "Gain", "name": "K", "x": 120.5, "y": 40}"#)
                .unwrap();

        assert_eq!(block.id(), BlockId::new("3"));
        assert_eq!(block.block_type(), "Gain");
        assert_eq!(block.name(), "K");
        assert_eq!(block.coordinates(), Point::new(120.5, 40.0));
        assert!(block.has_coordinates());
    }

    #[test]
    fn test_decode_block_defaults() {
        let block: Block = serde_json::from_str(r#"{"id": 9, "x": null}"#).unwrap();

        assert_eq!(block.block_type(), "");
        assert_eq!(block.name(), "Block_9");
        assert!(block.coordinates().is_zero());
        assert!(!block.has_coordinates());
    }

    #[test]
    fn test_zero_coordinates_are_not_supplied() {
        let block = Block::new("1", "Inport", "In1").with_position(0.0, 0.0);
        assert!(!block.has_coordinates());

        let block = Block::new("1", "Inport", "In1").with_position(0.0, 12.0);
        assert!(block.has_coordinates());
    }

    #[test]
    fn test_non_finite_coordinates_read_as_zero() {
        let block = Block::new("1", "Inport", "In1").with_position(f32::NAN, f32::INFINITY);
        assert!(block.coordinates().is_zero());
        assert!(!block.has_coordinates());
    }

    #[test]
    fn test_decode_diagram() {
        let diagram: Diagram = serde_json::from_str(
            r#"{
                "blocks": [
                    {"id": 1, "type": "Inport", "name": "In1"},
                    {"id": "2", "type": "Gain", "name": "K"}
                ],
                "connections": [{"from": 1, "to": "2"}, {"from": "2", "to": "2"}]
            }"#,
        )
        .unwrap();

        assert_eq!(diagram.blocks().len(), 2);
        assert_eq!(diagram.connections()[0], Connection::new("1", "2"));
        assert!(diagram.connections()[1].is_self_loop());
    }

    #[test]
    fn test_decode_empty_diagram() {
        let diagram: Diagram = serde_json::from_str("{}").unwrap();
        assert!(diagram.is_empty());
        assert!(diagram.connections().is_empty());
    }
}
