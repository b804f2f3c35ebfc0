//! SimView Core Types and Definitions
//!
//! This crate provides the foundational types shared by the SimView crates:
//!
//! - **Identifiers**: Interned block identifiers ([`identifier::BlockId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Model**: Blocks, connections and diagrams as delivered by the
//!   conversion service ([`model`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod model;
