// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Stage graph and sequencing
//!
//! The editable node/edge graph built from parsed stage sequences,
//! the sequencer that maintains auto-edges and main-path order
//! labels, and the diagram renderers.

mod model;
mod render;
mod sequencer;

pub use model::{
    ArrowHead, FlowGraph, GraphEdge, GraphNode, Position, START_NODE_ID, START_POSITION,
};
