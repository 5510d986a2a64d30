// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Editable stage graph
//!
//! `FlowGraph` owns the node/edge collection of one editing session.
//! All mutation goes through bulk insert from a parse, single append,
//! manual connect, explicit deletion, or reset; each mutation re-runs
//! the sequencer so auto-edges and order labels stay consistent.

use serde::{Deserialize, Serialize};

use crate::stage::{Stage, StageKind, StageRecord};

use super::sequencer;

/// Id of the session's initial `start` node
pub const START_NODE_ID: &str = "start";

/// Canvas position of the `start` node
pub const START_POSITION: Position = Position { x: 50.0, y: 80.0 };

// Vertical layout used for parsed and appended nodes
const LAYOUT_X: f64 = 100.0;
const LAYOUT_Y_BASE: f64 = 200.0;
const LAYOUT_Y_STEP: f64 = 120.0;

/// 2-D canvas position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A stage wrapped with a session-unique id and a position
///
/// The position is user-mutable; the stage data is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub position: Position,
    pub data: StageRecord,
}

/// Edge arrowhead marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowHead {
    #[default]
    #[serde(rename = "arrowclosed")]
    Closed,
}

/// A directed edge between two nodes
///
/// At most one edge exists per ordered (source, target) pair. The
/// label is owned by the sequencer: it holds the 1-based main-path
/// position, or nothing for branches, cycles and disconnected edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub animated: bool,
    #[serde(rename = "markerEnd")]
    pub marker_end: ArrowHead,
}

impl GraphEdge {
    /// Animated, arrow-terminated edge, as both the auto-edge rule and
    /// manual connection create them
    pub(crate) fn animated(source: String, target: String) -> Self {
        Self {
            id: format!("edge-{source}-{target}"),
            source,
            target,
            label: None,
            animated: true,
            marker_end: ArrowHead::Closed,
        }
    }
}

/// The editing session's node/edge collection
#[derive(Debug, Clone, Serialize)]
pub struct FlowGraph {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) edges: Vec<GraphEdge>,
    #[serde(skip)]
    counter: u64,
}

impl FlowGraph {
    /// A fresh graph: exactly one `start` node, zero edges
    pub fn new() -> Self {
        Self {
            nodes: vec![GraphNode {
                id: START_NODE_ID.to_string(),
                position: START_POSITION,
                data: StageRecord::labeled(Stage::Start, "Start"),
            }],
            edges: Vec::new(),
            counter: 0,
        }
    }

    /// Restore the initial state, regardless of prior graph size
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The unique `start` node; first by insertion order if several
    pub fn start_node(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.data.kind() == StageKind::Start)
    }

    /// Replace the graph contents with a freshly parsed sequence
    ///
    /// The existing `start` node survives in place; everything else is
    /// dropped before the records are appended in order, auto-chained
    /// by the sequencer. Records of kind `start` are skipped, the
    /// session already has one.
    pub fn load_stages(&mut self, records: &[StageRecord]) {
        let start = self
            .start_node()
            .cloned()
            .unwrap_or_else(|| GraphNode {
                id: START_NODE_ID.to_string(),
                position: START_POSITION,
                data: StageRecord::labeled(Stage::Start, "Start"),
            });
        self.nodes = vec![start];
        self.edges.clear();

        let mut appended = 0usize;
        for record in records {
            if record.kind() == StageKind::Start {
                continue;
            }
            let position = Position {
                x: LAYOUT_X,
                y: LAYOUT_Y_BASE + appended as f64 * LAYOUT_Y_STEP,
            };
            self.push_node(record.clone(), position);
            appended += 1;
        }

        sequencer::resequence(self);
    }

    /// Append one stage, auto-connected to the previously appended
    /// node; returns the assigned node id
    pub fn add_stage(&mut self, record: StageRecord, position: Option<Position>) -> String {
        let position = position.unwrap_or(Position {
            x: LAYOUT_X,
            y: LAYOUT_Y_BASE + self.nodes.len() as f64 * LAYOUT_Y_STEP,
        });
        let id = self.push_node(record, position);
        sequencer::resequence(self);
        id
    }

    /// Manually connect two nodes
    ///
    /// No-op when either endpoint is missing or an edge for the
    /// ordered pair already exists; returns whether an edge was added.
    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        if self.node(source).is_none() || self.node(target).is_none() {
            return false;
        }
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return false;
        }
        self.edges
            .push(GraphEdge::animated(source.to_string(), target.to_string()));
        sequencer::resequence(self);
        true
    }

    /// Remove a node and its incident edges
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        sequencer::resequence(self);
        true
    }

    /// Remove an edge by id
    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        if self.edges.len() == before {
            return false;
        }
        sequencer::resequence(self);
        true
    }

    /// Move a node; stage data is untouched
    pub fn set_position(&mut self, id: &str, position: Position) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    // Append a node and run the auto-edge rule; labeling is the
    // caller's responsibility
    fn push_node(&mut self, record: StageRecord, position: Position) -> String {
        self.counter += 1;
        let id = format!("{}-{}", record.kind().as_str(), self.counter);
        self.nodes.push(GraphNode {
            id: id.clone(),
            position,
            data: record,
        });
        sequencer::auto_connect_last(self);
        id
    }
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{self, Dialect};

    fn record(stage: Stage) -> StageRecord {
        StageRecord::new(stage)
    }

    #[test]
    fn test_new_graph_is_start_only() {
        let graph = FlowGraph::new();
        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.nodes()[0].id, START_NODE_ID);
        assert_eq!(graph.nodes()[0].data.stage, Stage::Start);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_append_auto_connects_to_previous() {
        let mut graph = FlowGraph::new();
        let a = graph.add_stage(record(Stage::BuildNpm), None);
        let b = graph.add_stage(record(Stage::BuildJava), None);

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[0].source, START_NODE_ID);
        assert_eq!(graph.edges()[0].target, a);
        assert_eq!(graph.edges()[1].source, a);
        assert_eq!(graph.edges()[1].target, b);
        assert!(graph.edges().iter().all(|e| e.animated));
    }

    #[test]
    fn test_no_duplicate_edge_per_ordered_pair() {
        let mut graph = FlowGraph::new();
        let a = graph.add_stage(record(Stage::BuildNpm), None);

        assert!(!graph.connect(START_NODE_ID, &a));
        assert_eq!(graph.edges().len(), 1);

        // Reverse direction is a different ordered pair
        assert!(graph.connect(&a, START_NODE_ID));
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn test_connect_unknown_endpoint_is_noop() {
        let mut graph = FlowGraph::new();
        assert!(!graph.connect(START_NODE_ID, "ghost-99"));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_load_stages_from_parse() {
        let stages = parser::parse("npm ci\nnpm test\nnpm run build", Dialect::Shell);
        let mut graph = FlowGraph::new();
        graph.load_stages(&stages);

        // start survives, parsed start record is skipped
        assert_eq!(graph.nodes().len(), 4);
        assert_eq!(graph.nodes()[0].id, START_NODE_ID);
        assert_eq!(graph.edges().len(), 3);

        // Vertical layout
        assert_eq!(graph.nodes()[1].position, Position { x: 100.0, y: 200.0 });
        assert_eq!(graph.nodes()[2].position, Position { x: 100.0, y: 320.0 });
    }

    #[test]
    fn test_load_stages_replaces_previous_content() {
        let mut graph = FlowGraph::new();
        graph.add_stage(record(Stage::BuildJava), None);
        graph.add_stage(record(Stage::BuildPython), None);

        let stages = parser::parse("npm ci", Dialect::Shell);
        graph.load_stages(&stages);

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_node_ids_are_unique_across_loads() {
        let mut graph = FlowGraph::new();
        let first = graph.add_stage(record(Stage::BuildNpm), None);
        graph.load_stages(&parser::parse("npm run build", Dialect::Shell));
        let second = &graph.nodes()[1].id;
        assert_ne!(&first, second);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = FlowGraph::new();
        let a = graph.add_stage(record(Stage::BuildNpm), None);
        let b = graph.add_stage(record(Stage::BuildJava), None);

        assert!(graph.remove_node(&a));
        assert_eq!(graph.nodes().len(), 2);
        assert!(graph
            .edges()
            .iter()
            .all(|e| e.source != a && e.target != a));
        assert!(graph.node(&b).is_some());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut graph = FlowGraph::new();
        graph.load_stages(&parser::parse(
            "git clone https://x/y.git\nnpm ci\nnpm test\ndocker build .",
            Dialect::Shell,
        ));
        graph.reset();

        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.nodes()[0].data.stage, Stage::Start);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_set_position_moves_node_only() {
        let mut graph = FlowGraph::new();
        let a = graph.add_stage(record(Stage::BuildNpm), None);
        let data_before = graph.node(&a).unwrap().data.clone();

        assert!(graph.set_position(&a, Position { x: 1.0, y: 2.0 }));
        let node = graph.node(&a).unwrap();
        assert_eq!(node.position, Position { x: 1.0, y: 2.0 });
        assert_eq!(node.data, data_before);

        assert!(!graph.set_position("ghost-1", Position { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn test_graph_serializes_nodes_and_edges() {
        let mut graph = FlowGraph::new();
        graph.add_stage(record(Stage::BuildNpm), None);
        let json = serde_json::to_value(&graph).unwrap();
        assert!(json["nodes"].is_array());
        assert!(json["edges"].is_array());
        assert_eq!(json["edges"][0]["markerEnd"], "arrowclosed");
    }
}
