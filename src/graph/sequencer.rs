// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Graph sequencer
//!
//! Keeps the visual sequence of the graph consistent as nodes and
//! edges mutate: synthesizes an edge between successively appended
//! nodes, and labels the edges of the single main path with their
//! 1-based position. A branch, cycle or missing `start` node halts
//! labeling without error; unlabeled edges stay in the graph.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

use crate::stage::StageKind;

use super::model::{FlowGraph, GraphEdge};

/// Auto-edge rule: connect the newest node to the one appended before
/// it, unless the new node is `start` or the edge already exists
pub(crate) fn auto_connect_last(graph: &mut FlowGraph) {
    let len = graph.nodes.len();
    if len < 2 {
        return;
    }
    let last = &graph.nodes[len - 1];
    if last.data.kind() == StageKind::Start {
        return;
    }
    let prev = &graph.nodes[len - 2];
    let (source, target) = (prev.id.clone(), last.id.clone());

    if graph
        .edges
        .iter()
        .any(|e| e.source == source && e.target == target)
    {
        return;
    }
    graph.edges.push(GraphEdge::animated(source, target));
}

/// Recompute all order labels from the current node/edge set
///
/// Full recomputation on every change; idempotent, and the write is
/// skipped when the recomputed labels equal the current ones.
pub(crate) fn resequence(graph: &mut FlowGraph) {
    let ordered = main_path(graph);

    let mut positions: HashMap<(&str, &str), usize> = HashMap::new();
    for (i, pair) in ordered.windows(2).enumerate() {
        positions.insert((pair[0].as_str(), pair[1].as_str()), i + 1);
    }

    let desired: Vec<Option<String>> = graph
        .edges
        .iter()
        .map(|e| {
            positions
                .get(&(e.source.as_str(), e.target.as_str()))
                .map(|n| n.to_string())
        })
        .collect();

    if graph
        .edges
        .iter()
        .zip(&desired)
        .all(|(e, label)| e.label == *label)
    {
        return;
    }
    for (edge, label) in graph.edges.iter_mut().zip(desired) {
        edge.label = label;
    }
}

/// The single linear chain of unique-successor edges from `start`
///
/// Walks forward while the current node has exactly one outgoing edge
/// and the successor has not been visited; returns the node ids in
/// visit order. No `start` node means an empty walk.
pub(crate) fn main_path(graph: &FlowGraph) -> Vec<String> {
    let Some(start) = graph.start_node() else {
        return Vec::new();
    };

    let mut adjacency: DiGraph<(), ()> = DiGraph::new();
    let mut index_of: HashMap<&str, NodeIndex> = HashMap::new();
    let mut id_of: HashMap<NodeIndex, &str> = HashMap::new();
    for node in &graph.nodes {
        let idx = adjacency.add_node(());
        index_of.insert(node.id.as_str(), idx);
        id_of.insert(idx, node.id.as_str());
    }
    for edge in &graph.edges {
        if let (Some(&s), Some(&t)) = (
            index_of.get(edge.source.as_str()),
            index_of.get(edge.target.as_str()),
        ) {
            adjacency.add_edge(s, t, ());
        }
    }

    let mut ordered = Vec::new();
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut cursor = index_of[start.id.as_str()];

    loop {
        if !visited.insert(cursor) {
            break;
        }
        ordered.push(id_of[&cursor].to_string());

        let mut successors = adjacency.neighbors_directed(cursor, Direction::Outgoing);
        let (Some(next), None) = (successors.next(), successors.next()) else {
            break;
        };
        cursor = next;
    }

    ordered
}
