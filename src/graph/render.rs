// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Graph output formats
//!
//! Renders a [`FlowGraph`] as an ordered text listing, a Mermaid
//! diagram or a DOT diagram. JSON output is plain serde of the graph.

use super::model::FlowGraph;
use super::sequencer;

impl FlowGraph {
    /// Text listing: the labeled main path in order, then anything
    /// outside it
    pub fn to_text(&self) -> String {
        let path = sequencer::main_path(self);
        let mut out = String::new();

        for (i, id) in path.iter().enumerate() {
            if let Some(node) = self.node(id) {
                out.push_str(&format!(
                    "{}. {} ({})\n",
                    i + 1,
                    node.data.display_label(),
                    node.data.kind()
                ));
            }
        }

        let stray: Vec<_> = self
            .nodes()
            .iter()
            .filter(|n| !path.contains(&n.id))
            .collect();
        if !stray.is_empty() {
            out.push_str("\nunsequenced:\n");
            for node in stray {
                out.push_str(&format!(
                    "  - {} ({})\n",
                    node.data.display_label(),
                    node.data.kind()
                ));
            }
        }

        let unlabeled: Vec<_> = self.edges().iter().filter(|e| e.label.is_none()).collect();
        if !unlabeled.is_empty() {
            out.push_str("\nunlabeled edges:\n");
            for edge in unlabeled {
                out.push_str(&format!("  {} -> {}\n", edge.source, edge.target));
            }
        }

        out
    }

    /// Generate a Mermaid diagram of the graph
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        for node in self.nodes() {
            out.push_str(&format!("    {}[{}]\n", node.id, node.data.display_label()));
        }

        for edge in self.edges() {
            match &edge.label {
                Some(label) => out.push_str(&format!(
                    "    {} -->|{}| {}\n",
                    edge.source, label, edge.target
                )),
                None => out.push_str(&format!("    {} --> {}\n", edge.source, edge.target)),
            }
        }

        out
    }

    /// Generate a DOT diagram of the graph
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for node in self.nodes() {
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\"];\n",
                node.id,
                node.data.display_label()
            ));
        }

        for edge in self.edges() {
            match &edge.label {
                Some(label) => out.push_str(&format!(
                    "    \"{}\" -> \"{}\" [label=\"{}\"];\n",
                    edge.source, edge.target, label
                )),
                None => out.push_str(&format!(
                    "    \"{}\" -> \"{}\";\n",
                    edge.source, edge.target
                )),
            }
        }

        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::FlowGraph;
    use crate::parser::{self, Dialect};

    fn sample_graph() -> FlowGraph {
        let stages = parser::parse("npm ci\nnpm test", Dialect::Shell);
        let mut graph = FlowGraph::new();
        graph.load_stages(&stages);
        graph
    }

    #[test]
    fn test_text_lists_main_path_in_order() {
        let text = sample_graph().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1. Start (start)");
        assert_eq!(lines[1], "2. Install Dependencies (prebuild_node)");
        assert_eq!(lines[2], "3. Run Tests (run_tests)");
        assert!(!text.contains("unsequenced"));
    }

    #[test]
    fn test_mermaid_carries_order_labels() {
        let mermaid = sample_graph().to_mermaid();
        assert!(mermaid.contains("graph TD"));
        assert!(mermaid.contains("start[Start]"));
        assert!(mermaid.contains("-->|1|"));
        assert!(mermaid.contains("-->|2|"));
    }

    #[test]
    fn test_dot_output() {
        let dot = sample_graph().to_dot();
        assert!(dot.contains("digraph pipeline"));
        assert!(dot.contains("[label=\"1\"]"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_text_marks_stray_nodes() {
        let mut graph = sample_graph();
        let last = graph.nodes().last().unwrap().id.clone();
        let edge = graph
            .edges()
            .iter()
            .find(|e| e.target == last)
            .unwrap()
            .id
            .clone();
        graph.remove_edge(&edge);

        let text = graph.to_text();
        assert!(text.contains("unsequenced:"));
        assert!(text.contains("Run Tests"));
    }
}
