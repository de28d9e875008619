//! Serializer - flattens a live graph into a save record.

use tracing::warn;

use dialogue_model::{EdgeRecord, NodeRecord, SaveRecord};

use crate::graph::DialogueGraph;

/// Flatten a graph into its id-referenced save record.
///
/// Nothing is validated; an inconsistent graph serializes its inconsistency.
pub fn serialize(graph: &DialogueGraph) -> SaveRecord {
    let nodes = graph
        .nodes()
        .map(|node| NodeRecord {
            position: node.position,
            is_entry: node.is_entry,
            text: node.text.clone(),
            id: node.id.clone(),
        })
        .collect();

    let edges = graph
        .edges()
        .map(|edge| {
            let port_name = graph
                .node(&edge.source)
                .and_then(|node| node.output(edge.source_port))
                .map(|port| port.name.clone())
                .unwrap_or_else(|| {
                    warn!(edge = %edge.id, source = %edge.source, "edge source port not found, saving empty port name");
                    String::new()
                });
            EdgeRecord {
                source_id: edge.source.clone(),
                target_id: edge.target.clone(),
                port_name,
            }
        })
        .collect();

    SaveRecord { nodes, edges }
}

impl DialogueGraph {
    /// Flatten this graph into a save record.
    pub fn to_record(&self) -> SaveRecord {
        serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogue_model::NodeId;

    #[test]
    fn test_serialize_fresh_graph() {
        let graph = DialogueGraph::new();
        let record = serialize(&graph);

        assert_eq!(record.nodes.len(), 1);
        assert!(record.nodes[0].is_entry);
        assert_eq!(record.nodes[0].text, "ENTRYPOINT");
        assert!(record.edges.is_empty());
    }

    #[test]
    fn test_serialize_uses_port_names() {
        let mut graph = DialogueGraph::new();
        let entry = graph.entry_node().unwrap().id.clone();
        let next = graph.entry_node().unwrap().outputs[0].id;
        let b = graph.create_node("Hello");
        let c = graph.create_node("Bye");
        let b_in = graph.node(&b).unwrap().input.as_ref().unwrap().id;
        let c_in = graph.node(&c).unwrap().input.as_ref().unwrap().id;
        let leave = graph.add_output_port(&b, Some("Leave")).unwrap();
        graph.connect(next, b_in).unwrap();
        graph.connect(leave, c_in).unwrap();

        let record = graph.to_record();

        assert_eq!(record.nodes.len(), 3);
        assert_eq!(
            record.sorted_edges(),
            {
                let mut expected = vec![
                    EdgeRecord::new(entry.clone(), b.clone(), "next"),
                    EdgeRecord::new(b.clone(), c.clone(), "Leave"),
                ];
                expected.sort();
                expected
            }
        );
        let saved_b = record.node(&b).unwrap();
        assert_eq!(saved_b.text, "Hello");
        assert!(!saved_b.is_entry);
        assert!(record.node(&NodeId::from("missing")).is_none());
    }

    #[test]
    fn test_unconnected_ports_are_not_saved() {
        let mut graph = DialogueGraph::new();
        let b = graph.create_node("B");
        graph.add_output_port(&b, None).unwrap();

        let record = graph.to_record();
        assert!(record.edges.is_empty());
    }
}
