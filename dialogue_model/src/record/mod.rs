//! The save record - the flat, id-referenced form a graph is persisted as.
//!
//! Field names are the external contract of the persistence format. Node and
//! edge lists are unordered sets; nodes are identified by `id`.

use serde::{Deserialize, Serialize};

use crate::entities::NodeId;
use crate::layout::Rect;

/// A persisted node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub position: Rect,
    pub is_entry: bool,
    pub text: String,
    pub id: NodeId,
}

/// A persisted edge. Ports are referenced by the source port's name, never by handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub port_name: String,
}

impl EdgeRecord {
    pub fn new(
        source_id: impl Into<NodeId>,
        target_id: impl Into<NodeId>,
        port_name: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            port_name: port_name.into(),
        }
    }
}

/// A complete serialized dialogue graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SaveRecord {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl SaveRecord {
    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Saved edges leaving the given node, with their index in `edges`, in record order.
    pub fn edges_from<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = (usize, &'a EdgeRecord)> + 'a {
        let id = id.clone();
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, edge)| edge.source_id == id)
    }

    /// The edge set in a canonical order, for order-insensitive comparison.
    pub fn sorted_edges(&self) -> Vec<EdgeRecord> {
        let mut edges = self.edges.clone();
        edges.sort();
        edges
    }
}
