//! Dialogue Graph - the live node and edge store an editing session mutates.
//!
//! The store owns three invariants:
//! - exactly one entry node, which cannot be removed, moved or re-ported
//! - every edge runs from an output port to an input port on a different node
//! - a single-capacity output carries at most one edge

mod error;
mod ports;

pub use error::*;

use std::collections::HashMap;
use tracing::debug;

use dialogue_model::{Capacity, DialogueNode, Edge, EdgeId, EditorConfig, Layout, NodeId, PortId, Rect};

/// The in-memory dialogue graph.
#[derive(Debug, Clone)]
pub struct DialogueGraph {
    /// All nodes stored by ID.
    nodes: HashMap<NodeId, DialogueNode>,

    /// Node IDs in creation order.
    node_order: Vec<NodeId>,

    /// Edges in creation order.
    edges: Vec<Edge>,

    /// Reverse index: port -> owning node.
    port_owner: HashMap<PortId, NodeId>,

    entry: Option<NodeId>,
    layout: Layout,
}

impl Default for DialogueGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueGraph {
    /// Create a new graph holding only the entry node.
    pub fn new() -> Self {
        Self::with_layout(Layout::default())
    }

    /// Create a new graph using the layout from an editor config.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self::with_layout(config.layout)
    }

    /// Create a new graph holding only the entry node, placed per `layout`.
    pub fn with_layout(layout: Layout) -> Self {
        let mut graph = Self::empty(layout);
        let entry = DialogueNode::entry(NodeId::new(), layout.entry);
        graph.insert_node(entry);
        graph
    }

    /// A graph with no nodes at all, not even an entry. Only the reconstructor
    /// starts from here, and it installs the entry node itself.
    pub(crate) fn empty(layout: Layout) -> Self {
        Self {
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: Vec::new(),
            port_owner: HashMap::new(),
            entry: None,
            layout,
        }
    }

    /// Default placements used for new nodes.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    fn insert_node(&mut self, node: DialogueNode) -> NodeId {
        let id = node.id.clone();
        for port in node.ports() {
            self.port_owner.insert(port.id, id.clone());
        }
        if node.is_entry {
            self.entry = Some(id.clone());
        }
        self.node_order.push(id.clone());
        self.nodes.insert(id.clone(), node);
        id
    }

    fn fresh_id(&self) -> NodeId {
        let mut id = NodeId::new();
        while self.nodes.contains_key(&id) {
            id = NodeId::new();
        }
        id
    }

    /// Add a dialogue node whose title and text are both `text`.
    ///
    /// The node gets one input port and no outputs.
    pub fn create_node(&mut self, text: impl Into<String>) -> NodeId {
        let node = DialogueNode::new(self.fresh_id(), text, self.layout.node);
        debug!(node = %node.id, text = %node.text, "created dialogue node");
        self.insert_node(node)
    }

    /// Add the entry node, reusing `id` when given.
    ///
    /// Fails if the graph already has an entry node or the id is taken.
    pub fn create_entry_node(&mut self, id: Option<NodeId>) -> Result<NodeId, GraphError> {
        if let Some(existing) = &self.entry {
            return Err(GraphError::EntryNodeExists(existing.clone()));
        }
        let id = match id {
            Some(id) if self.nodes.contains_key(&id) => {
                return Err(GraphError::DuplicateNodeId(id));
            }
            Some(id) => id,
            None => self.fresh_id(),
        };
        debug!(node = %id, "created entry node");
        Ok(self.insert_node(DialogueNode::entry(id, self.layout.entry)))
    }

    /// Replace a node's id, re-keying its ports and any edges touching it.
    pub(crate) fn rekey_node(&mut self, old: &NodeId, new: NodeId) -> Result<(), GraphError> {
        if old == &new {
            return Ok(());
        }
        if self.nodes.contains_key(&new) {
            return Err(GraphError::DuplicateNodeId(new));
        }
        let mut node = self
            .nodes
            .remove(old)
            .ok_or_else(|| GraphError::NodeNotFound(old.clone()))?;
        node.set_id(new.clone());

        for port in node.ports() {
            self.port_owner.insert(port.id, new.clone());
        }
        for slot in self.node_order.iter_mut().filter(|slot| **slot == *old) {
            *slot = new.clone();
        }
        for edge in &mut self.edges {
            if &edge.source == old {
                edge.source = new.clone();
            }
            if &edge.target == old {
                edge.target = new.clone();
            }
        }
        if self.entry.as_ref() == Some(old) {
            self.entry = Some(new.clone());
        }

        self.nodes.insert(new, node);
        Ok(())
    }

    /// Remove a node together with every edge touching it.
    ///
    /// The entry node is not deletable.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<DialogueNode, GraphError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        if !node.deletable {
            return Err(GraphError::EntryNodeProtected {
                node: id.clone(),
                action: "removed",
            });
        }

        // Incoming edges first, then whatever still leaves the node
        self.edges.retain(|e| &e.target != id);
        self.edges.retain(|e| &e.source != id);

        self.port_owner.retain(|_, owner| owner != id);
        self.node_order.retain(|n| n != id);
        let removed = self
            .nodes
            .remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        debug!(node = %id, "removed dialogue node");
        Ok(removed)
    }

    /// Change a node's dialogue text. The title follows the text.
    pub fn set_node_text(&mut self, id: &NodeId, text: impl Into<String>) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        if node.is_entry {
            return Err(GraphError::EntryNodeProtected {
                node: id.clone(),
                action: "edited",
            });
        }
        let text = text.into();
        node.title = text.clone();
        node.text = text;
        Ok(())
    }

    /// Move a node. Pinned nodes refuse.
    pub fn set_position(&mut self, id: &NodeId, position: Rect) -> Result<(), GraphError> {
        require_finite(id, position)?;
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        if !node.movable {
            return Err(GraphError::EntryNodeProtected {
                node: id.clone(),
                action: "moved",
            });
        }
        node.position = position;
        Ok(())
    }

    /// Place a node regardless of its capability flags.
    pub(crate) fn place_node(&mut self, id: &NodeId, position: Rect) -> Result<(), GraphError> {
        require_finite(id, position)?;
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        node.position = position;
        Ok(())
    }

    /// Connect an output port to an input port on another node.
    ///
    /// An output port holds a single edge, so any edge it already carries is replaced.
    pub fn connect(&mut self, source_port: PortId, target_port: PortId) -> Result<EdgeId, GraphError> {
        let source = self.require_port_owner(source_port)?.clone();
        let target = self.require_port_owner(target_port)?.clone();
        if source == target {
            return Err(GraphError::SelfConnection(source));
        }

        let (source_is_output, source_capacity) = self
            .port(source_port)
            .map(|p| (p.is_output(), p.capacity))
            .unwrap_or((false, Capacity::Multi));
        if !source_is_output {
            return Err(GraphError::DirectionMismatch {
                port: source_port,
                expected: dialogue_model::Direction::Output,
            });
        }
        let target_is_input = self.port(target_port).map(|p| p.is_input()).unwrap_or(false);
        if !target_is_input {
            return Err(GraphError::DirectionMismatch {
                port: target_port,
                expected: dialogue_model::Direction::Input,
            });
        }

        if source_capacity == Capacity::Single {
            let replaced = self.edges.len();
            self.edges.retain(|e| e.source_port != source_port);
            if self.edges.len() != replaced {
                debug!(port = %source_port, "replaced existing edge on single-capacity port");
            }
        }

        let edge = Edge::new(source, source_port, target, target_port);
        let id = edge.id;
        debug!(edge = %id, source = %edge.source, target = %edge.target, "connected nodes");
        self.edges.push(edge);
        Ok(id)
    }

    /// Detach an edge from both its ports and drop it.
    pub fn disconnect(&mut self, id: EdgeId) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        let edge = self.edges.remove(index);
        debug!(edge = %id, "disconnected edge");
        Some(edge)
    }

    /// Remove every node except the entry node, and every edge.
    pub fn clear(&mut self) {
        let entry = self.entry.clone();
        self.edges.clear();
        self.nodes.retain(|id, _| Some(id) == entry.as_ref());
        self.node_order.retain(|id| Some(id) == entry.as_ref());
        self.port_owner.retain(|_, owner| Some(&*owner) == entry.as_ref());
        debug!("cleared dialogue graph");
    }

    /// Get a node by ID.
    pub fn node(&self, id: &NodeId) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    /// The entry node. Always present outside of reconstruction.
    pub fn entry_node(&self) -> Option<&DialogueNode> {
        self.entry.as_ref().and_then(|id| self.nodes.get(id))
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &DialogueNode> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Edges leaving a node.
    pub fn edges_from<'a>(&'a self, node: &NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        let node = node.clone();
        self.edges.iter().filter(move |e| e.source == node)
    }

    /// Edges arriving at a node.
    pub fn edges_into<'a>(&'a self, node: &NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        let node = node.clone();
        self.edges.iter().filter(move |e| e.target == node)
    }

    /// The edge leaving through an output port, if any.
    pub fn edge_on_port(&self, port: PortId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.source_port == port)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if a node with this ID exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }
}

fn require_finite(id: &NodeId, position: Rect) -> Result<(), GraphError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(GraphError::InvalidPosition {
            node: id.clone(),
            position,
        })
    }
}
