//! Dialogue node definitions.

use serde::{Deserialize, Serialize};

use super::{NodeId, Port, PortId};
use crate::layout::Rect;

/// A single unit of dialogue in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: NodeId,
    pub is_entry: bool,

    /// Display title. Mirrors `text` for regular nodes.
    pub title: String,
    pub text: String,
    pub position: Rect,

    /// Multi-capacity input socket; the entry node has none.
    pub input: Option<Port>,

    /// Output sockets in creation order.
    pub outputs: Vec<Port>,

    // Capability flags
    pub deletable: bool,
    pub movable: bool,
}

impl DialogueNode {
    /// Title shown on the entry node.
    pub const ENTRY_TITLE: &'static str = "START";
    /// Text carried by the entry node.
    pub const ENTRY_TEXT: &'static str = "ENTRYPOINT";
    /// Name of the entry node's only output.
    pub const ENTRY_PORT_NAME: &'static str = "next";

    /// Create a regular dialogue node with an input socket and no outputs.
    pub fn new(id: NodeId, text: impl Into<String>, position: Rect) -> Self {
        let text = text.into();
        Self {
            input: Some(Port::input(id.clone())),
            id,
            is_entry: false,
            title: text.clone(),
            text,
            position,
            outputs: Vec::new(),
            deletable: true,
            movable: true,
        }
    }

    /// Create the entry node: one `"next"` output, no input, pinned in place.
    pub fn entry(id: NodeId, position: Rect) -> Self {
        Self {
            outputs: vec![Port::output(id.clone(), Self::ENTRY_PORT_NAME)],
            id,
            is_entry: true,
            title: Self::ENTRY_TITLE.to_string(),
            text: Self::ENTRY_TEXT.to_string(),
            position,
            input: None,
            deletable: false,
            movable: false,
        }
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Get an output port by handle.
    pub fn output(&self, port: PortId) -> Option<&Port> {
        self.outputs.iter().find(|p| p.id == port)
    }

    /// Get the first output port carrying the given name.
    pub fn output_named(&self, name: &str) -> Option<&Port> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Iterate over every port on this node, input first.
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.input.iter().chain(self.outputs.iter())
    }

    /// Get any port (input or output) by handle.
    pub fn port(&self, port: PortId) -> Option<&Port> {
        self.ports().find(|p| p.id == port)
    }

    /// Re-key the node and every port it owns.
    pub fn set_id(&mut self, id: NodeId) {
        if let Some(input) = self.input.as_mut() {
            input.node = id.clone();
        }
        for output in &mut self.outputs {
            output.node = id.clone();
        }
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = DialogueNode::new(NodeId::new(), "Hello", Rect::default());
        assert_eq!(node.title, "Hello");
        assert_eq!(node.text, "Hello");
        assert!(!node.is_entry);
        assert!(node.has_input());
        assert!(node.outputs.is_empty());
        assert!(node.deletable && node.movable);
    }

    #[test]
    fn test_entry_node() {
        let node = DialogueNode::entry(NodeId::from("A"), Rect::default());
        assert!(node.is_entry);
        assert!(!node.has_input());
        assert!(!node.deletable);
        assert!(!node.movable);
        assert_eq!(node.title, "START");
        assert_eq!(node.text, "ENTRYPOINT");
        assert_eq!(node.outputs.len(), 1);
        assert!(node.output_named("next").is_some());
    }

    #[test]
    fn test_set_id_rekeys_ports() {
        let mut node = DialogueNode::new(NodeId::new(), "Hi", Rect::default());
        node.outputs.push(Port::output(node.id.clone(), "Output 0"));

        node.set_id(NodeId::from("saved"));

        assert_eq!(node.id, NodeId::from("saved"));
        assert!(node.ports().all(|p| p.node == NodeId::from("saved")));
    }
}
