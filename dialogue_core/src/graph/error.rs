use dialogue_model::{Direction, NodeId, PortId, Rect};
use thiserror::Error;

/// Errors raised by graph mutations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' not found")]
    NodeNotFound(NodeId),

    #[error("Port '{0}' not found")]
    PortNotFound(PortId),

    #[error("Node '{node}' is the entry node and cannot be {action}")]
    EntryNodeProtected { node: NodeId, action: &'static str },

    #[error("Graph already has an entry node '{0}'")]
    EntryNodeExists(NodeId),

    #[error("A node with id '{0}' already exists")]
    DuplicateNodeId(NodeId),

    #[error("Node '{0}' cannot be connected to itself")]
    SelfConnection(NodeId),

    #[error("Port '{port}' has the wrong direction, expected {expected:?}")]
    DirectionMismatch { port: PortId, expected: Direction },

    #[error("Node '{node}' cannot be placed at non-finite position {position:?}")]
    InvalidPosition { node: NodeId, position: Rect },

    #[error("Port '{0}' is not an output port")]
    NotAnOutputPort(PortId),
}
