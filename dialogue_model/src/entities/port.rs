//! Port definitions - named connection points on a node.

use serde::{Deserialize, Serialize};

use super::{NodeId, PortId};

/// Which way data flows through a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
}

/// How many edges a port accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capacity {
    /// At most one edge.
    Single,
    /// Any number of edges.
    Multi,
}

/// A named socket owned by a node.
///
/// The name is a display label only; identity is the `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub node: NodeId,
    pub name: String,
    pub direction: Direction,
    pub capacity: Capacity,
}

impl Port {
    /// Name given to every node's input socket.
    pub const INPUT_NAME: &'static str = "input";

    /// Create the multi-capacity input socket for a node.
    pub fn input(node: NodeId) -> Self {
        Self {
            id: PortId::new(),
            node,
            name: Self::INPUT_NAME.to_string(),
            direction: Direction::Input,
            capacity: Capacity::Multi,
        }
    }

    /// Create a single-capacity output socket for a node.
    pub fn output(node: NodeId, name: impl Into<String>) -> Self {
        Self {
            id: PortId::new(),
            node,
            name: name.into(),
            direction: Direction::Output,
            capacity: Capacity::Single,
        }
    }

    pub fn is_input(&self) -> bool {
        self.direction == Direction::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == Direction::Output
    }
}
