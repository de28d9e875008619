//! Edge definitions - directed output-to-input connections.

use serde::{Deserialize, Serialize};

use super::{EdgeId, NodeId, PortId};

/// A directed connection from one node's output port to another node's input port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub source_port: PortId,
    pub target: NodeId,
    pub target_port: PortId,
}

impl Edge {
    pub fn new(source: NodeId, source_port: PortId, target: NodeId, target_port: PortId) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            source_port,
            target,
            target_port,
        }
    }

    /// Check whether the edge uses the given port at either end.
    pub fn uses_port(&self, port: PortId) -> bool {
        self.source_port == port || self.target_port == port
    }
}
