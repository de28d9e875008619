use dialogue_model::{EdgeRecord, NodeId};
use thiserror::Error;

use crate::graph::GraphError;

/// Errors raised by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid record name '{0}'")]
    InvalidName(String),

    #[error("Record store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode save record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single saved edge that could not be rewired.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityIssue {
    #[error("Edge from '{}' on port '{}' targets node '{}', which does not exist", .0.source_id, .0.port_name, .0.target_id)]
    DanglingTarget(EdgeRecord),

    #[error("Edge from '{}' on port '{}' targets node '{}', which has no input port", .0.source_id, .0.port_name, .0.target_id)]
    TargetHasNoInput(EdgeRecord),

    #[error("Edge to '{}' leaves node '{}', which does not exist", .0.target_id, .0.source_id)]
    DanglingSource(EdgeRecord),

    #[error("Node '{}' has no output port named '{}'", .0.source_id, .0.port_name)]
    UnknownSourcePort(EdgeRecord),

    #[error("Port '{}' on node '{}' already carries an edge", .0.port_name, .0.source_id)]
    PortAlreadyConnected(EdgeRecord),

    #[error("Edge on port '{}' connects node '{}' to itself", .0.port_name, .0.source_id)]
    SelfConnection(EdgeRecord),
}

impl IntegrityIssue {
    /// The saved edge this issue was raised for.
    pub fn edge(&self) -> &EdgeRecord {
        match self {
            IntegrityIssue::DanglingTarget(edge)
            | IntegrityIssue::TargetHasNoInput(edge)
            | IntegrityIssue::DanglingSource(edge)
            | IntegrityIssue::UnknownSourcePort(edge)
            | IntegrityIssue::PortAlreadyConnected(edge)
            | IntegrityIssue::SelfConnection(edge) => edge,
        }
    }
}

/// Ways a save record can be too broken to load at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorruptRecord {
    #[error("Node id '{0}' appears more than once")]
    DuplicateNodeId(NodeId),

    #[error("Node '{0}' has a non-finite position")]
    InvalidPosition(NodeId),

    #[error("Record has no entry node")]
    MissingEntryNode,

    #[error("Record has {} entry nodes, expected exactly one", .0.len())]
    MultipleEntryNodes(Vec<NodeId>),

    #[error(transparent)]
    Integrity(#[from] IntegrityIssue),
}

/// Errors raised while loading a graph.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No save record named '{0}'")]
    RecordNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Corrupt save record: {0}")]
    Corrupt(#[from] CorruptRecord),

    #[error("Graph rejected reconstruction: {0}")]
    Graph(#[from] GraphError),
}
