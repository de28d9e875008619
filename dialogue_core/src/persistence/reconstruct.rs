//! Reconstructor - rebuilds a live graph from a save record in two phases.
//!
//! 1. **Nodes**: every saved node is recreated with its saved id. Regular nodes
//!    get one output port per saved edge leaving them, named after that edge.
//! 2. **Edges**: every saved edge is rewired from the port created for it in
//!    phase 1 to the input port of its target.
//!
//! Phase 1 records which port it created for which saved edge, so phase 2
//! pairs edges and ports by that explicit key rather than by position. A port
//! created for an edge that phase 2 rejects is removed again, so a reload never
//! leaves behind outputs the next save would drop.

use std::collections::HashSet;
use tracing::{debug, warn};

use dialogue_model::{EdgeRecord, EditorConfig, Layout, NodeId, PortId, SaveRecord};

use super::{CorruptRecord, IntegrityIssue, LoadError};
use crate::graph::DialogueGraph;

/// How to treat per-edge integrity problems while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Fail the whole load on the first dangling reference instead of skipping the edge.
    pub strict: bool,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl From<&EditorConfig> for LoadOptions {
    fn from(config: &EditorConfig) -> Self {
        Self {
            strict: config.strict_load,
        }
    }
}

/// A rebuilt graph plus every saved edge that could not be rewired.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub graph: DialogueGraph,
    pub issues: Vec<IntegrityIssue>,
}

impl Reconstruction {
    /// True when every saved edge was rewired.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Rebuild a graph from a save record.
///
/// Records with duplicate ids or without exactly one entry node are rejected
/// outright. Edges that cannot be resolved are skipped and reported, unless
/// `options.strict` is set.
pub fn reconstruct(
    record: &SaveRecord,
    options: &LoadOptions,
    layout: Layout,
) -> Result<Reconstruction, LoadError> {
    validate_nodes(record)?;

    let mut graph = DialogueGraph::empty(layout);
    // Port created for each saved edge, indexed like `record.edges`
    let mut edge_ports: Vec<Option<PortId>> = vec![None; record.edges.len()];

    // Phase 1: nodes and their ports
    for saved in &record.nodes {
        if saved.is_entry {
            graph.create_entry_node(Some(saved.id.clone()))?;
        } else {
            let generated = graph.create_node(saved.text.clone());
            graph.rekey_node(&generated, saved.id.clone())?;

            for (index, edge) in record.edges_from(&saved.id) {
                edge_ports[index] = Some(graph.add_output_port(&saved.id, Some(edge.port_name.as_str()))?);
            }
        }
        graph.place_node(&saved.id, saved.position)?;
    }

    // The entry node's ports are fixed, so its edges resolve by port name
    if let Some(entry) = graph.entry_node() {
        for (index, edge) in record.edges_from(&entry.id) {
            edge_ports[index] = entry.output_named(&edge.port_name).map(|port| port.id);
        }
    }

    // Phase 2: edges
    let mut issues = Vec::new();
    for (saved, source_port) in record.edges.iter().zip(edge_ports) {
        match resolve_edge(&graph, saved, source_port) {
            Ok((output, input)) => {
                graph.connect(output, input)?;
            }
            Err(issue) => {
                warn!(%issue, "skipping saved edge");
                if options.strict {
                    return Err(CorruptRecord::Integrity(issue).into());
                }
                let created_for_edge = graph
                    .node(&saved.source_id)
                    .map(|node| !node.is_entry)
                    .unwrap_or(false);
                if let (Some(port), true) = (source_port, created_for_edge) {
                    graph.remove_output_port(&saved.source_id, port)?;
                }
                issues.push(issue);
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        issues = issues.len(),
        "reconstructed dialogue graph"
    );
    Ok(Reconstruction { graph, issues })
}

fn validate_nodes(record: &SaveRecord) -> Result<(), CorruptRecord> {
    let mut seen = HashSet::new();
    for node in &record.nodes {
        if !seen.insert(&node.id) {
            return Err(CorruptRecord::DuplicateNodeId(node.id.clone()));
        }
        if !node.position.is_finite() {
            return Err(CorruptRecord::InvalidPosition(node.id.clone()));
        }
    }

    let entries: Vec<NodeId> = record
        .nodes
        .iter()
        .filter(|n| n.is_entry)
        .map(|n| n.id.clone())
        .collect();
    match entries.len() {
        0 => Err(CorruptRecord::MissingEntryNode),
        1 => Ok(()),
        _ => Err(CorruptRecord::MultipleEntryNodes(entries)),
    }
}

/// Find the live output and input ports a saved edge should join.
fn resolve_edge(
    graph: &DialogueGraph,
    saved: &EdgeRecord,
    source_port: Option<PortId>,
) -> Result<(PortId, PortId), IntegrityIssue> {
    if !graph.contains(&saved.source_id) {
        return Err(IntegrityIssue::DanglingSource(saved.clone()));
    }
    if saved.source_id == saved.target_id {
        return Err(IntegrityIssue::SelfConnection(saved.clone()));
    }
    let source_port = source_port.ok_or_else(|| IntegrityIssue::UnknownSourcePort(saved.clone()))?;
    if graph.edge_on_port(source_port).is_some() {
        return Err(IntegrityIssue::PortAlreadyConnected(saved.clone()));
    }

    let target = graph
        .node(&saved.target_id)
        .ok_or_else(|| IntegrityIssue::DanglingTarget(saved.clone()))?;
    let target_port = target
        .input
        .as_ref()
        .map(|port| port.id)
        .ok_or_else(|| IntegrityIssue::TargetHasNoInput(saved.clone()))?;

    Ok((source_port, target_port))
}
