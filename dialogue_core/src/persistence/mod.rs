//! Persistence - saving graphs as flat records and loading them back.
//!
//! A save walks the live graph into a [`SaveRecord`] and hands it to a
//! [`RecordStore`]. A load fetches the record, rebuilds a fresh graph from it
//! and only then replaces the caller's graph, so a failed load leaves the
//! current graph untouched.

mod error;
mod reconstruct;
mod serializer;
mod store;

pub use error::*;
pub use reconstruct::*;
pub use serializer::*;
pub use store::*;

use tracing::{info, warn};

use dialogue_model::{Layout, SaveRecord};

use crate::graph::DialogueGraph;

/// Serialize a graph and store it under `name`.
pub fn save<S>(graph: &DialogueGraph, store: &mut S, name: &str) -> Result<SaveRecord, StoreError>
where
    S: RecordStore + ?Sized,
{
    let record = serialize(graph);
    store.store(name, &record)?;
    info!(
        name,
        nodes = record.nodes.len(),
        edges = record.edges.len(),
        "saved dialogue graph"
    );
    Ok(record)
}

/// Fetch the record stored under `name` and rebuild a graph from it.
///
/// A missing record is an error, never an empty graph.
pub fn load<S>(
    store: &S,
    name: &str,
    options: &LoadOptions,
    layout: Layout,
) -> Result<Reconstruction, LoadError>
where
    S: RecordStore + ?Sized,
{
    let record = store
        .fetch(name)?
        .ok_or_else(|| LoadError::RecordNotFound(name.to_string()))?;
    let reconstruction = reconstruct(&record, options, layout)?;

    if reconstruction.is_clean() {
        info!(
            name,
            nodes = reconstruction.graph.node_count(),
            edges = reconstruction.graph.edge_count(),
            "loaded dialogue graph"
        );
    } else {
        warn!(
            name,
            skipped = reconstruction.issues.len(),
            "loaded dialogue graph with dangling references"
        );
    }
    Ok(reconstruction)
}

impl DialogueGraph {
    /// Save this graph under `name`.
    pub fn save_to<S>(&self, store: &mut S, name: &str) -> Result<SaveRecord, StoreError>
    where
        S: RecordStore + ?Sized,
    {
        save(self, store, name)
    }

    /// Replace this graph with the one stored under `name`.
    ///
    /// Returns the saved edges that could not be rewired. On error the graph is unchanged.
    pub fn load_from<S>(
        &mut self,
        store: &S,
        name: &str,
        options: &LoadOptions,
    ) -> Result<Vec<IntegrityIssue>, LoadError>
    where
        S: RecordStore + ?Sized,
    {
        let Reconstruction { graph, issues } = load(store, name, options, self.layout())?;
        *self = graph;
        Ok(issues)
    }
}
