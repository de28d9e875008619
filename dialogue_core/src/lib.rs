//! # Dialogue Core
//!
//! The live dialogue graph and its persistence. An editing session owns one
//! [`DialogueGraph`], mutates it in response to user input, and saves or loads
//! it through a [`RecordStore`].
//!
//! ## Core Components
//!
//! - **graph**: The node/edge store, its port registry and the entry-node invariant
//! - **persistence**: Serializer, two-phase reconstructor and record stores
//!
//! ## Example
//!
//! ```rust
//! use dialogue_core::{DialogueGraph, LoadOptions, MemoryStore};
//!
//! let mut graph = DialogueGraph::new();
//! let next = graph.entry_node().unwrap().outputs[0].id;
//! let hello = graph.create_node("Hello");
//! let input = graph.node(&hello).unwrap().input.as_ref().unwrap().id;
//! graph.connect(next, input).unwrap();
//!
//! let mut store = MemoryStore::new();
//! graph.save_to(&mut store, "intro").unwrap();
//!
//! let mut reloaded = DialogueGraph::new();
//! let issues = reloaded.load_from(&store, "intro", &LoadOptions::default()).unwrap();
//! assert!(issues.is_empty());
//! assert_eq!(reloaded.edge_count(), 1);
//! ```

pub mod graph;
pub mod persistence;

pub use graph::*;
pub use persistence::*;
