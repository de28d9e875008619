//! # Dialogue Model
//!
//! The data crate for dialogue graphs - nodes, ports, edges, the flat save record
//! and the editor configuration. It holds no graph logic; `dialogue_core` owns
//! every mutation and invariant.

pub mod config;
pub mod entities;
pub mod layout;
pub mod record;

pub use config::*;
pub use entities::*;
pub use layout::*;
pub use record::*;
