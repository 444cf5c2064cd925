//! Materialization of flat, database-shaped scene records into a live,
//! cross-referenced object graph.
//!
//! Records arrive as JSON objects with foreign-key style references
//! (string ids) and vertex data packed into tagged base64 blobs. One
//! [`Materializer::materialize`] call converts every record into its
//! concrete node type, then resolves the dangling geometry/material ids
//! through bulk provider reads and fills material texture slots through a
//! deduplicating path cache. The caller owns the resulting node map;
//! nothing in here mutates it afterwards.

use thiserror::Error;

use scenedb_records::RecordError;

pub mod common;
pub mod graph;
pub mod importer;
pub mod materializer;
pub mod settings;

pub use common::coordinate_systems::Convention;
pub use materializer::{Materialized, Materializer};
pub use scenedb_records as records;
pub use settings::MaterializeSettings;

/// Fatal failures of one materialization call.
#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("reference resolution failed: {source}")]
    Resolve {
        source: ResolveError,
        /// The converted batch with every reference id intact, so the
        /// caller can retry through [`Materializer::resolve`] without
        /// converting the records again.
        unresolved: Box<materializer::Materialized>,
    },
}

/// A bulk provider read rejected. Nothing has been patched when this is
/// returned.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("geometry provider failed: {0}")]
    Geometry(anyhow::Error),

    #[error("material provider failed: {0}")]
    Material(anyhow::Error),
}

/// Non-fatal problems collected while materializing one batch. These ride
/// along with the (possibly partial) node map instead of aborting it.
#[derive(Error, Debug)]
pub enum Issue {
    #[error("record {id}: unknown record type \"{type_name}\"")]
    UnknownType { id: String, type_name: String },

    #[error("record {id}: unknown {family} variant \"{type_name}\"")]
    UnknownVariant {
        id: String,
        family: &'static str,
        type_name: String,
    },

    #[error("record {id}: could not decode the {field} channel: {source}")]
    Decode {
        id: String,
        field: &'static str,
        source: RecordError,
    },

    #[error("record {id}: zero component in scale, keeping the default")]
    DegenerateScale { id: String },

    #[error("record {id} appears more than once in the batch")]
    DuplicateId { id: String },

    #[error("node {id}: {family} reference \"{reference}\" was not in the resolved set")]
    MissingReference {
        id: String,
        family: &'static str,
        reference: String,
    },
}
