//! Skytargets: astronomical target list resolution
//!
//! This crate turns a target selection request into a deduplicated list of
//! fully specified targets. Targets can come from three sources:
//!
//! - an observation database of science programs and MSBs,
//! - a free-form text catalog file,
//! - objects supplied directly by the user.
//!
//! Solar system bodies are recognised by name up front and returned with a
//! deferred position that an [`planetlib::Ephemeris`] fills in later.

use std::path::PathBuf;
use thiserror::Error;

pub mod catalogs;
pub mod constants;
pub mod coordinates;
pub mod database;
pub mod planetlib;
pub mod resolver;
pub mod targets;

// Re-export commonly used types
pub use catalogs::grammar::{parse_line, ParseError, RawFields};
pub use coordinates::{CoordFrame, Position};
pub use database::{MsbMode, ScienceProgram, ScienceProgramSource};
pub use planetlib::{Body, Ephemeris};
pub use resolver::{Method, ResolveOptions, TargetResolver};
pub use targets::{ObjectSpec, TargetSpec};

/// Main error type for target resolution
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Ambiguous RA/Dec boundary: {0}")]
    AmbiguousParse(#[from] ParseError),

    #[error("Unable to open catalog file {path:?}: {source}")]
    CatalogOpen {
        /// The catalog that could not be opened
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    #[error("Failed to fetch science program for {project}: {reason}")]
    ExternalFetch { project: String, reason: String },

    #[error("Unknown target selection method: {0}")]
    UnknownMethod(String),

    #[error("No catalog file given for catalog target selection")]
    MissingCatalog,

    #[error("No observation database configured")]
    NoDatabase,

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Invalid sexagesimal angle: {0}")]
    InvalidAngle(String),

    #[error("Ephemeris error: {0}")]
    Ephemeris(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for target resolution
pub type Result<T> = std::result::Result<T, ResolverError>;
