use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SerializationError: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("WriteError: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("The root type {0} does not describe an object with properties")]
    InvalidRoot(String),

    #[error("The reference {0} does not resolve to a generated definition")]
    UnresolvedReference(String),

    #[error("Unsupported schema at {context}: {reason}")]
    UnsupportedSchema {
        context: String,
        reason: &'static str,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The Service Catalog schema and how it is rendered
pub mod catalog;

/// Schema generation
pub mod schemagen;

/// Log integrations
pub mod telemetry;

/// Service Catalog API types
pub mod resources;
