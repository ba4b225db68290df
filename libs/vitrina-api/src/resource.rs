use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::record::Record;

/// What a resource serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A JSON document captured at startup, constant for the process lifetime.
    Snapshot,
    /// An ordered, append-only sequence of records.
    Collection,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Snapshot => write!(f, "snapshot"),
            ResourceKind::Collection => write!(f, "collection"),
        }
    }
}

/// Listing entry for a registered resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub name: String,
    pub kind: ResourceKind,
}

/// Result of reading a resource in full.
#[derive(Debug)]
pub enum ResourceRead {
    /// Pre-rendered JSON body of a snapshot resource.
    Snapshot(Vec<u8>),
    /// Current records of a collection resource, in insertion order.
    Records(Vec<Record>),
}

/// Access to the registered resources.
///
/// The HTTP layer does not know concrete registries or stores; for it,
/// the whole data side is this trait.
pub trait ResourceContext: Send + Sync {
    /// All registered resources, sorted by name.
    fn resources(&self) -> Vec<ResourceInfo>;

    /// Read the full contents of a resource.
    fn read(&self, name: &str) -> Result<ResourceRead, StoreError>;

    /// Validate and append a record to a collection resource.
    ///
    /// A record that fails required-field validation is rejected without
    /// touching the store.
    fn append(&self, name: &str, record: Record) -> Result<(), StoreError>;
}
