use std::collections::HashMap;
use std::sync::Arc;

use vitrina_api::error::StoreError;
use vitrina_api::record::Record;
use vitrina_api::resource::{ResourceContext, ResourceInfo, ResourceKind, ResourceRead};

use crate::store::Store;

/// Payload side of a registered resource.
enum ResourceBody {
    /// JSON document rendered to bytes once at bootstrap.
    Snapshot { body: Vec<u8> },
    /// Growable record store plus the fields a record must carry.
    Collection { required: Vec<String>, store: Store },
}

/// A named resource served over HTTP.
pub struct Resource {
    name: String,
    body: ResourceBody,
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource").field("name", &self.name).finish()
    }
}

impl Resource {
    pub fn snapshot(name: String, body: Vec<u8>) -> Self {
        Self {
            name,
            body: ResourceBody::Snapshot { body },
        }
    }

    pub fn collection(name: String, required: Vec<String>) -> Self {
        Self {
            name,
            body: ResourceBody::Collection {
                required,
                store: Store::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ResourceKind {
        match self.body {
            ResourceBody::Snapshot { .. } => ResourceKind::Snapshot,
            ResourceBody::Collection { .. } => ResourceKind::Collection,
        }
    }

    pub fn read(&self) -> ResourceRead {
        match &self.body {
            ResourceBody::Snapshot { body } => ResourceRead::Snapshot(body.clone()),
            ResourceBody::Collection { store, .. } => ResourceRead::Records(store.records()),
        }
    }

    /// Validate and append. A record missing required fields leaves the
    /// store untouched.
    pub fn append(&self, record: Record) -> Result<(), StoreError> {
        match &self.body {
            ResourceBody::Snapshot { .. } => Err(StoreError::NotAppendable(self.name.clone())),
            ResourceBody::Collection { required, store } => {
                let missing = record.missing_required(required);
                if !missing.is_empty() {
                    return Err(StoreError::MissingFields {
                        resource: self.name.clone(),
                        fields: missing,
                    });
                }
                store.append(record);
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ResourceRegistry: built at bootstrap, then frozen behind Arc
// ---------------------------------------------------------------------------

/// Registry of all resources in the server.
///
/// The resource set never changes at runtime; only collection contents
/// grow. Bootstrap builds the registry mutably and freezes it into an
/// `Arc<dyn ResourceContext>` for the HTTP layer.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: HashMap<String, Arc<Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resource: Resource) {
        let name = resource.name.clone();
        self.resources.insert(name, Arc::new(resource));
    }

    pub fn get(&self, name: &str) -> Option<Arc<Resource>> {
        self.resources.get(name).cloned()
    }
}

impl ResourceContext for ResourceRegistry {
    fn resources(&self) -> Vec<ResourceInfo> {
        let mut infos: Vec<ResourceInfo> = self
            .resources
            .values()
            .map(|resource| ResourceInfo {
                name: resource.name.clone(),
                kind: resource.kind(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    fn read(&self, name: &str) -> Result<ResourceRead, StoreError> {
        match self.resources.get(name) {
            Some(resource) => Ok(resource.read()),
            None => Err(StoreError::NotFound(name.to_string())),
        }
    }

    fn append(&self, name: &str, record: Record) -> Result<(), StoreError> {
        match self.resources.get(name) {
            Some(resource) => resource.append(record),
            None => Err(StoreError::NotFound(name.to_string())),
        }
    }
}
