//! Storage-bucket access configuration.
//!
//! The platform exposes uploaded binary content through named buckets; this
//! module carries only the bucket-name to access-policy mapping. Content
//! handling belongs to the object store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Read-access tier of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BucketAccess {
    /// Readable by anyone, no principal required.
    PublicRead,
    /// Readable by any authenticated account or the service identity.
    AuthenticatedRead,
    /// Readable by project members, administrators, or portal-token bearers
    /// scoped to the owning project.
    TokenGated,
}

/// One named bucket and its access tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSpec {
    /// Bucket name as known to the object store.
    pub name: String,
    /// Read-access tier.
    pub access: BucketAccess,
}

impl BucketSpec {
    /// Creates a bucket spec.
    pub fn new(name: impl Into<String>, access: BucketAccess) -> Self {
        Self {
            name: name.into(),
            access,
        }
    }
}

/// Registry of known buckets keyed by name.
///
/// Unknown buckets fail closed: the engine denies reads against names that
/// are not registered here.
#[derive(Debug, Clone, Default)]
pub struct BucketRegistry {
    buckets: HashMap<String, BucketSpec>,
}

impl BucketRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the platform's standard bucket set.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.insert(BucketSpec::new("branding-assets", BucketAccess::PublicRead));
        registry.insert(BucketSpec::new("project-documents", BucketAccess::TokenGated));
        registry.insert(BucketSpec::new("floor-plans", BucketAccess::TokenGated));
        registry.insert(BucketSpec::new("site-photos", BucketAccess::TokenGated));
        registry.insert(BucketSpec::new(
            "final-account-exports",
            BucketAccess::AuthenticatedRead,
        ));
        registry
    }

    /// Registers a bucket, replacing any previous spec of the same name.
    pub fn insert(&mut self, spec: BucketSpec) {
        self.buckets.insert(spec.name.clone(), spec);
    }

    /// Looks a bucket up by name.
    pub fn get(&self, name: &str) -> Option<&BucketSpec> {
        self.buckets.get(name)
    }

    /// Iterates over the registered buckets.
    pub fn iter(&self) -> impl Iterator<Item = &BucketSpec> {
        self.buckets.values()
    }
}
