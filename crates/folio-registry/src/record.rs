//! Registry records.

use std::fmt;
use std::sync::Arc;

use folio_core::{TopicKey, TopicType, Unit};
use serde::Serialize;

use crate::capability::Capability;

/// Where a record was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Registered by code with a capability.
    Code,
    /// Declared only by the external catalog.
    Catalog,
}

/// One topic in the registry.
#[derive(Clone, Serialize)]
pub struct TopicRecord {
    #[serde(flatten)]
    key: TopicKey,
    implemented: bool,
    origin: Origin,
    #[serde(skip)]
    capability: Option<Arc<dyn Capability>>,
}

impl TopicRecord {
    pub(crate) fn new(key: TopicKey, capability: Option<Arc<dyn Capability>>) -> Self {
        let origin = if capability.is_some() {
            Origin::Code
        } else {
            Origin::Catalog
        };
        Self {
            key,
            implemented: capability.is_some(),
            origin,
            capability,
        }
    }

    /// Bind a capability. Catalog-only records become code-backed; an existing
    /// capability is replaced, never removed.
    pub(crate) fn bind(&mut self, capability: Arc<dyn Capability>) {
        self.capability = Some(capability);
        self.implemented = true;
        self.origin = Origin::Code;
    }

    #[must_use]
    pub const fn key(&self) -> &TopicKey {
        &self.key
    }

    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.key.unit
    }

    #[must_use]
    pub const fn topic_type(&self) -> &TopicType {
        &self.key.topic_type
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.key.topic
    }

    #[must_use]
    pub const fn is_implemented(&self) -> bool {
        self.implemented
    }

    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    #[must_use]
    pub fn capability(&self) -> Option<Arc<dyn Capability>> {
        self.capability.clone()
    }
}

impl fmt::Debug for TopicRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicRecord")
            .field("key", &self.key)
            .field("implemented", &self.implemented)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TopicRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.implemented { "[OK]" } else { "[ X]" };
        write!(f, "{status} {}", self.key)
    }
}
