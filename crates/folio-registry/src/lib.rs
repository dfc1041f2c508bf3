//! # folio-registry
//!
//! In-memory catalog of worksheet topics keyed by `(unit, type, topic)`, each
//! optionally bound to a generation [`Capability`].
//!
//! Topics arrive from two sources:
//! - code registration ([`CapabilityRegistry::register_capability`]), which
//!   marks a topic implemented;
//! - catalog reconciliation (`folio-catalog`), which adds topics that should
//!   exist but have no capability yet.
//!
//! Registration is upsert-only: a record is never removed and never loses its
//! capability. Lookups that miss return `None` or an empty list.

mod capability;
mod coverage;
mod record;
mod registry;

pub use capability::{Capability, CapabilityError};
pub use coverage::{Coverage, CoverageStats};
pub use record::{Origin, TopicRecord};
pub use registry::CapabilityRegistry;
