//! Coverage statistics.

use std::collections::BTreeMap;

use folio_core::TopicType;
use serde::Serialize;

/// Implemented-versus-total counts for some slice of the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coverage {
    pub total: usize,
    pub implemented: usize,
    pub percentage: f64,
}

impl Coverage {
    /// `percentage` is `100 * implemented / total`, and `0.0` for an empty slice.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(total: usize, implemented: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            implemented as f64 / total as f64 * 100.0
        };
        Self {
            total,
            implemented,
            percentage,
        }
    }

    #[must_use]
    pub const fn unimplemented(&self) -> usize {
        self.total.saturating_sub(self.implemented)
    }
}

/// Registry-wide coverage, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageStats {
    pub total: usize,
    pub implemented: usize,
    pub unimplemented: usize,
    pub percentage: f64,
    pub by_type: BTreeMap<TopicType, Coverage>,
}

impl CoverageStats {
    pub(crate) fn new(overall: &Coverage, by_type: BTreeMap<TopicType, Coverage>) -> Self {
        Self {
            total: overall.total,
            implemented: overall.implemented,
            unimplemented: overall.unimplemented(),
            percentage: overall.percentage,
            by_type,
        }
    }
}
