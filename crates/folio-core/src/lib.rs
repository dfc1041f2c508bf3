//! # folio-core
//!
//! Core value types shared across all folio crates:
//! - `Unit` fixed-point unit numbers (integer tenths)
//! - Classification and difficulty enums
//! - `TopicKey` composite identity and `ProblemRecord` capability output
//! - The deterministic output path contract (`OutputLayout`)
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod layout;
pub mod text;
pub mod topic;
pub mod unit;

pub use enums::{Difficulty, TopicType};
pub use errors::CoreError;
pub use layout::{OutputLayout, date_stamp, sanitize_component};
pub use topic::{FixedProblemCount, ProblemCountSource, ProblemRecord, TopicKey};
pub use unit::Unit;
