//! Conditional pass suppression.
//!
//! Each configured pass carries a list of suppression rules. Once per frame
//! the executor evaluates them against live slider state and the screen
//! classification, merges the results under each rule's combine mode, and
//! skips the pass when the merged decision says so.

mod reader;
mod rule;

pub use reader::read_suppressor;
pub use rule::{combine_all, CombineMode, Condition, Suppressor, CONDITION_TOLERANCE};
