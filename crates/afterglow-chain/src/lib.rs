//! Pass-suppression rules and render-target paging for a post-processing
//! chain.
//!
//! Once per frame the chain executor asks each configured pass's rule list
//! whether the pass should be skipped. Rules read live [`slider::Slider`]
//! values or consult a [`screen::ScreenClassifier`]; their results merge
//! under an AND/OR combine policy into a single skip/run decision per pass.
//!
//! Independently, each pass that produces intermediate output draws into a
//! [`target::RenderTarget`], optionally double-buffered so the next pass can
//! sample the previous frame's output while the new one is being written.
//!
//! This crate deliberately knows nothing about any concrete GPU API: targets
//! acquire their backing through the [`target::TargetResources`] trait, and
//! a backend crate supplies the implementation.

pub mod error;
pub mod screen;
pub mod slider;
pub mod suppress;
pub mod target;

pub use error::{ReadError, TargetError};
pub use suppress::{read_suppressor, CombineMode, Condition, Suppressor};
pub use target::RenderTarget;
