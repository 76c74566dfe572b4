//! Render-target abstraction.
//!
//! Each pass that produces intermediate output draws into a
//! [`RenderTarget`]: one or two GPU texture+framebuffer pairs with ping-pong
//! paging, or a thin wrapper around an externally owned backbuffer. GPU
//! objects are reached only through the [`TargetResources`] trait, so the
//! chain crate stays backend-agnostic and tests can count resource traffic
//! with a plain double.

mod handles;
mod render_target;

pub use handles::{FramebufferHandle, TargetResources, TextureDesc, TextureFormat, TextureHandle};
pub use render_target::{RenderTarget, TargetDesc, TargetStyle};
