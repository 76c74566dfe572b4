//! wgpu backing for the afterglow chain.
//!
//! This crate owns the GPU runtime pieces: headless device bring-up, the
//! handle-based [`resources::WgpuTargetResources`] provider behind
//! `RenderTarget`, and logger initialization.

pub mod device;
pub mod logging;
pub mod resources;

pub use device::{Gpu, GpuInit};
pub use resources::WgpuTargetResources;
