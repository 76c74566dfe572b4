//! GPU device management.
//!
//! Responsible for creating the wgpu Instance/Adapter/Device/Queue used by
//! the resource provider. Surface/swapchain plumbing stays with the
//! embedding application; render targets only need a device.

mod gpu;

pub use gpu::{Gpu, GpuInit};
