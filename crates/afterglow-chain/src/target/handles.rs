const INVALID_INDEX: u16 = u16::MAX;

/// Opaque handle to a GPU texture issued by a [`TargetResources`] provider.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(u16);

impl TextureHandle {
    /// Distinguished "no texture" sentinel.
    pub const INVALID: TextureHandle = TextureHandle(INVALID_INDEX);

    pub const fn from_index(index: u16) -> TextureHandle {
        TextureHandle(index)
    }

    pub const fn index(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != INVALID_INDEX
    }
}

/// Opaque handle to a drawable surface (framebuffer).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FramebufferHandle(u16);

impl FramebufferHandle {
    /// Distinguished "no framebuffer" sentinel.
    pub const INVALID: FramebufferHandle = FramebufferHandle(INVALID_INDEX);

    pub const fn from_index(index: u16) -> FramebufferHandle {
        FramebufferHandle(index)
    }

    pub const fn index(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != INVALID_INDEX
    }
}

/// Pixel format of a render-target texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextureFormat {
    #[default]
    Rgba8,
    Bgra8,
    Rgba16Float,
    /// Backbuffer wrappers have no format of their own.
    Unknown,
}

/// Parameters for creating one render-target texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDesc {
    pub width: u16,
    pub height: u16,
    pub format: TextureFormat,
    /// Linear filtering when sampled; point sampling otherwise.
    pub filter: bool,
}

/// Issues and reclaims GPU-backed handles.
///
/// There is no error channel: creation failure is reported with the invalid
/// sentinel, and a target missing any of its resources fails construction
/// outright.
pub trait TargetResources {
    fn create_texture(&mut self, desc: &TextureDesc) -> TextureHandle;
    fn create_framebuffer(&mut self, texture: TextureHandle) -> FramebufferHandle;
    fn destroy_texture(&mut self, texture: TextureHandle);
    fn destroy_framebuffer(&mut self, framebuffer: FramebufferHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_not_valid() {
        assert!(!TextureHandle::INVALID.is_valid());
        assert!(!FramebufferHandle::INVALID.is_valid());
        assert!(TextureHandle::from_index(0).is_valid());
        assert!(FramebufferHandle::from_index(41).is_valid());
    }
}
