//! Handle-based resource provider over wgpu.
//!
//! `RenderTarget` reaches GPU objects through small `u16` handles; this
//! module maps them to `wgpu::Texture` / `wgpu::TextureView` slots. A
//! "framebuffer" in the chain crate's vocabulary is a render-attachment
//! texture view here.

use afterglow_chain::target::{
    FramebufferHandle, TargetResources, TextureDesc, TextureFormat, TextureHandle,
};

/// Slot-map provider. Freed slots are reused so handle indices stay small
/// across configuration reloads.
pub struct WgpuTargetResources {
    device: wgpu::Device,
    textures: Vec<Option<wgpu::Texture>>,
    texture_free: Vec<u16>,
    framebuffers: Vec<Option<wgpu::TextureView>>,
    framebuffer_free: Vec<u16>,
}

impl WgpuTargetResources {
    pub fn new(device: wgpu::Device) -> Self {
        Self {
            device,
            textures: Vec::new(),
            texture_free: Vec::new(),
            framebuffers: Vec::new(),
            framebuffer_free: Vec::new(),
        }
    }

    /// Admits an externally created view (typically the surface backbuffer)
    /// so a `RenderTarget::backbuffer` can wrap it. The underlying surface
    /// stays owned by the caller.
    pub fn register_framebuffer(&mut self, view: wgpu::TextureView) -> FramebufferHandle {
        self.insert_framebuffer(view)
    }

    /// Looks up the texture behind a handle, e.g. to bind it for sampling.
    pub fn texture(&self, handle: TextureHandle) -> Option<&wgpu::Texture> {
        self.textures
            .get(handle.index() as usize)
            .and_then(Option::as_ref)
            .filter(|_| handle.is_valid())
    }

    /// Looks up the view behind a framebuffer handle.
    pub fn framebuffer(&self, handle: FramebufferHandle) -> Option<&wgpu::TextureView> {
        self.framebuffers
            .get(handle.index() as usize)
            .and_then(Option::as_ref)
            .filter(|_| handle.is_valid())
    }

    fn insert_framebuffer(&mut self, view: wgpu::TextureView) -> FramebufferHandle {
        let Some(index) = alloc_slot(&mut self.framebuffer_free, self.framebuffers.len()) else {
            return FramebufferHandle::INVALID;
        };
        store(&mut self.framebuffers, index, view);
        FramebufferHandle::from_index(index)
    }
}

impl TargetResources for WgpuTargetResources {
    fn create_texture(&mut self, desc: &TextureDesc) -> TextureHandle {
        let Some(format) = map_format(desc.format) else {
            log::warn!("cannot create a render-target texture with an unknown format");
            return TextureHandle::INVALID;
        };
        if desc.width == 0 || desc.height == 0 {
            return TextureHandle::INVALID;
        }
        let Some(index) = alloc_slot(&mut self.texture_free, self.textures.len()) else {
            return TextureHandle::INVALID;
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("afterglow render target"),
            size: wgpu::Extent3d {
                width: desc.width.into(),
                height: desc.height.into(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        store(&mut self.textures, index, texture);
        log::debug!("created texture {index} ({}x{})", desc.width, desc.height);
        TextureHandle::from_index(index)
    }

    fn create_framebuffer(&mut self, texture: TextureHandle) -> FramebufferHandle {
        let Some(texture) = self.texture(texture) else {
            return FramebufferHandle::INVALID;
        };
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.insert_framebuffer(view)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        let index = handle.index() as usize;
        if let Some(slot) = self.textures.get_mut(index) {
            if slot.take().is_some() {
                self.texture_free.push(handle.index());
                log::debug!("destroyed texture {}", handle.index());
            }
        }
    }

    fn destroy_framebuffer(&mut self, handle: FramebufferHandle) {
        let index = handle.index() as usize;
        if let Some(slot) = self.framebuffers.get_mut(index) {
            if slot.take().is_some() {
                self.framebuffer_free.push(handle.index());
                log::debug!("destroyed framebuffer {}", handle.index());
            }
        }
    }
}

/// Picks a free slot index, growing the backing vec if none are free.
/// `u16::MAX` is reserved for the invalid sentinel.
fn alloc_slot(free: &mut Vec<u16>, len: usize) -> Option<u16> {
    if let Some(index) = free.pop() {
        return Some(index);
    }
    u16::try_from(len).ok().filter(|&index| index != u16::MAX)
}

fn store<T>(slots: &mut Vec<Option<T>>, index: u16, value: T) {
    let index = index as usize;
    if index == slots.len() {
        slots.push(Some(value));
    } else {
        slots[index] = Some(value);
    }
}

fn map_format(format: TextureFormat) -> Option<wgpu::TextureFormat> {
    match format {
        TextureFormat::Rgba8 => Some(wgpu::TextureFormat::Rgba8Unorm),
        TextureFormat::Bgra8 => Some(wgpu::TextureFormat::Bgra8Unorm),
        TextureFormat::Rgba16Float => Some(wgpu::TextureFormat::Rgba16Float),
        TextureFormat::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_has_no_wgpu_mapping() {
        assert!(map_format(TextureFormat::Unknown).is_none());
        assert_eq!(
            map_format(TextureFormat::Rgba8),
            Some(wgpu::TextureFormat::Rgba8Unorm)
        );
    }

    #[test]
    fn slots_are_reused_before_growing() {
        let mut free = vec![3u16];
        assert_eq!(alloc_slot(&mut free, 10), Some(3));
        assert_eq!(alloc_slot(&mut free, 10), Some(10));
    }

    #[test]
    fn slot_space_is_capped_below_the_sentinel() {
        let mut free = Vec::new();
        assert_eq!(alloc_slot(&mut free, u16::MAX as usize), None);
        assert_eq!(alloc_slot(&mut free, u16::MAX as usize + 1), None);
    }
}
