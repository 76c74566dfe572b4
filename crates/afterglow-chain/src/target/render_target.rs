use std::cell::RefCell;
use std::rc::Rc;

use crate::error::TargetError;

use super::{FramebufferHandle, TargetResources, TextureDesc, TextureFormat, TextureHandle};

/// Placement/usage class of a render target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TargetStyle {
    Gui,
    Native,
    /// Wraps an externally supplied drawable (the backbuffer).
    Custom,
}

/// Construction parameters for an owned render target.
#[derive(Debug, Clone)]
pub struct TargetDesc {
    pub name: String,
    pub format: TextureFormat,
    /// Nominal width in pixels; scaled by `scale_x` at construction.
    pub width: u16,
    /// Nominal height in pixels; scaled by `scale_y` at construction.
    pub height: u16,
    pub style: TargetStyle,
    pub double_buffer: bool,
    pub filter: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Screen this target belongs to; `None` for the final output surface.
    pub screen: Option<u32>,
}

#[derive(Debug, Copy, Clone)]
struct Page {
    texture: TextureHandle,
    framebuffer: FramebufferHandle,
}

#[derive(Debug)]
enum Backing {
    /// Zero-sized target; never acquired anything.
    None,
    /// One or two owned texture+framebuffer pairs.
    Owned(Vec<Page>),
    /// Wrapping framebuffer over a surface this target does not own.
    Backbuffer(FramebufferHandle),
}

/// One pass's output surface.
///
/// Double-buffered targets keep two pages and flip between them so a pass
/// can sample the previous frame's output while writing the new one.
/// Acquired resources are released through the provider on drop, on every
/// path including failed partial construction.
pub struct RenderTarget {
    name: String,
    format: TextureFormat,
    width: u16,
    height: u16,
    double_buffer: bool,
    filter: bool,
    scale_x: f64,
    scale_y: f64,
    screen: Option<u32>,
    style: TargetStyle,
    current_page: usize,
    initialized: bool,
    backing: Backing,
    resources: Rc<RefCell<dyn TargetResources>>,
}

impl RenderTarget {
    /// Creates an owned target, acquiring one texture+framebuffer per page
    /// (two when double-buffered).
    ///
    /// A zero-sized desc yields an uninitialized target whose accessors all
    /// answer with the invalid sentinel; that is not an error.
    pub fn new(
        resources: Rc<RefCell<dyn TargetResources>>,
        desc: &TargetDesc,
    ) -> Result<RenderTarget, TargetError> {
        if desc.width == 0 || desc.height == 0 {
            log::debug!("render target '{}' is zero-sized, leaving uninitialized", desc.name);
            return Ok(RenderTarget {
                name: desc.name.clone(),
                format: desc.format,
                width: desc.width,
                height: desc.height,
                double_buffer: desc.double_buffer,
                filter: desc.filter,
                scale_x: desc.scale_x,
                scale_y: desc.scale_y,
                screen: desc.screen,
                style: desc.style,
                current_page: 0,
                initialized: false,
                backing: Backing::None,
                resources,
            });
        }

        let width = (f64::from(desc.width) * desc.scale_x + 0.5) as u16;
        let height = (f64::from(desc.height) * desc.scale_y + 0.5) as u16;
        // recompute the factors from the rounded sizes so logical/physical
        // coordinate mapping stays exact downstream
        let scale_x = f64::from(width) / f64::from(desc.width);
        let scale_y = f64::from(height) / f64::from(desc.height);

        let page_count = if desc.double_buffer { 2 } else { 1 };
        let texture_desc = TextureDesc {
            width,
            height,
            format: desc.format,
            filter: desc.filter,
        };
        let pages = {
            let mut provider = resources.borrow_mut();
            acquire_pages(&mut *provider, &texture_desc, page_count, &desc.name)?
        };
        log::debug!(
            "created render target '{}' ({width}x{height}, {page_count} page(s))",
            desc.name
        );

        Ok(RenderTarget {
            name: desc.name.clone(),
            format: desc.format,
            width,
            height,
            double_buffer: desc.double_buffer,
            filter: desc.filter,
            scale_x,
            scale_y,
            screen: desc.screen,
            style: desc.style,
            current_page: 0,
            initialized: true,
            backing: Backing::Owned(pages),
            resources,
        })
    }

    /// Wraps an externally supplied backbuffer framebuffer.
    ///
    /// The surface behind the framebuffer is not owned here; teardown
    /// releases only the wrapping framebuffer handle. Page count is zero and
    /// there is no sampling texture.
    pub fn backbuffer(
        resources: Rc<RefCell<dyn TargetResources>>,
        framebuffer: FramebufferHandle,
        width: u16,
        height: u16,
    ) -> RenderTarget {
        RenderTarget {
            name: "backbuffer".to_owned(),
            format: TextureFormat::Unknown,
            width,
            height,
            double_buffer: false,
            filter: false,
            scale_x: 0.0,
            scale_y: 0.0,
            screen: None,
            style: TargetStyle::Custom,
            current_page: 0,
            initialized: true,
            backing: Backing::Backbuffer(framebuffer),
            resources,
        }
    }

    /// Swaps the read and write pages.
    ///
    /// No-op for uninitialized, single-buffered, and backbuffer targets.
    /// O(1), never fails, acquires nothing.
    pub fn page_flip(&mut self) {
        if !self.initialized {
            return;
        }
        if self.double_buffer {
            self.current_page = 1 - self.current_page;
        }
    }

    /// Framebuffer a pass draws into this frame.
    pub fn target(&self) -> FramebufferHandle {
        if !self.initialized {
            return FramebufferHandle::INVALID;
        }
        match &self.backing {
            Backing::None => FramebufferHandle::INVALID,
            Backing::Owned(pages) => pages[self.current_page].framebuffer,
            Backing::Backbuffer(framebuffer) => *framebuffer,
        }
    }

    /// Texture the next pass samples.
    ///
    /// When double-buffered this is the non-current page, so reads lag
    /// writes by one page. Backbuffer targets have no sampling texture.
    pub fn texture(&self) -> TextureHandle {
        if !self.initialized {
            return TextureHandle::INVALID;
        }
        match &self.backing {
            Backing::Owned(pages) if self.double_buffer => pages[1 - self.current_page].texture,
            Backing::Owned(pages) => pages[self.current_page].texture,
            _ => TextureHandle::INVALID,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Effective width after scaling and rounding.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Effective height after scaling and rounding.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Ratio of effective to nominal width.
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Ratio of effective to nominal height.
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    pub fn screen(&self) -> Option<u32> {
        self.screen
    }

    pub fn style(&self) -> TargetStyle {
        self.style
    }

    pub fn filter(&self) -> bool {
        self.filter
    }

    pub fn double_buffer(&self) -> bool {
        self.double_buffer
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn page_count(&self) -> usize {
        match &self.backing {
            Backing::Owned(pages) => pages.len(),
            Backing::None | Backing::Backbuffer(_) => 0,
        }
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        let mut provider = self.resources.borrow_mut();
        match &self.backing {
            Backing::None => {}
            Backing::Owned(pages) => {
                for page in pages {
                    provider.destroy_framebuffer(page.framebuffer);
                    provider.destroy_texture(page.texture);
                }
            }
            Backing::Backbuffer(framebuffer) => provider.destroy_framebuffer(*framebuffer),
        }
    }
}

fn acquire_pages(
    provider: &mut dyn TargetResources,
    desc: &TextureDesc,
    page_count: usize,
    name: &str,
) -> Result<Vec<Page>, TargetError> {
    let mut pages: Vec<Page> = Vec::with_capacity(page_count);
    for page in 0..page_count {
        let texture = provider.create_texture(desc);
        if !texture.is_valid() {
            release_pages(provider, &pages);
            return Err(TargetError::new(format!(
                "failed to create texture for render target '{name}' page {page}"
            )));
        }
        let framebuffer = provider.create_framebuffer(texture);
        if !framebuffer.is_valid() {
            provider.destroy_texture(texture);
            release_pages(provider, &pages);
            return Err(TargetError::new(format!(
                "failed to create framebuffer for render target '{name}' page {page}"
            )));
        }
        pages.push(Page {
            texture,
            framebuffer,
        });
    }
    Ok(pages)
}

fn release_pages(provider: &mut dyn TargetResources, pages: &[Page]) {
    for page in pages {
        provider.destroy_framebuffer(page.framebuffer);
        provider.destroy_texture(page.texture);
    }
}
