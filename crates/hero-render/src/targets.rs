//! Swapchain format choice and the multisampled colour target.
//!
//! Textures are uploaded as sRGB, so every pass must write through an sRGB
//! view. WebGPU canvases only offer linear formats; for those the swapchain
//! keeps its format and an sRGB view format is registered alongside.

/// MSAA samples for both pipelines. 4 is guaranteed for renderable formats.
pub const SAMPLE_COUNT: u32 = 4;

/// Prefer an sRGB swapchain format, else the first one offered.
pub fn pick_surface_format(offered: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    offered
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| offered.first().copied())
}

/// The format passes render in. Same as the surface when it is already sRGB
/// or has no sRGB twin (e.g. `Rgba16Float`).
#[inline]
pub fn render_format(surface_format: wgpu::TextureFormat) -> wgpu::TextureFormat {
    surface_format.add_srgb_suffix()
}

/// Extra view formats the surface must be configured with.
pub fn surface_view_formats(surface_format: wgpu::TextureFormat) -> Vec<wgpu::TextureFormat> {
    let view = render_format(surface_format);
    if view == surface_format {
        vec![]
    } else {
        vec![view]
    }
}

/// Premultiplied when offered so the page shows through, else the first.
pub fn pick_alpha_mode(offered: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    offered
        .iter()
        .copied()
        .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
        .or_else(|| offered.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub fn multisample_state() -> wgpu::MultisampleState {
    wgpu::MultisampleState {
        count: SAMPLE_COUNT,
        mask: !0,
        alpha_to_coverage_enabled: false,
    }
}

pub fn msaa_descriptor(
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> wgpu::TextureDescriptor<'static> {
    wgpu::TextureDescriptor {
        label: Some("msaa_color"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    }
}

/// Multisampled colour buffer resolved into the swapchain each frame.
pub(crate) struct MsaaTarget {
    _texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl MsaaTarget {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let texture = device.create_texture(&msaa_descriptor(format, width, height));
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}
