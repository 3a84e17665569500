use wgpu::util::{DeviceExt, TextureDataOrder};

use crate::display::{DisplayDevice, DisplayError, DisplaySurface, Extent, SamplingFilter};

/// The preview texture on the GPU, registered with egui so panels can draw it.
///
/// Not `Clone`: the texture is freed once through `GpuDisplayDevice::release`.
pub struct GpuTexture {
    texture: wgpu::Texture,
    queue: wgpu::Queue,
    extent: Extent,
    id: egui::TextureId,
}

impl GpuTexture {
    pub fn id(&self) -> egui::TextureId {
        self.id
    }
}

impl DisplaySurface for GpuTexture {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn upload(&mut self, rgba: &[u8]) -> Result<(), DisplayError> {
        DisplayError::check(self.extent, rgba)?;
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.extent.width * raster::DISPLAY_CHANNELS as u32),
                rows_per_image: Some(self.extent.height),
            },
            texture_size(self.extent),
        );
        Ok(())
    }
}

/// Allocates preview textures on the window's device.
pub(crate) struct GpuDisplayDevice<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub egui: &'a mut egui_wgpu::Renderer,
}

impl DisplayDevice for GpuDisplayDevice<'_> {
    type Surface = GpuTexture;

    fn allocate(
        &mut self,
        extent: Extent,
        rgba: &[u8],
        filter: SamplingFilter,
    ) -> Result<GpuTexture, DisplayError> {
        DisplayError::check(extent, rgba)?;
        let texture = self.device.create_texture_with_data(
            self.queue,
            &wgpu::TextureDescriptor {
                label: Some("circlepad raster texture"),
                size: texture_size(extent),
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            rgba,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let id = self
            .egui
            .register_native_texture(self.device, &view, filter.into());

        Ok(GpuTexture {
            texture,
            queue: self.queue.clone(),
            extent,
            id,
        })
    }

    fn release(&mut self, surface: GpuTexture) {
        self.egui.free_texture(&surface.id);
        surface.texture.destroy();
        tracing::debug!(id = ?surface.id, "released display texture");
    }
}

fn texture_size(extent: Extent) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: extent.width,
        height: extent.height,
        depth_or_array_layers: 1,
    }
}
