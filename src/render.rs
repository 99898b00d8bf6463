use crate::camera;
use crate::constants::*;
use stage_core::{Backdrop, GlowInstance, SparkInstance, Stage, StarInstance};
use web_sys as web;

mod helpers;
mod layers;
mod post;
mod targets;

use layers::{SceneLayers, SceneUniforms};
use post::{PostBindGroups, PostResources};
use targets::RenderTargets;

// Shaders bundled as string constants
pub(crate) static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub(crate) static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

/// Everything the GPU needs from the stage for one frame.
pub struct BackdropFrame {
    pub stars: Vec<StarInstance>,
    pub glows: Vec<GlowInstance>,
    pub sparks: Vec<SparkInstance>,
    pub star_tint: [f32; 4],
    pub bloom_strength: f32,
}

impl BackdropFrame {
    pub fn capture(stage: &Stage) -> Self {
        let backdrop = stage.backdrop();
        let look = backdrop.star_look(stage.ambient());
        Self {
            stars: backdrop.star_instances(),
            glows: backdrop.glow_instances(),
            sparks: Backdrop::spark_instances(stage.bursts()),
            star_tint: look.tint.with_alpha(look.opacity),
            bloom_strength: backdrop.bloom_strength(),
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    layers: SceneLayers,
    targets: RenderTargets,
    post: PostResources,
    bind_groups: PostBindGroups,
    width: u32,
    height: u32,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits; older WebGPU implementations reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let post = PostResources::new(&device, format);
        let bind_groups = post.bind_groups(&device, &targets);
        let layers = SceneLayers::new(&device);
        log::info!("[gpu] surface {width}x{height} {format:?}");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            layers,
            targets,
            post,
            bind_groups,
            width,
            height,
            time_accum: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // offscreen targets and every bind group that samples them
            self.targets.recreate(&self.device, width, height);
            self.bind_groups = self.post.bind_groups(&self.device, &self.targets);
        }
    }

    pub fn render(&mut self, frame: &BackdropFrame, dt_sec: f32, pixel_ratio: f32) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let uniforms = SceneUniforms {
            view_proj: camera::view_proj(self.width, self.height).to_cols_array_2d(),
            star_tint: frame.star_tint,
            resolution: [self.width as f32, self.height as f32],
            glow_radius: [PRIMARY_GLOW_RADIUS, SECONDARY_GLOW_RADIUS],
            time: self.time_accum,
            star_size: STAR_SIZE,
            pixel_ratio,
            _pad: 0.0,
        };
        self.layers.upload(&self.device, &self.queue, &uniforms, frame);
        self.post
            .write_uniforms(&self.queue, self.targets.bloom_size, frame.bloom_strength);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let [r, g, b] = CLEAR_COLOR;
        let clear = wgpu::Color { r, g, b, a: 1.0 };

        // Pass 1: backdrop layers → HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.layers.draw(&mut rpass);
        }

        // Pass 2: bright pass → bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.bind_groups.hdr,
            None,
        );
        // Pass 3: blur horizontal bloom_a → bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.bind_groups.from_bloom_a,
            None,
        );
        // Pass 4: blur vertical bloom_b → bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.bind_groups.from_bloom_b,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            clear,
            &self.post.composite_pipeline,
            &self.bind_groups.hdr,
            Some(&self.bind_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
