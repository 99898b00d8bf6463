//! Backdrop layers drawn into the HDR target: stars, glow objects, burst
//! sparks. All three share one uniform block and are instanced quads.

use super::helpers::{self, InstanceBuffer, ADDITIVE};
use super::targets::HDR_FORMAT;
use stage_core::{GlowInstance, SparkInstance, StarInstance};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    /// rgb + opacity
    pub(crate) star_tint: [f32; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) glow_radius: [f32; 2],
    pub(crate) time: f32,
    pub(crate) star_size: f32,
    pub(crate) pixel_ratio: f32,
    pub(crate) _pad: f32,
}

const STAR_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32];
const GLOW_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    0 => Float32x4, 1 => Float32x4, 2 => Float32x4, 3 => Float32x4,
    4 => Float32x4, 5 => Uint32
];
const SPARK_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    0 => Float32x2, 1 => Float32, 2 => Float32, 3 => Float32x4, 4 => Uint32
];

fn instance_layout<T>(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<T>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes,
    }
}

pub(crate) struct SceneLayers {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    star_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    spark_pipeline: wgpu::RenderPipeline,
    stars: InstanceBuffer,
    glows: InstanceBuffer,
    sparks: InstanceBuffer,
}

impl SceneLayers {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(super::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let star_pipeline = helpers::make_instanced_pipeline(
            device,
            &pl,
            &shader,
            ("vs_star", "fs_star"),
            instance_layout::<StarInstance>(&STAR_ATTRS),
            HDR_FORMAT,
            ADDITIVE,
        );
        let glow_pipeline = helpers::make_instanced_pipeline(
            device,
            &pl,
            &shader,
            ("vs_glow", "fs_glow"),
            instance_layout::<GlowInstance>(&GLOW_ATTRS),
            HDR_FORMAT,
            wgpu::BlendState::ALPHA_BLENDING,
        );
        let spark_pipeline = helpers::make_instanced_pipeline(
            device,
            &pl,
            &shader,
            ("vs_spark", "fs_spark"),
            instance_layout::<SparkInstance>(&SPARK_ATTRS),
            HDR_FORMAT,
            ADDITIVE,
        );

        Self {
            uniform_buffer,
            bind_group,
            star_pipeline,
            glow_pipeline,
            spark_pipeline,
            stars: InstanceBuffer::new::<StarInstance>(device, "star_instances"),
            glows: InstanceBuffer::new::<GlowInstance>(device, "glow_instances"),
            sparks: InstanceBuffer::new::<SparkInstance>(device, "spark_instances"),
        }
    }

    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniforms: &SceneUniforms,
        frame: &super::BackdropFrame,
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        self.stars.upload(device, queue, &frame.stars);
        self.glows.upload(device, queue, &frame.glows);
        self.sparks.upload(device, queue, &frame.sparks);
    }

    /// Stars behind the glow objects, sparks over everything.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        self.stars.draw(pass, &self.star_pipeline);
        self.glows.draw(pass, &self.glow_pipeline);
        self.sparks.draw(pass, &self.spark_pipeline);
    }
}
