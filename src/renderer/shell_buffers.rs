use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use shellmorph::shell::{
    MeshLayout, MorphospaceConstants, PassParams, ShellMesh, ShellVertex, ThetaDomain,
};

/// Upper bound on passes per frame; a full scene uses 37.
pub const MAX_PASSES: usize = 64;

/// Per-pass shader parameters, bound with a dynamic offset.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct ShellUniforms {
    pub rotation: [[f32; 4]; 4],
    pub r0: f32,
    pub beta: f32,
    pub k: f32,
    pub aperture_size: f32,
    pub fixed_color: [f32; 3],
    pub fixed_color_factor: f32,
    pub alpha: f32,
    pub revolution_offset: f32,
    pub archimedean: u32,
    pub max_theta: f32,
    pub theta_min: f32,
    pub _pad: [f32; 3],
}

/// GPU-resident shell mesh plus the per-pass uniform ring.
pub struct ShellBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_stride: u64,

    pub layout: MeshLayout,
    spiral_expansion: f32,
}

impl ShellBuffers {
    /// Takes ownership of the mesh; only its layout survives the upload.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: ShellMesh,
        constants: &MorphospaceConstants,
    ) -> Self {
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shell Vertex Buffer"),
            size: (mesh.coordinates.len() * std::mem::size_of::<f32>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shell Index Buffer"),
            size: (mesh.indices.len() * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = align_to(std::mem::size_of::<ShellUniforms>() as u64, alignment);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shell Pass Uniform Buffer"),
            size: uniform_stride * MAX_PASSES as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        queue.write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&mesh.coordinates));
        queue.write_buffer(&index_buffer, 0, bytemuck::cast_slice(&mesh.indices));

        Self {
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_stride,
            layout: mesh.layout,
            spiral_expansion: constants.spiral_expansion as f32,
        }
    }

    pub fn uniforms(&self, params: &PassParams, rotation: Mat4, archimedean: bool) -> ShellUniforms {
        let theta_min = match self.layout.domain {
            ThetaDomain::Trailing => -self.layout.max_theta,
            ThetaDomain::Leading => 0.0,
        };

        ShellUniforms {
            rotation: rotation.to_cols_array_2d(),
            r0: params.anchor.r0 as f32,
            beta: params.anchor.beta as f32,
            k: self.spiral_expansion,
            aperture_size: params.aperture_size,
            fixed_color: params.fixed_color,
            fixed_color_factor: params.fixed_color_factor,
            alpha: params.alpha,
            revolution_offset: params.revolution_offset,
            archimedean: archimedean as u32,
            max_theta: self.layout.max_theta as f32,
            theta_min: theta_min as f32,
            _pad: [0.0; 3],
        }
    }

    /// Writes one uniform block per pass at `uniform_stride` spacing.
    /// Returns the number of passes written.
    pub fn upload_uniforms(&self, queue: &wgpu::Queue, uniforms: &[ShellUniforms]) -> usize {
        let count = uniforms.len().min(MAX_PASSES);
        if count < uniforms.len() {
            tracing::warn!(
                requested = uniforms.len(),
                "pass list exceeds {}, truncating",
                MAX_PASSES
            );
        }

        let stride = self.uniform_stride as usize;
        let mut staging = vec![0u8; stride * count];
        for (i, block) in uniforms[..count].iter().enumerate() {
            let bytes = bytemuck::bytes_of(block);
            staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        if !staging.is_empty() {
            queue.write_buffer(&self.uniform_buffer, 0, &staging);
        }
        count
    }
}

fn align_to(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

pub fn shell_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ShellVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_block_size() {
        assert_eq!(std::mem::size_of::<ShellUniforms>(), 128);
    }

    #[test]
    fn test_align_to() {
        assert_eq!(align_to(128, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(300, 256), 512);
    }
}
