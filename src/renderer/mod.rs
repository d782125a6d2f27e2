pub mod camera;
pub mod gpu;
pub mod shell_buffers;

pub use camera::Camera;
pub use gpu::GpuState;
