use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShellError {
    #[error("invalid mesh resolution: num_theta={num_theta} (min 2), num_aperture={num_aperture} (min 1)")]
    InvalidResolution { num_theta: u32, num_aperture: u32 },

    #[error("max_theta must be finite and positive, got {0}")]
    InvalidMaxTheta(f64),

    #[error("{vertices} vertices and {indices} indices cannot be addressed with u32 indices")]
    IndexOverflow { vertices: u64, indices: u64 },

    #[error("slice {slice} out of range (max {max})")]
    SliceOutOfRange { slice: u32, max: u32 },

    #[error("suture angle undefined for whorl expansion W={raup_w} (requires finite W <= 2)")]
    SutureUndefined { raup_w: f64 },
}

pub type Result<T> = std::result::Result<T, ShellError>;
