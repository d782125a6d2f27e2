//! Helicospiral tube mesh in `(theta, phi)` parameter space.
//!
//! The vertex buffer only stores parameter pairs. World positions are produced
//! by the vertex stage from the morphospace anchors, so one mesh serves the
//! shell surface, every reference helicospiral and the generating curves.

use std::f64::consts::TAU;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

/// Offset applied to the first angular sample so the seam does not produce a
/// zero-area triangle where the aperture loop closes.
pub const SEAM_EPSILON: f64 = 1.0e-6;

/// Five full whorls.
pub const DEFAULT_MAX_THETA: f64 = 5.0 * TAU;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShellVertex {
    pub theta: f32,
    pub phi: f32,
}

/// Direction of the spiral axis parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThetaDomain {
    /// `theta` runs from `-max_theta` up to `0`; the aperture sits at `theta = 0`.
    #[default]
    Trailing,
    /// `theta` runs from `0` up to `max_theta`.
    Leading,
}

/// Resolution presets of the two shell viewers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshVariant {
    #[default]
    Standard,
    Lite,
}

impl MeshVariant {
    pub const ALL: [MeshVariant; 2] = [MeshVariant::Standard, MeshVariant::Lite];

    pub fn num_theta(self) -> u32 {
        match self {
            MeshVariant::Standard => 512,
            MeshVariant::Lite => 192,
        }
    }

    pub fn num_aperture(self) -> u32 {
        match self {
            MeshVariant::Standard => 256,
            MeshVariant::Lite => 96,
        }
    }

    pub fn max_theta(self) -> f64 {
        DEFAULT_MAX_THETA
    }

    pub fn label(self) -> &'static str {
        match self {
            MeshVariant::Standard => "Standard (512 x 256)",
            MeshVariant::Lite => "Lite (192 x 96)",
        }
    }

    pub fn generate(self, domain: ThetaDomain) -> Result<ShellMesh> {
        generate_with_domain(self.num_theta(), self.num_aperture(), self.max_theta(), domain)
    }
}

/// Topology of a generated mesh, without the buffers.
///
/// Draw-range addressing and scene composition only need this, so the
/// buffers can be handed to the GPU and dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshLayout {
    pub num_theta: u32,
    pub num_aperture: u32,
    pub max_theta: f64,
    pub domain: ThetaDomain,
}

impl MeshLayout {
    /// Checks that the layout describes a drawable mesh addressable with
    /// u32 indices.
    pub fn validate(&self) -> Result<()> {
        if self.num_theta < 2 || self.num_aperture < 1 {
            return Err(ShellError::InvalidResolution {
                num_theta: self.num_theta,
                num_aperture: self.num_aperture,
            });
        }
        if !self.max_theta.is_finite() || self.max_theta <= 0.0 {
            return Err(ShellError::InvalidMaxTheta(self.max_theta));
        }

        let ring_len = self.num_aperture as u64 + 1;
        let vertices = ring_len * self.num_theta as u64;
        let indices = 2 * ring_len * (self.num_theta as u64 - 1);
        if vertices > u32::MAX as u64 || indices > u32::MAX as u64 {
            return Err(ShellError::IndexOverflow { vertices, indices });
        }
        Ok(())
    }

    /// Vertices per ring, including the duplicated seam vertex.
    pub fn ring_len(&self) -> u32 {
        self.num_aperture + 1
    }

    pub fn vertex_count(&self) -> u32 {
        self.ring_len() * self.num_theta
    }

    pub fn coordinate_count(&self) -> usize {
        2 * self.vertex_count() as usize
    }

    /// Indices in one ring-pair quad strip.
    pub fn strip_len(&self) -> u32 {
        2 * self.ring_len()
    }

    /// Number of ring-pair strips in the index buffer.
    pub fn strip_count(&self) -> u32 {
        self.num_theta - 1
    }

    pub fn index_count(&self) -> u32 {
        self.strip_len() * self.strip_count()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShellMesh {
    /// Interleaved `(theta, phi)` pairs, ring by ring.
    pub coordinates: Vec<f32>,
    /// Triangle strip, `2 * (num_aperture + 1)` indices per ring pair.
    pub indices: Vec<u32>,
    pub layout: MeshLayout,
}

impl ShellMesh {
    pub fn vertices(&self) -> &[ShellVertex] {
        bytemuck::cast_slice(&self.coordinates)
    }
}

/// Generates the shell mesh with `theta` in `[-max_theta, 0]`.
pub fn generate(num_theta: u32, num_aperture: u32, max_theta: f64) -> Result<ShellMesh> {
    generate_with_domain(num_theta, num_aperture, max_theta, ThetaDomain::Trailing)
}

pub fn generate_with_domain(
    num_theta: u32,
    num_aperture: u32,
    max_theta: f64,
    domain: ThetaDomain,
) -> Result<ShellMesh> {
    let layout = MeshLayout {
        num_theta,
        num_aperture,
        max_theta,
        domain,
    };
    layout.validate()?;

    let theta_step = max_theta / (num_theta - 1) as f64;
    let theta_start = match domain {
        ThetaDomain::Trailing => -max_theta,
        ThetaDomain::Leading => 0.0,
    };
    let phi_step = TAU / num_aperture as f64;

    let mut coordinates = Vec::with_capacity(layout.coordinate_count());
    for j in 0..num_theta {
        let theta = theta_start + j as f64 * theta_step;
        for k in 0..=num_aperture {
            let phi = if k == 0 {
                SEAM_EPSILON
            } else {
                k as f64 * phi_step
            };
            coordinates.push(theta as f32);
            coordinates.push(phi as f32);
        }
    }

    let ring_len = layout.ring_len();
    let mut indices = Vec::with_capacity(layout.index_count() as usize);
    for j in 1..num_theta {
        for k in 0..ring_len {
            indices.push(j * ring_len + k);
            indices.push((j - 1) * ring_len + k);
        }
    }

    tracing::info!(
        num_theta,
        num_aperture,
        vertices = layout.vertex_count(),
        indices = indices.len(),
        "generated shell mesh"
    );

    Ok(ShellMesh {
        coordinates,
        indices,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_mesh_lengths() {
        let mesh = generate(4, 1, TAU).unwrap();
        assert_eq!(mesh.coordinates.len(), 16);
        assert_eq!(mesh.indices.len(), 12);
        assert_eq!(mesh.coordinates[1], 1.0e-6_f32);
        assert_ne!(mesh.coordinates[1], 0.0);
    }

    #[test]
    fn test_minimum_resolution() {
        let mesh = generate(2, 1, 1.0).unwrap();
        assert_eq!(mesh.coordinates.len(), 8);
        assert_eq!(mesh.indices, vec![2, 0, 3, 1]);
        assert_eq!(mesh.coordinates[0], -1.0);
        assert_eq!(mesh.coordinates[4], 0.0);
    }

    #[test]
    fn test_rejects_degenerate_resolution() {
        assert_eq!(
            generate(1, 4, TAU),
            Err(ShellError::InvalidResolution {
                num_theta: 1,
                num_aperture: 4
            })
        );
        assert!(matches!(
            generate(4, 0, TAU),
            Err(ShellError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_max_theta() {
        assert_eq!(generate(4, 4, 0.0), Err(ShellError::InvalidMaxTheta(0.0)));
        assert!(matches!(
            generate(4, 4, f64::NAN),
            Err(ShellError::InvalidMaxTheta(_))
        ));
        assert!(matches!(
            generate(4, 4, -TAU),
            Err(ShellError::InvalidMaxTheta(_))
        ));
    }

    #[test]
    fn test_rejects_index_overflow() {
        assert!(matches!(
            generate(u32::MAX, 2, TAU),
            Err(ShellError::IndexOverflow { .. })
        ));
    }

    #[test]
    fn test_index_count_overflow_without_vertex_overflow() {
        // 2^32 - 2 vertices fit, but the strip needs twice as many indices.
        let layout = MeshLayout {
            num_theta: (1 << 31) - 1,
            num_aperture: 1,
            max_theta: TAU,
            domain: ThetaDomain::Trailing,
        };
        assert_eq!(
            layout.validate(),
            Err(ShellError::IndexOverflow {
                vertices: 4_294_967_294,
                indices: 8_589_934_584,
            })
        );
        assert!(matches!(
            generate((1 << 31) - 1, 1, TAU),
            Err(ShellError::IndexOverflow { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_variants() {
        for variant in MeshVariant::ALL {
            let layout = MeshLayout {
                num_theta: variant.num_theta(),
                num_aperture: variant.num_aperture(),
                max_theta: variant.max_theta(),
                domain: ThetaDomain::Leading,
            };
            assert_eq!(layout.validate(), Ok(()));
        }
    }

    #[test]
    fn test_theta_spans_domain() {
        let mesh = generate(5, 3, 4.0).unwrap();
        let thetas: Vec<f32> = mesh.vertices().iter().step_by(4).map(|v| v.theta).collect();
        assert_eq!(thetas, vec![-4.0, -3.0, -2.0, -1.0, 0.0]);

        let leading = generate_with_domain(5, 3, 4.0, ThetaDomain::Leading).unwrap();
        let thetas: Vec<f32> = leading.vertices().iter().step_by(4).map(|v| v.theta).collect();
        assert_eq!(thetas, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_phi_samples_close_the_loop() {
        let mesh = generate(3, 8, TAU).unwrap();
        let ring = &mesh.vertices()[..9];
        assert_eq!(ring[0].phi, SEAM_EPSILON as f32);
        for (k, v) in ring.iter().enumerate().skip(1) {
            assert_eq!(v.phi, (k as f64 * TAU / 8.0) as f32);
        }
        assert_eq!(ring[8].phi, TAU as f32);
    }

    #[test]
    fn test_strip_pairs_current_and_previous_ring() {
        let mesh = generate(3, 2, TAU).unwrap();
        assert_eq!(mesh.indices, vec![3, 0, 4, 1, 5, 2, 6, 3, 7, 4, 8, 5]);
    }

    #[test]
    fn test_variants() {
        let mesh = MeshVariant::Lite.generate(ThetaDomain::Trailing).unwrap();
        assert_eq!(mesh.layout.num_theta, 192);
        assert_eq!(mesh.layout.num_aperture, 96);
        assert_eq!(mesh.coordinates.len(), 2 * 97 * 192);
        assert_eq!(mesh.indices.len(), 2 * 97 * 191);
        assert_eq!(mesh.layout.index_count() as usize, mesh.indices.len());
    }
}
