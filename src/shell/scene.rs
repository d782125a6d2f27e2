//! Frame composition: which ranges of the shell mesh to draw, in what order,
//! with which per-pass parameters.

use std::f32::consts::PI;

use glam::Mat4;

use crate::error::Result;
use crate::shell::draw_range::{
    CONSTRUCTION_CURVES, DrawRange, construction_curve_slices, range_for,
};
use crate::shell::mesh::MeshLayout;
use crate::shell::morphospace::{MorphospaceConstants, ReferenceCurve};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    pub pitch_deg: f32,
    pub roll_deg: f32,
    pub shell_opacity: f32,
    pub multispiral: bool,
    pub generating_curve: bool,
    pub archimedean: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            pitch_deg: 0.0,
            roll_deg: 135.0,
            shell_opacity: 1.0,
            multispiral: false,
            generating_curve: false,
            archimedean: false,
        }
    }
}

impl SceneConfig {
    /// Model rotation applied to every pass.
    pub fn rotation(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch_deg.to_radians())
            * Mat4::from_rotation_y(PI)
            * Mat4::from_rotation_z(-self.roll_deg.to_radians())
    }

    /// Enabled layers in draw order. Archimedean coiling has no multispiral
    /// family.
    pub fn layers(&self) -> Vec<SceneLayer> {
        let mut layers = Vec::with_capacity(4);
        if self.multispiral && !self.archimedean {
            layers.push(SceneLayer::Multispiral);
        }
        if self.generating_curve {
            layers.push(SceneLayer::Centerline);
        }
        layers.push(SceneLayer::Shell);
        if self.generating_curve {
            layers.push(SceneLayer::GeneratingCurves);
        }
        layers
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneLayer {
    /// Thin tubes along the suture and lobe helicospirals.
    Multispiral,
    /// Thin tube along the generating-curve centre.
    Centerline,
    Shell,
    /// Isolated aperture cross-sections.
    GeneratingCurves,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassParams {
    pub anchor: ReferenceCurve,
    pub fixed_color: [f32; 3],
    pub fixed_color_factor: f32,
    pub aperture_size: f32,
    pub alpha: f32,
    pub revolution_offset: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPass {
    pub layer: SceneLayer,
    pub params: PassParams,
    pub cull_back_faces: bool,
    pub range: DrawRange,
}

const GREEN: [f32; 3] = [0.0, 0.5, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 0.8];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
const RED: [f32; 3] = [1.0, 0.0, 0.0];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Builds the ordered pass list for one frame.
pub fn compose(
    layout: &MeshLayout,
    constants: &MorphospaceConstants,
    config: &SceneConfig,
    index_base_offset: u64,
) -> Result<Vec<RenderPass>> {
    let full = DrawRange::full(layout, index_base_offset)?;
    let mut passes = Vec::new();

    for layer in config.layers() {
        match layer {
            SceneLayer::Multispiral => {
                let bands = [
                    (constants.suture, GREEN, 0.015),
                    (constants.abaxial, BLUE, 0.015),
                    (constants.adapical, YELLOW, 0.015),
                    (constants.abapical, BLACK, 0.025),
                ];
                for (anchor, fixed_color, aperture_size) in bands {
                    passes.push(RenderPass {
                        layer,
                        params: PassParams {
                            anchor,
                            fixed_color,
                            fixed_color_factor: 0.5,
                            aperture_size,
                            alpha: 1.0,
                            revolution_offset: 0.15 * PI,
                        },
                        cull_back_faces: true,
                        range: full,
                    });
                }
            }
            SceneLayer::Centerline => passes.push(RenderPass {
                layer,
                params: PassParams {
                    anchor: constants.center,
                    fixed_color: RED,
                    fixed_color_factor: 0.5,
                    aperture_size: 0.05,
                    alpha: 1.0,
                    revolution_offset: 0.45 * PI,
                },
                cull_back_faces: true,
                range: full,
            }),
            SceneLayer::Shell => passes.push(RenderPass {
                layer,
                params: PassParams {
                    anchor: constants.center,
                    fixed_color: WHITE,
                    fixed_color_factor: 0.7,
                    aperture_size: 1.0,
                    alpha: config.shell_opacity.clamp(0.0, 1.0),
                    revolution_offset: 0.0,
                },
                cull_back_faces: false,
                range: full,
            }),
            SceneLayer::GeneratingCurves => {
                let params = PassParams {
                    anchor: constants.center,
                    fixed_color: RED,
                    fixed_color_factor: 0.5,
                    aperture_size: 1.0,
                    alpha: 0.9,
                    revolution_offset: 0.0,
                };
                let slices = construction_curve_slices(layout, CONSTRUCTION_CURVES)?;
                for range in range_for(layout, &slices, index_base_offset)? {
                    passes.push(RenderPass {
                        layer,
                        params,
                        cull_back_faces: false,
                        range,
                    });
                }
                // Aperture strip once more, offset along the revolution.
                passes.push(RenderPass {
                    layer,
                    params: PassParams {
                        revolution_offset: 0.15 * PI,
                        ..params
                    },
                    cull_back_faces: false,
                    range: DrawRange::slice(layout, 0, index_base_offset)?,
                });
            }
        }
    }

    tracing::debug!(passes = passes.len(), "composed shell scene");
    Ok(passes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::mesh::{MeshVariant, ThetaDomain};
    use crate::error::ShellError;
    use crate::shell::morphospace::MorphTunables;

    fn fixtures() -> (MeshLayout, MorphospaceConstants) {
        let variant = MeshVariant::Standard;
        let layout = MeshLayout {
            num_theta: variant.num_theta(),
            num_aperture: variant.num_aperture(),
            max_theta: variant.max_theta(),
            domain: ThetaDomain::Trailing,
        };
        let constants = MorphospaceConstants::derive(&MorphTunables::default()).unwrap();
        (layout, constants)
    }

    #[test]
    fn test_default_scene_draws_only_shell() {
        let (layout, constants) = fixtures();
        let passes = compose(&layout, &constants, &SceneConfig::default(), 0).unwrap();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].layer, SceneLayer::Shell);
        assert_eq!(passes[0].range.element_count, layout.index_count());
        assert!(!passes[0].cull_back_faces);
    }

    #[test]
    fn test_layer_order() {
        let config = SceneConfig {
            multispiral: true,
            generating_curve: true,
            ..Default::default()
        };
        assert_eq!(
            config.layers(),
            vec![
                SceneLayer::Multispiral,
                SceneLayer::Centerline,
                SceneLayer::Shell,
                SceneLayer::GeneratingCurves
            ]
        );
    }

    #[test]
    fn test_archimedean_excludes_multispiral() {
        let config = SceneConfig {
            multispiral: true,
            archimedean: true,
            ..Default::default()
        };
        assert_eq!(config.layers(), vec![SceneLayer::Shell]);
    }

    #[test]
    fn test_full_scene_pass_counts() {
        let (layout, constants) = fixtures();
        let config = SceneConfig {
            multispiral: true,
            generating_curve: true,
            shell_opacity: 0.4,
            ..Default::default()
        };
        let passes = compose(&layout, &constants, &config, 0).unwrap();
        // 4 bands + centerline + shell + 30 curves + aperture
        assert_eq!(passes.len(), 37);

        let shell = passes.iter().find(|p| p.layer == SceneLayer::Shell).unwrap();
        assert_eq!(shell.params.alpha, 0.4);

        let curves: Vec<_> = passes
            .iter()
            .filter(|p| p.layer == SceneLayer::GeneratingCurves)
            .collect();
        assert_eq!(curves.len(), 31);
        assert!(curves.iter().all(|p| p.range.element_count == layout.strip_len()));
        let last = curves.last().unwrap();
        assert_eq!(last.range, DrawRange::slice(&layout, 0, 0).unwrap());
        assert!((last.params.revolution_offset - 0.15 * PI).abs() < 1e-6);
    }

    #[test]
    fn test_multispiral_bands_use_reference_anchors() {
        let (layout, constants) = fixtures();
        let config = SceneConfig {
            multispiral: true,
            ..Default::default()
        };
        let passes = compose(&layout, &constants, &config, 0).unwrap();
        let anchors: Vec<_> = passes
            .iter()
            .filter(|p| p.layer == SceneLayer::Multispiral)
            .map(|p| p.params.anchor)
            .collect();
        assert_eq!(
            anchors,
            vec![
                constants.suture,
                constants.abaxial,
                constants.adapical,
                constants.abapical
            ]
        );
    }

    #[test]
    fn test_opacity_is_clamped() {
        let (layout, constants) = fixtures();
        let config = SceneConfig {
            shell_opacity: 3.0,
            ..Default::default()
        };
        let passes = compose(&layout, &constants, &config, 0).unwrap();
        assert_eq!(passes[0].params.alpha, 1.0);
    }

    #[test]
    fn test_rotation_at_rest_flips_about_y() {
        let config = SceneConfig {
            pitch_deg: 0.0,
            roll_deg: 0.0,
            ..Default::default()
        };
        let x = config.rotation().transform_vector3(glam::Vec3::X);
        assert!((x - glam::Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_malformed_layout_is_an_error() {
        let (layout, constants) = fixtures();
        let layout = MeshLayout {
            num_theta: 1,
            ..layout
        };
        let config = SceneConfig {
            generating_curve: true,
            ..Default::default()
        };
        assert!(matches!(
            compose(&layout, &constants, &config, 0),
            Err(ShellError::InvalidResolution { num_theta: 1, .. })
        ));
    }
}
