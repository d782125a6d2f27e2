//! Reference helicospirals of a logarithmically coiled shell.
//!
//! Every anchor is a `(R0, beta)` pair: a point at distance `R0` from the
//! coiling apex, at angle `beta` from the coiling axis. The vertex stage sweeps
//! the anchor along `R0 * exp(k * theta)` to trace the corresponding curve on
//! the shell surface.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

const SIN_60: f64 = 0.866_025_403_784_438_6;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphTunables {
    /// Logarithmic growth rate `k`, the cotangent of the spiral angle.
    pub spiral_expansion: f64,
    /// Angle between the coiling axis and the generating-curve centre.
    pub center_beta: f64,
    /// Distance from the apex to the generating-curve centre at `theta = 0`.
    pub center_r0: f64,
    /// Radial widening of the suture relative to the aperture radius.
    pub suture_flare: f64,
    /// Size of the abapical lobe as a fraction of the aperture radius.
    pub abapical_lobe: f64,
    pub adapical_beta_ratio: f64,
    pub adaxial_scale: f64,
}

impl Default for MorphTunables {
    fn default() -> Self {
        Self {
            spiral_expansion: 1.0 / 85.0_f64.to_radians().tan(),
            center_beta: PI / 6.5,
            center_r0: 1.15,
            suture_flare: 1.075,
            abapical_lobe: 0.5,
            adapical_beta_ratio: 1.99,
            adaxial_scale: 0.9,
        }
    }
}

impl MorphTunables {
    /// Radius multiplier over one full whorl (Raup's `W`).
    pub fn raup_w(&self) -> f64 {
        (self.spiral_expansion * TAU).exp()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceCurve {
    pub r0: f64,
    pub beta: f64,
}

impl ReferenceCurve {
    fn from_offset(r: f64, z: f64, scale: f64) -> Self {
        Self {
            r0: scale * r.hypot(z),
            beta: r.atan2(z),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphospaceConstants {
    pub spiral_expansion: f64,
    pub raup_w: f64,
    pub suture_phi: f64,
    pub center: ReferenceCurve,
    pub suture: ReferenceCurve,
    pub abaxial: ReferenceCurve,
    pub abapical: ReferenceCurve,
    pub adapical: ReferenceCurve,
    pub adaxial: ReferenceCurve,
}

impl MorphospaceConstants {
    pub fn derive(tunables: &MorphTunables) -> Result<Self> {
        let MorphTunables {
            spiral_expansion,
            center_beta,
            center_r0,
            ..
        } = *tunables;

        let w = tunables.raup_w();
        let half_w = w / 2.0;
        let finite = half_w.is_finite() && center_beta.is_finite() && center_r0.is_finite();
        if !finite || half_w > 1.0 + 1e-12 {
            return Err(ShellError::SutureUndefined { raup_w: w });
        }

        let z0 = center_r0 * center_beta.cos();
        let r0 = center_r0 * center_beta.sin();

        // The suture is where the aperture touches the previous whorl, which
        // has shrunk by a factor W.
        let suture_phi = FRAC_PI_2 + center_beta - half_w.min(1.0).acos();
        let suture = ReferenceCurve::from_offset(
            tunables.suture_flare * r0 * (1.0 + suture_phi.cos()),
            z0 - r0 * suture_phi.sin(),
            w,
        );

        let abaxial_beta = (2.0 * r0).atan2(z0);
        let abaxial = ReferenceCurve {
            r0: 2.0 * r0 / abaxial_beta.sin(),
            beta: abaxial_beta,
        };

        let lobe = r0 * (1.0 + tunables.abapical_lobe);
        let abapical_beta = lobe.atan2(z0 + r0 * SIN_60);
        let abapical = ReferenceCurve {
            r0: lobe / abapical_beta.sin(),
            beta: abapical_beta,
        };

        let adapical = ReferenceCurve {
            r0: center_r0,
            beta: tunables.adapical_beta_ratio * center_beta,
        };

        let adaxial_r0 = r0 * (1.0 - FRAC_1_SQRT_2);
        let adaxial_z0 = z0 - r0 * FRAC_1_SQRT_2;
        let adaxial_beta = adaxial_r0.atan2(adaxial_z0);
        let adaxial = ReferenceCurve {
            r0: tunables.adaxial_scale * w * w.sqrt() * adaxial_z0 / adaxial_beta.cos(),
            beta: adaxial_beta,
        };

        Ok(Self {
            spiral_expansion,
            raup_w: w,
            suture_phi,
            center: ReferenceCurve {
                r0: center_r0,
                beta: center_beta,
            },
            suture,
            abaxial,
            abapical,
            adapical,
            adaxial,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::LN_2;

    fn assert_rel(actual: f64, expected: f64) {
        let err = ((actual - expected) / expected).abs();
        assert!(err < 1e-9, "{actual} vs {expected} (rel err {err})");
    }

    fn doubling_tunables() -> MorphTunables {
        MorphTunables {
            spiral_expansion: LN_2 / TAU,
            center_beta: PI / 6.5,
            center_r0: 1.15,
            ..Default::default()
        }
    }

    #[test]
    fn test_doubling_whorl_golden_values() {
        let tunables = doubling_tunables();
        assert!((tunables.raup_w() - 2.0).abs() < 1e-12);

        let c = MorphospaceConstants::derive(&tunables).unwrap();
        assert_rel(c.suture_phi, 2.0541182735010186);
        assert_rel(c.suture.r0, 1.2516549535467827);
        assert_rel(c.suture.beta, 0.513682589881515);
        assert_rel(c.abaxial.r0, 1.476262699749631);
        assert_rel(c.abaxial.beta, 0.8096318122351058);
        assert_rel(c.abapical.r0, 1.6841357126667558);
        assert_rel(c.abapical.beta, 0.4961000014578272);
        assert_rel(c.adaxial.r0, 1.6781197961592573);
        assert_rel(c.adaxial.beta, 0.2397364678304666);
    }

    #[test]
    fn test_default_tunables_golden_values() {
        let c = MorphospaceConstants::derive(&MorphTunables::default()).unwrap();
        assert_rel(c.raup_w, 1.732746089871937);
        assert_rel(c.suture_phi, 1.5312151994186969);
        assert_rel(c.suture.r0, 1.3323163888999119);
        assert_rel(c.suture.beta, 0.889491805664504);
        assert_rel(c.adaxial.r0, 1.353257237209202);
        assert_eq!(c.center, ReferenceCurve { r0: 1.15, beta: PI / 6.5 });
        assert_eq!(c.adapical.r0, 1.15);
        assert_rel(c.adapical.beta, 1.99 * PI / 6.5);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let tunables = MorphTunables::default();
        let a = MorphospaceConstants::derive(&tunables).unwrap();
        let b = MorphospaceConstants::derive(&tunables).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fast_expansion_has_no_suture() {
        let tunables = MorphTunables {
            spiral_expansion: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            MorphospaceConstants::derive(&tunables),
            Err(ShellError::SutureUndefined { .. })
        ));
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let tunables = MorphTunables {
            center_r0: f64::INFINITY,
            ..Default::default()
        };
        assert!(MorphospaceConstants::derive(&tunables).is_err());
    }
}
