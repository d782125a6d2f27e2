//! Property-based invariant tests for the shell mesh generator and the
//! draw-range addressing built on it.
//!
//! 1. Buffer lengths follow the ring/strip counts exactly
//! 2. Every index addresses an existing vertex
//! 3. The seam sample is offset, all other angular samples are exact
//! 4. Generation is deterministic
//! 5. Each strip pairs a ring with its predecessor
//! 6. Every valid slice lands inside the index buffer on a strip boundary
//! 7. Layouts without a ring pair are rejected, never addressed

use proptest::prelude::*;
use shellmorph::ShellError;
use shellmorph::shell::mesh::{
    MeshLayout, SEAM_EPSILON, ThetaDomain, generate, generate_with_domain,
};
use shellmorph::shell::{DrawRange, construction_curve_slices, range_for};

fn resolution() -> impl Strategy<Value = (u32, u32, f64)> {
    (2u32..64, 1u32..48, 0.1f64..100.0)
}

proptest! {
    #[test]
    fn buffer_lengths((num_theta, num_aperture, max_theta) in resolution()) {
        let mesh = generate(num_theta, num_aperture, max_theta).unwrap();
        let ring = (num_aperture + 1) as usize;
        prop_assert_eq!(mesh.coordinates.len(), 2 * ring * num_theta as usize);
        prop_assert_eq!(mesh.indices.len(), 2 * ring * (num_theta as usize - 1));
    }

    #[test]
    fn indices_in_bounds((num_theta, num_aperture, max_theta) in resolution()) {
        let mesh = generate(num_theta, num_aperture, max_theta).unwrap();
        let vertex_count = (num_aperture + 1) * num_theta;
        prop_assert!(mesh.indices.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn angular_samples((num_theta, num_aperture, max_theta) in resolution()) {
        let mesh = generate(num_theta, num_aperture, max_theta).unwrap();
        let ring = (num_aperture + 1) as usize;
        for (n, v) in mesh.vertices().iter().enumerate() {
            let k = n % ring;
            let expected = if k == 0 {
                SEAM_EPSILON as f32
            } else {
                (k as f64 * (std::f64::consts::TAU / num_aperture as f64)) as f32
            };
            prop_assert_eq!(v.phi, expected);
        }
    }

    #[test]
    fn deterministic(
        (num_theta, num_aperture, max_theta) in resolution(),
        leading in any::<bool>(),
    ) {
        let domain = if leading { ThetaDomain::Leading } else { ThetaDomain::Trailing };
        let a = generate_with_domain(num_theta, num_aperture, max_theta, domain).unwrap();
        let b = generate_with_domain(num_theta, num_aperture, max_theta, domain).unwrap();
        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&a.coordinates), bits(&b.coordinates));
        prop_assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn strips_pair_adjacent_rings((num_theta, num_aperture, max_theta) in resolution()) {
        let mesh = generate(num_theta, num_aperture, max_theta).unwrap();
        let ring = num_aperture + 1;
        for pair in mesh.indices.chunks_exact(2) {
            prop_assert_eq!(pair[0] - pair[1], ring);
        }
    }

    #[test]
    fn slices_address_whole_strips(
        (num_theta, num_aperture, max_theta) in resolution(),
        base in 0u64..4,
    ) {
        let mesh = generate(num_theta, num_aperture, max_theta).unwrap();
        let layout = mesh.layout;
        let base_offset = base * 256;
        let all: Vec<u32> = (0..layout.strip_count()).collect();
        let ranges = range_for(&layout, &all, base_offset).unwrap();
        for range in &ranges {
            let r = range.index_range(base_offset);
            prop_assert!(r.end as usize <= mesh.indices.len());
            prop_assert_eq!(r.start % layout.strip_len(), 0);
        }
        prop_assert!(DrawRange::slice(&layout, layout.strip_count(), base_offset).is_err());

        let curves = construction_curve_slices(&layout, 30).unwrap();
        prop_assert!(range_for(&layout, &curves, base_offset).is_ok());
        prop_assert!(curves.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn degenerate_layouts_are_rejected(
        num_theta in 0u32..2,
        num_aperture in 0u32..48,
        slice in 0u32..8,
    ) {
        let layout = MeshLayout {
            num_theta,
            num_aperture,
            max_theta: 1.0,
            domain: ThetaDomain::Trailing,
        };
        let is_resolution_error =
            |e: ShellError| matches!(e, ShellError::InvalidResolution { .. });
        prop_assert!(DrawRange::slice(&layout, slice, 0).is_err_and(is_resolution_error));
        prop_assert!(DrawRange::full(&layout, 0).is_err_and(is_resolution_error));
        prop_assert!(construction_curve_slices(&layout, 30).is_err_and(is_resolution_error));
    }
}
