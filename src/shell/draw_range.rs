//! Addressing of contiguous sub-ranges of the shell index buffer.

use std::f64::consts::{E, PI};
use std::ops::Range;

use crate::error::{Result, ShellError};
use crate::shell::mesh::MeshLayout;

pub const INDEX_SIZE: u64 = std::mem::size_of::<u32>() as u64;

/// Number of construction curves drawn by the generating-curve layer.
pub const CONSTRUCTION_CURVES: u32 = 30;

// The offset sequence was tuned on the 512-ring mesh, which has 510 strips
// below the aperture-end strip.
const REFERENCE_SLICE_SPAN: f64 = 510.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawRange {
    /// Ring-pair strips skipped from the start of the index buffer.
    pub element_offset_index: u32,
    pub element_count: u32,
    pub byte_offset: u64,
}

impl DrawRange {
    pub fn full(layout: &MeshLayout, base_offset: u64) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            element_offset_index: 0,
            element_count: layout.index_count(),
            byte_offset: base_offset,
        })
    }

    /// The single ring-pair strip for `slice`, counted back from the
    /// aperture end: slice 0 is the last strip of the mesh.
    pub fn slice(layout: &MeshLayout, slice: u32, base_offset: u64) -> Result<Self> {
        layout.validate()?;
        let max = layout.strip_count() - 1;
        if slice > max {
            return Err(ShellError::SliceOutOfRange { slice, max });
        }

        let element_offset_index = max - slice;
        let element_count = layout.strip_len();
        Ok(Self {
            element_offset_index,
            element_count,
            byte_offset: element_offset_index as u64 * element_count as u64 * INDEX_SIZE
                + base_offset,
        })
    }

    /// First index relative to `base_offset`.
    pub fn first_index(&self, base_offset: u64) -> u32 {
        ((self.byte_offset - base_offset) / INDEX_SIZE) as u32
    }

    /// Index range for `draw_indexed` on a buffer bound at `base_offset`.
    pub fn index_range(&self, base_offset: u64) -> Range<u32> {
        let first = self.first_index(base_offset);
        first..first + self.element_count
    }
}

pub fn range_for(layout: &MeshLayout, slices: &[u32], base_offset: u64) -> Result<Vec<DrawRange>> {
    slices
        .iter()
        .map(|&slice| DrawRange::slice(layout, slice, base_offset))
        .collect()
}

/// Slices for the generating-curve fan.
///
/// Offsets follow `round(e*pi*i + 0.2*i^2)`; the quadratic term widens the
/// spacing toward the apex where the logarithmic spiral packs rings densely.
/// Meshes with fewer rings get the same spread scaled to their length.
pub fn construction_curve_slices(layout: &MeshLayout, count: u32) -> Result<Vec<u32>> {
    layout.validate()?;
    let max = layout.strip_count() - 1;
    let scale = max as f64 / REFERENCE_SLICE_SPAN;

    let mut slices: Vec<u32> = (0..count)
        .map(|i| {
            let i = i as f64;
            let offset = E * PI * i + 0.2 * i * i;
            ((offset * scale).round() as u32).min(max)
        })
        .collect();
    slices.dedup();
    Ok(slices)
}
