//! 64-bit Hilbert curve keys for fixed-point coordinates
//!
//! Both axes are mapped onto an unsigned 32-bit lattice and the lattice
//! position is converted into its distance along a Hilbert curve of order 32
//! using Skilling's transpose method ("Programming the Hilbert curve", AIP
//! Conference Proceedings 707, 2004). Sorting points by this key keeps
//! spatial neighbours close together without the quadrant-boundary jumps of
//! a plain Z-order (Morton) key.

use crate::error::{Error, Result};
use crate::types::{COORDINATE_PRECISION, FixedPointCoordinate};

/// Number of bits per axis
const BITS: u32 = u32::BITS;

/// Shifts valid latitudes into the non-negative half of the lattice
const LAT_OFFSET: i32 = 90 * COORDINATE_PRECISION;

/// Shifts valid longitudes into the non-negative half of the lattice
const LON_OFFSET: i32 = 180 * COORDINATE_PRECISION;

/// Compute the Hilbert curve key of a coordinate
///
/// Fails with [`Error::UnsetCoordinate`] if the coordinate still holds the
/// unset sentinel. Any other coordinate, including out-of-range ones, gets a
/// key; only valid coordinates produce keys with geographic meaning.
pub fn hilbert_code(coordinate: &FixedPointCoordinate) -> Result<u64> {
    if !coordinate.is_set() {
        return Err(Error::UnsetCoordinate);
    }

    Ok(hilbert_index(coordinate.lat, coordinate.lon))
}

/// Compute the Hilbert curve key of a raw latitude/longitude pair
///
/// Defined for every pair of `i32` values. Valid coordinates land in one
/// contiguous region of the lattice, so keys do not jump across the equator
/// or the prime meridian.
pub fn hilbert_index(lat: i32, lon: i32) -> u64 {
    let x = lat.wrapping_add(LAT_OFFSET) as u32;
    let y = lon.wrapping_add(LON_OFFSET) as u32;
    lattice_index(x, y)
}

fn lattice_index(x: u32, y: u32) -> u64 {
    let mut axes = [x, y];
    transpose_axes(&mut axes);
    interleave_bits(axes[0], axes[1])
}

/// Rewrite lattice axes in place into Hilbert "transposed" form
///
/// After this step, interleaving the bits of both axes yields the distance
/// along the curve.
fn transpose_axes(axes: &mut [u32; 2]) {
    let m = 1u32 << (BITS - 1);

    // Inverse undo
    let mut q = m;
    while q > 1 {
        let p = q - 1;
        for i in 0..axes.len() {
            if axes[i] & q != 0 {
                // invert
                axes[0] ^= p;
            } else {
                // exchange
                let t = (axes[0] ^ axes[i]) & p;
                axes[0] ^= t;
                axes[i] ^= t;
            }
        }
        q >>= 1;
    }

    // Gray encode
    axes[1] ^= axes[0];

    let mut t = 0;
    let mut q = m;
    while q > 1 {
        if axes[1] & q != 0 {
            t ^= q - 1;
        }
        q >>= 1;
    }

    axes[0] ^= t;
    axes[1] ^= t;
}

/// Merge two axes into one key, `a` taking the upper bit of every pair
fn interleave_bits(a: u32, b: u32) -> u64 {
    (spread_bits(a) << 1) | spread_bits(b)
}

/// Move bit `i` of `v` to bit `2 * i` of the result
fn spread_bits(v: u32) -> u64 {
    let mut v = u64::from(v);
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}
