//! Bilinear interpolation on a uniform grid.

use crate::table::Axis;

/// Lower-left corner of the cell used for a fractional index.
///
/// Truncates toward zero and clamps to `[0, len - 2]`, so queries past either
/// edge reuse the boundary cell and extrapolate linearly.
#[inline]
fn lower_node(frac: f64, len: usize) -> usize {
    let upper = (len - 2) as i64;
    (frac as i64).clamp(0, upper) as usize
}

/// Interpolate the flattened field `z` at `(x, y)`.
///
/// `z` holds `x_axis.len() * y_axis.len()` values with `y` varying fastest.
/// Inside the grid the result is the bilinear blend of the enclosing cell;
/// outside it the boundary cell is extended linearly rather than clamped.
pub fn bilinear(x: f64, y: f64, x_axis: &Axis, y_axis: &Axis, z: &[f64]) -> f64 {
    let ny = y_axis.len();
    debug_assert_eq!(z.len(), x_axis.len() * ny);

    let ix = x_axis.fractional_index(x);
    let iy = y_axis.fractional_index(y);

    let ixl = lower_node(ix, x_axis.len());
    let ixr = ixl + 1;
    let iyl = lower_node(iy, ny);
    let iyr = iyl + 1;

    // Offsets stay unclamped; they leave [0, 1] when extrapolating.
    let tx = ix - ixl as f64;
    let ty = iy - iyl as f64;

    let zl = z[ixl * ny + iyl] + ty * (z[ixl * ny + iyr] - z[ixl * ny + iyl]);
    let zr = z[ixr * ny + iyl] + ty * (z[ixr * ny + iyr] - z[ixr * ny + iyl]);
    zl + tx * (zr - zl)
}
