use rayon::prelude::*;

use viskit_grid::{Grid, GridElement, GridSize};

use crate::border;

/// Retrieve a pixel rectangle from a grid with sub-pixel accuracy.
///
/// Extracts a patch of exactly `patch_size` centered on the fractional
/// coordinate `center = (x, y)`:
///
/// ```text
/// dst(y, x) = src(y + center.y - (patch_h - 1) * 0.5,
///                 x + center.x - (patch_w - 1) * 0.5)
/// ```
///
/// Samples at non-integer coordinates are bilinearly interpolated from the
/// four nearest neighbors. The center must lie inside the source extents;
/// that precondition is the caller's responsibility and is only checked in
/// debug builds. Parts of the rectangle may extend outside the source: those
/// samples replicate the nearest edge row/column, the same resolution as
/// [`crate::border::BorderPolicy::Replicate`].
///
/// When the whole rectangle lies inside the source, interpolation runs with
/// no boundary checks, parallel across output columns; each worker owns one
/// destination column. Interpolated values are written back with a
/// saturating cast.
///
/// # Arguments
///
/// * `src` - The source grid.
/// * `patch_size` - The extents of the extracted patch.
/// * `center` - The `(x, y)` coordinate of the patch center within `src`.
///
/// # Returns
///
/// The extracted patch, sized to `patch_size`.
///
/// # Example
///
/// ```
/// use viskit_grid::{Grid, GridSize};
/// use viskit_imgproc::patch::extract_patch;
///
/// let src = Grid::<u8>::new(
///     GridSize {
///         width: 3,
///         height: 3,
///     },
///     vec![0, 1, 2, 10, 11, 12, 20, 21, 22],
/// ).unwrap();
///
/// // integer center: the patch reproduces the source sub-block exactly
/// let patch = extract_patch(
///     &src,
///     GridSize {
///         width: 1,
///         height: 3,
///     },
///     (1.0, 1.0),
/// );
/// assert_eq!(patch.as_slice(), src.col(1));
/// ```
pub fn extract_patch<T: GridElement>(
    src: &Grid<T>,
    patch_size: GridSize,
    center: (f32, f32),
) -> Grid<T> {
    debug_assert!(center.0 >= 0.0 && center.0 < src.cols() as f32);
    debug_assert!(center.1 >= 0.0 && center.1 < src.rows() as f32);

    let mut dst = Grid::from_size_val(patch_size, T::default());
    if dst.is_empty() || src.is_empty() {
        return dst;
    }

    let rows = src.rows();
    let cols = src.cols();
    let patch_rows = patch_size.height;
    let patch_cols = patch_size.width;

    // top-left corner of the requested rectangle
    let corner_x = center.0 - (patch_cols - 1) as f32 * 0.5;
    let corner_y = center.1 - (patch_rows - 1) as f32 * 0.5;

    let ipx = corner_x.floor() as isize;
    let ipy = corner_y.floor() as isize;

    let ox = corner_x - ipx as f32;
    let oy = corner_y - ipy as f32;

    let a11 = (1.0 - ox) * (1.0 - oy);
    let a12 = ox * (1.0 - oy);
    let a21 = (1.0 - ox) * oy;
    let a22 = ox * oy;

    let interior = ipx >= 0
        && ipy >= 0
        && (ipx as usize) + patch_cols < cols
        && (ipy as usize) + patch_rows < rows;

    if interior {
        let x0 = ipx as usize;
        let y0 = ipy as usize;

        dst.as_slice_mut()
            .par_chunks_exact_mut(patch_rows)
            .enumerate()
            .for_each(|(j, out_col)| {
                let c0 = &src.col(x0 + j)[y0..];
                let c1 = &src.col(x0 + j + 1)[y0..];
                for (i, out) in out_col.iter_mut().enumerate() {
                    let v = c0[i].to_f32() * a11
                        + c0[i + 1].to_f32() * a21
                        + c1[i].to_f32() * a12
                        + c1[i + 1].to_f32() * a22;
                    *out = T::saturate_from_f32(v);
                }
            });
    } else {
        // out-of-range neighbors clamp to the edge row/column
        for j in 0..patch_cols {
            let c0 = src.col(border::replicate(ipx + j as isize, cols));
            let c1 = src.col(border::replicate(ipx + j as isize + 1, cols));
            let out_col = dst.col_mut(j);
            for (i, out) in out_col.iter_mut().enumerate() {
                let r0 = border::replicate(ipy + i as isize, rows);
                let r1 = border::replicate(ipy + i as isize + 1, rows);
                let v = c0[r0].to_f32() * a11
                    + c0[r1].to_f32() * a21
                    + c1[r0].to_f32() * a12
                    + c1[r1].to_f32() * a22;
                *out = T::saturate_from_f32(v);
            }
        }
    }

    dst
}
