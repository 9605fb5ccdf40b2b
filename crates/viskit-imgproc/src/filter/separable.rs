use rayon::prelude::*;

use viskit_grid::{Grid, GridElement};

use crate::error::ImgprocError;
use crate::filter::kernels::gaussian_kernel;

/// Apply a separable 2-D filter to a grid.
///
/// The source is convolved with `kernel_y` down each column and `kernel_x`
/// across the columns, producing an output of the same extents. Taps that
/// fall outside the source contribute zero. Both passes run in parallel,
/// one worker per column. Filtered values are written back with a
/// saturating cast.
///
/// # Arguments
///
/// * `src` - The source grid.
/// * `dst` - The destination grid, same extents as the source.
/// * `kernel_x` - The horizontal taps.
/// * `kernel_y` - The vertical taps.
pub fn separable_filter<T: GridElement>(
    src: &Grid<T>,
    dst: &mut Grid<T>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), ImgprocError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImgprocError::InvalidKernelLength(
            kernel_x.len(),
            kernel_y.len(),
        ));
    }

    if src.size() != dst.size() {
        return Err(ImgprocError::InvalidGridSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rows = src.rows();
    let cols = src.cols();
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let half_x = kernel_x.len() / 2;
    let half_y = kernel_y.len() / 2;

    // vertical pass, streaming down each contiguous column
    let mut temp = vec![0.0f32; rows * cols];
    temp.par_chunks_exact_mut(rows)
        .enumerate()
        .for_each(|(c, temp_col)| {
            let src_col = src.col(c);
            for (r, out) in temp_col.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (k, &w) in kernel_y.iter().enumerate() {
                    let y = r as isize + k as isize - half_y as isize;
                    if y >= 0 && (y as usize) < rows {
                        acc += src_col[y as usize].to_f32() * w;
                    }
                }
                *out = acc;
            }
        });

    // horizontal pass over the vertically filtered columns
    dst.as_slice_mut()
        .par_chunks_exact_mut(rows)
        .enumerate()
        .for_each(|(c, dst_col)| {
            for (r, out) in dst_col.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (k, &w) in kernel_x.iter().enumerate() {
                    let x = c as isize + k as isize - half_x as isize;
                    if x >= 0 && (x as usize) < cols {
                        acc += temp[x as usize * rows + r] * w;
                    }
                }
                *out = T::saturate_from_f32(acc);
            }
        });

    Ok(())
}

/// Blur a grid with a Gaussian kernel built from `sigma`.
///
/// A convenience wrapper over [`separable_filter`] with the kernel from
/// [`gaussian_kernel`] on both axes. Callers that blur repeatedly with the
/// same parameters can build the kernel once through
/// [`crate::filter::KernelCache`] and call [`separable_filter`] directly.
pub fn gaussian_blur<T: GridElement>(
    src: &Grid<T>,
    dst: &mut Grid<T>,
    sigma: f32,
) -> Result<(), ImgprocError> {
    if sigma <= 0.0 {
        return Err(ImgprocError::InvalidSigma(sigma));
    }

    let kernel = gaussian_kernel(sigma);
    separable_filter(src, dst, &kernel, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use viskit_grid::GridSize;

    #[test]
    fn test_separable_filter_box_impulse() -> Result<(), ImgprocError> {
        let size = GridSize {
            width: 5,
            height: 5,
        };

        let mut src = Grid::<f32>::from_size_val(size, 0.0);
        src[(2, 2)] = 1.0;

        let mut dst = Grid::<f32>::from_size_val(size, 0.0);
        let kernel = vec![1.0, 1.0, 1.0];
        separable_filter(&src, &mut dst, &kernel, &kernel)?;

        for r in 0..5 {
            for c in 0..5 {
                let expected = if (1..=3).contains(&r) && (1..=3).contains(&c) {
                    1.0
                } else {
                    0.0
                };
                assert_eq!(dst[(r, c)], expected);
            }
        }

        Ok(())
    }

    #[test]
    fn test_separable_filter_u8_saturates() -> Result<(), ImgprocError> {
        let size = GridSize {
            width: 3,
            height: 3,
        };

        let mut src = Grid::<u8>::from_size_val(size, 0);
        src[(1, 1)] = 255;

        let mut dst = Grid::<u8>::from_size_val(size, 0);
        let kernel = vec![1.0, 1.0, 1.0];
        separable_filter(&src, &mut dst, &kernel, &kernel)?;

        assert!(dst.as_slice().iter().all(|&v| v == 255));

        Ok(())
    }

    #[test]
    fn test_separable_filter_rejects_bad_inputs() {
        let size = GridSize {
            width: 3,
            height: 3,
        };
        let src = Grid::<f32>::from_size_val(size, 0.0);
        let mut dst = Grid::<f32>::from_size_val(size, 0.0);

        assert_eq!(
            separable_filter(&src, &mut dst, &[], &[1.0]),
            Err(ImgprocError::InvalidKernelLength(0, 1))
        );

        let mut small = Grid::<f32>::from_size_val(
            GridSize {
                width: 2,
                height: 2,
            },
            0.0,
        );
        assert_eq!(
            separable_filter(&src, &mut small, &[1.0], &[1.0]),
            Err(ImgprocError::InvalidGridSize(3, 3, 2, 2))
        );
    }

    #[test]
    fn test_gaussian_blur_preserves_interior_constant() -> Result<(), ImgprocError> {
        // away from the zero-padded border a normalized kernel is an
        // identity on constant input
        let size = GridSize {
            width: 9,
            height: 9,
        };
        let src = Grid::<f32>::from_size_val(size, 3.0);
        let mut dst = Grid::<f32>::from_size_val(size, 0.0);

        gaussian_blur(&src, &mut dst, 1.0)?;

        approx::assert_relative_eq!(dst[(4, 4)], 3.0, max_relative = 1e-5);

        Ok(())
    }

    #[test]
    fn test_gaussian_blur_rejects_nonpositive_sigma() {
        let size = GridSize {
            width: 2,
            height: 2,
        };
        let src = Grid::<f32>::from_size_val(size, 0.0);
        let mut dst = Grid::<f32>::from_size_val(size, 0.0);

        assert_eq!(
            gaussian_blur(&src, &mut dst, 0.0),
            Err(ImgprocError::InvalidSigma(0.0))
        );
    }
}
