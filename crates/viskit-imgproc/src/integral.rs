use std::ops::{AddAssign, Mul};

use num_traits::{AsPrimitive, Zero};
use viskit_grid::Grid;

/// Compute the integral image of a grid.
///
/// After the call, `sum[(r, c)]` holds the sum of every source sample in the
/// rectangle spanned by the origin and `(r, c)` inclusive. `sum` is resized
/// to the source extents; previous contents are discarded.
///
/// The sweep runs column by column to match the storage order: the 0-th
/// column is a plain running sum, and each later column adds its own running
/// column sum onto the previous column's already-integrated values. No
/// source sample is visited twice.
///
/// The accumulator type `S` is caller-selectable and must be wide enough to
/// hold the total sum of the grid; overflow is not detected.
///
/// # Arguments
///
/// * `src` - The source grid.
/// * `sum` - The integral grid, resized to the source extents.
///
/// # Example
///
/// ```
/// use viskit_grid::{Grid, GridSize};
/// use viskit_imgproc::integral::integral;
///
/// let src = Grid::<u8>::new(
///     GridSize {
///         width: 2,
///         height: 2,
///     },
///     // columns: [1, 3] and [2, 4]
///     vec![1, 3, 2, 4],
/// ).unwrap();
///
/// let mut sum = Grid::<i32>::from_size_val(src.size(), 0);
/// integral(&src, &mut sum);
///
/// assert_eq!(sum[(0, 0)], 1);
/// assert_eq!(sum[(0, 1)], 3);
/// assert_eq!(sum[(1, 0)], 4);
/// assert_eq!(sum[(1, 1)], 10);
/// ```
pub fn integral<T, S>(src: &Grid<T>, sum: &mut Grid<S>)
where
    T: Copy + AsPrimitive<S>,
    S: Copy + Default + Zero + AddAssign + 'static,
{
    sum.resize(src.size());

    let rows = src.rows();
    let cols = src.cols();
    if rows == 0 || cols == 0 {
        return;
    }

    // 0-th column: plain running sum
    let mut s = S::zero();
    let col0 = sum.col_mut(0);
    for (y, &it) in src.col(0).iter().enumerate() {
        s += it.as_();
        col0[y] = s;
    }

    // each later column reuses the previous column's integral
    let data = sum.as_slice_mut();
    for x in 1..cols {
        let (head, tail) = data.split_at_mut(x * rows);
        let prev = &head[(x - 1) * rows..];
        let cur = &mut tail[..rows];

        let mut s = S::zero();
        for (y, &it) in src.col(x).iter().enumerate() {
            s += it.as_();
            cur[y] = prev[y] + s;
        }
    }
}

/// Compute the integral image and the squared integral image in one sweep.
///
/// Same accumulation scheme as [`integral`]; `sqsum[(r, c)]` additionally
/// holds the sum of squared source samples over the same rectangle. Samples
/// are widened to `Q` before squaring, so a wider accumulator also protects
/// the per-sample square from overflow. Both outputs are resized to the
/// source extents.
///
/// # Arguments
///
/// * `src` - The source grid.
/// * `sum` - The integral grid, resized to the source extents.
/// * `sqsum` - The squared integral grid, resized to the source extents.
pub fn integral_sq<T, S, Q>(src: &Grid<T>, sum: &mut Grid<S>, sqsum: &mut Grid<Q>)
where
    T: Copy + AsPrimitive<S> + AsPrimitive<Q>,
    S: Copy + Default + Zero + AddAssign + 'static,
    Q: Copy + Default + Zero + AddAssign + Mul<Output = Q> + 'static,
{
    sum.resize(src.size());
    sqsum.resize(src.size());

    let rows = src.rows();
    let cols = src.cols();
    if rows == 0 || cols == 0 {
        return;
    }

    let mut s = S::zero();
    let mut sq = Q::zero();
    let sum_col0 = sum.col_mut(0);
    let sq_col0 = sqsum.col_mut(0);
    for (y, &it) in src.col(0).iter().enumerate() {
        let v: S = it.as_();
        let q: Q = it.as_();
        s += v;
        sq += q * q;
        sum_col0[y] = s;
        sq_col0[y] = sq;
    }

    let sum_data = sum.as_slice_mut();
    let sq_data = sqsum.as_slice_mut();
    for x in 1..cols {
        let (sum_head, sum_tail) = sum_data.split_at_mut(x * rows);
        let sum_prev = &sum_head[(x - 1) * rows..];
        let sum_cur = &mut sum_tail[..rows];

        let (sq_head, sq_tail) = sq_data.split_at_mut(x * rows);
        let sq_prev = &sq_head[(x - 1) * rows..];
        let sq_cur = &mut sq_tail[..rows];

        let mut s = S::zero();
        let mut sq = Q::zero();
        for (y, &it) in src.col(x).iter().enumerate() {
            let v: S = it.as_();
            let q: Q = it.as_();
            s += v;
            sq += q * q;
            sum_cur[y] = sum_prev[y] + s;
            sq_cur[y] = sq_prev[y] + sq;
        }
    }
}
