use viskit_grid::Grid;

use crate::border;
use crate::ring::RingBuffer;

const KERNEL_SIZE: usize = 5;

/// Element types that can flow through the downsampler's 1-4-6-4-1 taps.
///
/// The 5-tap weighted sums are carried in a widened accumulator so that the
/// integer paths never overflow mid-convolution, and narrowed back in one
/// place where the 256 normalization happens.
pub trait PyramidElement: Copy + Send + Sync {
    /// Widened accumulator for the weighted sums.
    type Acc: Copy + Default + Send + Sync;

    /// One vertical pass: `e0 + 4*e1 + 6*e2 + 4*e3 + e4`.
    fn tap(e0: Self, e1: Self, e2: Self, e3: Self, e4: Self) -> Self::Acc;

    /// One horizontal pass over accumulators, normalized by 256.
    fn fold(a0: Self::Acc, a1: Self::Acc, a2: Self::Acc, a3: Self::Acc, a4: Self::Acc) -> Self;
}

impl PyramidElement for u8 {
    type Acc = i32;

    fn tap(e0: Self, e1: Self, e2: Self, e3: Self, e4: Self) -> i32 {
        e2 as i32 * 6 + (e1 as i32 + e3 as i32) * 4 + (e0 as i32 + e4 as i32)
    }

    fn fold(a0: i32, a1: i32, a2: i32, a3: i32, a4: i32) -> u8 {
        let x = a2 * 6 + (a1 + a3) * 4 + a0 + a4;
        // round to nearest before the shift, not a floor divide
        ((x + 128) >> 8).clamp(0, 255) as u8
    }
}

impl PyramidElement for u16 {
    type Acc = i32;

    fn tap(e0: Self, e1: Self, e2: Self, e3: Self, e4: Self) -> i32 {
        e2 as i32 * 6 + (e1 as i32 + e3 as i32) * 4 + (e0 as i32 + e4 as i32)
    }

    fn fold(a0: i32, a1: i32, a2: i32, a3: i32, a4: i32) -> u16 {
        let x = a2 * 6 + (a1 + a3) * 4 + a0 + a4;
        ((x + 128) >> 8).clamp(0, u16::MAX as i32) as u16
    }
}

impl PyramidElement for f32 {
    type Acc = f32;

    fn tap(e0: Self, e1: Self, e2: Self, e3: Self, e4: Self) -> f32 {
        e2 * 6.0 + (e1 + e3) * 4.0 + (e0 + e4)
    }

    fn fold(a0: f32, a1: f32, a2: f32, a3: f32, a4: f32) -> f32 {
        (a2 * 6.0 + (a1 + a3) * 4.0 + a0 + a4) * (1.0 / 256.0)
    }
}

/// Blur a grid with the 5x5 Gaussian pyramid kernel and halve its resolution.
///
/// This is the downsampling step of Gaussian pyramid construction. The source
/// is convolved with the separable kernel
///
/// ```text
/// [ 1  4  6  4  1 ]
/// [ 4 16 24 16  4 ]
/// [ 6 24 36 24  6 ]   / 256
/// [ 4 16 24 16  4 ]
/// [ 1  4  6  4  1 ]
/// ```
///
/// and then decimated by keeping every other row and column. Coordinates that
/// fall outside the source mirror back in with [`crate::border::BorderPolicy::Reflect101`],
/// the policy used throughout this operation.
///
/// The convolution is streamed column by column: each source column is
/// vertically convolved and decimated exactly once into a five-column sliding
/// window, and every output column is the horizontal 1-4-6-4-1 combination of
/// the window. Advancing one output column reuses three of the five window
/// columns, so the vertical work is not recomputed.
///
/// `dst` must be pre-sized by the caller to the decimated extents,
/// `(n + 1) / 2` along each axis. Mismatched sizing is a caller error and is
/// only checked in debug builds.
///
/// # Arguments
///
/// * `src` - The source grid.
/// * `dst` - The destination grid, pre-sized to the decimated extents.
///
/// # Example
///
/// ```
/// use viskit_grid::{Grid, GridSize};
/// use viskit_imgproc::pyramid::pyrdown;
///
/// let src = Grid::<u8>::from_size_val(
///     GridSize {
///         width: 8,
///         height: 6,
///     },
///     7,
/// );
///
/// let mut dst = Grid::<u8>::from_size_val(
///     GridSize {
///         width: 4,
///         height: 3,
///     },
///     0,
/// );
///
/// pyrdown(&src, &mut dst);
///
/// assert!(dst.as_slice().iter().all(|&v| v == 7));
/// ```
pub fn pyrdown<T: PyramidElement>(src: &Grid<T>, dst: &mut Grid<T>) {
    debug_assert_eq!(dst.rows(), src.rows().div_ceil(2));
    debug_assert_eq!(dst.cols(), src.cols().div_ceil(2));

    let src_rows = src.rows();
    let out_rows = dst.rows();
    let out_cols = dst.cols();

    if out_rows == 0 || out_cols == 0 {
        return;
    }

    let sx0 = -(KERNEL_SIZE as isize) / 2;

    // border lookup tables mapping kernel offsets at the top and bottom edge
    // rows to valid source rows; interior rows index directly
    let mut top = [0usize; KERNEL_SIZE + 2];
    let mut bottom = [0usize; KERNEL_SIZE + 2];
    for (y, (t, b)) in top.iter_mut().zip(bottom.iter_mut()).enumerate() {
        *t = border::reflect101(y as isize + sx0, src_rows);
        *b = border::reflect101((y + (out_rows - 1) * 2) as isize + sx0, src_rows);
    }

    // five vertically-convolved columns in flight, sized to the output height
    let mut window: RingBuffer<Vec<T::Acc>> = RingBuffer::new(KERNEL_SIZE);
    for _ in 0..KERNEL_SIZE {
        window.push(vec![T::Acc::default(); out_rows]);
    }

    let mut sx = sx0;
    for x in 0..out_cols {
        // vertical convolution and decimation of the source columns not yet
        // covered by the window
        while sx <= (x * 2 + 2) as isize {
            let col = window.rotate();
            let s = src.col(border::reflect101(sx, src.cols()));

            col[0] = T::tap(s[top[0]], s[top[1]], s[top[2]], s[top[3]], s[top[4]]);
            for (y, acc) in col.iter_mut().enumerate().take(out_rows - 1).skip(1) {
                *acc = T::tap(
                    s[y * 2 - 2],
                    s[y * 2 - 1],
                    s[y * 2],
                    s[y * 2 + 1],
                    s[y * 2 + 2],
                );
            }
            col[out_rows - 1] = T::tap(
                s[bottom[0]],
                s[bottom[1]],
                s[bottom[2]],
                s[bottom[3]],
                s[bottom[4]],
            );

            sx += 1;
        }

        // horizontal convolution and decimation out of the window
        let (c0, c1, c2, c3, c4) = (&window[0], &window[1], &window[2], &window[3], &window[4]);
        for (y, out) in dst.col_mut(x).iter_mut().enumerate() {
            *out = T::fold(c0[y], c1[y], c2[y], c3[y], c4[y]);
        }
    }
}
