use rayon::prelude::*;

use crate::element::GridElement;
use crate::error::GridError;
use crate::grid::Grid;

impl<T: GridElement> Grid<T> {
    /// Convert the samples of the grid to a different element type with a
    /// saturating cast.
    ///
    /// Out-of-range values clamp to the destination's representable bounds;
    /// integer targets round to nearest. The conversion pass runs in
    /// parallel, one worker per chunk of the flat buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use viskit_grid::{Grid, GridSize};
    ///
    /// let grid = Grid::<f32>::new(
    ///     GridSize {
    ///         width: 2,
    ///         height: 1,
    ///     },
    ///     vec![300.0, -5.0],
    /// ).unwrap();
    ///
    /// let bytes = grid.cast_saturate::<u8>();
    /// assert_eq!(bytes.as_slice(), &[255, 0]);
    /// ```
    pub fn cast_saturate<U: GridElement>(&self) -> Grid<U> {
        let data = self
            .as_slice()
            .par_iter()
            .map(|&x| U::saturate_from_f32(x.to_f32()))
            .collect();

        Grid::from_vec_unchecked(self.size(), data)
    }
}

impl<T: Copy + num_traits::NumCast> Grid<T> {
    /// Convert the samples of the grid to a different element type, failing
    /// on values the target cannot represent.
    pub fn cast<U>(&self) -> Result<Grid<U>, GridError>
    where
        U: num_traits::NumCast,
    {
        let data = self
            .as_slice()
            .iter()
            .map(|&x| U::from(x).ok_or(GridError::CastError))
            .collect::<Result<Vec<U>, GridError>>()?;

        Grid::new(self.size(), data)
    }
}
