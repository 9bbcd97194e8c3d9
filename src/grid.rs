use crate::{Coordinate, Error, Result};

/// A fixed-size rectangular field holding exactly one value per coordinate.
///
/// The field spans `(0, 0)..=(xmax, ymax)` inclusively and never changes its
/// dimensions after construction. Values are stored row by row, so
/// [`Grid::iter`] always yields them in row-major order (`y` outer, `x` inner).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    max: Coordinate,
    values: Vec<T>,
}

/// Number of values a grid spanning `(0, 0)..=(xmax, ymax)` holds.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if the values of type `T` would not fit
/// into a single allocation.
fn checked_len<T>(xmax: u32, ymax: u32) -> Result<usize> {
    let limit = isize::MAX as usize / std::mem::size_of::<T>().max(1);
    (xmax as usize)
        .checked_add(1)
        .zip((ymax as usize).checked_add(1))
        .and_then(|(width, height)| width.checked_mul(height))
        .filter(|&len| len <= limit)
        .ok_or_else(|| {
            Error::InvalidConfig(format!(
                "grid bounds ({}, {}) are too large",
                xmax, ymax
            ))
        })
}

impl<T: Clone> Grid<T> {
    /// Creates a grid where every coordinate holds a copy of `default`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the number of coordinates
    /// overflows.
    pub fn new(xmax: u32, ymax: u32, default: T) -> Result<Self> {
        let len = checked_len::<T>(xmax, ymax)?;
        Ok(Self {
            max: Coordinate::new(xmax.into(), ymax.into()),
            values: vec![default; len],
        })
    }
}

impl<T> Grid<T> {
    /// Creates a grid by evaluating `f` for every coordinate in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the number of coordinates
    /// overflows; `f` is not called in that case.
    pub fn from_fn(xmax: u32, ymax: u32, mut f: impl FnMut(Coordinate) -> T) -> Result<Self> {
        let len = checked_len::<T>(xmax, ymax)?;
        let max = Coordinate::new(xmax.into(), ymax.into());
        let mut values = Vec::with_capacity(len);
        values.extend(
            (0..=max.y)
                .flat_map(|y| (0..=max.x).map(move |x| Coordinate::new(x, y)))
                .map(&mut f),
        );
        Ok(Self { max, values })
    }

    pub fn xmax(&self) -> u32 {
        self.max.x as u32
    }

    pub fn ymax(&self) -> u32 {
        self.max.y as u32
    }

    /// The largest coordinate of the grid.
    pub fn max(&self) -> Coordinate {
        self.max
    }

    pub fn width(&self) -> usize {
        self.max.x as usize + 1
    }

    pub fn height(&self) -> usize {
        self.max.y as usize + 1
    }

    /// Total number of coordinates, never zero.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks if `coord` belongs to the grid. Never fails.
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.is_within(self.max)
    }

    fn index(&self, coord: Coordinate) -> Result<usize> {
        if !self.contains(coord) {
            return Err(Error::OutOfBounds {
                coord,
                max: self.max,
            });
        }
        Ok(coord.x as usize + coord.y as usize * self.width())
    }

    /// Returns the value stored at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `coord` is outside of the grid.
    pub fn get(&self, coord: Coordinate) -> Result<&T> {
        let i = self.index(coord)?;
        Ok(&self.values[i])
    }

    /// Returns a mutable reference to the value stored at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `coord` is outside of the grid.
    pub fn get_mut(&mut self, coord: Coordinate) -> Result<&mut T> {
        let i = self.index(coord)?;
        Ok(&mut self.values[i])
    }

    /// Replaces the value stored at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `coord` is outside of the grid;
    /// the grid is left untouched in that case.
    pub fn set(&mut self, coord: Coordinate, value: T) -> Result<()> {
        let i = self.index(coord)?;
        self.values[i] = value;
        Ok(())
    }

    /// Iterates over all coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let max = self.max;
        (0..=max.y).flat_map(move |y| (0..=max.x).map(move |x| Coordinate::new(x, y)))
    }

    /// Iterates over `(coordinate, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        self.coordinates().zip(self.values.iter())
    }

    /// Builds a grid of the same dimensions from the values of this one.
    pub fn map<U>(&self, mut f: impl FnMut(Coordinate, &T) -> U) -> Grid<U> {
        Grid {
            max: self.max,
            values: self.iter().map(|(coord, value)| f(coord, value)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_every_coordinate() {
        let grid = Grid::new(3, 1, 7u8).unwrap();
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 2);
        assert!(grid.iter().all(|(_, &v)| v == 7));
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = Grid::new(4, 3, 0u32).unwrap();
        for coord in grid.coordinates().collect::<Vec<_>>() {
            let value = (coord.x * 10 + coord.y) as u32;
            grid.set(coord, value).unwrap();
            assert_eq!(*grid.get(coord).unwrap(), value);
        }
        // earlier writes survive later ones
        assert_eq!(*grid.get(Coordinate::new(2, 1)).unwrap(), 21);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(2, 2, false).unwrap();
        for coord in [
            Coordinate::new(3, 0),
            Coordinate::new(0, 3),
            Coordinate::new(-1, 1),
            Coordinate::new(1, -1),
        ] {
            assert!(!grid.contains(coord));
            assert_eq!(
                grid.get(coord),
                Err(Error::OutOfBounds {
                    coord,
                    max: Coordinate::new(2, 2)
                })
            );
            assert!(grid.set(coord, true).is_err());
        }
        assert!(grid.iter().all(|(_, &v)| !v));
    }

    #[test]
    fn test_iteration_is_row_major() {
        let grid = Grid::from_fn(2, 1, |c| c).unwrap();
        let order: Vec<_> = grid.iter().map(|(c, &v)| (c, v)).collect();
        let expected = [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)];
        assert_eq!(order.len(), expected.len());
        for ((coord, value), &(x, y)) in order.iter().zip(expected.iter()) {
            assert_eq!(*coord, Coordinate::new(x, y));
            assert_eq!(coord, value);
        }
    }

    #[test]
    fn test_map_keeps_dimensions() {
        let grid = Grid::from_fn(3, 2, |c| c.x + c.y).unwrap();
        let even = grid.map(|_, v| v % 2 == 0);
        assert_eq!(even.max(), grid.max());
        assert_eq!(*even.get(Coordinate::new(1, 1)).unwrap(), true);
        assert_eq!(*even.get(Coordinate::new(2, 1)).unwrap(), false);
    }

    #[test]
    fn test_oversized_bounds_are_rejected() {
        assert!(matches!(
            Grid::new(u32::MAX, u32::MAX, false),
            Err(Error::InvalidConfig(_))
        ));
        let mut calls = 0;
        assert!(Grid::from_fn(u32::MAX, u32::MAX, |_| {
            calls += 1;
            0u64
        })
        .is_err());
        assert_eq!(calls, 0);

        let grid = Grid::new(0, 0, ()).unwrap();
        assert_eq!(grid.len(), 1);
    }
}
