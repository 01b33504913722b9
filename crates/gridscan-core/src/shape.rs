use core::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use crate::ConfigurationError;

/// Highest rank a [coordinate](Coordinate) can hold.
pub const MAX_RANK: usize = 4;

/// The dimensions of a contiguous, row-major tensor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape.
    pub fn new(dims: impl Into<Vec<usize>>) -> Self {
        Self { dims: dims.into() }
    }

    /// The number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// The dimensions, outermost first.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The number of elements held by a tensor of this shape.
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    /// The contiguous strides of this shape.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.rank()];
        for i in (0..self.rank().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Returns the same shape with `axis` resized to `len`.
    pub fn with_dim(&self, axis: usize, len: usize) -> Self {
        let mut dims = self.dims.clone();
        dims[axis] = len;
        Self { dims }
    }

    /// Returns the same shape with the dimensions `a` and `b` swapped.
    pub fn swapped(&self, a: usize, b: usize) -> Self {
        let mut dims = self.dims.clone();
        dims.swap(a, b);
        Self { dims }
    }

    /// Checks that a kernel can be built over this shape: a supported rank and no empty
    /// dimension.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.rank() == 0 || self.rank() > MAX_RANK {
            return Err(ConfigurationError::UnsupportedRank { rank: self.rank() });
        }

        match self.dims.iter().position(|dim| *dim == 0) {
            Some(dim) => Err(ConfigurationError::ZeroDimension { dim }),
            None => Ok(()),
        }
    }

    /// The linear offset of a coordinate in a contiguous buffer.
    pub fn offset(&self, coordinate: &Coordinate) -> usize {
        let mut offset = 0;
        for (i, dim) in self.dims.iter().enumerate() {
            offset = offset * dim + coordinate[i];
        }
        offset
    }

    /// The coordinate of a linear offset in a contiguous buffer.
    pub fn coordinate(&self, mut offset: usize) -> Coordinate {
        let mut coordinate = Coordinate::zeros(self.rank());
        for i in (0..self.rank()).rev() {
            coordinate[i] = offset % self.dims[i];
            offset /= self.dims[i];
        }
        coordinate
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.dims[index]
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.dims)
    }
}

/// A position in a tensor of rank at most [MAX_RANK], stored inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    values: [usize; MAX_RANK],
    rank: u8,
}

impl Coordinate {
    /// The origin of a `rank`-dimensional tensor.
    ///
    /// # Panics
    ///
    /// If the rank is greater than [MAX_RANK].
    pub fn zeros(rank: usize) -> Self {
        assert!(rank <= MAX_RANK, "Coordinates are limited to {MAX_RANK} dimensions");
        Self {
            values: [0; MAX_RANK],
            rank: rank as u8,
        }
    }

    /// Create a coordinate from its components.
    pub fn new(values: &[usize]) -> Self {
        let mut coordinate = Self::zeros(values.len());
        coordinate.values[..values.len()].copy_from_slice(values);
        coordinate
    }

    /// The number of components.
    pub fn rank(&self) -> usize {
        self.rank as usize
    }

    /// The components of the coordinate.
    pub fn as_slice(&self) -> &[usize] {
        &self.values[..self.rank()]
    }

    /// Returns the same coordinate with `axis` set to `value`.
    pub fn with(mut self, axis: usize, value: usize) -> Self {
        self[axis] = value;
        self
    }

    /// Returns the same coordinate with the components `a` and `b` swapped.
    pub fn swapped(mut self, a: usize, b: usize) -> Self {
        self.values.swap(a, b);
        self
    }
}

impl Index<usize> for Coordinate {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl IndexMut<usize> for Coordinate {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let rank = self.rank();
        &mut self.values[..rank][index]
    }
}
