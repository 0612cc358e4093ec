use crate::error::{Result, ShapeError};

/// Target sizes for the last `len()` axes of an array.
///
/// Leading axes not covered by the shape keep their own size, so a
/// `TrailingShape` of `[128, 128]` applied to a `3 × 100 × 140` array
/// targets `3 × 128 × 128`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrailingShape(Vec<usize>);

impl TrailingShape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Expand to a full target shape for an array of shape `input`.
    pub fn broadcast(&self, input: &[usize]) -> Result<Vec<usize>> {
        let ndim = input.len();
        if self.len() > ndim {
            return Err(ShapeError::RankMismatch {
                given: self.len(),
                ndim,
            });
        }
        let lead = ndim - self.len();
        Ok(input[..lead].iter().chain(self.0.iter()).copied().collect())
    }
}

impl From<Vec<usize>> for TrailingShape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl From<&[usize]> for TrailingShape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for TrailingShape {
    fn from(dims: [usize; N]) -> Self {
        Self(dims.to_vec())
    }
}

/// Split `total` between the low and high side of an axis, odd element high.
#[inline]
pub(crate) fn split_center(total: usize) -> (usize, usize) {
    let low = total / 2;
    (low, total - low)
}
