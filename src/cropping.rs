use crate::enums::Where;
use crate::error::{Result, ShapeError};
use crate::shape::TrailingShape;

use ndarray::{ArrayBase, ArrayView, Axis, Data, Dimension, Slice};
use rand::Rng;
use tracing::debug;

/// Crop `array` so that `output.shape[i] == input.shape[i] - reduction[i]`.
///
/// `reduction` addresses the trailing axes; leading axes are kept whole.
/// The result is a view into `array`. [`Where::Random`] draws from the
/// thread-local generator, use [`crop_with_rng`] to control it.
///
/// # Errors
///
/// Fails before touching any data if a reduction is negative, larger than
/// its axis, or if there are more reductions than axes.
pub fn crop<'a, S, D>(
    array: &'a ArrayBase<S, D>,
    reduction: &[isize],
    placement: Where,
) -> Result<ArrayView<'a, S::Elem, D>>
where
    S: Data,
    D: Dimension,
{
    crop_with_rng(array, reduction, placement, &mut rand::rng())
}

/// [`crop`] with an explicit random source for [`Where::Random`].
pub fn crop_with_rng<'a, S, D, R>(
    array: &'a ArrayBase<S, D>,
    reduction: &[isize],
    placement: Where,
    rng: &mut R,
) -> Result<ArrayView<'a, S::Elem, D>>
where
    S: Data,
    D: Dimension,
    R: Rng + ?Sized,
{
    let ranges = crop_ranges(array.shape(), reduction, placement, rng)?;
    debug!(shape = ?array.shape(), ?reduction, %placement, "crop");

    let mut view = array.view();
    for (axis, range) in ranges.into_iter().enumerate() {
        if let Some((start, end)) = range {
            view.slice_axis_inplace(Axis(axis), Slice::from(start..end));
        }
    }
    Ok(view)
}

/// Crop `array` to `shape`, which may omit leading axes.
///
/// # Errors
///
/// Fails if `shape` has more axes than `array` or asks for a size larger
/// than the input on any axis.
pub fn crop_to_shape<S, D>(
    array: &ArrayBase<S, D>,
    shape: impl Into<TrailingShape>,
    placement: Where,
) -> Result<ArrayView<'_, S::Elem, D>>
where
    S: Data,
    D: Dimension,
{
    crop_to_shape_with_rng(array, shape, placement, &mut rand::rng())
}

/// [`crop_to_shape`] with an explicit random source for [`Where::Random`].
pub fn crop_to_shape_with_rng<'a, S, D, R>(
    array: &'a ArrayBase<S, D>,
    shape: impl Into<TrailingShape>,
    placement: Where,
    rng: &mut R,
) -> Result<ArrayView<'a, S::Elem, D>>
where
    S: Data,
    D: Dimension,
    R: Rng + ?Sized,
{
    let target = shape.into().broadcast(array.shape())?;
    let reduction = array
        .shape()
        .iter()
        .zip(&target)
        .enumerate()
        .map(|(axis, (&size, &wanted))| {
            if wanted > size {
                Err(ShapeError::ShapeExceedsInput {
                    axis,
                    target: wanted,
                    size,
                })
            } else {
                Ok((size - wanted) as isize)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    crop_with_rng(array, &reduction, placement, rng)
}

/// Kept `start..end` per axis of `shape`, `None` where the axis is untouched.
///
/// Every reduction is validated before the first random draw.
pub(crate) fn crop_ranges<R>(
    shape: &[usize],
    reduction: &[isize],
    placement: Where,
    rng: &mut R,
) -> Result<Vec<Option<(usize, usize)>>>
where
    R: Rng + ?Sized,
{
    let ndim = shape.len();
    if reduction.len() > ndim {
        return Err(ShapeError::RankMismatch {
            given: reduction.len(),
            ndim,
        });
    }
    let lead = ndim - reduction.len();

    let amounts = reduction
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            let axis = lead + i;
            let size = shape[axis];
            if r < 0 {
                return Err(ShapeError::NegativeReduction { axis, reduction: r });
            }
            let r = r as usize;
            if r > size {
                return Err(ShapeError::ReductionExceedsDimension {
                    axis,
                    reduction: r,
                    size,
                });
            }
            Ok(r)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut ranges = vec![None; lead];
    for (i, r) in amounts.into_iter().enumerate() {
        if r == 0 {
            ranges.push(None);
            continue;
        }
        let kept = shape[lead + i] - r;
        let start = match placement {
            Where::Start => 0,
            Where::End => r,
            Where::Center => r / 2,
            Where::Random => rng.random_range(0..=r),
        };
        ranges.push(Some((start, start + kept)));
    }
    Ok(ranges)
}
