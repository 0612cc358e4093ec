use crate::cropping::crop_ranges;
use crate::enums::{PadMode, Where};
use crate::error::{Result, ShapeError};
use crate::shape::{TrailingShape, split_center};

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, RemoveAxis, Slice};
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use tracing::{debug, warn};

/// Element types that can be padded with any [`PadMode`].
pub trait Element: Copy + PartialOrd + Zero + FromPrimitive + ToPrimitive {}

impl<T> Element for T where T: Copy + PartialOrd + Zero + FromPrimitive + ToPrimitive {}

/// Options for [`pad`] and [`pad_to_shape`].
///
/// ```
/// # use volume_shape::{PadMode, PadOptions, Where};
/// let options = PadOptions::new()
///     .with_mode(PadMode::Constant)
///     .with_value(-1.0f32)
///     .with_placement(Where::Start)
///     .with_crop(true);
/// assert!(options.crop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadOptions<A> {
    pub mode: PadMode,
    /// Fill value for [`PadMode::Constant`], zero when unset.
    pub value: Option<A>,
    pub placement: Where,
    /// Crop axes with negative padding. When unset those axes are left as they are.
    pub crop: bool,
}

impl<A> Default for PadOptions<A> {
    fn default() -> Self {
        Self {
            mode: PadMode::default(),
            value: None,
            placement: Where::default(),
            crop: false,
        }
    }
}

impl<A> PadOptions<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: PadMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_value(mut self, value: A) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_placement(mut self, placement: Where) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_crop(mut self, crop: bool) -> Self {
        self.crop = crop;
        self
    }
}

/// Pad `array` so that `output.shape[i] == input.shape[i] + padding[i]`.
///
/// `padding` addresses the trailing axes. Negative entries shrink their
/// axis only when [`PadOptions::crop`] is set, using the same placement;
/// otherwise they are ignored and the axis keeps its size.
///
/// # Errors
///
/// Fails with [`ShapeError::InvalidPlacement`] for [`Where::Random`], with
/// [`ShapeError::RankMismatch`] when `padding` is longer than the array
/// rank, and with [`ShapeError::EmptyAxis`] when a mode needs input values
/// that an empty axis cannot provide.
pub fn pad<A, S, D>(
    array: &ArrayBase<S, D>,
    padding: &[isize],
    options: &PadOptions<A>,
) -> Result<Array<A, D>>
where
    A: Element,
    S: Data<Elem = A>,
    D: RemoveAxis,
{
    let placement = options.placement;
    if placement == Where::Random {
        return Err(ShapeError::InvalidPlacement(placement.to_string()));
    }

    let shape = array.shape();
    let ndim = shape.len();
    if padding.len() > ndim {
        return Err(ShapeError::RankMismatch {
            given: padding.len(),
            ndim,
        });
    }
    let lead = ndim - padding.len();

    let mut widths = vec![(0, 0); ndim];
    for (i, &p) in padding.iter().enumerate() {
        if p > 0 {
            let p = p as usize;
            widths[lead + i] = match placement {
                Where::Start => (p, 0),
                Where::End => (0, p),
                _ => split_center(p),
            };
        }
    }

    let shrink: Vec<isize> = padding
        .iter()
        .map(|&p| p.checked_neg().unwrap_or(isize::MAX).max(0))
        .collect();
    let shrinking = shrink.iter().any(|&c| c > 0);
    if shrinking && !options.crop {
        warn!(
            ?padding,
            "negative padding ignored because cropping is disabled"
        );
    }

    let mut padded_shape = shape.to_vec();
    for (size, (low, high)) in padded_shape.iter_mut().zip(&widths) {
        *size += low + high;
    }
    let crop = if shrinking && options.crop {
        Some(crop_ranges(
            &padded_shape,
            &shrink,
            placement,
            &mut rand::rng(),
        )?)
    } else {
        None
    };

    debug!(?shape, ?padding, mode = %options.mode, %placement, "pad");

    let growing = widths.iter().any(|&(low, high)| low + high > 0);
    let mut out = if growing {
        if options.mode.is_indexed() {
            pad_indexed(array, &widths, options.mode)?
        } else {
            let fill = fill_value(array, options)?;
            pad_constant(array, &widths, fill)
        }
    } else {
        array.to_owned()
    };

    if let Some(ranges) = crop {
        let cropped = {
            let mut view = out.view();
            for (axis, range) in ranges.into_iter().enumerate() {
                if let Some((start, end)) = range {
                    view.slice_axis_inplace(Axis(axis), Slice::from(start..end));
                }
            }
            view.to_owned()
        };
        out = cropped;
    }

    Ok(out)
}

/// Pad `array` to `shape`, which may omit leading axes.
///
/// Axes where `shape` is smaller than the input are cropped only when
/// [`PadOptions::crop`] is set.
pub fn pad_to_shape<A, S, D>(
    array: &ArrayBase<S, D>,
    shape: impl Into<TrailingShape>,
    options: &PadOptions<A>,
) -> Result<Array<A, D>>
where
    A: Element,
    S: Data<Elem = A>,
    D: RemoveAxis,
{
    let target = shape.into().broadcast(array.shape())?;
    let padding: Vec<isize> = target
        .iter()
        .zip(array.shape())
        .map(|(&want, &have)| want as isize - have as isize)
        .collect();

    pad(array, &padding, options)
}

fn fill_value<A, S, D>(array: &ArrayBase<S, D>, options: &PadOptions<A>) -> Result<A>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let mode = options.mode;
    if matches!(mode, PadMode::Min | PadMode::Max | PadMode::Mean) && array.is_empty() {
        let axis = array.shape().iter().position(|&len| len == 0).unwrap_or(0);
        return Err(ShapeError::EmptyAxis {
            axis,
            mode: mode.as_str(),
        });
    }

    let value = match mode {
        PadMode::Constant => options.value.unwrap_or_else(A::zero),
        PadMode::Min => extremum(array.iter().copied(), |v, acc| v < acc),
        PadMode::Max => extremum(array.iter().copied(), |v, acc| v > acc),
        PadMode::Mean => {
            let sum: f64 = array.iter().filter_map(|v| v.to_f64()).sum();
            A::from_f64(sum / array.len() as f64).unwrap_or_else(A::zero)
        }
        _ => A::zero(),
    };
    Ok(value)
}

/// Smallest or largest element by `better`; the first NaN wins if there is one.
fn extremum<A, I, F>(mut values: I, better: F) -> A
where
    A: Element,
    I: Iterator<Item = A>,
    F: Fn(A, A) -> bool,
{
    let Some(mut acc) = values.next() else {
        return A::zero();
    };
    if is_nan(acc) {
        return acc;
    }
    for v in values {
        if is_nan(v) {
            return v;
        }
        if better(v, acc) {
            acc = v;
        }
    }
    acc
}

#[allow(clippy::eq_op)]
#[inline]
fn is_nan<A: PartialEq>(v: A) -> bool {
    v != v
}

fn pad_constant<A, S, D>(array: &ArrayBase<S, D>, widths: &[(usize, usize)], fill: A) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let mut dim = array.raw_dim();
    for (axis, &(low, high)) in widths.iter().enumerate() {
        dim[axis] += low + high;
    }

    let mut out = Array::from_elem(dim, fill);
    {
        let mut inner = out.view_mut();
        for (axis, &(low, _)) in widths.iter().enumerate() {
            let len = array.len_of(Axis(axis));
            inner.slice_axis_inplace(Axis(axis), Slice::from(low..low + len));
        }
        inner.assign(array);
    }
    out
}

fn pad_indexed<A, S, D>(
    array: &ArrayBase<S, D>,
    widths: &[(usize, usize)],
    mode: PadMode,
) -> Result<Array<A, D>>
where
    A: Element,
    S: Data<Elem = A>,
    D: RemoveAxis,
{
    for (axis, &(low, high)) in widths.iter().enumerate() {
        if low + high > 0 && array.len_of(Axis(axis)) == 0 {
            return Err(ShapeError::EmptyAxis {
                axis,
                mode: mode.as_str(),
            });
        }
    }

    let mut out = array.to_owned();
    for (axis, &(low, high)) in widths.iter().enumerate() {
        if low + high == 0 {
            continue;
        }
        let indices = source_indices(array.len_of(Axis(axis)), low, high, mode);
        out = out.select(Axis(axis), &indices);
    }
    Ok(out)
}

/// Input index feeding each output position of a padded axis of length `len`.
fn source_indices(len: usize, low: usize, high: usize, mode: PadMode) -> Vec<usize> {
    let n = len as isize;
    (0..low + len + high)
        .map(|j| {
            let i = j as isize - low as isize;
            let src = match mode {
                PadMode::Wrap => i.rem_euclid(n),
                PadMode::Symmetric => {
                    let m = i.rem_euclid(2 * n);
                    if m < n { m } else { 2 * n - 1 - m }
                }
                PadMode::Reflect if n > 1 => {
                    let period = 2 * (n - 1);
                    let m = i.rem_euclid(period);
                    if m < n { m } else { period - m }
                }
                _ => i.clamp(0, n - 1),
            };
            src as usize
        })
        .collect()
}
