use crate::error::{Result, ShapeError};
use crate::shape::split_center;

use ndarray::{Array3, ArrayBase, ArrayView3, ArrayViewMut3, Axis, Data, Ix3, Slice, s};
use num_traits::Zero;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

const HISTOGRAM_BINS: usize = 256;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Volume {
    pub data: Array3<f32>,
    pub spacing: (f32, f32, f32),
}

/// Axis-aligned box in voxel indices, in `(depth, height, width)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub start: [usize; 3],
    pub size: [usize; 3],
}

impl BoundingBox {
    pub fn end(&self) -> [usize; 3] {
        [
            self.start[0] + self.size[0],
            self.start[1] + self.size[1],
            self.start[2] + self.size[2],
        ]
    }
}

impl Volume {
    pub fn new(data: Array3<f32>, spacing: (f32, f32, f32)) -> Self {
        Self { data, spacing }
    }

    /// Get the dimensions of the volume (depth, height, width)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Get a mutable reference to the underlying data
    pub fn data_mut(&mut self) -> &mut Array3<f32> {
        &mut self.data
    }

    /// Center the volume in a `size` grid, zero padding or cropping each axis.
    pub fn center_crop_or_pad(&self, size: [usize; 3]) -> Result<Volume> {
        Ok(Volume::new(center_crop_or_pad(&self.data, size)?, self.spacing))
    }

    /// Bounding box of the voxels brighter than the Otsu threshold.
    pub fn foreground_bounding_box(&self) -> Result<BoundingBox> {
        foreground_bounding_box(self.data.view())
    }

    /// Crop away the dark background around the foreground bounding box.
    pub fn crop_background(&self) -> Result<Volume> {
        let bbox = self.foreground_bounding_box()?;
        Ok(self.crop_to_box(&bbox))
    }

    fn crop_to_box(&self, bbox: &BoundingBox) -> Volume {
        let [z0, y0, x0] = bbox.start;
        let [z1, y1, x1] = bbox.end();
        Volume::new(
            self.data.slice(s![z0..z1, y0..y1, x0..x1]).to_owned(),
            self.spacing,
        )
    }
}

/// Center `image` in a grid of exactly `size`, in one combined pass.
///
/// Axes that are too small get zero padding split as `diff / 2` low and the
/// rest high; axes that are too large lose `diff / 2` low and the rest high.
///
/// # Errors
///
/// [`ShapeError::SizeMismatch`] if the kept input region and its place in the
/// output grid disagree in shape. That indicates a bug here, not bad input.
pub fn center_crop_or_pad<A, S>(image: &ArrayBase<S, Ix3>, size: [usize; 3]) -> Result<Array3<A>>
where
    A: Clone + Zero,
    S: Data<Elem = A>,
{
    debug!(shape = ?image.shape(), ?size, "center crop or pad");

    let mut out = Array3::zeros(size);
    {
        let mut src = image.view();
        let mut dst = out.view_mut();
        for (axis, &target) in size.iter().enumerate() {
            let current = image.len_of(Axis(axis));
            if target >= current {
                let (low, _) = split_center(target - current);
                dst.slice_axis_inplace(Axis(axis), Slice::from(low..low + current));
            } else {
                let (low, _) = split_center(current - target);
                src.slice_axis_inplace(Axis(axis), Slice::from(low..low + target));
            }
        }
        checked_assign(dst, src)?;
    }
    Ok(out)
}

/// Copy `src` into `dst`, failing with [`ShapeError::SizeMismatch`] instead of
/// broadcasting when the shapes differ.
fn checked_assign<A: Clone>(mut dst: ArrayViewMut3<'_, A>, src: ArrayView3<'_, A>) -> Result<()> {
    if dst.shape() != src.shape() {
        return Err(ShapeError::SizeMismatch {
            expected: dst.shape().to_vec(),
            actual: src.shape().to_vec(),
        });
    }
    dst.assign(&src);
    Ok(())
}

/// Find the bounding box of `volumes[key]` and crop every volume to it.
///
/// # Errors
///
/// Fails if `key` is missing, if the reference has no foreground, or if any
/// volume's shape differs from the reference.
pub fn crop_background_by_key(
    volumes: &HashMap<String, Volume>,
    key: &str,
) -> Result<HashMap<String, Volume>> {
    let reference = volumes
        .get(key)
        .ok_or_else(|| ShapeError::MissingKey(key.to_owned()))?;
    let bbox = reference.foreground_bounding_box()?;

    let expected = reference.dim();
    if let Some((name, volume)) = volumes
        .iter()
        .find(|(_, volume)| volume.dim() != expected)
    {
        let actual = volume.dim();
        return Err(ShapeError::ShapeMismatch {
            key: name.clone(),
            expected: [expected.0, expected.1, expected.2],
            actual: [actual.0, actual.1, actual.2],
        });
    }

    debug!(key, ?bbox, count = volumes.len(), "crop background");
    Ok(volumes
        .par_iter()
        .map(|(name, volume)| (name.clone(), volume.crop_to_box(&bbox)))
        .collect())
}

/// Bounding box of the voxels above the Otsu threshold of `data`.
///
/// Intensities are rescaled to `[0, 255]` and binned; non-finite voxels are
/// treated as background.
pub fn foreground_bounding_box(data: ArrayView3<'_, f32>) -> Result<BoundingBox> {
    let (min, max) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if max <= min {
        return Err(ShapeError::EmptyForeground);
    }

    let scale = HISTOGRAM_BINS as f32 / (max - min);
    let bin = move |v: f32| -> Option<usize> {
        v.is_finite()
            .then(|| (((v - min) * scale) as usize).min(HISTOGRAM_BINS - 1))
    };

    let histogram = data
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|plane| {
            let mut counts = [0u64; HISTOGRAM_BINS];
            for b in plane.iter().filter_map(|&v| bin(v)) {
                counts[b] += 1;
            }
            counts
        })
        .reduce(
            || [0u64; HISTOGRAM_BINS],
            |mut a, b| {
                a.iter_mut().zip(b.iter()).for_each(|(x, y)| *x += y);
                a
            },
        );
    let threshold = otsu_threshold(&histogram);

    let bounds = data
        .axis_iter(Axis(0))
        .into_par_iter()
        .enumerate()
        .filter_map(|(z, plane)| {
            plane
                .indexed_iter()
                .filter(|&(_, &v)| bin(v).is_some_and(|b| b > threshold))
                .fold(None, |acc: Option<[usize; 6]>, ((y, x), _)| {
                    Some(match acc {
                        None => [z, z, y, y, x, x],
                        Some(b) => [z, z, b[2].min(y), b[3].max(y), b[4].min(x), b[5].max(x)],
                    })
                })
        })
        .reduce_with(|a, b| {
            [
                a[0].min(b[0]),
                a[1].max(b[1]),
                a[2].min(b[2]),
                a[3].max(b[3]),
                a[4].min(b[4]),
                a[5].max(b[5]),
            ]
        })
        .ok_or(ShapeError::EmptyForeground)?;

    Ok(BoundingBox {
        start: [bounds[0], bounds[2], bounds[4]],
        size: [
            bounds[1] - bounds[0] + 1,
            bounds[3] - bounds[2] + 1,
            bounds[5] - bounds[4] + 1,
        ],
    })
}

/// Bin index maximizing the between-class variance; bins above it are foreground.
fn otsu_threshold(histogram: &[u64]) -> usize {
    let total: u64 = histogram.iter().sum();
    let weighted_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut background = 0u64;
    let mut weighted_background = 0.0;
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &count) in histogram.iter().enumerate() {
        background += count;
        if background == 0 {
            continue;
        }
        let foreground = total - background;
        if foreground == 0 {
            break;
        }
        weighted_background += i as f64 * count as f64;

        let mean_background = weighted_background / background as f64;
        let mean_foreground = (weighted_total - weighted_background) / foreground as f64;
        let variance = background as f64
            * foreground as f64
            * (mean_background - mean_foreground).powi(2);
        if variance > best.1 {
            best = (i, variance);
        }
    }
    best.0
}
