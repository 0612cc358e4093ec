use ndarray::{Array3, ArrayBase, Axis, Data, Ix3};
use rayon::prelude::*;
use tracing::debug;

/// Grow or shrink a binary mask by `amount` voxels.
///
/// A positive `amount` erodes the mask by that radius, a negative one dilates
/// it by `-amount`. Zero returns a copy.
pub fn expand_binary_mask<S>(mask: &ArrayBase<S, Ix3>, amount: isize) -> Array3<bool>
where
    S: Data<Elem = bool> + Sync,
{
    match amount {
        0 => mask.to_owned(),
        a if a > 0 => erode(mask, a as usize),
        a => dilate(mask, a.unsigned_abs()),
    }
}

/// Binary dilation with a ball of `radius` voxels. Outside the volume is background.
pub fn dilate<S>(mask: &ArrayBase<S, Ix3>, radius: usize) -> Array3<bool>
where
    S: Data<Elem = bool> + Sync,
{
    debug!(shape = ?mask.shape(), radius, "dilate");
    let offsets = ball(radius);
    let (depth, height, width) = mask.dim();

    let mut out = Array3::from_elem(mask.raw_dim(), false);
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(z, mut plane)| {
            for ((y, x), voxel) in plane.indexed_iter_mut() {
                *voxel = offsets.iter().any(|&(dz, dy, dx)| {
                    match (
                        shift(z, dz, depth),
                        shift(y, dy, height),
                        shift(x, dx, width),
                    ) {
                        (Some(z), Some(y), Some(x)) => mask[[z, y, x]],
                        _ => false,
                    }
                });
            }
        });
    out
}

/// Binary erosion with a ball of `radius` voxels. Outside the volume is foreground.
pub fn erode<S>(mask: &ArrayBase<S, Ix3>, radius: usize) -> Array3<bool>
where
    S: Data<Elem = bool> + Sync,
{
    let inverted = mask.mapv(|v| !v);
    dilate(&inverted, radius).mapv_into(|v| !v)
}

fn ball(radius: usize) -> Vec<(isize, isize, isize)> {
    let r = radius as isize;
    let mut offsets = Vec::new();
    for dz in -r..=r {
        for dy in -r..=r {
            for dx in -r..=r {
                if dz * dz + dy * dy + dx * dx <= r * r {
                    offsets.push((dz, dy, dx));
                }
            }
        }
    }
    offsets
}

#[inline]
fn shift(index: usize, delta: isize, len: usize) -> Option<usize> {
    index.checked_add_signed(delta).filter(|&i| i < len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::s;

    fn single_voxel() -> Array3<bool> {
        let mut mask = Array3::from_elem((5, 5, 5), false);
        mask[[2, 2, 2]] = true;
        mask
    }

    #[test]
    fn radius_one_ball_is_a_cross() {
        assert_eq!(ball(0), vec![(0, 0, 0)]);
        assert_eq!(ball(1).len(), 7);
    }

    #[test]
    fn dilating_a_voxel_gives_its_face_neighbours() {
        let grown = dilate(&single_voxel(), 1);
        assert_eq!(grown.iter().filter(|&&v| v).count(), 7);
        assert!(grown[[1, 2, 2]] && grown[[2, 3, 2]] && grown[[2, 2, 1]]);
        assert!(!grown[[1, 1, 2]]);
    }

    #[test]
    fn eroding_a_voxel_removes_it() {
        assert!(erode(&single_voxel(), 1).iter().all(|&v| !v));
    }

    #[test]
    fn erosion_treats_outside_as_foreground() {
        let full = Array3::from_elem((3, 3, 3), true);
        assert_eq!(erode(&full, 1), full);
    }

    #[test]
    fn erosion_shrinks_a_cube() {
        let mut mask = Array3::from_elem((7, 7, 7), false);
        mask.slice_mut(s![1..6, 1..6, 1..6]).fill(true);
        let eroded = erode(&mask, 1);
        let mut expected = Array3::from_elem((7, 7, 7), false);
        expected.slice_mut(s![2..5, 2..5, 2..5]).fill(true);
        assert_eq!(eroded, expected);
    }

    #[test]
    fn expand_sign_selects_operation() {
        let mask = single_voxel();
        assert_eq!(expand_binary_mask(&mask, 0), mask);
        assert_eq!(expand_binary_mask(&mask, -1), dilate(&mask, 1));
        assert_eq!(expand_binary_mask(&mask, 1), erode(&mask, 1));
    }

    #[test]
    fn dilation_works_on_views() {
        let mask = single_voxel();
        let grown = dilate(&mask.view(), 2);
        assert!(grown[[0, 2, 2]] && grown[[2, 4, 2]]);
        assert!(!grown[[0, 0, 0]]);
    }
}
