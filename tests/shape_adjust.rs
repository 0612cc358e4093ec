use ndarray::{Array, Array1, Array3, ArrayD, IxDyn, s};
use quickcheck::{TestResult, quickcheck};
use rand::SeedableRng;
use rand::rngs::StdRng;
use volume_shape::{
    ErrorKind, PadMode, PadOptions, ShapeError, Where, center_crop_or_pad, crop, crop_to_shape,
    crop_with_rng, pad, pad_to_shape,
};

const PLACEMENTS: [Where; 4] = [Where::Start, Where::End, Where::Center, Where::Random];

fn ramp(shape: (usize, usize, usize)) -> Array3<f32> {
    let len = shape.0 * shape.1 * shape.2;
    Array::range(0., len as f32, 1.)
        .into_shape_with_order(shape)
        .unwrap()
}

fn small_array(dims: &[u8]) -> ArrayD<u32> {
    let shape: Vec<usize> = dims.iter().map(|&d| (d % 6) as usize).collect();
    let len = shape.iter().product::<usize>() as u32;
    Array::from_iter(0..len)
        .into_shape_with_order(IxDyn(&shape))
        .unwrap()
}

quickcheck! {
    fn crop_output_shape_matches_reduction(dims: Vec<u8>, cuts: Vec<u8>, policy: u8, seed: u64) -> TestResult {
        if dims.is_empty() || dims.len() > 4 {
            return TestResult::discard();
        }
        let a = small_array(&dims);
        let k = cuts.len().min(a.ndim());
        let lead = a.ndim() - k;
        let reduction: Vec<isize> = cuts[..k]
            .iter()
            .zip(&a.shape()[lead..])
            .map(|(&c, &size)| (c as usize % (size + 1)) as isize)
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let placement = PLACEMENTS[policy as usize % 4];
        let cropped = crop_with_rng(&a, &reduction, placement, &mut rng).unwrap();

        let expected: Vec<usize> = a
            .shape()
            .iter()
            .enumerate()
            .map(|(axis, &size)| {
                if axis < lead { size } else { size - reduction[axis - lead] as usize }
            })
            .collect();
        TestResult::from_bool(cropped.shape() == expected.as_slice())
    }

    fn center_pad_then_center_crop_recovers_input(dims: Vec<u8>, widths: Vec<u8>) -> TestResult {
        if dims.is_empty() || dims.len() > 4 {
            return TestResult::discard();
        }
        let a = small_array(&dims);
        let k = widths.len().min(a.ndim());
        let padding: Vec<isize> = widths[..k].iter().map(|&w| (w % 5) as isize).collect();

        let padded = pad(&a, &padding, &PadOptions::new()).unwrap();
        let back = crop(&padded, &padding, Where::Center).unwrap();
        TestResult::from_bool(back == a)
    }
}

#[test]
fn zero_reduction_returns_the_input() {
    let a = ramp((3, 4, 5));
    for placement in PLACEMENTS {
        assert_eq!(crop(&a, &[0, 0, 0], placement).unwrap(), a);
    }
}

#[test]
fn center_split_parity() {
    let a = Array1::from_iter(0..10);
    let kept = crop(&a, &[3], Where::Center).unwrap();
    assert_eq!(kept.len(), 7);
    assert_eq!(kept, a.slice(s![1..8]));
}

#[test]
fn start_pad_is_undone_by_end_crop() {
    let a = ramp((2, 3, 4));
    let padding = [1, 2, 3];
    let padded = pad(
        &a,
        &padding,
        &PadOptions::new()
            .with_mode(PadMode::Constant)
            .with_value(0.0)
            .with_placement(Where::Start),
    )
    .unwrap();
    assert_eq!(padded.dim(), (3, 5, 7));
    assert_eq!(crop(&padded, &padding, Where::End).unwrap(), a);
}

#[test]
fn crop_past_the_boundary_is_an_invalid_argument() {
    let a = ramp((4, 4, 4));
    let err = crop(&a, &[5, 0, 0], Where::Start).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(matches!(
        err,
        ShapeError::ReductionExceedsDimension { axis: 0, .. }
    ));
}

#[test]
fn shrinking_pad_without_crop_keeps_the_axis() {
    let a = Array1::from_iter(0..8);
    let out = pad(&a, &[-2], &PadOptions::new().with_placement(Where::Center)).unwrap();
    assert_eq!(out.len(), 8);

    let out = pad(&a, &[-2], &PadOptions::new().with_crop(true)).unwrap();
    assert_eq!(out.to_vec(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn center_crop_or_pad_reaches_target_both_ways() {
    let a = ramp((10, 20, 30));
    assert_eq!(center_crop_or_pad(&a, [5, 10, 15]).unwrap().dim(), (5, 10, 15));
    assert_eq!(
        center_crop_or_pad(&a, [192, 224, 192]).unwrap().dim(),
        (192, 224, 192)
    );
}

#[test]
fn crop_to_shape_returns_center_block() {
    let a = ramp((10, 20, 30));
    let out = crop_to_shape(&a, [5, 10, 15], Where::Center).unwrap();
    assert_eq!(out.dim(), (5, 10, 15));
    assert_eq!(out, a.slice(s![2..7, 5..15, 7..22]));
}

#[test]
fn center_crop_or_pad_agrees_with_crop_to_shape() {
    let a = ramp((10, 20, 30));
    let combined = center_crop_or_pad(&a, [5, 10, 15]).unwrap();
    assert_eq!(combined, crop_to_shape(&a, [5, 10, 15], Where::Center).unwrap());
}

#[test]
fn pad_to_shape_with_crop_matches_target() {
    let a = ramp((10, 20, 30));
    let options = PadOptions::new().with_mode(PadMode::Edge).with_crop(true);
    let out = pad_to_shape(&a, [24, 12], &options).unwrap();
    assert_eq!(out.dim(), (10, 24, 12));
    assert_eq!(out.slice(s![.., 2..22, ..]), a.slice(s![.., .., 9..21]));
    assert_eq!(out.slice(s![.., 0, ..]), a.slice(s![.., 0, 9..21]));
    assert_eq!(out.slice(s![.., 23, ..]), a.slice(s![.., 19, 9..21]));
}

#[test]
fn invalid_names_are_rejected() {
    assert_eq!(
        "middle".parse::<Where>(),
        Err(ShapeError::InvalidPlacement("middle".into()))
    );
    assert!(matches!(
        "bogus".parse::<PadMode>(),
        Err(ShapeError::InvalidMode(_))
    ));
}
