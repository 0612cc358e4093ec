//! # volume-shape library
//!
//! This crate resizes n-dimensional arrays to exact target shapes by
//! cropping and padding, and carries a few helpers for 3-D medical volumes.

//!
//! Every resize works on the trailing axes of an [`ndarray`] array; leading
//! (batch, channel) axes are passed through untouched. How the size change
//! is distributed along an axis is chosen with [`Where`]:
//!  - Start
//!  - End
//!  - Center (the odd element goes to the high side)
//!  - Random (crop only)
//!
//!  Padding can fill with a constant, with the minimum, maximum or mean of
//!  the input, or copy input values with the edge, reflect, symmetric and
//!  wrap modes (see [`PadMode`]).
//!
//!  For [`Volume`]s the crate also offers a centered crop-or-pad to a fixed
//!  grid, cropping of the dark background found with Otsu's threshold, and
//!  erosion/dilation of binary masks. Work over slices is parallelized with
//!  rayon.
//!
//! # Examples
//!
//! ## Cropping a batch to a spatial shape
//!
//! ```
//! # use volume_shape::{crop_to_shape, Where};
//! # use ndarray::Array3;
//! let batch = Array3::<f32>::zeros((4, 100, 120));
//! let cropped = crop_to_shape(&batch, [96, 96], Where::Center)
//!     .expect("target fits inside the input");
//! assert_eq!(cropped.dim(), (4, 96, 96));
//! ```
//!
//! ## Padding to a shape, cropping where the input is too large
//!
//! ```
//! # use volume_shape::{pad_to_shape, PadMode, PadOptions};
//! # use ndarray::Array3;
//! let image = Array3::<f32>::ones((10, 20, 300));
//! let options = PadOptions::new().with_mode(PadMode::Min).with_crop(true);
//! let resized = pad_to_shape(&image, [192, 224, 192], &options)
//!     .expect("should have padded image");
//! assert_eq!(resized.dim(), (192, 224, 192));
//! ```

pub mod cropping;
pub mod enums;
pub mod error;
pub mod mask;
pub mod padding;
pub mod shape;
pub mod volume;

pub use cropping::{crop, crop_to_shape, crop_to_shape_with_rng, crop_with_rng};
pub use enums::{PadMode, Where};
pub use error::{ErrorKind, Result, ShapeError};
pub use mask::{dilate, erode, expand_binary_mask};
pub use padding::{Element, PadOptions, pad, pad_to_shape};
pub use shape::TrailingShape;
pub use volume::{BoundingBox, Volume, center_crop_or_pad, crop_background_by_key};
