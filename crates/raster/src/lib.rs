//! CPU-side drawing target for circlepad.
//!
//! The crate owns the 8-bit, three channel bitmap that the preview redraws
//! whenever the radius slider moves, plus the conversion into the byte order
//! the GPU texture expects:
//!
//! ```text
//!   RasterImage (BGR8) ──fill / stroke_circle──▶ RasterImage (BGR8)
//!          │
//!          └─▶ to_display_order() ──▶ Vec<u8> (RGBA8, alpha = 255)
//! ```
//!
//! Types:
//!
//! - `RasterImage` stores row-major BGR pixels with a fixed size.
//! - `Bgr` is a single pixel value in storage order.
//! - `Circle` describes a stroked circle outline.
//! - `RasterSurface` is the seam the frame loop draws through.
//!
//! Functions:
//!
//! - `to_display_order` reorders channels for upload.

mod circle;
mod convert;
mod surface;

pub use circle::Circle;
pub use convert::{to_display_order, DISPLAY_CHANNELS};
pub use surface::{Bgr, RasterError, RasterImage, RasterSurface, RASTER_CHANNELS};
