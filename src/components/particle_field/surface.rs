//! Drawing-surface abstraction.
//!
//! The painter only talks to [`Surface`], so the browser canvas and the
//! recording surface used in tests are interchangeable.

use super::theme::Color;

/// A radial gradient from `inner` to `outer` radius around `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
	pub x: f64,
	pub y: f64,
	pub inner: f64,
	pub outer: f64,
	/// `(offset in [0, 1], color)` pairs in ascending offset order.
	pub stops: Vec<(f64, Color)>,
}

/// Fill used for rectangles and circles.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	Solid(Color),
	Radial(RadialGradient),
}

/// A pixel-addressable area a widget paints into each frame.
pub trait Surface {
	/// Current size in pixels. Read on every paint; never cached.
	fn size(&self) -> (f64, f64);

	/// Reset every pixel to transparent.
	fn clear(&mut self);

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint);

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint);

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}
