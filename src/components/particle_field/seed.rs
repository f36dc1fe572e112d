//! Initial particle placement.
//!
//! Particles are either scattered uniformly across the surface or placed on
//! the opaque/bright pixels of a source image, fitted into the surface with
//! its aspect ratio preserved.

use rand::Rng;
use rand::rngs::SmallRng;
use serde::Deserialize;

/// Which pixel property decides whether an image pixel is "lit".
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SampleChannel {
	/// Alpha at or above the threshold.
	#[default]
	Alpha,
	/// Perceived brightness (alpha-weighted) at or above the threshold.
	Brightness,
}

/// Candidate pixel coordinates sampled from a source image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelMask {
	width: u32,
	height: u32,
	points: Vec<(u32, u32)>,
}

impl PixelMask {
	/// Scan an RGBA8 buffer, keeping every `stride`-th pixel that passes
	/// `threshold` on `channel`.
	///
	/// A buffer shorter than `width * height * 4` yields an empty mask.
	pub fn from_rgba(
		width: u32,
		height: u32,
		rgba: &[u8],
		threshold: u8,
		channel: SampleChannel,
		stride: u32,
	) -> Self {
		let stride = stride.max(1);
		let expected = width as usize * height as usize * 4;
		if width == 0 || height == 0 || rgba.len() < expected {
			return Self {
				width,
				height,
				points: Vec::new(),
			};
		}

		let mut points = Vec::new();
		for y in (0..height).step_by(stride as usize) {
			for x in (0..width).step_by(stride as usize) {
				let i = (y as usize * width as usize + x as usize) * 4;
				let (r, g, b, a) = (rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]);
				let value = match channel {
					SampleChannel::Alpha => a as f64,
					SampleChannel::Brightness => {
						let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
						luma * (a as f64 / 255.0)
					}
				};
				if value >= threshold as f64 {
					points.push((x, y));
				}
			}
		}

		Self {
			width,
			height,
			points,
		}
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn dimensions(&self) -> (u32, u32) {
		(self.width, self.height)
	}

	/// Pick a lit pixel and map it into a `surface_w` x `surface_h` surface.
	fn sample(&self, rng: &mut SmallRng, surface_w: f64, surface_h: f64) -> Option<(f64, f64)> {
		if self.points.is_empty() {
			return None;
		}
		let (mw, mh) = (self.width as f64, self.height as f64);
		let scale = (surface_w / mw).min(surface_h / mh);
		let (off_x, off_y) = ((surface_w - mw * scale) / 2.0, (surface_h - mh * scale) / 2.0);

		let (px, py) = self.points[rng.random_range(0..self.points.len())];
		let (jx, jy) = (rng.random::<f64>(), rng.random::<f64>());
		Some((
			(off_x + (px as f64 + jx) * scale).clamp(0.0, surface_w),
			(off_y + (py as f64 + jy) * scale).clamp(0.0, surface_h),
		))
	}
}

/// Placement strategy for [`super::particles::ParticleStore::initialize`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Seeder {
	#[default]
	Uniform,
	Mask(PixelMask),
}

impl Seeder {
	/// A position inside `[0, width] x [0, height]`.
	///
	/// An empty mask falls back to uniform placement.
	pub fn position(&self, rng: &mut SmallRng, width: f64, height: f64) -> (f64, f64) {
		if let Seeder::Mask(mask) = self {
			if let Some(pos) = mask.sample(rng, width, height) {
				return pos;
			}
		}
		(rng.random::<f64>() * width, rng.random::<f64>() * height)
	}
}
