//! `<canvas>` 2D context as a [`Surface`].

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::FieldError;
use super::surface::{Paint, RadialGradient, Surface};
use super::theme::Color;

/// A canvas element and its 2D rendering context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquire the 2D context of `canvas`.
	///
	/// Fails with [`FieldError::Unsupported`] when the host cannot provide one.
	pub fn attach(canvas: HtmlCanvasElement) -> Result<Self, FieldError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(FieldError::Unsupported("canvas 2d context"))?;
		Ok(Self { canvas, ctx })
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}

	pub(crate) fn context(&self) -> &CanvasRenderingContext2d {
		&self.ctx
	}

	/// Whether the canvas is still in the document.
	pub fn is_attached(&self) -> bool {
		self.canvas.is_connected()
	}

	/// Set the backing store size in pixels.
	pub fn set_size(&self, width: f64, height: f64) {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
	}

	fn gradient(&self, g: &RadialGradient) -> Option<CanvasGradient> {
		let gradient = self
			.ctx
			.create_radial_gradient(g.x, g.y, g.inner.max(0.0), g.x, g.y, g.outer.max(0.0))
			.ok()?;
		for (offset, color) in &g.stops {
			gradient
				.add_color_stop(offset.clamp(0.0, 1.0) as f32, &color.to_css())
				.ok()?;
		}
		Some(gradient)
	}

	fn set_fill(&self, paint: &Paint) {
		match paint {
			Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
			Paint::Radial(g) => match self.gradient(g) {
				Some(gradient) => {
					#[allow(deprecated)]
					self.ctx.set_fill_style(&gradient);
				}
				// Degenerate radii; use the outermost stop
				None => {
					let color = g.stops.last().map_or(Color::rgba(0, 0, 0, 0.0), |(_, c)| *c);
					self.ctx.set_fill_style_str(&color.to_css());
				}
			},
		}
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn clear(&mut self) {
		let (w, h) = self.size();
		self.ctx.clear_rect(0.0, 0.0, w, h);
	}

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
		self.set_fill(paint);
		self.ctx.fill_rect(x, y, w, h);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
		self.set_fill(paint);
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius.max(0.0), 0.0, PI * 2.0);
		self.ctx.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.set_line_cap("round");
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}
}
