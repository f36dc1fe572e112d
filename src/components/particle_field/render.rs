//! Surface rendering for the particle field.
//!
//! One paint is three passes:
//! 1. Background (solid, gradient, transparent, or a translucent trail fade)
//! 2. Particles, in store order, with the shape resolved at construction
//! 3. Vignette

use super::particles::{Particle, ParticleStore};
use super::surface::{Paint, RadialGradient, Surface};
use super::theme::{BackgroundFill, BackgroundStyle, Color, Palette, ParticleShape, Theme};

/// Streak length per unit of speed, in seconds.
const STREAK_SECONDS: f64 = 0.02;

/// Paints a [`ParticleStore`] onto a [`Surface`].
#[derive(Clone, Debug)]
pub struct FieldPainter {
	background: BackgroundStyle,
	palette: Palette,
	shape: ParticleShape,
	twinkle: f64,
	trail: f64,
}

impl FieldPainter {
	pub fn new(theme: &Theme) -> Self {
		Self {
			background: theme.background.clone(),
			palette: theme.palette.clone(),
			shape: theme.shape,
			twinkle: theme.particles.twinkle,
			trail: theme.trail.clamp(0.0, 0.95),
		}
	}

	/// Clear and redraw every particle. Returns `false` if the surface has no
	/// area and nothing was drawn.
	pub fn paint<S: Surface + ?Sized>(
		&self,
		store: &ParticleStore,
		surface: &mut S,
		time: f64,
	) -> bool {
		let (width, height) = surface.size();
		if !(width > 0.0 && height > 0.0) {
			return false;
		}

		self.draw_background(surface, width, height);

		for p in store.particles() {
			// Cull anything the surface has shrunk away from
			if p.x > width + p.size * 3.0 || p.y > height + p.size * 3.0 {
				continue;
			}
			self.draw_particle(surface, p, time);
		}

		if self.background.vignette > 0.0 {
			self.draw_vignette(surface, width, height);
		}
		true
	}

	fn draw_background<S: Surface + ?Sized>(&self, surface: &mut S, width: f64, height: f64) {
		let bg = &self.background;
		if bg.fill == BackgroundFill::Transparent {
			surface.clear();
			return;
		}

		// Trails: cover the previous frame only partially
		let keep = 1.0 - self.trail;
		let paint = match bg.fill {
			BackgroundFill::Gradient => Paint::Radial(RadialGradient {
				x: width / 2.0,
				y: height / 2.0,
				inner: 0.0,
				outer: width.max(height) * 0.8,
				stops: vec![
					(0.0, bg.color_secondary.with_alpha(bg.color_secondary.a * keep)),
					(1.0, bg.color.with_alpha(bg.color.a * keep)),
				],
			}),
			_ => Paint::Solid(bg.color.with_alpha(bg.color.a * keep)),
		};
		surface.fill_rect(0.0, 0.0, width, height, &paint);
	}

	fn draw_vignette<S: Surface + ?Sized>(&self, surface: &mut S, width: f64, height: f64) {
		let paint = Paint::Radial(RadialGradient {
			x: width / 2.0,
			y: height / 2.0,
			inner: width.min(height) * 0.3,
			outer: width.max(height) * 0.7,
			stops: vec![
				(0.0, Color::rgba(0, 0, 0, 0.0)),
				(1.0, Color::rgba(0, 0, 0, self.background.vignette.min(1.0))),
			],
		});
		surface.fill_rect(0.0, 0.0, width, height, &paint);
	}

	fn draw_particle<S: Surface + ?Sized>(&self, surface: &mut S, p: &Particle, time: f64) {
		let alpha = p.twinkle_alpha(time, self.twinkle);
		if alpha < 0.005 || p.size <= 0.0 {
			return;
		}
		let color = self.palette.get(p.color_index).with_alpha(alpha);

		match self.shape {
			ParticleShape::Dot => {
				surface.fill_circle(p.x, p.y, p.size, &Paint::Solid(color));
			}
			ParticleShape::Square => {
				let side = p.size * 2.0;
				surface.fill_rect(p.x - p.size, p.y - p.size, side, side, &Paint::Solid(color));
			}
			ParticleShape::Glow => {
				let halo = p.size * 4.0;
				surface.fill_circle(
					p.x,
					p.y,
					halo,
					&Paint::Radial(RadialGradient {
						x: p.x,
						y: p.y,
						inner: p.size * 0.5,
						outer: halo,
						stops: vec![
							(0.0, color.lighten(0.3).with_alpha(alpha * 0.5)),
							(1.0, color.with_alpha(0.0)),
						],
					}),
				);
				surface.fill_circle(p.x, p.y, p.size, &Paint::Solid(color));
			}
			ParticleShape::Streak => {
				let tail = (
					p.x - p.vx * STREAK_SECONDS,
					p.y - p.vy * STREAK_SECONDS - p.size * 4.0,
				);
				surface.stroke_line(tail, (p.x, p.y), p.size, color);
			}
		}
	}
}
