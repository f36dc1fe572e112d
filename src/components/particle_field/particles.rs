//! The particle store: a flat, fixed-size list of independent particles.

use rand::Rng;
use rand::rngs::SmallRng;

use super::motion::Motion;
use super::pointer::PointerForce;
use super::seed::Seeder;
use super::theme::ParticleStyle;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Resting position for anchored motion models.
	pub origin: Option<(f64, f64)>,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub alpha: f64,
	pub phase: f64, // For twinkling and sway
	/// Per-particle variation in [0, 1) used by sway.
	pub drift: f64,
	pub color_index: usize,
}

impl Particle {
	/// Alpha after twinkle modulation; `depth` 0.0 disables it.
	pub fn twinkle_alpha(&self, time: f64, depth: f64) -> f64 {
		if depth <= 0.0 {
			return self.alpha;
		}
		let wave = (time * 1.5 + self.phase).sin() * 0.5 + 0.5;
		self.alpha * (1.0 - depth.min(1.0) * wave)
	}
}

/// Per-field inputs to [`ParticleStore::initialize`] besides placement.
#[derive(Clone, Copy, Debug)]
pub struct SeedParams<'a> {
	pub style: &'a ParticleStyle,
	pub palette_len: usize,
	pub motion: &'a Motion,
}

/// Holds every particle of one widget instance.
///
/// The count is fixed by [`ParticleStore::initialize`]; afterwards particles
/// are only ever repositioned.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
	particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleStore {
	/// Seed `count` particles over a `width` x `height` surface.
	///
	/// A surface with no area yields an empty store.
	pub fn initialize(
		count: usize,
		width: f64,
		height: f64,
		seeder: &Seeder,
		params: SeedParams<'_>,
		rng: &mut SmallRng,
	) -> Self {
		let SeedParams {
			style,
			palette_len,
			motion,
		} = params;
		if !(width > 0.0 && height > 0.0) || count == 0 {
			return Self {
				particles: Vec::new(),
				width: width.max(0.0),
				height: height.max(0.0),
			};
		}

		let (size_min, size_max) = if style.size_min <= style.size_max {
			(style.size_min, style.size_max)
		} else {
			(style.size_max, style.size_min)
		};
		let mut particles = Vec::with_capacity(count);

		for i in 0..count {
			let (x, y) = seeder.position(rng, width, height);
			let (vx, vy) = motion.initial_velocity(rng);
			particles.push(Particle {
				x,
				y,
				origin: motion.anchors().then_some((x, y)),
				vx,
				vy,
				size: size_min + rng.random::<f64>() * (size_max - size_min),
				alpha: style.opacity * (0.3 + rng.random::<f64>() * 0.7),
				phase: rng.random::<f64>() * std::f64::consts::TAU,
				drift: rng.random::<f64>(),
				color_index: if palette_len > 0 { i % palette_len } else { 0 },
			});
		}

		Self {
			particles,
			width,
			height,
		}
	}

	/// Advance every particle by `dt` seconds.
	///
	/// `force` is `None` when no pointer is present; absent pointers exert no
	/// displacement at all.
	pub fn step(
		&mut self,
		dt: f64,
		motion: &Motion,
		force: Option<&PointerForce>,
		rng: &mut SmallRng,
	) {
		if self.particles.is_empty() || !(self.width > 0.0 && self.height > 0.0) {
			return;
		}
		let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
		let policy = motion.bounds_policy();

		for p in &mut self.particles {
			motion.advance(p, dt, rng);
			if let Some(force) = force {
				let d = force.displacement(p.x, p.y);
				motion.apply_force(p, d, dt);
			}
			if !(p.x.is_finite() && p.y.is_finite()) {
				let (ox, oy) = p.origin.unwrap_or((0.0, 0.0));
				p.x = ox;
				p.y = oy;
				p.vx = 0.0;
				p.vy = 0.0;
			}
			policy.contain(p, self.width, self.height);
		}
	}

	/// One-shot radial impulse (pixels per second) around `(x, y)`.
	pub fn burst(&mut self, x: f64, y: f64, radius: f64, strength: f64) {
		if radius <= 0.0 {
			return;
		}
		for p in &mut self.particles {
			let (dx, dy) = (p.x - x, p.y - y);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist >= radius || dist < 1e-6 {
				continue;
			}
			let impulse = strength * (1.0 - dist / radius);
			p.vx += dx / dist * impulse;
			p.vy += dy / dist * impulse;
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Surface dimensions the store was seeded for.
	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}
