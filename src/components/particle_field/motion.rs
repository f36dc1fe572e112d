//! Per-particle kinematics.
//!
//! A [`MotionConfig`] is the declarative form read from configuration. It is
//! resolved once into a [`Motion`], which sanitizes the numbers and is what
//! the per-frame loop matches on.

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::SmallRng;
use serde::Deserialize;

use super::particles::Particle;

/// Rate, per second, at which drifting particles shed speed above their
/// cruise speed (bursts fade out instead of sticking).
pub const DRIFT_RELAX: f64 = 1.5;

/// Declarative motion model, as written in configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionConfig {
	/// Constant slow velocity in a random direction, with twinkle.
	Drift {
		#[serde(default = "defaults::drift_speed")]
		speed: f64,
		#[serde(default = "defaults::twinkle_speed")]
		twinkle_speed: f64,
	},
	/// Falling under gravity with wind and sideways sway (rain, snow).
	Precipitation {
		#[serde(default = "defaults::gravity")]
		gravity: f64,
		#[serde(default)]
		wind: f64,
		#[serde(default)]
		sway: f64,
		#[serde(default = "defaults::terminal_velocity")]
		terminal_velocity: f64,
	},
	/// Spring back toward a fixed origin (image swarms).
	Swarm {
		#[serde(default = "defaults::spring")]
		spring: f64,
		#[serde(default = "defaults::damping")]
		damping: f64,
		#[serde(default)]
		jitter: f64,
	},
}

mod defaults {
	pub fn drift_speed() -> f64 {
		12.0
	}
	pub fn twinkle_speed() -> f64 {
		2.0
	}
	pub fn gravity() -> f64 {
		900.0
	}
	pub fn terminal_velocity() -> f64 {
		700.0
	}
	pub fn spring() -> f64 {
		30.0
	}
	pub fn damping() -> f64 {
		0.9
	}
}

/// What happens to a particle that leaves the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsPolicy {
	/// Re-enter from the opposite edge.
	Wrap,
	/// Stop at the edge and lose the outward velocity.
	Clamp,
}

impl BoundsPolicy {
	/// Bring `p` back inside `[0, width] x [0, height]`.
	pub fn contain(self, p: &mut Particle, width: f64, height: f64) {
		match self {
			BoundsPolicy::Wrap => {
				p.x = wrap(p.x, width);
				p.y = wrap(p.y, height);
			}
			BoundsPolicy::Clamp => {
				if p.x < 0.0 || p.x > width {
					p.x = p.x.clamp(0.0, width);
					p.vx = 0.0;
				}
				if p.y < 0.0 || p.y > height {
					p.y = p.y.clamp(0.0, height);
					p.vy = 0.0;
				}
			}
		}
	}
}

fn wrap(v: f64, extent: f64) -> f64 {
	if !v.is_finite() {
		return 0.0;
	}
	let w = v.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negative inputs
	if w >= extent { 0.0 } else { w }
}

/// Resolved motion strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
	Drift {
		speed: f64,
		twinkle_speed: f64,
	},
	Precipitation {
		gravity: f64,
		wind: f64,
		sway: f64,
		terminal_velocity: f64,
	},
	Swarm {
		spring: f64,
		damping: f64,
		jitter: f64,
	},
}

/// Replace non-finite or negative values with `fallback`.
fn non_negative(v: f64, fallback: f64) -> f64 {
	if v.is_finite() && v >= 0.0 { v } else { fallback }
}

fn finite(v: f64) -> f64 {
	if v.is_finite() { v } else { 0.0 }
}

impl From<&MotionConfig> for Motion {
	fn from(config: &MotionConfig) -> Self {
		match *config {
			MotionConfig::Drift {
				speed,
				twinkle_speed,
			} => Motion::Drift {
				speed: non_negative(speed, defaults::drift_speed()),
				twinkle_speed: non_negative(twinkle_speed, defaults::twinkle_speed()),
			},
			MotionConfig::Precipitation {
				gravity,
				wind,
				sway,
				terminal_velocity,
			} => Motion::Precipitation {
				gravity: finite(gravity),
				wind: finite(wind),
				sway: non_negative(sway, 0.0),
				terminal_velocity: non_negative(terminal_velocity, defaults::terminal_velocity()),
			},
			MotionConfig::Swarm {
				spring,
				damping,
				jitter,
			} => Motion::Swarm {
				spring: non_negative(spring, defaults::spring()),
				damping: non_negative(damping, defaults::damping()).min(1.0),
				jitter: non_negative(jitter, 0.0),
			},
		}
	}
}

impl Motion {
	pub fn bounds_policy(&self) -> BoundsPolicy {
		match self {
			Motion::Drift { .. } | Motion::Precipitation { .. } => BoundsPolicy::Wrap,
			Motion::Swarm { .. } => BoundsPolicy::Clamp,
		}
	}

	/// Whether particles remember their seed position as a resting origin.
	pub fn anchors(&self) -> bool {
		matches!(self, Motion::Swarm { .. })
	}

	/// Starting velocity for a freshly seeded particle.
	pub fn initial_velocity(&self, rng: &mut SmallRng) -> (f64, f64) {
		match *self {
			Motion::Drift { speed, .. } => {
				let angle = rng.random::<f64>() * TAU;
				let speed = speed * (0.5 + rng.random::<f64>() * 0.5);
				(angle.cos() * speed, angle.sin() * speed)
			}
			Motion::Precipitation {
				wind,
				terminal_velocity,
				..
			} => (wind, terminal_velocity * (0.5 + rng.random::<f64>() * 0.5)),
			Motion::Swarm { .. } => (0.0, 0.0),
		}
	}

	/// Advance one particle by `dt` seconds.
	pub fn advance(&self, p: &mut Particle, dt: f64, rng: &mut SmallRng) {
		match *self {
			Motion::Drift {
				speed,
				twinkle_speed,
			} => {
				let v = p.vx.hypot(p.vy);
				if v > speed {
					let target = speed + (v - speed) * (-DRIFT_RELAX * dt).exp();
					p.vx *= target / v;
					p.vy *= target / v;
				}
				p.x += p.vx * dt;
				p.y += p.vy * dt;
				p.phase += twinkle_speed * dt;
			}
			Motion::Precipitation {
				gravity,
				wind,
				sway,
				terminal_velocity,
			} => {
				p.vy = (p.vy + gravity * dt).min(terminal_velocity);
				p.vx = wind + sway * p.drift * p.phase.sin();
				p.phase += dt * (1.0 + p.drift);
				p.x += p.vx * dt;
				p.y += p.vy * dt;
			}
			Motion::Swarm {
				spring,
				damping,
				jitter,
			} => {
				let (ox, oy) = p.origin.unwrap_or((p.x, p.y));
				p.vx += (ox - p.x) * spring * dt;
				p.vy += (oy - p.y) * spring * dt;
				if jitter > 0.0 {
					p.vx += (rng.random::<f64>() - 0.5) * jitter * dt;
					p.vy += (rng.random::<f64>() - 0.5) * jitter * dt;
				}
				// damping is per 60Hz frame; rescale for the actual delta
				let keep = damping.powf(dt * 60.0);
				p.vx *= keep;
				p.vy *= keep;
				p.x += p.vx * dt;
				p.y += p.vy * dt;
			}
		}
	}

	/// Apply a pointer displacement `(dx, dy)` in pixels per second.
	///
	/// Anchored particles take it as velocity so the spring carries them home
	/// once the pointer goes away; free particles are nudged in place.
	pub fn apply_force(&self, p: &mut Particle, (dx, dy): (f64, f64), dt: f64) {
		if self.anchors() {
			p.vx += dx * dt;
			p.vy += dy * dt;
		} else {
			p.x += dx * dt;
			p.y += dy * dt;
		}
	}
}
