//! Pointer sampling and displacement forces.
//!
//! The bridge converts page-space pointer coordinates into surface-local ones
//! and keeps "no pointer" distinct from "pointer at the origin", so particles
//! never get pulled into the top-left corner when the pointer leaves.

use serde::Deserialize;

/// How the pointer influences nearby particles.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PointerMode {
	/// Pointer is ignored.
	None,
	/// Particles are pulled toward the pointer.
	Attract,
	/// Particles are pushed away from the pointer.
	#[default]
	Repel,
}

/// Pointer interaction settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
	pub mode: PointerMode,
	/// Influence radius in surface pixels.
	pub radius: f64,
	/// Peak displacement in pixels per second at the pointer itself.
	pub strength: f64,
}

impl Default for PointerConfig {
	fn default() -> Self {
		Self {
			mode: PointerMode::Repel,
			radius: 100.0,
			strength: 600.0,
		}
	}
}

/// Current pointer sample, in surface-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
	#[default]
	Absent,
	Present { x: f64, y: f64 },
}

/// Tracks the pointer relative to the drawing surface.
#[derive(Clone, Debug, Default)]
pub struct PointerBridge {
	state: PointerState,
}

impl PointerBridge {
	/// Record a pointer-move in page space against the surface's bounding rect.
	pub fn move_to(&mut self, client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) {
		let (x, y) = (client_x - rect_left, client_y - rect_top);
		if x.is_finite() && y.is_finite() {
			self.state = PointerState::Present { x, y };
		}
	}

	pub fn leave(&mut self) {
		self.state = PointerState::Absent;
	}

	pub fn state(&self) -> PointerState {
		self.state
	}

	pub fn position(&self) -> Option<(f64, f64)> {
		match self.state {
			PointerState::Absent => None,
			PointerState::Present { x, y } => Some((x, y)),
		}
	}

	/// The force the pointer exerts this frame, or `None` when it exerts none.
	pub fn force(&self, config: &PointerConfig) -> Option<PointerForce> {
		let (x, y) = self.position()?;
		if config.mode == PointerMode::None || config.radius <= 0.0 || config.strength == 0.0 {
			return None;
		}
		Some(PointerForce {
			x,
			y,
			radius: config.radius,
			strength: config.strength,
			attract: config.mode == PointerMode::Attract,
		})
	}
}

/// A displacement field centred on the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerForce {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub strength: f64,
	pub attract: bool,
}

impl PointerForce {
	/// Displacement (pixels per second) felt by a particle at `(px, py)`.
	///
	/// Quadratic falloff from full strength at the pointer to zero at the
	/// radius.
	pub fn displacement(&self, px: f64, py: f64) -> (f64, f64) {
		let (dx, dy) = (px - self.x, py - self.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist >= self.radius || dist < 1e-6 {
			return (0.0, 0.0);
		}
		let falloff = 1.0 - dist / self.radius;
		let magnitude = self.strength * falloff * falloff;
		let sign = if self.attract { -1.0 } else { 1.0 };
		(sign * dx / dist * magnitude, sign * dy / dist * magnitude)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn converts_page_to_surface_space() {
		let mut bridge = PointerBridge::default();
		bridge.move_to(150.0, 90.0, 100.0, 40.0);
		assert_eq!(bridge.state(), PointerState::Present { x: 50.0, y: 50.0 });
	}

	#[test]
	fn leave_is_distinct_from_origin() {
		let mut bridge = PointerBridge::default();
		bridge.move_to(10.0, 10.0, 10.0, 10.0);
		assert_eq!(bridge.position(), Some((0.0, 0.0)));
		assert!(bridge.force(&PointerConfig::default()).is_some());

		bridge.leave();
		assert_eq!(bridge.position(), None);
		assert!(bridge.force(&PointerConfig::default()).is_none());
	}

	#[test]
	fn mode_none_exerts_no_force() {
		let mut bridge = PointerBridge::default();
		bridge.move_to(5.0, 5.0, 0.0, 0.0);
		let config = PointerConfig {
			mode: PointerMode::None,
			..PointerConfig::default()
		};
		assert!(bridge.force(&config).is_none());
	}

	#[test]
	fn repel_pushes_away_and_attract_pulls_in() {
		let mut force = PointerForce {
			x: 50.0,
			y: 50.0,
			radius: 20.0,
			strength: 100.0,
			attract: false,
		};
		let (dx, dy) = force.displacement(60.0, 50.0);
		assert!(dx > 0.0);
		assert_eq!(dy, 0.0);

		force.attract = true;
		let (dx, _) = force.displacement(60.0, 50.0);
		assert!(dx < 0.0);
	}

	#[test]
	fn no_displacement_outside_radius() {
		let force = PointerForce {
			x: 0.0,
			y: 0.0,
			radius: 10.0,
			strength: 100.0,
			attract: false,
		};
		assert_eq!(force.displacement(30.0, 0.0), (0.0, 0.0));
		assert_eq!(force.displacement(0.0, 0.0), (0.0, 0.0));
	}
}
