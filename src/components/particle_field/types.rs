//! Configuration accepted by the particle field component.
//!
//! Every field has a default, so `{}` is a valid configuration (a starfield).
//! Optional fields left unset fall back to the chosen preset.

use serde::Deserialize;

use super::error::FieldError;
use super::motion::{Motion, MotionConfig};
use super::pointer::{PointerConfig, PointerMode};
use super::seed::SampleChannel;
use super::theme::{BackgroundFill, Palette, ParticleShape, Theme};

/// Upper bound on particles per widget, regardless of configuration.
pub const MAX_PARTICLES: usize = 20_000;

/// Named starting point for a configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
	#[default]
	Starfield,
	Swarm,
	Rain,
	Snow,
}

impl Preset {
	pub fn theme(self) -> Theme {
		match self {
			Preset::Starfield => Theme::starfield(),
			Preset::Swarm => Theme::swarm(),
			Preset::Rain => Theme::rain(),
			Preset::Snow => Theme::snow(),
		}
	}

	pub fn motion(self) -> MotionConfig {
		match self {
			Preset::Starfield => MotionConfig::Drift {
				speed: 12.0,
				twinkle_speed: 2.0,
			},
			Preset::Swarm => MotionConfig::Swarm {
				spring: 30.0,
				damping: 0.88,
				jitter: 20.0,
			},
			Preset::Rain => MotionConfig::Precipitation {
				gravity: 1200.0,
				wind: -40.0,
				sway: 0.0,
				terminal_velocity: 900.0,
			},
			Preset::Snow => MotionConfig::Precipitation {
				gravity: 20.0,
				wind: 8.0,
				sway: 25.0,
				terminal_velocity: 45.0,
			},
		}
	}

	pub fn pointer(self) -> PointerConfig {
		match self {
			Preset::Starfield => PointerConfig {
				mode: PointerMode::Attract,
				radius: 120.0,
				strength: 40.0,
			},
			Preset::Swarm => PointerConfig {
				mode: PointerMode::Repel,
				radius: 90.0,
				strength: 2400.0,
			},
			Preset::Rain => PointerConfig {
				mode: PointerMode::None,
				..PointerConfig::default()
			},
			Preset::Snow => PointerConfig {
				mode: PointerMode::Repel,
				radius: 80.0,
				strength: 120.0,
			},
		}
	}

	pub fn count(self) -> i64 {
		match self {
			Preset::Starfield => 220,
			Preset::Swarm => 1800,
			Preset::Rain => 350,
			Preset::Snow => 160,
		}
	}
}

/// Where particles are initially placed.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedSource {
	/// Uniformly at random over the surface.
	#[default]
	Uniform,
	/// On the lit pixels of an image, fitted into the surface.
	Image {
		url: String,
		#[serde(default = "default_threshold")]
		threshold: u8,
		#[serde(default)]
		channel: SampleChannel,
	},
}

fn default_threshold() -> u8 {
	128
}

/// Reported to the optional interaction callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldInteraction {
	/// Pointer pressed on the surface at surface-local `(x, y)`.
	Press { x: f64, y: f64 },
}

/// Complete widget configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	pub preset: Preset,
	/// Particle count; `None` uses the preset's. Zero or negative renders nothing.
	pub count: Option<i64>,
	/// Seed for the widget's pseudo-random generator.
	pub seed: u64,
	/// CSS colors replacing the preset palette.
	pub colors: Vec<String>,
	pub background: Option<BackgroundFill>,
	pub size_min: Option<f64>,
	pub size_max: Option<f64>,
	pub opacity: Option<f64>,
	pub motion: Option<MotionConfig>,
	pub pointer: Option<PointerConfig>,
	pub shape: Option<ParticleShape>,
	/// Fraction of the previous frame kept each frame (motion trails).
	pub trail: Option<f64>,
	pub source: SeedSource,
	/// Impulse applied around a pointer press, in pixels per second.
	pub burst: f64,
	/// Paint a single static frame when the user prefers reduced motion.
	pub respect_reduced_motion: bool,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			preset: Preset::default(),
			count: None,
			seed: 0x5eed,
			colors: Vec::new(),
			background: None,
			size_min: None,
			size_max: None,
			opacity: None,
			motion: None,
			pointer: None,
			shape: None,
			trail: None,
			source: SeedSource::Uniform,
			burst: 400.0,
			respect_reduced_motion: true,
		}
	}
}

impl FieldConfig {
	/// Parse a JSON configuration.
	pub fn from_json(json: &str) -> Result<Self, FieldError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Effective particle count: negative becomes zero, capped at
	/// [`MAX_PARTICLES`].
	pub fn particle_count(&self) -> usize {
		let count = self.count.unwrap_or_else(|| self.preset.count());
		count.clamp(0, MAX_PARTICLES as i64) as usize
	}

	pub fn motion(&self) -> Motion {
		Motion::from(&self.motion.clone().unwrap_or_else(|| self.preset.motion()))
	}

	pub fn pointer(&self) -> PointerConfig {
		self.pointer.clone().unwrap_or_else(|| self.preset.pointer())
	}

	/// Preset theme with this configuration's overrides applied.
	pub fn theme(&self) -> Theme {
		let mut theme = self.preset.theme();
		if let Some(palette) = Palette::from_css(&self.colors) {
			theme.palette = palette;
		}
		if let Some(fill) = self.background {
			theme.background.fill = fill;
		}
		if let Some(v) = self.size_min.filter(|v| v.is_finite()) {
			theme.particles.size_min = v.max(0.0);
		}
		if let Some(v) = self.size_max.filter(|v| v.is_finite()) {
			theme.particles.size_max = v.max(0.0);
		}
		if let Some(v) = self.opacity.filter(|v| v.is_finite()) {
			theme.particles.opacity = v.clamp(0.0, 1.0);
		}
		if let Some(shape) = self.shape {
			theme.shape = shape;
		}
		if let Some(v) = self.trail.filter(|v| v.is_finite()) {
			theme.trail = v.clamp(0.0, 0.95);
		}
		theme
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_a_starfield() {
		let config = FieldConfig::from_json("{}").unwrap();
		assert_eq!(config, FieldConfig::default());
		assert_eq!(config.particle_count(), 220);
		assert_eq!(config.theme().name, "starfield");
	}

	#[test]
	fn negative_count_renders_nothing() {
		let config = FieldConfig::from_json(r#"{ "count": -5 }"#).unwrap();
		assert_eq!(config.particle_count(), 0);
	}

	#[test]
	fn count_is_capped() {
		let config = FieldConfig::from_json(r#"{ "count": 10000000 }"#).unwrap();
		assert_eq!(config.particle_count(), MAX_PARTICLES);
	}

	#[test]
	fn overrides_apply_over_preset() {
		let config = FieldConfig::from_json(
			r##"{
				"preset": "swarm",
				"colors": ["#ff0000", "bogus"],
				"shape": "square",
				"opacity": 3.0,
				"pointer": { "mode": "attract" },
				"motion": { "kind": "drift", "speed": 5 }
			}"##,
		)
		.unwrap();
		let theme = config.theme();
		assert_eq!(theme.palette.len(), 1);
		assert_eq!(theme.shape, ParticleShape::Square);
		assert_eq!(theme.particles.opacity, 1.0);
		assert_eq!(config.pointer().mode, PointerMode::Attract);
		assert_eq!(config.pointer().radius, 100.0);
		assert_eq!(
			config.motion(),
			Motion::Drift {
				speed: 5.0,
				twinkle_speed: 2.0
			}
		);
	}

	#[test]
	fn image_source_parses_with_defaults() {
		let json = r#"{ "source": { "kind": "image", "url": "logo.png" } }"#;
		let config = FieldConfig::from_json(json).unwrap();
		assert_eq!(
			config.source,
			SeedSource::Image {
				url: "logo.png".into(),
				threshold: 128,
				channel: SampleChannel::Alpha,
			}
		);
	}

	#[test]
	fn malformed_json_is_invalid_config() {
		assert!(FieldConfig::from_json("{ nope").is_err());
	}
}
