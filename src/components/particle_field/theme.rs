//! Visual theming for the particle field.
//!
//! Provides colors, particle palettes, background styles and the preset
//! themes (starfield, swarm, rain, snow).

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	///
	/// Supports hex (`#RGB`, `#RRGGBB`) and `rgb()`/`rgba()` functional
	/// notation. Returns `None` for anything else.
	pub fn parse(input: &str) -> Option<Color> {
		let s = input.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if !hex.is_ascii() {
				return None;
			}
			return match hex.len() {
				3 => {
					let digit = |i: usize| {
						u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17)
					};
					Some(Color::rgb(digit(0)?, digit(1)?, digit(2)?))
				}
				6 => {
					let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
					Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?))
				}
				_ => None,
			};
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		if parts.len() < 3 {
			return None;
		}
		let r = parts[0].parse().ok()?;
		let g = parts[1].parse().ok()?;
		let b = parts[2].parse().ok()?;
		let a = match parts.get(3) {
			Some(a) => a.parse().ok()?,
			None => 1.0,
		};
		Some(Color::rgba(r, g, b, a))
	}
}

/// Colors assigned to particles round-robin by index.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub colors: Vec<Color>,
}

impl Palette {
	/// Cool whites and pale blues
	pub fn starlight() -> Self {
		Self {
			colors: vec![
				Color::rgb(255, 255, 255),
				Color::rgb(220, 230, 255), // Ice
				Color::rgb(200, 215, 255), // Pale blue
				Color::rgb(255, 244, 230), // Warm white
			],
		}
	}

	/// Saturated violets and cyans for interactive swarms
	pub fn neon() -> Self {
		Self {
			colors: vec![
				Color::rgb(129, 140, 248), // Indigo
				Color::rgb(192, 132, 252), // Violet
				Color::rgb(56, 189, 248),  // Sky
				Color::rgb(244, 114, 182), // Pink
			],
		}
	}

	/// Grey-blue streaks
	pub fn rain() -> Self {
		Self {
			colors: vec![
				Color::rgb(174, 194, 224),
				Color::rgb(150, 170, 200),
				Color::rgb(190, 205, 230),
			],
		}
	}

	/// Soft whites
	pub fn snow() -> Self {
		Self {
			colors: vec![Color::rgb(255, 255, 255), Color::rgb(235, 240, 250)],
		}
	}

	/// Builds a palette from CSS color strings, skipping unparseable entries.
	/// Returns `None` if nothing usable remains.
	pub fn from_css(colors: &[String]) -> Option<Self> {
		let colors: Vec<Color> = colors.iter().filter_map(|c| Color::parse(c)).collect();
		if colors.is_empty() {
			None
		} else {
			Some(Self { colors })
		}
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Color::rgb(255, 255, 255);
		}
		self.colors[index % self.colors.len()]
	}
}

/// How the surface is cleared before particles are drawn.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundFill {
	/// Flat `color`.
	#[default]
	Solid,
	/// Radial gradient from `color_secondary` (center) to `color` (edge).
	Gradient,
	/// Clear to transparent so the page shows through.
	Transparent,
}

/// Background style configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundStyle {
	pub fill: BackgroundFill,
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Geometry used to draw one particle.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
	/// Filled circle.
	#[default]
	Dot,
	/// Circle with a soft radial halo.
	Glow,
	/// Line segment trailing behind the velocity vector.
	Streak,
	/// Filled square.
	Square,
}

/// Per-particle visual ranges.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleStyle {
	/// Minimum particle size
	pub size_min: f64,
	/// Maximum particle size
	pub size_max: f64,
	/// Particle opacity
	pub opacity: f64,
	/// Twinkle depth (0.0 = steady, 1.0 = fades fully out)
	pub twinkle: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub particles: ParticleStyle,
	pub shape: ParticleShape,
	pub palette: Palette,
	/// Fraction of the previous frame kept when clearing (0.0 = none).
	pub trail: f64,
}

impl Theme {
	/// Deep-space starfield with twinkling glows
	pub fn starfield() -> Self {
		Self {
			name: "starfield",
			background: BackgroundStyle {
				fill: BackgroundFill::Gradient,
				color: Color::rgb(5, 6, 15),
				color_secondary: Color::rgb(18, 22, 40),
				vignette: 0.25,
			},
			particles: ParticleStyle {
				size_min: 0.5,
				size_max: 2.0,
				opacity: 0.9,
				twinkle: 0.6,
			},
			shape: ParticleShape::Glow,
			palette: Palette::starlight(),
			trail: 0.0,
		}
	}

	/// Dark backdrop for pointer-reactive swarms
	pub fn swarm() -> Self {
		Self {
			name: "swarm",
			background: BackgroundStyle {
				fill: BackgroundFill::Solid,
				color: Color::rgb(10, 10, 18),
				color_secondary: Color::rgb(10, 10, 18),
				vignette: 0.0,
			},
			particles: ParticleStyle {
				size_min: 1.0,
				size_max: 1.8,
				opacity: 1.0,
				twinkle: 0.0,
			},
			shape: ParticleShape::Dot,
			palette: Palette::neon(),
			trail: 0.25,
		}
	}

	/// Storm sky with falling streaks
	pub fn rain() -> Self {
		Self {
			name: "rain",
			background: BackgroundStyle {
				fill: BackgroundFill::Gradient,
				color: Color::rgb(22, 28, 38),
				color_secondary: Color::rgb(44, 54, 70),
				vignette: 0.2,
			},
			particles: ParticleStyle {
				size_min: 0.6,
				size_max: 1.4,
				opacity: 0.5,
				twinkle: 0.0,
			},
			shape: ParticleShape::Streak,
			palette: Palette::rain(),
			trail: 0.0,
		}
	}

	/// Winter night with drifting flakes
	pub fn snow() -> Self {
		Self {
			name: "snow",
			background: BackgroundStyle {
				fill: BackgroundFill::Gradient,
				color: Color::rgb(20, 30, 48),
				color_secondary: Color::rgb(40, 58, 86),
				vignette: 0.15,
			},
			particles: ParticleStyle {
				size_min: 1.0,
				size_max: 3.5,
				opacity: 0.85,
				twinkle: 0.0,
			},
			shape: ParticleShape::Dot,
			palette: Palette::snow(),
			trail: 0.0,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::starfield()
	}
}
