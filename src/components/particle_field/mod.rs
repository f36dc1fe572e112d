//! Animated particle field component.
//!
//! Renders a fixed population of particles on an HTML canvas, one step and one
//! paint per display refresh:
//! - Presets for starfields, image swarms, rain and snow
//! - Pointer attraction/repulsion and press bursts
//! - Uniform or image-mask initial placement
//! - Pause/resume, background-tab suspension and reduced-motion support
//!
//! The browser-free core ([`ParticleField`]) is generic over a
//! [`FrameScheduler`] and a [`Surface`], so it runs the same under
//! `requestAnimationFrame` and in unit tests.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas, Preset};
//!
//! let config = FieldConfig { preset: Preset::Snow, ..FieldConfig::default() };
//!
//! view! { <ParticleFieldCanvas config=config fullscreen=true /> }
//! ```

mod canvas;
mod component;
pub mod driver;
pub mod error;
pub mod field;
mod image_source;
mod listener;
pub mod motion;
pub mod particles;
pub mod pointer;
pub mod render;
mod scheduler;
pub mod seed;
pub mod surface;
pub mod theme;
mod types;

pub use component::ParticleFieldCanvas;
pub use driver::{DriverState, FrameDriver, FrameScheduler};
pub use error::FieldError;
pub use field::{FrameOutcome, ParticleField, RunFlags};
pub use surface::Surface;
pub use theme::Theme;
pub use types::{FieldConfig, FieldInteraction, MAX_PARTICLES, Preset, SeedSource};
