//! particle-field: animated particle backgrounds for Leptos.
//!
//! This crate provides a WASM-based canvas component that animates a field of
//! particles (starfield, image swarm, rain, snow) with pointer interaction,
//! stepping and repainting once per display refresh.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	FieldConfig, FieldError, FieldInteraction, ParticleFieldCanvas, Preset, SeedSource,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load the field configuration from a script element with id="field-config".
/// Expected format: JSON matching [`FieldConfig`]; every key is optional.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded {:?} config, {} particles",
				config.preset,
				config.particle_count()
			);
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the field configuration from the DOM and renders a fullscreen field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();
	let (paused, set_paused) = signal(false);
	let (presses, set_presses) = signal(0u32);

	let config_signal = Signal::derive(move || config.clone());
	let on_interaction = Callback::new(move |_: FieldInteraction| {
		set_presses.update(|n| *n += 1);
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-field">
			<ParticleFieldCanvas
				config=config_signal
				fullscreen=true
				paused=paused
				on_interaction=on_interaction
			/>
			<div class="field-overlay">
				<h1>"Particle Field"</h1>
				<p class="subtitle">"Move the pointer to disturb the field. Click to scatter."</p>
				<button class="field-toggle" on:click=move |_| set_paused.update(|p| *p = !*p)>
					{move || if paused.get() { "Resume" } else { "Pause" }}
				</button>
				<p class="field-presses">{move || format!("{} presses", presses.get())}</p>
			</div>
		</div>
	}
}
