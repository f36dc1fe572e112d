//! Leptos component wrapping the particle field canvas.
//!
//! The component creates an HTML canvas, hands it to a [`ParticleField`] and
//! forwards pointer, resize and visibility events to it. Frames are driven by
//! `requestAnimationFrame` through [`AnimationFrameScheduler`]. Everything
//! acquired on mount is released when the component is cleaned up.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use log::{info, warn};
use web_sys::{Document, HtmlCanvasElement, PointerEvent, Window};

use super::canvas::CanvasSurface;
use super::driver::DriverState;
use super::field::{ParticleField, RunFlags};
use super::image_source::{ImageMaskLoader, load_image_mask};
use super::listener::EventListener;
use super::scheduler::AnimationFrameScheduler;
use super::types::{FieldConfig, FieldInteraction, SeedSource};

type Shared = Rc<RefCell<Option<Mounted>>>;

/// Everything the component holds while it is on the page.
struct Mounted {
	field: ParticleField<AnimationFrameScheduler>,
	surface: CanvasSurface,
	_listeners: Vec<EventListener>,
	image: Option<ImageMaskLoader>,
	flags: RunFlags,
}

/// How the canvas picks its drawing size.
#[derive(Clone, Copy, Debug)]
struct Sizing {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
}

impl Mounted {
	fn frame(&mut self, timestamp: f64) {
		let surface = self.surface.is_attached().then_some(&mut self.surface);
		self.field.frame(timestamp, surface);
	}

	/// Bring the loop in line with the pause, visibility and motion flags.
	fn sync_running(&mut self) {
		if let Err(err) = self.field.sync(self.flags) {
			warn!("particle-field: falling back to a static frame: {}", err);
		}
		if self.field.state() != DriverState::Running {
			self.field.render_static(&mut self.surface);
		}
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.surface.set_size(width, height);
		self.field.resize(width, height);
		// Resizing the canvas clears it
		if self.field.state() != DriverState::Running {
			self.field.render_static(&mut self.surface);
		}
	}
}

impl Drop for Mounted {
	fn drop(&mut self) {
		// Cancels the pending frame before the callback is freed with the scheduler
		self.field.unmount();
	}
}

fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|query| query.matches())
}

fn measure(window: &Window, canvas: &HtmlCanvasElement, sizing: Sizing) -> (f64, f64) {
	if sizing.fullscreen {
		let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback: f64| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
		};
		return (
			px(window.inner_width(), 800.0),
			px(window.inner_height(), 600.0),
		);
	}
	(
		sizing.width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		sizing.height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

/// Run `f` on the mounted state, if there is one and it is not already borrowed.
fn with_mounted(shared: &Weak<RefCell<Option<Mounted>>>, f: impl FnOnce(&mut Mounted)) {
	let Some(shared) = shared.upgrade() else {
		return;
	};
	let Ok(mut guard) = shared.try_borrow_mut() else {
		return;
	};
	if let Some(mounted) = guard.as_mut() {
		f(mounted);
	}
}

/// Start loading the configured seed image, if any.
fn load_seed_image(
	config: &FieldConfig,
	shared: Weak<RefCell<Option<Mounted>>>,
) -> Option<ImageMaskLoader> {
	let SeedSource::Image {
		url,
		threshold,
		channel,
	} = &config.source
	else {
		return None;
	};
	let loader = load_image_mask(url, *threshold, *channel, move |result| {
		with_mounted(&shared, |m| match result {
			Ok(mask) => {
				m.field.set_mask(mask);
				if m.field.state() != DriverState::Running {
					m.field.render_static(&mut m.surface);
				}
			}
			Err(err) => warn!("particle-field: keeping uniform placement: {}", err),
		});
	});
	match loader {
		Ok(loader) => Some(loader),
		Err(err) => {
			warn!("particle-field: cannot load seed image: {}", err);
			None
		}
	}
}

fn listen(
	target: &web_sys::EventTarget,
	event: &'static str,
	handler: impl FnMut(web_sys::Event) + 'static,
	listeners: &mut Vec<EventListener>,
) {
	match EventListener::new(target, event, handler) {
		Ok(listener) => listeners.push(listener),
		Err(err) => warn!("particle-field: {}", err),
	}
}

/// Set everything up for `canvas`. `Err` carries a reason to show the fallback.
fn mount(
	shared: &Shared,
	canvas: HtmlCanvasElement,
	config: FieldConfig,
	sizing: Sizing,
	paused: bool,
	on_interaction: Option<Callback<FieldInteraction>>,
) -> Result<(), String> {
	let window = web_sys::window().ok_or("no window")?;
	let document: Document = window.document().ok_or("no document")?;

	let surface = CanvasSurface::attach(canvas.clone()).map_err(|err| err.to_string())?;
	let (w, h) = measure(&window, &canvas, sizing);
	surface.set_size(w, h);

	let static_only = config.respect_reduced_motion && prefers_reduced_motion(&window);
	let weak = Rc::downgrade(shared);

	let mut field = ParticleField::new(config, AnimationFrameScheduler::new(window.clone()));
	if let Some(callback) = on_interaction {
		field.set_on_interaction(Box::new(move |ev| callback.run(ev)));
	}
	let frame_target = weak.clone();
	field
		.driver()
		.scheduler()
		.set_callback(move |timestamp| with_mounted(&frame_target, |m| m.frame(timestamp)));
	field.prepare(w, h);

	let mut listeners = Vec::new();
	let (resize_target, resize_window) = (weak.clone(), window.clone());
	listen(
		&window,
		"resize",
		move |_| {
			with_mounted(&resize_target, |m| {
				let (w, h) = measure(&resize_window, m.surface.canvas(), sizing);
				m.resize(w, h);
			})
		},
		&mut listeners,
	);
	let (visibility_target, visibility_document) = (weak.clone(), document.clone());
	listen(
		&document,
		"visibilitychange",
		move |_| {
			with_mounted(&visibility_target, |m| {
				m.flags.hidden = visibility_document.hidden();
				m.sync_running();
			})
		},
		&mut listeners,
	);

	let image = load_seed_image(field.config(), weak);

	let mut mounted = Mounted {
		field,
		surface,
		_listeners: listeners,
		image,
		flags: RunFlags {
			user_paused: paused,
			hidden: document.hidden(),
			static_only,
		},
	};
	mounted.sync_running();
	info!(
		"particle-field: mounted {}x{} ({})",
		w,
		h,
		if static_only { "static" } else { "animated" }
	);
	*shared.borrow_mut() = Some(mounted);
	Ok(())
}

fn teardown(shared: &Shared) {
	let Ok(mut guard) = shared.try_borrow_mut() else {
		return;
	};
	let mounted = guard.take();
	drop(guard);
	drop(mounted);
}

/// Renders an animated particle field on a canvas element.
///
/// Pass configuration via the reactive `config` signal; changes re-seed the
/// field in place. The component sizes itself to its parent container by
/// default; set `fullscreen = true` to fill the viewport. Explicit
/// `width`/`height` override automatic sizing. `paused` stops the animation
/// while keeping particle state; `on_interaction` receives pointer presses.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] config: Signal<FieldConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(into, default = Signal::stored(false))] paused: Signal<bool>,
	#[prop(optional)] on_interaction: Option<Callback<FieldInteraction>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let shared: Shared = Rc::new(RefCell::new(None));
	let unsupported = RwSignal::new(None::<String>);

	let shared_mount = shared.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if shared_mount.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		if let Err(reason) = mount(
			&shared_mount,
			canvas,
			config.get_untracked(),
			Sizing {
				fullscreen,
				width,
				height,
			},
			paused.get_untracked(),
			on_interaction,
		) {
			warn!("particle-field: canvas unavailable: {}", reason);
			unsupported.set(Some(reason));
		}
	});

	let shared_config = shared.clone();
	Effect::new(move |_| {
		let next = config.get();
		let Ok(mut guard) = shared_config.try_borrow_mut() else {
			return;
		};
		let Some(m) = guard.as_mut() else {
			return;
		};
		if *m.field.config() == next {
			return;
		}
		let source_changed = m.field.config().source != next.source;
		m.field.reconfigure(next);
		if source_changed {
			// Detach the previous loader before starting another
			m.image = None;
			m.image = load_seed_image(m.field.config(), Rc::downgrade(&shared_config));
		}
		m.flags.static_only = m.field.config().respect_reduced_motion
			&& web_sys::window().is_some_and(|window| prefers_reduced_motion(&window));
		m.sync_running();
	});

	let shared_paused = shared.clone();
	Effect::new(move |_| {
		let paused = paused.get();
		if let Ok(mut guard) = shared_paused.try_borrow_mut() {
			if let Some(m) = guard.as_mut() {
				m.flags.user_paused = paused;
				m.sync_running();
			}
		}
	});

	let stored = StoredValue::new_local(shared.clone());
	on_cleanup(move || {
		let _ = stored.try_with_value(teardown);
	});

	let pointer_target = move |ev: &PointerEvent| {
		let canvas = canvas_ref.get_untracked()?;
		let rect = canvas.get_bounding_client_rect();
		Some((ev.client_x() as f64, ev.client_y() as f64, rect.left(), rect.top()))
	};

	let shared_move = Rc::downgrade(&shared);
	let on_pointermove = move |ev: PointerEvent| {
		if let Some((x, y, left, top)) = pointer_target(&ev) {
			with_mounted(&shared_move, |m| m.field.pointer_move(x, y, left, top));
		}
	};

	let shared_leave = Rc::downgrade(&shared);
	let on_pointerleave = move |_: PointerEvent| {
		with_mounted(&shared_leave, |m| m.field.pointer_leave());
	};

	let shared_down = Rc::downgrade(&shared);
	let on_pointerdown = move |ev: PointerEvent| {
		if let Some((x, y, left, top)) = pointer_target(&ev) {
			with_mounted(&shared_down, |m| m.field.pointer_press(x, y, left, top));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			on:pointermove=on_pointermove
			on:pointerleave=on_pointerleave
			on:pointerdown=on_pointerdown
			style="display: block; touch-action: none;"
		/>
		{move || {
			unsupported
				.get()
				.map(|reason| {
					view! {
						<div class="particle-field-fallback" role="note" title=reason>
							"Animated background unavailable in this browser."
						</div>
					}
				})
		}}
	}
}
