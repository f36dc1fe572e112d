//! Widget core: one particle field instance, independent of the browser.
//!
//! Owns the store, the resolved strategies, the pointer bridge and the frame
//! driver. The Leptos component forwards host events here and hands over the
//! canvas on every frame; tests drive it with a manual scheduler and a
//! recording surface.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::driver::{DriverState, FrameDriver, FrameScheduler};
use super::error::FieldError;
use super::motion::Motion;
use super::particles::{ParticleStore, SeedParams};
use super::pointer::{PointerBridge, PointerConfig};
use super::render::FieldPainter;
use super::seed::{PixelMask, Seeder};
use super::surface::Surface;
use super::theme::Theme;
use super::types::{FieldConfig, FieldInteraction};

/// What a frame callback ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
	/// Cancelled or torn down while in flight; nothing ran.
	Stale,
	/// No surface this frame; skipped and rescheduled.
	SurfaceUnavailable,
	/// Stepped and painted.
	Rendered,
}

/// Host conditions that decide whether the frame loop should run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunFlags {
	/// Paused by the embedding page.
	pub user_paused: bool,
	/// Document is hidden (background tab).
	pub hidden: bool,
	/// Reduced motion: paint once, never loop.
	pub static_only: bool,
}

impl RunFlags {
	pub fn wants_running(self) -> bool {
		!(self.user_paused || self.hidden || self.static_only)
	}
}

/// Everything resolved once from a [`FieldConfig`].
struct Resolved {
	count: usize,
	theme: Theme,
	motion: Motion,
	pointer: PointerConfig,
	painter: FieldPainter,
}

impl Resolved {
	fn new(config: &FieldConfig) -> Self {
		let theme = config.theme();
		Self {
			count: config.particle_count(),
			motion: config.motion(),
			pointer: config.pointer(),
			painter: FieldPainter::new(&theme),
			theme,
		}
	}
}

/// A single particle field widget instance.
pub struct ParticleField<S: FrameScheduler> {
	config: FieldConfig,
	resolved: Resolved,
	store: ParticleStore,
	seeder: Seeder,
	pointer: PointerBridge,
	driver: FrameDriver<S>,
	rng: SmallRng,
	size: (f64, f64),
	/// Set by `prepare`, cleared by `unmount`.
	prepared: bool,
	time: f64,
	on_interaction: Option<Box<dyn FnMut(FieldInteraction)>>,
}

impl<S: FrameScheduler> ParticleField<S> {
	/// Build an idle, empty field. Nothing is seeded until [`Self::mount`].
	pub fn new(config: FieldConfig, scheduler: S) -> Self {
		Self {
			resolved: Resolved::new(&config),
			rng: SmallRng::seed_from_u64(config.seed),
			config,
			store: ParticleStore::default(),
			seeder: Seeder::Uniform,
			pointer: PointerBridge::default(),
			driver: FrameDriver::new(scheduler),
			size: (0.0, 0.0),
			prepared: false,
			time: 0.0,
			on_interaction: None,
		}
	}

	/// Seed for a `width` x `height` surface without starting the loop.
	pub fn prepare(&mut self, width: f64, height: f64) {
		self.size = (width, height);
		self.prepared = true;
		self.reseed();
	}

	/// Seed and start the frame loop.
	pub fn mount(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
		self.prepare(width, height);
		self.start()
	}

	/// Start (or restart) the frame loop over the current layout.
	pub fn start(&mut self) -> Result<(), FieldError> {
		self.driver.start()?;
		info!(
			"particle-field: running {} particles on {}x{}",
			self.store.len(),
			self.size.0,
			self.size.1
		);
		Ok(())
	}

	/// Stop the loop and discard every particle.
	pub fn unmount(&mut self) {
		self.driver.stop();
		self.prepared = false;
		self.pointer.leave();
		self.store = ParticleStore::default();
		debug!("particle-field: unmounted");
	}

	pub fn pause(&mut self) {
		self.driver.pause();
	}

	pub fn resume(&mut self) -> Result<(), FieldError> {
		self.driver.resume()
	}

	pub fn state(&self) -> DriverState {
		self.driver.state()
	}

	pub fn store(&self) -> &ParticleStore {
		&self.store
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn theme(&self) -> &Theme {
		&self.resolved.theme
	}

	pub fn driver(&self) -> &FrameDriver<S> {
		&self.driver
	}

	/// Re-seed for new surface dimensions. No-op if they did not change.
	///
	/// Before the first `prepare` only the size is recorded.
	pub fn resize(&mut self, width: f64, height: f64) {
		if (width, height) == self.size {
			return;
		}
		self.size = (width, height);
		if self.prepared {
			self.reseed();
		}
	}

	/// Move the loop to the state `flags` ask for: start or resume when it
	/// should run, pause when it should not.
	pub fn sync(&mut self, flags: RunFlags) -> Result<(), FieldError> {
		match (flags.wants_running(), self.driver.state()) {
			(true, DriverState::Paused) => self.driver.resume(),
			(true, DriverState::Idle) => self.start(),
			(false, DriverState::Running) => {
				self.driver.pause();
				Ok(())
			}
			_ => Ok(()),
		}
	}

	/// Apply a new configuration: strategies are re-resolved and the store is
	/// re-seeded. An image mask survives only if the seed source is unchanged.
	pub fn reconfigure(&mut self, config: FieldConfig) {
		if config.source != self.config.source {
			self.seeder = Seeder::Uniform;
		}
		if config.seed != self.config.seed {
			self.rng = SmallRng::seed_from_u64(config.seed);
		}
		self.resolved = Resolved::new(&config);
		self.config = config;
		self.reseed();
	}

	/// Seed future layouts from an image mask and re-seed now.
	pub fn set_mask(&mut self, mask: PixelMask) {
		if mask.is_empty() {
			warn!("particle-field: seed image has no lit pixels, keeping uniform placement");
			return;
		}
		debug!("particle-field: seed mask with {} candidate pixels", mask.len());
		self.seeder = Seeder::Mask(mask);
		self.reseed();
	}

	pub fn set_on_interaction(&mut self, callback: Box<dyn FnMut(FieldInteraction)>) {
		self.on_interaction = Some(callback);
	}

	pub fn pointer_move(&mut self, client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) {
		self.pointer.move_to(client_x, client_y, rect_left, rect_top);
	}

	pub fn pointer_leave(&mut self) {
		self.pointer.leave();
	}

	/// Burst particles away from the press point and report the interaction.
	pub fn pointer_press(&mut self, client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) {
		self.pointer.move_to(client_x, client_y, rect_left, rect_top);
		let Some((x, y)) = self.pointer.position() else {
			return;
		};
		if self.config.burst.is_finite() && self.config.burst != 0.0 {
			let radius = self.resolved.pointer.radius.max(1.0) * 1.5;
			self.store.burst(x, y, radius, self.config.burst);
		}
		if let Some(callback) = self.on_interaction.as_mut() {
			callback(FieldInteraction::Press { x, y });
		}
	}

	/// Run one frame callback: step then paint, then schedule the next one.
	///
	/// `surface` is `None` when the host has no drawing surface right now; the
	/// frame is skipped and retried on the next callback.
	pub fn frame<F: Surface + ?Sized>(
		&mut self,
		timestamp_ms: f64,
		surface: Option<&mut F>,
	) -> FrameOutcome {
		let Some(dt) = self.driver.begin_frame(timestamp_ms) else {
			return FrameOutcome::Stale;
		};

		let outcome = match surface {
			Some(surface) => {
				let force = self.pointer.force(&self.resolved.pointer);
				self.store
					.step(dt, &self.resolved.motion, force.as_ref(), &mut self.rng);
				self.time += dt;
				self.resolved.painter.paint(&self.store, surface, self.time);
				FrameOutcome::Rendered
			}
			None => FrameOutcome::SurfaceUnavailable,
		};

		if let Err(err) = self.driver.end_frame() {
			warn!("particle-field: frame loop stopped: {}", err);
		}
		outcome
	}

	/// Paint the current state once without stepping.
	pub fn render_static<F: Surface + ?Sized>(&mut self, surface: &mut F) -> bool {
		self.resolved.painter.paint(&self.store, surface, self.time)
	}

	fn reseed(&mut self) {
		let (width, height) = self.size;
		let r = &self.resolved;
		let params = SeedParams {
			style: &r.theme.particles,
			palette_len: r.theme.palette.len(),
			motion: &r.motion,
		};
		self.store = ParticleStore::initialize(
			r.count,
			width,
			height,
			&self.seeder,
			params,
			&mut self.rng,
		);
		if self.store.is_empty() {
			debug!(
				"particle-field: nothing to render (count {}, surface {}x{})",
				r.count, width, height
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::components::particle_field::driver::testing::ManualScheduler;
	use crate::components::particle_field::pointer::PointerMode;
	use crate::components::particle_field::seed::SampleChannel;
	use crate::components::particle_field::surface::testing::RecordingSurface;
	use crate::components::particle_field::theme::ParticleShape;
	use crate::components::particle_field::types::Preset;

	fn config(preset: Preset, count: i64) -> FieldConfig {
		FieldConfig {
			preset,
			count: Some(count),
			shape: Some(ParticleShape::Dot),
			..FieldConfig::default()
		}
	}

	fn field(config: FieldConfig) -> (ParticleField<ManualScheduler>, ManualScheduler) {
		let scheduler = ManualScheduler::default();
		(ParticleField::new(config, scheduler.clone()), scheduler)
	}

	/// Fire the host's pending callback the way `requestAnimationFrame` would.
	fn tick(
		field: &mut ParticleField<ManualScheduler>,
		scheduler: &ManualScheduler,
		surface: &mut RecordingSurface,
		ts: f64,
	) -> FrameOutcome {
		scheduler.fire();
		field.frame(ts, Some(surface))
	}

	fn distance_to_origin(field: &ParticleField<ManualScheduler>) -> f64 {
		field
			.store()
			.particles()
			.iter()
			.map(|p| {
				let (ox, oy) = p.origin.unwrap();
				((p.x - ox).powi(2) + (p.y - oy).powi(2)).sqrt()
			})
			.sum()
	}

	#[test]
	fn new_field_is_idle_and_empty() {
		let (field, scheduler) = field(config(Preset::Starfield, 10));
		assert_eq!(field.state(), DriverState::Idle);
		assert!(field.store().is_empty());
		assert!(scheduler.pending().is_empty());
	}

	#[test]
	fn mount_seeds_exact_count_and_runs() {
		for n in [0, 1, 10, 300] {
			let (mut field, scheduler) = field(config(Preset::Starfield, n));
			field.mount(200.0, 100.0).unwrap();
			assert_eq!(field.store().len(), n as usize);
			assert_eq!(field.state(), DriverState::Running);
			assert_eq!(scheduler.pending().len(), 1);
		}
	}

	#[test]
	fn starting_twice_paints_once_per_refresh() {
		let (mut field, scheduler) = field(config(Preset::Snow, 12));
		field.mount(100.0, 100.0).unwrap();
		field.resume().unwrap();
		field.pause();
		field.resume().unwrap();
		field.resume().unwrap();
		assert_eq!(scheduler.pending().len(), 1);

		let mut surface = RecordingSurface::new(100.0, 100.0);
		for i in 0..3 {
			surface.ops.clear();
			assert_eq!(
				tick(&mut field, &scheduler, &mut surface, i as f64 * 16.0),
				FrameOutcome::Rendered
			);
			assert_eq!(surface.particle_ops(), 12);
			assert_eq!(scheduler.pending().len(), 1);
		}
		assert_eq!(field.driver().frames(), 3);
	}

	#[test]
	fn zero_sized_surface_paints_nothing() {
		let (mut field, scheduler) = field(config(Preset::Starfield, 10));
		field.mount(100.0, 100.0).unwrap();
		let mut surface = RecordingSurface::new(0.0, 0.0);
		assert_eq!(
			tick(&mut field, &scheduler, &mut surface, 0.0),
			FrameOutcome::Rendered
		);
		assert!(surface.ops.is_empty());

		field.resize(0.0, 0.0);
		assert!(field.store().is_empty());
		tick(&mut field, &scheduler, &mut surface, 16.0);
		assert!(surface.ops.is_empty());
		assert_eq!(scheduler.pending().len(), 1);
	}

	#[test]
	fn missing_surface_skips_and_retries() {
		let (mut field, scheduler) = field(config(Preset::Swarm, 10));
		field.mount(100.0, 100.0).unwrap();
		let before = field.store().particles().to_vec();

		scheduler.fire();
		assert_eq!(
			field.frame::<RecordingSurface>(0.0, None),
			FrameOutcome::SurfaceUnavailable
		);
		assert_eq!(field.store().particles(), &before[..]);
		assert_eq!(scheduler.pending().len(), 1);

		let mut surface = RecordingSurface::new(100.0, 100.0);
		assert_eq!(
			tick(&mut field, &scheduler, &mut surface, 16.0),
			FrameOutcome::Rendered
		);
	}

	#[test]
	fn unmount_cancels_pending_frame_and_ignores_stale_callback() {
		let (mut field, scheduler) = field(config(Preset::Starfield, 10));
		field.mount(100.0, 100.0).unwrap();
		let mut surface = RecordingSurface::new(100.0, 100.0);
		tick(&mut field, &scheduler, &mut surface, 0.0);
		assert_eq!(scheduler.pending().len(), 1);

		field.unmount();
		assert!(scheduler.pending().is_empty());
		assert!(field.store().is_empty());

		// The callback was already in flight when teardown began.
		surface.ops.clear();
		assert_eq!(field.frame(16.0, Some(&mut surface)), FrameOutcome::Stale);
		assert!(surface.ops.is_empty());
		assert!(field.store().is_empty());
		assert!(scheduler.pending().is_empty());
	}

	#[test]
	fn stale_callback_after_pause_leaves_store_untouched() {
		let (mut field, scheduler) = field(config(Preset::Starfield, 10));
		field.mount(100.0, 100.0).unwrap();
		field.pause();
		let before = field.store().particles().to_vec();

		let mut surface = RecordingSurface::new(100.0, 100.0);
		assert_eq!(field.frame(16.0, Some(&mut surface)), FrameOutcome::Stale);
		assert_eq!(field.store().particles(), &before[..]);
		assert!(surface.ops.is_empty());

		// Pausing keeps particle state.
		field.resume().unwrap();
		assert_eq!(field.store().particles(), &before[..]);
	}

	#[test]
	fn sixty_frames_keep_particles_in_bounds() {
		for preset in [Preset::Starfield, Preset::Swarm, Preset::Rain, Preset::Snow] {
			let (mut field, scheduler) = field(config(preset, 10));
			field.mount(100.0, 100.0).unwrap();
			let mut surface = RecordingSurface::new(100.0, 100.0);
			for i in 0..60 {
				tick(&mut field, &scheduler, &mut surface, i as f64 * 16.0);
			}
			assert_eq!(field.store().len(), 10);
			for p in field.store().particles() {
				assert!((0.0..=100.0).contains(&p.x), "{preset:?} x = {}", p.x);
				assert!((0.0..=100.0).contains(&p.y), "{preset:?} y = {}", p.y);
			}
		}
	}

	#[test]
	fn pointer_leave_lets_swarm_settle_home() {
		let mut cfg = config(Preset::Swarm, 40);
		cfg.motion = Some(crate::components::particle_field::motion::MotionConfig::Swarm {
			spring: 30.0,
			damping: 0.88,
			jitter: 0.0,
		});
		cfg.pointer = Some(PointerConfig {
			mode: PointerMode::Repel,
			radius: 200.0,
			strength: 3000.0,
		});
		let (mut field, scheduler) = field(cfg);
		field.mount(200.0, 200.0).unwrap();
		let mut surface = RecordingSurface::new(200.0, 200.0);

		field.pointer_move(100.0, 100.0, 0.0, 0.0);
		let mut ts = 0.0;
		for _ in 0..30 {
			tick(&mut field, &scheduler, &mut surface, ts);
			ts += 16.0;
		}
		let displaced = distance_to_origin(&field);
		assert!(displaced > 1.0);

		field.pointer_leave();
		for _ in 0..240 {
			tick(&mut field, &scheduler, &mut surface, ts);
			ts += 16.0;
		}
		let settled = distance_to_origin(&field);
		assert!(settled < displaced * 0.1, "{settled} vs {displaced}");

		// Nobody got dragged toward the corner.
		let corner = field
			.store()
			.particles()
			.iter()
			.filter(|p| {
				let far_home = p.origin.is_some_and(|(ox, oy)| ox > 5.0 || oy > 5.0);
				p.x < 1.0 && p.y < 1.0 && far_home
			})
			.count();
		assert_eq!(corner, 0);
	}

	#[test]
	fn pointer_at_origin_still_exerts_force() {
		let mut cfg = config(Preset::Swarm, 30);
		cfg.pointer = Some(PointerConfig {
			mode: PointerMode::Attract,
			radius: 500.0,
			strength: 3000.0,
		});
		let (mut field, scheduler) = field(cfg);
		field.mount(100.0, 100.0).unwrap();
		field.pointer_move(0.0, 0.0, 0.0, 0.0);
		let mut surface = RecordingSurface::new(100.0, 100.0);
		for i in 0..10 {
			tick(&mut field, &scheduler, &mut surface, i as f64 * 16.0);
		}
		assert!(distance_to_origin(&field) > 1.0);
	}

	#[test]
	fn resize_reseeds_for_new_dimensions() {
		let (mut field, _) = field(config(Preset::Starfield, 50));
		field.mount(100.0, 100.0).unwrap();
		field.resize(400.0, 20.0);
		assert_eq!(field.store().bounds(), (400.0, 20.0));
		assert_eq!(field.store().len(), 50);
		assert!(
			field
				.store()
				.particles()
				.iter()
				.all(|p| p.x <= 400.0 && p.y <= 20.0)
		);
	}

	#[test]
	fn resize_after_zero_sized_prepare_seeds() {
		let (mut field, _) = field(config(Preset::Starfield, 10));
		field.prepare(0.0, 0.0);
		assert!(field.store().is_empty());
		field.resize(300.0, 200.0);
		assert_eq!(field.store().len(), 10);
		assert_eq!(field.store().bounds(), (300.0, 200.0));
	}

	#[test]
	fn resize_before_prepare_or_after_unmount_stays_empty() {
		let (mut field, _) = field(config(Preset::Starfield, 10));
		field.resize(300.0, 200.0);
		assert!(field.store().is_empty());

		field.mount(100.0, 100.0).unwrap();
		field.unmount();
		field.resize(640.0, 480.0);
		assert!(field.store().is_empty());
		assert_eq!(field.state(), DriverState::Idle);
	}

	#[test]
	fn starfield_returns_to_cruise_speed_after_press() {
		let max_speed = |field: &ParticleField<ManualScheduler>| {
			field
				.store()
				.particles()
				.iter()
				.map(|p| p.vx.hypot(p.vy))
				.fold(0.0, f64::max)
		};
		let (mut field, scheduler) = field(config(Preset::Starfield, 200));
		field.mount(400.0, 400.0).unwrap();
		assert!(max_speed(&field) <= 12.0);

		field.pointer_press(200.0, 200.0, 0.0, 0.0);
		assert!(max_speed(&field) > 50.0);

		let mut surface = RecordingSurface::new(400.0, 400.0);
		for i in 0..600 {
			tick(&mut field, &scheduler, &mut surface, i as f64 * 16.0);
		}
		let settled = max_speed(&field);
		assert!(settled <= 12.5, "max speed {settled}");
	}

	#[test]
	fn run_flags_only_want_running_when_all_clear() {
		for bits in 0..8u8 {
			let flags = RunFlags {
				user_paused: bits & 1 != 0,
				hidden: bits & 2 != 0,
				static_only: bits & 4 != 0,
			};
			assert_eq!(flags.wants_running(), bits == 0, "{flags:?}");
		}
	}

	#[test]
	fn sync_follows_run_flags_from_every_state() {
		let run = RunFlags::default();
		let hidden = RunFlags {
			hidden: true,
			..RunFlags::default()
		};
		let (mut field, scheduler) = field(config(Preset::Snow, 5));
		field.prepare(100.0, 100.0);

		// Idle stays idle when it should not run.
		field.sync(hidden).unwrap();
		assert_eq!(field.state(), DriverState::Idle);
		assert!(scheduler.pending().is_empty());

		// Idle -> Running.
		field.sync(run).unwrap();
		assert_eq!(field.state(), DriverState::Running);
		assert_eq!(scheduler.pending().len(), 1);

		// Running stays running without a second loop.
		field.sync(run).unwrap();
		assert_eq!(field.state(), DriverState::Running);
		assert_eq!(scheduler.pending().len(), 1);

		// Running -> Paused, then Paused stays paused.
		field.sync(hidden).unwrap();
		assert_eq!(field.state(), DriverState::Paused);
		assert!(scheduler.pending().is_empty());
		field.sync(hidden).unwrap();
		assert_eq!(field.state(), DriverState::Paused);

		// Paused -> Running keeps the particles.
		let before = field.store().particles().to_vec();
		field.sync(run).unwrap();
		assert_eq!(field.state(), DriverState::Running);
		assert_eq!(scheduler.pending().len(), 1);
		assert_eq!(field.store().particles(), &before[..]);
	}

	#[test]
	fn sync_reports_scheduler_failure_and_stays_idle() {
		let (mut field, scheduler) = field(config(Preset::Snow, 5));
		field.prepare(100.0, 100.0);
		scheduler.set_failing(true);
		assert!(field.sync(RunFlags::default()).is_err());
		assert_eq!(field.state(), DriverState::Idle);
	}

	#[test]
	fn reconfigure_changes_count_and_keeps_running() {
		let (mut field, scheduler) = field(config(Preset::Starfield, 50));
		field.mount(100.0, 100.0).unwrap();
		field.reconfigure(config(Preset::Rain, 5));
		assert_eq!(field.store().len(), 5);
		assert_eq!(field.theme().name, "rain");
		assert_eq!(field.state(), DriverState::Running);
		assert_eq!(scheduler.pending().len(), 1);
	}

	#[test]
	fn same_seed_reproduces_layout() {
		let (mut a, _) = field(config(Preset::Starfield, 20));
		let (mut b, _) = field(config(Preset::Starfield, 20));
		a.mount(100.0, 100.0).unwrap();
		b.mount(100.0, 100.0).unwrap();
		assert_eq!(a.store().particles(), b.store().particles());
	}

	#[test]
	fn mask_places_particles_on_lit_pixels() {
		let (mut field, _) = field(config(Preset::Swarm, 100));
		field.mount(100.0, 100.0).unwrap();

		// 2x2 image, only the bottom-right pixel lit.
		let mut rgba = vec![0u8; 16];
		rgba[12..16].copy_from_slice(&[255, 255, 255, 255]);
		field.set_mask(PixelMask::from_rgba(2, 2, &rgba, 128, SampleChannel::Alpha, 1));

		assert_eq!(field.store().len(), 100);
		assert!(
			field
				.store()
				.particles()
				.iter()
				.all(|p| p.x >= 50.0 && p.y >= 50.0)
		);
	}

	#[test]
	fn empty_mask_keeps_uniform_layout() {
		let (mut field, _) = field(config(Preset::Swarm, 10));
		field.mount(100.0, 100.0).unwrap();
		let before = field.store().particles().to_vec();
		field.set_mask(PixelMask::default());
		assert_eq!(field.store().particles(), &before[..]);
	}

	#[test]
	fn press_reports_interaction_in_surface_space() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let (mut field, _) = field(config(Preset::Swarm, 10));
		let sink = seen.clone();
		field.set_on_interaction(Box::new(move |ev| sink.borrow_mut().push(ev)));
		field.mount(100.0, 100.0).unwrap();

		field.pointer_press(130.0, 70.0, 100.0, 50.0);
		assert_eq!(
			*seen.borrow(),
			vec![FieldInteraction::Press { x: 30.0, y: 20.0 }]
		);
	}

	#[test]
	fn scheduler_failure_degrades_to_static_frame() {
		let (mut field, scheduler) = field(config(Preset::Snow, 8));
		scheduler.set_failing(true);
		assert!(field.mount(100.0, 100.0).is_err());
		assert_eq!(field.state(), DriverState::Idle);
		assert_eq!(field.store().len(), 8);

		let mut surface = RecordingSurface::new(100.0, 100.0);
		assert!(field.render_static(&mut surface));
		assert_eq!(surface.particle_ops(), 8);
	}
}
