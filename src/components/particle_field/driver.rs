//! Frame driver: an explicit `Idle → Running ⇄ Paused → Idle` state machine
//! over a host frame scheduler.
//!
//! The driver owns the handle of the one pending frame callback. Starting
//! cancels any pending callback before scheduling a new one, so there is never
//! more than one loop. A callback that fires without a matching pending handle
//! (it was cancelled, or the widget was torn down while it was in flight) is
//! stale and must not step or paint.

use log::debug;

use super::error::FieldError;

/// Longest frame delta fed to the simulation, in seconds. Longer gaps (tab
/// switches, breakpoints) are treated as one slow frame.
pub const MAX_FRAME_DELTA: f64 = 0.1;

/// Delta assumed for the first frame after (re)starting.
pub const NOMINAL_FRAME_DELTA: f64 = 1.0 / 60.0;

/// Host primitive that calls back once per display refresh.
pub trait FrameScheduler {
	type Handle: Copy + Eq + std::fmt::Debug;

	/// Ask for exactly one callback on the next refresh.
	fn request_frame(&mut self) -> Result<Self::Handle, FieldError>;

	/// Withdraw a callback requested earlier. Cancelling a handle that already
	/// fired is harmless.
	fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Lifecycle state of the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverState {
	#[default]
	Idle,
	Running,
	Paused,
}

pub struct FrameDriver<S: FrameScheduler> {
	scheduler: S,
	state: DriverState,
	pending: Option<S::Handle>,
	last_timestamp: Option<f64>,
	frames: u64,
}

impl<S: FrameScheduler> FrameDriver<S> {
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			state: DriverState::Idle,
			pending: None,
			last_timestamp: None,
			frames: 0,
		}
	}

	pub fn state(&self) -> DriverState {
		self.state
	}

	/// Frames stepped since construction.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	/// Enter `Running` with exactly one pending callback.
	///
	/// On scheduler failure the driver is left `Idle`.
	pub fn start(&mut self) -> Result<(), FieldError> {
		self.cancel_pending();
		self.last_timestamp = None;
		match self.scheduler.request_frame() {
			Ok(handle) => {
				self.pending = Some(handle);
				self.state = DriverState::Running;
				Ok(())
			}
			Err(err) => {
				self.state = DriverState::Idle;
				Err(err)
			}
		}
	}

	/// `Running → Paused`; any other state is left as is.
	pub fn pause(&mut self) {
		if self.state == DriverState::Running {
			self.cancel_pending();
			self.state = DriverState::Paused;
			debug!("particle-field: paused after {} frames", self.frames);
		}
	}

	/// `Paused → Running`; any other state is left as is.
	pub fn resume(&mut self) -> Result<(), FieldError> {
		if self.state == DriverState::Paused {
			self.start()
		} else {
			Ok(())
		}
	}

	/// Cancel the pending callback and go `Idle`.
	pub fn stop(&mut self) {
		self.cancel_pending();
		self.state = DriverState::Idle;
		self.last_timestamp = None;
	}

	/// Consume the pending callback for a frame at `timestamp_ms`.
	///
	/// Returns the simulation delta in seconds, or `None` if this callback is
	/// stale and the frame must be ignored.
	pub fn begin_frame(&mut self, timestamp_ms: f64) -> Option<f64> {
		if self.state != DriverState::Running {
			return None;
		}
		self.pending.take()?;

		let dt = match self.last_timestamp {
			Some(last) if timestamp_ms.is_finite() => {
				((timestamp_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DELTA)
			}
			_ => NOMINAL_FRAME_DELTA,
		};
		if timestamp_ms.is_finite() {
			self.last_timestamp = Some(timestamp_ms);
		}
		self.frames += 1;
		Some(dt)
	}

	/// Schedule the next callback if still `Running`.
	pub fn end_frame(&mut self) -> Result<(), FieldError> {
		if self.state != DriverState::Running || self.pending.is_some() {
			return Ok(());
		}
		match self.scheduler.request_frame() {
			Ok(handle) => {
				self.pending = Some(handle);
				Ok(())
			}
			Err(err) => {
				self.state = DriverState::Idle;
				Err(err)
			}
		}
	}

	fn cancel_pending(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel_frame(handle);
		}
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	#[derive(Debug, Default)]
	pub struct Queue {
		pub next_id: u32,
		pub pending: Vec<u32>,
		pub cancelled: Vec<u32>,
		pub fail: bool,
	}

	/// Scheduler whose callbacks only fire when a test says so.
	///
	/// Clones share one queue so a test can keep a handle on it after moving
	/// the scheduler into a driver.
	#[derive(Clone, Debug, Default)]
	pub struct ManualScheduler {
		pub queue: Rc<RefCell<Queue>>,
	}

	impl ManualScheduler {
		pub fn pending(&self) -> Vec<u32> {
			self.queue.borrow().pending.clone()
		}

		/// Pop the oldest pending callback, as the host would when it fires.
		pub fn fire(&self) -> Option<u32> {
			let mut queue = self.queue.borrow_mut();
			if queue.pending.is_empty() {
				None
			} else {
				Some(queue.pending.remove(0))
			}
		}

		pub fn set_failing(&self, fail: bool) {
			self.queue.borrow_mut().fail = fail;
		}
	}

	impl FrameScheduler for ManualScheduler {
		type Handle = u32;

		fn request_frame(&mut self) -> Result<u32, FieldError> {
			let mut queue = self.queue.borrow_mut();
			if queue.fail {
				return Err(FieldError::Scheduler("manual failure".into()));
			}
			queue.next_id += 1;
			let id = queue.next_id;
			queue.pending.push(id);
			Ok(id)
		}

		fn cancel_frame(&mut self, handle: u32) {
			let mut queue = self.queue.borrow_mut();
			queue.pending.retain(|&h| h != handle);
			queue.cancelled.push(handle);
		}
	}
}
