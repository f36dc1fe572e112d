//! `requestAnimationFrame` as a [`FrameScheduler`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use super::driver::FrameScheduler;
use super::error::{FieldError, describe_js};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Schedules one JS closure per display refresh.
///
/// The closure is installed after construction because it usually captures
/// the widget that owns this scheduler.
pub struct AnimationFrameScheduler {
	window: Window,
	callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationFrameScheduler {
	pub fn new(window: Window) -> Self {
		Self {
			window,
			callback: Rc::new(RefCell::new(None)),
		}
	}

	/// Install the closure run on every refresh, receiving the frame timestamp
	/// in milliseconds.
	pub fn set_callback(&self, callback: impl FnMut(f64) + 'static) {
		*self.callback.borrow_mut() = Some(Closure::new(callback));
	}
}

impl FrameScheduler for AnimationFrameScheduler {
	type Handle = i32;

	fn request_frame(&mut self) -> Result<i32, FieldError> {
		let callback = self.callback.borrow();
		let callback = callback
			.as_ref()
			.ok_or_else(|| FieldError::Scheduler("no frame callback installed".into()))?;
		self.window
			.request_animation_frame(callback.as_ref().unchecked_ref())
			.map_err(|err| FieldError::Scheduler(describe_js(&err)))
	}

	fn cancel_frame(&mut self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}
