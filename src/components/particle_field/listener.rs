//! DOM event listeners that detach themselves when dropped.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

use super::error::FieldError;

/// An attached listener; dropping it removes the listener.
pub struct EventListener {
	target: EventTarget,
	event: &'static str,
	closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, FieldError> {
		let closure = Closure::<dyn FnMut(Event)>::new(handler);
		target
			.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
			.map_err(|_| FieldError::Unsupported(event))?;
		Ok(Self {
			target: target.clone(),
			event,
			closure,
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
	}
}
