//! Loads a seed image and turns it into a [`PixelMask`].
//!
//! The image is drawn onto an offscreen canvas, downscaled so its longer side
//! is at most [`MAX_MASK_SIDE`] pixels, and read back with `getImageData`.
//! Cross-origin images without CORS headers taint the canvas; that read-back
//! fails and is reported as [`FieldError::Image`].

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use super::canvas::CanvasSurface;
use super::error::{FieldError, describe_js};
use super::seed::{PixelMask, SampleChannel};

/// Longest side of the rasterised mask, in pixels.
pub const MAX_MASK_SIDE: u32 = 256;

type ReadyCallback = Box<dyn FnOnce(Result<PixelMask, FieldError>)>;

/// An in-flight image load.
///
/// Dropping it detaches the load handlers, so a late `onload` does nothing.
/// `on_ready` must not drop the loader itself.
pub struct ImageMaskLoader {
	image: HtmlImageElement,
	_onload: Closure<dyn FnMut()>,
	_onerror: Closure<dyn FnMut()>,
}

impl Drop for ImageMaskLoader {
	fn drop(&mut self) {
		self.image.set_onload(None);
		self.image.set_onerror(None);
	}
}

/// Start loading `url`; `on_ready` runs at most once with the mask or the
/// reason there is none.
pub fn load_image_mask(
	url: &str,
	threshold: u8,
	channel: SampleChannel,
	on_ready: impl FnOnce(Result<PixelMask, FieldError>) + 'static,
) -> Result<ImageMaskLoader, FieldError> {
	let image = HtmlImageElement::new().map_err(|_| FieldError::Unsupported("HTMLImageElement"))?;
	image.set_cross_origin(Some("anonymous"));

	let ready: Rc<RefCell<Option<ReadyCallback>>> = Rc::new(RefCell::new(Some(Box::new(on_ready))));

	let (ready_load, image_load) = (ready.clone(), image.clone());
	let onload = Closure::<dyn FnMut()>::new(move || {
		if let Some(callback) = ready_load.borrow_mut().take() {
			callback(rasterize(&image_load, threshold, channel));
		}
	});

	let (ready_error, source) = (ready, url.to_string());
	let onerror = Closure::<dyn FnMut()>::new(move || {
		if let Some(callback) = ready_error.borrow_mut().take() {
			callback(Err(FieldError::Image(format!("failed to load {source}"))));
		}
	});

	image.set_onload(Some(onload.as_ref().unchecked_ref::<Function>()));
	image.set_onerror(Some(onerror.as_ref().unchecked_ref::<Function>()));
	image.set_src(url);
	debug!("particle-field: loading seed image {}", url);

	Ok(ImageMaskLoader {
		image,
		_onload: onload,
		_onerror: onerror,
	})
}

/// Fit `(width, height)` inside a `max_side` square, keeping the aspect ratio.
fn mask_size(width: u32, height: u32, max_side: u32) -> (u32, u32) {
	let longest = width.max(height);
	if longest <= max_side {
		return (width, height);
	}
	let scale = max_side as f64 / longest as f64;
	(
		((width as f64 * scale).round() as u32).max(1),
		((height as f64 * scale).round() as u32).max(1),
	)
}

fn rasterize(
	image: &HtmlImageElement,
	threshold: u8,
	channel: SampleChannel,
) -> Result<PixelMask, FieldError> {
	let (natural_w, natural_h) = (image.natural_width(), image.natural_height());
	if natural_w == 0 || natural_h == 0 {
		return Err(FieldError::Image("image has no pixels".into()));
	}
	let (w, h) = mask_size(natural_w, natural_h, MAX_MASK_SIDE);

	let document = web_sys::window()
		.and_then(|window| window.document())
		.ok_or(FieldError::Unsupported("document"))?;
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")
		.ok()
		.and_then(|el| el.dyn_into().ok())
		.ok_or(FieldError::Unsupported("canvas element"))?;
	let surface = CanvasSurface::attach(canvas)?;
	surface.set_size(w as f64, h as f64);

	let ctx = surface.context();
	ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, w as f64, h as f64)
		.map_err(|err| FieldError::Image(describe_js(&err)))?;
	let data = ctx
		.get_image_data(0.0, 0.0, w as f64, h as f64)
		.map_err(|err| FieldError::Image(describe_js(&err)))?;

	let mask = PixelMask::from_rgba(w, h, &data.data(), threshold, channel, 1);
	debug!(
		"particle-field: seed image {}x{} -> {} lit pixels",
		w,
		h,
		mask.len()
	);
	Ok(mask)
}
