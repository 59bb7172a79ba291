//! X11: the drawable comes straight from AWT's X11 surface info.

use std::ffi::{OsString, c_int, c_ulong, c_void};
use std::sync::LazyLock;

use libloading::Library;

use super::{Drawable, DrawableSource};
use crate::{Error, SurfaceError, config, loader};

/// `JAWT_X11DrawingSurfaceInfo` from `jawt_md.h`.
#[repr(C)]
#[allow(non_camel_case_types, dead_code)]
struct JAWT_X11DrawingSurfaceInfo {
	drawable: c_ulong,
	display: *mut c_void,
	visual_id: c_ulong,
	colormap_id: c_ulong,
	depth: c_int,
	get_awt_color: Option<unsafe extern "system" fn(ds: *mut c_void, r: c_int, g: c_int, b: c_int) -> c_int>,
}

struct Xlib {
	create_gc: unsafe extern "C" fn(display: *mut c_void, drawable: c_ulong, mask: c_ulong, values: *mut c_void) -> *mut c_void,
	set_background: unsafe extern "C" fn(display: *mut c_void, gc: *mut c_void, background: c_ulong) -> c_int,
	free_gc: unsafe extern "C" fn(display: *mut c_void, gc: *mut c_void) -> c_int,
	_library: Option<Library>,
}

static XLIB: LazyLock<Option<Xlib>> = LazyLock::new(|| match Xlib::open() {
	Ok(xlib) => Some(xlib),
	Err(err) => {
		tracing::debug!(%err, "Xlib unavailable, handing off without a graphics context");
		None
	}
});

impl Xlib {
	fn open() -> Result<Self, Error> {
		let name = config()
			.x11_library
			.as_deref()
			.map(OsString::from)
			.unwrap_or_else(|| "libX11.so.6".into());

		let library = loader::open(&name)?;

		// SAFETY: the types match Xlib.h.
		unsafe {
			Ok(Self {
				create_gc: loader::symbol(&library, &name, b"XCreateGC\0")?,
				set_background: loader::symbol(&library, &name, b"XSetBackground\0")?,
				free_gc: loader::symbol(&library, &name, b"XFreeGC\0")?,
				_library: Some(library),
			})
		}
	}
}

/// A graphics context on the canvas, freed when dropped.
///
/// Nothing draws with it; creating one around the handoff is what an
/// AWT-native painter does.
struct Gc<'a> {
	xlib: &'a Xlib,
	display: *mut c_void,
	gc: *mut c_void,
}

impl<'a> Gc<'a> {
	fn create(xlib: &'a Xlib, display: *mut c_void, drawable: c_ulong) -> Option<Self> {
		let gc = unsafe { (xlib.create_gc)(display, drawable, 0, std::ptr::null_mut()) };
		if gc.is_null() {
			return None;
		}

		unsafe { (xlib.set_background)(display, gc, 0) };
		Some(Self { xlib, display, gc })
	}
}

impl Drop for Gc<'_> {
	fn drop(&mut self) {
		unsafe { (self.xlib.free_gc)(self.display, self.gc) };
	}
}

pub struct X11 {
	xlib: Option<&'static Xlib>,
}

impl Default for X11 {
	fn default() -> Self {
		Self { xlib: XLIB.as_ref() }
	}
}

impl DrawableSource for X11 {
	unsafe fn handoff<R>(&self, platform_info: *mut c_void, f: impl FnOnce(Drawable) -> R) -> Result<R, SurfaceError> {
		let info = unsafe { &*platform_info.cast::<JAWT_X11DrawingSurfaceInfo>() };

		let _gc = match (self.xlib, info.display.is_null()) {
			(Some(xlib), false) => Gc::create(xlib, info.display, info.drawable),
			_ => None,
		};

		// XIDs are 29 bits, so this never wraps.
		Ok(f(Drawable(info.drawable as i64)))
	}
}
