//! Win32: the drawable is the canvas' `HWND`.

use std::ffi::c_void;

use super::{Drawable, DrawableSource};
use crate::SurfaceError;

/// `JAWT_Win32DrawingSurfaceInfo` from `jawt_md.h`.
#[repr(C)]
#[allow(non_camel_case_types, dead_code)]
struct JAWT_Win32DrawingSurfaceInfo {
	/// A union of `HWND`, `HBITMAP` and the DIB bits; a canvas always has an `HWND`.
	hwnd: *mut c_void,
	hdc: *mut c_void,
	hpalette: *mut c_void,
}

#[derive(Default)]
pub struct Win32;

impl DrawableSource for Win32 {
	unsafe fn handoff<R>(&self, platform_info: *mut c_void, f: impl FnOnce(Drawable) -> R) -> Result<R, SurfaceError> {
		let info = unsafe { &*platform_info.cast::<JAWT_Win32DrawingSurfaceInfo>() };

		// Window handles are sign-extended 32-bit values, even on 64-bit Windows.
		Ok(f(Drawable(info.hwnd as isize as i64)))
	}
}
