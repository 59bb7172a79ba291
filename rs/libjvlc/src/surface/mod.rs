//! Borrowing a native window from an AWT canvas.
//!
//! The AWT protocol is a strict bracket: get the surface, lock it, get its
//! info, use the platform handle, then free the info, unlock and free the
//! surface. Every step is a guard below, so an early return releases exactly
//! what was acquired, newest first.

mod jawt;
#[cfg(all(unix, not(target_os = "macos")))]
mod x11;
#[cfg(windows)]
mod win32;

pub use jawt::*;

use std::ffi::c_void;

use crate::SurfaceError;

/// A platform window identifier libvlc can render into.
///
/// An `HWND` on Windows, an X11 `Drawable` elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawable(pub i64);

/// The drawing-surface half of a windowing toolkit.
pub trait DrawingSurfaces {
	type Canvas: Copy;
	type Surface: Copy;
	type Info: Copy;

	fn surface(&self, canvas: Self::Canvas) -> Option<Self::Surface>;
	fn free_surface(&self, surface: Self::Surface);

	/// Returns false when the lock failed.
	fn lock(&self, surface: Self::Surface) -> bool;
	fn unlock(&self, surface: Self::Surface);

	fn info(&self, surface: Self::Surface) -> Option<Self::Info>;
	fn free_info(&self, surface: Self::Surface, info: Self::Info);

	/// Extract the drawable from `info` and call `f` with it.
	fn handoff<R>(&self, info: Self::Info, f: impl FnOnce(Drawable) -> R) -> Result<R, SurfaceError>;
}

/// Turns a toolkit's platform info block into a [Drawable].
///
/// Picked at build time: [Platform] is the implementation for the target.
pub trait DrawableSource {
	/// Call `f` with the drawable described by `platform_info`.
	///
	/// # Safety
	/// `platform_info` must be the platform's drawing-surface info, valid for the whole call.
	unsafe fn handoff<R>(&self, platform_info: *mut c_void, f: impl FnOnce(Drawable) -> R) -> Result<R, SurfaceError>;
}

#[cfg(all(unix, not(target_os = "macos")))]
pub type Platform = x11::X11;

#[cfg(windows)]
pub type Platform = win32::Win32;

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub type Platform = Unsupported;

/// For targets whose AWT exposes neither an `HWND` nor an X11 drawable.
#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
#[derive(Default)]
pub struct Unsupported;

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
impl DrawableSource for Unsupported {
	unsafe fn handoff<R>(&self, _platform_info: *mut c_void, _f: impl FnOnce(Drawable) -> R) -> Result<R, SurfaceError> {
		Err(SurfaceError::Unsupported)
	}
}

/// Run `f` with the canvas' drawable while its surface is locked.
///
/// Any failure before the drawable is known aborts without calling `f`.
pub fn with_drawable<S: DrawingSurfaces, R>(
	surfaces: &S,
	canvas: S::Canvas,
	f: impl FnOnce(Drawable) -> R,
) -> Result<R, SurfaceError> {
	let surface = surfaces.surface(canvas).ok_or(SurfaceError::NullSurface)?;
	let surface = Acquired { surfaces, surface };

	let locked = surface.lock()?;
	let info = locked.info()?;

	surfaces.handoff(info.info, f)
}

struct Acquired<'a, S: DrawingSurfaces> {
	surfaces: &'a S,
	surface: S::Surface,
}

impl<'a, S: DrawingSurfaces> Acquired<'a, S> {
	fn lock(&self) -> Result<Locked<'a, S>, SurfaceError> {
		if !self.surfaces.lock(self.surface) {
			return Err(SurfaceError::Lock);
		}

		Ok(Locked {
			surfaces: self.surfaces,
			surface: self.surface,
		})
	}
}

impl<S: DrawingSurfaces> Drop for Acquired<'_, S> {
	fn drop(&mut self) {
		self.surfaces.free_surface(self.surface);
	}
}

struct Locked<'a, S: DrawingSurfaces> {
	surfaces: &'a S,
	surface: S::Surface,
}

impl<'a, S: DrawingSurfaces> Locked<'a, S> {
	fn info(&self) -> Result<Info<'a, S>, SurfaceError> {
		let info = self.surfaces.info(self.surface).ok_or(SurfaceError::NullInfo)?;

		Ok(Info {
			surfaces: self.surfaces,
			surface: self.surface,
			info,
		})
	}
}

impl<S: DrawingSurfaces> Drop for Locked<'_, S> {
	fn drop(&mut self) {
		self.surfaces.unlock(self.surface);
	}
}

struct Info<'a, S: DrawingSurfaces> {
	surfaces: &'a S,
	surface: S::Surface,
	info: S::Info,
}

impl<S: DrawingSurfaces> Drop for Info<'_, S> {
	fn drop(&mut self) {
		self.surfaces.free_info(self.surface, self.info);
	}
}
