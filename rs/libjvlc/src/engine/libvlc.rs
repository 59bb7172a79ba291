//! Runtime binding to libvlc's 0.8 exception-style API.

#![allow(non_camel_case_types)]

use std::ffi::{CStr, OsString, c_char, c_int};
use std::path::Path;
use std::ptr::{self, NonNull};
use std::sync::LazyLock;

use libloading::Library;

use super::{Engine, Instance};
use crate::{Drawable, EngineError, Error, config, loader};

#[repr(C)]
pub struct libvlc_exception_t {
	b_raised: c_int,
	psz_message: *mut c_char,
}

pub enum libvlc_instance_t {}
pub enum libvlc_input_t {}

type libvlc_drawable_t = c_int;

type InputFn = unsafe extern "C" fn(*mut libvlc_input_t, *mut libvlc_exception_t);
type InputIntFn = unsafe extern "C" fn(*mut libvlc_input_t, *mut libvlc_exception_t) -> c_int;

/// The libvlc entry points used here, copied out of the loaded library.
struct Api {
	exception_init: unsafe extern "C" fn(*mut libvlc_exception_t),
	exception_raised: unsafe extern "C" fn(*mut libvlc_exception_t) -> c_int,
	exception_get_message: unsafe extern "C" fn(*mut libvlc_exception_t) -> *const c_char,
	exception_clear: unsafe extern "C" fn(*mut libvlc_exception_t),

	playlist_get_input: unsafe extern "C" fn(*mut libvlc_instance_t, *mut libvlc_exception_t) -> *mut libvlc_input_t,
	input_free: unsafe extern "C" fn(*mut libvlc_input_t),

	toggle_fullscreen: InputFn,
	set_fullscreen: unsafe extern "C" fn(*mut libvlc_input_t, c_int, *mut libvlc_exception_t),
	get_fullscreen: InputIntFn,
	video_get_height: InputIntFn,
	video_get_width: InputIntFn,
	video_take_snapshot: unsafe extern "C" fn(*mut libvlc_input_t, *mut c_char, *mut libvlc_exception_t),
	video_destroy: InputIntFn,
	video_set_parent:
		unsafe extern "C" fn(*mut libvlc_instance_t, libvlc_drawable_t, *mut libvlc_exception_t) -> c_int,
	video_resize: unsafe extern "C" fn(*mut libvlc_input_t, c_int, c_int, *mut libvlc_exception_t),

	// Keeps the function pointers above valid.
	_library: Option<Library>,
}

static LIBVLC: LazyLock<Result<Libvlc, Error>> = LazyLock::new(|| Libvlc::open(config().vlc_library.as_deref()));

/// The process-wide libvlc binding, loaded on first use.
pub fn libvlc() -> Result<&'static Libvlc, Error> {
	LIBVLC.as_ref().map_err(Clone::clone)
}

fn default_library() -> OsString {
	if cfg!(windows) {
		"libvlc.dll".into()
	} else {
		libloading::library_filename("vlc")
	}
}

/// libvlc, resolved at runtime.
pub struct Libvlc {
	api: Api,
}

impl Libvlc {
	pub fn open(path: Option<&Path>) -> Result<Self, Error> {
		let name = path.map(OsString::from).unwrap_or_else(default_library);
		let library = loader::open(&name)?;

		// SAFETY: the types match the libvlc 0.8 headers.
		let api = unsafe {
			Api {
				exception_init: loader::symbol(&library, &name, b"libvlc_exception_init\0")?,
				exception_raised: loader::symbol(&library, &name, b"libvlc_exception_raised\0")?,
				exception_get_message: loader::symbol(&library, &name, b"libvlc_exception_get_message\0")?,
				exception_clear: loader::symbol(&library, &name, b"libvlc_exception_clear\0")?,
				playlist_get_input: loader::symbol(&library, &name, b"libvlc_playlist_get_input\0")?,
				input_free: loader::symbol(&library, &name, b"libvlc_input_free\0")?,
				toggle_fullscreen: loader::symbol(&library, &name, b"libvlc_toggle_fullscreen\0")?,
				set_fullscreen: loader::symbol(&library, &name, b"libvlc_set_fullscreen\0")?,
				get_fullscreen: loader::symbol(&library, &name, b"libvlc_get_fullscreen\0")?,
				video_get_height: loader::symbol(&library, &name, b"libvlc_video_get_height\0")?,
				video_get_width: loader::symbol(&library, &name, b"libvlc_video_get_width\0")?,
				video_take_snapshot: loader::symbol(&library, &name, b"libvlc_video_take_snapshot\0")?,
				video_destroy: loader::symbol(&library, &name, b"libvlc_video_destroy\0")?,
				video_set_parent: loader::symbol(&library, &name, b"libvlc_video_set_parent\0")?,
				video_resize: loader::symbol(&library, &name, b"libvlc_video_resize\0")?,
				_library: Some(library),
			}
		};

		Ok(Self { api })
	}

	/// Run one libvlc call with a fresh exception slot and check it straight after.
	fn call<T>(&self, f: impl FnOnce(&Api, *mut libvlc_exception_t) -> T) -> Result<T, EngineError> {
		let mut exception = Exception::new(&self.api);
		let ret = f(&self.api, exception.as_mut_ptr());
		exception.check()?;
		Ok(ret)
	}
}

/// A libvlc exception slot, cleared exactly once when dropped.
struct Exception<'a> {
	api: &'a Api,
	raw: libvlc_exception_t,
}

impl<'a> Exception<'a> {
	fn new(api: &'a Api) -> Self {
		let mut raw = libvlc_exception_t {
			b_raised: 0,
			psz_message: ptr::null_mut(),
		};
		unsafe { (api.exception_init)(&mut raw) };

		Self { api, raw }
	}

	fn as_mut_ptr(&mut self) -> *mut libvlc_exception_t {
		&mut self.raw
	}

	fn check(mut self) -> Result<(), EngineError> {
		if unsafe { (self.api.exception_raised)(&mut self.raw) } == 0 {
			return Ok(());
		}

		let message = unsafe { (self.api.exception_get_message)(&mut self.raw) };
		if message.is_null() {
			return Err(EngineError::new("unknown libvlc error"));
		}

		// SAFETY: libvlc owns the message until the slot is cleared on drop.
		let message = unsafe { CStr::from_ptr(message) };
		Err(EngineError::new(message.to_string_lossy()))
	}
}

impl Drop for Exception<'_> {
	fn drop(&mut self) {
		unsafe { (self.api.exception_clear)(&mut self.raw) };
	}
}

/// The active input of an instance, freed when dropped.
pub struct Input {
	raw: NonNull<libvlc_input_t>,
	free: unsafe extern "C" fn(*mut libvlc_input_t),
}

impl Input {
	fn as_ptr(&self) -> *mut libvlc_input_t {
		self.raw.as_ptr()
	}
}

impl Drop for Input {
	fn drop(&mut self) {
		unsafe { (self.free)(self.raw.as_ptr()) };
	}
}

impl Engine for Libvlc {
	type Input = Input;

	fn input(&self, instance: Instance) -> Result<Input, Error> {
		let mut exception = Exception::new(&self.api);
		let raw = unsafe { (self.api.playlist_get_input)(instance.as_ptr().cast(), exception.as_mut_ptr()) };

		// Owned before the check, so a pointer returned alongside an exception is still freed.
		let input = NonNull::new(raw).map(|raw| Input {
			raw,
			free: self.api.input_free,
		});

		if let Err(err) = exception.check() {
			tracing::debug!(%err, "no input");
			return Err(Error::NoInput);
		}

		input.ok_or(Error::NoInput)
	}

	fn toggle_fullscreen(&self, input: &Input) -> Result<(), Error> {
		self.call(|api, ex| unsafe { (api.toggle_fullscreen)(input.as_ptr(), ex) })?;
		Ok(())
	}

	fn set_fullscreen(&self, input: &Input, fullscreen: bool) -> Result<(), Error> {
		self.call(|api, ex| unsafe { (api.set_fullscreen)(input.as_ptr(), fullscreen as c_int, ex) })?;
		Ok(())
	}

	fn fullscreen(&self, input: &Input) -> Result<bool, Error> {
		let res = self.call(|api, ex| unsafe { (api.get_fullscreen)(input.as_ptr(), ex) })?;
		Ok(res != 0)
	}

	fn height(&self, input: &Input) -> Result<i32, Error> {
		Ok(self.call(|api, ex| unsafe { (api.video_get_height)(input.as_ptr(), ex) })?)
	}

	fn width(&self, input: &Input) -> Result<i32, Error> {
		Ok(self.call(|api, ex| unsafe { (api.video_get_width)(input.as_ptr(), ex) })?)
	}

	fn take_snapshot(&self, input: &Input, path: &CStr) -> Result<(), Error> {
		// libvlc takes a mutable pointer but only reads the path.
		self.call(|api, ex| unsafe { (api.video_take_snapshot)(input.as_ptr(), path.as_ptr().cast_mut(), ex) })?;
		Ok(())
	}

	fn destroy(&self, input: &Input) -> Result<(), Error> {
		self.call(|api, ex| unsafe { (api.video_destroy)(input.as_ptr(), ex) })?;
		Ok(())
	}

	fn set_parent(&self, instance: Instance, drawable: Drawable) -> Result<(), Error> {
		let raw = libvlc_drawable_t::try_from(drawable.0).map_err(|_| Error::DrawableRange(drawable.0))?;
		self.call(|api, ex| unsafe { (api.video_set_parent)(instance.as_ptr().cast(), raw, ex) })?;
		Ok(())
	}

	fn resize(&self, input: &Input, width: i32, height: i32) -> Result<(), Error> {
		self.call(|api, ex| unsafe { (api.video_resize)(input.as_ptr(), width, height, ex) })?;
		Ok(())
	}
}
