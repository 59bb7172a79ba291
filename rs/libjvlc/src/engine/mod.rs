mod libvlc;

pub use libvlc::*;

use std::ffi::{CStr, c_void};
use std::ptr::NonNull;

use crate::{Drawable, Error};

/// A running libvlc instance, owned by the Java object.
///
/// This library never creates or releases an instance, it only borrows the
/// pointer for the duration of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instance(NonNull<c_void>);

impl Instance {
	/// Wrap the pointer the Java side stores in a `long` field.
	pub fn from_raw(raw: i64) -> Result<Self, Error> {
		NonNull::new(raw as usize as *mut c_void)
			.map(Self)
			.ok_or(Error::NoInstance)
	}

	pub fn as_ptr(self) -> *mut c_void {
		self.0.as_ptr()
	}
}

/// The video half of the playback engine.
///
/// Each call is synchronous and reports engine failures through the returned
/// [Result]; there is no separate error slot to check afterwards.
pub trait Engine {
	/// The currently playing media, released when dropped.
	type Input;

	/// Look up the active input, or [Error::NoInput] when nothing is playing.
	fn input(&self, instance: Instance) -> Result<Self::Input, Error>;

	fn toggle_fullscreen(&self, input: &Self::Input) -> Result<(), Error>;
	fn set_fullscreen(&self, input: &Self::Input, fullscreen: bool) -> Result<(), Error>;
	fn fullscreen(&self, input: &Self::Input) -> Result<bool, Error>;

	fn height(&self, input: &Self::Input) -> Result<i32, Error>;
	fn width(&self, input: &Self::Input) -> Result<i32, Error>;

	/// Write the current frame to `path`.
	fn take_snapshot(&self, input: &Self::Input, path: &CStr) -> Result<(), Error>;

	/// Tear down the video output.
	fn destroy(&self, input: &Self::Input) -> Result<(), Error>;

	/// Render into a window owned by someone else.
	fn set_parent(&self, instance: Instance, drawable: Drawable) -> Result<(), Error>;

	fn resize(&self, input: &Self::Input, width: i32, height: i32) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn null_instance() {
		assert!(matches!(Instance::from_raw(0), Err(Error::NoInstance)));
	}

	#[test]
	fn instance_round_trips_pointer() {
		let instance = Instance::from_raw(0x7f00_1000).unwrap();
		assert_eq!(instance.as_ptr() as usize, 0x7f00_1000);
	}
}
