//! Runtime loading of the native libraries this crate drives.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use libloading::Library;

use crate::Error;

/// Open a shared library by file name or path.
pub fn open(name: &OsStr) -> Result<Library, Error> {
	// SAFETY: none of the libraries loaded here run initializers with preconditions.
	let library = unsafe { Library::new(name) }.map_err(|err| load_error(name, err))?;
	tracing::debug!(library = %Path::new(name).display(), "loaded");
	Ok(library)
}

/// Copy a function pointer out of `library`.
///
/// # Safety
/// `T` must be the symbol's real type.
pub unsafe fn symbol<T: Copy>(library: &Library, name: &OsStr, symbol: &[u8]) -> Result<T, Error> {
	let sym = unsafe { library.get::<T>(symbol) }.map_err(|err| load_error(name, err))?;
	Ok(*sym)
}

fn load_error(name: &OsStr, err: libloading::Error) -> Error {
	Error::Load {
		library: Path::new(name).display().to_string(),
		source: Arc::new(err),
	}
}
