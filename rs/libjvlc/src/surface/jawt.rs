//! JAWT, the JDK's native interface to AWT components.

#![allow(non_camel_case_types, non_snake_case)]

use std::ffi::{OsStr, c_void};
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::sync::OnceLock;

use jni::objects::{JString, JValue};
use jni::sys::{JNI_FALSE, JNIEnv, jboolean, jint, jobject};
use libloading::Library;

use super::{Drawable, DrawableSource, DrawingSurfaces, Platform};
use crate::{Error, SurfaceError, config, loader};

pub const JAWT_VERSION_1_3: jint = 0x0001_0003;
pub const JAWT_LOCK_ERROR: jint = 0x0000_0001;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct JAWT_Rectangle {
	pub x: jint,
	pub y: jint,
	pub width: jint,
	pub height: jint,
}

#[repr(C)]
pub struct JAWT_DrawingSurfaceInfo {
	/// `JAWT_X11DrawingSurfaceInfo` or `JAWT_Win32DrawingSurfaceInfo`.
	pub platformInfo: *mut c_void,
	pub ds: *mut JAWT_DrawingSurface,
	pub bounds: JAWT_Rectangle,
	pub clipSize: jint,
	pub clip: *mut JAWT_Rectangle,
}

#[repr(C)]
pub struct JAWT_DrawingSurface {
	pub env: *mut JNIEnv,
	pub target: jobject,
	pub Lock: Option<unsafe extern "system" fn(ds: *mut JAWT_DrawingSurface) -> jint>,
	pub GetDrawingSurfaceInfo:
		Option<unsafe extern "system" fn(ds: *mut JAWT_DrawingSurface) -> *mut JAWT_DrawingSurfaceInfo>,
	pub FreeDrawingSurfaceInfo: Option<unsafe extern "system" fn(dsi: *mut JAWT_DrawingSurfaceInfo)>,
	pub Unlock: Option<unsafe extern "system" fn(ds: *mut JAWT_DrawingSurface)>,
}

/// Filled in by `JAWT_GetAWT` up to the requested version.
#[repr(C)]
#[derive(Default)]
pub struct JAWT {
	pub version: jint,
	pub GetDrawingSurface: Option<unsafe extern "system" fn(env: *mut JNIEnv, target: jobject) -> *mut JAWT_DrawingSurface>,
	pub FreeDrawingSurface: Option<unsafe extern "system" fn(ds: *mut JAWT_DrawingSurface)>,
	// 1.4
	pub Lock: Option<unsafe extern "system" fn(env: *mut JNIEnv)>,
	pub Unlock: Option<unsafe extern "system" fn(env: *mut JNIEnv)>,
	pub GetComponent: Option<unsafe extern "system" fn(env: *mut JNIEnv, platformInfo: *mut c_void) -> jobject>,
}

type GetAwtFn = unsafe extern "system" fn(env: *mut JNIEnv, awt: *mut JAWT) -> jboolean;

struct Libjawt {
	get_awt: GetAwtFn,
	_library: Library,
}

impl Libjawt {
	fn open(name: &OsStr) -> Result<Self, Error> {
		let library = loader::open(name)?;
		// SAFETY: matches `jboolean JAWT_GetAWT(JNIEnv*, JAWT*)`.
		let get_awt = unsafe { loader::symbol(&library, name, b"JAWT_GetAWT\0")? };

		Ok(Self {
			get_awt,
			_library: library,
		})
	}
}

static LIBJAWT: OnceLock<Result<Libjawt, Error>> = OnceLock::new();

/// Load JAWT on first use: the configured path, else the loader's search path, else the running JDK.
///
/// # Safety
/// `env` must be the current thread's JNI environment.
unsafe fn libjawt(env: *mut JNIEnv) -> &'static Result<Libjawt, Error> {
	LIBJAWT.get_or_init(|| {
		if let Some(path) = &config().jawt_library {
			return Libjawt::open(path.as_os_str());
		}

		Libjawt::open(&libloading::library_filename("jawt")).or_else(|err| {
			tracing::debug!(%err, "JAWT not on the library path, trying java.home");
			let java_home = unsafe { java_home(env) }?;
			Libjawt::open(jawt_path(&java_home).as_os_str())
		})
	})
}

/// Where a JDK keeps JAWT, relative to its `java.home`.
fn jawt_path(java_home: &Path) -> PathBuf {
	let dir = if cfg!(windows) { "bin" } else { "lib" };
	java_home.join(dir).join(libloading::library_filename("jawt"))
}

/// Read `System.getProperty("java.home")`.
///
/// # Safety
/// `raw` must be the current thread's JNI environment.
unsafe fn java_home(raw: *mut JNIEnv) -> Result<PathBuf, Error> {
	let mut env = unsafe { jni::JNIEnv::from_raw(raw) }?;

	let res = system_property(&mut env, "java.home");
	if res.is_err() {
		// Don't leave the lookup's exception pending for the caller.
		let _ = env.exception_clear();
	}

	res
}

fn system_property(env: &mut jni::JNIEnv, key: &str) -> Result<PathBuf, Error> {
	let key = env.new_string(key)?;
	let value = env
		.call_static_method(
			"java/lang/System",
			"getProperty",
			"(Ljava/lang/String;)Ljava/lang/String;",
			&[JValue::Object(&key)],
		)?
		.l()?;

	if value.is_null() {
		return Err(Error::InvalidString);
	}

	let value: String = env.get_string(&JString::from(value))?.into();
	Ok(PathBuf::from(value))
}

/// AWT's drawing surfaces, for one JNI call.
pub struct Jawt<P = Platform> {
	env: *mut JNIEnv,
	awt: JAWT,
	platform: P,
}

impl Jawt {
	/// Ask the JVM for AWT, pinned to version 1.3.
	///
	/// # Safety
	/// `env` must be the current thread's JNI environment, valid for the lifetime of the result.
	pub unsafe fn get(env: *mut JNIEnv) -> Result<Self, SurfaceError> {
		let libjawt = unsafe { libjawt(env) }.as_ref().map_err(|err| {
			tracing::warn!(%err, "failed to load JAWT");
			SurfaceError::AwtNotFound
		})?;

		let mut awt = JAWT {
			version: JAWT_VERSION_1_3,
			..Default::default()
		};

		if unsafe { (libjawt.get_awt)(env, &mut awt) } == JNI_FALSE {
			return Err(SurfaceError::AwtNotFound);
		}

		if awt.GetDrawingSurface.is_none() || awt.FreeDrawingSurface.is_none() {
			return Err(SurfaceError::AwtNotFound);
		}

		Ok(Self {
			env,
			awt,
			platform: Platform::default(),
		})
	}
}

impl<P: DrawableSource> DrawingSurfaces for Jawt<P> {
	type Canvas = jobject;
	type Surface = NonNull<JAWT_DrawingSurface>;
	type Info = NonNull<JAWT_DrawingSurfaceInfo>;

	fn surface(&self, canvas: jobject) -> Option<Self::Surface> {
		let get = self.awt.GetDrawingSurface?;
		NonNull::new(unsafe { get(self.env, canvas) })
	}

	fn free_surface(&self, surface: Self::Surface) {
		if let Some(free) = self.awt.FreeDrawingSurface {
			unsafe { free(surface.as_ptr()) };
		}
	}

	fn lock(&self, surface: Self::Surface) -> bool {
		match unsafe { surface.as_ref() }.Lock {
			Some(lock) => (unsafe { lock(surface.as_ptr()) } & JAWT_LOCK_ERROR) == 0,
			None => false,
		}
	}

	fn unlock(&self, surface: Self::Surface) {
		if let Some(unlock) = unsafe { surface.as_ref() }.Unlock {
			unsafe { unlock(surface.as_ptr()) };
		}
	}

	fn info(&self, surface: Self::Surface) -> Option<Self::Info> {
		let get = unsafe { surface.as_ref() }.GetDrawingSurfaceInfo?;
		NonNull::new(unsafe { get(surface.as_ptr()) })
	}

	fn free_info(&self, surface: Self::Surface, info: Self::Info) {
		if let Some(free) = unsafe { surface.as_ref() }.FreeDrawingSurfaceInfo {
			unsafe { free(info.as_ptr()) };
		}
	}

	fn handoff<R>(&self, info: Self::Info, f: impl FnOnce(Drawable) -> R) -> Result<R, SurfaceError> {
		let platform_info = unsafe { info.as_ref() }.platformInfo;
		if platform_info.is_null() {
			return Err(SurfaceError::NullInfo);
		}

		// SAFETY: the surface is locked and `info` is live until the caller frees it.
		unsafe { self.platform.handoff(platform_info, f) }
	}
}
