use std::ffi::CStr;

use jni::JNIEnv;
use jni::objects::{JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint};

use crate::{Error, Instance, Libvlc, Video, config, libvlc};

/// Run an entry point, turning an error or a panic into a pending Java exception.
///
/// Returns the value the JVM receives; when an exception is thrown that value is ignored.
pub fn throw_on_error<'local, T, F>(env: &mut JNIEnv<'local>, f: F) -> T::Raw
where
	T: JniReturn,
	F: FnOnce(&mut JNIEnv<'local>) -> Result<T, Error>,
{
	let res = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(env))) {
		Ok(res) => res,
		Err(_) => Err(Error::Panic),
	};

	match res {
		Ok(value) => value.into_raw(),
		Err(err) => {
			throw(env, &err);
			T::fallback()
		}
	}
}

fn throw(env: &mut JNIEnv, err: &Error) {
	// A failed JNI call already raised its own exception; keep that one.
	if env.exception_check().unwrap_or(false) {
		tracing::debug!(%err, "java exception already pending");
		return;
	}

	let message = err.to_string();
	if env.throw_new(config().exception_class(), &message).is_ok() {
		return;
	}

	// The configured class is missing: drop the NoClassDefFoundError and fall back.
	let _ = env.exception_clear();
	if let Err(throw_err) = env.throw_new("java/lang/RuntimeException", &message) {
		tracing::error!(%err, %throw_err, "failed to throw exception");
	}
}

/// A Rust value that can be returned to the JVM.
pub trait JniReturn {
	type Raw;

	fn into_raw(self) -> Self::Raw;

	/// The value returned alongside a thrown exception.
	fn fallback() -> Self::Raw;
}

impl JniReturn for () {
	type Raw = ();

	fn into_raw(self) {}
	fn fallback() {}
}

impl JniReturn for bool {
	type Raw = jboolean;

	fn into_raw(self) -> jboolean {
		if self { JNI_TRUE } else { JNI_FALSE }
	}

	fn fallback() -> jboolean {
		JNI_FALSE
	}
}

impl JniReturn for i32 {
	type Raw = jint;

	fn into_raw(self) -> jint {
		self
	}

	fn fallback() -> jint {
		0
	}
}

/// Read the libvlc instance pointer stored on the Java object.
pub fn instance(env: &mut JNIEnv, this: &JObject) -> Result<Instance, Error> {
	let raw = env.get_field(this, config().instance_field(), "J")?.j()?;
	Instance::from_raw(raw)
}

/// The video controls behind a `Video` object.
pub fn video(env: &mut JNIEnv, this: &JObject) -> Result<Video<'static, Libvlc>, Error> {
	let instance = instance(env, this)?;
	let engine = libvlc()?;
	Ok(Video::new(engine, instance, config().surface_policy()))
}

pub fn parse_bool(value: jboolean) -> bool {
	value != JNI_FALSE
}

/// Borrows the characters of Java strings.
pub trait Strings {
	/// Call `f` with `string` as modified UTF-8, releasing the characters once `f` returns.
	fn with_cstr<R>(&mut self, string: &JString, f: impl FnOnce(&CStr) -> R) -> Result<R, Error>;
}

impl Strings for JNIEnv<'_> {
	fn with_cstr<R>(&mut self, string: &JString, f: impl FnOnce(&CStr) -> R) -> Result<R, Error> {
		// Released by `JavaStr`'s drop.
		let chars = self.get_string(string)?;

		// SAFETY: the JVM hands out a NUL-terminated buffer that lives as long as `chars`.
		let cstr = unsafe { CStr::from_ptr(chars.get_raw()) };
		Ok(f(cstr))
	}
}

/// Call `f` with a borrowed Java string, which must not be null.
pub fn with_str<S: Strings, R>(
	strings: &mut S,
	string: &JString,
	f: impl FnOnce(&CStr) -> Result<R, Error>,
) -> Result<R, Error> {
	if string.is_null() {
		return Err(Error::InvalidString);
	}

	strings.with_cstr(string, f)?
}
