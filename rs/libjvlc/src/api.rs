//! The JNI exports, named after the native methods of `org.videolan.jvlc.Video`.
//!
//! On failure each export throws (by default `org.videolan.jvlc.VLCException`)
//! and returns zero or false.

#![allow(non_snake_case)]

use std::ffi::c_void;

use jni::JNIEnv;
use jni::objects::{JObject, JString};
use jni::sys::{JNI_VERSION_1_4, JavaVM, jboolean, jint};

use crate::{Jawt, config, ffi};

/// Called by the JVM when the library is loaded.
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(_vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
	let config = config();
	config.log.init();
	tracing::debug!(?config, "loaded");

	JNI_VERSION_1_4
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1toggleFullscreen<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
) {
	ffi::throw_on_error(&mut env, |env| ffi::video(env, &this)?.toggle_fullscreen())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1setFullscreen<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
	value: jboolean,
) {
	ffi::throw_on_error(&mut env, |env| {
		ffi::video(env, &this)?.set_fullscreen(ffi::parse_bool(value))
	})
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1getFullscreen<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
) -> jboolean {
	ffi::throw_on_error(&mut env, |env| ffi::video(env, &this)?.fullscreen())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1getHeight<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
) -> jint {
	ffi::throw_on_error(&mut env, |env| ffi::video(env, &this)?.height())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1getWidth<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
) -> jint {
	ffi::throw_on_error(&mut env, |env| ffi::video(env, &this)?.width())
}

/// Save the current frame to `filepath`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1getSnapshot<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
	filepath: JString<'local>,
) {
	ffi::throw_on_error(&mut env, |env| {
		let video = ffi::video(env, &this)?;
		ffi::with_str(env, &filepath, |path| video.snapshot(path))
	})
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1destroyVideo<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
) {
	ffi::throw_on_error(&mut env, |env| ffi::video(env, &this)?.destroy())
}

/// Render into `canvas`, a displayable `java.awt.Canvas`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1reparent<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
	canvas: JObject<'local>,
) {
	ffi::throw_on_error(&mut env, |env| {
		let video = ffi::video(env, &this)?;
		let raw = env.get_raw();

		// SAFETY: `raw` is this thread's environment and outlives the call.
		video.reparent(|| unsafe { Jawt::get(raw) }, canvas.as_raw())
	})
}

/// Called from `Canvas.paint`; the `Graphics` is not needed to hand the window to libvlc.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1paint<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
	canvas: JObject<'local>,
	_graphics: JObject<'local>,
) {
	ffi::throw_on_error(&mut env, |env| {
		let video = ffi::video(env, &this)?;
		let raw = env.get_raw();

		// SAFETY: `raw` is this thread's environment and outlives the call.
		video.paint(|| unsafe { Jawt::get(raw) }, canvas.as_raw())
	})
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_videolan_jvlc_Video__1setSize<'local>(
	mut env: JNIEnv<'local>,
	this: JObject<'local>,
	width: jint,
	height: jint,
) {
	ffi::throw_on_error(&mut env, |env| ffi::video(env, &this)?.set_size(width, height))
}
