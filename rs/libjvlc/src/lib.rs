//! Native half of the VLC Java bindings' `org.videolan.jvlc.Video` class.
//!
//! The JVM loads this library with `System.loadLibrary("jvlc")` and resolves
//! the `Java_org_videolan_jvlc_Video__1*` exports by name. Each export reads the
//! libvlc instance from the Java object, forwards to libvlc, and rethrows
//! libvlc errors as Java exceptions.
//!
//! libvlc, JAWT and Xlib are all resolved at runtime, so nothing here links
//! against them directly.

mod api;
mod config;
mod engine;
mod error;
mod ffi;
mod loader;
mod log;
mod surface;
mod video;

#[cfg(test)]
mod mock;

pub use api::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use log::*;
pub use surface::*;
pub use video::*;
