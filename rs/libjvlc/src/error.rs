use std::sync::Arc;

/// Everything that can go wrong in a video call.
///
/// At the JNI boundary each variant becomes a thrown Java exception carrying
/// the [std::fmt::Display] message.
#[derive(Debug, thiserror::Error, Clone)]
#[non_exhaustive]
pub enum Error {
	#[error("no libvlc instance")]
	NoInstance,

	/// No media is currently playing.
	#[error("no active input")]
	NoInput,

	/// libvlc raised an exception.
	#[error(transparent)]
	Engine(#[from] EngineError),

	/// The AWT drawing surface could not be acquired.
	#[error(transparent)]
	Surface(#[from] SurfaceError),

	/// The native window handle does not fit libvlc's drawable type.
	#[error("drawable out of range: {0:#x}")]
	DrawableRange(i64),

	#[error("failed to load {library}: {source}")]
	Load {
		library: String,
		source: Arc<libloading::Error>,
	},

	#[error("jni error: {0}")]
	Jni(Arc<jni::errors::Error>),

	#[error("invalid string")]
	InvalidString,

	#[error("panic")]
	Panic,
}

impl From<jni::errors::Error> for Error {
	fn from(err: jni::errors::Error) -> Self {
		Error::Jni(Arc::new(err))
	}
}

/// The message libvlc left in its exception slot.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
	pub message: String,
}

impl EngineError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// A failed step of the JAWT drawing-surface handshake.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
	#[error("AWT not found")]
	AwtNotFound,

	#[error("null drawing surface")]
	NullSurface,

	#[error("error locking surface")]
	Lock,

	#[error("error getting surface info")]
	NullInfo,

	#[error("drawing surfaces are not supported on this platform")]
	Unsupported,
}
