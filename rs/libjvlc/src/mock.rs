//! Recording fakes of the engine and of AWT, for tests.

use std::cell::{Cell, RefCell};
use std::ffi::CStr;
use std::rc::Rc;

use jni::objects::JString;

use crate::ffi::Strings;
use crate::{Drawable, DrawingSurfaces, Engine, EngineError, Error, Instance, SurfaceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Input,
	ToggleFullscreen,
	SetFullscreen(bool),
	Fullscreen,
	Height,
	Width,
	TakeSnapshot(String),
	Destroy,
	SetParent(Drawable),
	Resize(i32, i32),
}

#[derive(Default)]
pub struct MockEngine {
	pub no_input: bool,
	pub fail: Option<String>,

	pub(crate) calls: RefCell<Vec<Call>>,
	pub(crate) fullscreen: Cell<bool>,
	pub(crate) size: Cell<(i32, i32)>,
	pub(crate) freed: Rc<Cell<usize>>,
}

pub struct MockInput {
	freed: Rc<Cell<usize>>,
}

impl Drop for MockInput {
	fn drop(&mut self) {
		self.freed.set(self.freed.get() + 1);
	}
}

impl MockEngine {
	pub fn calls(&self) -> Vec<Call> {
		self.calls.borrow().clone()
	}

	pub fn inputs_freed(&self) -> usize {
		self.freed.get()
	}

	fn call(&self, call: Call) -> Result<(), Error> {
		self.calls.borrow_mut().push(call);
		match &self.fail {
			Some(message) => Err(EngineError::new(message.clone()).into()),
			None => Ok(()),
		}
	}
}

impl Engine for MockEngine {
	type Input = MockInput;

	fn input(&self, _instance: Instance) -> Result<MockInput, Error> {
		self.calls.borrow_mut().push(Call::Input);
		if self.no_input {
			return Err(Error::NoInput);
		}

		Ok(MockInput {
			freed: self.freed.clone(),
		})
	}

	fn toggle_fullscreen(&self, _input: &MockInput) -> Result<(), Error> {
		self.call(Call::ToggleFullscreen)?;
		self.fullscreen.set(!self.fullscreen.get());
		Ok(())
	}

	fn set_fullscreen(&self, _input: &MockInput, fullscreen: bool) -> Result<(), Error> {
		self.call(Call::SetFullscreen(fullscreen))?;
		self.fullscreen.set(fullscreen);
		Ok(())
	}

	fn fullscreen(&self, _input: &MockInput) -> Result<bool, Error> {
		self.call(Call::Fullscreen)?;
		Ok(self.fullscreen.get())
	}

	fn height(&self, _input: &MockInput) -> Result<i32, Error> {
		self.call(Call::Height)?;
		Ok(self.size.get().1)
	}

	fn width(&self, _input: &MockInput) -> Result<i32, Error> {
		self.call(Call::Width)?;
		Ok(self.size.get().0)
	}

	fn take_snapshot(&self, _input: &MockInput, path: &CStr) -> Result<(), Error> {
		self.call(Call::TakeSnapshot(path.to_string_lossy().into_owned()))
	}

	fn destroy(&self, _input: &MockInput) -> Result<(), Error> {
		self.call(Call::Destroy)
	}

	fn set_parent(&self, _instance: Instance, drawable: Drawable) -> Result<(), Error> {
		self.call(Call::SetParent(drawable))
	}

	fn resize(&self, _input: &MockInput, width: i32, height: i32) -> Result<(), Error> {
		self.call(Call::Resize(width, height))?;
		self.size.set((width, height));
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
	GetSurface,
	FreeSurface,
	Lock,
	Unlock,
	GetInfo,
	FreeInfo,
	Handoff,
}

/// A canvas whose handshake can fail at any step.
#[derive(Default, Clone)]
pub struct MockSurfaces {
	pub null_surface: bool,
	pub lock_error: bool,
	pub null_info: bool,

	pub(crate) events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl MockSurfaces {
	pub const DRAWABLE: Drawable = Drawable(0x3a00007);

	pub fn events(&self) -> Vec<SurfaceEvent> {
		self.events.borrow().clone()
	}

	fn record(&self, event: SurfaceEvent) {
		self.events.borrow_mut().push(event);
	}
}

impl DrawingSurfaces for MockSurfaces {
	type Canvas = ();
	type Surface = ();
	type Info = ();

	fn surface(&self, _canvas: ()) -> Option<()> {
		self.record(SurfaceEvent::GetSurface);
		(!self.null_surface).then_some(())
	}

	fn free_surface(&self, _surface: ()) {
		self.record(SurfaceEvent::FreeSurface);
	}

	fn lock(&self, _surface: ()) -> bool {
		self.record(SurfaceEvent::Lock);
		!self.lock_error
	}

	fn unlock(&self, _surface: ()) {
		self.record(SurfaceEvent::Unlock);
	}

	fn info(&self, _surface: ()) -> Option<()> {
		self.record(SurfaceEvent::GetInfo);
		(!self.null_info).then_some(())
	}

	fn free_info(&self, _surface: (), _info: ()) {
		self.record(SurfaceEvent::FreeInfo);
	}

	fn handoff<R>(&self, _info: (), f: impl FnOnce(Drawable) -> R) -> Result<R, SurfaceError> {
		self.record(SurfaceEvent::Handoff);
		Ok(f(Self::DRAWABLE))
	}
}

/// Java strings whose character views are counted.
#[derive(Default)]
pub struct MockStrings {
	pub fail: bool,

	pub(crate) views: usize,
	pub(crate) released: Rc<Cell<usize>>,
}

struct MockChars(Rc<Cell<usize>>);

impl Drop for MockChars {
	fn drop(&mut self) {
		self.0.set(self.0.get() + 1);
	}
}

impl MockStrings {
	pub const CHARS: &'static CStr = c"/tmp/shot.png";

	pub fn views(&self) -> usize {
		self.views
	}

	pub fn released(&self) -> usize {
		self.released.get()
	}
}

impl Strings for MockStrings {
	fn with_cstr<R>(&mut self, _string: &JString, f: impl FnOnce(&CStr) -> R) -> Result<R, Error> {
		if self.fail {
			return Err(jni::errors::Error::NullPtr("GetStringUTFChars").into());
		}

		self.views += 1;
		let _chars = MockChars(self.released.clone());
		Ok(f(Self::CHARS))
	}
}
