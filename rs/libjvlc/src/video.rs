use std::ffi::CStr;

use crate::{DrawingSurfaces, Engine, Error, Instance, SurfaceError, surface};

/// What to do when the AWT drawing surface can't be acquired.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePolicy {
	/// Log a warning and return without touching the engine.
	#[default]
	Warn,

	/// Report the failure like any other error.
	Throw,
}

/// The video controls of one libvlc instance.
///
/// Every method looks up the active input first, so nothing reaches the
/// engine while no media is playing.
pub struct Video<'a, E: Engine> {
	engine: &'a E,
	instance: Instance,
	policy: SurfacePolicy,
}

impl<'a, E: Engine> Video<'a, E> {
	pub fn new(engine: &'a E, instance: Instance, policy: SurfacePolicy) -> Self {
		Self {
			engine,
			instance,
			policy,
		}
	}

	fn input(&self) -> Result<E::Input, Error> {
		self.engine.input(self.instance)
	}

	pub fn toggle_fullscreen(&self) -> Result<(), Error> {
		let input = self.input()?;
		self.engine.toggle_fullscreen(&input)
	}

	pub fn set_fullscreen(&self, fullscreen: bool) -> Result<(), Error> {
		let input = self.input()?;
		self.engine.set_fullscreen(&input, fullscreen)
	}

	pub fn fullscreen(&self) -> Result<bool, Error> {
		let input = self.input()?;
		self.engine.fullscreen(&input)
	}

	pub fn height(&self) -> Result<i32, Error> {
		let input = self.input()?;
		self.engine.height(&input)
	}

	pub fn width(&self) -> Result<i32, Error> {
		let input = self.input()?;
		self.engine.width(&input)
	}

	pub fn snapshot(&self, path: &CStr) -> Result<(), Error> {
		let input = self.input()?;
		self.engine.take_snapshot(&input, path)
	}

	pub fn destroy(&self) -> Result<(), Error> {
		let input = self.input()?;
		self.engine.destroy(&input)
	}

	pub fn set_size(&self, width: i32, height: i32) -> Result<(), Error> {
		let input = self.input()?;
		self.engine.resize(&input, width, height)
	}

	/// Make the engine render into `canvas`.
	///
	/// `awt` runs only once there is an active input. The canvas' surface stays
	/// locked until the engine call returns.
	pub fn reparent<S, A>(&self, awt: A, canvas: S::Canvas) -> Result<(), Error>
	where
		S: DrawingSurfaces,
		A: FnOnce() -> Result<S, SurfaceError>,
	{
		let _input = self.input()?;

		let res = awt().and_then(|surfaces| {
			surface::with_drawable(&surfaces, canvas, |drawable| {
				tracing::debug!(?drawable, "set parent");
				self.engine.set_parent(self.instance, drawable)
			})
		});

		match res {
			Ok(res) => res,
			Err(err) => self.surface_failed(err),
		}
	}

	/// Repaint `canvas`, which is the same handoff as [Self::reparent].
	pub fn paint<S, A>(&self, awt: A, canvas: S::Canvas) -> Result<(), Error>
	where
		S: DrawingSurfaces,
		A: FnOnce() -> Result<S, SurfaceError>,
	{
		self.reparent(awt, canvas)
	}

	fn surface_failed(&self, err: SurfaceError) -> Result<(), Error> {
		match self.policy {
			SurfacePolicy::Warn => {
				tracing::warn!(%err, "video not reparented");
				Ok(())
			}
			SurfacePolicy::Throw => Err(err.into()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mock::{Call, MockEngine, MockSurfaces, SurfaceEvent::*};
	use tracing_test::traced_test;

	fn instance() -> Instance {
		Instance::from_raw(0x1000).unwrap()
	}

	#[test]
	fn no_input_means_no_engine_calls() {
		let engine = MockEngine {
			no_input: true,
			..Default::default()
		};
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		assert!(matches!(video.toggle_fullscreen(), Err(Error::NoInput)));
		assert!(matches!(video.set_fullscreen(true), Err(Error::NoInput)));
		assert!(matches!(video.fullscreen(), Err(Error::NoInput)));
		assert!(matches!(video.height(), Err(Error::NoInput)));
		assert!(matches!(video.width(), Err(Error::NoInput)));
		assert!(matches!(video.snapshot(c"/tmp/a.png"), Err(Error::NoInput)));
		assert!(matches!(video.destroy(), Err(Error::NoInput)));
		assert!(matches!(video.set_size(1, 1), Err(Error::NoInput)));

		// The surface is never touched either.
		let surfaces = MockSurfaces::default();
		let res = video.reparent(|| Ok(surfaces.clone()), ());
		assert!(matches!(res, Err(Error::NoInput)));
		assert!(surfaces.events().is_empty());

		assert!(engine.calls().iter().all(|call| *call == Call::Input));
		assert_eq!(engine.inputs_freed(), 0);
	}

	#[test]
	fn fullscreen_round_trip() {
		let engine = MockEngine::default();
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		video.set_fullscreen(true).unwrap();
		assert!(video.fullscreen().unwrap());

		video.set_fullscreen(false).unwrap();
		assert!(!video.fullscreen().unwrap());

		video.toggle_fullscreen().unwrap();
		assert!(video.fullscreen().unwrap());
	}

	#[test]
	fn set_size_resizes_once() {
		let engine = MockEngine::default();
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		video.set_size(640, 480).unwrap();
		assert_eq!(engine.calls(), [Call::Input, Call::Resize(640, 480)]);

		assert_eq!(video.width().unwrap(), 640);
		assert_eq!(video.height().unwrap(), 480);
	}

	#[test]
	fn input_freed_after_each_call() {
		let engine = MockEngine::default();
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		video.destroy().unwrap();
		video.width().unwrap();
		assert_eq!(engine.inputs_freed(), 2);
	}

	#[test]
	fn engine_error_propagates() {
		let engine = MockEngine {
			fail: Some("No active video output".into()),
			..Default::default()
		};
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		let err = video.snapshot(c"/tmp/shot.png").unwrap_err();
		assert_eq!(err.to_string(), "No active video output");
		assert_eq!(
			engine.calls(),
			[Call::Input, Call::TakeSnapshot("/tmp/shot.png".into())]
		);
		assert_eq!(engine.inputs_freed(), 1);
	}

	#[test]
	fn reparent_hands_drawable_to_engine() {
		let engine = MockEngine::default();
		let surfaces = MockSurfaces::default();
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		video.reparent(|| Ok(surfaces.clone()), ()).unwrap();

		assert_eq!(
			engine.calls(),
			[Call::Input, Call::SetParent(MockSurfaces::DRAWABLE)]
		);
		assert_eq!(
			surfaces.events(),
			[GetSurface, Lock, GetInfo, Handoff, FreeInfo, Unlock, FreeSurface]
		);
	}

	#[test]
	fn reparent_engine_error_still_unlocks() {
		let engine = MockEngine {
			fail: Some("vout failed".into()),
			..Default::default()
		};
		let surfaces = MockSurfaces::default();
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		let err = video.reparent(|| Ok(surfaces.clone()), ()).unwrap_err();
		assert!(matches!(err, Error::Engine(_)));
		assert_eq!(
			surfaces.events(),
			[GetSurface, Lock, GetInfo, Handoff, FreeInfo, Unlock, FreeSurface]
		);
	}

	#[test]
	#[traced_test]
	fn missing_awt_only_warns() {
		let engine = MockEngine::default();
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		video
			.reparent::<MockSurfaces, _>(|| Err(SurfaceError::AwtNotFound), ())
			.unwrap();

		assert_eq!(engine.calls(), [Call::Input]);
		assert!(logs_contain("AWT not found"));
	}

	#[test]
	fn missing_awt_throws_when_strict() {
		let engine = MockEngine::default();
		let video = Video::new(&engine, instance(), SurfacePolicy::Throw);

		let err = video
			.reparent::<MockSurfaces, _>(|| Err(SurfaceError::AwtNotFound), ())
			.unwrap_err();

		assert!(matches!(err, Error::Surface(SurfaceError::AwtNotFound)));
		assert_eq!(engine.calls(), [Call::Input]);
	}

	#[test]
	#[traced_test]
	fn lock_error_skips_engine() {
		let engine = MockEngine::default();
		let surfaces = MockSurfaces {
			lock_error: true,
			..Default::default()
		};
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		video.reparent(|| Ok(surfaces.clone()), ()).unwrap();

		assert_eq!(engine.calls(), [Call::Input]);
		assert_eq!(surfaces.events(), [GetSurface, Lock, FreeSurface]);
		assert!(logs_contain("error locking surface"));
	}

	#[test]
	fn paint_matches_reparent() {
		let engine = MockEngine::default();
		let surfaces = MockSurfaces::default();
		let video = Video::new(&engine, instance(), SurfacePolicy::Warn);

		video.paint(|| Ok(surfaces.clone()), ()).unwrap();

		assert_eq!(
			engine.calls(),
			[Call::Input, Call::SetParent(MockSurfaces::DRAWABLE)]
		);
		assert_eq!(
			surfaces.events(),
			[GetSurface, Lock, GetInfo, Handoff, FreeInfo, Unlock, FreeSurface]
		);
	}
}
