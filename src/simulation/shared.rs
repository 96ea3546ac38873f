use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::error::{EngineError, Result};

use super::Sandbox;

/// Sandbox handle for hosts that drive the loop from one thread and edit
/// shapes from another. One lock covers bodies and springs together, so a UI
/// edit can never land between a step and the render that follows it.
#[derive(Clone)]
pub struct SharedSandbox {
    inner: Arc<Mutex<Sandbox>>,
}

impl SharedSandbox {
    pub fn new(sandbox: Sandbox) -> Self {
        Self { inner: Arc::new(Mutex::new(sandbox)) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Sandbox>> {
        self.inner.lock().map_err(|_| EngineError::LockPoisoned)
    }

    /// Run `f` with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut Sandbox) -> R) -> Result<R> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// One full frame under a single lock: tick, refill render buffers, hand
    /// the sandbox to `render`.
    pub fn frame<R>(&self, render: impl FnOnce(&Sandbox) -> R) -> Result<R> {
        let mut guard = self.lock()?;
        guard.tick()?;
        guard.extract_render();
        Ok(render(&guard))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::domain::ShapeKind;

    #[test]
    fn edits_from_another_thread_are_seen_by_the_next_frame() {
        let shared = SharedSandbox::new(Sandbox::new(800.0, 600.0).unwrap());
        let editor = shared.clone();

        thread::spawn(move || {
            editor.with(|s| s.spawn(ShapeKind::Square, 100.0, 100.0)).unwrap().unwrap();
        })
        .join()
        .unwrap();

        let drawn = shared.frame(|s| s.render_shapes().len()).unwrap();
        assert_eq!(drawn, super::super::RENDER_STRIDE);
        assert_eq!(shared.with(|s| s.frame()).unwrap(), 1);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let shared = SharedSandbox::new(Sandbox::new(800.0, 600.0).unwrap());
        let victim = shared.clone();
        let _ = thread::spawn(move || {
            victim.with(|_| panic!("render thread died")).ok();
        })
        .join();

        assert!(matches!(shared.with(|s| s.body_count()), Err(EngineError::LockPoisoned)));
    }
}
