//! Close-once guard shared between the event loop and signal handlers

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

struct Inner {
    closed: AtomicBool,
    teardown: Box<dyn Fn() + Send + Sync>,
}

/// Cloneable handle that releases a display connection exactly once.
///
/// The teardown must make a blocked event wait return (by error or end of
/// stream). Once [`close`](Self::close) has run, the event loop treats any
/// connection failure as a normal shutdown.
#[derive(Clone)]
pub struct CloseHandle {
    inner: Arc<Inner>,
}

impl CloseHandle {
    pub fn new(teardown: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                closed: AtomicBool::new(false),
                teardown: Box::new(teardown),
            }),
        }
    }

    /// Run the teardown if nobody has yet. Returns `true` for the caller that
    /// actually closed.
    pub fn close(&self) -> bool {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        (self.inner.teardown)();
        true
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for CloseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseHandle")
            .field("closed", &self.is_closed())
            .finish()
    }
}
