//! Platform abstraction for the overlay window
//!
//! This module defines the trait a display-server backend must implement so
//! that the window lifecycle in [`crate::manager`] stays independent of the
//! wire protocol.

pub mod x11;

use crosshair_core::{Monitor, Rect, Rgb};
use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyOrIdError};

use crate::shutdown::CloseHandle;

/// Events the overlay reacts to (or deliberately ignores)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Part of the window needs repainting
    Expose,
    /// Size, position or stacking changed
    StructureChanged,
    /// Anything else the server sends
    Other,
}

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to connect to X server")]
    ConnectionFailed(#[from] ConnectError),

    #[error("{0} extension unavailable")]
    UnsupportedFeature(&'static str),

    #[error("failed to {what}")]
    Request {
        what: &'static str,
        #[source]
        source: ReplyOrIdError,
    },

    #[error("overlay window has not been created")]
    NoWindow,

    #[error("X11 connection error")]
    Connection(#[from] ConnectionError),
}

/// Map a failed request into [`PlatformError::Request`]
pub(crate) fn request<E: Into<ReplyOrIdError>>(what: &'static str) -> impl FnOnce(E) -> PlatformError {
    move |e| PlatformError::Request {
        what,
        source: e.into(),
    }
}

/// Trait that display-server backends must implement.
///
/// Methods are called in lifecycle order by
/// [`OverlayWindow`](crate::manager::OverlayWindow); a backend only has to
/// support one window.
pub trait OverlayBackend {
    /// Handle to a paint color (a graphics context on X11)
    type Context: Copy + std::fmt::Debug;

    /// Size of the default screen in pixels
    fn screen_size(&self) -> (u32, u32);

    /// Connected monitors, already in index order
    fn monitors(&self) -> Result<Vec<Monitor>, PlatformError>;

    /// Create the full-screen, unmanaged, unmapped overlay window
    fn create_window(&mut self) -> Result<(), PlatformError>;

    /// Create a paint context with the given foreground color
    fn create_context(&mut self, color: Rgb) -> Result<Self::Context, PlatformError>;

    /// Replace the visible region of the window
    fn set_bounding_region(&mut self, rects: &[Rect]) -> Result<(), PlatformError>;

    /// Replace the pointer-input region of the window
    fn set_input_region(&mut self, rects: &[Rect]) -> Result<(), PlatformError>;

    fn map_window(&mut self) -> Result<(), PlatformError>;

    fn fill_rects(&mut self, context: Self::Context, rects: &[Rect]) -> Result<(), PlatformError>;

    /// Block until the next event. `Ok(None)` means the stream ended.
    fn wait_for_event(&mut self) -> Result<Option<OverlayEvent>, PlatformError>;

    /// Handle that tears the connection down from any thread
    fn close_handle(&self) -> CloseHandle;
}
