//! Crosshair Overlay Library
//!
//! Click-through crosshair window for X11.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    manager                          │
//! │                 OverlayWindow                       │
//! │     (lifecycle, region shaping, event loop)         │
//! ├─────────────────────────────────────────────────────┤
//! │                    shutdown                         │
//! │                  CloseHandle                        │
//! │        (close-once, usable from any thread)         │
//! ├─────────────────────────────────────────────────────┤
//! │                    platform/                        │
//! │           OverlayBackend trait, x11                 │
//! │        (display server requests and events)         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Geometry comes from `crosshair-core`; this crate only turns rectangles
//! into requests.

pub mod manager;
pub mod platform;
pub mod shutdown;


pub use manager::{OverlayState, OverlayWindow};
pub use platform::x11::{X11Backend, list_monitors};
pub use platform::{OverlayBackend, OverlayEvent, PlatformError};
pub use shutdown::CloseHandle;

use crosshair_core::CrosshairSpec;
use crosshair_types::PositionSettings;

/// Connect to the X server and prepare an overlay for `spec`
pub fn connect(
    spec: CrosshairSpec,
    position: PositionSettings,
) -> Result<OverlayWindow<X11Backend>, PlatformError> {
    let backend = X11Backend::connect()?;
    Ok(OverlayWindow::new(backend, spec, position))
}
