//! Crosshair core
//!
//! Display-independent logic: shape rasterization into rectangles, monitor
//! ordering and selection, config persistence and the setup wizard state
//! machine.

pub mod config;
pub mod geometry;
pub mod monitor;
pub mod shapes;
pub mod wizard;

pub use config::{ConfigError, ValidationError};
pub use geometry::{CenterPoint, Rect};
pub use monitor::{Monitor, PRIMARY_MONITOR};
pub use shapes::{CrosshairSpec, generate, outline};

pub use crosshair_types::{Config, Rgb, Shape};
