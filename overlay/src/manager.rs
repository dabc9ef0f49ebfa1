//! Overlay window lifecycle
//!
//! [`OverlayWindow`] owns a backend and walks it through window creation,
//! region shaping, mapping and the blocking event loop. The window never
//! moves or resizes; the crosshair rectangles are regenerated from the spec
//! and centre whenever they are needed.

use crosshair_core::{CenterPoint, CrosshairSpec, Monitor, Rect, monitor};
use crosshair_types::PositionSettings;

use crate::platform::{OverlayBackend, OverlayEvent, PlatformError};
use crate::shutdown::CloseHandle;

/// Lifecycle states, strictly forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OverlayState {
    Disconnected,
    Connected,
    WindowCreated,
    RegionApplied,
    Mapped,
    Running,
    Closed,
}

/// A crosshair overlay bound to one backend
pub struct OverlayWindow<B: OverlayBackend> {
    backend: B,
    spec: CrosshairSpec,
    monitor: Monitor,
    center: CenterPoint,
    main_context: Option<B::Context>,
    outline_context: Option<B::Context>,
    state: OverlayState,
    close: CloseHandle,
}

impl<B: OverlayBackend> OverlayWindow<B> {
    /// Resolve the target monitor and crosshair geometry for a connected
    /// backend. Monitor enumeration failures fall back to the whole screen.
    pub fn new(backend: B, spec: CrosshairSpec, position: PositionSettings) -> Self {
        let (screen_width, screen_height) = backend.screen_size();
        let monitors = match backend.monitors() {
            Ok(monitors) => monitors,
            Err(e) => {
                tracing::warn!(error = %e, "Monitor enumeration failed, using full screen");
                vec![Monitor::screen(screen_width, screen_height)]
            }
        };

        let monitor = monitor::select(&monitors, position.monitor);
        let center = monitor
            .center()
            .offset(position.offset_x, position.offset_y);
        let close = backend.close_handle();

        tracing::debug!(
            monitor = %monitor.name,
            shape = %spec.shape,
            x = center.x,
            y = center.y,
            "Crosshair position resolved"
        );

        Self {
            backend,
            spec,
            monitor,
            center,
            main_context: None,
            outline_context: None,
            state: OverlayState::Connected,
            close,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn center(&self) -> CenterPoint {
        self.center
    }

    /// Shape rects and the outline rects around them
    fn layers(&self) -> (Vec<Rect>, Vec<Rect>) {
        let shape = self.spec.shape_layer(self.center);
        let outline = self.spec.outline_layer(&shape);
        (shape, outline)
    }

    /// Handle for closing the overlay from another thread
    pub fn close_handle(&self) -> CloseHandle {
        self.close.clone()
    }

    /// Show the crosshair and block until the connection ends or is closed
    pub fn run(&mut self) -> Result<(), PlatformError> {
        let result = self.show().and_then(|()| self.event_loop());
        let result = match result {
            Err(e) if self.close.is_closed() => {
                tracing::debug!(error = %e, "Connection ended after close");
                Ok(())
            }
            other => other,
        };
        self.close();
        result
    }

    /// Release the connection. Safe to call more than once.
    pub fn close(&mut self) {
        if self.close.close() {
            tracing::debug!("Overlay closed");
        }
        self.state = OverlayState::Closed;
    }

    fn show(&mut self) -> Result<(), PlatformError> {
        self.backend.create_window()?;
        self.main_context = Some(self.backend.create_context(self.spec.color)?);
        if self.spec.has_outline() {
            self.outline_context = Some(self.backend.create_context(self.spec.outline_color)?);
        }
        self.state = OverlayState::WindowCreated;

        let (shape, mut bounding) = self.layers();
        tracing::debug!(
            rects = shape.len(),
            outline_rects = bounding.len(),
            "Applying bounding region"
        );
        bounding.extend(shape);
        self.backend.set_bounding_region(&bounding)?;
        self.backend.set_input_region(&[])?;
        self.state = OverlayState::RegionApplied;

        self.backend.map_window()?;
        self.paint()?;
        self.state = OverlayState::Mapped;

        tracing::info!(
            "Crosshair overlay running on monitor {:?} at ({}, {})",
            self.monitor.name,
            self.center.x,
            self.center.y
        );
        Ok(())
    }

    fn event_loop(&mut self) -> Result<(), PlatformError> {
        self.state = OverlayState::Running;
        loop {
            if self.close.is_closed() {
                return Ok(());
            }
            match self.backend.wait_for_event()? {
                None => return Ok(()),
                Some(OverlayEvent::Expose) => {
                    if let Err(e) = self.paint() {
                        tracing::warn!(error = %e, "Repaint failed");
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Outline first so the shape is drawn on top of it
    fn paint(&mut self) -> Result<(), PlatformError> {
        let (shape, outline) = self.layers();
        if let Some(ctx) = self.outline_context
            && !outline.is_empty()
        {
            self.backend.fill_rects(ctx, &outline)?;
        }
        let ctx = self.main_context.ok_or(PlatformError::NoWindow)?;
        self.backend.fill_rects(ctx, &shape)
    }
}
