//! X11 backend for the crosshair overlay
//!
//! Uses x11rb for an override-redirect, full-screen window whose visible and
//! input regions are set through the SHAPE extension. Monitors come from
//! RandR outputs and their CRTCs.

use std::sync::Arc;

use crosshair_core::{Monitor, Rect, Rgb, monitor};
use rustix::net::Shutdown;
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::randr::{self, ConnectionExt as _};
use x11rb::protocol::shape::{self, ConnectionExt as _};
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::{COPY_DEPTH_FROM_PARENT, COPY_FROM_PARENT};

use super::{OverlayBackend, OverlayEvent, PlatformError, request};
use crate::shutdown::CloseHandle;

// ─────────────────────────────────────────────────────────────────────────────
// Monitor Enumeration
// ─────────────────────────────────────────────────────────────────────────────

/// Connected outputs with an active CRTC, sorted into index order
fn enumerate_monitors(
    conn: &RustConnection,
    root: Window,
    screen_width: u32,
    screen_height: u32,
) -> Result<Vec<Monitor>, PlatformError> {
    let resources = conn
        .randr_get_screen_resources(root)
        .map_err(request("query screen resources"))?
        .reply()
        .map_err(request("query screen resources"))?;

    let primary = conn
        .randr_get_output_primary(root)
        .ok()
        .and_then(|cookie| cookie.reply().ok())
        .map(|reply| reply.output)
        .unwrap_or(x11rb::NONE);

    let mut monitors = Vec::with_capacity(resources.outputs.len());
    for &output in &resources.outputs {
        let Some(info) = conn
            .randr_get_output_info(output, resources.config_timestamp)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
        else {
            continue;
        };
        if info.connection != randr::Connection::CONNECTED || info.crtc == x11rb::NONE {
            continue;
        }

        let Some(crtc) = conn
            .randr_get_crtc_info(info.crtc, resources.config_timestamp)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
        else {
            continue;
        };

        let monitor = Monitor {
            name: String::from_utf8_lossy(&info.name).into_owned(),
            x: crtc.x.into(),
            y: crtc.y.into(),
            width: crtc.width.into(),
            height: crtc.height.into(),
            primary: output == primary,
            connected: true,
        };
        if !monitor.is_active() {
            tracing::debug!(output = %monitor.name, "Skipping disabled CRTC");
            continue;
        }
        monitors.push(monitor);
    }

    tracing::debug!(count = monitors.len(), "Enumerated RandR monitors");
    Ok(monitor::arrange(monitors, screen_width, screen_height))
}

/// Open a short-lived connection and list monitors
pub fn list_monitors() -> Result<Vec<Monitor>, PlatformError> {
    let (conn, screen_num) = x11rb::connect(None)?;
    let screen = &conn.setup().roots[screen_num];
    enumerate_monitors(
        &conn,
        screen.root,
        screen.width_in_pixels.into(),
        screen.height_in_pixels.into(),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

fn clamp_i16(v: i32) -> i16 {
    v.clamp(i16::MIN.into(), i16::MAX.into()) as i16
}

fn clamp_u16(v: u32) -> u16 {
    v.min(u16::MAX.into()) as u16
}

fn to_rectangles(rects: &[Rect]) -> Vec<Rectangle> {
    rects
        .iter()
        .map(|r| Rectangle {
            x: clamp_i16(r.x),
            y: clamp_i16(r.y),
            width: clamp_u16(r.width),
            height: clamp_u16(r.height),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// X11 Backend
// ─────────────────────────────────────────────────────────────────────────────

pub struct X11Backend {
    conn: Arc<RustConnection>,
    root: Window,
    width: u32,
    height: u32,
    window: Option<Window>,
    gcs: Vec<Gcontext>,
    close: CloseHandle,
}

impl X11Backend {
    /// Connect to `$DISPLAY` and verify the SHAPE extension
    pub fn connect() -> Result<Self, PlatformError> {
        let (conn, screen_num) = x11rb::connect(None)?;

        conn.shape_query_version()
            .map_err(|_| PlatformError::UnsupportedFeature("SHAPE"))?
            .reply()
            .map_err(|_| PlatformError::UnsupportedFeature("SHAPE"))?;

        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let width = screen.width_in_pixels.into();
        let height = screen.height_in_pixels.into();

        let conn = Arc::new(conn);
        let teardown_conn = Arc::clone(&conn);
        let close = CloseHandle::new(move || {
            // Unblocks wait_for_event in the overlay thread
            if let Err(e) = rustix::net::shutdown(teardown_conn.stream(), Shutdown::Both) {
                tracing::debug!(error = %e, "Socket shutdown failed");
            }
        });

        tracing::debug!(width, height, "Connected to X server");

        Ok(Self {
            conn,
            root,
            width,
            height,
            window: None,
            gcs: Vec::new(),
            close,
        })
    }

    fn window(&self) -> Result<Window, PlatformError> {
        self.window.ok_or(PlatformError::NoWindow)
    }

    fn set_region(&self, kind: shape::SK, rects: &[Rect], what: &'static str) -> Result<(), PlatformError> {
        let window = self.window()?;
        self.conn
            .shape_rectangles(
                shape::SO::SET,
                kind,
                ClipOrdering::UNSORTED,
                window,
                0,
                0,
                &to_rectangles(rects),
            )
            .map_err(request(what))?
            .check()
            .map_err(request(what))
    }
}

impl OverlayBackend for X11Backend {
    type Context = Gcontext;

    fn screen_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn monitors(&self) -> Result<Vec<Monitor>, PlatformError> {
        enumerate_monitors(&self.conn, self.root, self.width, self.height)
    }

    fn create_window(&mut self) -> Result<(), PlatformError> {
        let window = self.conn.generate_id().map_err(request("allocate window id"))?;

        let aux = CreateWindowAux::new()
            .background_pixel(0)
            .override_redirect(1)
            .event_mask(EventMask::EXPOSURE | EventMask::STRUCTURE_NOTIFY);

        self.conn
            .create_window(
                COPY_DEPTH_FROM_PARENT,
                window,
                self.root,
                0,
                0,
                clamp_u16(self.width),
                clamp_u16(self.height),
                0,
                WindowClass::INPUT_OUTPUT,
                COPY_FROM_PARENT,
                &aux,
            )
            .map_err(request("create window"))?
            .check()
            .map_err(request("create window"))?;

        self.window = Some(window);
        Ok(())
    }

    fn create_context(&mut self, color: Rgb) -> Result<Gcontext, PlatformError> {
        let window = self.window()?;
        let gc = self.conn.generate_id().map_err(request("allocate graphics context id"))?;

        self.conn
            .create_gc(gc, window, &CreateGCAux::new().foreground(color.pixel()))
            .map_err(request("create graphics context"))?
            .check()
            .map_err(request("create graphics context"))?;

        self.gcs.push(gc);
        Ok(gc)
    }

    fn set_bounding_region(&mut self, rects: &[Rect]) -> Result<(), PlatformError> {
        self.set_region(shape::SK::BOUNDING, rects, "set bounding region")
    }

    fn set_input_region(&mut self, rects: &[Rect]) -> Result<(), PlatformError> {
        self.set_region(shape::SK::INPUT, rects, "set input region")
    }

    fn map_window(&mut self) -> Result<(), PlatformError> {
        let window = self.window()?;
        self.conn
            .map_window(window)
            .map_err(request("map window"))?
            .check()
            .map_err(request("map window"))
    }

    fn fill_rects(&mut self, context: Gcontext, rects: &[Rect]) -> Result<(), PlatformError> {
        let window = self.window()?;
        self.conn
            .poly_fill_rectangle(window, context, &to_rectangles(rects))
            .map_err(request("fill rectangles"))?;
        self.conn.flush()?;
        Ok(())
    }

    fn wait_for_event(&mut self) -> Result<Option<OverlayEvent>, PlatformError> {
        let event = self.conn.wait_for_event()?;
        let mapped = match event {
            Event::Expose(_) => OverlayEvent::Expose,
            Event::DestroyNotify(e) if Some(e.window) == self.window => return Ok(None),
            Event::ConfigureNotify(_)
            | Event::MapNotify(_)
            | Event::UnmapNotify(_)
            | Event::ReparentNotify(_)
            | Event::GravityNotify(_)
            | Event::CirculateNotify(_) => OverlayEvent::StructureChanged,
            Event::Error(e) => {
                tracing::debug!(error = ?e, "X11 error event");
                OverlayEvent::Other
            }
            _ => OverlayEvent::Other,
        };
        Ok(Some(mapped))
    }

    fn close_handle(&self) -> CloseHandle {
        self.close.clone()
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        if self.close.is_closed() {
            return;
        }
        for &gc in &self.gcs {
            let _ = self.conn.free_gc(gc);
        }
        if let Some(window) = self.window {
            let _ = self.conn.destroy_window(window);
        }
        let _ = self.conn.flush();
    }
}
