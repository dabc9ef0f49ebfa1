//! Monitor ordering and selection
//!
//! Enumeration itself talks to the display server and lives in the overlay
//! crate. Everything that decides *which* monitor to use lives here so it can
//! be tested without a display.

use std::fmt::{self, Write as _};

use crate::geometry::{CenterPoint, signed};

/// Index value that selects the primary monitor
pub const PRIMARY_MONITOR: i32 = -1;

/// Size of the synthetic monitor used when no monitor list is available
const FALLBACK_WIDTH: u32 = 1920;
const FALLBACK_HEIGHT: u32 = 1080;

/// A connected display output and its geometry in root-window coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub primary: bool,
    pub connected: bool,
}

impl Monitor {
    /// Synthetic monitor covering the whole default screen
    pub fn screen(width: u32, height: u32) -> Self {
        Self {
            name: "default".to_string(),
            x: 0,
            y: 0,
            width,
            height,
            primary: true,
            connected: true,
        }
    }

    /// Connected with a non-empty mode. A CRTC can stay assigned to an
    /// output while disabled, reporting a 0x0 size.
    pub fn is_active(&self) -> bool {
        self.connected && self.width > 0 && self.height > 0
    }

    pub fn center_x(&self) -> i32 {
        self.x.saturating_add(signed(self.width / 2))
    }

    pub fn center_y(&self) -> i32 {
        self.y.saturating_add(signed(self.height / 2))
    }

    pub fn center(&self) -> CenterPoint {
        CenterPoint::new(self.center_x(), self.center_y())
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}x{}+{}+{}",
            self.name, self.width, self.height, self.x, self.y
        )?;
        if self.primary {
            f.write_str(" (primary)")?;
        }
        Ok(())
    }
}

/// Put enumerated monitors into index order (left to right, then top to
/// bottom), dropping inactive ones. An empty result becomes a single monitor
/// covering the screen.
pub fn arrange(mut monitors: Vec<Monitor>, screen_width: u32, screen_height: u32) -> Vec<Monitor> {
    monitors.retain(Monitor::is_active);
    monitors.sort_by_key(|m| (m.x, m.y));
    if monitors.is_empty() {
        monitors.push(Monitor::screen(screen_width, screen_height));
    }
    monitors
}

/// Resolve a configured monitor index.
///
/// `-1` picks the primary monitor (or the first one if none is flagged).
/// Indices outside the list fall back to the first monitor.
pub fn select(monitors: &[Monitor], index: i32) -> Monitor {
    let Some(first) = monitors.first() else {
        return Monitor {
            name: String::new(),
            x: 0,
            y: 0,
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
            primary: false,
            connected: true,
        };
    };

    if index == PRIMARY_MONITOR {
        return monitors.iter().find(|m| m.primary).unwrap_or(first).clone();
    }

    usize::try_from(index)
        .ok()
        .and_then(|i| monitors.get(i))
        .unwrap_or(first)
        .clone()
}

/// Human-readable monitor list for `--list-monitors`
pub fn format_monitor_list(monitors: &[Monitor]) -> String {
    let mut out = String::from("Available monitors:\n\n");
    for (i, m) in monitors.iter().enumerate() {
        let primary = if m.primary { " ← primary" } else { "" };
        let _ = writeln!(
            out,
            "  [{i}] {}: {}x{} at ({}, {}){primary}",
            m.name, m.width, m.height, m.x, m.y
        );
    }
    out.push('\n');
    out.push_str("Use 'monitor = N' in config to select a monitor by index.\n");
    out.push_str("Use 'monitor = -1' to automatically select the primary monitor.\n");
    out
}
