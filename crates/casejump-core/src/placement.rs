//! Popup window geometry: default placement and clamping of saved bounds.

use serde::{Deserialize, Serialize};

pub const MIN_WIDTH: i32 = 320;
pub const MIN_HEIGHT: i32 = 240;

/// Usable area of the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayArea {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Right-hand third of the display, full height.
pub fn default_bounds(display: DisplayArea) -> WindowBounds {
    let width = (f64::from(display.width) / 3.0).round() as i32;
    let left = (f64::from(display.width) * 2.0 / 3.0).round() as i32;
    WindowBounds {
        left: left.max(0),
        top: 0,
        width,
        height: display.height,
    }
}

/// Keep saved bounds fully on screen.
pub fn clamp_bounds(saved: WindowBounds, display: DisplayArea) -> WindowBounds {
    let width = saved.width.clamp(MIN_WIDTH.min(display.width), display.width.max(1));
    let height = saved
        .height
        .clamp(MIN_HEIGHT.min(display.height), display.height.max(1));
    WindowBounds {
        left: saved.left.clamp(0, (display.width - width).max(0)),
        top: saved.top.clamp(0, (display.height - height).max(0)),
        width,
        height,
    }
}

/// Bounds for a new popup: the last saved geometry if any, else the default.
pub fn placement(saved: Option<WindowBounds>, display: DisplayArea) -> WindowBounds {
    match saved {
        Some(bounds) => clamp_bounds(bounds, display),
        None => default_bounds(display),
    }
}
