//! Destination rectangles for moves between monitors and half-screen splits.
//!
//! Everything here is pure arithmetic over snapshots; applying the result
//! (and the maximize/restore sequencing around it) is the placement
//! engine's job.

use super::geometry::{Direction, WindowRect};
use super::monitor::Monitor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a window's size carries over to a monitor of different resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizingMode {
    /// Keep the exact pixel size and pixel offset from the monitor origin
    #[serde(rename = "pixel")]
    PixelBased,
    /// Keep size and offset as fractions of the monitor dimensions
    #[default]
    #[serde(rename = "percentage")]
    PercentageBased,
}

impl fmt::Display for SizingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingMode::PixelBased => write!(f, "pixel"),
            SizingMode::PercentageBased => write!(f, "percentage"),
        }
    }
}

/// Where `window` should land on `target` when leaving `source`.
pub fn plan_move(window: &WindowRect, source: &Monitor, target: &Monitor, mode: SizingMode) -> WindowRect {
    let relative_x = window.left - source.bounds.left;
    let relative_y = window.top - source.bounds.top;

    match mode {
        SizingMode::PixelBased => WindowRect::from_origin_size(
            target.bounds.left + relative_x,
            target.bounds.top + relative_y,
            window.width(),
            window.height(),
        ),
        SizingMode::PercentageBased => {
            let source_width = source.width() as f64;
            let source_height = source.height() as f64;
            let target_width = target.width() as f64;
            let target_height = target.height() as f64;

            let width = (window.width() as f64 / source_width * target_width) as i32;
            let height = (window.height() as f64 / source_height * target_height) as i32;
            let x = target.bounds.left + (relative_x as f64 / source_width * target_width) as i32;
            let y = target.bounds.top + (relative_y as f64 / source_height * target_height) as i32;

            WindowRect::from_origin_size(x, y, width, height)
        }
    }
}

/// How far each window edge reaches outward past the matching monitor edge.
///
/// Maximized windows report a rectangle slightly larger than the monitor
/// because of their invisible resize borders, so these are usually small
/// positive numbers on the left, right and top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeOverhang {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl EdgeOverhang {
    pub fn measure(window: &WindowRect, bounds: &WindowRect) -> Self {
        Self {
            left: bounds.left - window.left,
            top: bounds.top - window.top,
            right: window.right - bounds.right,
            bottom: window.bottom - bounds.bottom,
        }
    }
}

/// Half of `monitor` on the `direction` side, anchored at the window's
/// measured edges so the visible part covers exactly half the screen.
///
/// `window` should be the rectangle of the window while maximized on
/// `monitor`; its overhang is what gets compensated.
pub fn plan_split(window: &WindowRect, monitor: &Monitor, direction: Direction) -> WindowRect {
    let bounds = &monitor.bounds;
    let overhang = EdgeOverhang::measure(window, bounds);
    let half_width = bounds.width() / 2;
    let half_height = bounds.height() / 2;

    match direction {
        Direction::Left => WindowRect::new(
            window.left,
            window.top,
            window.left + half_width + 2 * overhang.left,
            window.bottom,
        ),
        Direction::Right => WindowRect::new(
            window.right - half_width - 2 * overhang.right,
            window.top,
            window.right,
            window.bottom,
        ),
        // Vertical splits only have the top border to go by: the bottom of a
        // maximized window sits on the work area, not on the monitor edge.
        Direction::Up => WindowRect::new(
            window.left,
            window.top,
            window.right,
            window.top + half_height + 2 * overhang.top,
        ),
        Direction::Down => WindowRect::new(
            window.left,
            bounds.top + half_height - overhang.top,
            window.right,
            window.bottom,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::monitor::MonitorHandle;

    fn monitor(id: isize, left: i32, top: i32, width: i32, height: i32) -> Monitor {
        let bounds = WindowRect::from_origin_size(left, top, width, height);
        let work_area = WindowRect::new(bounds.left, bounds.top, bounds.right, bounds.bottom - 40);
        Monitor::new(MonitorHandle(id), bounds, work_area)
    }

    #[test]
    fn test_percentage_move_scales_up_and_back() {
        let hd = monitor(1, 0, 0, 1920, 1080);
        let uhd = monitor(2, 1920, 0, 3840, 2160);
        let window = WindowRect::from_origin_size(480, 270, 960, 540);

        let moved = plan_move(&window, &hd, &uhd, SizingMode::PercentageBased);
        assert_eq!(moved, WindowRect::from_origin_size(2880, 540, 1920, 1080));

        let back = plan_move(&moved, &uhd, &hd, SizingMode::PercentageBased);
        assert_eq!(back, window);
    }

    #[test]
    fn test_percentage_move_truncates_within_one_pixel() {
        let odd = monitor(1, 0, 0, 1366, 768);
        let qhd = monitor(2, -2560, 0, 2560, 1440);
        let window = WindowRect::from_origin_size(101, 57, 683, 385);

        let moved = plan_move(&window, &odd, &qhd, SizingMode::PercentageBased);
        let back = plan_move(&moved, &qhd, &odd, SizingMode::PercentageBased);

        assert!((back.left - window.left).abs() <= 1);
        assert!((back.top - window.top).abs() <= 1);
        assert!((back.width() - window.width()).abs() <= 1);
        assert!((back.height() - window.height()).abs() <= 1);
    }

    #[test]
    fn test_pixel_move_preserves_size() {
        let left = monitor(1, -1920, 0, 1920, 1080);
        let right = monitor(2, 0, -200, 2560, 1440);
        let window = WindowRect::from_origin_size(-1800, 50, 1000, 700);

        let moved = plan_move(&window, &left, &right, SizingMode::PixelBased);
        assert_eq!(moved.width(), 1000);
        assert_eq!(moved.height(), 700);
        assert_eq!(moved.left, 120);
        assert_eq!(moved.top, -150);
    }

    #[test]
    fn test_edge_overhang_of_maximized_window() {
        let bounds = WindowRect::new(0, 0, 1920, 1080);
        let maximized = WindowRect::new(-8, -8, 1928, 1048);
        let overhang = EdgeOverhang::measure(&maximized, &bounds);

        assert_eq!(
            overhang,
            EdgeOverhang {
                left: 8,
                top: 8,
                right: 8,
                bottom: -32
            }
        );
    }

    #[test]
    fn test_split_left_and_right_compensate_borders() {
        let screen = monitor(1, 0, 0, 1920, 1080);
        let maximized = WindowRect::new(-8, -8, 1928, 1048);

        let left = plan_split(&maximized, &screen, Direction::Left);
        assert_eq!(left, WindowRect::new(-8, -8, 968, 1048));
        // visible area once the 8 px borders are discounted
        assert_eq!(left.left + 8, 0);
        assert_eq!(left.right - 8, 960);

        let right = plan_split(&maximized, &screen, Direction::Right);
        assert_eq!(right, WindowRect::new(952, -8, 1928, 1048));
        assert_eq!(right.left + 8, 960);
        assert_eq!(right.right - 8, 1920);
    }

    #[test]
    fn test_split_on_secondary_monitor() {
        let screen = monitor(2, -2560, 0, 2560, 1440);
        let maximized = WindowRect::new(-2567, -7, 6, 1407);
        let overhang = EdgeOverhang::measure(&maximized, &screen.bounds);

        let left = plan_split(&maximized, &screen, Direction::Left);
        assert_eq!(left.left + overhang.left, -2560);
        assert_eq!(left.right - overhang.left, -1280);

        let right = plan_split(&maximized, &screen, Direction::Right);
        assert_eq!(right.right - overhang.right, 0);
    }

    #[test]
    fn test_split_up_and_down() {
        let screen = monitor(1, 0, 0, 1920, 1080);
        let maximized = WindowRect::new(-8, -8, 1928, 1048);

        let up = plan_split(&maximized, &screen, Direction::Up);
        assert_eq!(up, WindowRect::new(-8, -8, 1928, 548));

        let down = plan_split(&maximized, &screen, Direction::Down);
        assert_eq!(down, WindowRect::new(-8, 532, 1928, 1048));
        assert_eq!(down.top + 8, 540);
    }

    #[test]
    fn test_split_without_borders_is_exact_half() {
        let screen = monitor(1, 0, 0, 1920, 1080);
        let borderless = screen.bounds;

        assert_eq!(
            plan_split(&borderless, &screen, Direction::Left),
            WindowRect::new(0, 0, 960, 1080)
        );
        assert_eq!(
            plan_split(&borderless, &screen, Direction::Right),
            WindowRect::new(960, 0, 1920, 1080)
        );
        for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            assert!(!plan_split(&borderless, &screen, direction).is_degenerate());
        }
    }
}
