//! Monitor topology: which monitor a window lives on and which monitor lies
//! in a given direction from it.
//!
//! Monitors are snapshots of a single enumeration. Handles are only
//! meaningful within that snapshot, so every placement re-enumerates.

use super::geometry::{Direction, Point, WindowRect};
use std::fmt;

/// cos(45°): candidates must lie within 45° of the requested axis
pub const CONE_THRESHOLD: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Opaque platform monitor handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorHandle(pub isize);

impl fmt::Display for MonitorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monitor#{:x}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    pub handle: MonitorHandle,
    /// Full monitor rectangle
    pub bounds: WindowRect,
    /// Usable area without the taskbar and other reserved regions
    pub work_area: WindowRect,
    pub center: Point,
}

impl Monitor {
    pub fn new(handle: MonitorHandle, bounds: WindowRect, work_area: WindowRect) -> Self {
        Self {
            handle,
            bounds,
            work_area,
            center: bounds.center(),
        }
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.handle, self.bounds)
    }
}

/// Returns the monitor sharing the largest area with `window`.
///
/// A window that overlaps no monitor at all (minimized, or dragged fully
/// off-screen) has no current monitor.
pub fn current_monitor<'a>(window: &WindowRect, monitors: &'a [Monitor]) -> Option<&'a Monitor> {
    let mut best: Option<&Monitor> = None;
    let mut best_overlap = 0i64;

    for monitor in monitors {
        let overlap = window.intersection_area(&monitor.bounds);
        if overlap > best_overlap {
            best_overlap = overlap;
            best = Some(monitor);
        }
    }

    best
}

/// Finds the nearest monitor whose center lies inside a 90° cone around
/// `direction`, measured from the center of `current`.
pub fn target_monitor<'a>(
    monitors: &'a [Monitor],
    current: &Monitor,
    direction: Direction,
) -> Option<&'a Monitor> {
    let axis = direction.unit_vector();
    let mut best: Option<(&Monitor, f64)> = None;

    for candidate in monitors {
        if candidate.handle == current.handle {
            continue;
        }

        let Some(unit) = current.center.vector_to(&candidate.center).normalized() else {
            continue;
        };

        if unit.dot(&axis) < CONE_THRESHOLD {
            continue;
        }

        let distance = current.center.distance_to(&candidate.center);
        match best {
            Some((_, nearest)) if distance >= nearest => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(monitor, _)| monitor)
}
