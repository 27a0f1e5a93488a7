//! Pure placement geometry
//!
//! Nothing in here talks to the window system: monitors and window
//! rectangles come in as snapshots and destination rectangles go out.

pub mod geometry;
pub mod monitor;
pub mod transform;

pub use geometry::{Direction, Point, WindowRect};
pub use monitor::{current_monitor, target_monitor, Monitor, MonitorHandle, CONE_THRESHOLD};
pub use transform::{plan_move, plan_split, EdgeOverhang, SizingMode};
