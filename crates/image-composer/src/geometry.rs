//! Placement math shared by the compositor and the text renderer.

use tracing::debug;

/// A top-left pixel offset. May be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A caller-supplied position where either axis may be left unset.
///
/// The compositor treats an unset axis as 0; the text renderer centers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub x: Option<i64>,
    pub y: Option<i64>,
}

impl Anchor {
    /// Both axes unset.
    pub const CENTERED: Anchor = Anchor { x: None, y: None };

    pub const fn new(x: Option<i64>, y: Option<i64>) -> Self {
        Self { x, y }
    }

    pub const fn at(x: i64, y: i64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Resolve one axis of a foreground placement.
///
/// An unset offset is 0. A negative offset counts back from the far edge,
/// so `-10` leaves a 10px margin between the foreground and the right (or
/// bottom) edge. A foreground that would overrun the background is pulled
/// back flush with the far edge; when the foreground is larger than the
/// background this yields a negative offset, which is kept.
pub fn normalize_axis(offset: Option<i64>, fg_extent: u32, bg_extent: u32) -> i64 {
    let fg = i64::from(fg_extent);
    let bg = i64::from(bg_extent);
    let mut pos = offset.unwrap_or(0);

    if pos < 0 {
        pos = (bg + pos - fg).max(0);
    }
    if pos + fg > bg {
        pos = pos.min(bg - fg);
    }
    pos
}

/// Resolve a foreground placement on both axes. See [`normalize_axis`].
pub fn normalize_placement(anchor: Anchor, fg_size: (u32, u32), bg_size: (u32, u32)) -> Point {
    let point = Point::new(
        normalize_axis(anchor.x, fg_size.0, bg_size.0),
        normalize_axis(anchor.y, fg_size.1, bg_size.1),
    );
    debug!(
        requested_x = ?anchor.x,
        requested_y = ?anchor.y,
        x = point.x,
        y = point.y,
        "Resolved foreground placement"
    );
    point
}

/// Offset that centers `inner` within `outer`, using floor division.
pub fn center_offset(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_axis_defaults_to_origin() {
        assert_eq!(normalize_axis(None, 30, 100), 0);
    }

    #[test]
    fn negative_offset_anchors_to_far_edge() {
        assert_eq!(normalize_axis(Some(-10), 30, 100), 60);
    }

    #[test]
    fn negative_offset_never_goes_below_zero() {
        assert_eq!(normalize_axis(Some(-90), 30, 100), 0);
    }

    #[test]
    fn overrun_is_pulled_flush_with_far_edge() {
        assert_eq!(normalize_axis(Some(90), 30, 100), 70);
    }

    #[test]
    fn in_bounds_offset_is_kept() {
        assert_eq!(normalize_axis(Some(70), 30, 100), 70);
        assert_eq!(normalize_axis(Some(5), 30, 100), 5);
    }

    #[test]
    fn oversized_foreground_yields_negative_offset() {
        assert_eq!(normalize_axis(Some(0), 150, 100), -50);
        assert_eq!(normalize_axis(Some(-10), 150, 100), -50);
    }

    #[test]
    fn placement_resolves_each_axis_independently() {
        let p = normalize_placement(Anchor::new(Some(-10), None), (30, 20), (100, 80));
        assert_eq!(p, Point::new(60, 0));
    }

    #[test]
    fn center_offset_floors_negative_halves() {
        assert_eq!(center_offset(100, 30), 35);
        assert_eq!(center_offset(100, 31), 34);
        assert_eq!(center_offset(10, 13), -2);
    }
}
