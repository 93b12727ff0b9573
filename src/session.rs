//! Per-gesture drag state.
//!
//! A session is created on pointer-down, fed pointer positions while the
//! button is held, and dropped on pointer-up. Nothing outlives the gesture.

use egui::{CursorIcon, Pos2};

use crate::booth::{BoothId, PercentRect};
use crate::coordinate::ReferenceFrame;

/// Smallest width or height a resize may produce, in percent.
pub const MIN_SIZE: f64 = 1.0;

/// Corner handle of a booth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn all() -> &'static [Corner] {
        &[
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft | Corner::BottomRight => CursorIcon::ResizeNwSe,
            Corner::TopRight | Corner::BottomLeft => CursorIcon::ResizeNeSw,
        }
    }

    /// Applies a percentage delta, measured from where the gesture started,
    /// to the rect captured at that moment.
    pub fn resize(&self, start: PercentRect, dx: f64, dy: f64) -> PercentRect {
        let mut rect = start;
        match self {
            Corner::TopLeft => {
                rect.width = (start.width - dx).max(MIN_SIZE);
                rect.height = (start.height - dy).max(MIN_SIZE);
                rect.x = start.x + (start.width - rect.width);
                rect.y = start.y + (start.height - rect.height);
            }
            Corner::TopRight => {
                rect.width = (start.width + dx).max(MIN_SIZE);
                rect.height = (start.height - dy).max(MIN_SIZE);
                rect.y = start.y + (start.height - rect.height);
            }
            Corner::BottomLeft => {
                rect.width = (start.width - dx).max(MIN_SIZE);
                rect.height = (start.height + dy).max(MIN_SIZE);
                rect.x = start.x + (start.width - rect.width);
            }
            Corner::BottomRight => {
                rect.width = (start.width + dx).max(MIN_SIZE);
                rect.height = (start.height + dy).max(MIN_SIZE);
            }
        }
        rect
    }
}

/// Move drag. Each update yields the displacement since the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveSession {
    pub booth: BoothId,
    last: Pos2,
}

impl MoveSession {
    pub fn start(booth: BoothId, pointer: Pos2) -> Self {
        Self { booth, last: pointer }
    }

    pub fn update(&mut self, pointer: Pos2, frame: &ReferenceFrame) -> (f64, f64) {
        let delta = frame.to_percent_delta(pointer - self.last);
        self.last = pointer;
        delta
    }

    /// Moves the reference point without producing a delta.
    pub fn rebase(&mut self, pointer: Pos2) {
        self.last = pointer;
    }
}

/// Corner resize. Updates are computed against the snapshot taken at start.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub booth: BoothId,
    pub corner: Corner,
    origin: Pos2,
    start: PercentRect,
}

impl ResizeSession {
    pub fn start(booth: BoothId, corner: Corner, pointer: Pos2, rect: PercentRect) -> Self {
        Self {
            booth,
            corner,
            origin: pointer,
            start: rect,
        }
    }

    pub fn update(&self, pointer: Pos2, frame: &ReferenceFrame) -> PercentRect {
        let (dx, dy) = frame.to_percent_delta(pointer - self.origin);
        self.corner.resize(self.start, dx, dy)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Move(MoveSession),
    Resize(ResizeSession),
}

impl Gesture {
    pub fn booth(&self) -> &BoothId {
        match self {
            Gesture::Move(session) => &session.booth,
            Gesture::Resize(session) => &session.booth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Rect, Vec2};
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    fn frame() -> ReferenceFrame {
        ReferenceFrame::new(Rect::from_min_size(Pos2::ZERO, Vec2::new(500.0, 400.0)))
    }

    fn start() -> PercentRect {
        PercentRect::new(10.0, 10.0, 20.0, 20.0)
    }

    #[test]
    fn move_updates_are_incremental() {
        let mut session = MoveSession::start(1.into(), Pos2::new(100.0, 100.0));
        let (dx, dy) = session.update(Pos2::new(150.0, 100.0), &frame());
        assert!((dx - 10.0).abs() < EPS && dy.abs() < EPS);

        let (dx, dy) = session.update(Pos2::new(150.0, 140.0), &frame());
        assert!(dx.abs() < EPS && (dy - 10.0).abs() < EPS);
    }

    #[test]
    fn rebase_drops_the_skipped_distance() {
        let mut session = MoveSession::start(1.into(), Pos2::ZERO);
        session.rebase(Pos2::new(200.0, 200.0));
        let (dx, dy) = session.update(Pos2::new(250.0, 200.0), &frame());
        assert!((dx - 10.0).abs() < EPS && dy.abs() < EPS);
    }

    #[test]
    fn resize_is_measured_from_gesture_start() {
        let session = ResizeSession::start(1.into(), Corner::BottomRight, Pos2::ZERO, start());
        let first = session.update(Pos2::new(25.0, 0.0), &frame());
        let second = session.update(Pos2::new(25.0, 0.0), &frame());
        assert_eq!(first, second);
        assert!((first.width - 25.0).abs() < EPS);
    }

    #[test]
    fn top_right_keeps_bottom_edge() {
        let rect = Corner::TopRight.resize(start(), 5.0, 5.0);
        assert!((rect.width - 25.0).abs() < EPS);
        assert!((rect.height - 15.0).abs() < EPS);
        assert!((rect.bottom() - start().bottom()).abs() < EPS);
        assert_eq!(rect.x, start().x);
    }

    #[test]
    fn bottom_left_keeps_right_edge() {
        let rect = Corner::BottomLeft.resize(start(), 5.0, 5.0);
        assert!((rect.width - 15.0).abs() < EPS);
        assert!((rect.height - 25.0).abs() < EPS);
        assert!((rect.right() - start().right()).abs() < EPS);
        assert_eq!(rect.y, start().y);
    }

    #[test]
    fn shrinking_past_zero_stops_at_minimum() {
        let rect = Corner::TopLeft.resize(start(), 500.0, 500.0);
        assert_eq!(rect.width, MIN_SIZE);
        assert_eq!(rect.height, MIN_SIZE);
        assert!((rect.right() - start().right()).abs() < EPS);
        assert!((rect.bottom() - start().bottom()).abs() < EPS);
    }

    fn corner() -> impl Strategy<Value = Corner> {
        prop_oneof![
            Just(Corner::TopLeft),
            Just(Corner::TopRight),
            Just(Corner::BottomLeft),
            Just(Corner::BottomRight),
        ]
    }

    proptest! {
        #[test]
        fn resize_never_goes_below_minimum(
            corner in corner(),
            w in 1.0f64..100.0,
            h in 1.0f64..100.0,
            dx in -1000.0f64..1000.0,
            dy in -1000.0f64..1000.0,
        ) {
            let rect = corner.resize(PercentRect::new(0.0, 0.0, w, h), dx, dy);
            prop_assert!(rect.width >= MIN_SIZE);
            prop_assert!(rect.height >= MIN_SIZE);
        }

        #[test]
        fn bottom_right_never_moves_origin(dx in -200.0f64..200.0, dy in -200.0f64..200.0) {
            let rect = Corner::BottomRight.resize(start(), dx, dy);
            prop_assert_eq!(rect.x, start().x);
            prop_assert_eq!(rect.y, start().y);
        }

        #[test]
        fn top_left_pins_bottom_right_corner(dx in -200.0f64..200.0, dy in -200.0f64..200.0) {
            let rect = Corner::TopLeft.resize(start(), dx, dy);
            prop_assert!((rect.right() - start().right()).abs() < EPS);
            prop_assert!((rect.bottom() - start().bottom()).abs() < EPS);
        }

        #[test]
        fn move_deltas_add_up(steps in prop::collection::vec((-50i32..50, -50i32..50), 1..20)) {
            let frame = frame();
            let mut pointer = Pos2::new(250.0, 200.0);
            let mut session = MoveSession::start(1.into(), pointer);
            let (mut x, mut y) = (0.0, 0.0);
            let (mut sum_dx, mut sum_dy) = (0.0, 0.0);
            for (dx, dy) in steps {
                pointer += Vec2::new(dx as f32, dy as f32);
                let (px, py) = session.update(pointer, &frame);
                x += px;
                y += py;
                sum_dx += dx as f64;
                sum_dy += dy as f64;
            }
            prop_assert!((x - sum_dx / 500.0 * 100.0).abs() < 1e-6);
            prop_assert!((y - sum_dy / 400.0 * 100.0).abs() < 1e-6);
        }
    }
}
