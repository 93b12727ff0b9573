use egui::{Rect, Vec2};

use crate::booth::PercentRect;

/// The rendered bounding box of the reference image. All percentages are
/// relative to its current width and height in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    rect: Rect,
}

impl ReferenceFrame {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Largest rect with the image's aspect ratio that fits in `available`,
    /// centered.
    pub fn fit(available: Rect, image_size: Vec2) -> Self {
        if image_size.x <= 0.0 || image_size.y <= 0.0 {
            return Self::new(available);
        }
        let scale = (available.width() / image_size.x).min(available.height() / image_size.y);
        Self::new(Rect::from_center_size(available.center(), image_size * scale))
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// False when the image is not laid out yet; conversions would divide by zero.
    pub fn is_usable(&self) -> bool {
        self.rect.width() > 0.0 && self.rect.height() > 0.0
    }

    /// Converts a pixel displacement into a percentage displacement.
    pub fn to_percent_delta(&self, delta: Vec2) -> (f64, f64) {
        (
            delta.x as f64 / self.rect.width() as f64 * 100.0,
            delta.y as f64 / self.rect.height() as f64 * 100.0,
        )
    }

    pub fn to_screen_rect(&self, rect: PercentRect) -> Rect {
        let size = self.rect.size();
        let min = self.rect.min
            + Vec2::new(
                (rect.x / 100.0) as f32 * size.x,
                (rect.y / 100.0) as f32 * size.y,
            );
        let extent = Vec2::new(
            (rect.width / 100.0) as f32 * size.x,
            (rect.height / 100.0) as f32 * size.y,
        );
        Rect::from_min_size(min, extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn frame() -> ReferenceFrame {
        ReferenceFrame::new(Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(500.0, 250.0)))
    }

    #[test]
    fn pixel_delta_is_relative_to_rendered_size() {
        let (dx, dy) = frame().to_percent_delta(Vec2::new(50.0, 25.0));
        assert!((dx - 10.0).abs() < 1e-9);
        assert!((dy - 10.0).abs() < 1e-9);
    }

    #[test]
    fn screen_rect_maps_percentages() {
        let rect = frame().to_screen_rect(PercentRect::new(10.0, 20.0, 50.0, 40.0));
        assert_eq!(rect.min, Pos2::new(150.0, 100.0));
        assert_eq!(rect.size(), Vec2::new(250.0, 100.0));
    }

    #[test]
    fn fit_keeps_aspect_ratio() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 1000.0));
        let fitted = ReferenceFrame::fit(available, Vec2::new(400.0, 200.0));
        assert_eq!(fitted.rect().size(), Vec2::new(1000.0, 500.0));
        assert_eq!(fitted.rect().center(), available.center());
    }

    #[test]
    fn empty_frame_is_not_usable() {
        assert!(!ReferenceFrame::new(Rect::NOTHING).is_usable());
        assert!(frame().is_usable());
    }
}
