use std::time::{Duration, Instant};

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::booth::{Booth, BoothId, PercentRect};
use crate::coordinate::ReferenceFrame;
use crate::editor::PlanView;
use crate::error::{EditorError, Result};
use crate::notice::Notice;
use crate::session::Corner;

/// Side of a corner handle, in screen pixels.
pub const HANDLE_SIZE: f32 = 10.0;

pub struct BoothWidget {
    pub id: BoothId,
    pub label: String,
    pub rect: PercentRect,
    pub editable: bool,
    pub selected: bool,
}

/// What a pointer press landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Handle(BoothId, Corner),
    Booth(BoothId),
}

/// The egui side of the editor: one widget per booth, drawn over the
/// reference image.
pub struct PlanCanvas {
    widgets: Vec<BoothWidget>,
    frame: ReferenceFrame,
    controls_visible: bool,
    edit_mode: bool,
    readout: Option<String>,
    export: Option<String>,
    notices: Vec<Notice>,
    notice_hold: Duration,
}

impl PlanCanvas {
    pub fn new(notice_hold: Duration) -> Self {
        Self {
            widgets: Vec::new(),
            frame: ReferenceFrame::new(Rect::NOTHING),
            controls_visible: false,
            edit_mode: false,
            readout: None,
            export: None,
            notices: Vec::new(),
            notice_hold,
        }
    }

    /// Called every frame once the reference image is laid out.
    pub fn set_frame(&mut self, frame: ReferenceFrame) {
        self.frame = frame;
    }

    #[cfg(test)]
    pub fn widgets(&self) -> &[BoothWidget] {
        &self.widgets
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn readout(&self) -> Option<&str> {
        self.readout.as_deref()
    }

    pub fn export(&self) -> Option<&str> {
        self.export.as_deref()
    }

    pub fn close_export(&mut self) {
        self.export = None;
    }

    /// Drops expired notices and returns the rest.
    pub fn notices(&mut self, now: Instant) -> &[Notice] {
        self.notices.retain(|notice| !notice.is_expired(now));
        &self.notices
    }

    pub fn handle_rect(booth_rect: Rect, corner: Corner) -> Rect {
        let center = match corner {
            Corner::TopLeft => booth_rect.left_top(),
            Corner::TopRight => booth_rect.right_top(),
            Corner::BottomLeft => booth_rect.left_bottom(),
            Corner::BottomRight => booth_rect.right_bottom(),
        };
        Rect::from_center_size(center, Vec2::splat(HANDLE_SIZE))
    }

    // Selected booth last so it paints above the others.
    fn draw_order(&self) -> impl Iterator<Item = &BoothWidget> {
        self.widgets
            .iter()
            .filter(|w| !w.selected)
            .chain(self.widgets.iter().filter(|w| w.selected))
    }

    /// Handles of the selected booth win over any booth body, then the
    /// topmost booth under the pointer.
    pub fn hit_test(&self, pos: Pos2) -> Option<Hit> {
        for widget in self.widgets.iter().filter(|w| w.selected && w.editable) {
            let rect = self.frame.to_screen_rect(widget.rect);
            for &corner in Corner::all() {
                if Self::handle_rect(rect, corner).contains(pos) {
                    return Some(Hit::Handle(widget.id.clone(), corner));
                }
            }
        }

        let order: Vec<&BoothWidget> = self.draw_order().collect();
        order
            .into_iter()
            .rev()
            .find(|w| self.frame.to_screen_rect(w.rect).contains(pos))
            .map(|w| Hit::Booth(w.id.clone()))
    }

    pub fn draw(&self, painter: &Painter, dark_mode: bool, show_labels: bool) {
        let text_color = if dark_mode {
            Color32::WHITE
        } else {
            Color32::BLACK
        };

        for widget in self.draw_order() {
            let rect = self.frame.to_screen_rect(widget.rect);
            painter.rect_filled(rect, 0.0, Color32::from_rgba_unmultiplied(0, 120, 255, 40));

            if widget.selected {
                painter.rect_stroke(rect, 0.0, Stroke::new(3.0, Color32::YELLOW));
            } else if widget.editable {
                let outline = [
                    rect.left_top(),
                    rect.right_top(),
                    rect.right_bottom(),
                    rect.left_bottom(),
                    rect.left_top(),
                ];
                painter.extend(Shape::dashed_line(
                    &outline,
                    Stroke::new(2.0, Color32::RED),
                    6.0,
                    4.0,
                ));
            } else {
                painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_rgb(0, 90, 200)));
            }

            if show_labels {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    &widget.label,
                    FontId::default(),
                    text_color,
                );
            }

            if widget.selected && widget.editable {
                for &corner in Corner::all() {
                    let handle = Self::handle_rect(rect, corner);
                    painter.rect_filled(handle, 0.0, Color32::YELLOW);
                    painter.rect_stroke(handle, 0.0, Stroke::new(1.0, Color32::BLACK));
                }
            }
        }
    }
}

impl PlanView for PlanCanvas {
    type Handle = usize;

    fn bind(&mut self, booth: &Booth) -> Result<usize> {
        if !(booth.width > 0.0 && booth.height > 0.0) {
            return Err(EditorError::Unbound(booth.id.clone()));
        }
        self.widgets.push(BoothWidget {
            id: booth.id.clone(),
            label: booth.label(),
            rect: booth.rect(),
            editable: false,
            selected: false,
        });
        Ok(self.widgets.len() - 1)
    }

    fn reference_frame(&self) -> ReferenceFrame {
        self.frame
    }

    fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
        if !on {
            self.readout = None;
        }
    }

    fn set_editable(&mut self, handle: &usize, editable: bool) {
        self.widgets[*handle].editable = editable;
    }

    fn set_selected(&mut self, handle: &usize, selected: bool) {
        self.widgets[*handle].selected = selected;
    }

    fn place(&mut self, handle: &usize, rect: PercentRect) {
        self.widgets[*handle].rect = rect;
    }

    fn show_readout(&mut self, text: &str) {
        self.readout = Some(text.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.notices
            .push(Notice::new(message, Instant::now(), self.notice_hold));
    }

    fn show_export(&mut self, json: String) {
        self.export = Some(json);
    }
}
