use std::path::Path;
use std::time::Instant;

use clipboard::ClipboardContext;
use clipboard::ClipboardProvider;
use egui::{Color32, ColorImage, Context, CursorIcon, Pos2, Rect, Stroke, Ui, Vec2};
use egui_extras::RetainedImage;
use tracing::{info, warn};

use crate::canvas::{Hit, PlanCanvas};
use crate::config::EditorConfig;
use crate::coordinate::ReferenceFrame;
use crate::editor::PlanEditor;
use crate::error::Result;
use crate::export::save_export;
use crate::ui::UiState;

/// Aspect ratio used when no plan image is given.
const BLANK_PLAN_SIZE: Vec2 = Vec2::new(1600.0, 1000.0);

pub fn load_plan_image(path: &Path) -> Result<ColorImage> {
    let image = image::open(path)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    info!(path = %path.display(), width = size[0], height = size[1], "loaded plan image");
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

pub struct BoothPlanApp {
    editor: PlanEditor<PlanCanvas>,
    plan_image: Option<RetainedImage>,
    ui_state: UiState,
    clipboard: Option<ClipboardContext>,
}

impl BoothPlanApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        editor: PlanEditor<PlanCanvas>,
        plan_image: Option<ColorImage>,
        config: &EditorConfig,
    ) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        cc.egui_ctx.set_style(style);

        let clipboard = match ClipboardProvider::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                warn!(%err, "clipboard unavailable");
                None
            }
        };

        Self {
            editor,
            plan_image: plan_image.map(|image| RetainedImage::from_color_image("plan", image)),
            ui_state: UiState {
                dark_mode: config.dark_mode,
                ..UiState::default()
            },
            clipboard,
        }
    }

    pub fn copy_to_clipboard(&mut self, text: String) -> bool {
        if let Some(clipboard) = &mut self.clipboard {
            clipboard.set_contents(text).is_ok()
        } else {
            false
        }
    }

    fn copy_readout(&mut self) {
        let Some(id) = self.editor.selected().cloned() else {
            return;
        };
        match self.editor.readout(&id) {
            Ok(text) => {
                if !self.copy_to_clipboard(text) {
                    self.ui_state.status = Some("Copy failed".to_string());
                }
            }
            Err(err) => warn!(%err, "no readout for selection"),
        }
    }

    fn plan_size(&self) -> Vec2 {
        self.plan_image
            .as_ref()
            .map(|image| image.size_vec2())
            .unwrap_or(BLANK_PLAN_SIZE)
    }

    fn export(&mut self) {
        if let Err(err) = self.editor.export_json() {
            warn!(%err, "export failed");
            self.ui_state.status = Some(format!("Export failed: {}", err));
        }
    }

    fn save_export_as(&mut self, json: &str) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("booths.json")
            .save_file()
        else {
            return;
        };
        self.ui_state.status = Some(match save_export(&path, json) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                warn!(%err, "save failed");
                err.to_string()
            }
        });
    }

    // Presses start gestures on booths; moves and releases are tracked
    // anywhere in the window, the way document-level listeners would be.
    fn handle_pointer(&mut self, ui: &mut Ui, response: &egui::Response) {
        let (pressed, released, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.hover_pos(),
            )
        });

        if pressed && response.hovered() {
            if let Some(pos) = pos {
                let started = match self.editor.view().hit_test(pos) {
                    Some(Hit::Handle(id, corner)) => self.editor.begin_resize(&id, corner, pos),
                    Some(Hit::Booth(id)) => self.editor.begin_move(&id, pos),
                    None => Ok(()),
                };
                if let Err(err) = started {
                    warn!(%err, "could not start gesture");
                }
            }
        }

        if let Some(pos) = pos {
            self.editor.pointer_moved(pos);
        }

        if released {
            self.editor.pointer_released();
        }

        if self.editor.is_edit_mode() {
            if let Some(hover) = response.hover_pos() {
                match self.editor.view().hit_test(hover) {
                    Some(Hit::Handle(_, corner)) => ui.ctx().set_cursor_icon(corner.cursor_icon()),
                    Some(Hit::Booth(_)) => ui.ctx().set_cursor_icon(CursorIcon::Move),
                    None => {}
                }
            }
        }
    }

    fn draw_plan(&mut self, ui: &mut Ui) -> egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let frame = ReferenceFrame::fit(response.rect, self.plan_size());
        self.editor.view_mut().set_frame(frame);

        let bg_color = if self.ui_state.dark_mode {
            Color32::from_rgb(20, 20, 20)
        } else {
            Color32::from_rgb(240, 240, 240)
        };
        painter.rect_filled(response.rect, 0.0, bg_color);

        match &self.plan_image {
            Some(image) => {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(image.texture_id(ui.ctx()), frame.rect(), uv, Color32::WHITE);
            }
            None => {
                painter.rect_filled(frame.rect(), 0.0, Color32::from_rgb(250, 250, 245));
            }
        }
        painter.rect_stroke(frame.rect(), 0.0, Stroke::new(1.0, Color32::from_rgb(100, 100, 100)));

        self.editor
            .view()
            .draw(&painter, self.ui_state.dark_mode, self.ui_state.show_labels);

        response
    }

    fn show_notices(&mut self, ctx: &Context) {
        let notices: Vec<(String, f32)> = self
            .editor
            .view_mut()
            .notices(Instant::now())
            .iter()
            .map(|notice| (notice.text.clone(), notice.opacity(Instant::now())))
            .collect();
        if notices.is_empty() {
            return;
        }

        egui::Area::new("notices")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
            .show(ctx, |ui| {
                for (text, opacity) in notices {
                    let alpha = (opacity * 255.0) as u8;
                    egui::Frame::none()
                        .fill(Color32::from_rgba_unmultiplied(212, 237, 218, alpha))
                        .inner_margin(egui::vec2(12.0, 8.0))
                        .rounding(4.0)
                        .show(ui, |ui| {
                            ui.colored_label(Color32::from_rgba_unmultiplied(21, 87, 36, alpha), text);
                        });
                }
            });
    }

    fn export_panel(&mut self, ctx: &Context) {
        let Some(json) = self.editor.view().export().map(str::to_owned) else {
            return;
        };

        egui::TopBottomPanel::bottom("export_panel")
            .resizable(true)
            .default_height(300.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Layout JSON");
                    ui.separator();
                    if ui.button("Copy").clicked() {
                        if !self.copy_to_clipboard(json.clone()) {
                            warn!("copy to clipboard failed");
                            self.ui_state.status = Some("Copy failed".to_string());
                        }
                    }
                    if ui.button("Save…").clicked() {
                        self.save_export_as(&json);
                    }
                    if ui.button("Close").clicked() {
                        self.editor.view_mut().close_export();
                    }
                });
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut json.as_str())
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
            });
    }
}

impl eframe::App for BoothPlanApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut style = (*ctx.style()).clone();
        if self.ui_state.dark_mode {
            style.visuals = egui::Visuals::dark();
        } else {
            style.visuals = egui::Visuals::light();
        }
        ctx.set_style(style);

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::F2)) {
            self.editor.toggle_visibility();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Floor Plan");
                ui.separator();
                ui.checkbox(&mut self.ui_state.show_labels, "Labels");
                ui.checkbox(&mut self.ui_state.dark_mode, "Dark Mode");

                if self.editor.view().controls_visible() {
                    ui.separator();
                    let label = if self.editor.is_edit_mode() {
                        "Stop editing"
                    } else {
                        "Edit layout"
                    };
                    if ui.button(label).clicked() {
                        self.editor.toggle_edit_mode();
                    }
                    if ui.button("Show JSON").clicked() {
                        self.export();
                    }
                }

                if let Some(status) = &self.ui_state.status {
                    ui.separator();
                    ui.label(status);
                }
            });

            if self.editor.view().edit_mode() {
                if let Some(readout) = self.editor.view().readout().map(str::to_owned) {
                    ui.horizontal(|ui| {
                        ui.label(readout);
                        if ui.button("Copy").clicked() {
                            self.copy_readout();
                        }
                    });
                }
            }
        });

        self.export_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let response = self.draw_plan(ui);
            self.handle_pointer(ui, &response);
        });

        self.show_notices(ctx);

        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let booths = self.editor.dispose();
        info!(booths = booths.len(), "closing plan editor");
    }
}
