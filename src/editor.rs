//! The layout editor controller.
//!
//! `PlanEditor` owns the booth list and all editor state. It never touches
//! the screen directly: every visual change goes through a [`PlanView`],
//! which keeps the controller usable with any front end and lets tests
//! record what would have been drawn.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use egui::Pos2;
use tracing::{debug, info, trace, warn};

use crate::booth::{Booth, BoothId, PercentRect};
use crate::coordinate::ReferenceFrame;
use crate::error::{EditorError, Result};
use crate::export::booths_to_json;
use crate::readout::format_readout;
use crate::session::{Corner, Gesture, MoveSession, ResizeSession};

pub const ENABLED_NOTICE: &str = "Editor enabled";

/// What the editor needs from the surface the plan is drawn on.
pub trait PlanView {
    /// Per-booth handle returned by [`PlanView::bind`].
    type Handle: Clone;

    /// Connects a booth to its visual element.
    fn bind(&mut self, booth: &Booth) -> Result<Self::Handle>;

    /// Current rendered box of the reference image.
    fn reference_frame(&self) -> ReferenceFrame;

    /// Shows or hides the edit-mode and export controls.
    fn set_controls_visible(&mut self, visible: bool);

    /// Updates the edit-mode toggle and shows or hides the readout.
    fn set_edit_mode(&mut self, on: bool);

    /// Marks a booth editable and attaches its corner handles, or reverts that.
    fn set_editable(&mut self, handle: &Self::Handle, editable: bool);

    fn set_selected(&mut self, handle: &Self::Handle, selected: bool);

    fn place(&mut self, handle: &Self::Handle, rect: PercentRect);

    fn show_readout(&mut self, text: &str);

    fn notify(&mut self, message: &str);

    /// Shows the export text, replacing any earlier export.
    fn show_export(&mut self, json: String);
}

struct Binding<H> {
    index: usize,
    handle: H,
}

pub struct PlanEditor<V: PlanView> {
    booths: Vec<Booth>,
    bindings: HashMap<BoothId, Binding<V::Handle>>,
    view: V,
    editor_visible: bool,
    edit_mode: bool,
    selected: Option<BoothId>,
    gesture: Option<Gesture>,
}

impl<V: PlanView> PlanEditor<V> {
    /// Binds every booth to the view once. Later lookups go through the
    /// resulting map only.
    pub fn create(booths: Vec<Booth>, mut view: V) -> Result<Self> {
        let mut bindings = HashMap::with_capacity(booths.len());
        for (index, booth) in booths.iter().enumerate() {
            match bindings.entry(booth.id.clone()) {
                Entry::Occupied(_) => {
                    warn!(id = %booth.id, index, "duplicate booth id, only the first is editable");
                }
                Entry::Vacant(slot) => {
                    let handle = view.bind(booth)?;
                    slot.insert(Binding { index, handle });
                }
            }
        }
        debug!(booths = booths.len(), "plan editor created");

        Ok(Self {
            booths,
            bindings,
            view,
            editor_visible: false,
            edit_mode: false,
            selected: None,
            gesture: None,
        })
    }

    /// Removes editor UI from the view and hands the booths back. The
    /// editor holds no booths afterwards.
    pub fn dispose(&mut self) -> Vec<Booth> {
        if self.editor_visible {
            self.toggle_visibility();
        }
        self.gesture = None;
        self.bindings.clear();
        debug!("plan editor disposed");
        std::mem::take(&mut self.booths)
    }

    #[cfg(test)]
    pub fn booths(&self) -> &[Booth] {
        &self.booths
    }

    #[cfg(test)]
    pub fn booth(&self, id: &BoothId) -> Option<&Booth> {
        self.bindings.get(id).map(|b| &self.booths[b.index])
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.editor_visible
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn selected(&self) -> Option<&BoothId> {
        self.selected.as_ref()
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Some(Gesture::Move(_)))
    }

    #[cfg(test)]
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Bound to Ctrl+F2.
    pub fn toggle_visibility(&mut self) {
        self.editor_visible = !self.editor_visible;
        self.view.set_controls_visible(self.editor_visible);
        debug!(visible = self.editor_visible, "editor visibility toggled");

        if self.editor_visible {
            self.view.notify(ENABLED_NOTICE);
        } else if self.edit_mode {
            self.set_edit_mode(false);
        }
    }

    /// No-op while the editor is hidden.
    pub fn toggle_edit_mode(&mut self) {
        if !self.editor_visible {
            return;
        }
        self.set_edit_mode(!self.edit_mode);
    }

    fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
        for binding in self.bindings.values() {
            self.view.set_editable(&binding.handle, on);
            if !on {
                self.view.set_selected(&binding.handle, false);
            }
        }
        if !on {
            self.selected = None;
            self.gesture = None;
        }
        self.view.set_edit_mode(on);
        debug!(edit_mode = on, "edit mode toggled");
    }

    /// Pointer pressed on a booth body.
    pub fn begin_move(&mut self, id: &BoothId, pointer: Pos2) -> Result<()> {
        if !self.edit_mode {
            return Ok(());
        }
        let index = self.index_of(id)?;
        self.select(id);
        self.view.show_readout(&format_readout(&self.booths[index]));
        self.gesture = Some(Gesture::Move(MoveSession::start(id.clone(), pointer)));
        debug!(id = %id, "move started");
        Ok(())
    }

    /// Pointer pressed on a corner handle. Takes precedence over
    /// [`PlanEditor::begin_move`] for the same press.
    pub fn begin_resize(&mut self, id: &BoothId, corner: Corner, pointer: Pos2) -> Result<()> {
        if !self.edit_mode {
            return Ok(());
        }
        let index = self.index_of(id)?;
        let start = self.booths[index].rect();
        self.gesture = Some(Gesture::Resize(ResizeSession::start(
            id.clone(),
            corner,
            pointer,
            start,
        )));
        debug!(id = %id, corner = corner.name(), "resize started");
        Ok(())
    }

    pub fn pointer_moved(&mut self, pointer: Pos2) {
        if self.gesture.is_none() {
            return;
        }
        let frame = self.view.reference_frame();
        if !frame.is_usable() {
            trace!("reference image has no size, ignoring pointer move");
            // keep move deltas incremental across skipped events
            if let Some(Gesture::Move(session)) = &mut self.gesture {
                session.rebase(pointer);
            }
            return;
        }

        let update = match &mut self.gesture {
            Some(Gesture::Move(session)) => {
                if !self.edit_mode {
                    return;
                }
                let (dx, dy) = session.update(pointer, &frame);
                let Some(binding) = self.bindings.get(&session.booth) else {
                    return;
                };
                let mut rect = self.booths[binding.index].rect();
                rect.x += dx;
                rect.y += dy;
                (session.booth.clone(), rect)
            }
            Some(Gesture::Resize(session)) => (session.booth.clone(), session.update(pointer, &frame)),
            None => return,
        };
        self.apply(&update.0, update.1);
    }

    /// Pointer released anywhere. Ends whatever gesture is active.
    pub fn pointer_released(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            debug!(id = %gesture.booth(), "gesture ended");
        }
    }

    pub fn readout(&self, id: &BoothId) -> Result<String> {
        let index = self.index_of(id)?;
        Ok(format_readout(&self.booths[index]))
    }

    /// Renders the booth list as JSON and hands it to the view.
    pub fn export_json(&mut self) -> Result<String> {
        let json = booths_to_json(&self.booths)?;
        info!(booths = self.booths.len(), "layout exported");
        self.view.show_export(json.clone());
        Ok(json)
    }

    fn index_of(&self, id: &BoothId) -> Result<usize> {
        self.bindings
            .get(id)
            .map(|b| b.index)
            .ok_or_else(|| EditorError::UnknownBooth(id.clone()))
    }

    fn select(&mut self, id: &BoothId) {
        if let Some(previous) = self.selected.take() {
            if let Some(binding) = self.bindings.get(&previous) {
                self.view.set_selected(&binding.handle, false);
            }
        }
        if let Some(binding) = self.bindings.get(id) {
            self.view.set_selected(&binding.handle, true);
        }
        self.selected = Some(id.clone());
    }

    fn apply(&mut self, id: &BoothId, rect: PercentRect) {
        let Some(binding) = self.bindings.get(id) else {
            return;
        };
        let booth = &mut self.booths[binding.index];
        booth.set_rect(rect);
        self.view.place(&binding.handle, rect);
        self.view.show_readout(&format_readout(booth));
    }
}
