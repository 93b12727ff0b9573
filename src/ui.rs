/// Window-level settings that live outside the editor controller.
pub struct UiState {
    pub dark_mode: bool,
    pub show_labels: bool,
    pub status: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dark_mode: false,
            show_labels: true,
            status: None,
        }
    }
}
