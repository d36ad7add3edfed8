use std::time::Instant;

use fitscube_core::aggregate::SpectrumReport;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Frame currently displayed. Slider and index field both edit this.
    pub frame_index: usize,
    pub contrast: u8,

    /// Latest load percentage while a load is running.
    pub progress: Option<u8>,
    pub load_started: Option<Instant>,

    pub spectrum: Option<SpectrumReport>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Back to the first frame with no spectrum, e.g. after opening a directory.
    pub fn reset_for_new_stack(&mut self) {
        self.frame_index = 0;
        self.spectrum = None;
        self.progress = None;
    }
}
