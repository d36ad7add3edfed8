use fitscube_core::store::LoadState;

use crate::app::FitscubeApp;
use crate::panels::menu_bar::open_directory;

pub(super) fn file_section(ui: &mut egui::Ui, app: &mut FitscubeApp) {
    let status = match app.store.state() {
        LoadState::Loading { .. } => Some("loading"),
        LoadState::Failed(_) => Some("failed"),
        _ => None,
    };
    crate::panels::section_header(ui, "Directory", status);
    ui.add_space(4.0);

    if ui.button("Open Directory...").clicked() {
        open_directory(app, ui.ctx());
    }

    if let Some(dir) = app.directory() {
        ui.label(
            dir.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| dir.display().to_string()),
        )
        .on_hover_text(dir.display().to_string());
    }

    match app.store.state() {
        LoadState::Ready(stack) => {
            if let Some((w, h)) = stack.dimensions() {
                ui.small(format!("{}x{}, {} frames", w, h, stack.len()));
            }
            if let Some(frame) = stack.get(app.ui_state.frame_index) {
                if let Some(name) = frame.metadata.source.as_ref().and_then(|p| p.file_name()) {
                    ui.small(name.to_string_lossy().to_string());
                }
                ui.small(format!("BITPIX {}", frame.metadata.bitpix));
            }
        }
        LoadState::Failed(failure) => {
            ui.colored_label(egui::Color32::from_rgb(230, 90, 80), failure.to_string());
        }
        _ => {}
    }
}
