use std::path::Path;

use anyhow::{Context, Result};
use fitscube_core::config::ViewerConfig;

use crate::app::FitscubeApp;
use crate::messages::UiMessage;

pub fn show(ctx: &egui::Context, app: &mut FitscubeApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Directory...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_directory(app, ctx);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app, ctx);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app, ctx);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit to Window").clicked() {
                    ui.close();
                    app.viewport.fit_to_window();
                }
                let dims = app.frame_dimensions();
                if ui.add_enabled(dims.is_some(), egui::Button::new("Select Whole Frame")).clicked() {
                    ui.close();
                    if let Some((w, h)) = dims {
                        app.region.select_all(w, h);
                    }
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.apply_config(ViewerConfig::default());
                    app.ui_state.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_directory(app, ctx);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Ask for a directory on a helper thread. Cancelling the dialog does nothing.
pub(crate) fn open_directory(app: &FitscubeApp, ctx: &egui::Context) {
    let msg_tx = app.msg_tx.clone();
    let start_dir = app.directory().and_then(Path::parent).map(Path::to_path_buf);
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_folder() {
            let _ = msg_tx.send(UiMessage::DirectoryPicked { path });
            ctx.request_repaint();
        }
    });
}

fn import_config(app: &FitscubeApp, ctx: &egui::Context) {
    let msg_tx = app.msg_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let msg = match read_config(&path) {
            Ok(config) => UiMessage::ConfigImported { path, config },
            Err(e) => UiMessage::Error {
                message: format!("{e:#}"),
            },
        };
        let _ = msg_tx.send(msg);
        ctx.request_repaint();
    });
}

fn export_config(app: &FitscubeApp, ctx: &egui::Context) {
    let msg_tx = app.msg_tx.clone();
    let config = app.config.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("fitscube.toml")
            .save_file()
        else {
            return;
        };
        let msg = match write_config(&config, &path) {
            Ok(()) => UiMessage::ConfigExported { path },
            Err(e) => UiMessage::Error {
                message: format!("{e:#}"),
            },
        };
        let _ = msg_tx.send(msg);
        ctx.request_repaint();
    });
}

fn read_config(path: &Path) -> Result<ViewerConfig> {
    ViewerConfig::load(path)
        .with_context(|| format!("Failed to import config from {}", path.display()))
}

fn write_config(config: &ViewerConfig, path: &Path) -> Result<()> {
    config
        .save(path)
        .with_context(|| format!("Failed to export config to {}", path.display()))
}
