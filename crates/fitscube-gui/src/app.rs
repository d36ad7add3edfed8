use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use fitscube_core::aggregate::spectrum;
use fitscube_core::config::ViewerConfig;
use fitscube_core::io::fits::read_frame;
use fitscube_core::loader::{spawn_loader, LoadEvent, LoadFailure, LoadHandle, LoadRequest};
use fitscube_core::store::FrameStore;
use fitscube_core::view::{normalize, Contrast, ZoomState};
use tracing::warn;

use crate::convert::raster_to_color_image;
use crate::messages::UiMessage;
use crate::panels;
use crate::states::{RegionState, RenderKey, UIState, ViewportState};

pub struct FitscubeApp {
    pub msg_tx: mpsc::Sender<UiMessage>,
    pub msg_rx: mpsc::Receiver<UiMessage>,
    pub store: FrameStore,
    pub loader: Option<LoadHandle>,
    /// Files listed for the current directory, in frame order.
    pub files: Vec<PathBuf>,
    pub config: ViewerConfig,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub region: RegionState,
    pub show_about: bool,
    ctx: egui::Context,
}

impl FitscubeApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let config = ViewerConfig::default();

        Self {
            msg_tx,
            msg_rx,
            store: FrameStore::new(),
            loader: None,
            files: Vec::new(),
            ui_state: UIState {
                contrast: config.default_contrast,
                ..UIState::default()
            },
            viewport: ViewportState::from_config(&config),
            region: RegionState::default(),
            config,
            show_about: false,
            ctx: ctx.clone(),
        }
    }

    /// Drain results of file dialogs.
    fn poll_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            match msg {
                UiMessage::DirectoryPicked { path } => self.open_directory(path),
                UiMessage::ConfigImported { path, config } => {
                    self.ui_state
                        .add_log(format!("Config imported from {}", path.display()));
                    self.apply_config(config);
                }
                UiMessage::ConfigExported { path } => {
                    self.ui_state
                        .add_log(format!("Config exported to {}", path.display()));
                }
                UiMessage::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    /// Drain all pending events from the background loader.
    fn poll_loader(&mut self) {
        let Some(handle) = self.loader.as_ref() else {
            return;
        };
        let mut messages = Vec::new();
        while let Some(msg) = handle.try_recv() {
            messages.push(msg);
        }

        for msg in messages {
            if msg.generation != self.store.generation() {
                warn!("Ignoring event from superseded load {}", msg.generation);
                continue;
            }
            match msg.event {
                LoadEvent::Progress(pct) => {
                    self.ui_state.progress = Some(pct);
                }
                LoadEvent::Done { stack, elapsed } => {
                    let count = stack.len();
                    if self.store.finish(msg.generation, Ok(stack)) {
                        self.ui_state.add_log(format!(
                            "Loaded {count} frames in {}",
                            format_duration(elapsed)
                        ));
                    }
                }
                LoadEvent::Failed(failure) => {
                    self.ui_state.add_log(format!("ERROR: {failure}"));
                    for line in failure.trace.lines().skip(1) {
                        self.ui_state.add_log(format!("    {line}"));
                    }
                    self.store.finish(msg.generation, Err(failure));
                }
                LoadEvent::Finished => {
                    self.ui_state.progress = None;
                    self.loader = None;
                }
            }
        }
    }

    /// Start loading `path`, honouring the configured load policy.
    pub fn open_directory(&mut self, path: PathBuf) {
        let previous = self.store.generation();
        let generation = match self.store.begin_load(&path, self.config.load_policy) {
            Ok(g) => g,
            Err(e) => {
                self.ui_state
                    .add_log(format!("Cannot open {}: {e}", path.display()));
                return;
            }
        };

        // Only reachable with LoadPolicy::Restart; Reject fails in begin_load.
        if let Some(old) = self.loader.take() {
            old.cancel();
            self.ui_state.add_log(format!("Cancelled load {previous}"));
        }

        self.ui_state.reset_for_new_stack();
        self.ui_state.load_started = Some(Instant::now());
        self.viewport.clear();
        self.region.clear();
        self.files.clear();

        let request = match LoadRequest::from_directory(&path, &self.config, generation) {
            Ok(r) => r,
            Err(e) => {
                let failure = LoadFailure::from_error(&e, Some(&path));
                self.ui_state.add_log(format!("ERROR: {failure}"));
                self.store.finish(generation, Err(failure));
                return;
            }
        };

        self.ui_state.add_log(format!(
            "Opening {} ({} files)",
            path.display(),
            request.files.len()
        ));
        self.files = request.files.clone();
        self.ui_state.progress = Some(0);

        let ctx = self.ctx.clone();
        match spawn_loader(request, move || ctx.request_repaint()) {
            Ok(handle) => self.loader = Some(handle),
            Err(e) => {
                let failure = LoadFailure::from_error(&e, Some(&path));
                self.ui_state.add_log(format!("ERROR: {failure}"));
                self.store.finish(generation, Err(failure));
                self.ui_state.progress = None;
            }
        }
    }

    /// Frames the viewer can show: the loaded stack, or the listed files while loading.
    pub fn frame_count(&self) -> usize {
        self.store.frame_count().unwrap_or(self.files.len())
    }

    /// (width, height) of the displayed frame.
    pub fn frame_dimensions(&self) -> Option<(usize, usize)> {
        self.viewport.image_size.map(|[w, h]| (w, h))
    }

    /// Re-render the viewport texture when the frame, contrast or stack changed.
    ///
    /// Before the stack is ready the selected frame is read straight from its file.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let key = RenderKey {
            generation: self.store.generation(),
            frame_index: self.ui_state.frame_index,
            contrast: self.ui_state.contrast,
        };
        if self.viewport.rendered == Some(key) {
            return;
        }
        let count = self.frame_count();

        let frame = match self.store.ready() {
            Ok(stack) => match stack.get(key.frame_index) {
                Some(frame) => Cow::Borrowed(frame),
                None => return,
            },
            Err(_) => {
                let Some(path) = self.files.get(key.frame_index) else {
                    return;
                };
                match read_frame(path) {
                    Ok(frame) => Cow::Owned(frame),
                    Err(e) => {
                        warn!("Cannot display {}: {e}", path.display());
                        self.ui_state
                            .add_log(format!("Cannot display {}: {e}", path.display()));
                        self.viewport.rendered = Some(key);
                        return;
                    }
                }
            }
        };

        let raster = normalize(&frame, Contrast(key.contrast));
        let image = raster_to_color_image(&raster);
        let [w, h] = image.size;
        let texture = ctx.load_texture("viewport", image, egui::TextureOptions::NEAREST);

        self.viewport.texture = Some(texture);
        self.viewport.image_size = Some([w, h]);
        self.viewport.rendered = Some(key);
        self.viewport.viewing_label = format!("Frame {} / {count}", key.frame_index);
        if self.region.region().is_none() {
            self.region.select_all(w, h);
        }
    }

    /// Validate the region fields and sum the region over every frame.
    pub fn compute_spectrum(&mut self) {
        let Some((w, h)) = self.frame_dimensions() else {
            self.ui_state
                .add_log("Spectrum unavailable: no frames loaded".into());
            return;
        };
        let region = match self.region.apply_fields(w, h) {
            Ok(r) => r,
            Err(e) => {
                warn!("Rejected region input: {e}");
                self.ui_state.add_log(format!("Invalid region: {e}"));
                return;
            }
        };

        match spectrum(&self.store, &region, self.ui_state.frame_index) {
            Ok(report) => {
                self.ui_state.add_log(format!(
                    "Spectrum over {region} ({} frames)",
                    report.len()
                ));
                self.ui_state.spectrum = Some(report);
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    pub fn apply_config(&mut self, config: ViewerConfig) {
        self.viewport.zoom = ZoomState::from_config(&config);
        self.viewport.pan_offset = egui::Vec2::ZERO;
        self.ui_state.contrast = config.default_contrast;
        self.config = config;
    }

    pub fn directory(&self) -> Option<&Path> {
        self.store.directory()
    }
}

impl eframe::App for FitscubeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages();
        self.poll_loader();
        self.refresh_texture(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::spectrum::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About FITS Cube Viewer")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("FITS Cube Viewer");
                        ui.label("Frame stacks and region spectra");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

pub(crate) fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}min")
    }
}

#[cfg(test)]
mod tests {
    use fitscube_core::config::LoadPolicy;
    use fitscube_core::region::Region;

    use super::*;

    /// Single-HDU BITPIX -32 file holding `data` as a `width` x `height` image.
    fn f32_fits(width: usize, height: usize, data: &[f32]) -> Vec<u8> {
        let mut header = String::new();
        for (key, value) in [
            ("SIMPLE", "T".to_string()),
            ("BITPIX", "-32".to_string()),
            ("NAXIS", "2".to_string()),
            ("NAXIS1", width.to_string()),
            ("NAXIS2", height.to_string()),
        ] {
            header.push_str(&format!("{:<80}", format!("{key:<8}= {value:>20}")));
        }
        header.push_str(&format!("{:<80}", "END"));

        let mut bytes = header.into_bytes();
        bytes.resize(bytes.len().div_ceil(2880) * 2880, b' ');
        bytes.extend(data.iter().flat_map(|v| v.to_be_bytes()));
        bytes.resize(bytes.len().div_ceil(2880) * 2880, 0);
        bytes
    }

    #[test]
    fn frames_display_from_disk_while_loading() {
        let dir = tempfile::TempDir::new().unwrap();
        let files: Vec<PathBuf> = (0..3)
            .map(|i| {
                let path = dir.path().join(format!("frame_{i}.fits"));
                std::fs::write(&path, f32_fits(3, 2, &[i as f32; 6])).unwrap();
                path
            })
            .collect();

        let ctx = egui::Context::default();
        let mut app = FitscubeApp::new(&ctx);
        app.store
            .begin_load(dir.path(), LoadPolicy::Restart)
            .unwrap();
        app.files = files;
        app.ui_state.frame_index = 2;

        assert!(app.store.is_loading());
        assert_eq!(app.frame_count(), 3);

        app.refresh_texture(&ctx);
        assert!(app.viewport.texture.is_some());
        assert_eq!(app.frame_dimensions(), Some((3, 2)));
        assert_eq!(app.region.region(), Some(Region::full(3, 2)));
        assert_eq!(app.viewport.viewing_label, "Frame 2 / 3");
    }
}
