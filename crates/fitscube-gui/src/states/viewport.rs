use fitscube_core::config::ViewerConfig;
use fitscube_core::view::{ViewTransform, ZoomState};

/// What the current texture was rendered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderKey {
    pub generation: u64,
    pub frame_index: usize,
    pub contrast: u8,
}

/// Viewport display state.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Image size in pixels (width, height).
    pub image_size: Option<[usize; 2]>,
    pub zoom: ZoomState,
    pub pan_offset: egui::Vec2,
    pub rendered: Option<RenderKey>,
    pub viewing_label: String,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            image_size: None,
            zoom: ZoomState::default(),
            pan_offset: egui::Vec2::ZERO,
            rendered: None,
            viewing_label: String::new(),
        }
    }
}

impl ViewportState {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            zoom: ZoomState::from_config(config),
            ..Self::default()
        }
    }

    /// Screen/image mapping for the image drawn inside `rect`.
    pub fn transform(&self, rect: egui::Rect) -> Option<ViewTransform> {
        let [w, h] = self.image_size?;
        let mut t = ViewTransform::fit(
            (rect.left(), rect.top()),
            (rect.width(), rect.height()),
            (w as f32, h as f32),
        )
        .with_zoom(&self.zoom);
        t.pan = (self.pan_offset.x, self.pan_offset.y);
        Some(t)
    }

    pub fn fit_to_window(&mut self) {
        self.zoom.reset();
        self.pan_offset = egui::Vec2::ZERO;
    }

    pub fn clear(&mut self) {
        self.texture = None;
        self.image_size = None;
        self.rendered = None;
        self.viewing_label.clear();
        self.fit_to_window();
    }
}
