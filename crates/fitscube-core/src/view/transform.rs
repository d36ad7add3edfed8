use crate::config::ViewerConfig;

/// Bounded zoom step counter. Step 0 is the fit-to-window state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomState {
    step: i32,
    max_steps: i32,
    zoom_in_factor: f32,
    zoom_out_factor: f32,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl ZoomState {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            step: 0,
            max_steps: config.max_zoom_steps.max(1),
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
        }
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn max_steps(&self) -> i32 {
        self.max_steps
    }

    pub fn is_fit(&self) -> bool {
        self.step == 0
    }

    /// One wheel notch. Returns `false` when already at the bound.
    pub fn zoom_in(&mut self) -> bool {
        if self.step >= self.max_steps {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn zoom_out(&mut self) -> bool {
        if self.step <= -self.max_steps {
            return false;
        }
        self.step -= 1;
        true
    }

    /// Apply a wheel delta: positive zooms in, negative zooms out.
    pub fn apply_wheel(&mut self, delta_y: f32) -> bool {
        if delta_y > 0.0 {
            self.zoom_in()
        } else if delta_y < 0.0 {
            self.zoom_out()
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// Multiplier relative to the fit-to-window scale.
    pub fn factor(&self) -> f32 {
        if self.step >= 0 {
            self.zoom_in_factor.powi(self.step)
        } else {
            self.zoom_out_factor.powi(-self.step)
        }
    }

    pub fn scale(&self, fit_scale: f32) -> f32 {
        fit_scale * self.factor()
    }
}

/// Mapping between screen (device) coordinates and image pixel coordinates.
///
/// The image is drawn centered in the viewport, offset by `pan`, and
/// scaled uniformly by `scale` screen pixels per image pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub viewport_origin: (f32, f32),
    pub viewport_size: (f32, f32),
    pub image_size: (f32, f32),
    pub scale: f32,
    pub pan: (f32, f32),
}

impl ViewTransform {
    /// Transform that fits the whole image inside the viewport.
    pub fn fit(
        viewport_origin: (f32, f32),
        viewport_size: (f32, f32),
        image_size: (f32, f32),
    ) -> Self {
        Self {
            viewport_origin,
            viewport_size,
            image_size,
            scale: fit_scale(viewport_size, image_size),
            pan: (0.0, 0.0),
        }
    }

    pub fn with_zoom(mut self, zoom: &ZoomState) -> Self {
        self.scale = zoom.scale(fit_scale(self.viewport_size, self.image_size));
        self
    }

    /// Screen-space rectangle covered by the image, as (min, max) corners.
    pub fn image_rect_on_screen(&self) -> ((f32, f32), (f32, f32)) {
        let cx = self.viewport_origin.0 + self.viewport_size.0 / 2.0 + self.pan.0;
        let cy = self.viewport_origin.1 + self.viewport_size.1 / 2.0 + self.pan.1;
        let half_w = self.image_size.0 * self.scale / 2.0;
        let half_h = self.image_size.1 * self.scale / 2.0;
        ((cx - half_w, cy - half_h), (cx + half_w, cy + half_h))
    }

    pub fn screen_to_image(&self, pos: (f32, f32)) -> (f32, f32) {
        let (min, _) = self.image_rect_on_screen();
        ((pos.0 - min.0) / self.scale, (pos.1 - min.1) / self.scale)
    }

    pub fn image_to_screen(&self, pos: (f32, f32)) -> (f32, f32) {
        let (min, _) = self.image_rect_on_screen();
        (pos.0 * self.scale + min.0, pos.1 * self.scale + min.1)
    }

    /// Whether a screen point lies over the image.
    pub fn is_over_image(&self, pos: (f32, f32)) -> bool {
        let (x, y) = self.screen_to_image(pos);
        x >= 0.0 && y >= 0.0 && x <= self.image_size.0 && y <= self.image_size.1
    }

    /// Switch to `new_scale` while keeping the image point under `anchor` fixed.
    pub fn zoom_about(&mut self, anchor: (f32, f32), new_scale: f32) {
        let image_point = self.screen_to_image(anchor);
        self.scale = new_scale;
        let moved = self.image_to_screen(image_point);
        self.pan.0 += anchor.0 - moved.0;
        self.pan.1 += anchor.1 - moved.1;
    }

    /// One wheel notch about `anchor`, updating `zoom`, scale and pan.
    ///
    /// Landing back on step 0 restores the fitted view with no pan.
    /// Returns `false` when the zoom was already at its bound.
    pub fn wheel_zoom(&mut self, zoom: &mut ZoomState, anchor: (f32, f32), delta_y: f32) -> bool {
        if !zoom.apply_wheel(delta_y) {
            return false;
        }
        if zoom.is_fit() {
            *self = self.with_zoom(zoom);
            self.pan = (0.0, 0.0);
            return true;
        }
        let new_scale = self.with_zoom(zoom).scale;
        self.zoom_about(anchor, new_scale);
        true
    }
}

/// Largest scale at which the whole image fits inside the viewport.
pub fn fit_scale(viewport_size: (f32, f32), image_size: (f32, f32)) -> f32 {
    if image_size.0 <= 0.0 || image_size.1 <= 0.0 {
        return 1.0;
    }
    (viewport_size.0 / image_size.0).min(viewport_size.1 / image_size.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_bounded_in_both_directions() {
        let mut zoom = ZoomState::default();
        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.step(), zoom.max_steps());
        assert!(!zoom.zoom_in());
        for _ in 0..40 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.step(), -zoom.max_steps());
    }

    #[test]
    fn returning_to_step_zero_restores_fit() {
        let mut zoom = ZoomState::default();
        zoom.zoom_in();
        zoom.zoom_in();
        zoom.zoom_out();
        zoom.zoom_out();
        assert!(zoom.is_fit());
        assert_eq!(zoom.scale(0.5), 0.5);
    }

    #[test]
    fn screen_image_mapping_round_trips() {
        let mut t = ViewTransform::fit((10.0, 20.0), (400.0, 200.0), (100.0, 100.0));
        t.pan = (15.0, -5.0);
        let p = (123.0, 77.0);
        let back = t.image_to_screen(t.screen_to_image(p));
        assert!((back.0 - p.0).abs() < 1e-3);
        assert!((back.1 - p.1).abs() < 1e-3);
    }

    #[test]
    fn fit_centers_the_image() {
        let t = ViewTransform::fit((0.0, 0.0), (400.0, 200.0), (100.0, 100.0));
        assert_eq!(t.scale, 2.0);
        let ((x0, y0), (x1, y1)) = t.image_rect_on_screen();
        assert_eq!((x0, y0, x1, y1), (100.0, 0.0, 300.0, 200.0));
        assert_eq!(t.screen_to_image((100.0, 0.0)), (0.0, 0.0));
    }
}
