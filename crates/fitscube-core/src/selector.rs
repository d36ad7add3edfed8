use crate::region::Region;
use crate::view::ViewTransform;

/// Rubber-band region selection driven by pointer gestures or numeric entry.
///
/// Both input paths write the one stored [`Region`]; the on-screen overlay
/// is derived from it through the current [`ViewTransform`], so the numeric
/// fields and the overlay cannot drift apart.
#[derive(Clone, Debug, Default)]
pub struct RegionSelector {
    region: Option<Region>,
    /// Image coordinates of the press that started the current drag.
    drag_origin: Option<(f32, f32)>,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Start a selection. Presses outside the image are ignored.
    pub fn press(&mut self, screen_pos: (f32, f32), transform: &ViewTransform) -> bool {
        if !transform.is_over_image(screen_pos) {
            return false;
        }
        self.drag_origin = Some(transform.screen_to_image(screen_pos));
        true
    }

    /// Update the selection from the current pointer position.
    ///
    /// Returns the new region when it changed. A zero-area rectangle
    /// leaves the previous region in place.
    pub fn drag(&mut self, screen_pos: (f32, f32), transform: &ViewTransform) -> Option<Region> {
        let origin = self.drag_origin?;
        let current = transform.screen_to_image(screen_pos);
        let (w, h) = image_bounds(transform);
        let region = Region::from_corners(origin, current).clamp(w, h);

        if region.is_empty() || self.region == Some(region) {
            return None;
        }
        self.region = Some(region);
        Some(region)
    }

    /// Finish the gesture at `screen_pos`.
    pub fn release(&mut self, screen_pos: (f32, f32), transform: &ViewTransform) -> Option<Region> {
        let changed = self.drag(screen_pos, transform);
        self.drag_origin = None;
        changed
    }

    /// Abandon an in-progress gesture without touching the stored region.
    pub fn cancel_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Numeric entry path. The region is clamped to a `width` x `height` frame.
    pub fn set_region(&mut self, region: Region, width: usize, height: usize) -> Region {
        let clamped = region.clamp(width, height);
        self.region = Some(clamped);
        clamped
    }

    pub fn clear(&mut self) {
        self.region = None;
        self.drag_origin = None;
    }

    /// Screen rectangle of the stored region as (min, max) corners.
    pub fn overlay_rect(&self, transform: &ViewTransform) -> Option<((f32, f32), (f32, f32))> {
        self.region.map(|r| {
            let min = transform.image_to_screen((r.x_min as f32, r.y_min as f32));
            let max = transform.image_to_screen((r.x_max as f32, r.y_max as f32));
            (min, max)
        })
    }
}

fn image_bounds(transform: &ViewTransform) -> (usize, usize) {
    (
        transform.image_size.0.max(0.0) as usize,
        transform.image_size.1.max(0.0) as usize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_transform() -> ViewTransform {
        // 100x100 image drawn 1:1 with its top-left at the screen origin.
        ViewTransform::fit((0.0, 0.0), (100.0, 100.0), (100.0, 100.0))
    }

    #[test]
    fn drag_in_any_direction_gives_normalized_region() {
        let t = unit_transform();
        let mut sel = RegionSelector::new();
        assert!(sel.press((40.0, 30.0), &t));
        sel.drag((10.0, 5.0), &t);
        let r = sel.release((10.0, 5.0), &t);
        assert_eq!(r, None);
        assert_eq!(sel.region(), Some(Region::new(10, 40, 5, 30)));
        assert!(!sel.is_dragging());
    }

    #[test]
    fn drag_past_the_edge_is_clamped() {
        let t = unit_transform();
        let mut sel = RegionSelector::new();
        sel.press((90.0, 90.0), &t);
        sel.release((150.0, 130.0), &t);
        assert_eq!(sel.region(), Some(Region::new(90, 100, 90, 100)));
    }

    #[test]
    fn press_outside_image_is_ignored() {
        let t = ViewTransform::fit((0.0, 0.0), (200.0, 100.0), (100.0, 100.0));
        let mut sel = RegionSelector::new();
        assert!(!sel.press((10.0, 50.0), &t));
        assert_eq!(sel.drag((60.0, 60.0), &t), None);
    }

    #[test]
    fn click_without_area_keeps_previous_region() {
        let t = unit_transform();
        let mut sel = RegionSelector::new();
        sel.set_region(Region::new(1, 3, 1, 3), 100, 100);
        sel.press((50.0, 50.0), &t);
        sel.release((50.0, 50.0), &t);
        assert_eq!(sel.region(), Some(Region::new(1, 3, 1, 3)));
    }

    #[test]
    fn overlay_follows_numeric_entry() {
        let t = ViewTransform::fit((0.0, 0.0), (200.0, 200.0), (100.0, 100.0));
        let mut sel = RegionSelector::new();
        sel.set_region(Region::new(10, 20, 30, 40), 100, 100);
        let (min, max) = sel.overlay_rect(&t).unwrap();
        assert_eq!(min, (20.0, 60.0));
        assert_eq!(max, (40.0, 80.0));
    }
}
