use fitscube_core::region::{Region, RegionFields, RegionParseError};
use fitscube_core::selector::RegionSelector;

/// Selected region plus the four text fields that mirror it.
#[derive(Default)]
pub struct RegionState {
    pub selector: RegionSelector,
    pub fields: RegionFields,
}

impl RegionState {
    pub fn region(&self) -> Option<Region> {
        self.selector.region()
    }

    /// Rewrite the text fields from the stored region.
    pub fn sync_fields(&mut self) {
        self.fields = match self.selector.region() {
            Some(r) => RegionFields::from_region(&r),
            None => RegionFields::default(),
        };
    }

    /// Parse the text fields and store the result, clamped to the frame.
    ///
    /// On error the stored region is left untouched.
    pub fn apply_fields(&mut self, width: usize, height: usize) -> Result<Region, RegionParseError> {
        let parsed = self.fields.parse()?;
        let region = self.selector.set_region(parsed, width, height);
        self.sync_fields();
        Ok(region)
    }

    /// Live edit: store the fields as soon as they parse, clamped to the frame.
    ///
    /// Text that does not parse yet leaves the stored region alone.
    pub fn apply_if_valid(&mut self, width: usize, height: usize) -> Option<Region> {
        let parsed = self.fields.parse().ok()?;
        Some(self.selector.set_region(parsed, width, height))
    }

    /// Select the whole frame.
    pub fn select_all(&mut self, width: usize, height: usize) {
        self.selector.set_region(Region::full(width, height), width, height);
        self.sync_fields();
    }

    pub fn clear(&mut self) {
        self.selector.clear();
        self.sync_fields();
    }
}
