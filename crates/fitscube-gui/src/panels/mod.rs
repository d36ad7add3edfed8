pub mod controls;
pub mod menu_bar;
pub mod region_interaction;
pub mod spectrum;
pub mod status;
pub mod viewport;

mod helpers;

pub(crate) use helpers::section_header;
