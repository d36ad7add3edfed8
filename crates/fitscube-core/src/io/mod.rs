pub mod directory;
pub mod fits;
