pub mod aggregate;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod loader;
pub mod region;
pub mod selector;
pub mod store;
pub mod view;
