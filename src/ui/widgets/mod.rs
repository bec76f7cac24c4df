pub mod gallery;
pub mod gate;
pub mod header;
pub mod popups;
pub mod viewer;
