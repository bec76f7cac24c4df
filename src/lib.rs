pub mod access;
pub mod app;
pub mod fetch;
pub mod gallery;
pub mod logging;
pub mod preview;
pub mod storage;
pub mod ui;
