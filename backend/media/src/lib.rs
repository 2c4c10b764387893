//! Local persistence for downloaded message media.

pub mod store;

pub use store::{image_file_name, DiskImageStore, TIMESTAMP_FORMAT};
