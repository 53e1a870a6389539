//
// lib.rs
// dcm2jpeg
//
// Exposes the conversion pipeline as a library; the binary is a thin wrapper around `cli::run`.
//

// Leaf first: attribute access and windowing feed the per-file converter, which the batch driver calls.
pub mod batch;
pub mod cli;
pub mod dicom_access;
pub mod image;
pub mod models;
pub mod naming;
pub mod pixels;
pub mod window;

pub use cli::{run as run_cli, Cli};
