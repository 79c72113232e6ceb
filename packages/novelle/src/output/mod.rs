//! Output generation for amendment runs.

mod writer;

pub use writer::{generate_report, save_outcome};
