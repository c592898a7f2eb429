pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod index;
pub mod output;
pub mod sheet;

pub use error::SheetError;
pub use index::IndexingAlgorithm;
pub use sheet::{ROTATION_NAMES, RotationSlot, SheetComposer, SheetConfig};
