mod composer;
mod types;

pub use composer::SheetComposer;
pub use types::{ROTATION_NAMES, RotationSlot, SheetConfig};
