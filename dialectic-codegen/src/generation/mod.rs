//! Output management: file registry, barrels and project stubs.

mod barrel;
mod registry;
mod tsconfig;

pub use barrel::Barrel;
pub use registry::{FileCategory, FileEntry, FileRegistry, PreviewEntry, WriteStats};
pub use tsconfig::TsConfigStub;
