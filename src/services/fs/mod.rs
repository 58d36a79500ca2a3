pub mod walker;

pub use walker::{FileHandle, FileWalker};
