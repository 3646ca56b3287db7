pub mod patch;
pub mod process;

pub use patch::*;
pub use process::*;
