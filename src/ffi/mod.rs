//! RAII wrappers around the Win32 handles the sample source and process
//! actions hold.

mod handles;

pub use handles::{KernelHandle, ScmHandle};
