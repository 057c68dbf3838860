//! Concrete collaborators: vocabulary sources, speech and clipboard.

pub mod clipboard;
pub mod source;
pub mod speech;
