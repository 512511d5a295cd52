//! Session Builder Host Surface
//!
//! Everything the session workflows need from the editor they run inside:
//! the open documents, opening and closing them, and talking to the user.
//! The core never sees a host UI type; adapters implement these traits.

mod document;
mod editor;
mod error;
#[cfg(feature = "memory")]
mod memory;
mod prompt;

pub use document::{dirty_count, has_open_files, sessionable_paths, OpenDocument};
pub use editor::Editor;
pub use error::HostError;
#[cfg(feature = "memory")]
pub use memory::{Answer, MemoryHost};
pub use prompt::{InputRequest, Message, MessageLevel, PickRequest, Prompter};

pub type Result<T> = std::result::Result<T, HostError>;

/// An editor that can also prompt the user
pub trait Host: Editor + Prompter {}

impl<T: Editor + Prompter + ?Sized> Host for T {}
