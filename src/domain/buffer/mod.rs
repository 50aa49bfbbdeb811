//! Paste buffer entity and ordering laws

pub mod paste_buffer;

pub use paste_buffer::PasteBuffer;
