//! Local key-value storage adapters

mod file;
mod memory;

pub use file::FileLocalStorage;
pub use memory::MemoryLocalStorage;
