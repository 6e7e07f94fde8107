// Traits for preference persistence; the JSON file backend is what the host app shares with us

mod books;
mod json_file;
#[cfg(test)]
mod memory;

pub use books::ReadingBooksStore;
#[cfg(test)]
pub use books::BOOKS_KEY_V2;
pub use json_file::JsonFilePreferences;
#[cfg(test)]
pub use memory::MemoryPreferences;

/// A flat string-keyed preference map. Writes are last-writer-wins per key.
pub trait PreferenceStore: Send + Sync {
    /// Whether the key is present at all, regardless of its value type.
    fn contains(&self, key: &str) -> bool;
    /// The value under `key` when it is present and a string.
    fn get_string(&self, key: &str) -> Option<String>;
    fn put_string(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
