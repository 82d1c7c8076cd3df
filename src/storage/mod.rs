pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Key holding the serialized budget document.
pub const BUDGET_KEY: &str = "budget";
/// Key holding the serialized expense list.
pub const EXPENSES_KEY: &str = "expenses";

/// Abstraction over key-value persistence backends holding serialized text.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
