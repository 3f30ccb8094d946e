use crate::error::Result;

/// Abstract interface for raw key-value I/O.
///
/// The store is synchronous and string-keyed; a `set` replaces the entire
/// stored value for that key (no merge). Implementations take `&self` for
/// all methods — they are either stateless I/O or use interior mutability,
/// since execution is single-threaded.
pub trait KvBackend {
    /// Read the value for a key. `Ok(None)` means the key has never been
    /// written; `Err` is reserved for actual I/O failures.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for a key. Must be atomic for file-based
    /// implementations (write to tmp then rename) to avoid partial records.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
