// Adapters layer: concrete implementations of the domain ports (storage,
// profile stores, remote sources, password hashing).

pub mod file_store;
pub mod http_source;
pub mod memory_store;
pub mod password;
pub mod storage;
