pub mod apper;
pub mod memory;
pub mod traits;
pub mod types;

pub use apper::ApperStore;
pub use memory::MemoryStore;
pub use traits::RecordStore;
