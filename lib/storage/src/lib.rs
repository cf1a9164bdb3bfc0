pub mod loader;
pub mod manager;

pub use loader::{parse_records, read_records};
pub use manager::PopulationStore;
