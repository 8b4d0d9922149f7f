pub mod engine;
pub mod file_store;
pub mod growth;
pub mod locks;
pub mod record;
pub mod store;

pub use engine::MasteryEngine;
pub use file_store::JsonFileStore;
pub use growth::GrowthLevel;
pub use record::MasteryRecord;
pub use store::{
    KanaStore,
    MemoryStore,
    StoreSnapshot,
};
