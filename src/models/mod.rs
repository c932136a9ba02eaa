pub mod loaders;
pub mod order;

pub use loaders::load_tasks_from_csv;
pub use order::{ExtractedFields, OrderRecord, OrderTask};
