pub mod csv_loader;

pub use csv_loader::load_tasks_from_csv;
