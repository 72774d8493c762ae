mod loader;

pub use loader::{load_csv, parse_renames, read_csv, LoadOptions};
