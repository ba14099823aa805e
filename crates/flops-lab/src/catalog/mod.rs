mod builtin;
mod lookup;
mod parser;
mod types;
mod validator;

pub use lookup::SeriesGroup;
pub use parser::{
    DEVICES_FILE, PRECISIONS_FILE, load_catalog_dir, parse_catalog_str,
    parse_catalog_str_unvalidated, read_catalog_dir,
};
pub use types::*;
pub use validator::validate_catalog;
