mod io_utils;
mod math;
mod readers;
mod util;

pub use io_utils::tagged_path;
pub use math::{mean, median};
pub use readers::open_table_reader;
pub use util::{autosome_number, handle_error_and_exit, Result};
