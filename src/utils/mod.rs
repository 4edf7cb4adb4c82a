pub mod environment;
pub mod terminal;
pub mod timestamps;

pub use environment::get_data_dir;
pub use terminal::{single_line, strip_ansi_codes};
pub use timestamps::format_timestamp;
