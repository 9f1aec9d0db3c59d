pub mod export;
pub mod sink;

pub use export::write_summaries;
pub use sink::{PagerCommand, page_lines, write_lines};
