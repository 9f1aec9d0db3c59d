pub mod event;
pub mod session;
mod util;

pub use event::*;
pub use session::*;
pub use util::*;
