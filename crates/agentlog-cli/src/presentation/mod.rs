pub mod blocks;
pub mod chat;
pub mod style;
pub mod text;
pub mod wrap;

pub use chat::ChatRenderer;
pub use style::Palette;
pub use text::TextRenderer;
