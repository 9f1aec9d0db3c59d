pub mod info;
pub mod list;
pub mod view;
