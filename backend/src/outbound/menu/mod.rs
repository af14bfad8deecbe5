//! Menu catalogue adapters.

mod document;
mod json_file;
mod static_menu;

pub use json_file::JsonFileMenuRepository;
pub use static_menu::StaticMenuRepository;
