pub mod loader;
pub mod root;

pub use loader::load_from_path;
pub use root::Config;
