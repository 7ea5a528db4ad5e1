pub mod resource_dir;
pub mod window;

pub use resource_dir::search_and_set_resource_dir;
pub use window::{create_window, PlatformConfig};
