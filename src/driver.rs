pub mod config;
pub mod fps;
pub mod headless;
pub mod input;
pub mod letterbox;
pub mod sink;
pub mod wrapper;
