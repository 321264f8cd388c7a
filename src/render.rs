pub mod cpu;
pub mod ctx;
pub mod recording;
pub mod surface;
pub(crate) mod text;
