pub mod draw;
pub mod graph;
pub mod plot;
pub mod provider;
pub mod renderable;
