//! Renderer implementations.

pub mod simple;

pub use simple::SimpleRenderer;
