//! BMOF header parsing modules.

pub mod container_header;

pub use container_header::ContainerHeaderParser;
