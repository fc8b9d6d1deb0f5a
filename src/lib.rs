//! Greedy packing of rectangular solar panels onto grid-discretized roofs.
//!
//! A roof is a grid of unit cells, optionally cut to a triangular silhouette.
//! [`packer::Packer`] sweeps the grid twice, once per orientation priority,
//! and reports the sweep that placed more panels.

pub mod error;
pub mod packer;
pub mod render;
pub mod roof;
pub mod types;

pub use error::PackError;
pub use packer::{Packer, Packing, pack_rectangular, pack_triangular};
