//! CPU rasterization of the overlay.

/// Overlay raster target.
pub mod surface;
