// src/processing/native/mod.rs

//! Native image processing via the `image` crate.
//!
//! # Architecture
//!
//! - [`NativeConverter`]: Decodes, orients and re-encodes one image per call.
//! - [`resize`]: Downscale-only fitting of the longest edge.
//! - [`formats`]: Pixel layout normalisation and WebP encoding.

mod executor;
mod formats;
mod resize;

pub use executor::NativeConverter;
