//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with container sniffing |
//! | **Compress** | quality mapping + NeuQuant palette reduction for PNG |
//! | **Reformat** | pixel-mode normalization + per-format encoders |
//! | **Resize** | Lanczos3 `resize_exact` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for quality and dimension math (unit testable)
//! - **Parameters**: Data structures describing encode options
//! - **Codec**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Operations**: High-level transforms combining calculations + codec

pub mod calculations;
pub mod codec;
pub mod operations;
pub mod params;
pub mod rust_codec;

pub use codec::{CodecError, ImageCodec};
pub use operations::apply;
pub use params::{EncodeOptions, Quality};
pub use rust_codec::RustCodec;
