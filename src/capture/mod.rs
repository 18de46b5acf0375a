//! Photo loading
//!
//! Decoding is delegated to the `image` crate; the result carries both the
//! RGBA pixels and a handle the image widget can draw.

pub mod image;
