//! GeoJSON in both directions.
//!
//! [`decode_feature_collection`] turns a source payload into a
//! [`mapstory_core::BoundaryDataset`]; [`to_feature_collection`] encodes a
//! finished [`mapstory_core::Resolution`] for the rendering layer.

mod decode;
mod export;

pub use decode::{DecodeError, decode_feature_collection};
pub use export::to_feature_collection;
