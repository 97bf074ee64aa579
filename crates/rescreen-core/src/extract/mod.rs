//! Pattern-based text processing: contact extraction and normalization.

mod contact;
mod normalize;
pub mod patterns;

pub use contact::{ContactExtractor, ContactField, extract_contacts};
pub use normalize::{TextNormalizer, normalize};
