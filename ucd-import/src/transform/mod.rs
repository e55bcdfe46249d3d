//! Record transforms between decoding and persistence

pub mod blocks;
pub mod flatten;
pub mod normalize;

pub use blocks::extract_blocks;
pub use flatten::flatten;
pub use normalize::{
    normalize, normalize_all, validate, validate_and_normalize, NormalizeOutcome, Rejection,
};
