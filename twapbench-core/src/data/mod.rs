//! Sample sources and dataset fingerprinting

pub mod hash;
pub mod synthetic;

pub use hash::dataset_hash;
pub use synthetic::{generate_samples, SyntheticConfig};
