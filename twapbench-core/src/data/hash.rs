use crate::domain::Sample;

/// Deterministic BLAKE3 hash over every sample in order.
///
/// Two series hash equal only if timestamps, prices (bitwise), and volumes
/// all match position by position.
pub fn dataset_hash(samples: &[Sample]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(samples.len() as u64).to_le_bytes());
    for s in samples {
        hasher.update(&s.timestamp.and_utc().timestamp_millis().to_le_bytes());
        hasher.update(&s.price.to_le_bytes());
        hasher.update(&s.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
