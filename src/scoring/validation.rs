use super::config::WeightConfig;

/// Validate weights at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(weights: &WeightConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (kind, weight) in weights.configured() {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            errors.push(format!(
                "weights.{}: must be between 0 and 1, got {}",
                kind.key(),
                weight
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
