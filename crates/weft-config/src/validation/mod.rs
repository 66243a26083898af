//! Settings validation.
//!
//! Collects every range violation into a single `ConfigError`.

mod helpers;


use crate::schema::TilingSettings;
use weft_common::ConfigError;

use helpers::{validate_range_f64, validate_range_u64};

/// Run all validations on the settings, collecting all errors.
pub fn validate(settings: &TilingSettings) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range_f64(&mut errors, "resize_amount", settings.resize_amount, 0.01, 0.5);
    validate_range_u64(&mut errors, "settle_delay_ms", settings.settle_delay_ms, 0, 2000);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
