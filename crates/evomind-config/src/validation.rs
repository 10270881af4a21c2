// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation.
//!
//! Runs after file parsing and environment overrides, before anything
//! downstream consumes the values — a bad rate or an unknown rule name
//! fails the load, not the hundredth mutation call.

use crate::{ConfigError, ConfigResult, EvomindConfig};

/// Validate the full configuration.
pub fn validate_config(config: &EvomindConfig) -> ConfigResult<()> {
    if !(config.engine.tick_period > 0.0 && config.engine.tick_period.is_finite()) {
        return Err(ConfigError::ValidationError(format!(
            "engine.tick_period must be positive and finite, got {}",
            config.engine.tick_period
        )));
    }

    // An unknown rule name must fail even while plasticity is disabled;
    // flipping the enable switch later should not surface a new error.
    config
        .plasticity
        .rule
        .parse::<evomind_npu_neural::types::LearningRule>()
        .map_err(|err| ConfigError::ValidationError(err.to_string()))?;

    let m = &config.mutation;
    for (name, rate) in [
        ("mutation.weight_rate", m.weight_rate),
        ("mutation.bias_rate", m.bias_rate),
        ("mutation.time_constant_rate", m.time_constant_rate),
        ("mutation.gain_rate", m.gain_rate),
        ("mutation.hebbian_rate", m.hebbian_rate),
        ("mutation.add_connection_rate", m.add_connection_rate),
        ("mutation.add_node_rate", m.add_node_rate),
        ("mutation.disable_connection_rate", m.disable_connection_rate),
        ("mutation.perturb_prob", m.perturb_prob),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be within [0, 1], got {}",
                name, rate
            )));
        }
    }

    if !(m.perturb_stddev > 0.0 && m.perturb_stddev.is_finite()) {
        return Err(ConfigError::ValidationError(format!(
            "mutation.perturb_stddev must be positive and finite, got {}",
            m.perturb_stddev
        )));
    }
    if m.weight_min >= m.weight_max {
        return Err(ConfigError::ValidationError(format!(
            "mutation weight range is empty: [{}, {}]",
            m.weight_min, m.weight_max
        )));
    }
    if m.learning_rate_max < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "mutation.learning_rate_max must be non-negative, got {}",
            m.learning_rate_max
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvomindConfig;

    #[test]
    fn test_defaults_validate() {
        validate_config(&EvomindConfig::default()).unwrap();
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let mut config = EvomindConfig::default();
        config.mutation.perturb_prob = -0.1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_weight_range_rejected() {
        let mut config = EvomindConfig::default();
        config.mutation.weight_min = 1.0;
        config.mutation.weight_max = -1.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_unknown_rule_rejected_even_when_disabled() {
        let mut config = EvomindConfig::default();
        config.plasticity.enabled = false;
        config.plasticity.rule = "hopfield".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_tick_period_rejected() {
        let mut config = EvomindConfig::default();
        config.engine.tick_period = 0.0;
        assert!(validate_config(&config).is_err());
    }
}
