// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `evomind_configuration.toml`.

use crate::{ConfigError, ConfigResult};
use evomind_genome::MutationConfig;
use evomind_npu_neural::types::LearningRule;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EvomindConfig {
    pub engine: EngineConfig,
    pub plasticity: PlasticityConfig,
    pub mutation: MutationConfig,
    pub logging: LoggingConfig,
}

/// Execution-engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulated duration of one tick
    pub tick_period: f32,
    /// Worker threads for the neuron update (0 = process-wide pool,
    /// 1 = sequential)
    pub worker_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period: 0.1,
            worker_threads: 0,
        }
    }
}

/// Synaptic plasticity configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlasticityConfig {
    pub enabled: bool,
    /// Learning rule name: "correlational" or "bias_adaptation"
    pub rule: String,
}

impl Default for PlasticityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rule: LearningRule::Correlational.name().to_string(),
        }
    }
}

impl PlasticityConfig {
    /// Resolve the configured rule, or `None` when plasticity is disabled.
    /// An unrecognized rule name is a configuration error — there is no
    /// sensible default rule to fall back to.
    pub fn resolved_rule(&self) -> ConfigResult<Option<LearningRule>> {
        if !self.enabled {
            return Ok(None);
        }
        self.rule
            .parse::<LearningRule>()
            .map(Some)
            .map_err(|err| ConfigError::InvalidValue(err.to_string()))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter (overridden by `EVOMIND_LOG`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_plasticity_resolves_to_none() {
        let config = PlasticityConfig::default();
        assert_eq!(config.resolved_rule().unwrap(), None);
    }

    #[test]
    fn test_enabled_plasticity_resolves_rule() {
        let config = PlasticityConfig {
            enabled: true,
            rule: "bias_adaptation".to_string(),
        };
        assert_eq!(
            config.resolved_rule().unwrap(),
            Some(LearningRule::BiasAdaptation)
        );
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let config = PlasticityConfig {
            enabled: true,
            rule: "oja".to_string(),
        };
        assert!(matches!(
            config.resolved_rule(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: EvomindConfig = toml::from_str(
            r#"
            [engine]
            worker_threads = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.worker_threads, 4);
        assert_eq!(config.engine.tick_period, 0.1);
        assert!(!config.plasticity.enabled);
        assert_eq!(config.mutation, MutationConfig::default());
    }
}
