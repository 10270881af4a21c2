// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions shared between the genotype and phenotype layers.

pub mod error;
pub mod ids;
pub mod roles;

pub use error::{NeuralError, Result};
pub use ids::{ConnectionId, NeuronId};
pub use roles::{NeuronClass, NeuronRole};

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Plasticity rule applied by the execution engine when learning is enabled.
///
/// Exactly one rule is active per run; mixing rules within a single tick is
/// not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningRule {
    /// Correlational Hebbian rule:
    /// `dw = learning_rate * (A*pre*post + B*pre + C*post + D)`
    Correlational,
    /// Bias-adaptation rule: shifts the destination neuron's bias toward the
    /// midpoint of its activation range. The synaptic weight branch of this
    /// rule is a documented stub and leaves weights unchanged.
    BiasAdaptation,
}

impl LearningRule {
    /// Canonical configuration-file name of this rule
    pub fn name(&self) -> &'static str {
        match self {
            LearningRule::Correlational => "correlational",
            LearningRule::BiasAdaptation => "bias_adaptation",
        }
    }
}

impl fmt::Display for LearningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LearningRule {
    type Err = NeuralError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "correlational" => Ok(LearningRule::Correlational),
            "bias_adaptation" => Ok(LearningRule::BiasAdaptation),
            other => Err(NeuralError::UnsupportedLearningRule(other.into())),
        }
    }
}
