// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Activation Functions
//!
//! The closed set of activation functions an evolved neuron can select.
//! Each is a pure scalar function of one slope parameter `alpha`:
//!
//! ```text
//! linear:      f(x) = alpha * x
//! sigmoid:     f(x) = 1 / (1 + e^(-alpha * x))
//! tanh:        f(x) = tanh(alpha * x)
//! relu:        f(x) = max(0, alpha * x)
//! leaky_relu:  f(x) = x           if x >= 0
//!                     alpha * x   otherwise
//! step:        f(x) = 1 if alpha * x > 0 else 0
//! swish:       f(x) = x / (1 + e^(-alpha * x))
//! elu:         f(x) = x                    if x >= 0
//!                     alpha * (e^x - 1)    otherwise
//! ```
//!
//! Dispatch is a `match` inside the execution engine's hot loop; the closed
//! enumeration keeps the per-neuron cost at a branch, not a virtual call.

use crate::types::{NeuralError, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Activation function selector carried by every node gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    Linear,
    Sigmoid,
    Tanh,
    Relu,
    LeakyRelu,
    Step,
    Swish,
    Elu,
}

impl ActivationFunction {
    /// Apply this function to `x` with slope parameter `alpha`.
    #[inline(always)]
    pub fn apply(self, x: f32, alpha: f32) -> f32 {
        match self {
            ActivationFunction::Linear => alpha * x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-alpha * x).exp()),
            ActivationFunction::Tanh => (alpha * x).tanh(),
            ActivationFunction::Relu => (alpha * x).max(0.0),
            ActivationFunction::LeakyRelu => {
                if x >= 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            ActivationFunction::Step => {
                if alpha * x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationFunction::Swish => x / (1.0 + (-alpha * x).exp()),
            ActivationFunction::Elu => {
                if x >= 0.0 {
                    x
                } else {
                    alpha * (x.exp() - 1.0)
                }
            }
        }
    }

    /// The identity selection used by the add-node split: `linear` with
    /// `alpha = 1` leaves the routed value unchanged.
    pub const IDENTITY: ActivationFunction = ActivationFunction::Linear;

    /// Canonical configuration-file name of this function
    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Linear => "linear",
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::Relu => "relu",
            ActivationFunction::LeakyRelu => "leaky_relu",
            ActivationFunction::Step => "step",
            ActivationFunction::Swish => "swish",
            ActivationFunction::Elu => "elu",
        }
    }

    /// All selectable functions, in declaration order.
    pub const ALL: [ActivationFunction; 8] = [
        ActivationFunction::Linear,
        ActivationFunction::Sigmoid,
        ActivationFunction::Tanh,
        ActivationFunction::Relu,
        ActivationFunction::LeakyRelu,
        ActivationFunction::Step,
        ActivationFunction::Swish,
        ActivationFunction::Elu,
    ];
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = NeuralError;

    fn from_str(s: &str) -> Result<Self> {
        ActivationFunction::ALL
            .iter()
            .find(|func| func.name() == s)
            .copied()
            .ok_or_else(|| NeuralError::UnsupportedActivation(s.into()))
    }
}
