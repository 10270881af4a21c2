// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neuron role and dynamics-class tags.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Functional role of a neuron within a controller network.
///
/// The role is part of a neuron's identity: two neurons at the same
/// coordinate with different roles are different neurons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuronRole {
    /// Activation is written by the sensing collaborator before each tick
    /// and propagated untouched by the execution engine.
    Sensor,
    /// Internal neuron, updated every tick.
    Hidden,
    /// Updated every tick; activation is read by the acting collaborator
    /// after each tick.
    Motor,
}

impl fmt::Display for NeuronRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NeuronRole::Sensor => "sensor",
            NeuronRole::Hidden => "hidden",
            NeuronRole::Motor => "motor",
        };
        write!(f, "{}", name)
    }
}

/// Temporal dynamics class of a hidden/motor neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuronClass {
    /// Activation is a pure function of this tick's weighted input sum.
    Instantaneous,
    /// First-order filter: a persistent voltage integrates the input sum
    /// with the neuron's time constant, scaled by its gain.
    LeakyIntegrator,
}
