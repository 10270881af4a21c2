// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synapse-side phenotype arrays.
//!
//! `SynapseParams` is immutable after transcription; the weight is the only
//! per-tick mutable synapse state and lives in `SynapseState`. Slots are
//! laid out grouped by destination neuron, so one neuron's incoming
//! synapses are one contiguous range.

use serde::{Deserialize, Serialize};

/// Static per-synapse parameters, one slot per synapse-buffer index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynapseParams {
    /// Number of synapses
    pub count: usize,

    /// Dense index of each synapse's source neuron
    pub sources: Vec<u32>,

    /// Dense index of each synapse's destination neuron
    pub targets: Vec<u32>,

    /// Disabled synapses carry no signal and learn nothing
    pub enabled: Vec<bool>,

    /// Correlational-rule coefficient A (pre * post)
    pub coeff_a: Vec<f32>,

    /// Correlational-rule coefficient B (pre)
    pub coeff_b: Vec<f32>,

    /// Correlational-rule coefficient C (post)
    pub coeff_c: Vec<f32>,

    /// Correlational-rule coefficient D (constant)
    pub coeff_d: Vec<f32>,

    /// Per-synapse learning rates
    pub learning_rates: Vec<f32>,
}

impl SynapseParams {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            count: 0,
            sources: Vec::with_capacity(capacity),
            targets: Vec::with_capacity(capacity),
            enabled: Vec::with_capacity(capacity),
            coeff_a: Vec::with_capacity(capacity),
            coeff_b: Vec::with_capacity(capacity),
            coeff_c: Vec::with_capacity(capacity),
            coeff_d: Vec::with_capacity(capacity),
            learning_rates: Vec::with_capacity(capacity),
        }
    }

    /// Append one synapse record, returning its buffer index.
    #[allow(clippy::too_many_arguments)]
    pub fn push(
        &mut self,
        source: u32,
        target: u32,
        enabled: bool,
        coeff_a: f32,
        coeff_b: f32,
        coeff_c: f32,
        coeff_d: f32,
        learning_rate: f32,
    ) -> usize {
        let index = self.count;
        self.sources.push(source);
        self.targets.push(target);
        self.enabled.push(enabled);
        self.coeff_a.push(coeff_a);
        self.coeff_b.push(coeff_b);
        self.coeff_c.push(coeff_c);
        self.coeff_d.push(coeff_d);
        self.learning_rates.push(learning_rate);
        self.count += 1;
        index
    }
}

/// One generation of mutable synapse state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynapseState {
    /// Synaptic weights
    pub weights: Vec<f32>,
}

impl SynapseState {
    pub fn new(weights: Vec<f32>) -> Self {
        Self { weights }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
