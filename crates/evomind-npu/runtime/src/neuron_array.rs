// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neuron-side phenotype arrays.
//!
//! `NeuronParams` is immutable after transcription; `NeuronState` is the
//! per-tick mutable generation. Bias lives in the state rather than the
//! parameters because the bias-adaptation plasticity rule rewrites it at
//! runtime.

use evomind_npu_neural::types::{NeuronClass, NeuronId, NeuronRole};
use evomind_npu_neural::ActivationFunction;
use serde::{Deserialize, Serialize};

/// Static per-neuron parameters, one slot per dense neuron index.
///
/// `synapse_starts[i] .. synapse_starts[i] + synapse_counts[i]` is the
/// range of synapse-buffer slots whose destination is neuron `i`; the
/// ranges partition the synapse buffer with no overlap and no gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeuronParams {
    /// Number of neurons
    pub count: usize,

    /// Genotype identity of each slot (for collaborator lookups)
    pub ids: Vec<NeuronId>,

    /// Roles (sensor slots are skipped by the engine's dynamics)
    pub roles: Vec<NeuronRole>,

    /// Dynamics classes
    pub classes: Vec<NeuronClass>,

    /// Activation-function selectors
    pub activations: Vec<ActivationFunction>,

    /// Slope parameters consumed by the activation functions
    pub alphas: Vec<f32>,

    /// Secondary slope parameters (carried, currently unconsumed)
    pub alpha2s: Vec<f32>,

    /// Leaky-integrator time constants
    pub time_constants: Vec<f32>,

    /// Leaky-integrator gains
    pub gains: Vec<f32>,

    /// Start of each neuron's incoming-synapse range
    pub synapse_starts: Vec<u32>,

    /// Length of each neuron's incoming-synapse range
    pub synapse_counts: Vec<u32>,
}

impl NeuronParams {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            count: 0,
            ids: Vec::with_capacity(capacity),
            roles: Vec::with_capacity(capacity),
            classes: Vec::with_capacity(capacity),
            activations: Vec::with_capacity(capacity),
            alphas: Vec::with_capacity(capacity),
            alpha2s: Vec::with_capacity(capacity),
            time_constants: Vec::with_capacity(capacity),
            gains: Vec::with_capacity(capacity),
            synapse_starts: Vec::with_capacity(capacity),
            synapse_counts: Vec::with_capacity(capacity),
        }
    }

    /// Append one neuron record, returning its dense index.
    #[allow(clippy::too_many_arguments)]
    pub fn push(
        &mut self,
        id: NeuronId,
        class: NeuronClass,
        activation: ActivationFunction,
        alpha: f32,
        alpha2: f32,
        time_constant: f32,
        gain: f32,
        synapse_start: u32,
        synapse_count: u32,
    ) -> usize {
        let index = self.count;
        self.ids.push(id);
        self.roles.push(id.role);
        self.classes.push(class);
        self.activations.push(activation);
        self.alphas.push(alpha);
        self.alpha2s.push(alpha2);
        self.time_constants.push(time_constant);
        self.gains.push(gain);
        self.synapse_starts.push(synapse_start);
        self.synapse_counts.push(synapse_count);
        self.count += 1;
        index
    }

    /// Incoming-synapse range of neuron `index` as buffer offsets.
    #[inline]
    pub fn synapse_range(&self, index: usize) -> core::ops::Range<usize> {
        let start = self.synapse_starts[index] as usize;
        start..start + self.synapse_counts[index] as usize
    }
}

/// One generation of mutable neuron state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeuronState {
    /// Activation outputs (sensor slots are written by the sensing
    /// collaborator before each tick)
    pub activations: Vec<f32>,

    /// Leaky-integrator voltages (zero for instantaneous neurons)
    pub voltages: Vec<f32>,

    /// Biases (mutated only by the bias-adaptation plasticity rule)
    pub biases: Vec<f32>,
}

impl NeuronState {
    /// Initial state at agent birth: zero activations and voltages, biases
    /// taken from the node genes.
    pub fn initial(count: usize, biases: Vec<f32>) -> Self {
        Self {
            activations: vec![0.0; count],
            voltages: vec![0.0; count],
            biases,
        }
    }

    pub fn len(&self) -> usize {
        self.activations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_dense_indices() {
        let mut params = NeuronParams::with_capacity(2);
        let a = params.push(
            NeuronId::universal(NeuronRole::Sensor, 0),
            NeuronClass::Instantaneous,
            ActivationFunction::Linear,
            1.0,
            1.0,
            1.0,
            1.0,
            0,
            0,
        );
        let b = params.push(
            NeuronId::universal(NeuronRole::Motor, 0),
            NeuronClass::LeakyIntegrator,
            ActivationFunction::Tanh,
            1.0,
            1.0,
            0.5,
            2.0,
            0,
            3,
        );
        assert_eq!((a, b), (0, 1));
        assert_eq!(params.count, 2);
        assert_eq!(params.roles[0], NeuronRole::Sensor);
        assert_eq!(params.synapse_range(1), 0..3);
    }
}
