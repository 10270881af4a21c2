// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The compiled network: parameter buffers plus two state generations.
//!
//! A tick reads only the current generation and writes only the next; the
//! generation swap is the single synchronization point and happens only
//! after every neuron of the tick has been processed.

use crate::error::{Result, RuntimeError};
use crate::neuron_array::{NeuronParams, NeuronState};
use crate::synapse_array::{SynapseParams, SynapseState};
use ahash::AHashMap;
use evomind_npu_neural::types::{NeuralError, NeuronId, NeuronRole};

/// Executable phenotype of one agent.
#[derive(Debug, Clone)]
pub struct CompiledNetwork {
    neurons: NeuronParams,
    synapses: SynapseParams,
    current: NeuronState,
    next: NeuronState,
    current_weights: SynapseState,
    next_weights: SynapseState,
    index_of: AHashMap<NeuronId, usize>,
    sensor_indices: Vec<usize>,
    motor_indices: Vec<usize>,
}

/// Split borrow handed to the execution engine for one tick: immutable
/// parameters and current generation, mutable next generation.
pub struct TickBuffers<'a> {
    pub neurons: &'a NeuronParams,
    pub synapses: &'a SynapseParams,
    pub current: &'a NeuronState,
    pub next: &'a mut NeuronState,
    pub current_weights: &'a SynapseState,
    pub next_weights: &'a mut SynapseState,
}

impl CompiledNetwork {
    /// Assemble a network from transcription output.
    ///
    /// Rejects a layout whose synapse ranges do not exactly partition the
    /// synapse buffer in dense-index order — that indicates a transcription
    /// defect and the network must not execute.
    pub fn new(
        neurons: NeuronParams,
        synapses: SynapseParams,
        initial_biases: Vec<f32>,
        initial_weights: Vec<f32>,
    ) -> Result<Self> {
        if initial_biases.len() != neurons.count {
            return Err(RuntimeError::Layout(format!(
                "{} biases for {} neurons",
                initial_biases.len(),
                neurons.count
            )));
        }
        if initial_weights.len() != synapses.count {
            return Err(RuntimeError::Layout(format!(
                "{} weights for {} synapses",
                initial_weights.len(),
                synapses.count
            )));
        }

        // Range-partition check: starts must be cumulative counts and the
        // final range must end exactly at the buffer length.
        let mut expected_start = 0u32;
        for index in 0..neurons.count {
            if neurons.synapse_starts[index] != expected_start {
                return Err(RuntimeError::Layout(format!(
                    "neuron {} synapse range starts at {} (expected {})",
                    index, neurons.synapse_starts[index], expected_start
                )));
            }
            expected_start += neurons.synapse_counts[index];
        }
        if expected_start as usize != synapses.count {
            return Err(RuntimeError::Layout(format!(
                "synapse ranges cover {} of {} slots",
                expected_start, synapses.count
            )));
        }

        for index in 0..synapses.count {
            let (source, target) = (synapses.sources[index], synapses.targets[index]);
            if source as usize >= neurons.count || target as usize >= neurons.count {
                return Err(RuntimeError::Layout(format!(
                    "synapse {} endpoints ({}, {}) outside {} neurons",
                    index, source, target, neurons.count
                )));
            }
        }

        let index_of: AHashMap<NeuronId, usize> = neurons
            .ids
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect();
        let sensor_indices: Vec<usize> = (0..neurons.count)
            .filter(|&i| neurons.roles[i] == NeuronRole::Sensor)
            .collect();
        let motor_indices: Vec<usize> = (0..neurons.count)
            .filter(|&i| neurons.roles[i] == NeuronRole::Motor)
            .collect();

        let state = NeuronState::initial(neurons.count, initial_biases);
        let weights = SynapseState::new(initial_weights);
        Ok(Self {
            neurons,
            synapses,
            current: state.clone(),
            next: state,
            current_weights: weights.clone(),
            next_weights: weights,
            index_of,
            sensor_indices,
            motor_indices,
        })
    }

    pub fn neurons(&self) -> &NeuronParams {
        &self.neurons
    }

    pub fn synapses(&self) -> &SynapseParams {
        &self.synapses
    }

    /// Current-generation neuron state (the read side of the next tick).
    pub fn state(&self) -> &NeuronState {
        &self.current
    }

    /// Current-generation synapse weights.
    pub fn weights(&self) -> &SynapseState {
        &self.current_weights
    }

    pub fn neuron_index(&self, id: NeuronId) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Dense indices of sensor-role neurons.
    pub fn sensor_indices(&self) -> &[usize] {
        &self.sensor_indices
    }

    /// Dense indices of motor-role neurons, for the acting collaborator.
    pub fn motor_indices(&self) -> &[usize] {
        &self.motor_indices
    }

    /// Write a sensor activation before a tick. Role-checked: driving a
    /// non-sensor slot from outside would corrupt the engine's invariants.
    pub fn set_sensor(&mut self, id: NeuronId, value: f32) -> Result<()> {
        let index = self
            .neuron_index(id)
            .ok_or(RuntimeError::UnknownNeuron(id))?;
        let actual = self.neurons.roles[index];
        if actual != NeuronRole::Sensor {
            return Err(NeuralError::RoleMismatch {
                id,
                expected: NeuronRole::Sensor,
                actual,
            }
            .into());
        }
        self.current.activations[index] = value;
        Ok(())
    }

    /// Read any neuron's current activation.
    pub fn activation(&self, id: NeuronId) -> Result<f32> {
        let index = self
            .neuron_index(id)
            .ok_or(RuntimeError::UnknownNeuron(id))?;
        Ok(self.current.activations[index])
    }

    /// Read a motor activation after a tick. Role-checked like
    /// [`set_sensor`](Self::set_sensor).
    pub fn motor_activation(&self, id: NeuronId) -> Result<f32> {
        let index = self
            .neuron_index(id)
            .ok_or(RuntimeError::UnknownNeuron(id))?;
        let actual = self.neurons.roles[index];
        if actual != NeuronRole::Motor {
            return Err(NeuralError::RoleMismatch {
                id,
                expected: NeuronRole::Motor,
                actual,
            }
            .into());
        }
        Ok(self.current.activations[index])
    }

    /// Split borrow for one tick.
    pub fn tick_buffers(&mut self) -> TickBuffers<'_> {
        TickBuffers {
            neurons: &self.neurons,
            synapses: &self.synapses,
            current: &self.current,
            next: &mut self.next,
            current_weights: &self.current_weights,
            next_weights: &mut self.next_weights,
        }
    }

    /// Full-barrier swap of the neuron state generations.
    pub fn swap_state_generations(&mut self) {
        core::mem::swap(&mut self.current, &mut self.next);
    }

    /// Full-barrier swap of the weight generations (only meaningful when
    /// plasticity wrote the next generation this tick).
    pub fn swap_weight_generations(&mut self) {
        core::mem::swap(&mut self.current_weights, &mut self.next_weights);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evomind_npu_neural::types::NeuronClass;
    use evomind_npu_neural::ActivationFunction;

    fn params_with_ranges(ranges: &[(u32, u32)]) -> NeuronParams {
        let mut neurons = NeuronParams::with_capacity(ranges.len());
        for (slot, &(start, count)) in ranges.iter().enumerate() {
            neurons.push(
                NeuronId::universal(NeuronRole::Hidden, slot as i32),
                NeuronClass::Instantaneous,
                ActivationFunction::Linear,
                1.0,
                1.0,
                1.0,
                1.0,
                start,
                count,
            );
        }
        neurons
    }

    fn synapses_toward(targets: &[u32]) -> SynapseParams {
        let mut synapses = SynapseParams::with_capacity(targets.len());
        for &target in targets {
            synapses.push(0, target, true, 0.0, 0.0, 0.0, 0.0, 0.0);
        }
        synapses
    }

    #[test]
    fn test_valid_partition_accepted() {
        let neurons = params_with_ranges(&[(0, 2), (2, 1), (3, 0)]);
        let synapses = synapses_toward(&[0, 0, 1]);
        let network =
            CompiledNetwork::new(neurons, synapses, vec![0.0; 3], vec![0.5; 3]).unwrap();
        assert_eq!(network.neurons().count, 3);
    }

    #[test]
    fn test_overlapping_ranges_rejected() {
        let neurons = params_with_ranges(&[(0, 2), (1, 1)]);
        let synapses = synapses_toward(&[0, 0]);
        let err = CompiledNetwork::new(neurons, synapses, vec![0.0; 2], vec![0.5; 2]).unwrap_err();
        assert!(matches!(err, RuntimeError::Layout(_)));
    }

    #[test]
    fn test_gapped_ranges_rejected() {
        let neurons = params_with_ranges(&[(0, 1), (2, 1)]);
        let synapses = synapses_toward(&[0, 0, 1]);
        let err = CompiledNetwork::new(neurons, synapses, vec![0.0; 2], vec![0.5; 3]).unwrap_err();
        assert!(matches!(err, RuntimeError::Layout(_)));
    }

    #[test]
    fn test_set_sensor_rejects_role_mismatch() {
        let neurons = params_with_ranges(&[(0, 0)]);
        let mut network =
            CompiledNetwork::new(neurons, SynapseParams::default(), vec![0.0], vec![]).unwrap();
        let id = NeuronId::universal(NeuronRole::Hidden, 0);
        let err = network.set_sensor(id, 1.0).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Neural(NeuralError::RoleMismatch { .. })
        ));
    }

    #[test]
    fn test_generation_swap_exposes_next_state() {
        let neurons = params_with_ranges(&[(0, 0)]);
        let mut network =
            CompiledNetwork::new(neurons, SynapseParams::default(), vec![0.0], vec![]).unwrap();
        network.tick_buffers().next.activations[0] = 0.9;
        assert_eq!(network.state().activations[0], 0.0);
        network.swap_state_generations();
        assert_eq!(network.state().activations[0], 0.9);
    }
}
