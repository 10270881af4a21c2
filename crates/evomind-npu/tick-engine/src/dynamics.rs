// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-neuron dynamics for one tick.
//!
//! This is the hot path. Everything reads from the current generation and
//! writes into the neuron's exclusive slot; the activation-function dispatch
//! is a plain `match` inside `ActivationFunction::apply`, no virtual calls.

use crate::plasticity::apply_plasticity;
use crate::{NeuronSlot, TickPass};
use evomind_npu_neural::types::{NeuronClass, NeuronRole};
use evomind_npu_neural::{integrate_voltage, sanitize};

/// Compute neuron `index`'s next state from the current generation.
///
/// Sensors are not computed here: their activation was written by the
/// sensing collaborator and is propagated untouched, so the generation swap
/// preserves it.
#[inline]
pub(crate) fn update_neuron(index: usize, pass: &TickPass<'_>, slot: NeuronSlot<'_>) {
    let range = pass.neurons.synapse_range(index);

    // Weights carry over unless the plasticity rule rewrites them below.
    slot.weights
        .copy_from_slice(&pass.current_weights.weights[range.clone()]);

    if pass.neurons.roles[index] == NeuronRole::Sensor {
        *slot.activation = pass.current.activations[index];
        *slot.voltage = pass.current.voltages[index];
        *slot.bias = pass.current.biases[index];
        return;
    }

    let mut input_sum = 0.0f32;
    for synapse in range.clone() {
        if pass.synapses.enabled[synapse] {
            let source = pass.synapses.sources[synapse] as usize;
            input_sum +=
                pass.current_weights.weights[synapse] * pass.current.activations[source];
        }
    }
    let input_sum = sanitize(input_sum, "synaptic input sum");

    let bias = pass.current.biases[index];
    let (sum, voltage) = match pass.neurons.classes[index] {
        NeuronClass::Instantaneous => (bias + input_sum, pass.current.voltages[index]),
        NeuronClass::LeakyIntegrator => {
            let voltage = integrate_voltage(
                pass.current.voltages[index],
                input_sum,
                pass.options.tick_period,
                pass.neurons.time_constants[index],
            );
            ((bias + voltage) * pass.neurons.gains[index], voltage)
        }
    };

    let activation = sanitize(
        pass.neurons.activations[index].apply(sanitize(sum, "pre-activation sum"), pass.neurons.alphas[index]),
        "activation",
    );

    *slot.activation = activation;
    *slot.voltage = voltage;
    *slot.bias = apply_plasticity(pass, range, activation, bias, slot.weights);
}
