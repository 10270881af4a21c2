// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Hebbian plasticity rules.
//!
//! Both rules run inside the per-neuron update and only ever write the
//! neuron's own next-generation slots: weight deltas land in the neuron's
//! exclusive incoming-weight range, bias deltas in its own bias slot. The
//! current generation being read this tick is never touched.

use crate::TickPass;
use core::ops::Range;
use evomind_npu_neural::sanitize;
use evomind_npu_neural::types::LearningRule;

/// Apply the configured rule for one destination neuron and return its
/// next-generation bias.
///
/// - **Correlational**: per enabled synapse,
///   `dw = learning_rate * (A*pre*post + B*pre + C*post + D)` using this
///   tick's pre-synaptic (current source activation) and post-synaptic
///   (just-computed destination activation) values.
/// - **Bias-adaptation**: per enabled synapse,
///   `bias += learning_rate * (post - 0.5) * 0.5`, independent of synapse
///   weights. The weight branch of this rule is a documented stub and the
///   weights keep their carried-over values.
#[inline]
pub(crate) fn apply_plasticity(
    pass: &TickPass<'_>,
    range: Range<usize>,
    activation: f32,
    bias: f32,
    next_weights: &mut [f32],
) -> f32 {
    match pass.options.plasticity {
        None => bias,
        Some(LearningRule::Correlational) => {
            for (offset, synapse) in range.enumerate() {
                if !pass.synapses.enabled[synapse] {
                    continue;
                }
                let pre = pass.current.activations[pass.synapses.sources[synapse] as usize];
                let post = activation;
                let delta = pass.synapses.learning_rates[synapse]
                    * (pass.synapses.coeff_a[synapse] * pre * post
                        + pass.synapses.coeff_b[synapse] * pre
                        + pass.synapses.coeff_c[synapse] * post
                        + pass.synapses.coeff_d[synapse]);
                next_weights[offset] = sanitize(next_weights[offset] + delta, "synaptic weight");
            }
            bias
        }
        Some(LearningRule::BiasAdaptation) => {
            let mut adapted = bias;
            for synapse in range {
                if !pass.synapses.enabled[synapse] {
                    continue;
                }
                adapted += pass.synapses.learning_rates[synapse] * (activation - 0.5) * 0.5;
            }
            sanitize(adapted, "adapted bias")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{TickEngine, TickOptions};
    use evomind_npu_neural::types::{LearningRule, NeuronClass, NeuronId, NeuronRole};
    use evomind_npu_neural::ActivationFunction;
    use evomind_npu_runtime::{CompiledNetwork, NeuronParams, SynapseParams};

    /// One sensor feeding one motor through a single plastic synapse.
    fn plastic_network(learning_rate: f32, coeffs: [f32; 4]) -> CompiledNetwork {
        let mut neurons = NeuronParams::with_capacity(2);
        neurons.push(
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
        neurons.push(
            NeuronId::universal(NeuronRole::Motor, 0),
            NeuronClass::Instantaneous,
            ActivationFunction::Linear,
            1.0,
            1.0,
            1.0,
            1.0,
            0,
            1,
        );
        let mut synapses = SynapseParams::with_capacity(1);
        let [a, b, c, d] = coeffs;
        synapses.push(0, 1, true, a, b, c, d, learning_rate);
        CompiledNetwork::new(neurons, synapses, vec![0.0, 0.25], vec![0.5]).unwrap()
    }

    #[test]
    fn test_correlational_rule_updates_weight() {
        let engine = TickEngine::new(TickOptions {
            plasticity: Some(LearningRule::Correlational),
            ..TickOptions::default()
        })
        .unwrap();
        let mut network = plastic_network(0.1, [1.0, 0.5, 0.25, 0.125]);
        let sensor = NeuronId::universal(NeuronRole::Sensor, 0);

        network.set_sensor(sensor, 0.8).unwrap();
        engine.tick(&mut network);

        // post = bias + w*pre = 0.25 + 0.5*0.8 = 0.65
        // dw = 0.1 * (1.0*0.8*0.65 + 0.5*0.8 + 0.25*0.65 + 0.125)
        let post: f32 = 0.25 + 0.5 * 0.8;
        let expected: f32 = 0.5 + 0.1 * (0.8 * post + 0.5 * 0.8 + 0.25 * post + 0.125);
        let weight = network.weights().weights[0];
        assert!(
            (weight - expected).abs() < 1e-6,
            "weight {} expected {}",
            weight,
            expected
        );
        // Bias is untouched by the correlational rule.
        assert_eq!(network.state().biases[1], 0.25);
    }

    #[test]
    fn test_correlational_rule_reads_old_weights_all_tick() {
        // Two ticks with the same input: the second tick's activation must
        // be computed against the first tick's updated weight, not a
        // partially updated one.
        let engine = TickEngine::new(TickOptions {
            plasticity: Some(LearningRule::Correlational),
            ..TickOptions::default()
        })
        .unwrap();
        let mut network = plastic_network(0.05, [1.0, 0.0, 0.0, 0.0]);
        let sensor = NeuronId::universal(NeuronRole::Sensor, 0);
        let motor = NeuronId::universal(NeuronRole::Motor, 0);

        network.set_sensor(sensor, 1.0).unwrap();
        engine.tick(&mut network);
        let w1 = network.weights().weights[0];

        network.set_sensor(sensor, 1.0).unwrap();
        engine.tick(&mut network);
        let output = network.motor_activation(motor).unwrap();
        assert!((output - (0.25 + w1)).abs() < 1e-6);
    }

    #[test]
    fn test_bias_adaptation_rule_moves_bias_and_not_weights() {
        let engine = TickEngine::new(TickOptions {
            plasticity: Some(LearningRule::BiasAdaptation),
            ..TickOptions::default()
        })
        .unwrap();
        let mut network = plastic_network(0.2, [1.0, 1.0, 1.0, 1.0]);
        let sensor = NeuronId::universal(NeuronRole::Sensor, 0);

        network.set_sensor(sensor, 1.0).unwrap();
        engine.tick(&mut network);

        // post = 0.25 + 0.5*1.0 = 0.75; bias += 0.2 * (0.75-0.5) * 0.5
        let expected_bias: f32 = 0.25 + 0.2 * 0.25 * 0.5;
        assert!((network.state().biases[1] - expected_bias).abs() < 1e-6);
        // Weight branch is a stub: weights unchanged.
        assert_eq!(network.weights().weights[0], 0.5);
    }

    #[test]
    fn test_disabled_plasticity_keeps_weights_and_biases() {
        let engine = TickEngine::new(TickOptions::default()).unwrap();
        let mut network = plastic_network(0.5, [1.0, 1.0, 1.0, 1.0]);
        let sensor = NeuronId::universal(NeuronRole::Sensor, 0);

        for _ in 0..3 {
            network.set_sensor(sensor, 1.0).unwrap();
            engine.tick(&mut network);
        }
        assert_eq!(network.weights().weights[0], 0.5);
        assert_eq!(network.state().biases[1], 0.25);
    }

    #[test]
    fn test_disabled_synapse_does_not_learn() {
        let template = plastic_network(0.5, [1.0, 1.0, 1.0, 1.0]);
        let mut synapses = template.synapses().clone();
        synapses.enabled[0] = false;
        let mut network = CompiledNetwork::new(
            template.neurons().clone(),
            synapses,
            vec![0.0, 0.25],
            vec![0.5],
        )
        .unwrap();

        let engine = TickEngine::new(TickOptions {
            plasticity: Some(LearningRule::Correlational),
            ..TickOptions::default()
        })
        .unwrap();
        let sensor = NeuronId::universal(NeuronRole::Sensor, 0);
        network.set_sensor(sensor, 1.0).unwrap();
        engine.tick(&mut network);

        assert_eq!(network.weights().weights[0], 0.5);
    }
}
