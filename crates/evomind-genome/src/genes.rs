// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Node and connection genes.
//!
//! Genes are plain value types: reproduction clones them by value and
//! mutation always operates on an owned copy inside one genome, so a gene
//! shared by ancestry never aliases across genomes.

use crate::mutation::MutationConfig;
use evomind_npu_neural::types::{ConnectionId, NeuronClass, NeuronId};
use evomind_npu_neural::ActivationFunction;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The five Hebbian coefficients carried by every connection gene.
///
/// Under the correlational rule the weight delta per tick is
/// `learning_rate * (a*pre*post + b*pre + c*post + d)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HebbianCoefficients {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub learning_rate: f32,
}

impl HebbianCoefficients {
    /// Inert coefficients: no weight change under either rule.
    pub fn zero() -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            learning_rate: 0.0,
        }
    }

    /// Fresh random coefficients for a newly created connection gene.
    pub fn random(rng: &mut impl Rng, config: &MutationConfig) -> Self {
        Self {
            a: rng.gen_range(config.weight_min..=config.weight_max),
            b: rng.gen_range(config.weight_min..=config.weight_max),
            c: rng.gen_range(config.weight_min..=config.weight_max),
            d: rng.gen_range(config.weight_min..=config.weight_max),
            learning_rate: rng.gen_range(0.0..=config.learning_rate_max),
        }
    }
}

/// A single neuron gene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeGene {
    pub id: NeuronId,
    pub bias: f32,
    pub time_constant: f32,
    pub gain: f32,
    /// Slope parameter consumed by the activation function.
    pub alpha: f32,
    /// Secondary slope parameter; carried through transcription unchanged.
    pub alpha2: f32,
    pub activation: ActivationFunction,
    pub class: NeuronClass,
    /// Layout-only position for viewers; no effect on behavior.
    pub viewer_position: [f32; 3],
}

impl NodeGene {
    /// Gene with neutral dynamics parameters.
    pub fn new(id: NeuronId, activation: ActivationFunction) -> Self {
        Self {
            id,
            bias: 0.0,
            time_constant: 1.0,
            gain: 1.0,
            alpha: 1.0,
            alpha2: 1.0,
            activation,
            class: NeuronClass::Instantaneous,
            viewer_position: [0.0; 3],
        }
    }

    /// Hidden node created by the add-node split: identity activation and
    /// zero bias so the split preserves the original connection's function
    /// at the moment it happens.
    pub fn split(id: NeuronId, viewer_position: [f32; 3]) -> Self {
        Self {
            viewer_position,
            ..Self::new(id, ActivationFunction::IDENTITY)
        }
    }
}

/// A single connection gene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionGene {
    pub id: ConnectionId,
    pub source: NeuronId,
    pub target: NeuronId,
    pub weight: f32,
    /// Disabled genes stay in the genome (historical structure is never
    /// removed) but compile to inert synapses.
    pub enabled: bool,
    pub hebbian: HebbianCoefficients,
}

impl ConnectionGene {
    pub fn new(
        id: ConnectionId,
        source: NeuronId,
        target: NeuronId,
        weight: f32,
        hebbian: HebbianCoefficients,
    ) -> Self {
        Self {
            id,
            source,
            target,
            weight,
            enabled: true,
            hebbian,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evomind_npu_neural::types::NeuronRole;

    #[test]
    fn test_split_node_is_identity() {
        let gene = NodeGene::split(NeuronId::grown(0), [1.0, 2.0, 3.0]);
        assert_eq!(gene.activation, ActivationFunction::Linear);
        assert_eq!(gene.bias, 0.0);
        assert_eq!(gene.alpha, 1.0);
        assert_eq!(gene.viewer_position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_connection_gene_starts_enabled() {
        let gene = ConnectionGene::new(
            ConnectionId(0),
            NeuronId::universal(NeuronRole::Sensor, 0),
            NeuronId::universal(NeuronRole::Motor, 0),
            0.5,
            HebbianCoefficients::zero(),
        );
        assert!(gene.enabled);
    }
}
