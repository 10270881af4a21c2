// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Mutation operators.
//!
//! Each mutation category is gated by one Bernoulli draw per [`mutate`]
//! call against its configured rate. Once a parameter category is gated in
//! it applies to every gene in the genome; topology growth applies at most
//! once per call (one connection added, one node added).
//!
//! Operators that need a resource the genome does not have — add-node with
//! zero enabled connections — log a warning and return "no change": an
//! empty-connection genome is a valid, if unproductive, evolutionary state.

use crate::allocator::IdAllocator;
use crate::error::GenomeResult;
use crate::genes::{ConnectionGene, HebbianCoefficients, NodeGene};
use crate::genome::Genome;
use crate::random::gaussian;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Pool the add-connection operator draws its source endpoint from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePool {
    /// Any neuron, motors included.
    All,
    /// Sensor and hidden neurons only.
    SensorHidden,
}

/// Per-category mutation rates and perturbation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Probability that connection weights are perturbed this call.
    pub weight_rate: f32,
    /// Probability that node biases are perturbed this call.
    pub bias_rate: f32,
    /// Probability that time constants are perturbed this call.
    pub time_constant_rate: f32,
    /// Probability that gains are perturbed this call.
    pub gain_rate: f32,
    /// Probability that Hebbian coefficients are perturbed this call.
    pub hebbian_rate: f32,
    /// Probability of growing one new connection this call.
    pub add_connection_rate: f32,
    /// Probability of splitting one connection with a new node this call.
    pub add_node_rate: f32,
    /// Probability of disabling one enabled connection this call.
    /// Off by default: disabling without compensation loses structure.
    pub disable_connection_rate: f32,
    /// Within a gated-in category: probability a gene's value is nudged by
    /// a Gaussian delta rather than redrawn fresh.
    pub perturb_prob: f32,
    /// Standard deviation of the Gaussian delta (Box–Muller draw; the
    /// delta itself is clamped to [-1, 1] before being added).
    pub perturb_stddev: f32,
    /// Lower bound of the initial-weight range used for fresh redraws.
    pub weight_min: f32,
    /// Upper bound of the initial-weight range used for fresh redraws.
    pub weight_max: f32,
    /// Upper bound for freshly drawn Hebbian learning rates.
    pub learning_rate_max: f32,
    /// Source pool for the add-connection operator.
    pub source_pool: SourcePool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            weight_rate: 0.8,
            bias_rate: 0.7,
            time_constant_rate: 0.3,
            gain_rate: 0.3,
            hebbian_rate: 0.3,
            add_connection_rate: 0.08,
            add_node_rate: 0.05,
            disable_connection_rate: 0.0,
            perturb_prob: 0.9,
            perturb_stddev: 0.2,
            weight_min: -1.0,
            weight_max: 1.0,
            learning_rate_max: 0.1,
            source_pool: SourcePool::SensorHidden,
        }
    }
}

impl MutationConfig {
    fn gate(&self, rate: f32, rng: &mut impl Rng) -> bool {
        rng.gen::<f32>() < rate
    }

    /// Nudge-or-redraw step applied to one gene parameter.
    fn perturb(&self, value: f32, rng: &mut impl Rng) -> f32 {
        if rng.gen::<f32>() < self.perturb_prob {
            value + gaussian(rng, self.perturb_stddev).clamp(-1.0, 1.0)
        } else {
            rng.gen_range(self.weight_min..=self.weight_max)
        }
    }
}

/// Apply one round of mutation to `genome`.
///
/// Existing gene identities are never changed: parameter categories rewrite
/// values in place and topology growth only ever adds genes (a split
/// connection is disabled, not removed).
pub fn mutate(
    genome: &mut Genome,
    allocator: &mut IdAllocator,
    config: &MutationConfig,
    rng: &mut impl Rng,
) -> GenomeResult<()> {
    if config.gate(config.weight_rate, rng) {
        for gene in genome.connections_mut() {
            gene.weight = config.perturb(gene.weight, rng);
        }
    }

    if config.gate(config.bias_rate, rng) {
        for gene in genome.nodes_mut() {
            gene.bias = config.perturb(gene.bias, rng);
        }
    }

    if config.gate(config.time_constant_rate, rng) {
        for gene in genome.nodes_mut() {
            gene.time_constant = config.perturb(gene.time_constant, rng).max(0.0);
        }
    }

    if config.gate(config.gain_rate, rng) {
        for gene in genome.nodes_mut() {
            gene.gain = config.perturb(gene.gain, rng).max(0.0);
        }
    }

    if config.gate(config.hebbian_rate, rng) {
        for gene in genome.connections_mut() {
            let h = &mut gene.hebbian;
            h.a = config.perturb(h.a, rng);
            h.b = config.perturb(h.b, rng);
            h.c = config.perturb(h.c, rng);
            h.d = config.perturb(h.d, rng);
            h.learning_rate = config.perturb(h.learning_rate, rng);
        }
    }

    if config.gate(config.add_connection_rate, rng) {
        add_connection_mutation(genome, allocator, config, rng)?;
    }

    if config.gate(config.add_node_rate, rng) {
        add_node_mutation(genome, allocator, config, rng)?;
    }

    if config.gate(config.disable_connection_rate, rng) {
        if let Some(position) = genome.random_enabled_connection(rng) {
            genome.set_connection_enabled(position, false);
        }
    }

    Ok(())
}

/// Grow one connection: source from the configured pool, destination from
/// motor+hidden, fresh weight and fresh Hebbian coefficients. Duplicate
/// parallel edges between the same pair are permitted; no cycle check is
/// performed.
fn add_connection_mutation(
    genome: &mut Genome,
    allocator: &mut IdAllocator,
    config: &MutationConfig,
    rng: &mut impl Rng,
) -> GenomeResult<()> {
    let source_position = match config.source_pool {
        SourcePool::All => {
            if genome.node_count() == 0 {
                warn!("add-connection mutation skipped: genome has no nodes");
                return Ok(());
            }
            rng.gen_range(0..genome.node_count())
        }
        SourcePool::SensorHidden => {
            let pool = genome.sensor_hidden_positions();
            if pool.is_empty() {
                warn!("add-connection mutation skipped: no sensor or hidden nodes");
                return Ok(());
            }
            pool[rng.gen_range(0..pool.len())]
        }
    };

    let destinations = genome.motor_hidden_positions();
    if destinations.is_empty() {
        warn!("add-connection mutation skipped: no motor or hidden nodes");
        return Ok(());
    }
    let target_position = destinations[rng.gen_range(0..destinations.len())];

    let source = genome.nodes()[source_position].id;
    let target = genome.nodes()[target_position].id;
    let gene = ConnectionGene::new(
        allocator.next_connection_id(),
        source,
        target,
        rng.gen_range(config.weight_min..=config.weight_max),
        HebbianCoefficients::random(rng, config),
    );
    genome.add_connection(gene)
}

/// Split one enabled connection with a new hidden node.
///
/// The split connection is disabled, never removed, preserving historical
/// structure. The incoming half carries weight 1.0 and the outgoing half
/// inherits the split connection's weight and Hebbian coefficients, so with
/// the new node's identity activation the split preserves the connection's
/// net function at the moment it happens.
fn add_node_mutation(
    genome: &mut Genome,
    allocator: &mut IdAllocator,
    config: &MutationConfig,
    rng: &mut impl Rng,
) -> GenomeResult<()> {
    let Some(position) = genome.random_enabled_connection(rng) else {
        warn!("add-node mutation skipped: genome has no enabled connections");
        return Ok(());
    };

    let split = genome.connections()[position];
    genome.set_connection_enabled(position, false);

    let source_viewer = genome.node(split.source)?.viewer_position;
    let target_viewer = genome.node(split.target)?.viewer_position;
    let midpoint = [
        (source_viewer[0] + target_viewer[0]) * 0.5,
        (source_viewer[1] + target_viewer[1]) * 0.5,
        (source_viewer[2] + target_viewer[2]) * 0.5,
    ];

    let node = NodeGene::split(allocator.next_grown_neuron_id(), midpoint);
    let node_id = node.id;
    genome.add_node(node)?;

    genome.add_connection(ConnectionGene::new(
        allocator.next_connection_id(),
        split.source,
        node_id,
        1.0,
        HebbianCoefficients::random(rng, config),
    ))?;
    genome.add_connection(ConnectionGene {
        id: allocator.next_connection_id(),
        source: node_id,
        target: split.target,
        weight: split.weight,
        enabled: true,
        hebbian: split.hebbian,
    })?;

    Ok(())
}
