// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Evomind Neurogenesis
//!
//! Transcription of a genome into its executable phenotype: a pure
//! function from gene lists to the flat neuron/synapse buffers the NPU
//! executes. Built once at agent birth; thereafter the buffers are mutated
//! only by the execution engine.
//!
//! ## Layout
//!
//! 1. Every node gene gets a dense index in declaration order.
//! 2. Connection genes are grouped by destination.
//! 3. Each destination's group is laid out contiguously in the synapse
//!    buffer (groups in dense-index order, declaration order within a
//!    group), and the destination's `(start, count)` range is recorded.
//! 4. Neuron records are populated from their node genes, synapse records
//!    from their connection genes. A node with no incoming connections
//!    gets an empty range.
//!
//! The ranges partition the synapse buffer with no overlap and no gaps —
//! that partition is what makes the engine's lock-free parallel writes
//! sound, so a grouping mismatch aborts compilation instead of producing a
//! corrupt network.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use ahash::AHashMap;
use evomind_genome::Genome;
use evomind_npu_neural::types::NeuronId;
use evomind_npu_runtime::{CompiledNetwork, NeuronParams, RuntimeError, SynapseParams};
use tracing::debug;

/// Errors raised during transcription.
///
/// All of these indicate a defect upstream of `compile` — a genome that
/// violates its own invariants or a layout bug in this crate — and abort
/// the compilation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NeurogenesisError {
    #[error(
        "Transcription consistency violation: synapse {synapse} laid out under neuron {group} but targets {target}"
    )]
    Consistency {
        synapse: usize,
        group: usize,
        target: usize,
    },

    #[error("Transcription found no node gene for {0}")]
    MissingNode(NeuronId),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Compile a genome into its executable network.
///
/// Pure: the genome is only read, and the same genome always produces the
/// same layout. Disabled connection genes compile to disabled synapses —
/// historical structure is preserved through transcription, it just
/// carries no signal.
pub fn compile(genome: &Genome) -> Result<CompiledNetwork, NeurogenesisError> {
    let node_count = genome.node_count();
    let connection_count = genome.connection_count();

    // Dense index per node gene, declaration order.
    let index_of: AHashMap<NeuronId, usize> = genome
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, gene)| (gene.id, index))
        .collect();

    // Group connection genes by destination index.
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (position, gene) in genome.connections().iter().enumerate() {
        let target = *index_of
            .get(&gene.target)
            .ok_or(NeurogenesisError::MissingNode(gene.target))?;
        groups[target].push(position);
    }

    // Concatenate groups in dense-index order; record each range.
    let mut neurons = NeuronParams::with_capacity(node_count);
    let mut synapses = SynapseParams::with_capacity(connection_count);
    let mut weights = Vec::with_capacity(connection_count);
    let mut start = 0u32;

    for (index, node) in genome.nodes().iter().enumerate() {
        let group = &groups[index];
        for &position in group {
            let gene = &genome.connections()[position];
            let target = *index_of
                .get(&gene.target)
                .ok_or(NeurogenesisError::MissingNode(gene.target))?;
            if target != index {
                return Err(NeurogenesisError::Consistency {
                    synapse: position,
                    group: index,
                    target,
                });
            }
            let source = *index_of
                .get(&gene.source)
                .ok_or(NeurogenesisError::MissingNode(gene.source))?;

            synapses.push(
                source as u32,
                index as u32,
                gene.enabled,
                gene.hebbian.a,
                gene.hebbian.b,
                gene.hebbian.c,
                gene.hebbian.d,
                gene.hebbian.learning_rate,
            );
            weights.push(gene.weight);
        }

        neurons.push(
            node.id,
            node.class,
            node.activation,
            node.alpha,
            node.alpha2,
            node.time_constant,
            node.gain,
            start,
            group.len() as u32,
        );
        start += group.len() as u32;
    }

    let biases: Vec<f32> = genome.nodes().iter().map(|gene| gene.bias).collect();
    let network = CompiledNetwork::new(neurons, synapses, biases, weights)?;

    debug!(
        neurons = node_count,
        synapses = connection_count,
        motors = network.motor_indices().len(),
        "compiled genome into executable network"
    );
    Ok(network)
}
