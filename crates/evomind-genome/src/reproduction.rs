// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Crossover and genotype distance.
//!
//! Crossover aligns genes by identity, not by position: a node gene is "the
//! same gene" in both parents when its NeuronId matches, a connection gene
//! when its ConnectionId matches. Offspring therefore carry the union of
//! both parents' gene identities, with shared identities resolved by a coin
//! flip between the two alleles.

use crate::error::GenomeResult;
use crate::genome::Genome;
use rand::Rng;

/// Probability that a disabled connection gene is re-enabled in an
/// offspring, letting historically-disabled structure reappear rather than
/// staying permanently dormant.
pub const RE_ENABLE_PROBABILITY: f32 = 0.25;

/// Produce two offspring from two parents.
///
/// The offspring are built by two independent runs of the same procedure,
/// so every allele coin flip and every re-enable draw is redrawn per
/// offspring.
pub fn reproduce(
    parent1: &Genome,
    parent2: &Genome,
    rng: &mut impl Rng,
) -> GenomeResult<(Genome, Genome)> {
    let first = make_offspring(parent1, parent2, rng)?;
    let second = make_offspring(parent1, parent2, rng)?;
    Ok((first, second))
}

fn make_offspring(
    parent1: &Genome,
    parent2: &Genome,
    rng: &mut impl Rng,
) -> GenomeResult<Genome> {
    let mut child = Genome::new();

    // Pass 1: parent1's node genes, verbatim.
    for gene in parent1.nodes() {
        child.add_node(*gene)?;
    }
    // Pass 2: parent2's node genes — coin-flip shared identities, append
    // the rest. The child's node set becomes the union of both parents'.
    for gene in parent2.nodes() {
        match child.position_of_node(gene.id) {
            Some(position) => {
                if rng.gen::<bool>() {
                    child.replace_node(position, *gene);
                }
            }
            None => child.add_node(*gene)?,
        }
    }

    // Same two passes for connection genes, keyed by ConnectionId. All
    // endpoints resolve because the node union is already in place.
    for gene in parent1.connections() {
        child.add_connection(*gene)?;
    }
    for gene in parent2.connections() {
        match child.position_of_connection(gene.id) {
            Some(position) => {
                if rng.gen::<bool>() {
                    child.replace_connection(position, *gene);
                }
            }
            None => child.add_connection(*gene)?,
        }
    }

    // Repair pass: independently re-enable disabled structure.
    for position in 0..child.connection_count() {
        if !child.connections()[position].enabled && rng.gen::<f32>() < RE_ENABLE_PROBABILITY {
            child.set_connection_enabled(position, true);
        }
    }

    Ok(child)
}

/// Structural (topological) distance: the number of node-gene NeuronIds and
/// connection-gene ConnectionIds present in exactly one of the two genomes.
/// Weight differences do not contribute.
pub fn distance(a: &Genome, b: &Genome) -> usize {
    let nodes = a
        .nodes()
        .iter()
        .filter(|gene| !b.contains_node(gene.id))
        .count()
        + b.nodes()
            .iter()
            .filter(|gene| !a.contains_node(gene.id))
            .count();
    let connections = a
        .connections()
        .iter()
        .filter(|gene| !b.contains_connection(gene.id))
        .count()
        + b.connections()
            .iter()
            .filter(|gene| !a.contains_connection(gene.id))
            .count();
    nodes + connections
}
