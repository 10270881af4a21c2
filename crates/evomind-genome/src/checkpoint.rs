// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Population checkpointing.
//!
//! The population collaborator persists genomes across process restarts.
//! The id allocator's counters are process-wide state and must travel with
//! every saved population — restoring genomes without them would let future
//! allocations collide with checkpointed ids. The JSON representation
//! round-trips the full genome model losslessly, including disabled
//! connections.

use crate::allocator::IdAllocator;
use crate::genome::Genome;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Errors raised while saving or restoring a population checkpoint.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("Checkpoint I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Checkpoint serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A saved population: every genome plus the allocator counters they were
/// evolved against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationCheckpoint {
    pub genomes: Vec<Genome>,
    pub allocator: IdAllocator,
}

impl PopulationCheckpoint {
    pub fn new(genomes: Vec<Genome>, allocator: IdAllocator) -> Self {
        Self { genomes, allocator }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Genome indices are rebuilt during deserialization; a checkpoint that
    /// violates genome invariants fails here rather than producing a
    /// corrupt population.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), CheckpointError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CheckpointError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genes::{ConnectionGene, HebbianCoefficients, NodeGene};
    use crate::mutation::{mutate, MutationConfig};
    use evomind_npu_neural::types::{NeuronId, NeuronRole};
    use evomind_npu_neural::ActivationFunction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population() -> (Vec<Genome>, IdAllocator) {
        let mut allocator = IdAllocator::new();
        let mut rng = StdRng::seed_from_u64(31);
        let config = MutationConfig {
            add_connection_rate: 0.4,
            add_node_rate: 0.4,
            ..MutationConfig::default()
        };

        let mut genomes = Vec::new();
        for slot in 0..3 {
            let mut genome = Genome::new();
            let s = NeuronId::universal(NeuronRole::Sensor, slot);
            let m = NeuronId::universal(NeuronRole::Motor, slot);
            genome
                .add_node(NodeGene::new(s, ActivationFunction::Linear))
                .unwrap();
            genome
                .add_node(NodeGene::new(m, ActivationFunction::Sigmoid))
                .unwrap();
            genome
                .add_connection(ConnectionGene::new(
                    allocator.next_connection_id(),
                    s,
                    m,
                    0.3,
                    HebbianCoefficients::zero(),
                ))
                .unwrap();
            for _ in 0..5 {
                mutate(&mut genome, &mut allocator, &config, &mut rng).unwrap();
            }
            genomes.push(genome);
        }
        (genomes, allocator)
    }

    #[test]
    fn test_checkpoint_round_trip_is_lossless() {
        let (genomes, allocator) = population();
        let checkpoint = PopulationCheckpoint::new(genomes, allocator);

        let json = checkpoint.to_json().unwrap();
        let restored = PopulationCheckpoint::from_json(&json).unwrap();

        assert_eq!(restored.allocator, checkpoint.allocator);
        assert_eq!(restored.genomes.len(), checkpoint.genomes.len());
        for (restored, original) in restored.genomes.iter().zip(&checkpoint.genomes) {
            restored.validate().unwrap();
            assert_eq!(restored.nodes(), original.nodes());
            assert_eq!(restored.connections(), original.connections());
        }
    }

    #[test]
    fn test_restored_allocator_never_collides() {
        let (genomes, allocator) = population();
        let json = PopulationCheckpoint::new(genomes, allocator)
            .to_json()
            .unwrap();
        let mut restored = PopulationCheckpoint::from_json(&json).unwrap();

        let fresh = restored.allocator.next_connection_id();
        for genome in &restored.genomes {
            assert!(!genome.contains_connection(fresh));
        }
    }

    #[test]
    fn test_checkpoint_file_round_trip() {
        let (genomes, allocator) = population();
        let checkpoint = PopulationCheckpoint::new(genomes, allocator);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("population.json");
        checkpoint.save_to_file(&path).unwrap();
        let restored = PopulationCheckpoint::load_from_file(&path).unwrap();

        assert_eq!(restored.allocator, checkpoint.allocator);
        assert_eq!(restored.genomes.len(), checkpoint.genomes.len());
    }
}
