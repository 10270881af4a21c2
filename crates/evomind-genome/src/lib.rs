// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Evomind Genome — Genotype Operations

Handles all **genotype** operations for evomind controllers:

- Identity scheme (stable neuron/connection identities)
- Genome model (gene collections + derived indices)
- Mutation operators (parameter perturbation, topology growth)
- Reproduction (identity-aligned crossover, structural distance)
- Population checkpointing (genomes + id counters)

## Separation of Concerns

```text
evomind-genome (Genotype)     evomind-neurogenesis (Phenotype)
─────────────────────────     ────────────────────────────────
│ Identity allocation   │  →  │ Transcription (compile)       │
│ Gene collections      │     │ Flat buffer layout            │
│ Mutation / crossover  │     │ Range partition               │
└───────────────────────┘     └───────────────────────────────┘
```

The genome is a graph-shaped description of a network. Nothing here
executes; execution belongs to the NPU crates, which only ever see the
flat buffers produced by transcription.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod allocator;
pub mod checkpoint;
pub mod genes;
pub mod genome;
pub mod mutation;
pub mod reproduction;

mod error;
mod random;

// Re-export commonly used types
pub use allocator::IdAllocator;
pub use checkpoint::{CheckpointError, PopulationCheckpoint};
pub use error::{GenomeError, GenomeResult};
pub use genes::{ConnectionGene, HebbianCoefficients, NodeGene};
pub use genome::Genome;
pub use mutation::{mutate, MutationConfig, SourcePool};
pub use reproduction::{distance, reproduce, RE_ENABLE_PROBABILITY};

// Identity types live in the platform-agnostic neural crate; re-export them
// so genotype-side callers need only this crate.
pub use evomind_npu_neural::types::{ConnectionId, NeuronId, NeuronRole};
