// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Evomind — Evolvable Neural Controllers for Agent Populations
//!
//! Evomind evolves populations of agents whose behavior is driven by small,
//! structurally-variable neural controllers. The crate covers the whole
//! controller lifecycle:
//!
//! - **Genotype** (`evomind-genome`): graph-shaped genomes with stable,
//!   order-independent gene identities, mutation operators, and
//!   identity-aligned crossover.
//! - **Transcription** (`evomind-neurogenesis`): deterministic compilation
//!   of a genome into flat, executable buffers.
//! - **Execution** (`evomind-npu-*`): the per-tick Jacobi update of neuron
//!   activations with optional Hebbian plasticity.
//!
//! ## Quick Start
//!
//! ```rust
//! use evomind::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Build a minimal genome: one sensor wired to one motor.
//! let mut allocator = IdAllocator::new();
//! let sensor = NeuronId::universal(NeuronRole::Sensor, 0);
//! let motor = NeuronId::universal(NeuronRole::Motor, 0);
//!
//! let mut genome = Genome::new();
//! genome.add_node(NodeGene::new(sensor, ActivationFunction::Linear))?;
//! genome.add_node(NodeGene::new(motor, ActivationFunction::Tanh))?;
//! genome.add_connection(ConnectionGene::new(
//!     allocator.next_connection_id(),
//!     sensor,
//!     motor,
//!     0.8,
//!     HebbianCoefficients::zero(),
//! ))?;
//!
//! // Evolve it.
//! let mut rng = rand::thread_rng();
//! mutate(&mut genome, &mut allocator, &MutationConfig::default(), &mut rng)?;
//!
//! // Run it: sense -> think -> act.
//! let mut mind = Mind::neural(&genome, &EvomindConfig::default())?;
//! mind.sense(sensor, 0.5)?;
//! mind.think()?;
//! let _command = mind.act(motor)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Collaborator Boundaries
//!
//! Bodies, physics, rendering, and population-level selection live outside
//! this crate. The sensing collaborator writes sensor activations before
//! each tick; the acting collaborator reads motor activations after it; the
//! population collaborator calls `reproduce`/`mutate`/`distance` and
//! checkpoints genomes together with the [`IdAllocator`] counters.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod controller;

// Subsystem re-exports under short names.
pub use evomind_config as config;
pub use evomind_genome as genome;
pub use evomind_neurogenesis as neurogenesis;
pub use evomind_npu_neural as neural;
pub use evomind_npu_runtime as runtime;
pub use evomind_npu_tick_engine as tick_engine;
pub use evomind_observability as observability;

pub use controller::{Mind, MindError, NeuralMind, RandomMind};

/// Common imports for driving the full controller lifecycle.
pub mod prelude {
    pub use crate::controller::{Mind, MindError};
    pub use evomind_config::{load_config, EvomindConfig};
    pub use evomind_genome::{
        distance, mutate, reproduce, ConnectionGene, Genome, HebbianCoefficients, IdAllocator,
        MutationConfig, NodeGene, PopulationCheckpoint,
    };
    pub use evomind_neurogenesis::compile;
    pub use evomind_npu_neural::types::{
        ConnectionId, LearningRule, NeuronClass, NeuronId, NeuronRole,
    };
    pub use evomind_npu_neural::ActivationFunction;
    pub use evomind_npu_runtime::CompiledNetwork;
    pub use evomind_npu_tick_engine::{TickEngine, TickOptions};
}
