// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Controller ("mind") variants.
//!
//! An agent's mind is one closed set of variants behind a single
//! `sense → think → act` surface, dispatched by a plain `match` — no
//! per-agent virtual calls. The neural variant owns a compiled network and
//! a tick engine; the random variant is a baseline that ignores its senses
//! and redraws motor commands every think.

use ahash::AHashMap;
use evomind_config::{ConfigError, EvomindConfig};
use evomind_genome::Genome;
use evomind_neurogenesis::{compile, NeurogenesisError};
use evomind_npu_neural::types::NeuronId;
use evomind_npu_runtime::{CompiledNetwork, RuntimeError};
use evomind_npu_tick_engine::{TickEngine, TickEngineError, TickOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Errors raised while building or driving a mind.
#[derive(Debug, thiserror::Error)]
pub enum MindError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Neurogenesis(#[from] NeurogenesisError),

    #[error(transparent)]
    Engine(#[from] TickEngineError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Neural controller: a compiled genome driven by the tick engine.
#[derive(Debug)]
pub struct NeuralMind {
    network: CompiledNetwork,
    engine: TickEngine,
}

impl NeuralMind {
    /// The underlying network, for collaborators that inspect activations
    /// directly.
    pub fn network(&self) -> &CompiledNetwork {
        &self.network
    }
}

/// Random baseline controller: ignores sensors, draws motor commands
/// uniformly from [-1, 1] on every think.
#[derive(Debug)]
pub struct RandomMind {
    outputs: AHashMap<NeuronId, f32>,
    rng: StdRng,
}

/// One agent's controller.
#[derive(Debug)]
pub enum Mind {
    Neural(NeuralMind),
    Random(RandomMind),
}

impl Mind {
    /// Build a neural mind from a genome, with engine and plasticity
    /// settings resolved from configuration.
    pub fn neural(genome: &Genome, config: &EvomindConfig) -> Result<Self, MindError> {
        let network = compile(genome)?;
        let engine = TickEngine::new(TickOptions {
            tick_period: config.engine.tick_period,
            worker_threads: config.engine.worker_threads,
            plasticity: config.plasticity.resolved_rule()?,
        })?;
        Ok(Mind::Neural(NeuralMind { network, engine }))
    }

    /// Build a random baseline mind for the given motor identities.
    pub fn random(motor_ids: impl IntoIterator<Item = NeuronId>, seed: u64) -> Self {
        Mind::Random(RandomMind {
            outputs: motor_ids.into_iter().map(|id| (id, 0.0)).collect(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Write one sensor value. The random baseline accepts and ignores it.
    pub fn sense(&mut self, id: NeuronId, value: f32) -> Result<(), MindError> {
        match self {
            Mind::Neural(mind) => mind.network.set_sensor(id, value)?,
            Mind::Random(_) => {}
        }
        Ok(())
    }

    /// Advance the controller by one step.
    pub fn think(&mut self) -> Result<(), MindError> {
        match self {
            Mind::Neural(mind) => mind.engine.tick(&mut mind.network),
            Mind::Random(mind) => {
                for output in mind.outputs.values_mut() {
                    *output = mind.rng.gen_range(-1.0..=1.0);
                }
            }
        }
        Ok(())
    }

    /// Read one motor command.
    pub fn act(&self, id: NeuronId) -> Result<f32, MindError> {
        match self {
            Mind::Neural(mind) => Ok(mind.network.motor_activation(id)?),
            Mind::Random(mind) => mind
                .outputs
                .get(&id)
                .copied()
                .ok_or(MindError::Runtime(RuntimeError::UnknownNeuron(id))),
        }
    }

    /// The compiled network, when this mind has one.
    pub fn network(&self) -> Option<&CompiledNetwork> {
        match self {
            Mind::Neural(mind) => Some(&mind.network),
            Mind::Random(_) => None,
        }
    }

    /// Motor identities this mind can act through.
    pub fn motor_ids(&self) -> Vec<NeuronId> {
        match self {
            Mind::Neural(mind) => mind
                .network
                .motor_indices()
                .iter()
                .map(|&index| mind.network.neurons().ids[index])
                .collect(),
            Mind::Random(mind) => mind.outputs.keys().copied().collect(),
        }
    }
}

/// Motor identities of a genome, for building a random baseline with the
/// same action surface as a neural mind compiled from it.
pub fn motor_ids_of(genome: &Genome) -> Vec<NeuronId> {
    genome
        .motor_positions()
        .iter()
        .map(|&position| genome.nodes()[position].id)
        .collect()
}
