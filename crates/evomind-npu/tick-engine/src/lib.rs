// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Evomind Tick Engine
//!
//! The concurrent per-tick update of a compiled network.
//!
//! ## Execution model
//!
//! This is a **Jacobi-style** update: every neuron's next state is computed
//! purely from the current-generation buffers, so the result is independent
//! of neuron processing order and of the number of worker threads — running
//! one tick with 1 worker or N workers produces byte-identical next-state
//! buffers.
//!
//! Within a tick, neuron *i* writes only `next[i]` and the synapse-weight
//! slots whose destination is *i*. The destination ranges partition the
//! weight buffer, so concurrent writers never touch the same memory and no
//! locking is needed. After all neurons are processed the engine performs
//! the full-barrier generation swap; that swap is the only synchronization
//! point. A tick is a finite, bounded computation with no cancellation or
//! timeout semantics — the orchestrator may skip ticks but never interrupts
//! one in progress.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod dynamics;
mod plasticity;

use evomind_npu_runtime::{CompiledNetwork, NeuronParams, NeuronState, SynapseParams, SynapseState};
use rayon::prelude::*;
use tracing::warn;

pub use evomind_npu_neural::types::LearningRule;

use dynamics::update_neuron;

/// Engine construction options, typically resolved from the `[engine]` and
/// `[plasticity]` configuration sections.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOptions {
    /// Simulated duration of one tick, fed into the leaky-integrator
    /// update.
    pub tick_period: f32,
    /// Worker threads for the data-parallel neuron update. `1` runs
    /// sequentially on the calling thread; `0` uses the process-wide rayon
    /// pool.
    pub worker_threads: usize,
    /// Plasticity rule, or `None` to run with fixed weights.
    pub plasticity: Option<LearningRule>,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            tick_period: 0.1,
            worker_threads: 0,
            plasticity: None,
        }
    }
}

/// Errors raised at engine construction.
#[derive(Debug, thiserror::Error)]
pub enum TickEngineError {
    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// The per-tick execution engine.
///
/// One engine can drive any number of networks; all mutable state lives in
/// the network's buffers, which stay exclusively owned by their agent.
#[derive(Debug)]
pub struct TickEngine {
    options: TickOptions,
    pool: Option<rayon::ThreadPool>,
}

impl TickEngine {
    pub fn new(options: TickOptions) -> Result<Self, TickEngineError> {
        if options.plasticity == Some(LearningRule::BiasAdaptation) {
            // The weight-update branch of this rule is a documented stub.
            warn!(
                "bias-adaptation rule selected: only biases adapt, synaptic weights stay unchanged"
            );
        }
        let pool = match options.worker_threads {
            0 | 1 => None,
            workers => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()?,
            ),
        };
        Ok(Self { options, pool })
    }

    pub fn options(&self) -> &TickOptions {
        &self.options
    }

    /// Advance the network by one tick.
    ///
    /// Sensor activations written before the call are consumed this tick
    /// and propagated into the next generation; motor activations are
    /// readable after the call returns.
    pub fn tick(&self, network: &mut CompiledNetwork) {
        {
            let buffers = network.tick_buffers();
            let slots = partition_slots(buffers.neurons, buffers.next, buffers.next_weights);
            let pass = TickPass {
                neurons: buffers.neurons,
                synapses: buffers.synapses,
                current: buffers.current,
                current_weights: buffers.current_weights,
                options: &self.options,
            };

            match (self.options.worker_threads, &self.pool) {
                (1, _) => pass.run_sequential(slots),
                (_, Some(pool)) => pool.install(|| pass.run_parallel(slots)),
                (_, None) => pass.run_parallel(slots),
            }
        }

        // Full barrier: every neuron above completed before the swap.
        network.swap_state_generations();
        network.swap_weight_generations();
    }
}

/// Exclusive next-generation slots for one neuron: its own state plus its
/// incoming-synapse weight range.
struct NeuronSlot<'a> {
    activation: &'a mut f32,
    voltage: &'a mut f32,
    bias: &'a mut f32,
    weights: &'a mut [f32],
}

/// Split the next-generation buffers into disjoint per-neuron slots. The
/// weight buffer is carved along the destination ranges, which the runtime
/// validated to partition it in dense-index order.
fn partition_slots<'a>(
    neurons: &NeuronParams,
    next: &'a mut NeuronState,
    next_weights: &'a mut SynapseState,
) -> Vec<NeuronSlot<'a>> {
    let mut remaining: &mut [f32] = &mut next_weights.weights;
    let mut slots = Vec::with_capacity(neurons.count);

    let state = next
        .activations
        .iter_mut()
        .zip(next.voltages.iter_mut())
        .zip(next.biases.iter_mut());
    for (index, ((activation, voltage), bias)) in state.enumerate() {
        let count = neurons.synapse_counts[index] as usize;
        let taken = core::mem::take(&mut remaining);
        let (weights, rest) = taken.split_at_mut(count);
        remaining = rest;
        slots.push(NeuronSlot {
            activation,
            voltage,
            bias,
            weights,
        });
    }
    slots
}

/// Read-only view shared by every worker during one tick.
struct TickPass<'a> {
    neurons: &'a NeuronParams,
    synapses: &'a SynapseParams,
    current: &'a NeuronState,
    current_weights: &'a SynapseState,
    options: &'a TickOptions,
}

impl TickPass<'_> {
    fn run_sequential(&self, slots: Vec<NeuronSlot<'_>>) {
        for (index, slot) in slots.into_iter().enumerate() {
            update_neuron(index, self, slot);
        }
    }

    fn run_parallel(&self, slots: Vec<NeuronSlot<'_>>) {
        slots
            .into_par_iter()
            .enumerate()
            .for_each(|(index, slot)| update_neuron(index, self, slot));
    }
}
