// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Evomind NPU Runtime
//!
//! Flat phenotype storage: the directly executable form of a compiled
//! genome. Two parallel structure-of-arrays buffers — neuron records and
//! synapse records — with the per-tick mutable state split out into
//! double-buffered generations ("current" and "next").
//!
//! A network's buffers are exclusively owned by one agent instance for its
//! entire lifetime: no sharing across agents, dropped with the agent. The
//! only writer is the execution engine in `evomind-npu-tick-engine`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod network;
pub mod neuron_array;
pub mod synapse_array;

pub use error::{Result, RuntimeError};
pub use network::{CompiledNetwork, TickBuffers};
pub use neuron_array::{NeuronParams, NeuronState};
pub use synapse_array::{SynapseParams, SynapseState};
