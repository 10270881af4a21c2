// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for phenotype storage.

use evomind_npu_neural::types::{NeuralError, NeuronId};

/// Errors raised by the runtime buffers.
///
/// `Layout` is consistency-grade: a synapse range set that does not
/// partition the synapse buffer indicates a transcription defect, and the
/// network is rejected at construction rather than executed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    #[error("Unknown neuron: {0}")]
    UnknownNeuron(NeuronId),

    #[error(transparent)]
    Neural(#[from] NeuralError),

    #[error("Phenotype layout invalid: {0}")]
    Layout(String),
}

pub type Result<T> = core::result::Result<T, RuntimeError>;
