// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for neural computation.

use super::ids::NeuronId;
use super::roles::NeuronRole;

/// Errors raised by the neural computation layer.
///
/// `Unsupported*` variants are configuration errors: there is no sensible
/// default, so the compile/execution call that hit them fails. `RoleMismatch`
/// is a consistency error: it indicates a logic defect upstream and the
/// operation that observed it must abort rather than proceed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NeuralError {
    #[error("Unsupported activation function: {0}")]
    UnsupportedActivation(String),

    #[error("Unsupported learning rule: {0}")]
    UnsupportedLearningRule(String),

    #[error("Role mismatch for {id}: expected {expected}, found {actual}")]
    RoleMismatch {
        id: NeuronId,
        expected: NeuronRole,
        actual: NeuronRole,
    },
}

pub type Result<T> = core::result::Result<T, NeuralError>;
