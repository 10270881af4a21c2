// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for genotype operations.

use evomind_npu_neural::types::{ConnectionId, NeuronId};

/// Errors raised by genome construction and traversal.
///
/// `DanglingReference` must never occur for well-formed callers — every
/// connection gene is created against nodes already present in the same
/// genome — so observing it is assertion-grade: it indicates a defect in the
/// caller, not a recoverable runtime condition.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenomeError {
    #[error("Node gene not found: {0}")]
    NodeNotFound(NeuronId),

    #[error("Connection gene not found: {0}")]
    ConnectionNotFound(ConnectionId),

    #[error("Duplicate node gene: {0}")]
    DuplicateNode(NeuronId),

    #[error("Duplicate connection gene: {0}")]
    DuplicateConnection(ConnectionId),

    #[error("Connection {connection} references missing node {missing}")]
    DanglingReference {
        connection: ConnectionId,
        missing: NeuronId,
    },

    #[error("Genome index inconsistency: {0}")]
    IndexInconsistency(String),
}

pub type GenomeResult<T> = Result<T, GenomeError>;
