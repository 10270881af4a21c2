// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fresh-identity allocation.
//!
//! The two counters here are process-wide state shared by every genome in
//! the evolving population: a connection gene created by one split or add
//! event carries the same id in every genome descended from it. The
//! allocator is an explicit object passed by reference into every mutation
//! and construction call — never ambient static state — so tests run
//! deterministically in isolation and in parallel. It serializes alongside
//! saved genome populations so restored processes never collide ids.

use evomind_npu_neural::types::{ConnectionId, NeuronId};
use serde::{Deserialize, Serialize};

/// Allocator for globally unique connection ids and grown-hidden-neuron
/// serials. Both counters only ever move forward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_connection: u64,
    next_grown_serial: i32,
}

impl IdAllocator {
    /// Fresh allocator for a new population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from checkpointed counters.
    pub fn resume(next_connection: u64, next_grown_serial: i32) -> Self {
        Self {
            next_connection,
            next_grown_serial,
        }
    }

    /// Allocate the next connection id.
    pub fn next_connection_id(&mut self) -> ConnectionId {
        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;
        id
    }

    /// Allocate the identity of a hidden neuron grown by the add-node
    /// mutation.
    pub fn next_grown_neuron_id(&mut self) -> NeuronId {
        let id = NeuronId::grown(self.next_grown_serial);
        self.next_grown_serial += 1;
        id
    }

    /// Counter values for checkpoint inspection.
    pub fn counters(&self) -> (u64, i32) {
        (self.next_connection, self.next_grown_serial)
    }
}
