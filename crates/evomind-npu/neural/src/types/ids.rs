// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for neurons and connections.
//!
//! Both identities are stable across structural mutation and shared across
//! the whole evolving population, which is what lets genes from different
//! genomes be recognized as "the same gene" during crossover alignment.

use super::roles::NeuronRole;
use core::fmt;
use serde::{Deserialize, Serialize};

/// First coordinate component of body-independent "universal" neurons.
pub const UNIVERSAL_SENTINEL: i32 = -1;

/// First coordinate component of hidden neurons grown by the add-node
/// mutation; the second component carries the allocator serial.
pub const GROWN_SENTINEL: i32 = -2;

/// Neuron ID: a 4-component coordinate plus a role tag.
///
/// The coordinate encodes one of three address spaces:
/// - a body-relative spatial address (non-negative first component),
/// - the universal range for body-independent neurons
///   (first component [`UNIVERSAL_SENTINEL`]),
/// - a grown-hidden serial assigned by the `IdAllocator`
///   (first component [`GROWN_SENTINEL`]).
///
/// Equality is all four components plus the role. Within one genome a
/// NeuronId is unique and never reused for a different logical neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeuronId {
    pub coords: [i32; 4],
    pub role: NeuronRole,
}

impl NeuronId {
    /// Neuron addressed relative to a body part.
    pub fn body(role: NeuronRole, coords: [i32; 4]) -> Self {
        Self { coords, role }
    }

    /// Body-independent neuron in the universal sentinel range.
    pub fn universal(role: NeuronRole, slot: i32) -> Self {
        Self {
            coords: [UNIVERSAL_SENTINEL, slot, 0, 0],
            role,
        }
    }

    /// Hidden neuron grown by the add-node mutation. `serial` comes from the
    /// `IdAllocator` and is never reused.
    pub fn grown(serial: i32) -> Self {
        Self {
            coords: [GROWN_SENTINEL, serial, 0, 0],
            role: NeuronRole::Hidden,
        }
    }

    /// Whether this neuron was grown by structural mutation.
    pub fn is_grown(&self) -> bool {
        self.coords[0] == GROWN_SENTINEL
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.coords;
        write!(f, "Neuron({}, [{}, {}, {}, {}])", self.role, a, b, c, d)
    }
}

/// Connection ID: a globally monotonically increasing integer assigned at
/// connection-gene creation time from the process-wide `IdAllocator`.
/// Never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Connection({})", self.0)
    }
}
