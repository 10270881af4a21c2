// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The genome model: gene collections plus derived indices.
//!
//! The node and connection gene lists are the authoritative state. The
//! id→position maps, role partitions, and enabled-connection set are
//! derived, rebuildable views kept consistent with the gene lists by every
//! mutating operation — they exist so genome traversal and mutation are
//! O(1) where the operators need them to be.

use crate::error::{GenomeError, GenomeResult};
use crate::genes::{ConnectionGene, NodeGene};
use ahash::AHashMap;
use evomind_npu_neural::types::{ConnectionId, NeuronId, NeuronRole};
use rand::Rng;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

/// Role-partitioned views over node-gene positions.
///
/// The combined partitions exist because the mutation operators draw from
/// them directly: add-connection sources come from `sensor_hidden` (or all
/// nodes) and destinations from `motor_hidden`.
#[derive(Debug, Clone, Default)]
struct RolePartitions {
    sensors: Vec<usize>,
    hidden: Vec<usize>,
    motors: Vec<usize>,
    sensor_hidden: Vec<usize>,
    motor_hidden: Vec<usize>,
}

impl RolePartitions {
    fn insert(&mut self, role: NeuronRole, position: usize) {
        match role {
            NeuronRole::Sensor => {
                self.sensors.push(position);
                self.sensor_hidden.push(position);
            }
            NeuronRole::Hidden => {
                self.hidden.push(position);
                self.sensor_hidden.push(position);
                self.motor_hidden.push(position);
            }
            NeuronRole::Motor => {
                self.motors.push(position);
                self.motor_hidden.push(position);
            }
        }
    }
}

/// Set of enabled connection positions supporting O(1) amortized random
/// pick and O(1) removal: a dense vector for picking plus a position map
/// for swap-removal.
#[derive(Debug, Clone, Default)]
struct RandomSet {
    items: Vec<usize>,
    slots: AHashMap<usize, usize>,
}

impl RandomSet {
    fn insert(&mut self, item: usize) {
        if self.slots.contains_key(&item) {
            return;
        }
        self.slots.insert(item, self.items.len());
        self.items.push(item);
    }

    fn remove(&mut self, item: usize) {
        let Some(slot) = self.slots.remove(&item) else {
            return;
        };
        self.items.swap_remove(slot);
        if let Some(&moved) = self.items.get(slot) {
            self.slots.insert(moved, slot);
        }
    }

    fn pick(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items[rng.gen_range(0..self.items.len())])
        }
    }

    fn contains(&self, item: usize) -> bool {
        self.slots.contains_key(&item)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// An evolvable controller genome.
///
/// Cloning deep-copies both gene collections; the derived indices are owned
/// values as well, so clones never share index state.
#[derive(Debug, Clone, Default)]
pub struct Genome {
    nodes: Vec<NodeGene>,
    connections: Vec<ConnectionGene>,
    node_index: AHashMap<NeuronId, usize>,
    connection_index: AHashMap<ConnectionId, usize>,
    partitions: RolePartitions,
    enabled: RandomSet,
}

impl Genome {
    /// Empty genome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a genome from bare gene lists, restoring every derived
    /// index. Fails if the lists violate genome invariants.
    pub fn from_parts(
        nodes: Vec<NodeGene>,
        connections: Vec<ConnectionGene>,
    ) -> GenomeResult<Self> {
        let mut genome = Self::new();
        for gene in nodes {
            genome.add_node(gene)?;
        }
        for gene in connections {
            genome.add_connection(gene)?;
        }
        Ok(genome)
    }

    /// Add a node gene. The gene's NeuronId must be new to this genome.
    pub fn add_node(&mut self, gene: NodeGene) -> GenomeResult<()> {
        if self.node_index.contains_key(&gene.id) {
            return Err(GenomeError::DuplicateNode(gene.id));
        }
        let position = self.nodes.len();
        self.node_index.insert(gene.id, position);
        self.partitions.insert(gene.id.role, position);
        self.nodes.push(gene);
        Ok(())
    }

    /// Add a connection gene. Both endpoints must already resolve to node
    /// genes in this genome; a dangling endpoint means the caller built the
    /// gene against the wrong genome.
    pub fn add_connection(&mut self, gene: ConnectionGene) -> GenomeResult<()> {
        if self.connection_index.contains_key(&gene.id) {
            return Err(GenomeError::DuplicateConnection(gene.id));
        }
        for endpoint in [gene.source, gene.target] {
            if !self.node_index.contains_key(&endpoint) {
                return Err(GenomeError::DanglingReference {
                    connection: gene.id,
                    missing: endpoint,
                });
            }
        }
        let position = self.connections.len();
        self.connection_index.insert(gene.id, position);
        if gene.enabled {
            self.enabled.insert(position);
        }
        self.connections.push(gene);
        Ok(())
    }

    /// Look up a node gene by id.
    pub fn node(&self, id: NeuronId) -> GenomeResult<&NodeGene> {
        self.node_index
            .get(&id)
            .map(|&position| &self.nodes[position])
            .ok_or(GenomeError::NodeNotFound(id))
    }

    /// Look up a connection gene by id.
    pub fn connection(&self, id: ConnectionId) -> GenomeResult<&ConnectionGene> {
        self.connection_index
            .get(&id)
            .map(|&position| &self.connections[position])
            .ok_or(GenomeError::ConnectionNotFound(id))
    }

    pub fn contains_node(&self, id: NeuronId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn contains_connection(&self, id: ConnectionId) -> bool {
        self.connection_index.contains_key(&id)
    }

    pub fn position_of_node(&self, id: NeuronId) -> Option<usize> {
        self.node_index.get(&id).copied()
    }

    pub fn position_of_connection(&self, id: ConnectionId) -> Option<usize> {
        self.connection_index.get(&id).copied()
    }

    /// Node genes in declaration order.
    pub fn nodes(&self) -> &[NodeGene] {
        &self.nodes
    }

    /// Connection genes in declaration order.
    pub fn connections(&self) -> &[ConnectionGene] {
        &self.connections
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn enabled_connection_count(&self) -> usize {
        self.enabled.len()
    }

    // Role-partition accessors; positions index into `nodes()`.

    pub fn sensor_positions(&self) -> &[usize] {
        &self.partitions.sensors
    }

    pub fn hidden_positions(&self) -> &[usize] {
        &self.partitions.hidden
    }

    pub fn motor_positions(&self) -> &[usize] {
        &self.partitions.motors
    }

    pub fn sensor_hidden_positions(&self) -> &[usize] {
        &self.partitions.sensor_hidden
    }

    pub fn motor_hidden_positions(&self) -> &[usize] {
        &self.partitions.motor_hidden
    }

    /// Uniformly random enabled connection position, if any exists. A
    /// genome with zero enabled connections is legal; callers that need one
    /// handle `None` by skipping their operation.
    pub fn random_enabled_connection(&self, rng: &mut impl Rng) -> Option<usize> {
        self.enabled.pick(rng)
    }

    /// Flip a connection gene's enabled flag, keeping the enabled set in
    /// sync.
    pub fn set_connection_enabled(&mut self, position: usize, enabled: bool) {
        let gene = &mut self.connections[position];
        if gene.enabled == enabled {
            return;
        }
        gene.enabled = enabled;
        if enabled {
            self.enabled.insert(position);
        } else {
            self.enabled.remove(position);
        }
    }

    /// Mutable iteration over node genes for the in-crate mutation
    /// operators. Identities must not be altered through this.
    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut NodeGene> + '_ {
        self.nodes.iter_mut()
    }

    /// Mutable iteration over connection genes for the in-crate mutation
    /// operators. Identities and enabled flags must not be altered through
    /// this (enabled flags go through `set_connection_enabled`).
    pub(crate) fn connections_mut(&mut self) -> impl Iterator<Item = &mut ConnectionGene> + '_ {
        self.connections.iter_mut()
    }

    /// Replace a node gene with an allele carrying the same NeuronId.
    pub(crate) fn replace_node(&mut self, position: usize, gene: NodeGene) {
        debug_assert_eq!(self.nodes[position].id, gene.id);
        self.nodes[position] = gene;
    }

    /// Replace a connection gene with an allele carrying the same
    /// ConnectionId, syncing the enabled set if the alleles disagree on the
    /// enabled flag.
    pub(crate) fn replace_connection(&mut self, position: usize, gene: ConnectionGene) {
        debug_assert_eq!(self.connections[position].id, gene.id);
        let was_enabled = self.connections[position].enabled;
        self.connections[position] = gene;
        if gene.enabled != was_enabled {
            if gene.enabled {
                self.enabled.insert(position);
            } else {
                self.enabled.remove(position);
            }
        }
    }

    /// Verify that every derived index agrees with the gene lists. Used by
    /// tests and the checkpoint restore path.
    pub fn validate(&self) -> GenomeResult<()> {
        if self.node_index.len() != self.nodes.len() {
            return Err(GenomeError::IndexInconsistency(format!(
                "node index has {} entries for {} genes",
                self.node_index.len(),
                self.nodes.len()
            )));
        }
        if self.connection_index.len() != self.connections.len() {
            return Err(GenomeError::IndexInconsistency(format!(
                "connection index has {} entries for {} genes",
                self.connection_index.len(),
                self.connections.len()
            )));
        }
        for (position, gene) in self.nodes.iter().enumerate() {
            if self.node_index.get(&gene.id) != Some(&position) {
                return Err(GenomeError::IndexInconsistency(format!(
                    "node index misplaces {}",
                    gene.id
                )));
            }
        }
        for (position, gene) in self.connections.iter().enumerate() {
            if self.connection_index.get(&gene.id) != Some(&position) {
                return Err(GenomeError::IndexInconsistency(format!(
                    "connection index misplaces {}",
                    gene.id
                )));
            }
            if gene.enabled != self.enabled.contains(position) {
                return Err(GenomeError::IndexInconsistency(format!(
                    "enabled set disagrees with {}",
                    gene.id
                )));
            }
            for endpoint in [gene.source, gene.target] {
                if !self.node_index.contains_key(&endpoint) {
                    return Err(GenomeError::DanglingReference {
                        connection: gene.id,
                        missing: endpoint,
                    });
                }
            }
        }
        Ok(())
    }
}

// Only the gene lists are persisted; every index is derived and rebuilt on
// deserialization, so a round-trip is lossless including disabled
// connections.
impl Serialize for Genome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Genome", 2)?;
        state.serialize_field("nodes", &self.nodes)?;
        state.serialize_field("connections", &self.connections)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Genome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct GenomeData {
            nodes: Vec<NodeGene>,
            connections: Vec<ConnectionGene>,
        }

        let data = GenomeData::deserialize(deserializer)?;
        Genome::from_parts(data.nodes, data.connections).map_err(serde::de::Error::custom)
    }
}
