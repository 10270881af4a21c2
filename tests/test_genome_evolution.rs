// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Evolution-side integration tests: identity stability, crossover
//! provenance, structural distance, and population checkpointing through
//! the public crate surface.

use evomind::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn seed_genome(allocator: &mut IdAllocator, motor_slots: i32) -> Genome {
    let mut genome = Genome::new();
    let sensors: Vec<_> = (0..2)
        .map(|slot| NeuronId::universal(NeuronRole::Sensor, slot))
        .collect();
    let motors: Vec<_> = (0..motor_slots)
        .map(|slot| NeuronId::universal(NeuronRole::Motor, slot))
        .collect();

    for &id in &sensors {
        genome
            .add_node(NodeGene::new(id, ActivationFunction::Linear))
            .unwrap();
    }
    for &id in &motors {
        genome
            .add_node(NodeGene::new(id, ActivationFunction::Tanh))
            .unwrap();
    }
    for &sensor in &sensors {
        for &motor in &motors {
            genome
                .add_connection(ConnectionGene::new(
                    allocator.next_connection_id(),
                    sensor,
                    motor,
                    0.5,
                    HebbianCoefficients::zero(),
                ))
                .unwrap();
        }
    }
    genome
}

fn growth_config() -> MutationConfig {
    MutationConfig {
        add_connection_rate: 0.5,
        add_node_rate: 0.5,
        ..MutationConfig::default()
    }
}

#[test]
fn test_identity_stability_across_many_mutations() {
    let mut allocator = IdAllocator::new();
    let mut genome = seed_genome(&mut allocator, 2);
    let config = growth_config();
    let mut rng = StdRng::seed_from_u64(101);

    let mut known_nodes: Vec<NeuronId> = genome.nodes().iter().map(|g| g.id).collect();
    let mut known_connections: Vec<ConnectionId> =
        genome.connections().iter().map(|g| g.id).collect();

    for _ in 0..100 {
        mutate(&mut genome, &mut allocator, &config, &mut rng).unwrap();

        // Every previously seen gene is still there, in order, with its
        // identity unchanged.
        for (gene, &id) in genome.nodes().iter().zip(&known_nodes) {
            assert_eq!(gene.id, id);
        }
        for (gene, &id) in genome.connections().iter().zip(&known_connections) {
            assert_eq!(gene.id, id);
        }

        known_nodes = genome.nodes().iter().map(|g| g.id).collect();
        known_connections = genome.connections().iter().map(|g| g.id).collect();
    }

    // Identities never repeat within a genome.
    let unique_nodes: HashSet<_> = known_nodes.iter().collect();
    let unique_connections: HashSet<_> = known_connections.iter().collect();
    assert_eq!(unique_nodes.len(), known_nodes.len());
    assert_eq!(unique_connections.len(), known_connections.len());
}

#[test]
fn test_crossover_offspring_draw_only_from_parent_union() {
    let mut allocator = IdAllocator::new();
    let base = seed_genome(&mut allocator, 2);
    let mut parent1 = base.clone();
    let mut parent2 = base;
    let config = growth_config();
    let mut rng = StdRng::seed_from_u64(202);

    for _ in 0..15 {
        mutate(&mut parent1, &mut allocator, &config, &mut rng).unwrap();
        mutate(&mut parent2, &mut allocator, &config, &mut rng).unwrap();
    }

    let (child1, child2) = reproduce(&parent1, &parent2, &mut rng).unwrap();
    for child in [&child1, &child2] {
        for gene in child.nodes() {
            assert!(
                parent1.contains_node(gene.id) || parent2.contains_node(gene.id),
                "node {} appears in an offspring but in neither parent",
                gene.id
            );
        }
        for gene in child.connections() {
            assert!(
                parent1.contains_connection(gene.id) || parent2.contains_connection(gene.id),
                "connection {} appears in an offspring but in neither parent",
                gene.id
            );
        }
        // Both parents' genes all made it in: the union property.
        for gene in parent1.nodes().iter().chain(parent2.nodes()) {
            assert!(child.contains_node(gene.id));
        }
        for gene in parent1.connections().iter().chain(parent2.connections()) {
            assert!(child.contains_connection(gene.id));
        }
    }
}

#[test]
fn test_distance_is_a_symmetric_structural_metric() {
    let mut allocator = IdAllocator::new();
    let base = seed_genome(&mut allocator, 2);
    let mut a = base.clone();
    let mut b = base.clone();
    let config = growth_config();
    let mut rng = StdRng::seed_from_u64(303);

    for _ in 0..10 {
        mutate(&mut a, &mut allocator, &config, &mut rng).unwrap();
        mutate(&mut b, &mut allocator, &config, &mut rng).unwrap();
    }

    assert_eq!(distance(&a, &a), 0);
    assert_eq!(distance(&b, &b), 0);
    assert_eq!(distance(&a, &b), distance(&b, &a));
    // Divergent topology growth must register as distance.
    assert!(distance(&a, &b) > 0);

    // Weight-only divergence does not: distance is structural.
    let mut weights_only = base.clone();
    let weight_config = MutationConfig {
        add_connection_rate: 0.0,
        add_node_rate: 0.0,
        weight_rate: 1.0,
        ..MutationConfig::default()
    };
    mutate(&mut weights_only, &mut allocator, &weight_config, &mut rng).unwrap();
    assert_eq!(distance(&base, &weights_only), 0);
}

#[test]
fn test_population_checkpoint_round_trips_through_json() {
    let mut allocator = IdAllocator::new();
    let config = growth_config();
    let mut rng = StdRng::seed_from_u64(404);

    let mut genomes = Vec::new();
    for _ in 0..4 {
        let mut genome = seed_genome(&mut allocator, 1);
        for _ in 0..8 {
            mutate(&mut genome, &mut allocator, &config, &mut rng).unwrap();
        }
        genomes.push(genome);
    }

    let checkpoint = PopulationCheckpoint::new(genomes, allocator);
    let json = checkpoint.to_json().unwrap();
    let restored = PopulationCheckpoint::from_json(&json).unwrap();

    assert_eq!(restored.allocator, checkpoint.allocator);
    for (restored, original) in restored.genomes.iter().zip(&checkpoint.genomes) {
        restored.validate().unwrap();
        assert_eq!(restored.nodes(), original.nodes());
        assert_eq!(restored.connections(), original.connections());
        // Structurally identical after the round trip.
        assert_eq!(distance(restored, original), 0);
    }
}
