// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Execution-side integration tests: the full genome → transcription →
//! tick pipeline, split-conservation of the add-node mutation, and worker
//! independence of the tick result.

use evomind::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_two_sensor_one_motor_scenario() {
    // S1 -> M1 (weight 2.0), S2 -> M1 (weight -1.0), motor bias 0,
    // linear activation, alpha 1.
    let mut allocator = IdAllocator::new();
    let s1 = NeuronId::universal(NeuronRole::Sensor, 1);
    let s2 = NeuronId::universal(NeuronRole::Sensor, 2);
    let m1 = NeuronId::universal(NeuronRole::Motor, 1);

    let mut genome = Genome::new();
    for id in [s1, s2, m1] {
        genome
            .add_node(NodeGene::new(id, ActivationFunction::Linear))
            .unwrap();
    }
    genome
        .add_connection(ConnectionGene::new(
            allocator.next_connection_id(),
            s1,
            m1,
            2.0,
            HebbianCoefficients::zero(),
        ))
        .unwrap();
    genome
        .add_connection(ConnectionGene::new(
            allocator.next_connection_id(),
            s2,
            m1,
            -1.0,
            HebbianCoefficients::zero(),
        ))
        .unwrap();

    let mut network = compile(&genome).unwrap();
    let engine = TickEngine::new(TickOptions::default()).unwrap();

    network.set_sensor(s1, 0.5).unwrap();
    network.set_sensor(s2, 1.0).unwrap();
    engine.tick(&mut network);

    // 2.0 * 0.5 + (-1.0) * 1.0 + 0 = 0.0
    assert_eq!(network.motor_activation(m1).unwrap(), 0.0);
}

#[test]
fn test_add_node_split_preserves_function() {
    let mut allocator = IdAllocator::new();
    let sensor = NeuronId::universal(NeuronRole::Sensor, 0);
    let motor = NeuronId::universal(NeuronRole::Motor, 0);

    let mut genome = Genome::new();
    genome
        .add_node(NodeGene::new(sensor, ActivationFunction::Linear))
        .unwrap();
    genome
        .add_node(NodeGene::new(motor, ActivationFunction::Linear))
        .unwrap();
    genome
        .add_connection(ConnectionGene::new(
            allocator.next_connection_id(),
            sensor,
            motor,
            0.6,
            HebbianCoefficients::zero(),
        ))
        .unwrap();

    let engine = TickEngine::new(TickOptions::default()).unwrap();
    let input = 0.7f32;

    // Original: one tick from sensor to motor.
    let mut original = compile(&genome).unwrap();
    original.set_sensor(sensor, input).unwrap();
    engine.tick(&mut original);
    let direct = original.motor_activation(motor).unwrap();

    // Split the only enabled connection. With a single candidate the
    // random pick is forced, so the mutation is deterministic here.
    let config = MutationConfig {
        weight_rate: 0.0,
        bias_rate: 0.0,
        time_constant_rate: 0.0,
        gain_rate: 0.0,
        hebbian_rate: 0.0,
        add_connection_rate: 0.0,
        add_node_rate: 1.0,
        ..MutationConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    mutate(&mut genome, &mut allocator, &config, &mut rng).unwrap();
    assert_eq!(genome.node_count(), 3);
    assert_eq!(genome.connection_count(), 3);

    // Split: the signal now crosses two instantaneous neurons, so it
    // needs two ticks under the Jacobi update. Constant input held.
    let mut split = compile(&genome).unwrap();
    split.set_sensor(sensor, input).unwrap();
    engine.tick(&mut split);
    split.set_sensor(sensor, input).unwrap();
    engine.tick(&mut split);
    let routed = split.motor_activation(motor).unwrap();

    // The identity hidden node (linear, alpha 1, bias 0) with the 1.0/
    // inherited weights reproduces the original output exactly.
    assert_eq!(routed, direct);
}

#[test]
fn test_tick_is_worker_count_independent_end_to_end() {
    let mut allocator = IdAllocator::new();
    let mut genome = Genome::new();
    let sensors: Vec<_> = (0..4)
        .map(|slot| NeuronId::universal(NeuronRole::Sensor, slot))
        .collect();
    let motors: Vec<_> = (0..3)
        .map(|slot| NeuronId::universal(NeuronRole::Motor, slot))
        .collect();
    for &id in &sensors {
        genome
            .add_node(NodeGene::new(id, ActivationFunction::Linear))
            .unwrap();
    }
    for &id in &motors {
        genome
            .add_node(NodeGene::new(id, ActivationFunction::Sigmoid))
            .unwrap();
    }
    for &sensor in &sensors {
        for &motor in &motors {
            genome
                .add_connection(ConnectionGene::new(
                    allocator.next_connection_id(),
                    sensor,
                    motor,
                    0.4,
                    HebbianCoefficients::zero(),
                ))
                .unwrap();
        }
    }

    // Grow a tangled topology with plastic synapses.
    let config = MutationConfig {
        add_connection_rate: 0.7,
        add_node_rate: 0.7,
        hebbian_rate: 1.0,
        ..MutationConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(55);
    for _ in 0..40 {
        mutate(&mut genome, &mut allocator, &config, &mut rng).unwrap();
    }

    let template = compile(&genome).unwrap();

    for rule in [None, Some(LearningRule::Correlational)] {
        let sequential = TickEngine::new(TickOptions {
            worker_threads: 1,
            plasticity: rule,
            ..TickOptions::default()
        })
        .unwrap();
        let parallel = TickEngine::new(TickOptions {
            worker_threads: 8,
            plasticity: rule,
            ..TickOptions::default()
        })
        .unwrap();

        let mut a = template.clone();
        let mut b = template.clone();
        for _ in 0..10 {
            for &sensor in &sensors {
                let value = rng.gen_range(-1.0..1.0);
                a.set_sensor(sensor, value).unwrap();
                b.set_sensor(sensor, value).unwrap();
            }
            sequential.tick(&mut a);
            parallel.tick(&mut b);

            // Bitwise-identical next-state buffers, tick after tick.
            assert_eq!(a.state(), b.state());
            assert_eq!(a.weights(), b.weights());
        }
    }
}

#[test]
fn test_evolved_genomes_always_compile_and_run() {
    // A smoke pass over many mutation rounds: whatever topology evolution
    // produces, transcription accepts it and a tick completes.
    let mut allocator = IdAllocator::new();
    let sensor = NeuronId::universal(NeuronRole::Sensor, 0);
    let motor = NeuronId::universal(NeuronRole::Motor, 0);

    let mut genome = Genome::new();
    genome
        .add_node(NodeGene::new(sensor, ActivationFunction::Linear))
        .unwrap();
    genome
        .add_node(NodeGene::new(motor, ActivationFunction::Tanh))
        .unwrap();
    genome
        .add_connection(ConnectionGene::new(
            allocator.next_connection_id(),
            sensor,
            motor,
            1.0,
            HebbianCoefficients::zero(),
        ))
        .unwrap();

    let config = MutationConfig {
        add_connection_rate: 0.6,
        add_node_rate: 0.6,
        disable_connection_rate: 0.2,
        ..MutationConfig::default()
    };
    let engine = TickEngine::new(TickOptions {
        plasticity: Some(LearningRule::Correlational),
        ..TickOptions::default()
    })
    .unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..60 {
        mutate(&mut genome, &mut allocator, &config, &mut rng).unwrap();
        let mut network = compile(&genome).unwrap();
        network.set_sensor(sensor, rng.gen_range(-1.0..1.0)).unwrap();
        engine.tick(&mut network);
        let output = network.motor_activation(motor).unwrap();
        assert!(output.is_finite());
    }
}
