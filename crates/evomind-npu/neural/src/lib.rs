// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Evomind Neural Computation (Platform-Agnostic)
//!
//! ALL scalar neural computation in one place:
//! - **Types**: Core type definitions (NeuronId, ConnectionId, NeuronRole, etc.)
//! - **Activation**: The closed set of activation functions and their closed forms
//! - **Dynamics**: Leaky-integrator voltage updates and non-finite sanitization
//!
//! Everything here is a pure function of its inputs; the buffers these
//! functions operate on live in `evomind-npu-runtime` and the per-tick
//! orchestration lives in `evomind-npu-tick-engine`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core type definitions
pub mod types;

// Activation function algorithms
pub mod activation;

// Neural dynamics algorithms
pub mod dynamics;

// Re-export everything for convenience
pub use activation::ActivationFunction;
pub use dynamics::{integrate_voltage, sanitize, VOLTAGE_LIMIT};
pub use types::{
    ConnectionId, LearningRule, NeuralError, NeuronClass, NeuronId, NeuronRole, Result,
};
