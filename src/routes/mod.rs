// ABOUTME: Route module organization for the delivery control HTTP endpoints
// ABOUTME: Groups the public health route and the authenticated store routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for Delivery Control
//!
//! Route modules contain only route definitions and thin handlers that
//! delegate to the [`crate::gateway::PlatformGateway`].

/// Health check route
pub mod health;
/// Store activation, deactivation and status routes
pub mod stores;

pub use health::HealthRoutes;
pub use stores::StoreRoutes;
