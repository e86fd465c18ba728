// ABOUTME: Main library entry point for the workout tracker API
// ABOUTME: Provides user accounts, workout plans, fitness goals, and session logging over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

#![deny(unsafe_code)]

//! # Workout Tracker
//!
//! A fitness tracking API: user accounts, a read-only exercise catalog,
//! user-owned workout plans, fitness goals, and logged workout sessions.
//!
//! The interesting part is the aggregate consistency layer. Composite
//! entities — a workout plan together with its selected exercises and goal,
//! a fitness goal together with its exercise sub-goals — are created and
//! destroyed as atomic units, and every lookup is scoped to the
//! authenticated owner. A resource that exists but belongs to someone else
//! is indistinguishable from one that does not exist.
//!
//! ## Architecture
//!
//! - **Models**: domain entities and aggregate projections
//! - **Database**: SQLite storage with per-aggregate submodules; multi-row
//!   writes share one transaction, deletes cascade inside it
//! - **Auth**: JWT issuance/validation and bcrypt password hashing
//! - **Routes**: thin axum handlers organized by domain
//! - **Server**: shared resource container and HTTP bootstrap
//!
//! ## Quick Start
//!
//! 1. Set `JWT_SECRET` (and optionally `DATABASE_URL`, `HTTP_PORT`)
//! 2. Load the exercise catalog with the `import-exercises` binary
//! 3. Start the API with `workout-server`

/// JWT authentication and password hashing
pub mod auth;

/// Environment-based configuration
pub mod config;

/// SQLite database management and aggregate operations
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Core data models
pub mod models;

/// HTTP route handlers organized by domain
pub mod routes;

/// Shared server resources and HTTP bootstrap
pub mod server;
