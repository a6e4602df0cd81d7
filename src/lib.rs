// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitlog: a personal fitness-tracking API
//!
//! This crate provides the backend for logging exercise activities and
//! serving dashboard statistics (all-time, this-week and last-week
//! aggregates with calorie estimates).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod stats;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{MagicLinkService, MailerService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub magic_link: MagicLinkService,
    pub mailer: MailerService,
}
