//! Perk Reminders - benefit reminder scheduling for card perks
//!
//! Computes which local notifications should exist for a user's credit-card
//! perks, card renewals and weekly digest, reconciles them against what the
//! platform has scheduled, and routes delivered notifications back into the
//! app's navigation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
