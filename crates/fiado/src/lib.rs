//! Fiado tracks informal debts between members of a closed peer group and
//! derives a single trustworthiness score per member by replaying their debt
//! history through a deterministic, rule-driven engine.
//!
//! The crate is split between the [`ledger`] module, which owns the debt
//! lifecycle (registration, settlement, administrative overrides), and the
//! [`score`] module, which is the one authority for turning a debt history
//! into a score. Reporting tools and HTTP handlers must call the engine;
//! nothing else reimplements it.

pub mod config;
pub mod error;
pub mod ledger;
pub mod score;
pub mod telemetry;
