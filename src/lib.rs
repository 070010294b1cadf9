//! Settlement engine for Brazilian (CLT) employment contracts
//!
//! This crate computes proportional settlement amounts: early termination
//! of an experience contract, proportional vacation accrual in twelfths,
//! hazard and unhealthiness premiums, and the penalty for dismissal inside
//! the risk window. Each calculation returns its outcome together with an
//! ordered, human-readable ledger of the steps behind it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
