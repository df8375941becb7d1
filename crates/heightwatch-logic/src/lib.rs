//! Pure risk-evaluation logic for HeightWatch.
//!
//! This crate contains every decision rule of the work-at-height training
//! simulator that is independent of session state. Functions take plain
//! data and return results, so each rule is unit-testable on its own and
//! the same code serves the session engine and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Zones, character types, conditions, tools, PPE, room enums |
//! | [`fall_risk`] | Additive fall-risk score bucketed HIGH/MEDIUM/LOW/NONE |
//! | [`overload`] | Weight and tool-load score bucketed ALERT/WARNING/NONE |
//! | [`profile`] | Participant profile, BMI, profile validation |
//! | [`risk`] | Risk codes, ordered profile rule table, deduplicating risk log |
//! | [`room_config`] | Room configuration, validation, join codes |
//! | [`sensors`] | Harness sensor scenarios and reading classification |

pub mod constants;
pub mod fall_risk;
pub mod overload;
pub mod profile;
pub mod risk;
pub mod room_config;
pub mod sensors;
