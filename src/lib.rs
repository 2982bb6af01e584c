//! LearnPulse - Personalization & Adaptive-Assessment Engine
//!
//! This crate turns raw learning interactions into an updated learner model,
//! a difficulty decision for the next quiz question, and ranked content
//! recommendations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
