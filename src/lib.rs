//! Metacog Patterns - Metacognitive usage-pattern scoring for chat transcripts
//!
//! This crate scores each user's human messages on twelve metacognitive
//! dimensions (planning, monitoring, evaluation, regulation) with a
//! keyword/pattern rubric, and classifies the resulting score vector into one
//! of six usage patterns A-F.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
