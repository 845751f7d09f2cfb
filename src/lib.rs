//! Multi-timeframe technical signal and risk scoring engine.

pub mod cache;
pub mod common;
pub mod config;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod regime;
pub mod risk;
pub mod services;
pub mod signals;
