//! Stealth module
//!
//! Makes replayed input look human:
//! - Seedable randomness shared by the motion models
//! - Humanized pauses around clicks and drags
//! - Frame jitter and random micro-pauses

pub mod humanize;

pub use humanize::*;
