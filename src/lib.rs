pub mod analyzer;
pub mod boundary;
pub mod ci;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod signing;
pub mod ui;

pub use engine::{compute_next_version, Engine, ReleaseDecision};
pub use error::{ReleaseError, Result, Stage};
