//! User interface module - terminal rendering of decisions and warnings.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_decision, display_error, display_status, display_success,
    format_decision,
};
