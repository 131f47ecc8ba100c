//! Logging macros for the analysis pipeline with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Verbosity levels:
//! - 0: SILENT (only unexpected-state warnings)
//! - 1: STAGES (one summary line per pipeline stage)
//! - 2: DETAILS (components, orders, distance tables)
//! - 3: DEBUG (algorithm internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_STAGES: u8 = 1;
pub const VERBOSITY_DETAILS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at STAGES level (verbosity >= 1).
///
/// Used for: stage results such as component counts and path lengths.
#[macro_export]
macro_rules! log_stages {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_STAGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DETAILS level (verbosity >= 2).
///
/// Used for: component listings, execution orders, per-vertex distances.
#[macro_export]
macro_rules! log_details {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DETAILS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: condensation edges, vertex-to-component mapping, stage metrics.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

/// Unexpected-state warning, emitted at every verbosity level.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        eprintln!("WARNING: {}", format_args!($($arg)*));
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_constants() {
        assert_eq!(VERBOSITY_SILENT, 0);
        assert_eq!(VERBOSITY_STAGES, 1);
        assert_eq!(VERBOSITY_DETAILS, 2);
        assert_eq!(VERBOSITY_DEBUG, 3);
    }

    #[test]
    fn test_log_macros_compile() {
        let verbosity = VERBOSITY_SILENT;
        log_stages!(verbosity, "test {}", 1);
        log_details!(verbosity, "test {}", 2);
        log_debug!(verbosity, "test {}", 3);
    }
}
