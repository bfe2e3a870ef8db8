//! End-of-run statistics reporting.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Prints a summary of fetch failures and capability detections.
///
/// Only non-zero counters are reported; a clean run logs nothing beyond
/// the section headers being skipped entirely.
pub fn print_probe_statistics(stats: &ProcessingStats) {
    let errors: Vec<(ErrorType, usize)> = ErrorType::iter()
        .map(|e| (e, stats.get_error_count(e)))
        .filter(|(_, count)| *count > 0)
        .collect();

    if !errors.is_empty() {
        info!("Fetch failure summary:");
        for (error, count) in errors {
            info!("  {}: {}", error.as_str(), count);
        }
    }

    let detections: Vec<(InfoType, usize)> = InfoType::iter()
        .map(|i| (i, stats.get_info_count(i)))
        .filter(|(_, count)| *count > 0)
        .collect();

    if !detections.is_empty() {
        info!("Capability detection summary:");
        for (info_type, count) in detections {
            info!("  {}: {}", info_type.as_str(), count);
        }
    }
}
