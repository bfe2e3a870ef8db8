//! Processing statistics tracking.
//!
//! Thread-safe counters for fetch failures and capability detections,
//! shared across concurrent probe jobs via `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType};

/// Thread-safe processing statistics tracker.
///
/// Tracks fetch failure categories and capability detections using atomic
/// counters. All categories are initialized to zero on creation, so
/// incrementing never allocates.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl ProcessingStats {
    /// Creates a tracker with every category zeroed.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ProcessingStats { errors, info }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                info_type
            );
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an info type.
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = ProcessingStats::new();
        assert_eq!(stats.get_error_count(ErrorType::FetchConnectError), 0);
        assert_eq!(stats.get_info_count(InfoType::Manifest), 0);
    }

    #[test]
    fn test_increment_error() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::FetchTimeoutError);
        stats.increment_error(ErrorType::FetchTimeoutError);
        assert_eq!(stats.get_error_count(ErrorType::FetchTimeoutError), 2);
        assert_eq!(stats.get_error_count(ErrorType::FetchConnectError), 0);
    }

    #[test]
    fn test_increment_info() {
        let stats = ProcessingStats::new();
        stats.increment_info(InfoType::ServiceWorker);
        assert_eq!(stats.get_info_count(InfoType::ServiceWorker), 1);
    }

    #[test]
    fn test_concurrent_increments() {
        use std::sync::Arc;

        let stats = Arc::new(ProcessingStats::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    stats.increment_error(ErrorType::FetchConnectError);
                }
            }));
        }
        for handle in handles {
            handle.join().expect("thread should not panic");
        }
        assert_eq!(stats.get_error_count(ErrorType::FetchConnectError), 800);
    }
}
