//! Batch Reporting
//!
//! Accumulates per-entry outcomes and renders the closing summary.

/// Running tally of copy outcomes for one manifest batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    succeeded: usize,
    failed: usize,
}

impl BatchReport {
    pub fn success(&mut self) {
        self.succeeded += 1;
    }

    pub fn failure(&mut self) {
        self.failed += 1;
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn summary(&self) -> String {
        format!(
            "Completed: {} succeeded, {} failed",
            self.succeeded, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch() {
        let report = BatchReport::default();
        assert_eq!(report.failed(), 0);
        assert_eq!(report.summary(), "Completed: 0 succeeded, 0 failed");
    }

    #[test]
    fn test_mixed_batch() {
        let mut report = BatchReport::default();
        report.success();
        report.success();
        report.failure();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.summary(), "Completed: 2 succeeded, 1 failed");
    }
}
