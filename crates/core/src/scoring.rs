//! Scoring module - survival time formatting and score comparisons
//!
//! The Raindrop game has no countdown: a run lasts until the miss limit is
//! reached, and its length is reported as `"minutes.seconds"` with the seconds
//! zero-padded to two digits.

/// Survival duration of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurvivalTime {
    pub minutes: u64,
    pub seconds: u8,
}

impl SurvivalTime {
    /// Whole seconds are kept; sub-second remainders are truncated.
    pub fn from_millis(ms: u64) -> Self {
        let total_secs = ms / 1000;
        Self {
            minutes: total_secs / 60,
            seconds: (total_secs % 60) as u8,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.minutes * 60 + self.seconds as u64
    }
}

impl std::fmt::Display for SurvivalTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.minutes, self.seconds)
    }
}

/// Format an elapsed duration the way it is persisted.
pub fn format_survival(ms: u64) -> String {
    SurvivalTime::from_millis(ms).to_string()
}

/// Ratchet rule: the candidate replaces the stored value only when strictly greater.
pub fn ratchet(stored: u32, candidate: u32) -> Option<u32> {
    (candidate > stored).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survival_time_pads_seconds() {
        assert_eq!(format_survival(125_000), "2.05");
        assert_eq!(format_survival(0), "0.00");
        assert_eq!(format_survival(59_999), "0.59");
        assert_eq!(format_survival(60_000), "1.00");
        assert_eq!(format_survival(3_600_000 + 10_000), "60.10");
    }

    #[test]
    fn survival_time_total_seconds() {
        let t = SurvivalTime::from_millis(125_400);
        assert_eq!(t, SurvivalTime { minutes: 2, seconds: 5 });
        assert_eq!(t.total_seconds(), 125);
    }

    #[test]
    fn ratchet_only_accepts_strictly_greater() {
        assert_eq!(ratchet(0, 500), Some(500));
        assert_eq!(ratchet(500, 500), None);
        assert_eq!(ratchet(1000, 500), None);
    }
}
