//! Pylint exit status decoding.
//!
//! Pylint ORs one bit per message category into its exit status. The table
//! below lists the categories most severe first; that order is the order in
//! which the lint gate tests them.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Refactor,
    Convention,
}

/// Category flags, most severe first.
pub const SEVERITY_FLAGS: [(Severity, i32); 5] = [
    (Severity::Fatal, 1),
    (Severity::Error, 2),
    (Severity::Warning, 4),
    (Severity::Refactor, 8),
    (Severity::Convention, 16),
];

impl Severity {
    pub fn bit(self) -> i32 {
        SEVERITY_FLAGS
            .iter()
            .find(|(s, _)| *s == self)
            .map(|(_, b)| *b)
            .unwrap_or(0)
    }

    /// Whether `status` carries this category's bit.
    pub fn is_set(self, status: i32) -> bool {
        status & self.bit() != 0
    }

    pub fn name(self) -> &'static str {
        match self {
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Refactor => "refactor",
            Severity::Convention => "convention",
        }
    }
}

/// All categories present in `status`, most severe first.
pub fn decode(status: i32) -> Vec<Severity> {
    SEVERITY_FLAGS
        .iter()
        .filter(|(s, _)| s.is_set(status))
        .map(|(s, _)| *s)
        .collect()
}

/// The most severe category present in `status`, if any.
pub fn most_severe(status: i32) -> Option<Severity> {
    decode(status).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_orders_most_severe_first() {
        assert_eq!(
            decode(1 | 4 | 16),
            vec![Severity::Fatal, Severity::Warning, Severity::Convention]
        );
        assert_eq!(decode(0), Vec::<Severity>::new());
    }

    #[test]
    fn test_most_severe_prefers_fatal_over_error() {
        assert_eq!(most_severe(3), Some(Severity::Fatal));
        assert_eq!(most_severe(2 | 8), Some(Severity::Error));
        assert_eq!(most_severe(8), Some(Severity::Refactor));
        // usage-error bit (32) is not a message category
        assert_eq!(most_severe(32), None);
    }

    #[test]
    fn test_bits_match_pylint_categories() {
        assert_eq!(Severity::Fatal.bit(), 1);
        assert_eq!(Severity::Convention.bit(), 16);
        assert!(Severity::Warning.is_set(4 | 16));
        assert!(!Severity::Error.is_set(4 | 16));
    }
}
