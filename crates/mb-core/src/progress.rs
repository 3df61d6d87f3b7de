//! Progress display rule.

/// Map a progress fraction to its displayed value.
///
/// The progress bar is modulo-complete: a fraction of exactly `1.0` renders
/// as `0.0` so the bar is empty again once an import finishes, ready for the
/// next batch. Everything else passes through unchanged.
pub fn display_fraction(fraction: f64) -> f64 {
    if fraction == 1.0 {
        0.0
    } else {
        fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_resets_to_zero() {
        assert_eq!(display_fraction(1.0), 0.0);
    }

    #[test]
    fn test_incomplete_passes_through() {
        assert_eq!(display_fraction(0.0), 0.0);
        assert_eq!(display_fraction(0.5), 0.5);
        assert_eq!(display_fraction(2.0 / 3.0), 2.0 / 3.0);
    }
}
