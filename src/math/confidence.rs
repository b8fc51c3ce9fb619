//! Confidence and boundary rules shared by every aggregator.
//!
//! Both operate on the `[0, 100]` score scale where 50 is neutral.

/// Inclusive lower edge of the boundary band.
pub const BOUNDARY_LOW: u8 = 45;
/// Inclusive upper edge of the boundary band.
pub const BOUNDARY_HIGH: u8 = 55;

const NEUTRAL: f64 = 50.0;

/// Normalized distance from neutral: `clamp(|score - 50| / 50, 0, 1)`.
pub fn confidence(score: u8) -> f64 {
    ((f64::from(score) - NEUTRAL).abs() / NEUTRAL).clamp(0.0, 1.0)
}

/// True when a scaled score sits close enough to neutral that its binary letter
/// choice is unreliable.
pub fn boundary(score: u8) -> bool {
    (BOUNDARY_LOW..=BOUNDARY_HIGH).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_grid() {
        let cases = [
            (0, false),
            (44, false),
            (45, true),
            (50, true),
            (55, true),
            (56, false),
            (100, false),
        ];
        for (score, expected) in cases {
            assert_eq!(boundary(score), expected, "score {score}");
        }
    }

    #[test]
    fn confidence_is_symmetric_and_bounded() {
        assert_eq!(confidence(50), 0.0);
        assert_eq!(confidence(0), 1.0);
        assert_eq!(confidence(100), 1.0);
        assert_eq!(confidence(75), confidence(25));
        assert_eq!(confidence(75), 0.5);
        assert_eq!(confidence(255), 1.0);
    }
}
