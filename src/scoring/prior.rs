//! Temperament prior over the nine types.
//!
//! A weak, renormalized prior keyed by the typology code's temperament. It nudges
//! the softmax toward types that co-occur with a temperament without dominating
//! item evidence.
//!
//! A temperament's bonuses fire only when its two-letter label appears as
//! adjacent letters of the code. NT and NF always qualify; SJ and SP never sit
//! next to each other in a four-letter code, so S codes get the flat prior.

use serde::Serialize;

use crate::domain::{Axis, NineType, PerType, TypeCode};

/// Mass every type starts with before temperament bonuses.
pub const PRIOR_BASE: f64 = 0.11;

/// Coarse grouping of a type code by its perception and judgement letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Temperament {
    /// N + T
    Nt,
    /// N + F
    Nf,
    /// S + J
    Sj,
    /// S + P
    Sp,
}

impl Temperament {
    pub const ALL: [Temperament; 4] = [Temperament::Nt, Temperament::Nf, Temperament::Sj, Temperament::Sp];

    /// Grouping by letters, regardless of position. `None` for malformed codes.
    pub fn of(code: &TypeCode) -> Option<Self> {
        let sn = code.letter(Axis::Sn)?;
        match sn {
            'N' => match code.letter(Axis::Tf)? {
                'T' => Some(Temperament::Nt),
                'F' => Some(Temperament::Nf),
                _ => None,
            },
            'S' => match code.letter(Axis::Jp)? {
                'J' => Some(Temperament::Sj),
                'P' => Some(Temperament::Sp),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Temperament::Nt => "NT",
            Temperament::Nf => "NF",
            Temperament::Sj => "SJ",
            Temperament::Sp => "SP",
        }
    }

    /// True when the label occurs as adjacent letters of `code`.
    pub fn fires_for(self, code: &TypeCode) -> bool {
        code.as_str().contains(self.label())
    }

    /// Additive bonuses applied on top of [`PRIOR_BASE`].
    pub fn bonuses(self) -> &'static [(NineType, f64)] {
        match self {
            Temperament::Nt => &[(NineType::Five, 0.04), (NineType::One, 0.02)],
            Temperament::Nf => &[(NineType::Four, 0.04), (NineType::Two, 0.02), (NineType::Nine, 0.02)],
            Temperament::Sj => &[(NineType::One, 0.03), (NineType::Six, 0.03)],
            Temperament::Sp => &[(NineType::Seven, 0.03), (NineType::Nine, 0.02)],
        }
    }
}

/// Normalized prior for a type code. Codes with no firing temperament get the
/// flat prior.
pub fn temperament_prior(code: &TypeCode) -> PerType<f64> {
    let mut prior = PerType::from_fn(|_| PRIOR_BASE);
    for temperament in Temperament::ALL.into_iter().filter(|t| t.fires_for(code)) {
        for &(t, bonus) in temperament.bonuses() {
            *prior.get_mut(t) += bonus;
        }
    }

    let total: f64 = prior.0.iter().sum();
    if total > 0.0 {
        for p in prior.0.iter_mut() {
            *p /= total;
        }
    }
    prior
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PerAxis;

    fn code(ei: f64, sn: f64, tf: f64, jp: f64) -> TypeCode {
        TypeCode::from_axes(&PerAxis { ei, sn, tf, jp })
    }

    #[test]
    fn temperament_grouping() {
        assert_eq!(Temperament::of(&code(0.9, 0.9, 0.9, 0.1)), Some(Temperament::Nt));
        assert_eq!(Temperament::of(&code(0.1, 0.9, 0.1, 0.9)), Some(Temperament::Nf));
        assert_eq!(Temperament::of(&code(0.1, 0.1, 0.9, 0.9)), Some(Temperament::Sj));
        assert_eq!(Temperament::of(&code(0.9, 0.1, 0.1, 0.1)), Some(Temperament::Sp));
    }

    #[test]
    fn prior_sums_to_one() {
        for c in ["ENTJ", "INFP", "ISTJ", "ESFP"] {
            let prior = temperament_prior(&code_from(c));
            let total: f64 = prior.0.iter().sum();
            assert!((total - 1.0).abs() < 1e-12, "{c}");
            assert!(prior.0.iter().all(|&p| p > 0.0));
        }
    }

    #[test]
    fn nt_favours_type_five_then_one() {
        let prior = temperament_prior(&code_from("INTP"));
        let total = PRIOR_BASE * 9.0 + 0.06;
        assert!((prior.get(NineType::Five) - 0.15 / total).abs() < 1e-12);
        assert!((prior.get(NineType::One) - 0.13 / total).abs() < 1e-12);
        assert!((prior.get(NineType::Eight) - 0.11 / total).abs() < 1e-12);
    }

    #[test]
    fn sj_and_sp_codes_get_the_flat_prior() {
        for c in ["ESTJ", "ISTJ", "ESFJ", "ISFJ", "ESTP", "ISTP", "ESFP", "ISFP"] {
            let code = code_from(c);
            assert!(!Temperament::Sj.fires_for(&code), "{c}");
            assert!(!Temperament::Sp.fires_for(&code), "{c}");
            let prior = temperament_prior(&code);
            for &p in prior.0.iter() {
                assert!((p - 1.0 / 9.0).abs() < 1e-12, "{c}");
            }
        }
    }

    #[test]
    fn only_adjacent_labels_fire() {
        let intj = code_from("INTJ");
        assert!(Temperament::Nt.fires_for(&intj));
        assert!(!Temperament::Nf.fires_for(&intj));
        assert!(Temperament::Nf.fires_for(&code_from("ENFP")));
        // Grouped by letters, but not adjacent.
        assert_eq!(Temperament::of(&code_from("ESTJ")), Some(Temperament::Sj));
    }

    fn code_from(s: &str) -> TypeCode {
        let letter = |i: usize, positive: char| {
            if s.chars().nth(i) == Some(positive) { 0.9 } else { 0.1 }
        };
        code(letter(0, 'E'), letter(1, 'N'), letter(2, 'T'), letter(3, 'J'))
    }
}
