//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the aggregators during a single scoring call
//! - returned to callers as one immutable result
//! - exported to JSON/CSV by the front-end

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ScoringError;

/// Questionnaire item identifier.
pub type ItemId = u32;

/// Inclusive bounds of an ordinal agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertScale {
    pub min: i32,
    pub max: i32,
}

impl LikertScale {
    /// Canonical 7-point scale.
    pub const SEVEN_POINT: LikertScale = LikertScale { min: 1, max: 7 };
    /// Legacy 5-point scale.
    pub const FIVE_POINT: LikertScale = LikertScale { min: 1, max: 5 };

    /// Widest accepted scale, in points between `min` and `max`.
    pub const MAX_SPAN: i64 = 100;

    pub fn new(min: i32, max: i32) -> Result<Self, ScoringError> {
        if min >= max {
            return Err(ScoringError::InvalidScale { min, max });
        }
        if i64::from(max) - i64::from(min) > Self::MAX_SPAN {
            return Err(ScoringError::ScaleTooWide {
                min,
                max,
                limit: Self::MAX_SPAN,
            });
        }
        Ok(Self { min, max })
    }

    /// Reject a scale that was built directly (fields are public).
    pub fn check(self) -> Result<Self, ScoringError> {
        Self::new(self.min, self.max)
    }

    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Mirror a value about the scale midpoint (`max + min - value`).
    ///
    /// Computed in `i64` and saturated, so unchecked extreme bounds never overflow.
    pub fn reflect(self, value: i32) -> i32 {
        let mirrored = i64::from(self.max) + i64::from(self.min) - i64::from(value);
        mirrored.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    pub fn span(self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    /// Midpoint, which may fall between two integer responses on even-length scales.
    pub fn midpoint(self) -> f64 {
        (f64::from(self.min) + f64::from(self.max)) / 2.0
    }
}

impl Default for LikertScale {
    fn default() -> Self {
        Self::SEVEN_POINT
    }
}

/// The five Big5 traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Big5Trait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Big5Trait {
    pub const ALL: [Big5Trait; 5] = [
        Big5Trait::Openness,
        Big5Trait::Conscientiousness,
        Big5Trait::Extraversion,
        Big5Trait::Agreeableness,
        Big5Trait::Neuroticism,
    ];

    /// Single-letter code (`O`, `C`, `E`, `A`, `N`).
    pub fn code(self) -> char {
        match self {
            Big5Trait::Openness => 'O',
            Big5Trait::Conscientiousness => 'C',
            Big5Trait::Extraversion => 'E',
            Big5Trait::Agreeableness => 'A',
            Big5Trait::Neuroticism => 'N',
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Big5Trait::Openness => "Openness",
            Big5Trait::Conscientiousness => "Conscientiousness",
            Big5Trait::Extraversion => "Extraversion",
            Big5Trait::Agreeableness => "Agreeableness",
            Big5Trait::Neuroticism => "Neuroticism",
        }
    }
}

/// One value per Big5 trait.
///
/// A fixed-shape record rather than a map: every trait is always present, and the
/// trait set is checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerTrait<T> {
    pub openness: T,
    pub conscientiousness: T,
    pub extraversion: T,
    pub agreeableness: T,
    pub neuroticism: T,
}

impl<T> PerTrait<T> {
    pub fn from_fn(mut f: impl FnMut(Big5Trait) -> T) -> Self {
        Self {
            openness: f(Big5Trait::Openness),
            conscientiousness: f(Big5Trait::Conscientiousness),
            extraversion: f(Big5Trait::Extraversion),
            agreeableness: f(Big5Trait::Agreeableness),
            neuroticism: f(Big5Trait::Neuroticism),
        }
    }

    pub fn get(&self, t: Big5Trait) -> &T {
        match t {
            Big5Trait::Openness => &self.openness,
            Big5Trait::Conscientiousness => &self.conscientiousness,
            Big5Trait::Extraversion => &self.extraversion,
            Big5Trait::Agreeableness => &self.agreeableness,
            Big5Trait::Neuroticism => &self.neuroticism,
        }
    }

    pub fn get_mut(&mut self, t: Big5Trait) -> &mut T {
        match t {
            Big5Trait::Openness => &mut self.openness,
            Big5Trait::Conscientiousness => &mut self.conscientiousness,
            Big5Trait::Extraversion => &mut self.extraversion,
            Big5Trait::Agreeableness => &mut self.agreeableness,
            Big5Trait::Neuroticism => &mut self.neuroticism,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Big5Trait, &T)> {
        Big5Trait::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerTrait<U> {
        PerTrait::from_fn(|t| f(self.get(t)))
    }
}

/// Partial Big5 loading record for one item; the sign of a weight encodes direction.
pub type Big5Loadings = PerTrait<Option<f64>>;

/// The four bipolar typological axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Axis {
    Ei,
    Sn,
    Tf,
    Jp,
}

impl Axis {
    /// Axes in type-code order.
    pub const ALL: [Axis; 4] = [Axis::Ei, Axis::Sn, Axis::Tf, Axis::Jp];

    /// Letter used when the axis value is at or above its midpoint.
    pub fn positive_letter(self) -> char {
        match self {
            Axis::Ei => 'E',
            Axis::Sn => 'N',
            Axis::Tf => 'T',
            Axis::Jp => 'J',
        }
    }

    /// Letter used when the axis value is below its midpoint.
    pub fn negative_letter(self) -> char {
        match self {
            Axis::Ei => 'I',
            Axis::Sn => 'S',
            Axis::Tf => 'F',
            Axis::Jp => 'P',
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Axis::Ei => "EI",
            Axis::Sn => "SN",
            Axis::Tf => "TF",
            Axis::Jp => "JP",
        }
    }
}

/// Which pole of its axis an item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSign {
    Positive,
    Negative,
}

/// Axis membership of a typological item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLoading {
    pub axis: Axis,
    pub sign: AxisSign,
}

/// One value per typological axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerAxis<T> {
    pub ei: T,
    pub sn: T,
    pub tf: T,
    pub jp: T,
}

impl<T> PerAxis<T> {
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            ei: f(Axis::Ei),
            sn: f(Axis::Sn),
            tf: f(Axis::Tf),
            jp: f(Axis::Jp),
        }
    }

    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Ei => &self.ei,
            Axis::Sn => &self.sn,
            Axis::Tf => &self.tf,
            Axis::Jp => &self.jp,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Ei => &mut self.ei,
            Axis::Sn => &mut self.sn,
            Axis::Tf => &mut self.tf,
            Axis::Jp => &mut self.jp,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerAxis<U> {
        PerAxis::from_fn(|a| f(self.get(a)))
    }
}

/// Nine-type model type (1..=9). Serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NineType {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
}

impl NineType {
    pub const ALL: [NineType; 9] = [
        NineType::One,
        NineType::Two,
        NineType::Three,
        NineType::Four,
        NineType::Five,
        NineType::Six,
        NineType::Seven,
        NineType::Eight,
        NineType::Nine,
    ];

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Zero-based position in [`NineType::ALL`].
    pub fn index(self) -> usize {
        match self {
            NineType::One => 0,
            NineType::Two => 1,
            NineType::Three => 2,
            NineType::Four => 3,
            NineType::Five => 4,
            NineType::Six => 5,
            NineType::Seven => 6,
            NineType::Eight => 7,
            NineType::Nine => 8,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=9 => Some(Self::ALL[usize::from(n - 1)]),
            _ => None,
        }
    }

    /// The two neighbours on the nine-point circle (9 wraps to 1).
    pub fn neighbours(self) -> [NineType; 2] {
        let i = self.index();
        [Self::ALL[(i + 8) % 9], Self::ALL[(i + 1) % 9]]
    }
}

impl TryFrom<u8> for NineType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        NineType::from_number(value).ok_or_else(|| format!("nine-type must be 1..=9, got {value}"))
    }
}

impl From<NineType> for u8 {
    fn from(value: NineType) -> Self {
        value.number()
    }
}

impl fmt::Display for NineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One value per nine-type, indexed by [`NineType::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerType<T>(pub [T; 9]);

impl<T> PerType<T> {
    pub fn from_fn(mut f: impl FnMut(NineType) -> T) -> Self {
        Self(NineType::ALL.map(&mut f))
    }

    pub fn get(&self, t: NineType) -> &T {
        &self.0[t.index()]
    }

    pub fn get_mut(&mut self, t: NineType) -> &mut T {
        &mut self.0[t.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NineType, &T)> {
        NineType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

/// Partial nine-type loading record for one item.
pub type NineTypeLoadings = PerType<Option<f64>>;

fn default_item_weight() -> f64 {
    1.0
}

/// Static metadata for one questionnaire item.
///
/// An item may feed any combination of the three models: at most one typological
/// axis, zero or more Big5 traits, zero or more nine-types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisLoading>,
    #[serde(default)]
    pub big5: Big5Loadings,
    #[serde(default)]
    pub nine_type: NineTypeLoadings,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default = "default_item_weight")]
    pub weight: f64,
}

impl ItemMeta {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            prompt: None,
            axis: None,
            big5: Big5Loadings::default(),
            nine_type: NineTypeLoadings::default(),
            reverse: false,
            weight: 1.0,
        }
    }

    pub fn prompt(mut self, text: &str) -> Self {
        self.prompt = Some(text.to_string());
        self
    }

    pub fn axis(mut self, axis: Axis, sign: AxisSign) -> Self {
        self.axis = Some(AxisLoading { axis, sign });
        self
    }

    pub fn big5(mut self, t: Big5Trait, weight: f64) -> Self {
        *self.big5.get_mut(t) = Some(weight);
        self
    }

    pub fn nine_type(mut self, t: NineType, weight: f64) -> Self {
        *self.nine_type.get_mut(t) = Some(weight);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn has_big5(&self) -> bool {
        self.big5.iter().any(|(_, w)| w.is_some())
    }

    pub fn has_nine_type(&self) -> bool {
        self.nine_type.iter().any(|(_, w)| w.is_some())
    }
}

/// Raw responses for one assessment, keyed by item id.
///
/// Ordered so iteration and fingerprinting are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<ItemId, i32>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from positional answers: position `i` answers item `i + 1`.
    pub fn from_positional(values: &[i32]) -> Self {
        Self(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as ItemId + 1, v))
                .collect(),
        )
    }

    pub fn insert(&mut self, id: ItemId, value: i32) -> Option<i32> {
        self.0.insert(id, value)
    }

    pub fn get(&self, id: ItemId) -> Option<i32> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, i32)> + '_ {
        self.0.iter().map(|(&id, &v)| (id, v))
    }

    /// SHA-256 over the sorted `(id, value)` pairs, hex encoded.
    ///
    /// Stable across runs and platforms; callers use it as an idempotency key.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (id, value) in self.iter() {
            hasher.update(id.to_be_bytes());
            hasher.update(value.to_be_bytes());
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

impl FromIterator<(ItemId, i32)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (ItemId, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Big5 confidence: per-trait distance from neutral plus the mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Big5Confidence {
    pub overall: f64,
    pub traits: PerTrait<f64>,
}

/// Big5 output: scaled scores, blended `[0,1]` values, confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Big5Result {
    pub scores: PerTrait<u8>,
    pub values: PerTrait<f64>,
    pub confidence: Big5Confidence,
}

/// Four-letter typological code, e.g. `ENTJ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCode(String);

impl TypeCode {
    /// Threshold every axis at its midpoint.
    pub fn from_axes(axis01: &PerAxis<f64>) -> Self {
        Self(
            Axis::ALL
                .iter()
                .map(|&axis| {
                    if *axis01.get(axis) >= 0.5 {
                        axis.positive_letter()
                    } else {
                        axis.negative_letter()
                    }
                })
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Letter at the given axis position, if the code is well formed.
    pub fn letter(&self, axis: Axis) -> Option<char> {
        let pos = Axis::ALL.iter().position(|&a| a == axis)?;
        self.0.chars().nth(pos)
    }

    /// `^[EI][NS][TF][JP]$`.
    pub fn is_well_formed(&self) -> bool {
        self.0.chars().count() == 4
            && Axis::ALL.iter().all(|&axis| {
                self.letter(axis)
                    .is_some_and(|c| c == axis.positive_letter() || c == axis.negative_letter())
            })
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typological confidence with per-axis boundary flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypologyConfidence {
    pub overall: f64,
    pub axes: PerAxis<f64>,
    pub boundary: PerAxis<bool>,
}

/// Typological output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypologyResult {
    pub code: TypeCode,
    pub axis01: PerAxis<f64>,
    pub axis100: PerAxis<u8>,
    pub confidence: TypologyConfidence,
}

/// One entry of the nine-type distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NineTypeProbability {
    #[serde(rename = "type")]
    pub nine_type: NineType,
    pub p: f64,
}

/// Nine-type output: distribution sorted by descending probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NineTypeResult {
    pub primary: NineType,
    pub prob_top: f64,
    pub distribution: Vec<NineTypeProbability>,
}

/// The nine Inner9 composite dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inner9Dimension {
    Creation,
    Will,
    Expression,
    Harmony,
    Sensitivity,
    Insight,
    Resilience,
    Balance,
    Growth,
}

impl Inner9Dimension {
    pub const ALL: [Inner9Dimension; 9] = [
        Inner9Dimension::Creation,
        Inner9Dimension::Will,
        Inner9Dimension::Expression,
        Inner9Dimension::Harmony,
        Inner9Dimension::Sensitivity,
        Inner9Dimension::Insight,
        Inner9Dimension::Resilience,
        Inner9Dimension::Balance,
        Inner9Dimension::Growth,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Inner9Dimension::Creation => "creation",
            Inner9Dimension::Will => "will",
            Inner9Dimension::Expression => "expression",
            Inner9Dimension::Harmony => "harmony",
            Inner9Dimension::Sensitivity => "sensitivity",
            Inner9Dimension::Insight => "insight",
            Inner9Dimension::Resilience => "resilience",
            Inner9Dimension::Balance => "balance",
            Inner9Dimension::Growth => "growth",
        }
    }
}

/// Inner9 composite scores, each in `[0,100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inner9Scores {
    pub creation: u8,
    pub will: u8,
    pub expression: u8,
    pub harmony: u8,
    pub sensitivity: u8,
    pub insight: u8,
    pub resilience: u8,
    pub balance: u8,
    pub growth: u8,
}

impl Inner9Scores {
    pub fn get(&self, dim: Inner9Dimension) -> u8 {
        match dim {
            Inner9Dimension::Creation => self.creation,
            Inner9Dimension::Will => self.will,
            Inner9Dimension::Expression => self.expression,
            Inner9Dimension::Harmony => self.harmony,
            Inner9Dimension::Sensitivity => self.sensitivity,
            Inner9Dimension::Insight => self.insight,
            Inner9Dimension::Resilience => self.resilience,
            Inner9Dimension::Balance => self.balance,
            Inner9Dimension::Growth => self.growth,
        }
    }

    pub fn get_mut(&mut self, dim: Inner9Dimension) -> &mut u8 {
        match dim {
            Inner9Dimension::Creation => &mut self.creation,
            Inner9Dimension::Will => &mut self.will,
            Inner9Dimension::Expression => &mut self.expression,
            Inner9Dimension::Harmony => &mut self.harmony,
            Inner9Dimension::Sensitivity => &mut self.sensitivity,
            Inner9Dimension::Insight => &mut self.insight,
            Inner9Dimension::Resilience => &mut self.resilience,
            Inner9Dimension::Balance => &mut self.balance,
            Inner9Dimension::Growth => &mut self.growth,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Inner9Dimension, u8)> + '_ {
        Inner9Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// Everything one scoring call produces. Constructed once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    pub engine_version: String,
    pub generated_at: DateTime<Utc>,
    /// Fingerprint of the response set that produced this result.
    pub fingerprint: String,
    pub big5: Big5Result,
    pub typology: TypologyResult,
    pub nine_type: NineTypeResult,
    pub inner9: Inner9Scores,
    /// Set when the neutral fallback replaced a result that failed validation.
    #[serde(default)]
    pub fallback: bool,
}
