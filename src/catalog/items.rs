//! Compiled-in 62-item questionnaire.
//!
//! Layout (item ids are 1-based and contiguous):
//!
//! - `1..=20`: typological items, five per axis; the sign names the pole the
//!   statement describes
//! - `21..=42`: nine-type items, two or three per type
//! - `43..=62`: Big5 items, four per trait with one reverse-keyed item each

use crate::domain::{Axis, AxisSign, Big5Trait, ItemMeta, NineType};

const TYPOLOGY: [(Axis, AxisSign, &str); 20] = [
    (Axis::Ei, AxisSign::Positive, "Meeting new people energizes me"),
    (Axis::Ei, AxisSign::Negative, "I need time alone to recharge"),
    (Axis::Ei, AxisSign::Positive, "At gatherings I am usually the one who starts conversations"),
    (Axis::Ei, AxisSign::Negative, "I prefer a few deep relationships over a wide network"),
    (Axis::Ei, AxisSign::Positive, "I sort out my thoughts by talking them through"),
    (Axis::Sn, AxisSign::Negative, "I focus on concrete facts and details"),
    (Axis::Sn, AxisSign::Positive, "I like seeing overall patterns and possibilities"),
    (Axis::Sn, AxisSign::Negative, "I prefer realistic, practical solutions"),
    (Axis::Sn, AxisSign::Positive, "Exploring new ideas and theories excites me"),
    (Axis::Sn, AxisSign::Negative, "I judge things based on what I have experienced"),
    (Axis::Tf, AxisSign::Positive, "When deciding, I put logic and objectivity first"),
    (Axis::Tf, AxisSign::Negative, "I weigh how a decision will affect people"),
    (Axis::Tf, AxisSign::Positive, "Critical analysis comes more naturally to me than empathy"),
    (Axis::Tf, AxisSign::Negative, "I react strongly to other people's feelings"),
    (Axis::Tf, AxisSign::Positive, "I rely on principles to judge right and wrong"),
    (Axis::Jp, AxisSign::Positive, "I like to make a plan and follow it"),
    (Axis::Jp, AxisSign::Negative, "I am comfortable adapting as situations change"),
    (Axis::Jp, AxisSign::Positive, "I finish work well ahead of deadlines"),
    (Axis::Jp, AxisSign::Negative, "I keep options open and postpone decisions"),
    (Axis::Jp, AxisSign::Positive, "I work best in an orderly environment"),
];

const NINE_TYPE: [(u8, &str); 22] = [
    (1, "I hold clear standards of right and wrong and strive for perfection"),
    (2, "Helping others is rewarding and relationships come first"),
    (3, "Achieving goals matters and I work efficiently"),
    (4, "Expressing my own individuality and feelings is important"),
    (5, "I enjoy exploring knowledge and thinking independently"),
    (6, "I value safety and trust and take responsibility seriously"),
    (7, "I seek new experiences and enjoyment and stay positive"),
    (8, "I am strong and confident and prefer to take charge"),
    (9, "I seek peaceful surroundings and avoid conflict"),
    (1, "I find mistakes and imperfection hard to accept"),
    (2, "I put other people's needs ahead of my own"),
    (3, "Recognition from others matters to me"),
    (4, "I would rather be special than ordinary"),
    (5, "I prefer analysis and observation to emotional expression"),
    (6, "I anticipate the worst case and prepare for it"),
    (7, "I dislike limits and long for freedom"),
    (8, "I dislike appearing weak and value toughness"),
    (9, "I prefer compromise to pushing my own opinion"),
    (1, "Keeping to principles and rules is important"),
    (2, "I feel proud when people need me"),
    (3, "Winning a competition matters to me"),
    (4, "I look for deep feelings and meaning"),
];

const BIG5: [(Big5Trait, bool, &str); 20] = [
    (Big5Trait::Openness, false, "I am open to new ideas and artistic experiences"),
    (Big5Trait::Openness, false, "I am imaginative and creative"),
    (Big5Trait::Openness, false, "I try new methods rather than traditional ones"),
    (Big5Trait::Openness, true, "Unfamiliar things make me uncomfortable"),
    (Big5Trait::Conscientiousness, false, "I plan thoroughly and follow through"),
    (Big5Trait::Conscientiousness, false, "I keep promises and deadlines"),
    (Big5Trait::Conscientiousness, false, "I handle work carefully and meticulously"),
    (Big5Trait::Conscientiousness, true, "I tend to act spontaneously without a plan"),
    (Big5Trait::Extraversion, false, "I am lively and full of energy"),
    (Big5Trait::Extraversion, false, "I enjoy being with people"),
    (Big5Trait::Extraversion, false, "I talk a lot and communicate actively"),
    (Big5Trait::Extraversion, true, "I am quiet and reserved"),
    (Big5Trait::Agreeableness, false, "I am kind and considerate to others"),
    (Big5Trait::Agreeableness, false, "I prefer cooperating and compromising"),
    (Big5Trait::Agreeableness, false, "I trust other people"),
    (Big5Trait::Agreeableness, true, "I can be cold and critical"),
    (Big5Trait::Neuroticism, false, "I get anxious easily under stress"),
    (Big5Trait::Neuroticism, false, "My mood goes up and down"),
    (Big5Trait::Neuroticism, false, "I worry a lot and am easily unsettled"),
    (Big5Trait::Neuroticism, true, "I am calm and stable in most situations"),
];

/// Build the default item list in id order.
pub fn default_items() -> Vec<ItemMeta> {
    let typology = TYPOLOGY
        .iter()
        .map(|&(axis, sign, text)| ItemMeta::new(0).prompt(text).axis(axis, sign));
    let nine_type = NINE_TYPE.iter().filter_map(|&(n, text)| {
        NineType::from_number(n).map(|t| ItemMeta::new(0).prompt(text).nine_type(t, 1.0))
    });
    let big5 = BIG5.iter().map(|&(t, reverse, text)| {
        let item = ItemMeta::new(0).prompt(text).big5(t, 1.0);
        if reverse { item.reversed() } else { item }
    });

    typology
        .chain(nine_type)
        .chain(big5)
        .enumerate()
        .map(|(i, item)| ItemMeta { id: i as u32 + 1, ..item })
        .collect()
}
