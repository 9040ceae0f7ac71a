//! Classic SET deck: 81 cards, four features with three values each.

use set_arena::{Card, MatchRules};

pub const FEATURES: usize = 4;
pub const VALUES: u32 = 3;
pub const DECK_SIZE: usize = 81;

/// A card id encodes its features in base 3, lowest digit first
pub fn features(card: Card) -> [u32; FEATURES] {
    let mut id = card.0;
    let mut out = [0; FEATURES];
    for feature in &mut out {
        *feature = id % VALUES;
        id /= VALUES;
    }
    out
}

/// Three cards match when every feature is either shared by all of them or
/// differs on each.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicSet;

impl MatchRules for ClassicSet {
    fn is_match(&self, cards: &[Card]) -> bool {
        if cards.len() != VALUES as usize || cards.iter().any(|c| c.0 as usize >= DECK_SIZE) {
            return false;
        }

        let decoded: Vec<[u32; FEATURES]> = cards.iter().map(|&c| features(c)).collect();
        // Three values in 0..3 are all-equal or all-distinct iff their sum is 0 mod 3
        (0..FEATURES).all(|f| decoded.iter().map(|d| d[f]).sum::<u32>() % VALUES == 0)
    }
}

/// Human readable card, for the console
pub fn describe(card: Card) -> String {
    const COUNT: [&str; 3] = ["one", "two", "three"];
    const COLOR: [&str; 3] = ["red", "green", "purple"];
    const SHADING: [&str; 3] = ["solid", "striped", "open"];
    const SHAPE: [&str; 3] = ["oval", "diamond", "squiggle"];

    if card.0 as usize >= DECK_SIZE {
        return card.to_string();
    }
    let [count, color, shading, shape] = features(card).map(|v| v as usize);
    format!(
        "{} {} {} {}",
        COUNT[count], COLOR[color], SHADING[shading], SHAPE[shape]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn card(f: [u32; FEATURES]) -> Card {
        Card(f[0] + 3 * f[1] + 9 * f[2] + 27 * f[3])
    }

    /// The unique card completing a match with `a` and `b`
    fn third(a: Card, b: Card) -> Card {
        let (fa, fb) = (features(a), features(b));
        let mut fc = [0; FEATURES];
        for i in 0..FEATURES {
            fc[i] = (2 * VALUES - fa[i] - fb[i]) % VALUES;
        }
        card(fc)
    }

    #[test]
    fn test_features_roundtrip() {
        assert_eq!(features(Card(0)), [0, 0, 0, 0]);
        assert_eq!(features(Card(80)), [2, 2, 2, 2]);
        assert_eq!(features(Card(5)), [2, 1, 0, 0]);
        assert_eq!(card(features(Card(47))), Card(47));
    }

    #[test]
    fn test_all_same_and_all_different() {
        let rules = ClassicSet;
        // Differ only in the first feature
        assert!(rules.is_match(&[Card(0), Card(1), Card(2)]));
        // Differ in every feature
        assert!(rules.is_match(&[
            card([0, 0, 0, 0]),
            card([1, 1, 1, 1]),
            card([2, 2, 2, 2])
        ]));
    }

    #[test]
    fn test_two_and_one_is_not_a_match() {
        let rules = ClassicSet;
        assert!(!rules.is_match(&[Card(0), Card(1), Card(3)]));
        assert!(!rules.is_match(&[
            card([0, 1, 2, 0]),
            card([0, 1, 2, 0]),
            card([0, 1, 2, 1])
        ]));
    }

    #[test]
    fn test_wrong_group_size_or_unknown_card() {
        let rules = ClassicSet;
        assert!(!rules.is_match(&[Card(0), Card(1)]));
        assert!(!rules.is_match(&[Card(0), Card(1), Card(2), Card(3)]));
        assert!(!rules.is_match(&[Card(0), Card(1), Card(81)]));
    }

    #[test]
    fn test_random_pairs_have_a_unique_completion() {
        let rules = ClassicSet;
        let mut rng = rand::rng();
        for _ in 0..200 {
            let a = Card(rng.random_range(0..81));
            let b = Card(rng.random_range(0..81));
            if a == b {
                continue;
            }
            let c = third(a, b);
            assert!(rules.is_match(&[a, b, c]), "{} {} {}", a, b, c);

            let completions = (0..81)
                .map(Card)
                .filter(|&x| rules.is_match(&[a, b, x]))
                .count();
            assert_eq!(completions, 1);
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(Card(0)), "one red solid oval");
        assert_eq!(describe(Card(80)), "three purple open squiggle");
        assert_eq!(describe(Card(90)), "#90");
    }
}
