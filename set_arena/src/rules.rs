//! Validity predicate boundary and match search helpers.

use crate::table::Card;

/// Decides whether a group of cards forms a match.
///
/// Implementations must be pure: the dealer calls [`MatchRules::is_match`]
/// while holding the table write lock.
pub trait MatchRules: Send + Sync {
    fn is_match(&self, cards: &[Card]) -> bool;
}

impl<F> MatchRules for F
where
    F: Fn(&[Card]) -> bool + Send + Sync,
{
    fn is_match(&self, cards: &[Card]) -> bool {
        self(cards)
    }
}

/// Enumerates up to `limit` matches of `size` cards among `cards`, in
/// lexicographic order of positions.
pub fn find_matches(
    rules: &dyn MatchRules,
    cards: &[Card],
    size: usize,
    limit: usize,
) -> Vec<Vec<Card>> {
    let mut found = Vec::new();
    if size == 0 || size > cards.len() || limit == 0 {
        return found;
    }

    let n = cards.len();
    let mut idx: Vec<usize> = (0..size).collect();
    let mut group = Vec::with_capacity(size);
    loop {
        group.clear();
        group.extend(idx.iter().map(|&i| cards[i]));
        if rules.is_match(&group) {
            found.push(group.clone());
            if found.len() == limit {
                return found;
            }
        }

        // Advance to the next combination
        let Some(pos) = (0..size).rev().find(|&i| idx[i] != i + n - size) else {
            return found;
        };
        idx[pos] += 1;
        for i in pos + 1..size {
            idx[i] = idx[i - 1] + 1;
        }
    }
}

pub fn has_match(rules: &dyn MatchRules, cards: &[Card], size: usize) -> bool {
    !find_matches(rules, cards, size, 1).is_empty()
}
