use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use set_arena::{
    display::NullDisplay,
    rules::{find_matches, has_match},
    table::{Card, Deck, TableState},
};
use std::{hint::black_box, sync::Arc};

fn sum_mod_three(cards: &[Card]) -> bool {
    cards.iter().map(|c| c.0).sum::<u32>() % 3 == 0
}

/// Table with every slot dealt from a seeded deck
fn dealt_table(size: usize, players: usize) -> TableState {
    let mut table = TableState::new(size, players, 3, Arc::new(NullDisplay));
    let mut deck = Deck::seeded(81, 5);
    for slot in 0..size {
        if let Some(card) = deck.draw() {
            table.place_card(card, slot).unwrap();
        }
    }
    table
}

/// Benchmark a token toggled on and off again
fn bench_toggle_token(c: &mut Criterion) {
    let mut table = dealt_table(12, 4);

    c.bench_function("toggle_token_pair", |b| {
        b.iter(|| {
            table.toggle_token(black_box(1), black_box(7));
            table.toggle_token(black_box(1), black_box(7));
        });
    });
}

/// Benchmark a full round reset
fn bench_clear_table(c: &mut Criterion) {
    c.bench_function("remove_all_cards", |b| {
        b.iter_batched(
            || {
                let mut table = dealt_table(12, 4);
                for player in 0..4 {
                    for slot in player..player + 3 {
                        table.place_token(player, slot);
                    }
                }
                table
            },
            |mut table| {
                table.remove_all_tokens();
                table.remove_all_cards()
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark match search with different table sizes
fn bench_find_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");

    for size in [12, 15, 21].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_cards", size)),
            size,
            |b, &n| {
                let cards = dealt_table(n, 1).cards();
                b.iter(|| find_matches(&sum_mod_three, black_box(&cards), 3, usize::MAX));
            },
        );
    }

    group.finish();
}

/// Benchmark the end-of-game check over a whole deck
fn bench_deck_has_match(c: &mut Criterion) {
    let deck = Deck::seeded(81, 9);

    c.bench_function("deck_has_match", |b| {
        b.iter(|| has_match(&sum_mod_three, black_box(deck.cards()), 3));
    });
}

criterion_group!(table_operations, bench_toggle_token, bench_clear_table);

criterion_group!(match_search, bench_find_matches, bench_deck_has_match);

criterion_main!(table_operations, match_search);
