//! Termination and generator-driven play.

mod common;

use common::{RecordingDisplay, first_triple_only, slot_of, sum_mod_three, table_full, wait_until};
use set_arena::{AgentState, Card, GameConfig, GameSession};
use std::{collections::HashSet, sync::Arc, time::Duration};

const LIMIT: Duration = Duration::from_secs(5);

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_terminate_ends_long_freeze() {
    let display = RecordingDisplay::new();
    let config = GameConfig {
        table_size: 12,
        deck_size: 12,
        players: 1,
        human_players: 1,
        penalty_freeze_ms: 60_000,
        freeze_poll_interval_ms: 1_000,
        ..Default::default()
    };
    let game = GameSession::new(config, Arc::new(first_triple_only), display.clone())
        .unwrap()
        .start();

    let table = game.table().clone();
    wait_until(LIMIT, || table_full(&table, 12)).await;

    let player = game.player(0).unwrap().clone();
    for card in 6..9 {
        let slot = slot_of(&table, card).await;
        assert!(player.key_pressed(slot).await);
    }
    player
        .watch_state()
        .wait_for(|s| *s == AgentState::Frozen)
        .await
        .unwrap();

    game.terminator().terminate();
    let summary = tokio::time::timeout(Duration::from_secs(2), game.join())
        .await
        .expect("frozen player should not hold up termination")
        .unwrap();

    assert_eq!(summary.scores, vec![(0, 0)]);
    assert_eq!(player.state(), AgentState::Terminated);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_terminate_is_idempotent() {
    let game = GameSession::new(
        GameConfig {
            players: 2,
            ..Default::default()
        },
        Arc::new(sum_mod_three),
        RecordingDisplay::new(),
    )
    .unwrap()
    .start();

    let terminator = game.terminator();
    terminator.terminate();
    terminator.terminate();
    assert!(terminator.is_terminated());

    let summary = tokio::time::timeout(LIMIT, game.join()).await.unwrap().unwrap();
    assert_eq!(summary.scores.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_generators_keep_table_consistent() {
    let display = RecordingDisplay::new();
    let config = GameConfig {
        players: 4,
        human_players: 0,
        round_duration_ms: 200,
        warning_threshold_ms: 100,
        point_freeze_ms: 5,
        penalty_freeze_ms: 10,
        freeze_poll_interval_ms: 5,
        tick_interval_ms: 10,
        warning_tick_interval_ms: 5,
        ai_think_time_ms: 1,
        ai_think_variance_ms: 0,
        ..Default::default()
    };
    let game = GameSession::new(config, Arc::new(sum_mod_three), display.clone())
        .unwrap()
        .with_seed(42)
        .start();

    let table = game.table().clone();
    let sampling = tokio::time::timeout(Duration::from_millis(500), async {
        loop {
            {
                let table = table.read().await;
                let mut seen = HashSet::new();
                for slot in 0..table.size() {
                    if let Some(card) = table.card_at(slot) {
                        assert!(seen.insert(card), "{} placed twice", card);
                        assert_eq!(table.slot_of(card), Some(slot));
                    } else {
                        assert!(table.players_on(slot).is_empty());
                    }
                }
                for player in 0..4 {
                    let tokens = table.tokens_of(player);
                    assert!(tokens.len() <= 3);
                    for &slot in tokens {
                        assert!(table.card_at(slot).is_some());
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await;
    assert!(sampling.is_err());

    game.terminate();
    let summary = tokio::time::timeout(LIMIT, game.join()).await.unwrap().unwrap();

    let best = summary.scores.iter().map(|&(_, s)| s).max().unwrap();
    for winner in &summary.winners {
        assert_eq!(summary.scores[*winner].1, best);
    }
    for (player, score) in &summary.scores {
        if *score > 0 {
            assert_eq!(display.score(*player), Some(*score));
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_exhausted_deck_ends_game() {
    // Nine cards, and only a full triple of the first three scores
    let config = GameConfig {
        table_size: 9,
        deck_size: 9,
        players: 1,
        human_players: 1,
        round_duration_ms: -1,
        point_freeze_ms: 0,
        ..Default::default()
    };
    let display = RecordingDisplay::new();
    let game = GameSession::new(config, Arc::new(first_triple_only), display.clone())
        .unwrap()
        .start();

    let table = game.table().clone();
    wait_until(LIMIT, || table_full(&table, 9)).await;

    let player = game.player(0).unwrap().clone();
    for card in 0..3 {
        let slot = slot_of(&table, card).await;
        assert!(player.key_pressed(slot).await);
    }

    // No match left on the table ends the hidden round, and the deck then
    // holds none either
    let summary = tokio::time::timeout(LIMIT, game.join()).await.unwrap().unwrap();
    assert_eq!(summary.scores, vec![(0, 1)]);
    assert_eq!(summary.winners, vec![0]);
    assert!(!table.read().await.cards().contains(&Card(0)));
}
