//! Keyboard input for human players.
//!
//! Each stdin line is either `<player> <slot>` or `quit`. Lines are read on a
//! detached thread and forwarded to an async task that presses keys on the
//! player handles.

use set_arena::{PlayerHandle, PlayerId, Slot, Terminator};
use std::io::BufRead;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Press { player: PlayerId, slot: Slot },
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Expected '<player> <slot>' or 'quit'")]
    Malformed,

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let mut words = line.split_whitespace();
    let (Some(first), second, None) = (words.next(), words.next(), words.next()) else {
        return Err(InputError::Malformed);
    };

    match (first, second) {
        ("q" | "quit", None) => Ok(Command::Quit),
        (player, Some(slot)) => Ok(Command::Press {
            player: parse_number(player)?,
            slot: parse_number(slot)?,
        }),
        _ => Err(InputError::Malformed),
    }
}

fn parse_number(word: &str) -> Result<usize, InputError> {
    word.parse()
        .map_err(|_| InputError::NotANumber(word.to_string()))
}

/// Reads stdin lines on a detached thread until end of input
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Applies input lines until input ends or `quit` is read. Only the first
/// `humans` players accept input.
pub async fn forward_input(
    mut lines: mpsc::UnboundedReceiver<String>,
    players: Vec<PlayerHandle>,
    humans: usize,
    terminator: Terminator,
) {
    while let Some(line) = lines.recv().await {
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => {
                log::info!("Quit requested");
                terminator.terminate();
                break;
            }
            Ok(Command::Press { player, slot }) => {
                let Some(handle) = players.get(player).filter(|_| player < humans) else {
                    log::warn!("Player {} does not take keyboard input", player);
                    continue;
                };
                if !handle.key_pressed(slot).await {
                    log::debug!("Press of slot {} by player {} ignored", slot, player);
                }
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}
