//! Shared table state guarded by a single reader/writer lock.

use super::{
    entities::{Card, PlayerId, Slot},
    errors::{TableError, TableResult},
};
use crate::display::DisplaySink;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Result of toggling a token on a slot
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Toggle {
    Placed,
    Removed,
    /// Slot is empty, out of range, or the player already holds `match_size` tokens
    Rejected,
}

/// Slot/card bijection plus the two mirrored token indexes.
///
/// Every mutating method takes `&mut self`, so outside of tests it can only be
/// reached through a [`SharedTable::write`] guard.
pub struct TableState {
    slot_to_card: Vec<Option<Card>>,
    card_to_slot: HashMap<Card, Slot>,
    player_to_slots: Vec<Vec<Slot>>,
    slot_to_players: Vec<HashSet<PlayerId>>,
    match_size: usize,
    display: Arc<dyn DisplaySink>,
}

impl TableState {
    pub fn new(
        table_size: usize,
        players: usize,
        match_size: usize,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            slot_to_card: vec![None; table_size],
            card_to_slot: HashMap::with_capacity(table_size),
            player_to_slots: vec![Vec::with_capacity(match_size); players],
            slot_to_players: vec![HashSet::new(); table_size],
            match_size,
            display,
        }
    }

    pub fn size(&self) -> usize {
        self.slot_to_card.len()
    }

    pub fn match_size(&self) -> usize {
        self.match_size
    }

    pub fn card_at(&self, slot: Slot) -> Option<Card> {
        self.slot_to_card.get(slot).copied().flatten()
    }

    pub fn slot_of(&self, card: Card) -> Option<Slot> {
        self.card_to_slot.get(&card).copied()
    }

    /// Slots holding this player's tokens, in placement order
    pub fn tokens_of(&self, player: PlayerId) -> &[Slot] {
        self.player_to_slots
            .get(player)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_token(&self, player: PlayerId, slot: Slot) -> bool {
        self.slot_to_players
            .get(slot)
            .is_some_and(|players| players.contains(&player))
    }

    /// Players holding a token on `slot`, in no particular order
    pub fn players_on(&self, slot: Slot) -> Vec<PlayerId> {
        self.slot_to_players
            .get(slot)
            .map(|players| players.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_at_threshold(&self, player: PlayerId) -> bool {
        self.tokens_of(player).len() == self.match_size
    }

    pub fn count_placed_cards(&self) -> usize {
        self.card_to_slot.len()
    }

    /// Cards on the table, ordered by slot
    pub fn cards(&self) -> Vec<Card> {
        self.slot_to_card.iter().flatten().copied().collect()
    }

    pub fn empty_slots(&self) -> Vec<Slot> {
        (0..self.size())
            .filter(|&slot| self.slot_to_card[slot].is_none())
            .collect()
    }

    /// Cards currently under this player's tokens, in token order
    pub fn cards_of(&self, player: PlayerId) -> Vec<Card> {
        self.tokens_of(player)
            .iter()
            .filter_map(|&slot| self.card_at(slot))
            .collect()
    }

    pub fn place_card(&mut self, card: Card, slot: Slot) -> TableResult<()> {
        let size = self.size();
        let current = self
            .slot_to_card
            .get(slot)
            .ok_or(TableError::SlotOutOfRange { slot, size })?;
        if let Some(existing) = current {
            return Err(TableError::SlotOccupied {
                slot,
                card: *existing,
            });
        }
        if let Some(&other) = self.card_to_slot.get(&card) {
            return Err(TableError::CardAlreadyPlaced { card, slot: other });
        }

        self.slot_to_card[slot] = Some(card);
        self.card_to_slot.insert(card, slot);
        self.display.place_card(card, slot);
        Ok(())
    }

    /// Empties a slot. Every token on it, whoever owns it, goes with the card.
    pub fn remove_card(&mut self, slot: Slot) -> Option<Card> {
        let card = self.slot_to_card.get_mut(slot)?.take()?;
        self.card_to_slot.remove(&card);

        for player in self.players_on(slot) {
            self.remove_token(player, slot);
        }

        self.display.remove_card(slot);
        Some(card)
    }

    pub fn place_token(&mut self, player: PlayerId, slot: Slot) -> bool {
        if self.card_at(slot).is_none() || self.has_token(player, slot) {
            return false;
        }
        let match_size = self.match_size;
        let Some(tokens) = self.player_to_slots.get_mut(player) else {
            return false;
        };
        if tokens.len() >= match_size {
            return false;
        }

        tokens.push(slot);
        self.slot_to_players[slot].insert(player);
        self.display.place_token(player, slot);
        true
    }

    pub fn remove_token(&mut self, player: PlayerId, slot: Slot) -> bool {
        let Some(players) = self.slot_to_players.get_mut(slot) else {
            return false;
        };
        if !players.remove(&player) {
            return false;
        }
        if let Some(tokens) = self.player_to_slots.get_mut(player) {
            tokens.retain(|&s| s != slot);
        }

        self.display.remove_token(player, slot);
        true
    }

    /// Removes the player's token from `slot` if present, places one otherwise
    pub fn toggle_token(&mut self, player: PlayerId, slot: Slot) -> Toggle {
        if self.remove_token(player, slot) {
            Toggle::Removed
        } else if self.place_token(player, slot) {
            Toggle::Placed
        } else {
            Toggle::Rejected
        }
    }

    pub fn remove_all_tokens(&mut self) {
        for slot in 0..self.size() {
            for player in self.players_on(slot) {
                self.remove_token(player, slot);
            }
        }
    }

    /// Clears every slot and returns the collected cards in slot order
    pub fn remove_all_cards(&mut self) -> Vec<Card> {
        (0..self.size())
            .filter_map(|slot| self.remove_card(slot))
            .collect()
    }
}

/// The table shared by the dealer and every agent
pub struct SharedTable {
    state: RwLock<TableState>,
}

impl SharedTable {
    pub fn new(state: TableState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Shared access for membership checks and display queries
    pub async fn read(&self) -> RwLockReadGuard<'_, TableState> {
        self.state.read().await
    }

    /// Exclusive access for any card or token mutation
    pub async fn write(&self) -> RwLockWriteGuard<'_, TableState> {
        self.state.write().await
    }
}
