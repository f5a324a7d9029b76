//! The cribbage game state machine.
//!
//! `CribbageGame` owns every pile of cards at the table and enforces the rules
//! of each phase. Callers drive it through the phase operations in order:
//!
//! 1. `set_dealer` or `cut_for_dealer`
//! 2. `deal_hands`, then `send_card_to_crib` until every hand holds four cards
//! 3. `pick_starter_card`
//! 4. `play_card` / `reset_count` until `round_over`
//! 5. `count_hand` for each player, then `count_crib`
//! 6. `clear_round_state`, and back to 2
//!
//! Every operation validates completely before it mutates anything, so an
//! `Err` leaves the game exactly as it was.
//!
//! ## Card partition
//!
//! The draw pile, the hands, the crib, the played piles and the starter always
//! partition the 52-card deck. Playing a card moves it from the hand into the
//! player's played pile; a player's full holding for the show is both piles
//! together (see [`CribbageGame::held_cards`]).

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cards::{Card, Hand, Rank};
use crate::core::{
    CribbageError, GameConfig, GameRng, PlayerId, PlayerMap, Result, CRIB_SIZE, HAND_SIZE,
    MAX_COUNT, WINNING_SCORE,
};
use crate::scoring::{peg_pairs, peg_runs, score_hand, HandKind, HandScore, PegScore};

/// Where the game currently stands. Derived from the state, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No dealer chosen yet.
    Setup,
    /// Cards dealt; discarding to the crib, starter not cut.
    Dealt,
    /// Starter cut, no card played yet.
    Ready,
    /// The play is under way.
    InPlay,
    /// Every player has played all four cards; hands and crib can be counted.
    Show,
    /// Round cleared, waiting for the next deal.
    RoundDone,
    /// Someone has reached 121.
    GameOver,
}

/// A single cribbage game for two or three players.
#[derive(Clone, Debug)]
pub struct CribbageGame {
    config: GameConfig,
    deck: Hand,
    hands: PlayerMap<Hand>,
    crib: Hand,
    /// Which crib cards each seat threw; deck cards dealt to the crib have
    /// no owner.
    discards: PlayerMap<Hand>,
    played: PlayerMap<Hand>,
    /// Cards in the current count, most recent first.
    play_stack: Vector<Card>,
    scores: PlayerMap<u32>,
    dealer: Option<PlayerId>,
    next_to_play: Option<PlayerId>,
    last_to_play: Option<PlayerId>,
    starter: Option<Card>,
    count: u32,
    rng: GameRng,
}

impl CribbageGame {
    /// Create a game with no dealer and a full, shuffled draw pile.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let n = config.player_count;
        let mut rng = GameRng::new(config.seed);
        let mut deck = Hand::standard_deck();
        deck.shuffle(&mut rng);

        Ok(Self {
            config,
            deck,
            hands: PlayerMap::with_default(n),
            crib: Hand::new(),
            discards: PlayerMap::with_default(n),
            played: PlayerMap::with_default(n),
            play_stack: Vector::new(),
            scores: PlayerMap::with_value(n, 0),
            dealer: None,
            next_to_play: None,
            last_to_play: None,
            starter: None,
            count: 0,
            rng,
        })
    }

    /// Independent deep copy with a forked random stream.
    ///
    /// Simulations run on forks so they never disturb the real game's deals.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let mut copy = self.clone();
        copy.rng = self.rng.fork();
        copy
    }

    /// Replace the random stream, e.g. to give a search copy its own.
    pub(crate) fn set_rng(&mut self, rng: GameRng) {
        self.rng = rng;
    }

    fn check_player(&self, pid: PlayerId) -> Result<()> {
        if pid.index() < self.config.player_count {
            Ok(())
        } else {
            Err(CribbageError::InvalidPlayer {
                player: pid.0,
                player_count: self.config.player_count,
            })
        }
    }

    fn cards_out(&self) -> bool {
        !self.crib.is_empty()
            || self.hands.values().any(|h| !h.is_empty())
            || self.played.values().any(|p| !p.is_empty())
    }

    fn award(&mut self, pid: PlayerId, points: u32) {
        if points == 0 {
            return;
        }
        let score = &mut self.scores[pid];
        *score = (*score + points).min(WINNING_SCORE);
        if *score >= WINNING_SCORE {
            debug!(player = %pid, score = *score, "game over");
        }
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Choose the dealer. The player to the dealer's left plays first.
    pub fn set_dealer(&mut self, pid: PlayerId) -> Result<()> {
        self.check_player(pid)?;
        if self.cards_out() {
            return Err(CribbageError::RoundInProgress);
        }
        self.dealer = Some(pid);
        self.next_to_play = Some(pid.next(self.config.player_count));
        debug!(dealer = %pid, "dealer set");
        Ok(())
    }

    /// Cut the draw pile: look at one random card. The card stays in the pile.
    pub fn cut_card(&mut self) -> Result<Card> {
        if self.cards_out() {
            return Err(CribbageError::RoundInProgress);
        }
        if self.deck.is_empty() {
            return Err(CribbageError::DrawPileEmpty);
        }
        let offset = self.rng.gen_range_usize(0..self.deck.len());
        self.deck.get(offset).ok_or(CribbageError::DrawPileEmpty)
    }

    /// Every player cuts a different card; the lowest deals.
    pub fn cut_for_dealer(&mut self) -> Result<PlayerId> {
        if self.cards_out() {
            return Err(CribbageError::RoundInProgress);
        }
        let mut pile = self.deck.clone();
        let mut lowest: Option<(Card, PlayerId)> = None;
        for pid in PlayerId::all(self.config.player_count) {
            let card = pile.take_random(&mut self.rng).ok_or(CribbageError::DrawPileEmpty)?;
            trace!(player = %pid, %card, "cut for deal");
            if lowest.map_or(true, |(low, _)| card < low) {
                lowest = Some((card, pid));
            }
        }
        let (_, dealer) = lowest.ok_or(CribbageError::DrawPileEmpty)?;
        self.set_dealer(dealer)?;
        Ok(dealer)
    }

    // =========================================================================
    // Deal and discard
    // =========================================================================

    /// Refill and shuffle the draw pile, then deal starting left of the dealer.
    ///
    /// Two players get six cards each; three players get five each and one
    /// card goes straight to the crib.
    pub fn deal_hands(&mut self) -> Result<()> {
        let dealer = self.dealer.ok_or(CribbageError::DealerNotSet)?;
        if self.game_over() {
            return Err(CribbageError::GameOver);
        }
        if self.cards_out() {
            return Err(CribbageError::RoundInProgress);
        }

        self.deck = Hand::standard_deck();
        self.deck.shuffle(&mut self.rng);
        self.starter = None;
        self.count = 0;
        self.play_stack.clear();

        let n = self.config.player_count;
        for _ in 0..self.config.cards_dealt() {
            for pid in dealer.clockwise_from(n) {
                let card = self.deck.take_top().ok_or(CribbageError::DrawPileEmpty)?;
                self.hands[pid].add(card);
            }
        }
        for _ in 0..self.config.cards_to_crib_from_deck() {
            let card = self.deck.take_top().ok_or(CribbageError::DrawPileEmpty)?;
            self.crib.add(card);
        }
        for hand in self.hands.values_mut() {
            hand.sort();
        }

        debug!(dealer = %dealer, players = n, "hands dealt");
        Ok(())
    }

    /// Move a card from a player's hand into the crib.
    pub fn send_card_to_crib(&mut self, pid: PlayerId, card: Card) -> Result<()> {
        self.check_player(pid)?;
        if !self.hands[pid].contains(card) {
            return Err(CribbageError::CardNotHeld { player: pid, card });
        }
        if self.game_over() {
            return Err(CribbageError::GameOver);
        }
        if self.crib.len() >= CRIB_SIZE {
            return Err(CribbageError::CribFull);
        }
        if self.hands[pid].len() <= HAND_SIZE {
            return Err(CribbageError::HandAlreadyFinalized(pid));
        }

        self.hands[pid].remove(card);
        self.crib.add(card);
        self.discards[pid].add(card);
        debug!(player = %pid, %card, crib = self.crib.len(), "card sent to crib");
        Ok(())
    }

    /// Cut the starter card. A jack scores 2 for the dealer ("his heels").
    pub fn pick_starter_card(&mut self) -> Result<Card> {
        if self.game_over() {
            return Err(CribbageError::GameOver);
        }
        let dealer = self.dealer.ok_or(CribbageError::DealerNotSet)?;
        if self.starter.is_some() {
            return Err(CribbageError::StarterAlreadyDrawn);
        }
        if self.hands.values().any(|h| h.len() != HAND_SIZE) {
            return Err(CribbageError::HandsNotFinalized);
        }
        if self.crib.len() != CRIB_SIZE {
            return Err(CribbageError::CribIncomplete);
        }

        let starter = self
            .deck
            .take_random(&mut self.rng)
            .ok_or(CribbageError::DrawPileEmpty)?;
        self.starter = Some(starter);
        debug!(%starter, "starter cut");

        if starter.rank() == Rank::Jack {
            self.award(dealer, 2);
            debug!(dealer = %dealer, "two for his heels");
        }
        Ok(starter)
    }

    // =========================================================================
    // The play
    // =========================================================================

    /// Play a card onto the count and peg whatever it scores.
    ///
    /// On success the points (already added to the player's score) are
    /// returned, including the point for the go when nobody can follow.
    pub fn play_card(&mut self, pid: PlayerId, card: Card) -> Result<PegScore> {
        if self.game_over() {
            return Err(CribbageError::GameOver);
        }
        self.check_player(pid)?;
        if self.starter.is_none() {
            return Err(CribbageError::StarterNotDrawn);
        }
        let expected = self.next_to_play.ok_or(CribbageError::DealerNotSet)?;
        if expected != pid {
            return Err(CribbageError::NotYourTurn { player: pid, expected });
        }
        if self.card_already_played(card) {
            return Err(CribbageError::CardAlreadyPlayed(card));
        }
        if self.count + card.value() > MAX_COUNT {
            return Err(CribbageError::CountExceeded { card, count: self.count });
        }
        if !self.hands[pid].contains(card) {
            return Err(CribbageError::CardNotHeld { player: pid, card });
        }

        self.hands[pid].remove(card);
        self.played[pid].add(card);
        self.count += card.value();
        self.play_stack.push_front(card);
        self.last_to_play = Some(pid);

        let special = if self.count == 15 || self.count == MAX_COUNT { 2 } else { 0 };
        let pairs = peg_pairs(&self.play_stack);
        let runs = peg_runs(&self.play_stack);
        self.award(pid, special + pairs + runs);

        let go = u32::from(!self.move_possible() && self.count != MAX_COUNT);
        self.award(pid, go);

        let score = PegScore::new(runs, pairs, special, go);
        debug!(
            player = %pid,
            %card,
            count = self.count,
            points = score.total,
            "card played"
        );

        self.determine_next_player();
        Ok(score)
    }

    fn card_already_played(&self, card: Card) -> bool {
        self.played.values().any(|p| p.contains(card))
    }

    /// Whether `card` could go on the count now: not yet played this round and
    /// not pushing the count past 31. Says nothing about who holds it.
    #[must_use]
    pub fn can_play_card(&self, card: Card) -> bool {
        !self.card_already_played(card) && self.count + card.value() <= MAX_COUNT
    }

    fn playable(&self, pid: PlayerId) -> bool {
        self.hands[pid].iter().any(|c| self.count + c.value() <= MAX_COUNT)
    }

    /// Whether the player holds at least one card that fits under 31.
    pub fn has_playable_card(&self, pid: PlayerId) -> Result<bool> {
        self.check_player(pid)?;
        Ok(self.playable(pid))
    }

    /// Whether anyone at the table can play.
    #[must_use]
    pub fn move_possible(&self) -> bool {
        PlayerId::all(self.config.player_count).any(|pid| self.playable(pid))
    }

    #[must_use]
    pub fn count_is_31(&self) -> bool {
        self.count == MAX_COUNT
    }

    /// Cards the player may legally play right now.
    pub fn playable_cards(&self, pid: PlayerId) -> Result<Vec<Card>> {
        self.check_player(pid)?;
        Ok(self.hands[pid]
            .iter()
            .filter(|c| self.count + c.value() <= MAX_COUNT)
            .collect())
    }

    /// Pass the turn to the next player (clockwise, after the current one)
    /// who can play. Leaves it unchanged when nobody else can.
    fn determine_next_player(&mut self) {
        let Some(current) = self.next_to_play else {
            return;
        };
        let n = self.config.player_count;
        if let Some(pid) = current
            .clockwise_from(n)
            .take(n - 1)
            .find(|&pid| self.playable(pid))
        {
            self.next_to_play = Some(pid);
        }
    }

    /// Start a new count from zero.
    pub fn reset_count(&mut self) {
        self.count = 0;
        self.play_stack.clear();
        self.determine_next_player();
        debug!(next = ?self.next_to_play, "count reset");
    }

    /// Override whose turn it is.
    pub fn set_next_player(&mut self, pid: PlayerId) -> Result<()> {
        self.check_player(pid)?;
        self.next_to_play = Some(pid);
        Ok(())
    }

    /// Every player has played all four cards, or the game is over.
    #[must_use]
    pub fn round_over(&self) -> bool {
        self.game_over() || self.played.values().all(|p| p.len() == HAND_SIZE)
    }

    // =========================================================================
    // The show
    // =========================================================================

    /// Score a player's four cards with the starter, optionally pegging them.
    pub fn count_hand(&mut self, pid: PlayerId, add_to_score: bool) -> Result<HandScore> {
        self.check_player(pid)?;
        let starter = self.starter.ok_or(CribbageError::StarterNotDrawn)?;
        if add_to_score && self.game_over() {
            return Err(CribbageError::GameOver);
        }
        let held = self.held_cards(pid)?;
        if held.len() != HAND_SIZE {
            return Err(CribbageError::HandsNotFinalized);
        }

        let score = score_hand(held.as_slice(), starter, HandKind::Hand)?;
        if add_to_score {
            self.award(pid, score.total);
        }
        debug!(player = %pid, hand = %held, %starter, points = score.total, "hand counted");
        Ok(score)
    }

    /// Score the crib for the dealer.
    pub fn count_crib(&mut self) -> Result<HandScore> {
        let dealer = self.dealer.ok_or(CribbageError::DealerNotSet)?;
        if self.crib.len() != CRIB_SIZE {
            return Err(CribbageError::CribIncomplete);
        }
        let starter = self.starter.ok_or(CribbageError::StarterNotDrawn)?;
        if self.game_over() {
            return Err(CribbageError::GameOver);
        }

        let score = score_hand(self.crib.as_slice(), starter, HandKind::Crib)?;
        self.award(dealer, score.total);
        debug!(dealer = %dealer, crib = %self.crib, points = score.total, "crib counted");
        Ok(score)
    }

    /// Return every card to the draw pile and pass the deal to the left.
    pub fn clear_round_state(&mut self) -> Result<()> {
        let dealer = self.dealer.ok_or(CribbageError::DealerNotSet)?;
        let n = self.config.player_count;

        self.count = 0;
        self.play_stack.clear();
        for hand in self.hands.values_mut() {
            hand.clear();
        }
        for pile in self.played.values_mut() {
            pile.clear();
        }
        self.crib.clear();
        for thrown in self.discards.values_mut() {
            thrown.clear();
        }
        self.starter = None;
        self.deck = Hand::standard_deck();
        self.last_to_play = None;

        let new_dealer = dealer.next(n);
        self.dealer = Some(new_dealer);
        self.next_to_play = Some(new_dealer.next(n));
        debug!(dealer = %new_dealer, "round cleared");
        Ok(())
    }

    pub fn is_winner(&self, pid: PlayerId) -> Result<bool> {
        self.check_player(pid)?;
        Ok(self.scores[pid] >= WINNING_SCORE)
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.scores.values().any(|&s| s >= WINNING_SCORE)
    }

    /// The player who reached 121, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.scores
            .iter()
            .find(|(_, &s)| s >= WINNING_SCORE)
            .map(|(pid, _)| pid)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.game_over() {
            Phase::GameOver
        } else if self.dealer.is_none() {
            Phase::Setup
        } else if !self.cards_out() {
            Phase::RoundDone
        } else if self.starter.is_none() {
            Phase::Dealt
        } else if self.played.values().all(|p| p.len() == HAND_SIZE) {
            Phase::Show
        } else if self.played.values().all(|p| p.is_empty()) {
            Phase::Ready
        } else {
            Phase::InPlay
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn dealer(&self) -> Option<PlayerId> {
        self.dealer
    }

    #[must_use]
    pub fn next_to_play(&self) -> Option<PlayerId> {
        self.next_to_play
    }

    #[must_use]
    pub fn last_to_play(&self) -> Option<PlayerId> {
        self.last_to_play
    }

    #[must_use]
    pub fn starter(&self) -> Option<Card> {
        self.starter
    }

    /// Unplayed cards in the player's hand.
    pub fn hand(&self, pid: PlayerId) -> Result<Hand> {
        self.check_player(pid)?;
        Ok(self.hands[pid].clone())
    }

    /// Cards the player has played this round, in play order.
    pub fn played_cards(&self, pid: PlayerId) -> Result<Hand> {
        self.check_player(pid)?;
        Ok(self.played[pid].clone())
    }

    /// The player's full holding: unplayed and played cards together, sorted.
    pub fn held_cards(&self, pid: PlayerId) -> Result<Hand> {
        self.check_player(pid)?;
        let mut held = self.hands[pid].clone();
        for card in &self.played[pid] {
            held.add(card);
        }
        held.sort();
        Ok(held)
    }

    #[must_use]
    pub fn crib(&self) -> Hand {
        self.crib.clone()
    }

    /// Scores in seat order.
    #[must_use]
    pub fn scores(&self) -> Vec<u32> {
        self.scores.to_vec()
    }

    pub fn score(&self, pid: PlayerId) -> Result<u32> {
        self.check_player(pid)?;
        Ok(self.scores[pid])
    }

    #[must_use]
    pub fn last_played_card(&self) -> Option<Card> {
        self.play_stack.front().copied()
    }

    /// Cards in the current count, most recent first.
    #[must_use]
    pub fn play_stack(&self) -> &Vector<Card> {
        &self.play_stack
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.deck.len()
    }

    /// Cards the player threw to the crib this round.
    pub fn discards(&self, pid: PlayerId) -> Result<Hand> {
        self.check_player(pid)?;
        Ok(self.discards[pid].clone())
    }

    /// Cards `viewer` cannot see: everything not played this round, not the
    /// starter, not in the viewer's own hand and not thrown by the viewer.
    pub fn unseen_cards(&self, viewer: PlayerId) -> Result<Hand> {
        self.check_player(viewer)?;
        let mut unseen = Hand::standard_deck();
        for card in self.hands[viewer].iter().chain(self.discards[viewer].iter()) {
            unseen.remove(card);
        }
        for pile in self.played.values() {
            for card in pile {
                unseen.remove(card);
            }
        }
        if let Some(starter) = self.starter {
            unseen.remove(starter);
        }
        Ok(unseen)
    }

    // =========================================================================
    // Hidden-information resampling (tree search)
    // =========================================================================

    /// Redeal everything `viewer` cannot see.
    ///
    /// Opponents' unplayed cards, the crib cards the viewer did not throw
    /// and the draw pile are pooled, shuffled and dealt back out in the same
    /// sizes, so a search over the result reads nothing the viewer does not
    /// know. Opponents' discard records are dropped, since the redealt crib
    /// no longer matches them.
    pub(crate) fn redeal_hidden(&mut self, viewer: PlayerId) {
        let own = self.discards[viewer].clone();
        let mut pool = self.deck.clone();
        for (pid, hand) in self.hands.iter() {
            if pid != viewer {
                for card in hand {
                    pool.add(card);
                }
            }
        }
        for card in self.crib.iter().filter(|&c| !own.contains(c)) {
            pool.add(card);
        }
        // Only the set of hidden cards may influence the redeal.
        pool.sort();
        pool.shuffle(&mut self.rng);

        let mut cards = pool.iter();
        for pid in PlayerId::all(self.config.player_count).filter(|&p| p != viewer) {
            let size = self.hands[pid].len();
            self.hands[pid] = cards.by_ref().take(size).collect();
        }
        let hidden_in_crib = self.crib.len() - own.len();
        let mut crib = own;
        for card in cards.by_ref().take(hidden_in_crib) {
            crib.add(card);
        }
        self.crib = crib;
        self.deck = cards.collect();
        for pid in PlayerId::all(self.config.player_count).filter(|&p| p != viewer) {
            self.discards[pid].clear();
        }
        trace!(viewer = %viewer, "hidden cards redealt");
    }

    /// Make sure `pid` holds `card`, trading one of their unplayed cards to
    /// wherever `card` currently sits (draw pile, crib or another hand).
    /// A card somebody is known to have thrown stays in the crib.
    pub(crate) fn swap_into_hand(&mut self, pid: PlayerId, card: Card) -> Result<()> {
        self.check_player(pid)?;
        if self.hands[pid].contains(card) {
            return Ok(());
        }
        if self.card_already_played(card) || self.starter == Some(card) {
            return Err(CribbageError::CardAlreadyPlayed(card));
        }
        if self.discards.values().any(|thrown| thrown.contains(card)) {
            return Err(CribbageError::CardNotHeld { player: pid, card });
        }
        let outgoing = self.hands[pid].get(0).ok_or(CribbageError::NoPlayableCard(pid))?;

        let holder = if self.deck.contains(card) {
            &mut self.deck
        } else if self.crib.contains(card) {
            &mut self.crib
        } else {
            let owner = PlayerId::all(self.config.player_count)
                .find(|&p| self.hands[p].contains(card))
                .ok_or(CribbageError::CardNotHeld { player: pid, card })?;
            &mut self.hands[owner]
        };
        holder.remove(card);
        holder.add(outgoing);

        self.hands[pid].remove(outgoing);
        self.hands[pid].add(card);
        Ok(())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Sets a game up directly in a given position.
///
/// Named cards are taken out of the draw pile, so the card partition holds
/// for built positions too.
///
/// ```
/// use cribbage_engine::core::PlayerId;
/// use cribbage_engine::game::{CribbageGameBuilder, Phase};
///
/// let game = CribbageGameBuilder::new(2)
///     .dealer(PlayerId::new(1))
///     .hand(PlayerId::new(0), "8S 8H 7S 6S".parse().unwrap())
///     .hand(PlayerId::new(1), "KD 7D 4C 5S".parse().unwrap())
///     .crib("AC AD AH AS".parse().unwrap())
///     .starter("2C".parse().unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(game.phase(), Phase::Ready);
/// assert_eq!(game.next_to_play(), Some(PlayerId::new(0)));
/// assert_eq!(game.draw_pile_len(), 52 - 13);
/// ```
#[derive(Clone, Debug)]
pub struct CribbageGameBuilder {
    player_count: usize,
    seed: Option<u64>,
    dealer: Option<PlayerId>,
    next_to_play: Option<PlayerId>,
    hands: Vec<(PlayerId, Hand)>,
    crib: Hand,
    discards: Vec<(PlayerId, Card)>,
    starter: Option<Card>,
    scores: Vec<(PlayerId, u32)>,
}

impl CribbageGameBuilder {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            seed: None,
            dealer: None,
            next_to_play: None,
            hands: Vec::new(),
            crib: Hand::new(),
            discards: Vec::new(),
            starter: None,
            scores: Vec::new(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn dealer(mut self, pid: PlayerId) -> Self {
        self.dealer = Some(pid);
        self
    }

    /// Override the default first player (the dealer's left).
    pub fn next_to_play(mut self, pid: PlayerId) -> Self {
        self.next_to_play = Some(pid);
        self
    }

    pub fn hand(mut self, pid: PlayerId, hand: Hand) -> Self {
        self.hands.push((pid, hand));
        self
    }

    pub fn crib(mut self, crib: Hand) -> Self {
        self.crib = crib;
        self
    }

    pub fn starter(mut self, card: Card) -> Self {
        self.starter = Some(card);
        self
    }

    /// Mark a crib card as thrown by `pid`.
    pub fn discard(mut self, pid: PlayerId, card: Card) -> Self {
        self.discards.push((pid, card));
        self
    }

    pub fn score(mut self, pid: PlayerId, score: u32) -> Self {
        self.scores.push((pid, score));
        self
    }

    /// Build the game.
    pub fn build(self) -> Result<CribbageGame> {
        let mut config = GameConfig::new(self.player_count)?;
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        let mut game = CribbageGame::new(config)?;

        let named = self
            .hands
            .iter()
            .map(|(pid, hand)| (Some(*pid), hand))
            .chain(std::iter::once((None, &self.crib)));
        for (owner, cards) in named {
            let limit = match owner {
                Some(_) => config.cards_dealt(),
                None => CRIB_SIZE,
            };
            if cards.len() > limit {
                return Err(CribbageError::WrongCardCount {
                    expected: "no more than a full deal",
                    actual: cards.len(),
                });
            }
            for card in cards {
                if !game.deck.remove(card) {
                    return Err(CribbageError::DuplicateCard(card));
                }
                match owner {
                    Some(pid) => {
                        if pid.index() >= config.player_count {
                            return Err(CribbageError::InvalidPlayer {
                                player: pid.0,
                                player_count: config.player_count,
                            });
                        }
                        game.hands[pid].add(card);
                    }
                    None => {
                        game.crib.add(card);
                    }
                }
            }
        }

        if let Some(starter) = self.starter {
            if !game.deck.remove(starter) {
                return Err(CribbageError::DuplicateCard(starter));
            }
            game.starter = Some(starter);
        }

        for (pid, card) in self.discards {
            game.check_player(pid)?;
            if !game.crib.contains(card) {
                return Err(CribbageError::CardNotHeld { player: pid, card });
            }
            game.discards[pid].add(card);
        }

        for (pid, score) in self.scores {
            game.check_player(pid)?;
            game.scores[pid] = score.min(WINNING_SCORE);
        }

        if let Some(dealer) = self.dealer {
            game.check_player(dealer)?;
            game.dealer = Some(dealer);
            game.next_to_play = Some(dealer.next(config.player_count));
        }
        if let Some(next) = self.next_to_play {
            game.set_next_player(next)?;
        }

        Ok(game)
    }
}
