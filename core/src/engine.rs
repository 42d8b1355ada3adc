//! The casino engine: owns every collection and ledger, runs events.
//!
//! EVENT SHAPE (every operation, no exceptions):
//!   1. Guard: an empty eligible pool returns a no-op outcome.
//!   2. Select participants uniformly from the eligible subset.
//!   3. Draw a magnitude.
//!   4. Mutate entity state.
//!   5. Mirror the mutation into the ledger.
//!   6. Return the outcome.
//!
//! RULES:
//!   - All randomness flows through the injected RandomSource.
//!   - The draw order inside each event body is part of the contract;
//!     reordering draws changes every replayed run.
//!   - No event holds state across steps beyond the shared collections.
//!   - Event code addresses entities by index into the owned rosters.

use crate::{
    chip::Chip,
    config::{CasinoConfig, EventWeights, RuleConfig},
    error::CasinoResult,
    event::{EventKind, EventLogEntry, EventOutcome},
    goose::Goose,
    ledger::{Ledger, LedgerSink},
    player::Player,
    rng::{CasinoRng, RandomSource},
    roster::Roster,
    types::Step,
};

pub struct Casino {
    players:      Roster<Player>,
    geese:        Roster<Goose>,
    balances:     Ledger,
    goose_income: Ledger,
    chips:        Vec<Chip>,
    weights:      EventWeights,
    rules:        RuleConfig,
    rng:          Box<dyn RandomSource>,
    step:         Step,
    history:      Vec<EventLogEntry>,
}

impl Casino {
    /// An empty casino with the default weights and rules.
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self::with_rules(EventWeights::default(), RuleConfig::default(), rng)
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(CasinoRng::new(seed)))
    }

    pub fn with_rules(
        weights: EventWeights,
        rules: RuleConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            players:      Roster::new(),
            geese:        Roster::new(),
            balances:     Ledger::new("balance"),
            goose_income: Ledger::new("goose_income"),
            chips:        Vec::new(),
            weights,
            rules,
            rng,
            step:         0,
            history:      Vec::new(),
        }
    }

    /// Build a fully wired casino: validate the config, then register
    /// its roster in order, players first.
    pub fn build(config: &CasinoConfig, rng: Box<dyn RandomSource>) -> CasinoResult<Self> {
        config.validate()?;
        let mut casino = Self::with_rules(config.weights.clone(), config.rules.clone(), rng);
        for player in &config.roster.players {
            casino.register_player(player.clone());
        }
        for goose in &config.roster.geese {
            casino.register_goose(goose.clone());
        }
        Ok(casino)
    }

    /// Route ledger writes to other sinks. Entries already written are
    /// not replayed.
    pub fn set_ledger_sinks(
        &mut self,
        balance_sink: Box<dyn LedgerSink>,
        income_sink: Box<dyn LedgerSink>,
    ) {
        self.balances.set_sink(balance_sink);
        self.goose_income.set_sink(income_sink);
    }

    // ── Registration ───────────────────────────────────────────

    /// Append a player and seed its ledger slot with its balance.
    /// Names are not checked for uniqueness; two players sharing a name
    /// share one ledger slot.
    pub fn register_player(&mut self, player: Player) {
        log::debug!("register player {player}");
        self.balances.set(&player.name, player.balance);
        self.players.push(player);
    }

    /// Append a goose and seed its income slot with 0.
    pub fn register_goose(&mut self, goose: Goose) {
        log::debug!("register goose {goose}");
        self.goose_income.set(&goose.name, 0);
        self.geese.push(goose);
    }

    // ── Read access ────────────────────────────────────────────

    pub fn players(&self) -> &Roster<Player> { &self.players }
    pub fn geese(&self) -> &Roster<Goose> { &self.geese }
    pub fn balances(&self) -> &Ledger { &self.balances }
    pub fn goose_income(&self) -> &Ledger { &self.goose_income }
    pub fn chips(&self) -> &[Chip] { &self.chips }
    pub fn history(&self) -> &[EventLogEntry] { &self.history }
    pub fn current_step(&self) -> Step { self.step }
    pub fn weights(&self) -> &EventWeights { &self.weights }
    pub fn rules(&self) -> &RuleConfig { &self.rules }

    /// Richest player with a positive balance; the earliest wins ties.
    pub fn richest_player(&self) -> Option<&Player> {
        self.players
            .players_with_balance()
            .into_iter()
            .reduce(|best, p| if p.balance > best.balance { p } else { best })
    }

    // ── Events ─────────────────────────────────────────────────

    /// A random rich player bets 1..=min(max_bet, balance). With the
    /// draw above win_threshold the bet pays payout_multiplier times.
    pub fn player_bet(&mut self) -> EventOutcome {
        let rich = self.players.rich_indices();
        if rich.is_empty() {
            return EventOutcome::NoBettors;
        }
        let idx = rich[self.rng.choose_index(rich.len())];
        let ceiling = self.rules.max_bet.min(self.players[idx].balance);
        let bet = self.rng.randint(1, ceiling);

        let player = &mut self.players[idx];
        if !player.bet(bet) {
            return EventOutcome::BetRefused {
                player:  player.name.clone(),
                bet,
                balance: player.balance,
            };
        }
        self.balances.set(&player.name, player.balance);

        if self.rng.random() > self.rules.win_threshold {
            let payout = bet.saturating_mul(self.rules.payout_multiplier);
            player.win(payout);
            self.balances.set(&player.name, player.balance);
            return EventOutcome::BetWon { player: player.name.clone(), bet, payout };
        }
        EventOutcome::BetLost { player: player.name.clone(), bet }
    }

    /// A random war goose hits a random player (any balance) for
    /// 1..=power. The balance is clamped at zero.
    pub fn goose_attack(&mut self) -> EventOutcome {
        if self.geese.is_empty() || self.players.is_empty() {
            return EventOutcome::NoGeeseOrPlayers;
        }
        let war = self.geese.war_indices();
        if war.is_empty() {
            return EventOutcome::NoWarGeese;
        }

        let goose_idx = war[self.rng.choose_index(war.len())];
        let player_idx = self.rng.choose_index(self.players.len());
        let goose = &self.geese[goose_idx];
        let player = &mut self.players[player_idx];
        let power = goose.capabilities().attack.unwrap_or(1);
        let damage = self.rng.randint(1, power);

        let before = player.balance;
        player.take_damage(damage);
        self.balances.set(&player.name, player.balance);

        EventOutcome::Attacked {
            goose:  goose.name.clone(),
            player: player.name.clone(),
            damage,
            before,
            after:  player.balance,
        }
    }

    /// A random goose honks. A honk goose super-honks instead: every
    /// player independently may be credited honk_power.
    pub fn goose_honk(&mut self) -> EventOutcome {
        if self.geese.is_empty() || self.players.is_empty() {
            return EventOutcome::NoGeeseOrPlayers;
        }
        let goose_idx = self.rng.choose_index(self.geese.len());
        let goose = &self.geese[goose_idx];

        let Some(honk_power) = goose.capabilities().super_honk else {
            return EventOutcome::Honked { goose: goose.name.clone(), shout: goose.honk() };
        };

        let mut winners = 0;
        for player in self.players.iter_mut() {
            if self.rng.random() > self.rules.super_honk_chance {
                player.win(honk_power);
                self.balances.set(&player.name, player.balance);
                winners += 1;
            }
        }
        EventOutcome::SuperHonked { goose: goose.name.clone(), winners, honk_power }
    }

    /// A random goose steals 1..=min(max_steal, balance) from a random
    /// rich player and books it as goose income.
    pub fn goose_steal(&mut self) -> EventOutcome {
        if self.geese.is_empty() || self.players.is_empty() {
            return EventOutcome::NoGeeseOrPlayers;
        }
        let goose_idx = self.rng.choose_index(self.geese.len());
        let goose = &self.geese[goose_idx];

        let rich = self.players.rich_indices();
        if rich.is_empty() {
            return EventOutcome::StealFailed { goose: goose.name.clone() };
        }
        let player_idx = rich[self.rng.choose_index(rich.len())];
        let player = &mut self.players[player_idx];
        let amount = self.rng.randint(1, self.rules.max_steal.min(player.balance));

        player.balance -= amount;
        self.balances.set(&player.name, player.balance);

        let income = self.goose_income.get_or(&goose.name, 0) + amount;
        self.goose_income.set(&goose.name, income);

        EventOutcome::Stolen {
            goose:   goose.name.clone(),
            player:  player.name.clone(),
            amount,
            balance: player.balance,
        }
    }

    /// A random rich player loses everything.
    pub fn player_panic(&mut self) -> EventOutcome {
        if self.players.is_empty() {
            return EventOutcome::NoPlayersToPanic;
        }
        let rich = self.players.rich_indices();
        if rich.is_empty() {
            return EventOutcome::NoPanic;
        }
        let player_idx = rich[self.rng.choose_index(rich.len())];
        let player = &mut self.players[player_idx];
        let lost = player.balance;
        player.balance = 0;
        self.balances.set(&player.name, 0);

        EventOutcome::Panicked { player: player.name.clone(), lost }
    }

    /// Mint a chip worth 1..=max_chip_value. Past combine_after chips,
    /// two random chips are summed for the report only; the sum is
    /// never stored.
    pub fn create_chip(&mut self) -> EventOutcome {
        let chip = Chip::new(self.rng.randint(1, self.rules.max_chip_value));
        self.chips.push(chip);

        if self.chips.len() > self.rules.combine_after {
            let first = self.chips[self.rng.choose_index(self.chips.len())];
            let second = self.chips[self.rng.choose_index(self.chips.len())];
            return EventOutcome::ChipCombined { chip, combination: first + second };
        }
        EventOutcome::ChipCreated { chip }
    }

    /// Two distinct geese form a transient flock. Nothing is stored.
    pub fn goose_gang(&mut self) -> EventOutcome {
        if self.geese.len() < 2 {
            return EventOutcome::TooFewGeese;
        }
        let (a, b) = self.rng.sample_pair(self.geese.len());
        let flock = self.geese[a].join(&self.geese[b]);
        EventOutcome::FlockFormed { flock }
    }

    /// Run one specific event.
    pub fn dispatch(&mut self, kind: EventKind) -> EventOutcome {
        match kind {
            EventKind::PlayerBet   => self.player_bet(),
            EventKind::GooseAttack => self.goose_attack(),
            EventKind::GooseHonk   => self.goose_honk(),
            EventKind::GooseSteal  => self.goose_steal(),
            EventKind::PlayerPanic => self.player_panic(),
            EventKind::CreateChip  => self.create_chip(),
            EventKind::GooseGang   => self.goose_gang(),
        }
    }

    /// Draw one event by weight, run it, and record it in the history.
    pub fn step(&mut self) -> CasinoResult<EventOutcome> {
        let weights = self.weights.as_array();
        let slot = self.rng.weighted_index(&weights).min(EventKind::ALL.len() - 1);
        let kind = EventKind::ALL[slot];

        let outcome = self.dispatch(kind);
        self.step += 1;
        log::debug!("step={} event={} {outcome}", self.step, kind.name());

        self.history.push(EventLogEntry {
            step:       self.step,
            event_type: kind.name().to_string(),
            payload:    serde_json::to_string(&outcome)?,
        });
        Ok(outcome)
    }

    /// Step `n` times and hand back every outcome; stops at the first error.
    pub fn run_steps(&mut self, n: u64) -> CasinoResult<Vec<EventOutcome>> {
        (0..n).map(|_| self.step()).collect()
    }
}
