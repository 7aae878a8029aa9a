use std::time::Duration;

/// Round parameters.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GameRules {
    pub total_targets: u32,
    /// Whole seconds on the clock at the start of a round.
    pub time_limit_secs: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            total_targets: 4,
            time_limit_secs: 30,
        }
    }
}

impl GameRules {
    pub fn targets(mut self, total: u32) -> Self {
        self.total_targets = total;
        self
    }

    pub fn time_limit_secs(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GamePhase {
    /// Waiting for the first round to start.
    Ready,
    Playing,
    Won,
    Lost,
}

impl GamePhase {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Result of [`GameSession::register_find`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FindOutcome {
    /// Counted; `found` is the new total.
    Counted { found: u32 },
    /// Counted and it was the last one.
    Won,
    /// Not playing; nothing changed.
    Ignored,
}

/// Transitions reported by [`GameSession::tick`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameEvent {
    /// One second elapsed; `time_left` is the new value.
    Second { time_left: u32 },
    TimeUp,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    rules: GameRules,
    phase: GamePhase,
    found: u32,
    time_left: u32,
    /// Sub-second remainder carried between ticks.
    carry: Duration,
}

impl GameSession {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            phase: GamePhase::Ready,
            found: 0,
            time_left: rules.time_limit_secs,
            carry: Duration::ZERO,
        }
    }

    pub fn rules(&self) -> GameRules {
        self.rules
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn found(&self) -> u32 {
        self.found
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Starts a round if none is running. Returns `false` while already playing.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        self.begin_round();
        true
    }

    /// Starts a fresh round unconditionally.
    pub fn restart(&mut self) {
        self.begin_round();
    }

    fn begin_round(&mut self) {
        self.phase = GamePhase::Playing;
        self.found = 0;
        self.time_left = self.rules.time_limit_secs;
        self.carry = Duration::ZERO;
        log::info!(
            "round started: find {} targets in {}s",
            self.rules.total_targets,
            self.rules.time_limit_secs
        );

        if self.rules.total_targets == 0 {
            self.phase = GamePhase::Won;
        } else if self.time_left == 0 {
            self.phase = GamePhase::Lost;
        }
    }

    pub fn register_find(&mut self) -> FindOutcome {
        if self.phase != GamePhase::Playing {
            return FindOutcome::Ignored;
        }

        self.found += 1;
        if self.found >= self.rules.total_targets {
            self.phase = GamePhase::Won;
            log::info!("round won with {}s left", self.time_left);
            FindOutcome::Won
        } else {
            log::debug!("found {}/{}", self.found, self.rules.total_targets);
            FindOutcome::Counted { found: self.found }
        }
    }

    /// Advances the countdown by `dt`. Reports at most the most significant event.
    pub fn tick(&mut self, dt: Duration) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        self.carry += dt;
        let whole = self.carry.as_secs();
        if whole == 0 {
            return None;
        }
        self.carry -= Duration::from_secs(whole);

        let elapsed = u32::try_from(whole).unwrap_or(u32::MAX);
        self.time_left = self.time_left.saturating_sub(elapsed);

        if self.time_left == 0 {
            self.phase = GamePhase::Lost;
            log::info!("round lost: time up with {}/{} found", self.found, self.rules.total_targets);
            Some(GameEvent::TimeUp)
        } else {
            Some(GameEvent::Second { time_left: self.time_left })
        }
    }

    /// HUD line, e.g. `"Time Left: 12s | Found: 1/4"`.
    pub fn status_line(&self) -> String {
        format!(
            "Time Left: {}s | Found: {}/{}",
            self.time_left, self.found, self.rules.total_targets
        )
    }

    /// Terminal message, `None` while the round is not over.
    pub fn outcome_message(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Won => Some("You Win!"),
            GamePhase::Lost => Some("Time's Up! You Lose!"),
            GamePhase::Ready | GamePhase::Playing => None,
        }
    }
}
