//! A play session: the current game, the score tally, who controls Player 2,
//! and the observers that render it.

use tracing::{debug, info, trace};

use crate::ai::{Agent, HeuristicAgent};
use crate::config::{AppConfig, PlayersConfig};
use crate::error::MoveError;
use crate::events::{GameEvent, GameObserver};
use crate::game::{GameState, Placement, Player, ScoreTally};

/// Who makes Player 2's moves. The computer only ever plays Player 2.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayerTwoMode {
    #[default]
    Human,
    Computer,
}

impl PlayerTwoMode {
    pub fn toggled(self) -> Self {
        match self {
            PlayerTwoMode::Human => PlayerTwoMode::Computer,
            PlayerTwoMode::Computer => PlayerTwoMode::Human,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerTwoMode::Human => "Human vs Human",
            PlayerTwoMode::Computer => "Human vs Computer",
        }
    }
}

/// Where a move request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrigin {
    Human,
    Computer,
}

pub struct Session {
    state: GameState,
    scores: ScoreTally,
    names: [String; 2],
    player_two: PlayerTwoMode,
    agent: Box<dyn Agent>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Session {
    pub fn new(players: &PlayersConfig, agent: Box<dyn Agent>) -> Self {
        Session {
            state: GameState::new_game(),
            scores: ScoreTally::new(),
            names: [
                players.player_one_name.clone(),
                players.player_two_name.clone(),
            ],
            player_two: players.player_two,
            agent,
            observers: Vec::new(),
        }
    }

    /// Session with a [`HeuristicAgent`], seeded when `config.ai.seed` is set.
    pub fn from_config(config: &AppConfig) -> Self {
        let agent = match config.ai.seed {
            Some(seed) => HeuristicAgent::with_seed(seed),
            None => HeuristicAgent::new(),
        };
        Self::new(&config.players, Box::new(agent))
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> &ScoreTally {
        &self.scores
    }

    pub fn player_two(&self) -> PlayerTwoMode {
        self.player_two
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Configured name, or the default label when the name is blank.
    pub fn player_name(&self, player: Player) -> &str {
        let name = match player {
            Player::One => &self.names[0],
            Player::Two => &self.names[1],
        };
        let trimmed = name.trim();
        if trimmed.is_empty() {
            player.name()
        } else {
            trimmed
        }
    }

    /// Switch Player 2 between human and computer control. Takes effect on
    /// the current game.
    pub fn set_player_two(&mut self, mode: PlayerTwoMode) {
        if mode != self.player_two {
            info!(mode = mode.label(), "player two mode changed");
        }
        self.player_two = mode;
    }

    /// True when the game is running and the computer is the player to move.
    pub fn is_computer_turn(&self) -> bool {
        !self.state.is_terminal()
            && self.player_two == PlayerTwoMode::Computer
            && self.state.current_player() == Player::Two
    }

    /// Discard the current game and start a fresh one. Scores are kept.
    pub fn new_game(&mut self) {
        self.state = GameState::new_game();
        info!("new game started");
        self.emit(GameEvent::GameStarted);
        self.emit(GameEvent::TurnChanged(self.state.current_player()));
    }

    /// Play `col` for the player to move, on behalf of `origin`.
    ///
    /// Rejected moves leave the game untouched and are reported both as the
    /// returned error and as a [`GameEvent::MoveRejected`]. A finished game
    /// credits the score tally.
    pub fn submit_move(&mut self, col: usize, origin: MoveOrigin) -> Result<Placement, MoveError> {
        let result = self
            .check_turn(origin)
            .and_then(|()| self.state.attempt_move(col));

        let placement = match result {
            Ok(placement) => placement,
            Err(err) => {
                trace!(col, ?origin, %err, "move rejected");
                self.emit(GameEvent::MoveRejected(err));
                return Err(err);
            }
        };

        debug!(
            row = placement.row,
            col = placement.col,
            player = %placement.player,
            ?origin,
            "piece placed"
        );
        self.emit(GameEvent::PiecePlaced(placement));

        match placement.outcome {
            Some(outcome) => {
                info!(?outcome, "game over");
                self.scores.record_outcome(outcome);
                self.emit(GameEvent::GameOver(outcome));
                self.emit(GameEvent::ScoresChanged(self.scores));
            }
            None => self.emit(GameEvent::TurnChanged(self.state.current_player())),
        }

        Ok(placement)
    }

    /// Column the computer would play now.
    pub fn suggest_ai_move(&mut self) -> Result<usize, MoveError> {
        self.check_turn(MoveOrigin::Computer)?;
        let col = self
            .agent
            .select_action(&self.state)
            .ok_or(MoveError::GameAlreadyEnded)?;
        debug!(col, agent = self.agent.name(), "computer chose column");
        Ok(col)
    }

    /// Let the computer make its move.
    pub fn play_ai_move(&mut self) -> Result<Placement, MoveError> {
        let col = self.suggest_ai_move()?;
        self.submit_move(col, MoveOrigin::Computer)
    }

    pub fn increment_score(&mut self, player: Player) {
        self.scores.increment(player);
        self.emit(GameEvent::ScoresChanged(self.scores));
    }

    pub fn reset_scores(&mut self) {
        self.scores.reset();
        info!("scores reset");
        self.emit(GameEvent::ScoresChanged(self.scores));
    }

    fn check_turn(&self, origin: MoveOrigin) -> Result<(), MoveError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameAlreadyEnded);
        }
        let computer_turn = self.is_computer_turn();
        match origin {
            MoveOrigin::Human if computer_turn => {
                Err(MoveError::WrongTurn(self.state.current_player()))
            }
            MoveOrigin::Computer if !computer_turn => {
                Err(MoveError::WrongTurn(self.state.current_player()))
            }
            _ => Ok(()),
        }
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}
