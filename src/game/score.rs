use super::{GameOutcome, Player};

/// Wins per player (and draws) across the games of one session.
///
/// Independent of any single [`GameState`](super::GameState): starting a new
/// game keeps the tally, only [`ScoreTally::reset`] clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTally {
    wins: [u32; 2],
    draws: u32,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, player: Player) {
        self.wins[Self::index(player)] += 1;
    }

    pub fn record_draw(&mut self) {
        self.draws += 1;
    }

    /// Credit a finished game: a win goes to the winner, a draw to the draw count.
    pub fn record_outcome(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(player) => self.increment(player),
            GameOutcome::Draw => self.record_draw(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn wins(&self, player: Player) -> u32 {
        self.wins[Self::index(player)]
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Total finished games counted since the last reset.
    pub fn games_played(&self) -> u32 {
        self.wins.iter().sum::<u32>() + self.draws
    }

    /// Win counts keyed by player.
    pub fn entries(&self) -> [(Player, u32); 2] {
        Player::ALL.map(|player| (player, self.wins(player)))
    }

    fn index(player: Player) -> usize {
        match player {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tally_is_zero() {
        let tally = ScoreTally::new();
        assert_eq!(tally.entries(), [(Player::One, 0), (Player::Two, 0)]);
        assert_eq!(tally.games_played(), 0);
    }

    #[test]
    fn test_record_outcomes() {
        let mut tally = ScoreTally::new();
        tally.record_outcome(GameOutcome::Win(Player::Two));
        tally.record_outcome(GameOutcome::Win(Player::Two));
        tally.record_outcome(GameOutcome::Draw);
        tally.increment(Player::One);

        assert_eq!(tally.wins(Player::One), 1);
        assert_eq!(tally.wins(Player::Two), 2);
        assert_eq!(tally.draws(), 1);
        assert_eq!(tally.games_played(), 4);
    }

    #[test]
    fn test_reset() {
        let mut tally = ScoreTally::new();
        tally.increment(Player::One);
        tally.record_draw();
        tally.reset();
        assert_eq!(tally, ScoreTally::default());
    }
}
