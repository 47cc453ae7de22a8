//! State-transition notifications emitted by a [`Session`](crate::session::Session).
//!
//! Renderers subscribe with a [`GameObserver`] and redraw from the events
//! instead of being called by the engine.

use std::sync::mpsc;

use crate::error::MoveError;
use crate::game::{GameOutcome, Placement, Player, ScoreTally};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh game replaced the previous one.
    GameStarted,
    PiecePlaced(Placement),
    TurnChanged(Player),
    GameOver(GameOutcome),
    MoveRejected(MoveError),
    ScoresChanged(ScoreTally),
}

/// Receiver of [`GameEvent`]s.
pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Forwards events over a channel, e.g. to a UI loop.
pub struct ChannelObserver {
    tx: mpsc::Sender<GameEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<GameEvent>) -> Self {
        ChannelObserver { tx }
    }

    /// Observer plus the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::Receiver<GameEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl GameObserver for ChannelObserver {
    fn notify(&mut self, event: &GameEvent) {
        // A dropped receiver just means nobody is listening any more
        let _ = self.tx.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |event: &GameEvent| seen.push(event.clone());
            observer.notify(&GameEvent::GameStarted);
            observer.notify(&GameEvent::TurnChanged(Player::Two));
        }
        assert_eq!(
            seen,
            vec![GameEvent::GameStarted, GameEvent::TurnChanged(Player::Two)]
        );
    }

    #[test]
    fn test_channel_observer() {
        let (mut observer, rx) = ChannelObserver::channel();
        observer.notify(&GameEvent::GameOver(GameOutcome::Draw));
        assert_eq!(rx.try_recv(), Ok(GameEvent::GameOver(GameOutcome::Draw)));
    }

    #[test]
    fn test_channel_observer_without_receiver() {
        let (mut observer, rx) = ChannelObserver::channel();
        drop(rx);
        observer.notify(&GameEvent::GameStarted);
    }
}
