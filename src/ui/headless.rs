//! Line-oriented front end: reads commands from any `BufRead`, prints the
//! board as text. Used by `--headless` and handy for scripting games.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;

use tracing::{trace, warn};

use crate::error::MoveError;
use crate::events::{ChannelObserver, GameEvent};
use crate::game::{Board, Cell, GameOutcome, Player, COLS, ROWS};
use crate::session::{MoveOrigin, Session};

/// Board as text: `X` for Player 1, `O` for Player 2, column numbers below.
pub fn render_board_text(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..ROWS {
        let line: Vec<&str> = (0..COLS)
            .map(|col| match board.get(row, col) {
                Cell::Empty => ".",
                Cell::PlayerOne => "X",
                Cell::PlayerTwo => "O",
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    let numbers: Vec<String> = (1..=COLS).map(|c| c.to_string()).collect();
    out.push_str(&numbers.join(" "));
    out.push('\n');
    out
}

/// Play `session` from text commands until `q` or end of input.
///
/// Commands: `1`-`7` drop, `n` new game, `x` reset scores, `m` toggle the
/// computer, `q` quit. The computer answers immediately.
pub fn run_headless<R: BufRead, W: Write>(
    mut session: Session,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    let (observer, events) = ChannelObserver::channel();
    session.subscribe(observer);

    write_status(&session, output)?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        match command {
            "" => continue,
            "q" | "quit" => break,
            "n" => session.new_game(),
            "x" => session.reset_scores(),
            "m" => {
                let mode = session.player_two().toggled();
                session.set_player_two(mode);
                writeln!(output, "{}", mode.label())?;
            }
            _ => match command.parse::<usize>() {
                Ok(n) if (1..=COLS).contains(&n) => {
                    // Rejections are reported from the event stream
                    if let Err(err) = session.submit_move(n - 1, MoveOrigin::Human) {
                        trace!(%err, column = n, "headless move rejected");
                    }
                }
                _ => {
                    writeln!(output, "unknown command: {command}")?;
                    continue;
                }
            },
        }

        while session.is_computer_turn() {
            if let Err(err) = session.play_ai_move() {
                warn!(%err, "computer move skipped");
                break;
            }
        }

        report_events(&session, &events, output)?;
        write_status(&session, output)?;
    }

    Ok(())
}

fn report_events<W: Write>(
    session: &Session,
    events: &mpsc::Receiver<GameEvent>,
    output: &mut W,
) -> io::Result<()> {
    for event in events.try_iter() {
        match event {
            GameEvent::GameStarted => writeln!(output, "New game")?,
            GameEvent::PiecePlaced(p) => writeln!(
                output,
                "{} drops into column {}",
                session.player_name(p.player),
                p.col + 1
            )?,
            GameEvent::GameOver(GameOutcome::Win(player)) => {
                writeln!(output, "{} wins!", session.player_name(player))?
            }
            GameEvent::GameOver(GameOutcome::Draw) => writeln!(output, "Draw")?,
            GameEvent::ScoresChanged(scores) => writeln!(
                output,
                "Score: {} {} - {} {} (draws {})",
                session.player_name(Player::One),
                scores.wins(Player::One),
                scores.wins(Player::Two),
                session.player_name(Player::Two),
                scores.draws()
            )?,
            GameEvent::MoveRejected(MoveError::ColumnFull(_)) => writeln!(output, "Column full")?,
            GameEvent::MoveRejected(MoveError::GameAlreadyEnded) => {
                writeln!(output, "Game over, type n for a new game")?
            }
            GameEvent::MoveRejected(_) | GameEvent::TurnChanged(_) => {}
        }
    }
    Ok(())
}

fn write_status<W: Write>(session: &Session, output: &mut W) -> io::Result<()> {
    let state = session.state();
    write!(output, "{}", render_board_text(state.board()))?;
    if state.is_terminal() {
        writeln!(output, "Game over")
    } else {
        writeln!(
            output,
            "{} to move (1-7, n, x, m, q)",
            session.player_name(state.current_player())
        )
    }
}
