use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::thread;

use tracing::error;
use tracing_subscriber::EnvFilter;

use chess_session::game_state::chess_types::Color;
use chess_session::session::game_session::GameSession;
use chess_session::session::session_config::SessionConfig;
use chess_session::utils::render_game_state::render_game_state;
use chess_session::ChessResult;

const HELP: &str = "commands: <move> (e2e4, e7e8=Q), undo, redo, reset, fen, moves, pgn, help, quit";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let session = SessionConfig::from_env().and_then(GameSession::from_config);
    let mut session = match session {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "could not start session");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(session: &mut GameSession) -> io::Result<()> {
    let player = session.board().side_to_move();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("playing {player} against {}", session.policy_name());
    println!("{HELP}");
    show(session);

    for line in stdin.lock().lines() {
        let line = line?;
        let command = line.trim();
        match command {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "fen" => println!("{}", session.board().get_fen()),
            "moves" => match session.legal_moves() {
                Ok(moves) => {
                    let listed: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                    println!("{}", listed.join(" "));
                }
                Err(err) => println!("error: {err}"),
            },
            "pgn" => match session.to_pgn() {
                Ok(pgn) => print!("{pgn}"),
                Err(err) => println!("error: {err}"),
            },
            "undo" => match session.undo_last_full_turn() {
                Ok(_) => show(session),
                Err(err) => println!("error: {err}"),
            },
            "redo" => {
                // step forward to the player's next turn
                let mut result = session.redo().map(|_| ());
                if result.is_ok() && session.board().side_to_move() != player && session.can_redo() {
                    result = session.redo().map(|_| ());
                }
                match result {
                    Ok(()) => show(session),
                    Err(err) => println!("error: {err}"),
                }
            }
            "reset" => {
                session.reset();
                show(session);
            }
            notation => {
                if let Err(err) = play_turn(session, notation, player) {
                    println!("error: {err}");
                }
                show(session);
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

fn play_turn(session: &mut GameSession, notation: &str, player: Color) -> ChessResult<()> {
    // an odd number of undone plies can leave the opponent to move
    if session.board().side_to_move() != player {
        opponent_reply(session)?;
    }
    session.make_player_move_notation(notation)?;
    if !session.status()?.is_terminal() {
        opponent_reply(session)?;
    }
    Ok(())
}

fn opponent_reply(session: &mut GameSession) -> ChessResult<()> {
    let delay = session.config().opponent_delay;
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    let reply = session.request_opponent_move()?;
    println!("opponent plays {reply}");
    Ok(())
}

fn show(session: &GameSession) {
    println!("{}", render_game_state(session.board()));
    match session.status() {
        Ok(status) if status.is_terminal() => println!("{status}"),
        Ok(_) if session.is_in_check() => println!("{} to move, in check", session.board().side_to_move()),
        Ok(_) => println!("{} to move", session.board().side_to_move()),
        Err(err) => println!("error: {err}"),
    }
}
