//! PGN read/write utilities for game history interchange.
//!
//! Movetext uses the crate's coordinate notation (`e2e4`, `e7e8=Q`) rather than
//! SAN. Reading replays every move through a [`GameMachine`], so an imported
//! game is validated ply by ply.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::{ChessResult, ParseError};
use crate::game::game_machine::GameMachine;
use crate::game::game_status::GameStatus;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_description::ChessMove;
use crate::utils::move_notation::{format_move, parse_move};

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub machine: GameMachine,
    pub result: String,
}

/// Writes a PGN with default headers dated today.
pub fn write_pgn(initial_state: &GameState, move_history: &[ChessMove], status: GameStatus) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Casual Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        Local::now().date_naive().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), result_token(status).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(initial_state, move_history, &headers)
}

pub fn write_pgn_with_headers(
    initial_state: &GameState,
    move_history: &[ChessMove],
    headers: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(move_history.len() + 1);
    let mut fullmove = initial_state.fullmove_number();
    let mut side = initial_state.side_to_move();
    for (ply, mv) in move_history.iter().enumerate() {
        let notation = format_move(mv);
        match side {
            Color::White => movetext_parts.push(format!("{fullmove}. {notation}")),
            Color::Black if ply == 0 => movetext_parts.push(format!("{fullmove}... {notation}")),
            Color::Black => movetext_parts.push(notation),
        }
        if side == Color::Black {
            fullmove = fullmove.saturating_add(1);
        }
        side = side.opposite();
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let mut machine = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ParseError::InvalidPgn("SetUp=1 is present but FEN header is missing".to_owned())
        })?;
        GameMachine::from_fen(fen)?
    } else {
        GameMachine::default()
    };

    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }

        let cleaned = trim_annotation_suffix(token);
        if is_result_token(cleaned) {
            result = cleaned.to_owned();
            break;
        }

        // "12.e2e4" style tokens carry the move after the number.
        let cleaned = cleaned
            .rsplit_once('.')
            .map_or(cleaned, |(_, notation)| notation);
        machine.apply_move(parse_move(cleaned)?)?;
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        machine,
        result,
    })
}

/// PGN result token for a game in `status`.
pub fn result_token(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Checkmate {
            winner: Color::White,
        } => "1-0",
        GameStatus::Checkmate {
            winner: Color::Black,
        } => "0-1",
        GameStatus::InProgress => "*",
        _ => "1/2-1/2",
    }
}

fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
    let invalid = || ParseError::InvalidPgn(format!("invalid header line: {line}"));
    let inner = line
        .strip_prefix('[')
        .and_then(|x| x.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|x| x.strip_suffix('"'))
        .ok_or_else(invalid)?
        .replace("\\\"", "\"");
    Ok((key.trim().to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    digits.len() < token.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
