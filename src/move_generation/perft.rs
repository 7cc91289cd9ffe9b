//! Perft: exhaustive move-path enumeration used to validate the generator
//! against published node counts.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft_legal(game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    perft(&LegalMoveGenerator, game_state, depth)
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state)? {
        if depth == 1 {
            total.merge(leaf_counts(generator, game_state, &mv)?);
        } else {
            total.merge(perft(generator, &mv.game_after_move, depth - 1)?);
        }
    }

    Ok(total)
}

fn leaf_counts<G: MoveGenerator>(
    generator: &G,
    parent: &GameState,
    mv: &GeneratedMove,
) -> MoveGenResult<PerftCounts> {
    let next = &mv.game_after_move;
    let chess_move = mv.chess_move;
    let is_capture = chess_move.is_en_passant() || parent.piece_at(chess_move.to).is_some();
    let gives_check = is_king_in_check(next, next.side_to_move());
    let is_checkmate = gives_check && generator.generate_legal_moves(next)?.is_empty();

    Ok(PerftCounts {
        nodes: 1,
        captures: usize::from(is_capture),
        en_passant: usize::from(chess_move.is_en_passant()),
        castles: usize::from(chess_move.is_castling()),
        promotions: usize::from(chess_move.promotion.is_some()),
        checks: usize::from(gives_check),
        checkmates: usize::from(is_checkmate),
    })
}
