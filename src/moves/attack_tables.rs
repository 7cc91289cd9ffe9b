//! Attack bitboards for every piece kind.
//!
//! Leaper attacks (knight, king, pawn) are precomputed at compile time.
//! Slider attacks walk rays outward and stop at the first occupied square,
//! which is included so captures fall out of the same mask.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = generate_leaper_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = generate_leaper_table(&KING_OFFSETS);

/// `[color][square]`: squares a pawn of `color` on `square` attacks.
pub const PAWN_ATTACKS: [[u64; 64]; 2] = [
    generate_leaper_table(&[(-1, 1), (1, 1)]),
    generate_leaper_table(&[(-1, -1), (1, -1)]),
];

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index() as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index() as usize]
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    PAWN_ATTACKS[color.index()][square.index() as usize]
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = square.file() as i32 + file_step;
    let mut rank = square.rank() as i32 + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn generate_leaper_table<const N: usize>(offsets: &[(i32, i32); N]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < N {
            let f = file + offsets[i].0;
            let r = rank + offsets[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                attacks |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).expect("test square in range")
    }

    #[test]
    fn knight_attacks_from_corner_and_center() {
        assert_eq!(knight_attacks(Square::A1).count_ones(), 2);
        assert_eq!(knight_attacks(sq(3, 3)).count_ones(), 8);
    }

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        assert_eq!(king_attacks(Square::A1).count_ones(), 3);
    }

    #[test]
    fn pawn_attacks_point_forward_per_color() {
        let e2 = sq(4, 1);
        assert_eq!(pawn_attacks(Color::White, e2), sq(3, 2).bit() | sq(5, 2).bit());
        let e7 = sq(4, 6);
        assert_eq!(pawn_attacks(Color::Black, e7), sq(3, 5).bit() | sq(5, 5).bit());
        assert_eq!(pawn_attacks(Color::White, sq(0, 7)), 0);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let blocker_on_a4 = sq(0, 3).bit();
        let attacks = rook_attacks(Square::A1, blocker_on_a4);

        assert_ne!(attacks & sq(0, 3).bit(), 0);
        assert_eq!(attacks & sq(0, 4).bit(), 0);
        assert_eq!(rook_attacks(sq(3, 3), 0).count_ones(), 14);
    }

    #[test]
    fn queen_attacks_match_union() {
        let d4 = sq(3, 3);
        let blockers = sq(3, 5).bit() | sq(6, 3).bit();
        let attacks = queen_attacks(d4, blockers);

        assert_ne!(attacks & sq(3, 5).bit(), 0);
        assert_ne!(attacks & sq(6, 3).bit(), 0);
        assert_eq!(attacks & sq(3, 6).bit(), 0);
        assert_eq!(attacks & sq(7, 3).bit(), 0);
        assert_eq!(queen_attacks(d4, 0).count_ones(), 27);
    }
}
