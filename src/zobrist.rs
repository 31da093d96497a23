//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position fingerprints for the
//! transposition table. The key table is generated once from a fixed seed so
//! hashes are reproducible across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;

/// Fixed seed: results must be identical from build to build.
const ZOBRIST_SEED: u64 = 987_654_321;

pub(crate) struct ZobristKeys {
    /// piece_keys[color][piece][square]
    pub(crate) piece_keys: [[[u64; 64]; 6]; 2],
    pub(crate) black_to_move_key: u64,
    /// One key per castling-rights bitmask (0..16), so a rights change is a
    /// single XOR-out / XOR-in pair.
    pub(crate) castling_keys: [u64; 16],
    /// en_passant_keys[file]; only the file matters for the EP target.
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0u64; 64]; 6]; 2];
        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        let mut castling_keys = [0u64; 16];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        let mut en_passant_keys = [0u64; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
