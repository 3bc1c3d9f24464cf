//! Rule configuration core of a multi-variant chess engine.
//!
//! A [`Variant`] describes one game: board, pieces, movement, promotion,
//! drop, castling and game-end rules, plus evaluation weights. Concluding
//! it derives the parameters the rest of the engine depends on (fast
//! attack paths, NNUE feature layout, endgame eligibility). Concluded
//! variants are registered by name in a [`VariantMap`].

pub mod bitboard;
pub mod error;
pub mod parser;
pub mod pieces;
pub mod registry;
pub mod types;
pub mod utils;
pub mod variant;

pub use error::{ConfigError, VariantError, VariantResult};
pub use pieces::{Piece, PieceType};
pub use registry::VariantMap;
pub use variant::{Derived, Variant, VariantSummary};
