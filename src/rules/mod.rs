//! Game rules: turn policy, piece movement, the one hive rule, and the
//! validator that composes them.

pub mod connectivity;
pub mod movement;
pub mod turn;
pub mod validator;

pub use connectivity::{hive_is_connected, is_connected, LiftedHive};
pub use movement::{movement_destinations, placement_destinations};
pub use turn::{permission, Denial, Phase, Rules, TurnState};
pub use validator::{all_legal_moves, is_legal, legal_moves, Move};
