//! Game rules for Quantik.
//!
//! Pure functions over the occupancy [`Board`](crate::Board). The game
//! composes them into its query and placement methods, and the search calls
//! them directly on cloned state.

pub mod exclusion;
pub mod stalemate;
pub mod win;

pub use exclusion::{allowed_shapes, exclusion_set};
pub use stalemate::{has_legal_placement, is_stalemate};
pub use win::{WinningLine, completed_line, winning_line};
