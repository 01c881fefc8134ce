//! Game rules: match discovery, the placement cursor, move validation and
//! redeal.
//!
//! Everything here is a pure function of its inputs. Callers keep the
//! returned state and snapshot; nothing is mutated in place.

pub mod matches;
pub mod cursor;
pub mod engine;
pub mod redeal;

pub use matches::{find_matches, MatchInfo, MatchSet, MatchSnapshot};
pub use cursor::PlacementCursor;
pub use engine::{MatchEngine, MoveOutcome, Placement, Transition};
pub use redeal::{check_redeal, recycle, try_redeal};
