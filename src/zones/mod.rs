//! Card stacks on the table.
//!
//! Both kinds of zone in this game are stacks:
//!
//! - `Hand`: the per-side face-down stack cards are drawn from. Cards leave
//!   from the top; a redeal returns pile cards underneath the bottom.
//! - `Pile`: a face-up side pile. Only its top card is visible, and placed
//!   cards always land on top.
//!
//! Both are backed by `im::Vector`, so cloning a whole table for a state
//! snapshot is O(1).

pub mod hand;
pub mod pile;

pub use hand::{Hand, ZonePosition};
pub use pile::Pile;
