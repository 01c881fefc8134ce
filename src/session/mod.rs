//! Session layer: the running game, its virtual-clock timers and notices.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use pile_match::core::{GameConfig, Side};
//! use pile_match::session::GameSession;
//!
//! let mut session = GameSession::new(GameConfig::default()).unwrap();
//! let start = session.revision();
//!
//! // The automated side moves once per cadence + second-move delay
//! let report = session.tick(Duration::from_millis(4500));
//! assert_eq!(report.fired, 1);
//! if !report.placements.is_empty() {
//!     assert!(session.revision() > start);
//!     assert!(session.hand_size(Side::Automated) < 22);
//! }
//! ```

pub mod game;
pub mod notices;
pub mod scheduler;

pub use game::{ClickOutcome, GameSession, TickReport};
pub use notices::{Notice, NoticeId, NoticePhase, Notices};
pub use scheduler::{Scheduler, Task, TaskId, MIN_DELAY};
