//! Core engine model - pure, deterministic, and testable
//!
//! This crate holds the parts of the arcade that do no I/O:
//!
//! - [`board`]: the character grid (title, border frame, interior) games paint on
//! - [`policy`]: how a decoded key merges into the pending keystroke
//! - [`scoreboard`]: the status line rendered under the board
//! - [`config`]: engine configuration and its validation
//!
//! # Example
//!
//! ```
//! use tui_arcade_core::{Board, EngineConfig};
//! use tui_arcade_types::Location;
//!
//! let cfg = EngineConfig::default().with_title(" DEMO ");
//! cfg.validate().unwrap();
//!
//! let mut board = Board::new(cfg.width, cfg.height, &cfg.title, cfg.glyphs);
//! assert!(board.paint_char(Location::new(2, 3), '#'));
//! assert_eq!(board.read_char(Location::new(2, 3)), Some('#'));
//! assert!(!board.paint_char(Location::new(-1, 3), '#'));
//! ```

pub mod board;
pub mod config;
pub mod policy;
pub mod scoreboard;

pub use tui_arcade_types as types;

pub use board::Board;
pub use config::{check_distinct_from_fill, check_printable, ConfigError, EngineConfig, RefreshInterval};
pub use policy::KeyPolicy;
pub use scoreboard::compose_scoreboard;
