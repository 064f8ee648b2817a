//! # holdem-engine: Texas Hold'em Game Core
//!
//! A no-limit Texas Hold'em table for 2 to 10 players. The crate keeps the
//! whole game state in memory and advances it through three operations:
//! start a round, deal the next street, apply a player action. Every
//! operation answers with a serializable snapshot.
//!
//! ## Core Modules
//!
//! - [`cards`] - Suits, ranks, cards and bounded card sets
//! - [`deck`] - Card sources: seeded shuffled pack and scripted decks
//! - [`hand`] - Best five-card combination out of up to seven cards
//! - [`player`] - Player stacks, bets and applied actions
//! - [`rules`] - Legal action menu and action validation
//! - [`pot`] - Side pot distribution with refunds
//! - [`table`] - Seating, blinds rotation and turn order
//! - [`engine`] - Game state machine
//! - [`context`] - Snapshots returned by engine operations
//! - [`settings`] - Starting stack and blinds
//! - [`equity`] - Monte Carlo head-to-head equity
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::Card;
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]
//!     .iter()
//!     .map(|code| code.parse().unwrap())
//!     .collect();
//!
//! let combo = evaluate(&cards).unwrap();
//! assert_eq!(combo.category(), Category::StraightFlush);
//! ```
//!
//! ## Playing a Round
//!
//! ```rust
//! use holdem_engine::engine::{Engine, Point};
//! use holdem_engine::player::ActionKind;
//! use holdem_engine::settings::Settings;
//!
//! let settings = Settings::default();
//! let mut engine = Engine::seeded(settings, vec!["ann", "bob", "cid"], 42).unwrap();
//!
//! engine.new_round();
//! while engine.point() == Point::ActionNeeded {
//!     let context = engine.action(ActionKind::Fold, 0);
//!     assert!(context.is_success());
//! }
//! assert_eq!(engine.point(), Point::RoundNeeded);
//! ```

pub mod cards;
pub mod context;
pub mod deck;
pub mod engine;
pub mod equity;
pub mod errors;
pub mod hand;
pub mod player;
pub mod pot;
pub mod rules;
pub mod settings;
pub mod table;
