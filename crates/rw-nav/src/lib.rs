//! `rw-nav` — pathfinding over the raceway spatial network.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`path`]   | `NavigationPath` (ordered points + transitions)        |
//! | [`search`] | A* (`find_path`, `find_path_avoiding`, `path_cost`)    |
//!
//! Costs are mover-specific traversal times, so two movers may get two
//! different "best" routes between the same pair of points.

pub mod path;
pub mod search;


pub use path::NavigationPath;
pub use search::{OPTIMISTIC_SPEED, find_path, find_path_avoiding, path_cost};
