//! Brickwork - masonry grid layout.
//!
//! Items of equal width are packed into as many columns as fit their
//! container, either round-robin or always into the shortest column. A
//! [`Grid`] waits until its items are present, lays them out, and keeps the
//! layout current as the viewport resizes.
//!
//! The crate never talks to a rendering environment directly. Everything it
//! needs is behind the [`Host`](host::Host) trait, and time is driven through
//! a [`Scheduler`](timer::Scheduler). [`Scene`](scene::Scene) and
//! [`ManualClock`](timer::ManualClock) are the headless implementations of
//! both.
//!
//! # Examples
//!
//! ```rust
//! use brickwork::{Grid, config::GridConfig};
//! use brickwork_core::{geometry::Size, scene::Scene, timer::ManualClock};
//!
//! let mut scene = Scene::new(300.0);
//! let container = scene.add_container(Some(".grid"), None).unwrap();
//! for height in [50.0, 80.0, 30.0, 60.0, 40.0] {
//!     scene.insert_item(container, Size::new(90.0, height)).unwrap();
//! }
//!
//! let config = GridConfig::new()
//!     .with_container(".grid")
//!     .with_items(5)
//!     .with_gutter(10.0);
//! let grid = Grid::new(config, scene, ManualClock::new()).expect("valid configuration");
//!
//! let plan = grid.last_plan().expect("laid out");
//! assert_eq!(plan.column_count(), 3);
//! assert_eq!(plan.container_height(), Some(140.0));
//! ```

pub mod color;
pub mod config;
pub mod export;
pub mod grid;
pub mod layout;

mod error;

pub use brickwork_core::{geometry, host, scene, timer};

pub use error::BrickworkError;
pub use grid::{Grid, GridBuilder, GridState, POLL_INTERVAL, RESIZE_DEBOUNCE};
