//! Habitat persistence: JSON snapshots of the grid and camera.
//!
//! ## Module Structure
//!
//! - [`error`] - Error type for save/load
//! - [`snapshot`] - File format types and the tolerant parser
//! - [`save`] - Writing timestamped files and reading them back
//! - [`summary`] - Save listings for the recent-saves menu
//!
//! Save and load are blocking calls on the main thread; snapshots are small
//! and only written on user request.

mod error;
mod save;
mod snapshot;
mod summary;

#[cfg(test)]
mod tests;

pub use save::{load_snapshot, save_snapshot};
pub use snapshot::{CameraPose, LoadedHabitat};
pub use summary::{human_age, list_saves, SaveSummary};

#[cfg(test)]
pub use snapshot::parse_snapshot;
