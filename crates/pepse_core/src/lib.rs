//! Deterministic, chunked world generation for an endless 2D side-scroller.
//!
//! A seeded height field drives the terrain, seeded per-column draws decide
//! where trees grow, and a sliding window materializes and evicts world
//! chunks as the tracked avatar walks. Rendering, physics and input belong to
//! the host; the core only talks to it through [`scene::SceneSink`] and
//! [`window::PositionTracker`].

pub mod config;
pub mod energy;
pub mod entity;
pub mod flora;
pub mod height_field;
pub mod input;
pub mod random;
pub mod scene;
pub mod terrain;
pub mod time;
pub mod window;

pub use config::{load_world_config_from_path, validate_world_config, WorldConfig};
pub use entity::{Entity, EntityId, EntityTag, Layer};
pub use flora::{Flora, FruitState, Tree};
pub use height_field::HeightField;
pub use scene::{SceneRegistry, SceneSink};
pub use terrain::{GroundCell, Terrain};
pub use window::{PositionTracker, Shift, WorldWindow, WorldWindowManager};
