//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, every speed is per tick
//! - Stable iteration order (registration order of each collection)
//! - Screen bounds passed in, never global
//! - No rendering or platform dependencies beyond the `Renderer` seam

pub mod agent;
pub mod body;
pub mod geom;
pub mod player;
pub mod projectile;
pub mod props;
pub mod round;
pub mod world;

pub use agent::{AgentState, Launcher, MonkeyKind, PatrolAgent};
pub use body::{BodyClass, FallingBody, Kinematics, first_contact};
pub use geom::{Aabb, EdgeContact, Facing, edge_query};
pub use player::{HeldItem, Player, PlayerStep};
pub use projectile::{Projectile, ProjectileKind};
pub use props::{Barrel, Boss, Pickup, PickupKind};
pub use round::{LossCause, Round, RoundEvent, TickInput, TickOutcome};
pub use world::{Bounds, Ladder, Platform, World};
