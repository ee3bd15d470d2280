// Kinematic physics for sprite characters
//
// Downward-positive screen coordinates: gravity increases `velocity.y`,
// jumping sets it negative. The only collision shapes are the flat ground
// line and the world's edges.

pub mod body;
mod world;

pub use body::KinematicBody;
pub use world::{Contact, PhysicsWorld};
