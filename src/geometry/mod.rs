pub mod container;

pub use container::{ContainerProfile, pile_height_at, radius_at};
