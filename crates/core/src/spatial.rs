//! Read-mostly queries over a generated map: field of view, line of sight, and paths.

mod pathfinding;
mod visibility;

#[cfg(test)]
mod test_support;

pub use pathfinding::{a_star, walkable, walkable_through_doors};
pub use visibility::{compute_visibility, has_line_of_sight};
