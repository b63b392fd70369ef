//! Merge rules - group selection, drop validation and merge qualification
//!
//! Everything here is a pure function over tile slices. The board controller
//! calls these for both player moves and auto-merge moves; nothing else decides
//! legality.

use crate::error::MoveRejected;
use crate::tile::Tile;

/// Maximal contiguous run at the top of `stack` sharing the top tile's color.
///
/// Empty stack gives an empty group.
///
/// ```
/// use hexa_stack_core::merge::top_group;
/// use hexa_stack_core::Tile;
/// use hexa_stack_types::{Color, TileId};
///
/// let stack = vec![
///     Tile::new(TileId(0), Color::Blue),
///     Tile::new(TileId(1), Color::Red),
///     Tile::new(TileId(2), Color::Red),
/// ];
/// let group = top_group(&stack);
/// assert_eq!(group.len(), 2);
/// assert!(group.iter().all(|t| t.color() == Color::Red));
/// assert!(top_group(&[]).is_empty());
/// ```
pub fn top_group(stack: &[Tile]) -> &[Tile] {
    let Some(top) = stack.last() else {
        return &[];
    };
    let color = top.color();
    let start = stack
        .iter()
        .rposition(|t| t.color() != color)
        .map_or(0, |i| i + 1);
    &stack[start..]
}

/// Every tile shares one color. Empty stacks are not uniform.
pub fn is_uniform(stack: &[Tile]) -> bool {
    match stack.first() {
        Some(first) => stack.iter().all(|t| t.color() == first.color()),
        None => false,
    }
}

/// Validate dropping `group` onto `target`, reporting the reason on failure.
///
/// Order of checks: empty group, capacity, then color. An empty target accepts
/// any group that fits. Only `group[0]` is compared since selected groups are
/// homogeneous.
pub fn check_drop(target: &[Tile], max_height: usize, group: &[Tile]) -> Result<(), MoveRejected> {
    let Some(first) = group.first() else {
        return Err(MoveRejected::EmptyGroup);
    };

    if target.len() + group.len() > max_height {
        return Err(MoveRejected::CapacityExceeded);
    }

    match target.last() {
        None => Ok(()),
        Some(top) if top.color() == first.color() => Ok(()),
        Some(_) => Err(MoveRejected::ColorMismatch),
    }
}

/// Boolean form of [`check_drop`]
pub fn can_drop_group(target: &[Tile], max_height: usize, group: &[Tile]) -> bool {
    check_drop(target, max_height, group).is_ok()
}

/// A stack merges when it is at least `threshold` tall and fully uniform.
pub fn qualifies_for_merge(stack: &[Tile], threshold: usize) -> bool {
    stack.len() >= threshold && is_uniform(stack)
}
