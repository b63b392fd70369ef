//! Tiles and stacks
//!
//! A [`Tile`] is not `Clone`: at any moment it is owned by exactly one container
//! (a slot's [`Stack`], a pending dock stack, or nothing once destroyed). Moving
//! tiles between containers is always a `Vec` move, never a copy.

use hexa_stack_types::{Color, TileId};

/// A single colored hex tile
#[derive(Debug, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    color: Color,
}

impl Tile {
    pub fn new(id: TileId, color: Color) -> Self {
        Self { id, color }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Ordered tiles occupying one slot, bottom to top
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Stack {
    tiles: Vec<Tile>,
}

impl Stack {
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn top(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    pub fn top_color(&self) -> Option<Color> {
        self.top().map(Tile::color)
    }

    /// Colors bottom to top
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.tiles.iter().map(Tile::color)
    }

    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Append tiles on top, keeping their relative order.
    pub fn append(&mut self, mut tiles: Vec<Tile>) {
        self.tiles.append(&mut tiles);
    }

    /// Detach the top `count` tiles (bottom-to-top order preserved).
    ///
    /// `count` is clamped to the stack length.
    pub fn split_top(&mut self, count: usize) -> Vec<Tile> {
        let at = self.tiles.len().saturating_sub(count);
        self.tiles.split_off(at)
    }

    /// Remove every tile, leaving the stack empty.
    pub fn take_all(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.tiles)
    }
}
