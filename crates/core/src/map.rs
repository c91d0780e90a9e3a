//! The shared grid every generator writes and every query reads.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{District, Pos, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub kind: TileKind,
    pub visible: bool,
    pub explored: bool,
    /// Cosmetic index chosen by the terrain-variant pass.
    pub variant: u8,
    /// Shading offset; never consulted by gameplay rules.
    pub light_bias: i16,
}

impl Cell {
    pub const fn new(kind: TileKind) -> Self {
        Self { kind, visible: false, explored: false, variant: 0, light_bias: 0 }
    }
}

/// Axis-aligned integer rectangle; `w` and `h` count cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(self) -> i32 {
        self.x + self.w - 1
    }

    pub const fn bottom(self) -> i32 {
        self.y + self.h - 1
    }

    pub const fn center(self) -> Pos {
        Pos { y: self.y + self.h / 2, x: self.x + self.w / 2 }
    }

    pub const fn area(self) -> i32 {
        self.w * self.h
    }

    pub const fn intersects(self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub const fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    pub const fn expanded(self, margin: i32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2 * margin,
            h: self.h + 2 * margin,
        }
    }

    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.y..=self.bottom())
            .flat_map(move |y| (self.x..=self.right()).map(move |x| Pos { y, x }))
    }

    /// The one-cell ring just outside the rectangle, corners included.
    pub fn ring(self) -> impl Iterator<Item = Pos> {
        let outer = self.expanded(1);
        outer.cells().filter(move |&pos| !self.contains(pos))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Room,
    SecretRoom,
    Cave,
    Block(District),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub rect: Rect,
    pub kind: RegionKind,
}

impl Region {
    pub const fn new(rect: Rect, kind: RegionKind) -> Self {
        Self { rect, kind }
    }

    /// Whether the region's centre must be reachable from the spawn point.
    ///
    /// Secret rooms sit behind secret doors, and a cave's bounding box centre may be rock.
    pub const fn is_connectivity_anchor(&self) -> bool {
        matches!(self.kind, RegionKind::Room | RegionKind::Block(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
    pub spawn: Pos,
    pub regions: Vec<Region>,
    /// Seed the map was generated from, so environment-seeded runs can be replayed.
    pub seed: u64,
}

impl GridMap {
    /// A solid grid of walls.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, TileKind::Wall)
    }

    pub fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::new(kind); width * height],
            spawn: Pos { y: 0, x: 0 },
            regions: Vec::new(),
            seed: 0,
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Interior cells exclude the outer border ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x >= 1
            && pos.y >= 1
            && (pos.x as usize) + 1 < self.width
            && (pos.y as usize) + 1 < self.height
    }

    /// Row-major slot of `pos`; `None` outside the grid or past the end of `cells`.
    pub fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y as usize) * self.width + (pos.x as usize))
            .filter(|&index| index < self.cells.len())
    }

    pub fn pos_of(&self, index: usize) -> Pos {
        Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 }
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).and_then(|index| self.cells.get(index))
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.index(pos).and_then(|index| self.cells.get_mut(index))
    }

    /// Out-of-bounds reads behave like solid wall.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.cell(pos).map_or(TileKind::Wall, |cell| cell.kind)
    }

    /// Out-of-bounds writes are ignored; returns whether a cell was written.
    pub fn set_tile(&mut self, pos: Pos, kind: TileKind) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.kind = kind;
                true
            }
            None => false,
        }
    }

    pub fn blocks_movement(&self, pos: Pos) -> bool {
        self.tile_at(pos).blocks_movement()
    }

    pub fn blocks_sight(&self, pos: Pos) -> bool {
        self.tile_at(pos).blocks_sight()
    }

    pub fn provides_concealment(&self, pos: Pos) -> bool {
        self.tile_at(pos).provides_concealment()
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.visible)
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.explored)
    }

    pub fn clear_visible(&mut self) {
        for cell in &mut self.cells {
            cell.visible = false;
        }
    }

    pub fn mark_seen(&mut self, pos: Pos) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.visible = true;
            cell.explored = true;
        }
    }

    /// Converts a closed or secret door into floor. Anything else is left untouched.
    pub fn open_door(&mut self, pos: Pos) -> bool {
        match self.cell_mut(pos) {
            Some(cell) if cell.kind.is_door() => {
                cell.kind = TileKind::Floor;
                true
            }
            _ => false,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(|index| self.pos_of(index))
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind == kind).count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + self.cells.len() * 4);
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.seed.to_le_bytes());
        for cell in &self.cells {
            bytes.push(cell.kind.code());
            bytes.push(cell.variant);
            bytes.extend(cell.light_bias.to_le_bytes());
        }
        bytes.extend(self.spawn.y.to_le_bytes());
        bytes.extend(self.spawn.x.to_le_bytes());
        bytes.extend((self.regions.len() as u32).to_le_bytes());
        for region in &self.regions {
            for value in [region.rect.x, region.rect.y, region.rect.w, region.rect.h] {
                bytes.extend(value.to_le_bytes());
            }
            bytes.push(match region.kind {
                RegionKind::Room => 0,
                RegionKind::SecretRoom => 1,
                RegionKind::Cave => 2,
                RegionKind::Block(district) => 3 + district.code(),
            });
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub fn render_ascii(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                text.push(if pos == self.spawn { '@' } else { self.tile_at(pos).glyph() });
            }
            text.push('\n');
        }
        text
    }
}
