//! Binary space partitioning: split the map into a tree of rectangles, put a room in each
//! leaf, then join sibling subtrees bottom-up so connectivity follows the hierarchy.

use slotmap::{SlotMap, new_key_type};
use tracing::debug;

use crate::config::{BspConfig, GenerationConfig};
use crate::map::{GridMap, Rect, Region, RegionKind};
use crate::rng::Rng;
use crate::types::{Pos, TileKind};

use super::grid::{carve_l_corridor, carve_rect};

/// Wall kept between a leaf's edge and its room, on each side.
const ROOM_MARGIN: i32 = 1;
const CONCEALMENT_PATCH_SIZE: i32 = 2;
const CONCEALMENT_ATTEMPTS_PER_ROOM: usize = 8;

new_key_type! {
    pub(super) struct NodeId;
}

#[derive(Clone, Debug)]
pub(super) struct BspNode {
    pub(super) rect: Rect,
    pub(super) depth: u32,
    pub(super) children: Option<(NodeId, NodeId)>,
    pub(super) room: Option<Rect>,
}

pub(super) struct BspTree {
    pub(super) nodes: SlotMap<NodeId, BspNode>,
    pub(super) root: NodeId,
}

impl BspTree {
    pub(super) fn build(area: Rect, config: &BspConfig, rng: &mut Rng) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(BspNode { rect: area, depth: 0, children: None, room: None });
        let mut tree = Self { nodes, root };
        tree.split(root, config, rng);
        tree
    }

    fn split(&mut self, id: NodeId, config: &BspConfig, rng: &mut Rng) {
        let BspNode { rect, depth, .. } = self.nodes[id];
        if depth >= config.max_depth {
            return;
        }
        let min_child = split_guard(config);
        let Some((first, second)) = split_rect(rect, min_child, rng) else {
            return;
        };

        let left = self.nodes.insert(BspNode {
            rect: first,
            depth: depth + 1,
            children: None,
            room: None,
        });
        let right = self.nodes.insert(BspNode {
            rect: second,
            depth: depth + 1,
            children: None,
            room: None,
        });
        self.nodes[id].children = Some((left, right));
        self.split(left, config, rng);
        self.split(right, config, rng);
    }

    /// Leaves in depth-first, left-to-right order.
    pub(super) fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes[id].children {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => leaves.push(id),
            }
        }
        leaves
    }

    fn place_rooms(&mut self, config: &BspConfig, rng: &mut Rng) {
        for id in self.leaves() {
            let node = &mut self.nodes[id];
            node.room = room_in_leaf(node.rect, config, rng);
        }
    }

    /// Post-order walk that links the two subtrees of every inner node.
    ///
    /// Returns the room that stands in for the subtree when its parent connects it.
    fn connect(&self, id: NodeId, map: &mut GridMap, rng: &mut Rng) -> Option<Rect> {
        let node = &self.nodes[id];
        let Some((left, right)) = node.children else {
            return node.room;
        };
        let left_room = self.connect(left, map, rng);
        let right_room = self.connect(right, map, rng);
        if let (Some(from), Some(to)) = (left_room, right_room) {
            carve_l_corridor(map, from.center(), to.center(), rng.next_bool());
        }
        left_room.or(right_room)
    }
}

/// Smallest extent either half of a split may have along the cut axis.
fn split_guard(config: &BspConfig) -> i32 {
    2 * config.min_room_size as i32 + ROOM_MARGIN
}

/// Cuts `rect` along a random axis, keeping both halves at least `min_child` wide.
fn split_rect(rect: Rect, min_child: i32, rng: &mut Rng) -> Option<(Rect, Rect)> {
    let vertical_first = rng.next_bool();
    let can_split_vertically = rect.w >= 2 * min_child;
    let can_split_horizontally = rect.h >= 2 * min_child;

    let vertical = match (can_split_vertically, can_split_horizontally) {
        (false, false) => return None,
        (true, false) => true,
        (false, true) => false,
        (true, true) => vertical_first,
    };

    if vertical {
        let cut = rng.range_inclusive(min_child, rect.w - min_child);
        Some((
            Rect::new(rect.x, rect.y, cut, rect.h),
            Rect::new(rect.x + cut, rect.y, rect.w - cut, rect.h),
        ))
    } else {
        let cut = rng.range_inclusive(min_child, rect.h - min_child);
        Some((
            Rect::new(rect.x, rect.y, rect.w, cut),
            Rect::new(rect.x, rect.y + cut, rect.w, rect.h - cut),
        ))
    }
}

fn room_in_leaf(leaf: Rect, config: &BspConfig, rng: &mut Rng) -> Option<Rect> {
    let min_size = config.min_room_size as i32;
    let max_width = (config.max_room_size as i32).min(leaf.w - 2 * ROOM_MARGIN);
    let max_height = (config.max_room_size as i32).min(leaf.h - 2 * ROOM_MARGIN);
    if max_width < min_size || max_height < min_size {
        return None;
    }

    let width = rng.range_inclusive(min_size, max_width);
    let height = rng.range_inclusive(min_size, max_height);
    let x = rng.range_inclusive(leaf.x + ROOM_MARGIN, leaf.right() - ROOM_MARGIN - width + 1);
    let y = rng.range_inclusive(leaf.y + ROOM_MARGIN, leaf.bottom() - ROOM_MARGIN - height + 1);
    Some(Rect::new(x, y, width, height))
}

pub(super) fn generate(config: &GenerationConfig, rng: &mut Rng) -> GridMap {
    let mut map = GridMap::new(config.width, config.height);
    let area = Rect::new(0, 0, config.width as i32, config.height as i32);

    let mut tree = BspTree::build(area, &config.bsp, rng);
    tree.place_rooms(&config.bsp, rng);

    let rooms: Vec<Rect> =
        tree.leaves().into_iter().filter_map(|id| tree.nodes[id].room).collect();
    for &room in &rooms {
        carve_rect(&mut map, room, TileKind::Floor);
    }
    tree.connect(tree.root, &mut map, rng);

    map.spawn = rooms.first().map_or(Pos { y: 1, x: 1 }, |room| room.center());
    let patches = place_concealment(&mut map, &rooms, &config.bsp, rng);
    map.regions = rooms.iter().map(|&rect| Region::new(rect, RegionKind::Room)).collect();

    debug!(nodes = tree.nodes.len(), rooms = rooms.len(), patches, "bsp layout carved");
    map
}

/// Scatters fixed-size foliage patches over room interiors, spaced apart and capped per room.
fn place_concealment(
    map: &mut GridMap,
    rooms: &[Rect],
    config: &BspConfig,
    rng: &mut Rng,
) -> usize {
    let cap = (rooms.len() as f64 * config.concealment_per_room).floor() as usize;
    let spacing = config.concealment_spacing as u32;
    let mut patches: Vec<Rect> = Vec::new();

    for _ in 0..rooms.len() * CONCEALMENT_ATTEMPTS_PER_ROOM {
        if patches.len() >= cap {
            break;
        }
        let Some(&room) = rng.pick(rooms) else {
            break;
        };
        // Patches stay off the room's edge cells so doorways and corridors keep clear.
        if room.w - 2 < CONCEALMENT_PATCH_SIZE || room.h - 2 < CONCEALMENT_PATCH_SIZE {
            continue;
        }
        let x = rng.range_inclusive(room.x + 1, room.right() - CONCEALMENT_PATCH_SIZE);
        let y = rng.range_inclusive(room.y + 1, room.bottom() - CONCEALMENT_PATCH_SIZE);
        let patch = Rect::new(x, y, CONCEALMENT_PATCH_SIZE, CONCEALMENT_PATCH_SIZE);

        if patch.contains(map.spawn)
            || !patch.cells().all(|pos| map.tile_at(pos) == TileKind::Floor)
            || patches.iter().any(|other| chebyshev(other.center(), patch.center()) < spacing)
        {
            continue;
        }
        carve_rect(map, patch, TileKind::Foliage);
        patches.push(patch);
    }
    patches.len()
}

fn chebyshev(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}
