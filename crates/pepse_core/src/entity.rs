//! Scene-level entity records handed to the scene sink.

use glam::Vec2;

use crate::flora::FruitState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Tag carried by every entity. Only the chunk tags are ever evicted by the
/// world window; the rest belong to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    Ground,
    Trunk,
    Leaf,
    Fruit,
    Sky,
    Avatar,
}

impl EntityTag {
    pub const CHUNK_TAGS: &'static [EntityTag] = &[
        EntityTag::Ground,
        EntityTag::Trunk,
        EntityTag::Leaf,
        EntityTag::Fruit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Trunk => "trunk",
            Self::Leaf => "leaf",
            Self::Fruit => "fruit",
            Self::Sky => "sky",
            Self::Avatar => "avatar",
        }
    }

    /// True for tags produced by world generation.
    pub fn is_chunk(self) -> bool {
        Self::CHUNK_TAGS.contains(&self)
    }
}

impl std::fmt::Display for EntityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draw layer requested on `add`. Ordering is back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Background,
    StaticObjects,
    Default,
    Leaves,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub tag: EntityTag,
    /// Screen-space top-left corner (y grows downward).
    pub top_left: Vec2,
    pub size: Vec2,
    /// Grid column index of the column that generated this entity.
    pub column: Option<i64>,
    pub fruit: Option<FruitState>,
}

impl Entity {
    pub fn new(id: EntityId, tag: EntityTag, top_left: Vec2, size: Vec2) -> Self {
        Self {
            id,
            tag,
            top_left,
            size,
            column: None,
            fruit: None,
        }
    }

    pub fn with_column(mut self, column: i64) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_fruit(mut self, fruit: FruitState) -> Self {
        self.fruit = Some(fruit);
        self
    }

    pub fn center(&self) -> Vec2 {
        self.top_left + self.size * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.top_left + self.size;
        point.x >= self.top_left.x && point.x <= max.x && point.y >= self.top_left.y && point.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_tags_are_exactly_world_tags() {
        assert!(EntityTag::Ground.is_chunk());
        assert!(EntityTag::Trunk.is_chunk());
        assert!(EntityTag::Leaf.is_chunk());
        assert!(EntityTag::Fruit.is_chunk());
        assert!(!EntityTag::Sky.is_chunk());
        assert!(!EntityTag::Avatar.is_chunk());
    }

    #[test]
    fn display_matches_tag_string() {
        assert_eq!(EntityTag::Trunk.to_string(), "trunk");
        assert_eq!(format!("{}", EntityTag::Ground), "ground");
    }

    #[test]
    fn center_is_midpoint() {
        let e = Entity::new(
            EntityId(1),
            EntityTag::Ground,
            Vec2::new(30.0, 600.0),
            Vec2::splat(30.0),
        );
        assert_eq!(e.center(), Vec2::new(45.0, 615.0));
        assert!(e.contains(Vec2::new(40.0, 610.0)));
        assert!(!e.contains(Vec2::new(70.0, 610.0)));
    }
}
