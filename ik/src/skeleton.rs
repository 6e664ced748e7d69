use {
    crate::pick::{ColorGenerator, PickColor},
    ahash::AHashMap,
    smallvec::SmallVec,
    std::ops::{Index, IndexMut},
    ultraviolet::Vec3,
};

/// Stable handle of a bone inside [`Skeleton`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoneId(usize);

impl BoneId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Positioned marker node.
#[derive(Clone, Debug)]
pub struct Bone {
    pub position: Vec3,
    pub color: [f32; 3],
    pub pickable: bool,
    parent: Option<BoneId>,
    children: SmallVec<[BoneId; 2]>,
    pick_color: PickColor,
}

impl Bone {
    pub fn parent(&self) -> Option<BoneId> {
        self.parent
    }

    pub fn children(&self) -> &[BoneId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Color identifying this bone in the picking pass.
    pub fn pick_color(&self) -> PickColor {
        self.pick_color
    }
}

/// Arena of bones forming a forest.
///
/// Bones are only ever appended, so a [`BoneId`] stays valid for the whole
/// lifetime of the skeleton.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
    by_color: AHashMap<u64, BoneId>,
    colors: ColorGenerator,
    active: Option<BoneId>,
}

impl Skeleton {
    pub fn new() -> Self {
        Skeleton::default()
    }

    /// Creates skeleton whose picking colors never collide with `reserved`.
    pub fn with_reserved_colors(
        reserved: impl IntoIterator<Item = PickColor>,
    ) -> Self {
        Skeleton {
            colors: ColorGenerator::new().with_reserved(reserved),
            ..Skeleton::default()
        }
    }

    /// Appends new bone and makes it active.
    ///
    /// A `parent` minted by another skeleton trips a debug assertion.
    /// Release builds add such bone as a root.
    pub fn add_bone(
        &mut self,
        position: Vec3,
        parent: Option<BoneId>,
        color: [f32; 3],
    ) -> BoneId {
        let id = BoneId(self.bones.len());
        let parent = parent.filter(|parent| {
            debug_assert!(
                parent.0 < self.bones.len(),
                "Parent {:?} does not belong to the skeleton",
                parent
            );
            parent.0 < self.bones.len()
        });
        if let Some(parent) = parent {
            self.bones[parent.0].children.push(id);
        }

        let pick_color = self.colors.next_color();
        self.by_color.insert(pick_color.hash(), id);

        self.bones.push(Bone {
            position,
            color,
            pickable: false,
            parent,
            children: SmallVec::new(),
            pick_color,
        });

        tracing::trace!(
            "Bone {:?} added at {:?} with pick color {}",
            id,
            position,
            pick_color
        );

        self.active = Some(id);
        id
    }

    /// Appends new bone as a child of the active one.
    pub fn extend_active(&mut self, position: Vec3, color: [f32; 3]) -> BoneId {
        self.add_bone(position, self.active, color)
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn ids(&self) -> impl Iterator<Item = BoneId> {
        (0..self.bones.len()).map(BoneId)
    }

    pub fn get(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    pub fn bone(&self, id: BoneId) -> &Bone {
        &self.bones[id.0]
    }

    pub fn bone_mut(&mut self, id: BoneId) -> &mut Bone {
        &mut self.bones[id.0]
    }

    pub fn position(&self, id: BoneId) -> Vec3 {
        self.bones[id.0].position
    }

    pub fn set_position(&mut self, id: BoneId, position: Vec3) {
        self.bones[id.0].position = position;
    }

    pub fn parent(&self, id: BoneId) -> Option<BoneId> {
        self.bones[id.0].parent
    }

    pub fn children(&self, id: BoneId) -> &[BoneId] {
        &self.bones[id.0].children
    }

    /// Follows parent links up to the root of the tree containing `id`.
    pub fn root_of(&self, mut id: BoneId) -> BoneId {
        while let Some(parent) = self.bones[id.0].parent {
            id = parent;
        }
        id
    }

    pub fn active(&self) -> Option<BoneId> {
        self.active
    }

    pub fn set_active(&mut self, active: Option<BoneId>) {
        debug_assert!(active.map_or(true, |id| id.0 < self.bones.len()));
        self.active = active;
    }

    /// Resolves color read back from the picking pass.
    pub fn bone_by_color(&self, color: PickColor) -> Option<BoneId> {
        self.by_color.get(&color.hash()).copied()
    }

    /// Depth-first pre-order traversal of the tree rooted at `root`.
    pub fn walk(&self, root: BoneId) -> Walk<'_> {
        Walk {
            skeleton: self,
            stack: vec![root],
        }
    }

    /// Path from `root` down to a leaf, following the first child of every
    /// bone.
    pub fn path_to_leaf(&self, root: BoneId) -> Vec<BoneId> {
        let mut path = vec![root];
        let mut bone = root;
        while let Some(&child) = self.bones[bone.0].children.first() {
            path.push(child);
            bone = child;
        }
        path
    }
}

impl Index<BoneId> for Skeleton {
    type Output = Bone;

    fn index(&self, id: BoneId) -> &Bone {
        self.bone(id)
    }
}

impl IndexMut<BoneId> for Skeleton {
    fn index_mut(&mut self, id: BoneId) -> &mut Bone {
        self.bone_mut(id)
    }
}

/// Iterator returned by [`Skeleton::walk`].
pub struct Walk<'a> {
    skeleton: &'a Skeleton,
    stack: Vec<BoneId>,
}

impl Iterator for Walk<'_> {
    type Item = BoneId;

    fn next(&mut self) -> Option<BoneId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.skeleton.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

    #[test]
    fn parent_child_links_are_consistent() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.add_bone(Vec3::zero(), None, WHITE);
        let a = skeleton.add_bone(Vec3::unit_x(), Some(root), WHITE);
        let b = skeleton.add_bone(Vec3::unit_y(), Some(root), WHITE);
        let c = skeleton.extend_active(Vec3::unit_z(), WHITE);

        assert_eq!(skeleton.children(root), &[a, b]);
        assert_eq!(skeleton.children(b), &[c]);
        for id in skeleton.ids() {
            if let Some(parent) = skeleton.parent(id) {
                assert!(skeleton.children(parent).contains(&id));
            }
            for &child in skeleton.children(id) {
                assert_eq!(skeleton.parent(child), Some(id));
            }
        }

        assert_eq!(skeleton.root_of(c), root);
        assert_eq!(skeleton.active(), Some(c));
    }

    #[test]
    fn walk_visits_tree_in_pre_order() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.add_bone(Vec3::zero(), None, WHITE);
        let a = skeleton.add_bone(Vec3::zero(), Some(root), WHITE);
        let a1 = skeleton.add_bone(Vec3::zero(), Some(a), WHITE);
        let b = skeleton.add_bone(Vec3::zero(), Some(root), WHITE);
        let _detached = skeleton.add_bone(Vec3::zero(), None, WHITE);

        let order: Vec<_> = skeleton.walk(root).collect();
        assert_eq!(order, vec![root, a, a1, b]);
        assert_eq!(skeleton.path_to_leaf(root), vec![root, a, a1]);
    }

    #[test]
    fn bones_are_found_by_pick_color() {
        let reserved = PickColor::new(1, 0, 0);
        let mut skeleton = Skeleton::with_reserved_colors(vec![reserved]);
        let root = skeleton.add_bone(Vec3::zero(), None, WHITE);
        let tip = skeleton.add_bone(Vec3::unit_y(), Some(root), WHITE);

        let root_color = skeleton[root].pick_color();
        assert_ne!(root_color, reserved);
        assert_ne!(root_color, skeleton[tip].pick_color());
        assert_eq!(skeleton.bone_by_color(root_color), Some(root));
        assert_eq!(
            skeleton.bone_by_color(skeleton[tip].pick_color()),
            Some(tip)
        );
        assert_eq!(skeleton.bone_by_color(reserved), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not belong")]
    fn foreign_parent_is_caught_in_debug() {
        let mut other = Skeleton::new();
        other.add_bone(Vec3::zero(), None, WHITE);
        let foreign = other.extend_active(Vec3::unit_y(), WHITE);

        let mut skeleton = Skeleton::new();
        skeleton.add_bone(Vec3::zero(), Some(foreign), WHITE);
    }
}
