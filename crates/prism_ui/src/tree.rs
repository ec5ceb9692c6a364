//! Control registry and hierarchy.
//!
//! Every live control is stored here by id. Ids are never reused, so a
//! failed lookup is the liveness check for anything holding an id without
//! owning the control (tooltips, linked scrollers, pending timers).

use std::collections::HashMap;

use crate::control::{Capability, Control, ControlId};
use crate::error::{GuiError, GuiResult};

/// Owns all controls of one GUI.
pub struct ControlTree {
    /// Controls indexed by id.
    controls: HashMap<ControlId, Control>,
    /// Name index.
    names: HashMap<String, ControlId>,
    /// Top-level controls in z-order (last is topmost).
    roots: Vec<ControlId>,
    /// Id counter.
    next_id: u64,
}

impl ControlTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            controls: HashMap::with_capacity(64),
            names: HashMap::with_capacity(64),
            roots: Vec::with_capacity(16),
            next_id: 1,
        }
    }

    /// Reserves the next id.
    pub fn next_id(&mut self) -> ControlId {
        let id = ControlId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Returns true if `name` is taken.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Registers a top-level control.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::DuplicateName`] if the name is taken.
    pub fn insert_root(&mut self, control: Control) -> GuiResult<ControlId> {
        if self.has_name(&control.name) {
            return Err(GuiError::DuplicateName(control.name));
        }
        let id = control.id;
        self.names.insert(control.name.clone(), id);
        self.controls.insert(id, control);
        self.roots.push(id);
        Ok(id)
    }

    /// Moves `child` (with its subtree) to the top of `parent`'s children.
    ///
    /// # Errors
    ///
    /// Fails if either control is missing, `parent` cannot hold children, or
    /// the move would create a cycle.
    pub fn attach(&mut self, parent: ControlId, child: ControlId) -> GuiResult<()> {
        let holder = self.get(parent).ok_or(GuiError::NoSuchControl(parent))?;
        if !holder.capabilities().has(Capability::Container) {
            return Err(GuiError::Unsupported {
                control: parent,
                capability: Capability::Container,
            });
        }
        if !self.contains(child) {
            return Err(GuiError::NoSuchControl(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(GuiError::InvalidParent { parent, child });
        }
        self.unlink(child);
        if let Some(c) = self.controls.get_mut(&child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.controls.get_mut(&parent) {
            p.children.push(child);
        }
        Ok(())
    }

    /// Turns `child` back into a top-level control.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::NoSuchControl`] if `child` is missing.
    pub fn detach(&mut self, child: ControlId) -> GuiResult<()> {
        if !self.contains(child) {
            return Err(GuiError::NoSuchControl(child));
        }
        self.unlink(child);
        if let Some(c) = self.controls.get_mut(&child) {
            c.parent = None;
        }
        self.roots.push(child);
        Ok(())
    }

    /// Removes `id` from its parent's child list or from the roots.
    fn unlink(&mut self, id: ControlId) {
        let parent = self.controls.get(&id).and_then(|c| c.parent);
        match parent.and_then(|p| self.controls.get_mut(&p)) {
            Some(p) => p.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }
    }

    /// Returns true if `ancestor` is a (transitive) parent of `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: ControlId, id: ControlId) -> bool {
        let mut cur = self.get(id).and_then(Control::parent);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.get(p).and_then(Control::parent);
        }
        false
    }

    /// Moves `id` to the top of its sibling list. Returns true if it moved.
    pub fn raise(&mut self, id: ControlId) -> bool {
        self.restack(id, true)
    }

    /// Moves `id` to the bottom of its sibling list. Returns true if it moved.
    pub fn lower(&mut self, id: ControlId) -> bool {
        self.restack(id, false)
    }

    fn restack(&mut self, id: ControlId, top: bool) -> bool {
        let Some(parent) = self.controls.get(&id).map(|c| c.parent) else {
            return false;
        };
        let siblings = match parent {
            Some(p) => match self.controls.get_mut(&p) {
                Some(parent) => &mut parent.children,
                None => return false,
            },
            None => &mut self.roots,
        };
        let Some(pos) = siblings.iter().position(|&s| s == id) else {
            return false;
        };
        let target = if top { siblings.len() - 1 } else { 0 };
        if pos == target {
            return false;
        }
        siblings.remove(pos);
        if top {
            siblings.push(id);
        } else {
            siblings.insert(0, id);
        }
        true
    }

    /// Removes a control and its whole subtree, returning the removed
    /// controls (children before parents). Missing ids yield nothing.
    pub fn remove(&mut self, id: ControlId) -> Vec<Control> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.unlink(id);
        let mut removed = Vec::new();
        self.remove_subtree(id, &mut removed);
        removed
    }

    fn remove_subtree(&mut self, id: ControlId, out: &mut Vec<Control>) {
        let Some(control) = self.controls.remove(&id) else {
            return;
        };
        for &child in &control.children {
            self.remove_subtree(child, out);
        }
        self.names.remove(&control.name);
        out.push(control);
    }

    /// Returns true if the control is live.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains_key(&id)
    }

    /// Gets a control.
    #[must_use]
    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(&id)
    }

    /// Gets a control mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(&id)
    }

    /// Finds a control by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ControlId> {
        self.names.get(name).copied()
    }

    /// Children of a control in z-order.
    #[must_use]
    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.get(id).map_or(&[], Control::children)
    }

    /// Top-level controls in z-order.
    #[must_use]
    pub fn roots(&self) -> &[ControlId] {
        &self.roots
    }

    /// Number of live controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns true if no controls are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// All live controls, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Control> + '_ {
        self.controls.values()
    }

    /// All live controls mutably, in no particular order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Control> + '_ {
        self.controls.values_mut()
    }

    /// Canvas position of a control's footprint origin.
    #[must_use]
    pub fn origin(&self, id: ControlId) -> Option<(f32, f32)> {
        let mut c = self.get(id)?;
        let (mut x, mut y) = (c.rect.x, c.rect.y);
        while let Some(p) = c.parent.and_then(|p| self.get(p)) {
            x += p.rect.x;
            y += p.rect.y;
            c = p;
        }
        Some((x, y))
    }

    /// True when the control and every ancestor are visible.
    #[must_use]
    pub fn is_shown(&self, id: ControlId) -> bool {
        let mut cur = self.get(id);
        while let Some(c) = cur {
            if !c.is_visible() {
                return false;
            }
            cur = c.parent.and_then(|p| self.get(p));
        }
        true
    }

    /// Ids in paint order: parents before children, siblings bottom to top.
    pub fn iter_dfs(&self) -> impl Iterator<Item = ControlId> + '_ {
        ControlDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }
}

impl Default for ControlTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first iterator over the control tree.
struct ControlDfsIterator<'a> {
    tree: &'a ControlTree,
    stack: Vec<ControlId>,
}

impl Iterator for ControlDfsIterator<'_> {
    type Item = ControlId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Behavior, Panel};
    use prism_core::{PickAllocator, Rect};

    struct Fixture {
        tree: ControlTree,
        keys: PickAllocator<ControlId>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tree: ControlTree::new(),
                keys: PickAllocator::new(),
            }
        }

        fn add(&mut self, name: &str, behavior: Behavior) -> ControlId {
            let id = self.tree.next_id();
            let key = self.keys.allocate(id).unwrap();
            let control = Control::new(id, name.into(), Rect::new(10.0, 20.0, 50.0, 50.0), key, behavior);
            self.tree.insert_root(control).unwrap()
        }
    }

    #[test]
    fn test_tree_hierarchy() {
        let mut f = Fixture::new();
        let root = f.add("root", Behavior::Panel(Panel::default()));
        let a = f.add("a", Behavior::Button);
        let b = f.add("b", Behavior::Button);
        f.tree.attach(root, a).unwrap();
        f.tree.attach(root, b).unwrap();

        assert_eq!(f.tree.children(root), &[a, b]);
        assert_eq!(f.tree.roots(), &[root]);
        assert_eq!(f.tree.iter_dfs().collect::<Vec<_>>(), vec![root, a, b]);
        assert_eq!(f.tree.origin(a), Some((20.0, 40.0)));
    }

    #[test]
    fn test_rejects_bad_parents() {
        let mut f = Fixture::new();
        let outer = f.add("outer", Behavior::Panel(Panel::default()));
        let inner = f.add("inner", Behavior::Panel(Panel::default()));
        let button = f.add("button", Behavior::Button);
        f.tree.attach(outer, inner).unwrap();

        assert!(matches!(f.tree.attach(button, outer), Err(GuiError::Unsupported { .. })));
        assert!(matches!(f.tree.attach(inner, outer), Err(GuiError::InvalidParent { .. })));
        assert!(matches!(f.tree.attach(inner, inner), Err(GuiError::InvalidParent { .. })));
        assert_eq!(f.tree.children(outer), &[inner]);
    }

    #[test]
    fn test_duplicate_name() {
        let mut f = Fixture::new();
        f.add("same", Behavior::Button);
        let id = f.tree.next_id();
        let key = f.keys.allocate(id).unwrap();
        let dup = Control::new(id, "same".into(), Rect::ZERO, key, Behavior::Button);
        assert_eq!(f.tree.insert_root(dup).unwrap_err(), GuiError::DuplicateName("same".into()));
    }

    #[test]
    fn test_restack() {
        let mut f = Fixture::new();
        let a = f.add("a", Behavior::Button);
        let b = f.add("b", Behavior::Button);
        let c = f.add("c", Behavior::Button);
        assert!(f.tree.raise(a));
        assert_eq!(f.tree.roots(), &[b, c, a]);
        assert!(!f.tree.raise(a));
        assert!(f.tree.lower(c));
        assert_eq!(f.tree.roots(), &[c, b, a]);
    }

    #[test]
    fn test_remove_subtree_is_idempotent() {
        let mut f = Fixture::new();
        let root = f.add("root", Behavior::Panel(Panel::default()));
        let child = f.add("child", Behavior::Button);
        f.tree.attach(root, child).unwrap();

        let removed = f.tree.remove(root);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].id(), child);
        assert!(f.tree.find("child").is_none());
        assert!(f.tree.roots().is_empty());
        assert!(f.tree.remove(root).is_empty());
    }

    #[test]
    fn test_detach_and_visibility() {
        let mut f = Fixture::new();
        let root = f.add("root", Behavior::Panel(Panel::default()));
        let child = f.add("child", Behavior::Button);
        f.tree.attach(root, child).unwrap();
        f.tree.get_mut(root).unwrap().flags.clear(crate::control::ControlFlags::VISIBLE);
        assert!(!f.tree.is_shown(child));

        f.tree.detach(child).unwrap();
        assert_eq!(f.tree.roots(), &[root, child]);
        assert!(f.tree.is_shown(child));
    }
}
