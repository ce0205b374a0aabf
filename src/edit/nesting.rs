use std::collections::BTreeSet;

use crate::{
    engine::Engine,
    foundation::core::{CompositionId, now_ms},
    foundation::error::{CompError, CompResult},
    history::entry::Operation,
    model::composition::Composition,
    store::registry::Registry,
};

impl Registry {
    /// Compositions from the top ancestor down to `id`, inclusive. Empty for an unknown id.
    pub fn nesting_path(&self, id: &CompositionId) -> Vec<CompositionId> {
        let mut path = Vec::new();
        let mut cursor = self.composition(id);
        while let Some(comp) = cursor {
            // A corrupt parent chain must not spin forever.
            if path.len() > self.composition_count() || path.contains(&comp.id) {
                tracing::warn!(composition = %id, "Parent chain loops");
                break;
            }
            path.push(comp.id.clone());
            cursor = comp.parent_id.as_ref().and_then(|p| self.composition(p));
        }
        path.reverse();
        path
    }

    /// Distance from the top ancestor; the root is at depth 0.
    pub fn nesting_depth(&self, id: &CompositionId) -> Option<usize> {
        self.nesting_path(id).len().checked_sub(1)
    }

    /// Every composition below `id`, in pre-order. Empty for an unknown id.
    pub fn nested_compositions(&self, id: &CompositionId) -> Vec<CompositionId> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        seen.insert(id.clone());
        self.collect_nested(id, &mut seen, &mut out);
        out
    }

    fn collect_nested(
        &self,
        id: &CompositionId,
        seen: &mut BTreeSet<CompositionId>,
        out: &mut Vec<CompositionId>,
    ) {
        let Some(comp) = self.composition(id) else {
            return;
        };
        for child in &comp.nested_ids {
            if self.composition(child).is_none() || !seen.insert(child.clone()) {
                continue;
            }
            out.push(child.clone());
            self.collect_nested(child, seen, out);
        }
    }
}

impl Engine {
    /// Nest `child` directly under `parent`.
    ///
    /// Fails on unknown ids, on self-nesting, when the relation already exists and when
    /// `child` is an ancestor of `parent`. A child that sits under another parent is moved.
    pub fn add_nested_composition(
        &mut self,
        parent: &CompositionId,
        child: &CompositionId,
    ) -> CompResult<()> {
        self.transact(Operation::Nest, "Nest composition", |eng| {
            eng.set_subject::<Composition>(child);
            eng.link_nested(parent, child)
        })
    }

    pub(crate) fn link_nested(
        &mut self,
        parent_id: &CompositionId,
        child_id: &CompositionId,
    ) -> CompResult<()> {
        let mut parent = self.require::<Composition>(parent_id)?.clone();
        let mut child = self.require::<Composition>(child_id)?.clone();
        if parent_id == child_id {
            return Err(CompError::nesting(format!(
                "composition '{child_id}' cannot be nested in itself"
            )));
        }
        if child.parent_id.as_ref() == Some(parent_id) {
            return Err(CompError::nesting(format!(
                "composition '{child_id}' is already nested in '{parent_id}'"
            )));
        }
        if self.registry.nesting_path(parent_id).contains(child_id) {
            tracing::warn!(parent = %parent_id, child = %child_id, "Nesting would create a cycle");
            return Err(CompError::nesting(format!(
                "composition '{child_id}' is an ancestor of '{parent_id}'"
            )));
        }

        let now = now_ms();
        if let Some(old_parent) = &child.parent_id {
            if let Some(old) = self.registry.composition(old_parent) {
                let mut old = old.clone();
                old.nested_ids.retain(|n| n != child_id);
                old.updated_at = now;
                self.put(old);
            }
        }
        if self.registry.is_root(child_id) {
            self.set_root(None);
        }

        parent.nested_ids.push(child_id.clone());
        parent.updated_at = now;
        child.parent_id = Some(parent_id.clone());
        child.updated_at = now;
        self.put(parent);
        self.put(child);
        Ok(())
    }

    /// Detach `child` from its parent. The child stays in the registry, unparented.
    pub fn remove_nested_composition(&mut self, child_id: &CompositionId) -> CompResult<()> {
        self.transact(Operation::Unnest, "Unnest composition", |eng| {
            let mut child = eng.require::<Composition>(child_id)?.clone();
            let Some(parent_id) = child.parent_id.take() else {
                return Err(CompError::nesting(format!(
                    "composition '{child_id}' has no parent"
                )));
            };
            let now = now_ms();
            eng.set_subject::<Composition>(child_id);
            if let Some(parent) = eng.registry.composition(&parent_id) {
                let mut parent = parent.clone();
                parent.nested_ids.retain(|n| n != child_id);
                parent.updated_at = now;
                eng.put(parent);
            }
            child.updated_at = now;
            eng.put(child);
            Ok(())
        })
    }

    /// See [`Registry::nesting_path`].
    pub fn nesting_path(&self, id: &CompositionId) -> Vec<CompositionId> {
        self.registry.nesting_path(id)
    }

    /// See [`Registry::nesting_depth`].
    pub fn nesting_depth(&self, id: &CompositionId) -> Option<usize> {
        self.registry.nesting_depth(id)
    }

    /// See [`Registry::nested_compositions`].
    pub fn nested_compositions(&self, id: &CompositionId) -> Vec<CompositionId> {
        self.registry.nested_compositions(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/nesting.rs"]
mod tests;
