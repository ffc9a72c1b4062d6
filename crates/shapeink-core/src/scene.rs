//! The scene: an ordered list of top-level shapes plus undo history.

use crate::config::SceneConfig;
use crate::geometry::{BoundingBox, Point};
use crate::shapes::{BorderStyle, Group, Shape, ShapeColor, ShapeId};
use crate::storage::{self, LoadSummary, StorageResult};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::path::Path;

/// Owns every top-level shape in draw order (back to front).
///
/// The undo stack holds full copies of the shape list. It always has at
/// least one entry, and after every recorded edit its top equals the live
/// list.
#[derive(Debug, Clone)]
pub struct Scene {
    shapes: Vec<Shape>,
    undo_stack: VecDeque<Vec<Shape>>,
    max_undo_history: Option<usize>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with unbounded history.
    pub fn new() -> Self {
        Self::with_config(&SceneConfig::default())
    }

    pub fn with_config(config: &SceneConfig) -> Self {
        Self {
            shapes: Vec::new(),
            undo_stack: VecDeque::from([Vec::new()]),
            max_undo_history: config.max_undo_history,
        }
    }

    /// Build a scene from text records, skipping malformed lines.
    pub fn from_records(text: &str) -> (Self, LoadSummary) {
        let doc = storage::parse_document(text);
        let mut scene = Self::new();
        let summary = LoadSummary {
            loaded: doc.shapes.len(),
            skipped: doc.skipped,
        };
        scene.replace_shapes(doc.shapes);
        (scene, summary)
    }

    /// The persistent shapes as text records, one per line.
    pub fn to_records(&self) -> String {
        storage::write_document(&self.shapes)
    }

    fn push_snapshot(&mut self) {
        self.undo_stack.push_back(self.shapes.clone());
        if let Some(max) = self.max_undo_history {
            let cap = max.max(1);
            while self.undo_stack.len() > cap {
                self.undo_stack.pop_front();
            }
        }
    }

    /// Record the current state as an undo step, after edits made through
    /// [`Scene::shape_mut`].
    pub fn commit(&mut self) {
        self.push_snapshot();
    }

    /// Restore the previous snapshot.
    /// Returns false when already at the oldest state.
    pub fn undo(&mut self) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        self.undo_stack.pop_back();
        if let Some(top) = self.undo_stack.back() {
            self.shapes = top.clone();
        }
        log::debug!("Undo, {} steps left", self.undo_depth());
        true
    }

    /// Number of steps [`Scene::undo`] can still take.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len() - 1
    }

    /// Add a shape on top of everything else.
    ///
    /// A shape whose id (or any nested id) is already in the scene is added
    /// as a duplicate with fresh ids; the returned id is the one it got.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> ShapeId {
        let mut shape = shape.into();
        let taken: HashSet<ShapeId> = self.shapes.iter().flat_map(Shape::all_ids).collect();
        if has_id_clash(&shape, &taken) {
            log::debug!("{} already in scene, adding a copy", shape.id());
            shape = shape.duplicate();
        }
        let id = shape.id();
        log::debug!("Adding {} {}", shape.kind_name(), id);
        self.shapes.push(shape);
        self.push_snapshot();
        id
    }

    /// Remove every selected top-level shape. Returns how many were removed.
    pub fn remove_selected_shapes(&mut self) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !s.is_selected());
        let removed = before - self.shapes.len();
        if removed > 0 {
            log::debug!("Removed {removed} shapes");
            self.push_snapshot();
        }
        removed
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Direct access for interactive edits; call [`Scene::commit`] when done.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Union of all shape bounds.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Shapes containing `point`, in scene order.
    pub fn select_at(&self, point: Point) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.contains(point))
            .map(Shape::id)
            .collect()
    }

    /// The front-most shape containing `point`.
    pub fn topmost_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains(point))
            .map(Shape::id)
    }

    /// Shapes intersecting `probe`, in scene order.
    pub fn select_intersecting(&self, probe: &Shape) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.intersects(probe))
            .map(Shape::id)
            .collect()
    }

    pub fn selected_shapes(&self) -> Vec<&Shape> {
        self.shapes.iter().filter(|s| s.is_selected()).collect()
    }

    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.is_selected())
            .map(Shape::id)
            .collect()
    }

    /// Returns false if no top-level shape has this id.
    pub fn set_selected(&mut self, id: ShapeId, selected: bool) -> bool {
        match self.shape_mut(id) {
            Some(shape) => {
                shape.set_selected(selected);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        for shape in &mut self.shapes {
            shape.set_selected(false);
        }
    }

    /// Select exactly the given shapes.
    pub fn select_only(&mut self, ids: &[ShapeId]) {
        for shape in &mut self.shapes {
            let selected = ids.contains(&shape.id());
            shape.set_selected(selected);
        }
    }

    pub fn select_all(&mut self) {
        for shape in &mut self.shapes {
            shape.set_selected(true);
        }
    }

    /// Apply `edit` to every selected shape and record one undo step.
    fn edit_selected(&mut self, what: &str, mut edit: impl FnMut(&mut Shape)) -> bool {
        let mut changed = 0;
        for shape in self.shapes.iter_mut().filter(|s| s.is_selected()) {
            edit(shape);
            changed += 1;
        }
        if changed == 0 {
            return false;
        }
        log::debug!("{what} on {changed} shapes");
        self.push_snapshot();
        true
    }

    pub fn move_selected(&mut self, dx: i32, dy: i32) -> bool {
        if dx == 0 && dy == 0 {
            return false;
        }
        self.edit_selected("Move", |s| s.translate(dx, dy))
    }

    pub fn scale_selected(&mut self, factor: f64) -> bool {
        self.edit_selected("Scale", |s| s.scale(factor))
    }

    pub fn rotate_selected(&mut self, degrees: f64) -> bool {
        self.edit_selected("Rotate", |s| s.rotate(degrees))
    }

    pub fn set_color_selected(&mut self, color: ShapeColor) -> bool {
        self.edit_selected("Recolor", |s| s.set_color(color))
    }

    pub fn set_opacity_selected(&mut self, opacity: f64) -> bool {
        self.edit_selected("Set opacity", |s| s.set_opacity(opacity))
    }

    /// Add `delta` to each selected shape's opacity (clamped to `[0, 1]`).
    pub fn adjust_opacity_selected(&mut self, delta: f64) -> bool {
        self.edit_selected("Adjust opacity", |s| {
            let opacity = s.opacity() + delta;
            s.set_opacity(opacity);
        })
    }

    pub fn set_border_style_selected(&mut self, border: BorderStyle) -> bool {
        self.edit_selected("Set border", |s| s.set_border_style(border))
    }

    /// Wrap the selected shapes (at least two) in a new group placed on top.
    /// Returns the group's id.
    pub fn group_selected_shapes(&mut self) -> Option<ShapeId> {
        if self.shapes.iter().filter(|s| s.is_selected()).count() < 2 {
            return None;
        }
        let (children, rest): (Vec<Shape>, Vec<Shape>) =
            std::mem::take(&mut self.shapes)
                .into_iter()
                .partition(Shape::is_selected);
        self.shapes = rest;

        let mut group = Shape::from(Group::new(children));
        group.set_selected(true);
        let id = group.id();
        log::debug!("Grouped {} shapes into {}", group.as_group().map_or(0, Group::len), id);
        self.shapes.push(group);
        self.push_snapshot();
        Some(id)
    }

    /// Dissolve every selected group, appending its children on top.
    /// Returns the ids of the released children.
    pub fn ungroup_selected_shapes(&mut self) -> Vec<ShapeId> {
        let mut released = Vec::new();
        let mut kept = Vec::with_capacity(self.shapes.len());
        for shape in std::mem::take(&mut self.shapes) {
            match shape {
                Shape::Group(group) if group.base.selected => released.extend(group.ungroup()),
                other => kept.push(other),
            }
        }
        self.shapes = kept;
        if released.is_empty() {
            return Vec::new();
        }
        let ids: Vec<ShapeId> = released.iter().map(Shape::id).collect();
        log::debug!("Ungrouped {} shapes", ids.len());
        self.shapes.extend(released);
        self.push_snapshot();
        ids
    }

    /// Move the named shapes to the top, keeping their relative order.
    pub fn bring_to_front(&mut self, ids: &[ShapeId]) -> bool {
        self.restack(ids, true)
    }

    /// Move the named shapes to the bottom, keeping their relative order.
    pub fn send_to_back(&mut self, ids: &[ShapeId]) -> bool {
        self.restack(ids, false)
    }

    fn restack(&mut self, ids: &[ShapeId], to_front: bool) -> bool {
        if !self.shapes.iter().any(|s| ids.contains(&s.id())) {
            return false;
        }
        self.push_snapshot();
        let (named, others): (Vec<Shape>, Vec<Shape>) = std::mem::take(&mut self.shapes)
            .into_iter()
            .partition(|s| ids.contains(&s.id()));
        log::debug!(
            "Moving {} shapes to the {}",
            named.len(),
            if to_front { "front" } else { "back" }
        );
        self.shapes = if to_front {
            others.into_iter().chain(named).collect()
        } else {
            named.into_iter().chain(others).collect()
        };
        true
    }

    /// Replace the shape list wholesale and record it as one undo step.
    ///
    /// Repeated ids get fresh ones, so every slot stays addressable.
    fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        let mut taken = HashSet::new();
        self.shapes = shapes
            .into_iter()
            .map(|shape| {
                let shape = if has_id_clash(&shape, &taken) {
                    log::warn!("Repeated id {}, assigning a new one", shape.id());
                    shape.duplicate()
                } else {
                    shape
                };
                taken.extend(shape.all_ids());
                shape
            })
            .collect();
        self.push_snapshot();
    }

    /// Save in the format implied by the extension (`.json` or text).
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        storage::save(path, &self.shapes)?;
        log::info!("Saved {} shapes to {}", self.shapes.len(), path.display());
        Ok(())
    }

    /// Load in the format implied by the extension.
    ///
    /// The file is read and parsed completely before the scene changes; on
    /// error the scene is left as it was.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> StorageResult<LoadSummary> {
        let path = path.as_ref();
        let doc = storage::load(path)?;
        let summary = LoadSummary {
            loaded: doc.shapes.len(),
            skipped: doc.skipped,
        };
        self.replace_shapes(doc.shapes);
        log::info!(
            "Loaded {} shapes from {} ({} skipped)",
            summary.loaded,
            path.display(),
            summary.skipped
        );
        Ok(summary)
    }

    /// Save as JSON regardless of the extension.
    pub fn save_json(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        storage::write_json(path, &self.shapes)?;
        log::info!("Saved {} shapes to {}", self.shapes.len(), path.display());
        Ok(())
    }

    /// Load a JSON document regardless of the extension.
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> StorageResult<LoadSummary> {
        let path = path.as_ref();
        let doc = storage::read_json(path)?;
        let summary = LoadSummary {
            loaded: doc.shapes.len(),
            skipped: doc.skipped,
        };
        self.replace_shapes(doc.shapes);
        log::info!(
            "Loaded {} shapes from {} ({} skipped)",
            summary.loaded,
            path.display(),
            summary.skipped
        );
        Ok(summary)
    }
}

/// Whether any id in `shape` is already taken or repeats within it.
fn has_id_clash(shape: &Shape, taken: &HashSet<ShapeId>) -> bool {
    let mut own = HashSet::new();
    shape
        .all_ids()
        .into_iter()
        .any(|id| taken.contains(&id) || !own.insert(id))
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle, SelectionRectangle, Square};
    use crate::storage::StorageError;
    use tempfile::tempdir;

    fn square(x: i32, y: i32, size: i32) -> Square {
        Square::new(Point::new(x, y), size, ShapeColor::RED)
    }

    fn circle(x: i32, y: i32, r: i32) -> Circle {
        Circle::new(Point::new(x, y), r, ShapeColor::BLUE)
    }

    fn ids(scene: &Scene) -> Vec<ShapeId> {
        scene.shapes().iter().map(Shape::id).collect()
    }

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.undo_depth(), 0);
        assert!(scene.bounds().is_none());
    }

    #[test]
    fn test_add_shape() {
        let mut scene = Scene::new();
        let id = scene.add_shape(square(0, 0, 10));
        assert_eq!(scene.len(), 1);
        assert!(scene.shape(id).is_some());
        assert_eq!(scene.undo_depth(), 1);
    }

    #[test]
    fn test_scenario_circle_bounds_in_scene() {
        let mut scene = Scene::new();
        scene.add_shape(circle(10, 10, 5));
        let bounds = scene.shapes()[0].bounds();
        assert_eq!(
            (bounds.left(), bounds.top(), bounds.right(), bounds.bottom()),
            (5, 5, 15, 15)
        );
    }

    #[test]
    fn test_add_clone_gets_fresh_id() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        let copy = scene.shape(a).cloned().unwrap();
        let b = scene.add_shape(copy);
        assert_ne!(a, b);
        assert_eq!(ids(&scene), vec![a, b]);

        scene.set_selected(a, true);
        assert_eq!(scene.selected_ids(), vec![a]);
    }

    #[test]
    fn test_add_group_holding_live_shape_gets_fresh_ids() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        let inner = scene.shape(a).cloned().unwrap();
        let group = scene.add_shape(Group::new(vec![inner]));
        let nested = scene.shape(group).unwrap().all_ids();
        assert_eq!(nested.len(), 2);
        assert!(!nested.contains(&a));
    }

    #[test]
    fn test_load_json_with_repeated_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repeated.json");
        let shape = Shape::from(square(0, 0, 10));
        storage::write_json(&path, &[shape.clone(), shape.clone()]).unwrap();

        let mut scene = Scene::new();
        let summary = scene.load_json(&path).unwrap();
        assert_eq!(summary.loaded, 2);
        let loaded = ids(&scene);
        assert_eq!(loaded[0], shape.id());
        assert_ne!(loaded[0], loaded[1]);
    }

    #[test]
    fn test_select_at_in_scene_order() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 20));
        let b = scene.add_shape(circle(5, 5, 10));
        scene.add_shape(square(100, 100, 10));
        assert_eq!(scene.select_at(Point::new(5, 5)), vec![a, b]);
        assert_eq!(scene.topmost_at(Point::new(5, 5)), Some(b));
        assert!(scene.select_at(Point::new(50, 50)).is_empty());
        assert_eq!(scene.topmost_at(Point::new(50, 50)), None);
    }

    #[test]
    fn test_select_intersecting() {
        let mut scene = Scene::new();
        let a = scene.add_shape(circle(0, 0, 5));
        scene.add_shape(circle(20, 0, 5));
        let probe = Shape::from(circle(6, 0, 5));
        assert_eq!(scene.select_intersecting(&probe), vec![a]);

        let marquee = Shape::from(SelectionRectangle::new(Point::new(-100, -100), 300, 300));
        assert!(scene.select_intersecting(&marquee).is_empty());
    }

    #[test]
    fn test_select_at_does_not_include_probe_id() {
        let mut scene = Scene::new();
        let id = scene.add_shape(circle(0, 0, 5));
        let same = scene.shape(id).cloned().unwrap();
        assert!(scene.select_intersecting(&same).is_empty());
    }

    #[test]
    fn test_selection_helpers() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        let b = scene.add_shape(square(20, 0, 10));
        assert!(scene.set_selected(b, true));
        assert!(!scene.set_selected(ShapeId::new_v4(), true));
        assert_eq!(scene.selected_ids(), vec![b]);
        scene.select_all();
        assert_eq!(scene.selected_ids(), vec![a, b]);
        scene.select_only(&[a]);
        assert_eq!(scene.selected_ids(), vec![a]);
        scene.clear_selection();
        assert!(scene.selected_shapes().is_empty());
        // Selection changes are not undo steps.
        assert_eq!(scene.undo_depth(), 2);
    }

    #[test]
    fn test_remove_selected_shapes() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        let b = scene.add_shape(square(20, 0, 10));
        assert_eq!(scene.remove_selected_shapes(), 0);
        assert_eq!(scene.undo_depth(), 2);
        scene.set_selected(a, true);
        assert_eq!(scene.remove_selected_shapes(), 1);
        assert_eq!(ids(&scene), vec![b]);
        assert!(scene.undo());
        assert_eq!(ids(&scene), vec![a, b]);
    }

    #[test]
    fn test_batch_edits_on_selection() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 100));
        let b = scene.add_shape(circle(50, 50, 10));
        scene.set_selected(a, true);

        assert!(scene.move_selected(5, -5));
        assert!(scene.scale_selected(1.1));
        assert!(scene.set_color_selected(ShapeColor::GREEN));
        assert!(scene.adjust_opacity_selected(-0.1));
        assert!(scene.rotate_selected(15.0));
        assert!(scene.set_border_style_selected(BorderStyle::Dashed));

        let sq = scene.shape(a).unwrap();
        assert_eq!(sq.anchor_point(), Point::new(5, -5));
        assert_eq!(sq.bounds().width(), 110);
        assert_eq!(sq.color(), ShapeColor::GREEN);
        assert!((sq.opacity() - 0.9).abs() < 1e-9);
        assert!((sq.rotation() - 15.0).abs() < 1e-9);
        assert_eq!(sq.border_style(), BorderStyle::Dashed);

        let untouched = scene.shape(b).unwrap();
        assert_eq!(untouched.anchor_point(), Point::new(50, 50));
        assert_eq!(untouched.color(), ShapeColor::BLUE);
        assert_eq!(scene.undo_depth(), 8);
    }

    #[test]
    fn test_batch_edit_without_selection_is_noop() {
        let mut scene = Scene::new();
        scene.add_shape(square(0, 0, 10));
        assert!(!scene.move_selected(5, 5));
        assert!(!scene.scale_selected(2.0));
        assert!(!scene.set_opacity_selected(0.5));
        assert_eq!(scene.undo_depth(), 1);
    }

    #[test]
    fn test_scenario_group_then_ungroup() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        let b = scene.add_shape(circle(30, 0, 5));
        scene.select_all();
        let group_id = scene.group_selected_shapes().unwrap();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.selected_ids(), vec![group_id]);
        let group = scene.shape(group_id).and_then(Shape::as_group).unwrap();
        assert_eq!(group.children().iter().map(Shape::id).collect::<Vec<_>>(), vec![a, b]);

        let released = scene.ungroup_selected_shapes();
        assert_eq!(released, vec![a, b]);
        assert_eq!(ids(&scene), vec![a, b]);
        assert!(scene.shape(group_id).is_none());

        // The two shapes move independently again.
        scene.select_only(&[a]);
        scene.move_selected(10, 0);
        assert_eq!(scene.shape(a).unwrap().anchor_point(), Point::new(10, 0));
        assert_eq!(scene.shape(b).unwrap().anchor_point(), Point::new(30, 0));
    }

    #[test]
    fn test_group_keeps_unselected_order() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        let b = scene.add_shape(square(20, 0, 10));
        let c = scene.add_shape(square(40, 0, 10));
        let d = scene.add_shape(square(60, 0, 10));
        scene.select_only(&[a, c]);
        let g = scene.group_selected_shapes().unwrap();
        assert_eq!(ids(&scene), vec![b, d, g]);
    }

    #[test]
    fn test_group_needs_two_shapes() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        scene.add_shape(square(20, 0, 10));
        scene.set_selected(a, true);
        assert!(scene.group_selected_shapes().is_none());
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.undo_depth(), 2);
    }

    #[test]
    fn test_ungroup_without_group_is_noop() {
        let mut scene = Scene::new();
        scene.add_shape(square(0, 0, 10));
        scene.select_all();
        assert!(scene.ungroup_selected_shapes().is_empty());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.undo_depth(), 1);
    }

    #[test]
    fn test_group_ungroup_keeps_each_shape_once() {
        let mut scene = Scene::new();
        let all: Vec<ShapeId> = (0..5).map(|i| scene.add_shape(square(i * 20, 0, 10))).collect();
        scene.select_only(&all[1..4]);
        scene.group_selected_shapes().unwrap();
        scene.select_all();
        let released = scene.ungroup_selected_shapes();
        assert_eq!(released.len(), 3);
        let mut now = ids(&scene);
        now.sort();
        let mut expected = all.clone();
        expected.sort();
        assert_eq!(now, expected);
    }

    #[test]
    fn test_bring_to_front_and_send_to_back() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        let b = scene.add_shape(square(20, 0, 10));
        let c = scene.add_shape(square(40, 0, 10));
        let d = scene.add_shape(square(60, 0, 10));

        assert!(scene.bring_to_front(&[c, a]));
        assert_eq!(ids(&scene), vec![b, d, a, c]);

        assert!(scene.send_to_back(&[c, d]));
        assert_eq!(ids(&scene), vec![d, c, b, a]);

        assert!(!scene.bring_to_front(&[ShapeId::new_v4()]));
    }

    #[test]
    fn test_undo_restack() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        let b = scene.add_shape(square(20, 0, 10));
        scene.bring_to_front(&[a]);
        assert_eq!(ids(&scene), vec![b, a]);
        assert!(scene.undo());
        assert_eq!(ids(&scene), vec![a, b]);
    }

    #[test]
    fn test_undo_at_floor_is_idempotent() {
        let mut scene = Scene::new();
        assert!(!scene.undo());
        assert!(!scene.undo());
        assert!(scene.is_empty());

        scene.add_shape(square(0, 0, 10));
        assert!(scene.undo());
        assert!(scene.is_empty());
        assert!(!scene.undo());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_undo_restores_geometry() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        scene.set_selected(a, true);
        scene.move_selected(5, 5);
        scene.scale_selected(2.0);
        assert!(scene.undo());
        assert_eq!(scene.shape(a).unwrap().bounds().width(), 10);
        assert!(scene.undo());
        assert_eq!(scene.shape(a).unwrap().anchor_point(), Point::new(0, 0));
    }

    #[test]
    fn test_commit_after_direct_edit() {
        let mut scene = Scene::new();
        let a = scene.add_shape(square(0, 0, 10));
        if let Some(shape) = scene.shape_mut(a) {
            shape.translate(7, 0);
        }
        scene.commit();
        scene.add_shape(square(50, 50, 10));
        assert!(scene.undo());
        assert_eq!(scene.shape(a).unwrap().anchor_point(), Point::new(7, 0));
    }

    #[test]
    fn test_bounded_history() {
        let config = SceneConfig {
            max_undo_history: Some(3),
        };
        let mut scene = Scene::with_config(&config);
        for i in 0..5 {
            scene.add_shape(square(i * 20, 0, 10));
        }
        assert_eq!(scene.undo_depth(), 2);
        assert!(scene.undo());
        assert!(scene.undo());
        assert!(!scene.undo());
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_scene_bounds() {
        let mut scene = Scene::new();
        scene.add_shape(circle(10, 10, 5));
        scene.add_shape(Rectangle::new(Point::new(100, 50), 20, 10, ShapeColor::RED));
        assert_eq!(scene.bounds(), Some(BoundingBox::new(5, 110, 5, 55)));
    }

    #[test]
    fn test_scenario_load_square_record() {
        let (scene, summary) = Scene::from_records("SQUARE,100,100,16711680,50\n");
        assert_eq!(summary, LoadSummary { loaded: 1, skipped: 0 });
        match &scene.shapes()[0] {
            Shape::Square(sq) => {
                assert_eq!(sq.center, Point::new(100, 100));
                assert_eq!(sq.size, 50);
            }
            other => panic!("expected square, got {other}"),
        }
        assert_eq!(scene.shapes()[0].color(), ShapeColor::RED);
    }

    #[test]
    fn test_save_and_load_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.txt");
        let mut scene = Scene::new();
        scene.add_shape(square(100, 100, 50));
        scene.add_shape(circle(-5, 7, 3));
        scene.save_to_file(&path).unwrap();

        let mut loaded = Scene::new();
        let summary = loaded.load_from_file(&path).unwrap();
        assert_eq!(summary.loaded, 2);
        assert_eq!(loaded.to_records(), scene.to_records());
        // Loading is one undo step.
        assert!(loaded.undo());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.txt");
        std::fs::write(&path, "SQUARE,0,0,255,10\nHEXAGON,1,2,3,4\nCIRCLE,0,0,255\n").unwrap();
        let mut scene = Scene::new();
        let summary = scene.load_from_file(&path).unwrap();
        assert_eq!(summary, LoadSummary { loaded: 1, skipped: 2 });
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_failed_load_leaves_scene_unchanged() {
        let dir = tempdir().unwrap();
        let mut scene = Scene::new();
        scene.add_shape(square(0, 0, 10));
        let before = scene.to_records();

        let missing = scene.load_from_file(dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(StorageError::NotFound(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[1, 2").unwrap();
        assert!(scene.load_from_file(&broken).is_err());

        assert_eq!(scene.to_records(), before);
        assert_eq!(scene.undo_depth(), 1);
    }

    #[test]
    fn test_json_round_trip_keeps_groups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.data");
        let mut scene = Scene::new();
        scene.add_shape(square(0, 0, 10));
        scene.add_shape(circle(30, 0, 5));
        scene.select_all();
        let group = scene.group_selected_shapes().unwrap();
        scene.save_json(&path).unwrap();

        let mut loaded = Scene::new();
        loaded.load_json(&path).unwrap();
        assert_eq!(ids(&loaded), vec![group]);
        assert!(loaded.shapes()[0].is_group());
        // Selection is view state and is not persisted.
        assert!(loaded.selected_ids().is_empty());
    }

    #[test]
    fn test_display_lists_records() {
        let mut scene = Scene::new();
        scene.add_shape(square(1, 2, 3));
        scene.add_shape(SelectionRectangle::new(Point::new(0, 0), 4, 4));
        assert_eq!(scene.to_string(), "SQUARE,1,2,16711680,3\n");
    }
}
