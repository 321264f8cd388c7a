use crate::foundation::core::{Color, Rect, Vector2f};
use crate::foundation::error::{MotionError, MotionResult};
use crate::render::ctx::{RenderCtx, RenderDiagnostic};
use crate::render::surface::Surface;
use crate::scene::draw::Draw;

/// Deepest level [`SceneGraph::render`] descends to. Nodes below it are skipped with a
/// diagnostic.
pub const MAX_RENDER_DEPTH: usize = 10;

/// Size reported by nodes that never had one set.
pub const DEFAULT_SIZE: Vector2f = Vector2f::new(100.0, 100.0);

/// Index of a node inside the [`SceneGraph`] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A drawable node: a local transform, a size used by its draw callback, and ordered children.
///
/// The transform is applied as translate(position), then scale, then rotate. `pivot` is the
/// normalized point of the node's box that sits at the local origin, so rotation happens around
/// it.
#[derive(Clone)]
pub struct CanvasObject {
    pub position: Vector2f,
    pub scale: Vector2f,
    pub pivot: Vector2f,
    /// Radians.
    pub rotation: f64,
    size: Option<Vector2f>,
    pub draw: Draw,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl std::fmt::Debug for CanvasObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasObject")
            .field("position", &self.position)
            .field("scale", &self.scale)
            .field("pivot", &self.pivot)
            .field("rotation", &self.rotation)
            .field("size", &self.size)
            .field("draw", &self.draw.kind())
            .field("children", &self.children)
            .field("parent", &self.parent)
            .finish()
    }
}

impl Default for CanvasObject {
    fn default() -> Self {
        Self::new(Draw::None)
    }
}

impl CanvasObject {
    pub fn new(draw: Draw) -> Self {
        Self {
            position: Vector2f::ZERO,
            scale: Vector2f::ONE,
            pivot: Vector2f::new(0.5, 0.5),
            rotation: 0.0,
            size: None,
            draw,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Vector2f::new(x, y);
        self
    }

    pub fn sized(mut self, w: f64, h: f64) -> Self {
        self.size = Some(Vector2f::new(w, h));
        self
    }

    pub fn scaled(mut self, sx: f64, sy: f64) -> Self {
        self.scale = Vector2f::new(sx, sy);
        self
    }

    pub fn pivoted(mut self, px: f64, py: f64) -> Self {
        self.pivot = Vector2f::new(px, py);
        self
    }

    pub fn rotated(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    /// The explicit size, or [`DEFAULT_SIZE`].
    pub fn size(&self) -> Vector2f {
        self.size.unwrap_or(DEFAULT_SIZE)
    }

    pub fn has_explicit_size(&self) -> bool {
        self.size.is_some()
    }

    pub fn set_size(&mut self, size: Vector2f) {
        self.size = Some(size);
    }

    /// Mutable access to the size, making it explicit.
    pub fn size_mut(&mut self) -> &mut Vector2f {
        self.size.get_or_insert(DEFAULT_SIZE)
    }

    /// Local-space box of the node, offset so the pivot sits at the origin.
    pub fn bounds(&self) -> Rect {
        let size = self.size();
        let x0 = -size.x * self.pivot.x;
        let y0 = -size.y * self.pivot.y;
        Rect::new(x0, y0, x0 + size.x, y0 + size.y)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena owning every [`CanvasObject`] of a scene.
///
/// Parents own their children through id lists; the parent link only stops a child from being
/// rendered again as a root.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<CanvasObject>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node. Any parent/child links on `object` are dropped.
    pub fn insert(&mut self, mut object: CanvasObject) -> NodeId {
        object.children.clear();
        object.parent = None;
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(object);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&CanvasObject> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut CanvasObject> {
        self.nodes.get_mut(id.index())
    }

    fn check(&self, id: NodeId) -> MotionResult<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(MotionError::validation(format!("unknown node {id:?}")))
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Move `child` under `parent`, after its existing children.
    ///
    /// A child that already has a parent is detached from it first. Attaching a node below
    /// itself is rejected.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> MotionResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if self.is_ancestor(child, parent) {
            return Err(MotionError::validation(format!(
                "cannot attach {child:?} under {parent:?}: it would create a cycle"
            )));
        }
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    pub fn append_all(&mut self, parent: NodeId, children: &[NodeId]) -> MotionResult<()> {
        for &child in children {
            self.append(parent, child)?;
        }
        Ok(())
    }

    /// Make `child` a root again. No-op for roots and unknown ids.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent.index()) {
            p.children.retain(|&c| c != child);
        }
        self.nodes[child.index()].parent = None;
    }

    /// Copy a node's values and draw callback into a new root node.
    ///
    /// With `include_children` the whole subtree is copied and attached to the copy; otherwise
    /// the copy has no children.
    pub fn create_copy(&mut self, id: NodeId, include_children: bool) -> MotionResult<NodeId> {
        self.check(id)?;
        let copy = self.insert(self.nodes[id.index()].clone());
        if include_children {
            let children = self.nodes[id.index()].children.clone();
            for child in children {
                let child_copy = self.create_copy(child, true)?;
                self.append(copy, child_copy)?;
            }
        }
        Ok(copy)
    }

    /// Render a root node and its subtree.
    ///
    /// A node that has a parent is only drawn through that parent; rendering it directly does
    /// nothing.
    pub fn render(&mut self, id: NodeId, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        self.render_at(id, surface, ctx, 0);
    }

    pub fn render_in_order(
        &mut self,
        ids: &[NodeId],
        surface: &mut dyn Surface,
        ctx: &mut RenderCtx,
    ) {
        for &id in ids {
            self.render(id, surface, ctx);
        }
    }

    fn render_at(
        &mut self,
        id: NodeId,
        surface: &mut dyn Surface,
        ctx: &mut RenderCtx,
        depth: usize,
    ) {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return;
        };
        if depth == 0 && node.parent.is_some() {
            return;
        }
        if depth > MAX_RENDER_DEPTH {
            tracing::warn!(
                node = id.index(),
                depth,
                "maximum render depth exceeded, skipping subtree"
            );
            ctx.report(RenderDiagnostic::DepthExceeded { node: id, depth });
            return;
        }

        surface.save();
        surface.translate(node.position.to_vec2());
        surface.scale(node.scale.x, node.scale.y);
        surface.rotate(node.rotation);

        let draw = std::mem::take(&mut node.draw);
        draw.render(node, surface, ctx);
        node.draw = draw;

        let mut i = 0;
        while let Some(&child) = self.nodes[id.index()].children.get(i) {
            self.render_at(child, surface, ctx, depth + 1);
            i += 1;
        }

        if ctx.debug() {
            let node = &self.nodes[id.index()];
            surface.fill_rect(Rect::new(-2.0, -2.0, 2.0, 2.0), Color::rgb(0, 255, 0));
            surface.stroke_rect(node.bounds(), Color::rgb(0, 0, 255), 1.0);
        }

        surface.restore();
    }
}

impl std::ops::Index<NodeId> for SceneGraph {
    type Output = CanvasObject;

    fn index(&self, id: NodeId) -> &CanvasObject {
        &self.nodes[id.index()]
    }
}

impl std::ops::IndexMut<NodeId> for SceneGraph {
    fn index_mut(&mut self, id: NodeId) -> &mut CanvasObject {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
