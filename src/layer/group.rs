use crate::foundation::core::{Point, Quad, Rect, Vec2, validated_rect};
use crate::foundation::error::DocsynthResult;
use crate::foundation::math::Homography;
use crate::layer::element::{Element, Transformable};
use crate::layer::layer::Layer;
use crate::raster::surface::Raster;

/// A child of a [`Group`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A leaf layer.
    Layer(Layer),
    /// A nested group.
    Group(Group),
}

impl From<Layer> for Node {
    fn from(value: Layer) -> Self {
        Self::Layer(value)
    }
}

impl From<Group> for Node {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

impl Element for Node {
    fn bbox(&self) -> Rect {
        match self {
            Self::Layer(l) => l.bbox(),
            Self::Group(g) => g.bbox(),
        }
    }

    fn quad(&self) -> Quad {
        match self {
            Self::Layer(l) => l.quad(),
            Self::Group(g) => g.quad(),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            Self::Layer(l) => l.translate(delta),
            Self::Group(g) => g.translate(delta),
        }
    }

    fn draw_onto(&self, dst: &mut Raster, dst_origin: Point) {
        match self {
            Self::Layer(l) => l.draw_onto(dst, dst_origin),
            Self::Group(g) => g.draw_onto(dst, dst_origin),
        }
    }
}

impl Transformable for Node {
    fn apply_homography(&mut self, h: &Homography) -> DocsynthResult<()> {
        match self {
            Self::Layer(l) => l.apply_homography(h),
            Self::Group(g) => g.apply_homography(h),
        }
    }
}

/// Ordered composite of layers and groups with derived union geometry.
///
/// Children are drawn in order, later children on top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    children: Vec<Node>,
}

impl Group {
    /// Group owning `children`.
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Group of leaf layers.
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self::new(layers.into_iter().map(Node::Layer).collect())
    }

    /// Append a child on top.
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Direct children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Return `true` when the group has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf layers in draw order, at any depth.
    pub fn layers(&self) -> Vec<&Layer> {
        let mut out = Vec::new();
        collect_layers(&self.children, &mut out);
        out
    }

    /// Consume the group and return its leaf layers in draw order.
    pub fn into_layers(self) -> Vec<Layer> {
        let mut out = Vec::new();
        for child in self.children {
            match child {
                Node::Layer(l) => out.push(l),
                Node::Group(g) => out.extend(g.into_layers()),
            }
        }
        out
    }

    /// Flatten into one renderable layer whose footprint is this group's box.
    ///
    /// The children stay untouched; callers keep them for per-child geometry.
    pub fn merge(&self) -> DocsynthResult<Layer> {
        let bbox = validated_rect(self.bbox(), "merged group")?;
        let (raster, _) = self.render()?;
        Ok(Layer::from_parts(raster, Quad::from_rect(bbox)))
    }
}

fn collect_layers<'a>(children: &'a [Node], out: &mut Vec<&'a Layer>) {
    for child in children {
        match child {
            Node::Layer(l) => out.push(l),
            Node::Group(g) => collect_layers(&g.children, out),
        }
    }
}

impl Element for Group {
    fn bbox(&self) -> Rect {
        crate::layer::element::union_bbox(&self.children).unwrap_or(Rect::ZERO)
    }

    fn quad(&self) -> Quad {
        Quad::from_rect(self.bbox())
    }

    fn translate(&mut self, delta: Vec2) {
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    fn draw_onto(&self, dst: &mut Raster, dst_origin: Point) {
        for child in &self.children {
            child.draw_onto(dst, dst_origin);
        }
    }
}

impl Transformable for Group {
    fn apply_homography(&mut self, h: &Homography) -> DocsynthResult<()> {
        for child in &mut self.children {
            child.apply_homography(h)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/group.rs"]
mod tests;
