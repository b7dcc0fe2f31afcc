use {
    crate::{
        clientbuffer::BufferRef,
        gfx_api::GfxTexture,
        rect::{Rect, Region},
        transform::Transform,
    },
    kurbo::{Affine, Rect as FRect},
    std::{cell::Cell, rc::Rc},
};

#[cfg(test)]
mod tests;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn solid(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

thread_local! {
    static GENERATION: Cell<u64> = const { Cell::new(1) };
}

fn next_generation() -> u64 {
    GENERATION.with(|g| {
        let generation = g.get();
        assert!(
            generation != u64::MAX,
            "Render node generation counter overflow"
        );
        g.set(generation + 1);
        generation
    })
}

/// One node of the retained scene. Nodes are immutable after construction
/// and shared between frames; a subtree that was not rebuilt keeps its
/// generation and diffs as unchanged.
pub struct RenderNode {
    generation: u64,
    bounding: FRect,
    kind: RenderNodeKind,
}

pub enum RenderNodeKind {
    Color {
        color: Color,
    },
    Container {
        children: Vec<Rc<RenderNode>>,
    },
    Transform {
        matrix: Affine,
        child: Rc<RenderNode>,
    },
    Texture {
        texture: Rc<dyn GfxTexture>,
        buffer: BufferRef,
        transform: Transform,
        src: FRect,
        target: FRect,
    },
}

impl RenderNode {
    pub fn color(rect: FRect, color: Color) -> Rc<Self> {
        Rc::new(Self {
            generation: next_generation(),
            bounding: rect.abs(),
            kind: RenderNodeKind::Color { color },
        })
    }

    pub fn container(children: Vec<Rc<RenderNode>>) -> Rc<Self> {
        let bounding = children
            .iter()
            .map(|c| c.bounding)
            .reduce(|a, b| a.union(b))
            .unwrap_or(FRect::ZERO);
        Rc::new(Self {
            generation: next_generation(),
            bounding,
            kind: RenderNodeKind::Container { children },
        })
    }

    pub fn transform(matrix: Affine, child: Rc<RenderNode>) -> Rc<Self> {
        Rc::new(Self {
            generation: next_generation(),
            bounding: matrix.transform_rect_bbox(child.bounding),
            kind: RenderNodeKind::Transform { matrix, child },
        })
    }

    /// Creates a node sampling `src` (in buffer UV coordinates, already
    /// oriented by `transform`) into `target` in scene coordinates. The
    /// node holds a reference on the client buffer backing the texture,
    /// keeping it alive for as long as the frame is retained.
    pub fn texture(
        texture: Rc<dyn GfxTexture>,
        buffer: BufferRef,
        transform: Transform,
        src: FRect,
        target: FRect,
    ) -> Rc<Self> {
        Rc::new(Self {
            generation: next_generation(),
            bounding: target.abs(),
            kind: RenderNodeKind::Texture {
                texture,
                buffer,
                transform,
                src,
                target,
            },
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bounding(&self) -> FRect {
        self.bounding
    }

    pub fn kind(&self) -> &RenderNodeKind {
        &self.kind
    }

    /// Computes a conservative damage region between two versions of the
    /// same scene position, in scene coordinates. Never fails; where
    /// equality cannot be established cheaply, both bounding rects are
    /// damaged.
    pub fn diff(&self, other: &RenderNode) -> Rc<Region> {
        if self.generation == other.generation {
            return Region::empty();
        }
        match (&self.kind, &other.kind) {
            (RenderNodeKind::Color { color: a }, RenderNodeKind::Color { color: b }) => {
                if a == b && self.bounding == other.bounding {
                    Region::empty()
                } else {
                    both_extents(self, other)
                }
            }
            (
                RenderNodeKind::Container { children: a },
                RenderNodeKind::Container { children: b },
            ) => {
                let unchanged = a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| x.generation == y.generation);
                if unchanged {
                    Region::empty()
                } else {
                    both_extents(self, other)
                }
            }
            (
                RenderNodeKind::Transform {
                    matrix: ma,
                    child: ca,
                },
                RenderNodeKind::Transform {
                    matrix: mb,
                    child: cb,
                },
            ) => {
                if ma != mb {
                    return both_extents(self, other);
                }
                let det = ma.determinant();
                if !det.is_finite() || det == 0.0 {
                    return both_extents(self, other);
                }
                map_region(*ma, &ca.diff(cb))
            }
            (RenderNodeKind::Texture { .. }, RenderNodeKind::Texture { .. }) => {
                // texture content equality cannot be established cheaply
                both_extents(self, other)
            }
            _ => both_extents(self, other),
        }
    }
}

fn both_extents(a: &RenderNode, b: &RenderNode) -> Rc<Region> {
    Region::new(enclosing(a.bounding).union(enclosing(b.bounding)))
}

/// The smallest integer rect containing the float rect.
fn enclosing(rect: FRect) -> Rect {
    let rect = rect.abs();
    let x1 = rect.x0.floor() as i32;
    let y1 = rect.y0.floor() as i32;
    let x2 = rect.x1.ceil() as i32;
    let y2 = rect.y1.ceil() as i32;
    Rect::new(x1, y1, x2.max(x1), y2.max(y1)).unwrap()
}

/// Maps child damage through the transform of the parent node.
fn map_region(matrix: Affine, region: &Region) -> Rc<Region> {
    if region.is_empty() {
        return Region::empty();
    }
    let mut rects = Vec::with_capacity(region.len());
    for r in region.rects() {
        let fr = FRect::new(r.x1() as f64, r.y1() as f64, r.x2() as f64, r.y2() as f64);
        rects.push(enclosing(matrix.transform_rect_bbox(fr)));
    }
    Region::from_rects(&rects)
}
