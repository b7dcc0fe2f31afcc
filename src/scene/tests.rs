use {
    super::*,
    crate::{
        clientbuffer::{BufferRef, ClientBuffer},
        format::ARGB8888,
        scale::Scale,
    },
    std::fmt::{Debug, Formatter},
};

#[derive(Debug)]
struct TestTexture {
    width: i32,
    height: i32,
}

impl GfxTexture for TestTexture {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }
}

fn tex(width: i32, height: i32) -> Rc<dyn GfxTexture> {
    Rc::new(TestTexture { width, height })
}

struct Fmt<'a>(&'a Rc<Region>);

impl Debug for Fmt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.rects()).finish()
    }
}

#[track_caller]
fn assert_single_rect(region: &Rc<Region>, x1: i32, y1: i32, x2: i32, y2: i32) {
    assert_eq!(region.len(), 1, "{:?}", Fmt(region));
    assert_eq!(
        region.extents(),
        Rect::new(x1, y1, x2, y2).unwrap(),
        "{:?}",
        Fmt(region),
    );
}

#[test]
fn generations_are_strictly_increasing() {
    let a = RenderNode::color(FRect::new(0.0, 0.0, 1.0, 1.0), Color::solid(1.0, 0.0, 0.0));
    let b = RenderNode::color(FRect::new(0.0, 0.0, 1.0, 1.0), Color::solid(1.0, 0.0, 0.0));
    let c = RenderNode::container(vec![a.clone(), b.clone()]);
    assert!(a.generation() < b.generation());
    assert!(b.generation() < c.generation());
}

#[test]
fn diff_against_self_is_empty() {
    let color = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let transform = RenderNode::transform(Affine::translate((5.0, 5.0)), color.clone());
    let container = RenderNode::container(vec![transform.clone()]);
    let texture = RenderNode::texture(
        tex(10, 10),
        BufferRef::none(),
        Transform::None,
        FRect::new(0.0, 0.0, 1.0, 1.0),
        FRect::new(0.0, 0.0, 10.0, 10.0),
    );
    for node in [&color, &transform, &container, &texture] {
        assert!(node.diff(node).is_empty());
    }
}

#[test]
fn reused_subtree_diffs_as_unchanged() {
    // the tree root is rebuilt but the subtree is shared verbatim
    let inner = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let shared = RenderNode::transform(Affine::IDENTITY, inner);
    let t1 = RenderNode::container(vec![shared.clone()]);
    let t2 = RenderNode::container(vec![shared]);
    assert!(t1.diff(&t2).is_empty());
}

#[test]
fn color_change_damages_union() {
    let a = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let b = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(0.0, 0.0, 1.0));
    assert_single_rect(&a.diff(&b), 0, 0, 10, 10);
}

#[test]
fn equal_color_nodes_diff_as_empty() {
    let a = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let b = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    assert!(a.generation() != b.generation());
    assert!(a.diff(&b).is_empty());
}

#[test]
fn translated_transform_damages_both_rects() {
    let a = RenderNode::transform(
        Affine::translate((0.0, 0.0)),
        RenderNode::color(FRect::new(0.0, 0.0, 100.0, 100.0), Color::solid(0.0, 0.0, 1.0)),
    );
    let b = RenderNode::transform(
        Affine::translate((50.0, 0.0)),
        RenderNode::color(FRect::new(0.0, 0.0, 100.0, 100.0), Color::solid(0.0, 0.0, 1.0)),
    );
    assert_single_rect(&a.diff(&b), 0, 0, 150, 100);
}

#[test]
fn inner_damage_is_mapped_through_the_transform() {
    let matrix = Affine::translate((10.0, 20.0));
    let a = RenderNode::transform(
        matrix,
        RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0)),
    );
    let b = RenderNode::transform(
        matrix,
        RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(0.0, 1.0, 0.0)),
    );
    assert_single_rect(&a.diff(&b), 10, 20, 20, 30);
}

#[test]
fn scaled_transform_scales_damage() {
    let matrix = Affine::scale(2.0);
    let child = |c| RenderNode::color(FRect::new(1.0, 1.0, 5.0, 5.0), c);
    let a = RenderNode::transform(matrix, child(Color::solid(1.0, 0.0, 0.0)));
    let b = RenderNode::transform(matrix, child(Color::solid(0.0, 1.0, 0.0)));
    assert_single_rect(&a.diff(&b), 2, 2, 10, 10);
}

#[test]
fn unchanged_child_of_equal_transforms_is_empty() {
    let child = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let a = RenderNode::transform(Affine::scale(1.5), child.clone());
    let b = RenderNode::transform(Affine::scale(1.5), child.clone());
    assert!(a.diff(&b).is_empty());
}

#[test]
fn singular_transform_damages_bounding_rects() {
    // x' = x + y, y' = x + y collapses the plane onto a line
    let matrix = Affine::new([1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
    let child = |c| RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), c);
    let a = RenderNode::transform(matrix, child(Color::solid(1.0, 0.0, 0.0)));
    let b = RenderNode::transform(matrix, child(Color::solid(0.0, 1.0, 0.0)));
    assert_single_rect(&a.diff(&b), 0, 0, 20, 20);
}

#[test]
fn container_child_list_change_damages_union() {
    let red = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let blue = RenderNode::color(
        FRect::new(20.0, 0.0, 30.0, 10.0),
        Color::solid(0.0, 0.0, 1.0),
    );
    let a = RenderNode::container(vec![red.clone()]);
    let b = RenderNode::container(vec![red, blue]);
    assert_single_rect(&a.diff(&b), 0, 0, 30, 10);
}

#[test]
fn container_bounding_contains_children() {
    let red = RenderNode::color(FRect::new(-5.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let blue = RenderNode::color(
        FRect::new(20.0, -3.0, 30.0, 10.0),
        Color::solid(0.0, 0.0, 1.0),
    );
    let container = RenderNode::container(vec![red.clone(), blue.clone()]);
    for child in [&red, &blue] {
        assert_eq!(container.bounding().union(child.bounding()), container.bounding());
    }
}

#[test]
fn transform_bounding_is_mapped_child_bounding() {
    let child = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let matrix = Affine::translate((3.0, 4.0)) * Affine::scale(2.0);
    let node = RenderNode::transform(matrix, child.clone());
    assert_eq!(node.bounding(), matrix.transform_rect_bbox(child.bounding()));
}

#[test]
fn texture_nodes_always_damage_conservatively() {
    let texture = tex(10, 10);
    let node = |t: &Rc<dyn GfxTexture>| {
        RenderNode::texture(
            t.clone(),
            BufferRef::none(),
            Transform::None,
            FRect::new(0.0, 0.0, 1.0, 1.0),
            FRect::new(0.0, 0.0, 10.0, 10.0),
        )
    };
    let a = node(&texture);
    let b = node(&texture);
    assert_single_rect(&a.diff(&b), 0, 0, 10, 10);
}

#[test]
fn kind_mismatch_damages_union() {
    let a = RenderNode::color(FRect::new(0.0, 0.0, 10.0, 10.0), Color::solid(1.0, 0.0, 0.0));
    let b = RenderNode::container(vec![RenderNode::color(
        FRect::new(5.0, 5.0, 20.0, 20.0),
        Color::solid(1.0, 0.0, 0.0),
    )]);
    assert_single_rect(&a.diff(&b), 0, 0, 20, 20);
}

#[test]
fn fractional_rects_are_ceiled_to_enclosing_damage() {
    let a = RenderNode::color(FRect::new(0.25, 0.25, 9.5, 9.5), Color::solid(1.0, 0.0, 0.0));
    let b = RenderNode::color(FRect::new(0.25, 0.25, 9.5, 9.5), Color::solid(0.0, 1.0, 0.0));
    assert_single_rect(&a.diff(&b), 0, 0, 10, 10);
}

#[test]
fn texture_node_keeps_buffer_alive() {
    let buffer = ClientBuffer::new_internal_cpu(
        vec![0; 4 * 4 * 4],
        4,
        4,
        16,
        ARGB8888,
        Scale::default(),
    );
    let node = RenderNode::texture(
        tex(4, 4),
        BufferRef::new(&buffer),
        Transform::None,
        FRect::new(0.0, 0.0, 1.0, 1.0),
        FRect::new(0.0, 0.0, 4.0, 4.0),
    );
    assert_eq!(buffer.ref_count(), 1);
    drop(node);
    assert_eq!(buffer.ref_count(), 0);
}
