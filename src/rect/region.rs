use {
    crate::rect::Rect,
    shrike_algorithms::rect::{
        RectRaw, RectVec,
        region::{contains, extents, rects_to_bands, union},
    },
    smallvec::SmallVec,
    std::rc::Rc,
};

/// A set of pixels stored as band-normalised rectangles. Immutable and
/// shared; operations produce new regions.
pub struct Region {
    rects: RectVec,
    extents: Rect,
}

thread_local! {
    static EMPTY: Rc<Region> = Rc::new(Region {
        rects: Default::default(),
        extents: Default::default(),
    });
}

impl Region {
    pub fn new(rect: Rect) -> Rc<Self> {
        if rect.is_empty() {
            return Self::empty();
        }
        let mut rects = SmallVec::new();
        rects.push(rect.raw);
        Rc::new(Self {
            rects,
            extents: rect,
        })
    }

    pub fn empty() -> Rc<Self> {
        EMPTY.with(|e| e.clone())
    }

    pub fn from_rects(rects: &[Rect]) -> Rc<Self> {
        if rects.is_empty() {
            return Self::empty();
        }
        if rects.len() == 1 {
            return Self::new(rects[0]);
        }
        let raw: SmallVec<[RectRaw; 8]> = rects.iter().map(|r| r.raw).collect();
        let rects = rects_to_bands(&raw);
        Rc::new(Self {
            extents: Rect {
                raw: extents(&rects),
            },
            rects,
        })
    }

    pub fn union(self: &Rc<Self>, other: &Rc<Self>) -> Rc<Self> {
        if self.extents.is_empty() {
            return other.clone();
        }
        if other.extents.is_empty() {
            return self.clone();
        }
        let rects = union(&self.rects, &other.rects);
        Rc::new(Self {
            rects,
            extents: self.extents.union(other.extents),
        })
    }

    pub fn extents(&self) -> Rect {
        self.extents
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        contains(&self.rects, x, y)
    }

    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.rects.iter().map(|&raw| Rect { raw })
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }
}
