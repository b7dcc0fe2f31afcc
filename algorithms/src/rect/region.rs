//! Region arithmetic on band-normalised rectangle lists.
//!
//! A normalised region is a list of non-empty rectangles sorted by (y1, x1)
//! and grouped into horizontal bands: all rectangles of one band share y1
//! and y2, are pairwise disjoint, and do not touch. Two vertically adjacent
//! bands never have identical x intervals, otherwise they would have been
//! merged into one.

use {
    crate::rect::{RectRaw, RectVec},
    smallvec::SmallVec,
};

/// Normalises an arbitrary list of rectangles into bands, merging all
/// overlap. Empty rectangles are ignored.
pub fn rects_to_bands(rects: &[RectRaw]) -> RectVec {
    let mut ys = SmallVec::<[i32; 16]>::new();
    for r in rects {
        if !r.is_empty() {
            ys.push(r.y1);
            ys.push(r.y2);
        }
    }
    ys.sort_unstable();
    ys.dedup();
    let mut out = RectVec::new();
    let mut band = SmallVec::<[(i32, i32); 8]>::new();
    let mut merged = SmallVec::<[(i32, i32); 8]>::new();
    let mut prev_band: Option<(usize, usize)> = None;
    for w in ys.windows(2) {
        let (y1, y2) = (w[0], w[1]);
        band.clear();
        for r in rects {
            if !r.is_empty() && r.y1 <= y1 && y2 <= r.y2 {
                band.push((r.x1, r.x2));
            }
        }
        if band.is_empty() {
            prev_band = None;
            continue;
        }
        band.sort_unstable();
        merged.clear();
        for &(x1, x2) in &band {
            match merged.last_mut() {
                Some(last) if x1 <= last.1 => last.1 = last.1.max(x2),
                _ => merged.push((x1, x2)),
            }
        }
        if let Some((lo, hi)) = prev_band
            && out[lo].y2 == y1
            && hi - lo == merged.len()
            && out[lo..hi]
                .iter()
                .zip(&merged)
                .all(|(r, &(x1, x2))| r.x1 == x1 && r.x2 == x2)
        {
            for r in &mut out[lo..hi] {
                r.y2 = y2;
            }
            continue;
        }
        let lo = out.len();
        for &(x1, x2) in &merged {
            out.push(RectRaw { x1, y1, x2, y2 });
        }
        prev_band = Some((lo, out.len()));
    }
    out
}

/// Computes the union of two normalised regions.
pub fn union(a: &[RectRaw], b: &[RectRaw]) -> RectVec {
    let mut all = SmallVec::<[RectRaw; 8]>::new();
    all.extend_from_slice(a);
    all.extend_from_slice(b);
    rects_to_bands(&all)
}

/// Computes the bounding box of a rectangle list.
pub fn extents(rects: &[RectRaw]) -> RectRaw {
    let mut iter = rects.iter().filter(|r| !r.is_empty());
    let Some(first) = iter.next() else {
        return RectRaw::default();
    };
    let mut ext = *first;
    for r in iter {
        ext.x1 = ext.x1.min(r.x1);
        ext.y1 = ext.y1.min(r.y1);
        ext.x2 = ext.x2.max(r.x2);
        ext.y2 = ext.y2.max(r.y2);
    }
    ext
}

/// Returns whether any rectangle contains the pixel at (x, y).
pub fn contains(rects: &[RectRaw], x: i32, y: i32) -> bool {
    rects.iter().any(|r| r.contains(x, y))
}
