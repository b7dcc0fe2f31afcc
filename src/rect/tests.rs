use crate::rect::{Rect, Region};

#[test]
fn union1() {
    let r1 = Region::new(Rect::new(0, 0, 10, 10).unwrap());
    let r2 = Region::new(Rect::new(10, 10, 20, 20).unwrap());
    let r3 = r1.union(&r2);
    assert_eq!(r3.extents(), Rect::new(0, 0, 20, 20).unwrap());
    let rects: Vec<_> = r3.rects().collect();
    assert_eq!(
        rects,
        vec![
            Rect::new(0, 0, 10, 10).unwrap(),
            Rect::new(10, 10, 20, 20).unwrap(),
        ]
    );
}

#[test]
fn union_merges_vertically_adjacent() {
    let r1 = Region::new(Rect::new(0, 0, 10, 10).unwrap());
    let r2 = Region::new(Rect::new(0, 10, 10, 20).unwrap());
    let r3 = r1.union(&r2);
    assert_eq!(r3.extents(), Rect::new(0, 0, 10, 20).unwrap());
    let rects: Vec<_> = r3.rects().collect();
    assert_eq!(rects, vec![Rect::new(0, 0, 10, 20).unwrap()]);
}

#[test]
fn union_overlap() {
    let r1 = Region::new(Rect::new(0, 0, 10, 10).unwrap());
    let r2 = Region::new(Rect::new(5, 5, 15, 15).unwrap());
    let r3 = r1.union(&r2);
    assert_eq!(r3.extents(), Rect::new(0, 0, 15, 15).unwrap());
    let rects: Vec<_> = r3.rects().collect();
    assert_eq!(
        rects,
        vec![
            Rect::new(0, 0, 10, 5).unwrap(),
            Rect::new(0, 5, 15, 10).unwrap(),
            Rect::new(5, 10, 15, 15).unwrap(),
        ]
    );
}

#[test]
fn from_rects_drops_duplicates() {
    let r = Rect::new(1, 1, 5, 5).unwrap();
    let region = Region::from_rects(&[r, r, r]);
    let rects: Vec<_> = region.rects().collect();
    assert_eq!(rects, vec![r]);
}

#[test]
fn empty_region() {
    let region = Region::empty();
    assert!(region.is_empty());
    assert_eq!(region.extents(), Rect::default());
    let union = region.union(&Region::new(Rect::new(0, 0, 1, 1).unwrap()));
    assert_eq!(union.extents(), Rect::new(0, 0, 1, 1).unwrap());
}

#[test]
fn contains_pixel() {
    let region = Region::from_rects(&[
        Rect::new(0, 0, 10, 10).unwrap(),
        Rect::new(20, 0, 30, 10).unwrap(),
    ]);
    assert!(region.contains(0, 0));
    assert!(region.contains(9, 9));
    assert!(!region.contains(10, 0));
    assert!(!region.contains(15, 5));
    assert!(region.contains(20, 5));
    assert!(!region.contains(30, 5));
}

#[test]
fn intersect_clamps_to_empty() {
    let r1 = Rect::new(0, 0, 10, 10).unwrap();
    let r2 = Rect::new(20, 20, 30, 30).unwrap();
    assert!(r1.intersect(r2).is_empty());
    assert!(!r1.intersects(&r2));
}
