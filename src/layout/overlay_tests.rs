//! Tests for the overlay placer.

use super::*;
use crate::document::SnapshotDocument;

fn tokens() -> LayoutTokens {
    LayoutTokens::default()
}

fn with_shift(shift: f64) -> LayoutTokens {
    LayoutTokens {
        overlap_shift: shift,
        ..LayoutTokens::default()
    }
}

fn position(doc: &SnapshotDocument, el: ElementId) -> Option<Point> {
    doc.state(el).and_then(|s| s.position)
}

// ===== Base placement =====

#[test]
fn right_overlay_starts_gap_after_anchor() {
    // Anchor at (500, 300), gap 8, width 200; window 400 wide scrolled to x=400.
    let mut b = SnapshotDocument::builder()
        .viewport(Viewport::new(400.0, 600.0).scrolled_to(400.0, 0.0));
    b.anchor("c1", Point::new(500.0, 300.0));
    let overlay = b.overlay("c1", Side::Right, Size::new(200.0, 50.0));
    let mut doc = b.build();

    let outcome = place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, overlay), Some(Point::new(508.0, 294.0)));
    assert_eq!(outcome, OverlayOutcome { placed: 1, shifted: 0, skipped: 0 });
}

#[test]
fn left_overlay_ends_gap_before_anchor() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("c1", Point::new(500.0, 300.0));
    let overlay = b.overlay("c1", Side::Left, Size::new(200.0, 50.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &tokens());

    let rect = doc.document_rect(overlay).expect("overlay exists");
    assert_eq!(rect.right(), 492.0);
    assert_eq!(rect.left, 292.0);
}

#[test]
fn right_shift_applies_only_to_right_overlays() {
    let tokens = LayoutTokens {
        overlay_right_shift: 12.0,
        ..LayoutTokens::default()
    };
    assert_eq!(base_left(Side::Right, 100.0, 50.0, &tokens), 120.0);
    assert_eq!(base_left(Side::Left, 100.0, 50.0, &tokens), 42.0);
}

#[test]
fn overlay_rises_above_anchor() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("c1", Point::new(100.0, 300.0));
    let overlay = b.overlay("c1", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    let rise = LayoutTokens {
        overlay_rise: 20.0,
        ..LayoutTokens::default()
    };
    place_overlays(&mut doc, &rise);

    assert_eq!(position(&doc, overlay).map(|p| p.y), Some(280.0));
}

#[test]
fn vertical_scroll_is_added_back() {
    let mut b = SnapshotDocument::builder()
        .viewport(Viewport::new(1000.0, 800.0).scrolled_to(0.0, 1500.0));
    b.anchor("c1", Point::new(100.0, 1700.0));
    let overlay = b.overlay("c1", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, overlay), Some(Point::new(108.0, 1694.0)));
}

#[test]
fn overlay_is_visible_after_placement() {
    let mut b = SnapshotDocument::builder();
    b.anchor("c1", Point::new(100.0, 100.0));
    let overlay = b.overlay("c1", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &tokens());

    assert!(!doc.state(overlay).expect("exists").invisible);
}

// ===== Clamping =====

#[test]
fn overflow_on_the_right_is_clamped() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(400.0, 600.0));
    b.anchor("c1", Point::new(350.0, 100.0));
    let overlay = b.overlay("c1", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, overlay).map(|p| p.x), Some(296.0));
}

#[test]
fn overflow_on_the_left_is_clamped() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(400.0, 600.0));
    b.anchor("c1", Point::new(30.0, 100.0));
    let overlay = b.overlay("c1", Side::Left, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, overlay).map(|p| p.x), Some(4.0));
}

#[test]
fn clamp_follows_horizontal_scroll() {
    let mut b = SnapshotDocument::builder()
        .viewport(Viewport::new(400.0, 600.0).scrolled_to(1000.0, 0.0));
    b.anchor("c1", Point::new(100.0, 100.0));
    let overlay = b.overlay("c1", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, overlay).map(|p| p.x), Some(1004.0));
}

#[test]
fn overlay_wider_than_viewport_pins_to_left_margin() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(150.0, 600.0));
    b.anchor("c1", Point::new(100.0, 100.0));
    let overlay = b.overlay("c1", Side::Right, Size::new(300.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, overlay).map(|p| p.x), Some(4.0));
}

// ===== Skipping =====

#[test]
fn orphan_overlay_keeps_previous_position() {
    let mut b = SnapshotDocument::builder();
    b.anchor("c1", Point::new(100.0, 100.0));
    let orphan = b.overlay("missing", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();
    doc.place(orphan, Point::new(11.0, 22.0));
    let before = doc.state(orphan).cloned();

    let outcome = place_overlays(&mut doc, &tokens());

    assert_eq!(doc.state(orphan).cloned(), before);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.placed, 0);
}

#[test]
fn overlay_without_id_is_skipped() {
    let mut b = SnapshotDocument::builder();
    b.anchor("c1", Point::new(100.0, 100.0));
    let anonymous = b.overlay("", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    let outcome = place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, anonymous), None);
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn orphan_does_not_enter_the_ledger() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("c2", Point::new(100.0, 100.0));
    let orphan = b.overlay("c1", Side::Right, Size::new(100.0, 40.0));
    let placed = b.overlay("c2", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();
    doc.place(orphan, Point::new(108.0, 94.0));

    place_overlays(&mut doc, &with_shift(500.0));

    assert_eq!(position(&doc, placed), Some(Point::new(108.0, 94.0)));
}

#[test]
fn duplicate_anchor_ids_use_the_first() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("dup", Point::new(100.0, 100.0));
    b.anchor("dup", Point::new(600.0, 500.0));
    let overlay = b.overlay("dup", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, overlay), Some(Point::new(108.0, 94.0)));
}

#[test]
fn no_overlays_is_a_no_op() {
    let mut b = SnapshotDocument::builder();
    b.anchor("c1", Point::new(100.0, 100.0));
    let mut doc = b.build();
    let before = doc.clone();

    assert_eq!(place_overlays(&mut doc, &tokens()), OverlayOutcome::default());
    assert_eq!(doc, before);
}

// ===== Collisions =====

#[test]
fn later_overlay_is_pushed_right() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("a", Point::new(100.0, 100.0));
    b.anchor("b", Point::new(120.0, 110.0));
    let first = b.overlay("a", Side::Right, Size::new(100.0, 40.0));
    let second = b.overlay("b", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    let outcome = place_overlays(&mut doc, &with_shift(150.0));

    assert_eq!(position(&doc, first), Some(Point::new(108.0, 94.0)));
    assert_eq!(position(&doc, second), Some(Point::new(278.0, 104.0)));
    assert_eq!(outcome.shifted, 1);

    let a = doc.document_rect(first).expect("exists");
    let b = doc.document_rect(second).expect("exists");
    assert!(!a.overlaps(&b));
}

#[test]
fn collision_avoidance_is_off_without_shift() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("a", Point::new(100.0, 100.0));
    b.anchor("b", Point::new(120.0, 110.0));
    b.overlay("a", Side::Right, Size::new(100.0, 40.0));
    let second = b.overlay("b", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    let outcome = place_overlays(&mut doc, &tokens());

    assert_eq!(position(&doc, second), Some(Point::new(128.0, 104.0)));
    assert_eq!(outcome.shifted, 0);
}

#[test]
fn left_overlays_are_also_pushed_right() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("a", Point::new(500.0, 100.0));
    b.anchor("b", Point::new(500.0, 100.0));
    b.overlay("a", Side::Left, Size::new(100.0, 40.0));
    let second = b.overlay("b", Side::Left, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &with_shift(30.0));

    assert_eq!(position(&doc, second).map(|p| p.x), Some(422.0));
}

#[test]
fn pushed_overlay_is_clamped_again() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(400.0, 800.0));
    b.anchor("a", Point::new(200.0, 100.0));
    b.anchor("b", Point::new(200.0, 100.0));
    b.overlay("a", Side::Right, Size::new(100.0, 40.0));
    let second = b.overlay("b", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    let outcome = place_overlays(&mut doc, &with_shift(150.0));

    // 208 + 150 = 358 overflows; the right bound is 400 - 100 - 4 = 296.
    assert_eq!(position(&doc, second).map(|p| p.x), Some(296.0));
    assert_eq!(outcome.shifted, 1);
}

#[test]
fn vertically_separate_overlays_do_not_collide() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("a", Point::new(100.0, 100.0));
    b.anchor("b", Point::new(100.0, 140.0));
    b.overlay("a", Side::Right, Size::new(100.0, 40.0));
    let second = b.overlay("b", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &with_shift(50.0));

    assert_eq!(position(&doc, second), Some(Point::new(108.0, 134.0)));
}

#[test]
fn shift_accumulates_over_several_priors() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(2000.0, 800.0));
    for id in ["a", "b", "c"] {
        b.anchor(id, Point::new(100.0, 100.0));
    }
    b.overlay("a", Side::Right, Size::new(100.0, 40.0));
    b.overlay("b", Side::Right, Size::new(100.0, 40.0));
    let third = b.overlay("c", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &with_shift(60.0));

    // a: 108..208. b: hits a -> 168..268. c: hits a (->168), then b (->228).
    assert_eq!(position(&doc, third).map(|p| p.x), Some(228.0));
}

#[test]
fn hidden_overlays_still_take_up_room() {
    let mut b = SnapshotDocument::builder().viewport(Viewport::new(1000.0, 800.0));
    b.anchor("a", Point::new(100.0, 100.0));
    b.anchor("b", Point::new(100.0, 100.0));
    let first = b.overlay("a", Side::Right, Size::new(100.0, 40.0));
    let second = b.overlay("b", Side::Right, Size::new(100.0, 40.0));
    let mut doc = b.build();
    doc.set_hidden(first, true);

    place_overlays(&mut doc, &with_shift(110.0));

    assert_eq!(position(&doc, second).map(|p| p.x), Some(218.0));
}

// ===== Idempotence =====

#[test]
fn second_pass_changes_nothing() {
    let mut b = SnapshotDocument::builder()
        .viewport(Viewport::new(600.0, 800.0).scrolled_to(50.0, 20.0));
    b.anchor("a", Point::new(300.0, 100.0));
    b.anchor("b", Point::new(320.0, 110.0));
    b.anchor("c", Point::new(580.0, 400.0));
    b.overlay("a", Side::Left, Size::new(120.0, 40.0));
    b.overlay("b", Side::Right, Size::new(200.0, 60.0));
    b.overlay("c", Side::Right, Size::new(90.0, 30.0));
    let mut doc = b.build();

    place_overlays(&mut doc, &with_shift(25.0));
    let first = doc.clone();
    place_overlays(&mut doc, &with_shift(25.0));

    assert_eq!(doc, first);
}
