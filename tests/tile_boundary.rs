//! Scenarios that put interacting boxes in different tiles, so suppression
//! can only come from the cross-tile pass.

use tilenms::{non_max_suppression_padded_with, BoxesView, NmsConfig, ScoresView, Selection};

const TILE: usize = 4;

fn run(boxes: &[f32], num_boxes: usize, max_output_size: usize) -> Selection {
    let scores: Vec<f32> = (0..num_boxes)
        .map(|i| 1.0 - i as f32 / num_boxes as f32)
        .collect();
    let bv = BoxesView::from_slice(boxes, 1, num_boxes).unwrap();
    let sv = ScoresView::from_slice(&scores, 1, num_boxes).unwrap();
    let config = NmsConfig {
        tile_size: TILE,
        ..NmsConfig::default()
    };
    non_max_suppression_padded_with(&config, sv, bv, max_output_size, 0.5).unwrap()
}

#[test]
fn survivor_in_earlier_tile_suppresses_across_the_boundary() {
    // Eight boxes, two tiles. Box 5 (tile 1) heavily overlaps box 0
    // (tile 0) and nothing in its own tile, so only the cross pass can
    // remove it.
    let boxes = [
        0.0, 0.0, 10.0, 10.0, // 0, survives
        30.0, 0.0, 40.0, 10.0, // 1
        60.0, 0.0, 70.0, 10.0, // 2
        90.0, 0.0, 100.0, 10.0, // 3
        0.0, 50.0, 10.0, 60.0, // 4
        1.0, 1.0, 11.0, 11.0, // 5, IoU vs box 0 ~0.68
        60.0, 50.0, 70.0, 60.0, // 6
        90.0, 50.0, 100.0, 60.0, // 7
    ];
    let selection = run(&boxes, 8, 8);
    assert_eq!(selection.selected(0).unwrap(), &[0, 1, 2, 3, 4, 6, 7]);
    assert_eq!(selection.valid_count(0), Some(7));
}

#[test]
fn zeroed_box_in_earlier_tile_never_suppresses() {
    // Box 1 loses to box 0 inside tile 0. Box 4 (tile 1) overlaps box 1
    // above threshold but box 0 only at ~0.43, so it must survive: the
    // suppressed box's zeroed coordinates carry no overlap across tiles.
    let boxes = [
        0.0, 0.0, 10.0, 10.0, // 0, survives
        2.0, 0.0, 12.0, 10.0, // 1, IoU vs 0 = 0.667
        50.0, 50.0, 60.0, 60.0, // 2
        0.0, 0.0, 0.0, 0.0, // 3, padding inside the real range
        4.0, 0.0, 14.0, 10.0, // 4, IoU vs 1 = 0.667, vs 0 ~0.43
        80.0, 80.0, 90.0, 90.0, // 5
        0.0, 0.0, 0.0, 0.0, // 6
        0.0, 0.0, 0.0, 0.0, // 7
    ];
    let selection = run(&boxes, 8, 8);
    assert_eq!(selection.selected(0).unwrap(), &[0, 2, 4, 5]);
    assert_eq!(selection.valid_count(0), Some(4));
}

#[test]
fn padding_to_the_tile_multiple_changes_nothing() {
    // Five real boxes pad up to two tiles of four; the padded positions
    // must neither suppress nor be selected.
    let boxes = [
        0.0, 0.0, 10.0, 10.0, //
        1.0, 1.0, 11.0, 11.0, // suppressed by box 0
        30.0, 30.0, 40.0, 40.0, //
        60.0, 60.0, 70.0, 70.0, //
        31.0, 31.0, 41.0, 41.0, // tile 1, suppressed by box 2 across tiles
    ];
    let selection = run(&boxes, 5, 5);
    assert_eq!(selection.selected(0).unwrap(), &[0, 2, 3]);
    assert_eq!(selection.valid_count(0), Some(3));
    assert_eq!(selection.sentinel(), 8);
}
