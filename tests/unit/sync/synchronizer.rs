use super::*;

fn frames(n: usize) -> Vec<ImageBuffer> {
    (0..n)
        .map(|i| ImageBuffer::filled(2, 2, [i as u8, 0, 0]).unwrap())
        .collect()
}

fn ids(frames: &[ImageBuffer]) -> Vec<u8> {
    frames.iter().map(|f| f.as_bytes()[0]).collect()
}

#[test]
fn concatenates_consecutive_slices() {
    let src = frames(10);
    let out = synchronize(&src, &[1, 3, 7]);
    assert_eq!(ids(&out), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn fewer_than_two_boundaries_is_empty() {
    let src = frames(10);
    assert!(synchronize(&src, &[]).is_empty());
    assert!(synchronize(&src, &[4]).is_empty());
}

#[test]
fn equal_boundaries_contribute_nothing() {
    let src = frames(10);
    let (out, report) = synchronize_with_report(&src, &[9, 9, 9]);
    assert!(out.is_empty());
    assert_eq!(report.slices, 2);
    assert_eq!(report.empty_slices, 2);
    assert_eq!(report.inverted_slices, 0);
    assert!(report.is_degenerate());
}

#[test]
fn inverted_pairs_are_skipped_not_reordered() {
    let src = frames(10);
    let (out, report) = synchronize_with_report(&src, &[2, 5, 3, 6]);
    assert_eq!(ids(&out), vec![2, 3, 4, 3, 4, 5]);
    assert_eq!(report.slices, 3);
    assert_eq!(report.inverted_slices, 1);
    assert_eq!(report.empty_slices, 1);
    assert_eq!(report.output_frames, 6);
}

#[test]
fn end_past_the_sequence_is_clamped() {
    let src = frames(4);
    let out = synchronize(&src, &[2, 40]);
    assert_eq!(ids(&out), vec![2, 3]);
    assert!(synchronize(&src, &[10, 12]).is_empty());
}

#[test]
fn frames_may_repeat_across_overlapping_slices() {
    let src = frames(6);
    let out = synchronize(&src, &[0, 2, 1, 3]);
    assert_eq!(ids(&out), vec![0, 1, 1, 2]);
}

#[test]
fn full_range_reproduces_the_input() {
    let src = frames(5);
    assert_eq!(synchronize(&src, &[0, 5]), src);
}
