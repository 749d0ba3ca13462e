use super::*;

fn fps24() -> Fps {
    Fps::integer(24).unwrap()
}

#[test]
fn floors_timestamp_times_fps() {
    let idx = map_beats_to_frames(&[0.0, 0.5, 1.0, 1.02, 2.0], 1000, fps24()).unwrap();
    assert_eq!(idx, vec![0, 12, 24, 24, 48]);
}

#[test]
fn clamps_to_last_frame() {
    let idx = map_beats_to_frames(&[0.5, 1.0, 2.0], 10, fps24()).unwrap();
    assert_eq!(idx, vec![9, 9, 9]);
}

#[test]
fn negative_nan_and_infinite_timestamps_stay_in_range() {
    let idx = map_beats_to_frames(&[-1.0, f64::NAN, f64::INFINITY], 10, fps24()).unwrap();
    assert_eq!(idx, vec![0, 0, 9]);
}

#[test]
fn is_length_and_order_preserving() {
    let beats = [3.0, 0.1, 0.1, 2.5, 0.0, 7.75];
    let idx = map_beats_to_frames(&beats, 100, fps24()).unwrap();
    assert_eq!(idx.len(), beats.len());
    assert_eq!(idx, vec![72, 2, 2, 60, 0, 99]);
    assert!(idx.iter().all(|&i| i < 100));
}

#[test]
fn empty_beats_map_to_empty_boundaries() {
    assert!(map_beats_to_frames(&[], 10, fps24()).unwrap().is_empty());
}

#[test]
fn zero_frames_is_an_empty_frame_source() {
    assert!(matches!(
        map_beats_to_frames(&[0.5], 0, fps24()),
        Err(BeatfadeError::EmptyFrameSource)
    ));
    assert!(matches!(
        map_beats_to_frames(&[], 0, fps24()),
        Err(BeatfadeError::EmptyFrameSource)
    ));
}

#[test]
fn honours_rational_frame_rates() {
    let ntsc = Fps::new(30000, 1001).unwrap();
    let idx = map_beats_to_frames(&[1.0, 10.0], 1000, ntsc).unwrap();
    assert_eq!(idx, vec![29, 299]);
}
