use super::*;

#[test]
fn from_rgb8_checks_length_and_dimensions() {
    assert!(ImageBuffer::from_rgb8(2, 2, vec![0; 12]).is_ok());
    assert!(ImageBuffer::from_rgb8(2, 2, vec![0; 11]).is_err());
    assert!(ImageBuffer::from_rgb8(0, 2, vec![]).is_err());
    assert!(ImageBuffer::from_rgb8(2, 0, vec![]).is_err());
}

#[test]
fn stride_and_geometry_follow_format() {
    let buf = ImageBuffer::filled(5, 3, [1, 2, 3]).unwrap();
    assert_eq!(buf.stride(), 15);
    assert_eq!(
        buf.geometry(),
        Geometry {
            width: 5,
            height: 3,
            channels: 3
        }
    );
    assert_eq!(buf.format(), PixelFormat::Rgb8);
    assert_eq!(buf.as_bytes().len(), 45);
}

#[test]
fn pixel_addresses_row_major() {
    let data: Vec<u8> = (0..18).collect();
    let buf = ImageBuffer::from_rgb8(3, 2, data).unwrap();
    assert_eq!(buf.pixel(0, 0), Some(&[0u8, 1, 2][..]));
    assert_eq!(buf.pixel(2, 0), Some(&[6u8, 7, 8][..]));
    assert_eq!(buf.pixel(1, 1), Some(&[12u8, 13, 14][..]));
    assert_eq!(buf.pixel(3, 0), None);
    assert_eq!(buf.pixel(0, 2), None);
}

#[test]
fn ensure_same_geometry_reports_both_sides() {
    let a = ImageBuffer::filled(4, 4, [0, 0, 0]).unwrap();
    let b = ImageBuffer::filled(4, 2, [0, 0, 0]).unwrap();
    a.ensure_same_geometry(&a.clone()).unwrap();

    match a.ensure_same_geometry(&b) {
        Err(BeatfadeError::DimensionMismatch { left, right }) => {
            assert_eq!(left, a.geometry());
            assert_eq!(right, b.geometry());
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

#[test]
fn converts_to_and_from_rgb_image() {
    let img = image::RgbImage::from_pixel(2, 1, image::Rgb([9, 8, 7]));
    let buf = ImageBuffer::try_from(img).unwrap();
    assert_eq!(buf.as_bytes(), &[9, 8, 7, 9, 8, 7]);

    let back = image::RgbImage::try_from(buf).unwrap();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(1, 0).0, [9, 8, 7]);
}

#[test]
fn debug_does_not_dump_pixels() {
    let buf = ImageBuffer::filled(64, 64, [1, 1, 1]).unwrap();
    let dbg = format!("{buf:?}");
    assert!(dbg.contains("bytes: 12288"));
    assert!(dbg.len() < 200);
}
