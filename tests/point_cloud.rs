use shader_lessons::point_cloud::{
    centered_square, signed_pointer, FrameClock, PointCloud, POINT_SIZE,
};
use shader_lessons::DemoError;

/// Solid red RGBA image with one green pixel at row 0, column 3.
fn test_image(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = [255u8, 0, 0, 255].repeat(width * height);
    pixels[12..16].copy_from_slice(&[0, 255, 0, 255]);
    pixels
}

#[test]
fn samples_every_third_pixel() {
    let cloud = PointCloud::from_rgba(&test_image(4, 4), 4, 4).unwrap();

    assert_eq!(cloud.vertex_count(), 4);
    assert_eq!(
        cloud.position,
        vec![
            -1.0, 1.0, 0.0, //
            0.5, 1.0, 0.0, //
            -1.0, -0.5, 0.0, //
            0.5, -0.5, 0.0,
        ]
    );
    assert!(cloud.size.iter().all(|&s| s == POINT_SIZE));
}

#[test]
fn colors_are_normalised_and_opaque() {
    let cloud = PointCloud::from_rgba(&test_image(4, 4), 4, 4).unwrap();

    assert_eq!(cloud.color.len(), cloud.vertex_count() * 4);
    assert_eq!(&cloud.color[0..4], &[1.0, 0.0, 0.0, 1.0]);
    assert_eq!(&cloud.color[4..8], &[0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn sample_count_rounds_up() {
    let cloud = PointCloud::from_rgba(&test_image(10, 7), 10, 7).unwrap();
    // rows 0, 3, 6 and columns 0, 3, 6, 9
    assert_eq!(cloud.vertex_count(), 3 * 4);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let err = PointCloud::from_rgba(&[0u8; 15], 2, 2).unwrap_err();
    assert_eq!(
        err,
        DemoError::InvalidImage {
            width: 2,
            height: 2,
            len: 15,
            expected: 16,
        }
    );
}

#[test]
fn empty_image_gives_empty_cloud() {
    let cloud = PointCloud::from_rgba(&[], 0, 0).unwrap();
    assert_eq!(cloud.vertex_count(), 0);
}

#[test]
fn image_square_is_centred() {
    assert_eq!(centered_square(800.0, 600.0), (200.0, 100.0, 400.0));
}

#[test]
fn pointer_maps_to_signed_range_with_y_up() {
    assert_eq!(signed_pointer(0.0, 0.0, 800.0, 600.0), [-1.0, 1.0]);
    assert_eq!(signed_pointer(800.0, 600.0, 800.0, 600.0), [1.0, -1.0]);
    assert_eq!(signed_pointer(400.0, 300.0, 800.0, 600.0), [0.0, 0.0]);
    assert_eq!(signed_pointer(10.0, 10.0, 0.0, 600.0), [0.0, 0.0]);
}

#[test]
fn time_refreshes_every_fifth_frame() {
    let mut clock = FrameClock::default();
    let samples: Vec<(f32, u32)> = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]
        .into_iter()
        .map(|now| clock.tick(now))
        .collect();

    assert_eq!(
        samples,
        vec![
            (10.0, 0),
            (10.0, 1),
            (10.0, 2),
            (10.0, 3),
            (10.0, 4),
            (60.0, 5),
            (60.0, 6),
        ]
    );
    // the counter keeps going after the samples above
    assert_eq!(clock.tick(80.0), (60.0, 7));
}
