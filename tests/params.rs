use shader_lessons::clock::ScaledClock;
use shader_lessons::params::{
    GalleryParams, PatternParams, PointCloudParams, ScrollEffect, PATTERN_PARAM_NAMES,
};
use shader_lessons::scroll::ScrollState;
use shader_lessons::DemoError;

#[test]
fn displacement_is_whole_and_clamped() {
    let mut params = PointCloudParams::default();
    assert_eq!(params.displacement(), 1.0);

    params.set_displacement(3.4);
    assert_eq!(params.displacement(), 3.0);
    params.set_displacement(100.0);
    assert_eq!(params.displacement(), 10.0);
    params.set_displacement(-2.0);
    assert_eq!(params.displacement(), 1.0);
    params.set_displacement(f32::NAN);
    assert_eq!(params.displacement(), 1.0);
}

#[test]
fn scroll_effect_codes() {
    assert_eq!(ScrollEffect::default(), ScrollEffect::RgbShift);
    for code in 0..4u32 {
        let effect = ScrollEffect::try_from(code).unwrap();
        assert_eq!(effect.uniform(), code as f32);
    }
    let err = ScrollEffect::try_from(4).unwrap_err();
    assert_eq!(err, DemoError::UnknownScrollEffect(4));
    assert_eq!(err.to_string(), "unknown scroll effect 4");
}

#[test]
fn gallery_defaults_and_ranges() {
    let mut params = GalleryParams::default();
    assert_eq!(params.distortion_strength(), 0.05);
    assert_eq!(params.distortion_frequency(), 10.0);
    assert_eq!(params.distortion_speed(), 2.0);
    assert_eq!(params.hover_duration_ms, 800.0);

    params.set_distortion_strength(1.0);
    params.set_distortion_frequency(0.0);
    params.set_distortion_speed(4.0);
    assert_eq!(params.distortion_strength(), 0.5);
    assert_eq!(params.distortion_frequency(), 1.0);
    assert_eq!(params.distortion_speed(), 4.0);
}

#[test]
fn pattern_params_by_index_and_name() {
    let mut params = PatternParams::default();
    assert_eq!(params.time_scale(), 1.0);
    assert_eq!(params.param(), [0.5; 4]);

    assert!(params.set_param(1, 9.0));
    assert!(!params.set_param(4, 1.0));
    assert_eq!(params.param(), [0.5, 5.0, 0.5, 0.5]);

    assert_eq!(PatternParams::index_of("mosaic-scale"), Some(2));
    assert_eq!(PatternParams::index_of("nope"), None);
    assert_eq!(PATTERN_PARAM_NAMES.len(), params.param().len());

    params.set_time_scale(3.0);
    assert_eq!(params.time_scale(), 2.0);
}

#[test]
fn scroll_delta_is_damped() {
    let mut scroll = ScrollState::default();
    scroll.update(100.0);
    assert_eq!(scroll.position(), 100.0);
    assert_eq!(scroll.diff(), 0.0);

    scroll.update(110.0);
    assert!((scroll.diff() - 1.0).abs() < 1e-6);
    scroll.update(110.0);
    assert!((scroll.diff() - 0.9).abs() < 1e-6);
    assert_eq!(scroll.position(), 110.0);
}

#[test]
fn scroll_delta_settles_to_zero() {
    let mut scroll = ScrollState::default();
    scroll.update(0.0);
    scroll.update(50.0);
    for _ in 0..500 {
        scroll.update(50.0);
    }
    assert_eq!(scroll.diff(), 0.0);
}

#[test]
fn scaled_clock_accumulates_seconds() {
    let mut clock = ScaledClock::new(1000.0, 2.0);
    assert_eq!(clock.tick(1500.0), 1.0);
    // clock going backwards adds nothing
    assert_eq!(clock.tick(1400.0), 1.0);

    clock.scale = 0.0;
    assert_eq!(clock.tick(5000.0), 1.0);
    clock.scale = 1.0;
    assert!((clock.tick(5250.0) - 1.25).abs() < 1e-6);
    // a repeated timestamp adds nothing
    assert!((clock.tick(5250.0) - 1.25).abs() < 1e-6);
}
