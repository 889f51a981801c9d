use super::*;
use crate::foundation::core::Point;
use crate::host::headless::HeadlessHost;

fn size(w: f64, h: f64) -> Size {
    Size {
        width: w,
        height: h,
    }
}

fn lines() -> Vec<LineDefinition> {
    vec![
        LineDefinition::new(
            vec![Point::new(0.0, 20.0), Point::new(60.0, 5.0), Point::new(120.0, 30.0)],
            2.0,
            StrokeColor::from_hex_u32(0xffffff),
        ),
        LineDefinition::new(
            vec![Point::new(0.0, 50.0), Point::new(120.0, 45.0)],
            1.0,
            StrokeColor::from_hex_u32(0xff00ff),
        )
        .with_opacity(0.5),
    ]
}

#[test]
fn initialize_sizes_projection_and_surface_and_attaches() {
    let mut host = HeadlessHost::new(120.0, 60.0).with_pixel_ratio(3.0);
    let cfg = RevealConfig::default();
    let scene = SceneManager::initialize(size(120.0, 60.0), &lines(), &cfg, &mut host).unwrap();

    assert_eq!(scene.projection().size(), size(120.0, 60.0));
    let surface = scene.surface().unwrap();
    assert_eq!(surface.pixel_ratio(), 1.5);
    assert_eq!(surface.pixel_size(), (180, 90));
    assert_eq!(host.state().attached().len(), 1);
    assert_eq!(host.state().attached()[0].id, surface.id());

    assert_eq!(scene.lines().len(), 2);
    assert!(scene.lines().iter().all(|l| l.drawn() == 1));
    assert!(scene.lines().iter().all(|l| l.total_points().len() == 81));
}

#[test]
fn initialize_fails_when_host_rejects_surface() {
    let mut host = HeadlessHost::new(120.0, 60.0).rejecting_surfaces();
    let res = SceneManager::initialize(size(120.0, 60.0), &lines(), &RevealConfig::default(), &mut host);
    assert!(res.is_err());
    assert!(host.state().attached().is_empty());
}

#[test]
fn repaint_presents_revealed_prefix_only() {
    let mut host = HeadlessHost::new(120.0, 60.0);
    let mut scene =
        SceneManager::initialize(size(120.0, 60.0), &lines(), &RevealConfig::default(), &mut host)
            .unwrap();
    let id = scene.surface().unwrap().id();

    scene.repaint(&mut host);
    assert_eq!(host.state().present_count(), 1);
    assert_eq!(host.state().presented(id).unwrap().painted_pixels(), 0);

    for line in scene.lines_mut() {
        while line.advance() {}
    }
    scene.repaint(&mut host);
    assert!(host.state().presented(id).unwrap().painted_pixels() > 0);
}

#[test]
fn update_projection_keeps_progress() {
    let mut host = HeadlessHost::new(120.0, 60.0);
    let mut scene =
        SceneManager::initialize(size(120.0, 60.0), &lines(), &RevealConfig::default(), &mut host)
            .unwrap();
    for line in scene.lines_mut() {
        line.advance();
    }
    let before: Vec<usize> = scene.lines().iter().map(|l| l.drawn()).collect();

    scene.update_projection(size(300.0, 90.0), &mut host).unwrap();
    assert_eq!(scene.projection().size(), size(300.0, 90.0));
    assert_eq!(scene.surface().unwrap().pixel_size(), (300, 90));
    assert_eq!(host.state().attached()[0].pixel_width, 300);
    let after: Vec<usize> = scene.lines().iter().map(|l| l.drawn()).collect();
    assert_eq!(before, after);
}

#[test]
fn dispose_detaches_once_and_stops_painting() {
    let mut host = HeadlessHost::new(120.0, 60.0);
    let mut scene =
        SceneManager::initialize(size(120.0, 60.0), &lines(), &RevealConfig::default(), &mut host)
            .unwrap();
    scene.dispose(&mut host);
    scene.dispose(&mut host);
    assert!(scene.is_disposed());
    assert!(host.state().attached().is_empty());

    scene.repaint(&mut host);
    assert_eq!(host.state().present_count(), 0);
}

#[test]
fn pixel_ratio_cap_and_fallback() {
    assert_eq!(effective_pixel_ratio(2.0, 1.5), 1.5);
    assert_eq!(effective_pixel_ratio(1.25, 1.5), 1.25);
    assert_eq!(effective_pixel_ratio(f64::NAN, 1.5), 1.0);
    assert_eq!(effective_pixel_ratio(0.0, 1.5), 1.0);
}

#[test]
fn failed_resize_keeps_projection_and_surface_in_step() {
    let mut host = HeadlessHost::new(120.0, 60.0);
    let mut scene =
        SceneManager::initialize(size(120.0, 60.0), &lines(), &RevealConfig::default(), &mut host)
            .unwrap();
    for line in scene.lines_mut() {
        while line.advance() {}
    }
    let id = scene.surface().unwrap().id();

    assert!(scene.update_projection(size(0.0, 0.0), &mut host).is_err());
    assert_eq!(scene.projection().size(), size(120.0, 60.0));
    assert_eq!(scene.surface().unwrap().pixel_size(), (120, 60));

    scene.repaint(&mut host);
    let frame = host.state().presented(id).cloned().unwrap();
    assert_eq!((frame.width, frame.height), (120, 60));
    assert!(frame.painted_pixels() > 0);
}
