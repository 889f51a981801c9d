use super::*;

#[test]
fn frames_are_delivered_oldest_first_and_cancel_is_tolerant() {
    let mut host = HeadlessHost::new(10.0, 10.0);
    let a = host.request_frame();
    let b = host.request_frame();
    host.cancel_frame(a);
    host.cancel_frame(a);
    assert_eq!(host.next_frame(), Some(b));
    assert_eq!(host.next_frame(), None);
    assert_eq!(host.state().frame_requests(), 2);
}

#[test]
fn clones_share_recorded_state() {
    let mut host = HeadlessHost::new(10.0, 10.0);
    let observer = host.clone();
    let id = host.observe_visibility(0.1);
    assert_eq!(observer.state().observer_count(), 1);
    host.disconnect_visibility(id);
    assert_eq!(observer.state().observer_count(), 0);
}

#[test]
fn rejecting_host_refuses_attach() {
    let mut host = HeadlessHost::new(10.0, 10.0).rejecting_surfaces();
    let node = SurfaceNode {
        id: SurfaceId(1),
        pixel_width: 10,
        pixel_height: 10,
        css_size: Size {
            width: 10.0,
            height: 10.0,
        },
        z_index: -1,
        interactive: false,
    };
    assert!(host.attach_surface(node).is_err());
    assert!(host.state().attached().is_empty());
}

#[test]
fn missing_container_measures_none() {
    let host = HeadlessHost::without_container();
    assert!(host.container_size().is_none());
    host.set_container_size(Some(Size {
        width: 3.0,
        height: 4.0,
    }));
    assert_eq!(host.container_size().map(|s| s.width), Some(3.0));
}
