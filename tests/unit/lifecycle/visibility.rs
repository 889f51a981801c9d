use super::*;
use crate::host::headless::HeadlessHost;

#[test]
fn gate_fires_once() {
    let mut g = OneShotGate::default();
    assert!(!g.has_fired());
    assert!(g.fire());
    assert!(!g.fire());
    assert!(g.has_fired());
}

#[test]
fn fires_on_first_report_at_threshold_only() {
    let mut host = HeadlessHost::new(10.0, 10.0);
    let mut v = VisibilityTrigger::new(0.1);
    v.observe(&mut host);

    assert!(!v.on_intersection(0.0));
    assert!(!v.on_intersection(0.09));
    assert!(v.on_intersection(0.1));
    assert!(v.has_fired());
}

#[test]
fn toggling_visibility_never_refires() {
    let mut host = HeadlessHost::new(10.0, 10.0);
    let mut v = VisibilityTrigger::new(0.1);
    v.observe(&mut host);

    let fires = [0.5, 0.0, 1.0, 0.0, 0.3, 0.0, 1.0]
        .into_iter()
        .filter(|&r| v.on_intersection(r))
        .count();
    assert_eq!(fires, 1);
    assert!(v.is_observing());
    assert_eq!(host.state().observer_count(), 1);
}

#[test]
fn unregistered_trigger_ignores_reports() {
    let mut host = HeadlessHost::new(10.0, 10.0);
    let mut v = VisibilityTrigger::new(0.1);
    assert!(!v.on_intersection(1.0));

    v.observe(&mut host);
    v.disconnect(&mut host);
    v.disconnect(&mut host);
    assert!(!v.on_intersection(1.0));
    assert_eq!(host.state().observer_count(), 0);
}

#[test]
fn nan_ratio_is_ignored() {
    let mut host = HeadlessHost::new(10.0, 10.0);
    let mut v = VisibilityTrigger::new(0.1);
    v.observe(&mut host);
    assert!(!v.on_intersection(f64::NAN));
    assert!(!v.has_fired());
}
