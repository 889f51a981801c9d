use super::*;
use crate::foundation::color::StrokeColor;

fn def(speed: f64) -> LineDefinition {
    LineDefinition::new(
        vec![
            Point::new(0.0, 50.0),
            Point::new(100.0, 10.0),
            Point::new(200.0, 60.0),
        ],
        speed,
        StrokeColor::from_hex_u32(0x336699),
    )
}

fn container() -> Size {
    Size {
        width: 200.0,
        height: 100.0,
    }
}

#[test]
fn starts_with_one_point_revealed() {
    let st = LineState::from_definition(&def(2.0), container(), 80).unwrap();
    assert_eq!(st.total_points().len(), 81);
    assert_eq!(st.drawn(), 1);
    assert_eq!(st.revealed(), &st.total_points()[..1]);
    assert!(!st.is_complete());
}

#[test]
fn advance_clamps_at_total() {
    let mut st = LineState::from_definition(&def(7.0), container(), 10).unwrap();
    let mut prev = st.drawn();
    while st.advance() {
        assert!(st.drawn() > prev);
        prev = st.drawn();
    }
    assert_eq!(st.drawn(), 11);
    assert!(!st.advance());
    assert_eq!(st.drawn(), 11);
}

#[test]
fn fractional_speed_rounds_up() {
    let mut st = LineState::from_definition(&def(1.1), container(), 80).unwrap();
    assert_eq!(st.step(), 2);
    st.advance();
    assert_eq!(st.drawn(), 3);
}

#[test]
fn waiting_compares_against_delay() {
    let st = LineState::from_definition(&def(1.0).with_delay(0.5), container(), 8).unwrap();
    assert!(st.is_waiting(0.49));
    assert!(!st.is_waiting(0.5));
}

#[test]
fn invalid_definition_is_rejected() {
    assert!(LineState::from_definition(&def(0.0), container(), 80).is_err());
}
