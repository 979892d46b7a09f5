use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_freehand() {
    assert_eq!(Tool::default(), Tool::Freehand);
}

#[test]
fn tool_shape_mapping() {
    assert_eq!(Tool::Freehand.shape(), None);
    assert_eq!(Tool::Rectangle.shape(), Some(Shape::Rectangle));
    assert_eq!(Tool::Circle.shape(), Some(Shape::Circle));
    assert!(!Tool::Freehand.is_shape());
    assert!(Tool::Rectangle.is_shape());
    assert!(Tool::Circle.is_shape());
}

// =============================================================
// StrokeWidth
// =============================================================

#[test]
fn stroke_width_accepts_bounds() {
    assert_eq!(StrokeWidth::new(1).unwrap().get(), 1);
    assert_eq!(StrokeWidth::new(10).unwrap().get(), 10);
}

#[test]
fn stroke_width_rejects_out_of_range() {
    assert!(matches!(StrokeWidth::new(0), Err(CanvasError::InvalidStrokeWidth(0))));
    assert!(matches!(StrokeWidth::new(11), Err(CanvasError::InvalidStrokeWidth(11))));
}

#[test]
fn stroke_params_defaults() {
    let params = StrokeParams::default();
    assert_eq!(params.color, Rgb::BLACK);
    assert_eq!(params.width.get(), 4);
    assert_eq!(params.tool, Tool::Freehand);
}

// =============================================================
// InputEvent wire format
// =============================================================

#[test]
fn input_event_deserializes_tagged_pointer() {
    let ev: InputEvent = serde_json::from_str(r#"{"type":"pointer_down","x":10,"y":20.5}"#).unwrap();
    assert_eq!(ev, InputEvent::PointerDown { x: 10.0, y: 20.5 });
}

#[test]
fn input_event_deserializes_unit_and_command_variants() {
    let events: Vec<InputEvent> = serde_json::from_str(
        r##"[
            {"type":"pointer_up"},
            {"type":"touch_end"},
            {"type":"select_tool","tool":"circle"},
            {"type":"pick_color","hex":"#ff0000"},
            {"type":"set_stroke_width","width":7},
            {"type":"set_theme","theme":"dark"},
            {"type":"reset"},
            {"type":"resize","container_width":320},
            {"type":"submit"}
        ]"##,
    )
    .unwrap();
    assert_eq!(
        events,
        vec![
            InputEvent::PointerUp,
            InputEvent::TouchEnd,
            InputEvent::SelectTool { tool: Tool::Circle },
            InputEvent::PickColor { hex: "#ff0000".into() },
            InputEvent::SetStrokeWidth { width: 7 },
            InputEvent::SetTheme { theme: Theme::Dark },
            InputEvent::Reset,
            InputEvent::Resize { container_width: 320 },
            InputEvent::Submit,
        ]
    );
}

#[test]
fn input_event_rejects_unknown_type() {
    assert!(serde_json::from_str::<InputEvent>(r#"{"type":"double_click"}"#).is_err());
}

// =============================================================
// InputQueue
// =============================================================

#[test]
fn queue_is_fifo() {
    let mut queue = InputQueue::new();
    assert!(queue.is_empty());
    queue.push(InputEvent::Reset);
    queue.push(InputEvent::Submit);
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.pop(), Some(InputEvent::Reset));
    assert_eq!(queue.pop(), Some(InputEvent::Submit));
    assert_eq!(queue.pop(), None);
}

#[test]
fn queue_collects_and_extends() {
    let mut queue: InputQueue = vec![InputEvent::PointerUp].into_iter().collect();
    queue.extend([InputEvent::TouchEnd, InputEvent::Reset]);
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.pop(), Some(InputEvent::PointerUp));
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn idle_gesture_yields_no_segment() {
    let mut g = Gesture::default();
    assert!(!g.is_pressed());
    assert_eq!(g.advance(Point::new(5.0, 5.0)), None);
    assert_eq!(g, Gesture::Idle);
}

#[test]
fn pressed_gesture_returns_previous_sample() {
    let mut g = Gesture::Pressed { last: Point::new(1.0, 1.0) };
    assert_eq!(g.advance(Point::new(2.0, 3.0)), Some(Point::new(1.0, 1.0)));
    assert_eq!(g.advance(Point::new(4.0, 4.0)), Some(Point::new(2.0, 3.0)));
    assert_eq!(g, Gesture::Pressed { last: Point::new(4.0, 4.0) });
}

#[test]
fn input_state_streams_are_independent() {
    let state = InputState { pointer: Gesture::Pressed { last: Point::default() }, touch: Gesture::Idle };
    assert!(state.pointer.is_pressed());
    assert!(!state.touch.is_pressed());
}
