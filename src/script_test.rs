use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn parse(line: &str) -> Command {
    match parse_line(line) {
        Ok(Some(command)) => command,
        other => panic!("expected a command from {line:?}, got {other:?}"),
    }
}

fn parse_err(line: &str) -> LineError {
    match parse_line(line) {
        Err(e) => e,
        other => panic!("expected an error from {line:?}, got {other:?}"),
    }
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn tool_names_parse_case_insensitively() {
    assert_eq!(parse("tool wall"), Command::Tool(Tool::Wall));
    assert_eq!(parse("tool Eraser"), Command::Tool(Tool::Eraser));
}

#[test]
fn pointer_commands_take_screen_points() {
    assert_eq!(
        parse("down 10 20.5"),
        Command::Down { at: pt(10.0, 20.5), button: Button::Primary, modifiers: Modifiers::default() }
    );
    assert_eq!(parse("move -4 7"), Command::Move(pt(-4.0, 7.0)));
    assert_eq!(parse("  up 1 2  "), Command::Up(pt(1.0, 2.0)));
}

#[test]
fn down_accepts_button_and_modifiers() {
    let Command::Down { button, modifiers, .. } = parse("down 0 0 middle") else {
        panic!("not a down");
    };
    assert_eq!(button, Button::Middle);
    assert!(!modifiers.ctrl);

    let Command::Down { button, modifiers, .. } = parse("down 0 0 ctrl") else {
        panic!("not a down");
    };
    assert_eq!(button, Button::Primary);
    assert!(modifiers.ctrl);
}

#[test]
fn drop_and_wheel() {
    assert_eq!(parse("drop PTZ 300 200"), Command::Drop { kind: CameraKind::Ptz, at: pt(300.0, 200.0) });
    let Command::Wheel { dy, modifiers } = parse("wheel -120 ctrl") else {
        panic!("not a wheel");
    };
    assert!((dy + 120.0).abs() < 1e-9);
    assert!(modifiers.command());
}

#[test]
fn zoom_steps() {
    assert_eq!(parse("zoom in"), Command::Zoom(ZoomStep::In));
    assert_eq!(parse("zoom out"), Command::Zoom(ZoomStep::Out));
    assert_eq!(parse("zoom reset"), Command::Zoom(ZoomStep::Reset));
    assert_eq!(parse_err("zoom sideways"), LineError::Zoom("sideways".to_owned()));
}

#[test]
fn text_arguments_keep_inner_spaces() {
    assert_eq!(parse("type Kamera  Eingang"), Command::Type("Kamera  Eingang".to_owned()));
    assert_eq!(
        parse("floor rename 2 Obergeschoss Nord"),
        Command::FloorRename { tab: 2, name: "Obergeschoss Nord".to_owned() }
    );
    assert_eq!(parse("upload plans/ground floor.png"), Command::Upload(PathBuf::from("plans/ground floor.png")));
}

#[test]
fn floor_commands() {
    assert_eq!(parse("floor add"), Command::FloorAdd(None));
    assert_eq!(parse("floor add Garten"), Command::FloorAdd(Some("Garten".to_owned())));
    assert_eq!(parse("floor select 1"), Command::FloorSelect(1));
    assert_eq!(parse("floor delete 3"), Command::FloorDelete(3));
}

#[test]
fn bare_commands() {
    assert_eq!(parse("clear"), Command::Clear);
    assert_eq!(parse("materials"), Command::Materials);
    assert_eq!(parse("report"), Command::Report);
    assert_eq!(parse("key Delete"), Command::Key("Delete".to_owned()));
    assert_eq!(parse("label 5 6"), Command::Label(pt(5.0, 6.0)));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(parse_line(""), Ok(None));
    assert_eq!(parse_line("   "), Ok(None));
    assert_eq!(parse_line("# draw the hallway"), Ok(None));
}

#[test]
fn bad_tokens_are_named() {
    assert_eq!(parse_err("jump 1 2"), LineError::UnknownCommand("jump".to_owned()));
    assert_eq!(parse_err("down 1"), LineError::Missing("y coordinate"));
    assert_eq!(parse_err("move 1 north"), LineError::Number("north".to_owned()));
    assert_eq!(parse_err("move 1 NaN"), LineError::Number("NaN".to_owned()));
    assert_eq!(parse_err("down 1 2 hyper"), LineError::Modifier("hyper".to_owned()));
    assert_eq!(parse_err("clear now"), LineError::Unexpected("now".to_owned()));
    assert_eq!(parse_err("floor select 0"), LineError::FloorTab("0".to_owned()));
    assert_eq!(parse_err("type"), LineError::Missing("text"));
    assert!(matches!(parse_err("tool lasso"), LineError::Tool(_)));
    assert!(matches!(parse_err("drop fisheye 1 1"), LineError::Camera(_)));
}

#[test]
fn script_keeps_line_numbers() {
    let steps = parse_script("# header\n\ntool wall\ndown 0 0\n").unwrap();
    let lines: Vec<usize> = steps.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![3, 4]);
}

#[test]
fn script_error_reports_first_bad_line() {
    let err = parse_script("tool room\nmove 1\nbogus\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.error, LineError::Missing("y coordinate"));
    assert_eq!(err.to_string(), "line 2: missing y coordinate");
}
