//! Replay scripts: a line-oriented transcript of editor input.
//!
//! DESIGN
//! ======
//! Each non-blank line is one command word followed by whitespace-separated
//! arguments; `#` starts a comment line. Coordinates are screen pixels, so a
//! script exercises exactly the handlers a pointer would. Floors are named by
//! 1-based tab position. Parsing is all-or-nothing: the first bad line aborts
//! with its line number and nothing is applied.

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;

use std::path::PathBuf;

use canvas::doc::{CameraKind, ParseCameraKindError};
use canvas::input::{Button, Modifiers, ParseToolError, Tool};
use canvas::viewport::Point;

/// Why a line failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("unexpected argument `{0}`")]
    Unexpected(String),
    #[error("invalid number `{0}`")]
    Number(String),
    #[error("invalid floor tab `{0}`; tabs count from 1")]
    FloorTab(String),
    #[error("unknown modifier `{0}`")]
    Modifier(String),
    #[error("unknown zoom step `{0}`; expected in, out or reset")]
    Zoom(String),
    #[error(transparent)]
    Tool(#[from] ParseToolError),
    #[error(transparent)]
    Camera(#[from] ParseCameraKindError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {error}")]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    pub error: LineError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
    Reset,
}

/// One script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(Tool),
    /// Press the upload button and supply the file at this path.
    Upload(PathBuf),
    /// Press the clear-background button.
    Clear,
    Down { at: Point, button: Button, modifiers: Modifiers },
    Move(Point),
    Up(Point),
    Drop { kind: CameraKind, at: Point },
    Wheel { dy: f64, modifiers: Modifiers },
    Zoom(ZoomStep),
    /// Click a camera or room label to start renaming.
    Label(Point),
    /// Replace the rename buffer.
    Type(String),
    Key(String),
    FloorAdd(Option<String>),
    FloorRename { tab: usize, name: String },
    FloorSelect(usize),
    FloorDelete(usize),
    Materials,
    Report,
}

/// A command and the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

/// Parse a whole script.
///
/// # Errors
///
/// The first line that fails to parse, as a [`ScriptError`].
pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        match parse_line(raw) {
            Ok(Some(command)) => steps.push(Step { line, command }),
            Ok(None) => {}
            Err(error) => return Err(ScriptError { line, error }),
        }
    }
    Ok(steps)
}

/// Parse a single line. Blank and comment lines yield `None`.
///
/// # Errors
///
/// A [`LineError`] naming the first bad token.
pub fn parse_line(raw: &str) -> Result<Option<Command>, LineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let mut args = Args { rest: trimmed };
    let Some(word) = args.next() else {
        return Ok(None);
    };

    let command = match word {
        "tool" => Command::Tool(args.word("tool name")?.parse()?),
        "upload" => Command::Upload(PathBuf::from(args.remainder("image path")?)),
        "clear" => Command::Clear,
        "down" => {
            let at = args.point()?;
            let mut button = Button::Primary;
            let mut modifiers = Modifiers::default();
            while let Some(flag) = args.next() {
                match flag {
                    "middle" => button = Button::Middle,
                    "right" => button = Button::Secondary,
                    other => apply_modifier(&mut modifiers, other)?,
                }
            }
            Command::Down { at, button, modifiers }
        }
        "move" => Command::Move(args.point()?),
        "up" => Command::Up(args.point()?),
        "drop" => {
            let kind = args.word("camera variant")?.parse()?;
            Command::Drop { kind, at: args.point()? }
        }
        "wheel" => {
            let dy = args.number("wheel delta")?;
            let mut modifiers = Modifiers::default();
            while let Some(flag) = args.next() {
                apply_modifier(&mut modifiers, flag)?;
            }
            Command::Wheel { dy, modifiers }
        }
        "zoom" => Command::Zoom(match args.word("zoom step")? {
            "in" => ZoomStep::In,
            "out" => ZoomStep::Out,
            "reset" => ZoomStep::Reset,
            other => return Err(LineError::Zoom(other.to_owned())),
        }),
        "label" => Command::Label(args.point()?),
        "type" => Command::Type(args.remainder("text")?.to_owned()),
        "key" => Command::Key(args.word("key name")?.to_owned()),
        "floor" => match args.word("floor action")? {
            "add" => Command::FloorAdd(args.optional_remainder().map(str::to_owned)),
            "rename" => {
                let tab = args.tab()?;
                Command::FloorRename { tab, name: args.remainder("floor name")?.to_owned() }
            }
            "select" => Command::FloorSelect(args.tab()?),
            "delete" => Command::FloorDelete(args.tab()?),
            other => return Err(LineError::UnknownCommand(format!("floor {other}"))),
        },
        "materials" => Command::Materials,
        "report" => Command::Report,
        other => return Err(LineError::UnknownCommand(other.to_owned())),
    };
    args.finish()?;
    Ok(Some(command))
}

fn apply_modifier(modifiers: &mut Modifiers, flag: &str) -> Result<(), LineError> {
    match flag {
        "ctrl" => modifiers.ctrl = true,
        "shift" => modifiers.shift = true,
        "alt" => modifiers.alt = true,
        "meta" => modifiers.meta = true,
        other => return Err(LineError::Modifier(other.to_owned())),
    }
    Ok(())
}

/// Cursor over the unconsumed part of a line.
struct Args<'a> {
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn next(&mut self) -> Option<&'a str> {
        let s = self.rest.trim_start();
        if s.is_empty() {
            self.rest = s;
            return None;
        }
        let end = s.find(char::is_whitespace).unwrap_or(s.len());
        let (word, rest) = s.split_at(end);
        self.rest = rest;
        Some(word)
    }

    fn word(&mut self, what: &'static str) -> Result<&'a str, LineError> {
        self.next().ok_or(LineError::Missing(what))
    }

    fn number(&mut self, what: &'static str) -> Result<f64, LineError> {
        let word = self.word(what)?;
        match word.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(LineError::Number(word.to_owned())),
        }
    }

    fn point(&mut self) -> Result<Point, LineError> {
        let x = self.number("x coordinate")?;
        let y = self.number("y coordinate")?;
        Ok(Point::new(x, y))
    }

    /// A 1-based floor tab, returned as given.
    fn tab(&mut self) -> Result<usize, LineError> {
        let word = self.word("floor tab")?;
        match word.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(LineError::FloorTab(word.to_owned())),
        }
    }

    /// Everything left on the line, inner whitespace kept.
    fn optional_remainder(&mut self) -> Option<&'a str> {
        let s = self.rest.trim();
        self.rest = "";
        (!s.is_empty()).then_some(s)
    }

    fn remainder(&mut self, what: &'static str) -> Result<&'a str, LineError> {
        self.optional_remainder().ok_or(LineError::Missing(what))
    }

    fn finish(mut self) -> Result<(), LineError> {
        match self.next() {
            Some(extra) => Err(LineError::Unexpected(extra.to_owned())),
            None => Ok(()),
        }
    }
}
