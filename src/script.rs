//! Line-based event scripts for driving the editor without a window.
//!
//! One step per line; blank lines and `#` comments are ignored.
//!
//! ```text
//! kind Polygon
//! stroke blue
//! fill #4000FF00
//! width 3
//! press left 10 10
//! move 40 10
//! release left 40 10
//! click 40 40            # press + release of the left button
//! key Return             # Escape, Return, Delete, Ctrl+Z, Ctrl+Shift+Z, ...
//! undo | redo | finish | cancel | delete | clear
//! save out.json
//! load out.json
//! ```
//!
//! Relative `save`/`load` paths are resolved against the directory passed to
//! [`Script::run`].

use crate::input::{Action, InputState, Key, MouseButton};
use crate::session::StorageOptions;
use crate::util;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// A key plus the modifiers held while it is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyChord {
    /// Parses strings like `Escape`, `Ctrl+Z` or `Ctrl+Shift+Z`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Empty key string");
        }

        let mut ctrl = false;
        let mut shift = false;
        let mut key = None;
        for part in s.split('+') {
            match part.trim().to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "escape" | "esc" => key = Some(Key::Escape),
                "return" | "enter" => key = Some(Key::Return),
                "delete" | "del" => key = Some(Key::Delete),
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => key = Some(Key::Char(c)),
                        _ => bail!("Unknown key '{part}' in '{s}'"),
                    }
                }
            }
        }

        let key = key.ok_or_else(|| anyhow!("No key specified in: {s}"))?;
        Ok(Self { key, ctrl, shift })
    }
}

/// One scripted input step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Press { button: MouseButton, x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Release { button: MouseButton, x: f64, y: f64 },
    Click { x: f64, y: f64 },
    Key(KeyChord),
    Kind(String),
    Stroke(crate::draw::Color),
    Fill(crate::draw::Color),
    Width(f64),
    Action(Action),
    Save(PathBuf),
    Load(PathBuf),
}

/// Counters reported after a script has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub steps: usize,
    pub saves: usize,
    pub loads: usize,
    /// Records skipped across all `load` steps
    pub skipped: usize,
}

/// A parsed event script.
#[derive(Debug, Clone, Default)]
pub struct Script {
    steps: Vec<(usize, Step)>,
}

impl Script {
    /// Parses script text. Errors name the offending line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }
            let step = parse_step(line).with_context(|| format!("line {line_no}: '{line}'"))?;
            steps.push((line_no, step));
        }
        Ok(Self { steps })
    }

    /// Reads and parses a script file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid script {}", path.display()))
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().map(|(_, step)| step)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Feeds every step to `state`, stopping at the first failing step.
    pub fn run(
        &self,
        state: &mut InputState,
        options: &StorageOptions,
        base_dir: &Path,
    ) -> Result<RunReport> {
        let mut report = RunReport::default();
        for (line_no, step) in &self.steps {
            debug!("Script line {line_no}: {:?}", step);
            run_step(state, step, options, base_dir, &mut report)
                .with_context(|| format!("Script step on line {line_no} failed"))?;
            report.steps += 1;
        }
        info!(
            "Script finished: {} steps, {} shapes on canvas",
            report.steps,
            state.canvas.len()
        );
        Ok(report)
    }
}

/// Cuts a `#` comment off a line. `#` directly followed by a character is a
/// hex color, not a comment.
fn strip_comment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        if *byte != b'#' {
            continue;
        }
        let starts_word = index == 0 || bytes[index - 1].is_ascii_whitespace();
        let ends_word = bytes
            .get(index + 1)
            .is_none_or(|next| next.is_ascii_whitespace());
        if starts_word && (ends_word || raw[..index].trim().is_empty()) {
            return &raw[..index];
        }
    }
    raw
}

fn parse_step(line: &str) -> Result<Step> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let step = match verb.as_str() {
        "press" => {
            let [button, x, y] = expect_args::<3>(&args)?;
            Step::Press {
                button: parse_button(button)?,
                x: parse_number(x)?,
                y: parse_number(y)?,
            }
        }
        "release" => {
            let [button, x, y] = expect_args::<3>(&args)?;
            Step::Release {
                button: parse_button(button)?,
                x: parse_number(x)?,
                y: parse_number(y)?,
            }
        }
        "move" => {
            let [x, y] = expect_args::<2>(&args)?;
            Step::Move {
                x: parse_number(x)?,
                y: parse_number(y)?,
            }
        }
        "click" => {
            let [x, y] = expect_args::<2>(&args)?;
            Step::Click {
                x: parse_number(x)?,
                y: parse_number(y)?,
            }
        }
        "key" => {
            let [chord] = expect_args::<1>(&args)?;
            Step::Key(KeyChord::parse(chord)?)
        }
        "kind" => {
            let [kind] = expect_args::<1>(&args)?;
            Step::Kind(kind.to_string())
        }
        "stroke" => {
            let [color] = expect_args::<1>(&args)?;
            Step::Stroke(parse_color(color)?)
        }
        "fill" => {
            let [color] = expect_args::<1>(&args)?;
            Step::Fill(parse_color(color)?)
        }
        "width" => {
            let [width] = expect_args::<1>(&args)?;
            Step::Width(parse_number(width)?)
        }
        "save" | "load" => {
            if args.is_empty() {
                bail!("{verb} needs a file path");
            }
            let path = PathBuf::from(args.join(" "));
            if verb == "save" {
                Step::Save(path)
            } else {
                Step::Load(path)
            }
        }
        "undo" => Step::Action(Action::Undo),
        "redo" => Step::Action(Action::Redo),
        "finish" => Step::Action(Action::Finish),
        "cancel" => Step::Action(Action::Cancel),
        "delete" => Step::Action(Action::DeleteLast),
        "clear" => Step::Action(Action::Clear),
        other => bail!("Unknown step '{other}'"),
    };
    Ok(step)
}

fn expect_args<'a, const N: usize>(args: &[&'a str]) -> Result<[&'a str; N]> {
    <[&'a str; N]>::try_from(args)
        .map_err(|_| anyhow!("expected {N} argument(s), got {}", args.len()))
}

fn parse_number(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))
}

fn parse_button(s: &str) -> Result<MouseButton> {
    match s.to_lowercase().as_str() {
        "left" => Ok(MouseButton::Left),
        "right" => Ok(MouseButton::Right),
        "middle" => Ok(MouseButton::Middle),
        other => bail!("Unknown mouse button '{other}'"),
    }
}

fn parse_color(s: &str) -> Result<crate::draw::Color> {
    util::parse_color(s).ok_or_else(|| anyhow!("Unknown color '{s}'"))
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn run_step(
    state: &mut InputState,
    step: &Step,
    options: &StorageOptions,
    base_dir: &Path,
    report: &mut RunReport,
) -> Result<()> {
    match step {
        Step::Press { button, x, y } => state.on_mouse_press(*button, *x, *y)?,
        Step::Move { x, y } => state.on_mouse_motion(*x, *y)?,
        Step::Release { button, x, y } => state.on_mouse_release(*button, *x, *y)?,
        Step::Click { x, y } => {
            state.on_mouse_press(MouseButton::Left, *x, *y)?;
            state.on_mouse_release(MouseButton::Left, *x, *y)?;
        }
        Step::Key(chord) => {
            if chord.ctrl {
                state.on_key_press(Key::Ctrl)?;
            }
            if chord.shift {
                state.on_key_press(Key::Shift)?;
            }
            let pressed = state.on_key_press(chord.key);
            if chord.shift {
                state.on_key_release(Key::Shift);
            }
            if chord.ctrl {
                state.on_key_release(Key::Ctrl);
            }
            pressed?;
        }
        Step::Kind(kind) => state.set_kind(kind)?,
        Step::Stroke(color) => {
            let style = state.current_style();
            state.set_style(crate::draw::Style {
                stroke: *color,
                ..style
            })?;
        }
        Step::Fill(color) => {
            let style = state.current_style();
            state.set_style(crate::draw::Style {
                fill: *color,
                ..style
            })?;
        }
        Step::Width(width) => {
            let style = state.current_style();
            state.set_style(crate::draw::Style {
                stroke_width: *width,
                ..style
            })?;
        }
        Step::Action(action) => state.handle_action(*action)?,
        Step::Save(path) => {
            state.save_to(&resolve(base_dir, path), options)?;
            report.saves += 1;
        }
        Step::Load(path) => {
            let summary = state.load_from(&resolve(base_dir, path), options)?;
            report.loads += 1;
            report.skipped += summary.skipped;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::draw::{RecordingSurface, color};

    fn state() -> InputState {
        InputState::from_config(&Config::default(), Box::new(RecordingSurface::new()))
    }

    #[test]
    fn key_chords_parse_modifiers() {
        let chord = KeyChord::parse("Ctrl+Shift+Z").unwrap();
        assert!(chord.ctrl && chord.shift);
        assert_eq!(chord.key, Key::Char('z'));
        assert_eq!(KeyChord::parse("Escape").unwrap().key, Key::Escape);
        assert!(KeyChord::parse("Ctrl").is_err());
        assert!(KeyChord::parse("Ctrl+F13").is_err());
    }

    #[test]
    fn parse_skips_comments_and_keeps_hex_colors() {
        let script = Script::parse(
            "# header\n\nstroke #FF0000FF\nfill red # trailing\npress left 1 2\n",
        )
        .unwrap();
        let steps: Vec<&Step> = script.steps().collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], &Step::Stroke(color::BLUE));
        assert_eq!(steps[1], &Step::Fill(color::RED));
    }

    #[test]
    fn parse_errors_name_the_line() {
        let err = Script::parse("undo\npress left ten 3\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
        assert!(Script::parse("jump 1 2").is_err());
        assert!(Script::parse("move 1").is_err());
    }

    #[test]
    fn run_draws_polygon_and_rectangle() {
        let script = Script::parse(
            "kind Polygon\n\
             click 0 0\n\
             click 10 0\n\
             click 5 10\n\
             key Return\n\
             kind Rectangle\n\
             press left 20 20\n\
             move 30 30\n\
             release left 40 40\n\
             undo\n\
             redo\n",
        )
        .unwrap();
        let mut state = state();
        let temp = tempfile::tempdir().unwrap();
        let report = script
            .run(&mut state, &StorageOptions::default(), temp.path())
            .unwrap();
        assert_eq!(report.steps, 11);
        assert_eq!(state.canvas.len(), 2);
        assert_eq!(state.canvas.shapes()[0].vertices().len(), 3);
    }

    #[test]
    fn run_saves_relative_to_base_dir() {
        let temp = tempfile::tempdir().unwrap();
        let script = Script::parse(
            "width 4\nclick 0 0\npress left 0 0\nrelease left 8 8\nsave out.json\nclear\nload out.json\n",
        )
        .unwrap();
        let mut state = state();
        let report = script
            .run(&mut state, &StorageOptions::default(), temp.path())
            .unwrap();
        assert!(temp.path().join("out.json").exists());
        assert_eq!(report.saves, 1);
        assert_eq!(report.loads, 1);
        assert_eq!(state.canvas.len(), 2);
        assert_eq!(state.canvas.shapes()[1].stroke_width(), 4.0);
    }

    #[test]
    fn run_stops_at_failing_step() {
        let script = Script::parse("kind Hexagon\nclick 0 0\n").unwrap();
        let mut state = state();
        let err = script
            .run(&mut state, &StorageOptions::default(), Path::new("."))
            .unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));
        assert!(state.canvas.is_empty());
    }
}
