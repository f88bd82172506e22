//! Console command parsing and dispatch.
//!
//! Each line maps onto either a platform-agnostic [`InputEvent`] or a direct
//! controller operation. Time is virtual: it only advances through `wait`,
//! one animation frame at a time, so scripts replay identically.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use wuwa_core::ApplicationController;
use wuwa_core::i18n::normalize_code;
use wuwa_core::input::InputEvent;
use wuwa_core::navigation::ScreenId;
use wuwa_core::platform::DesktopPlatform;

/// Length of one animation frame in milliseconds.
pub const FRAME_MS: u64 = 16;

pub const HELP: &str = "\
commands:
  enter | leave            pointer enters / leaves the sidebar
  hover X Y                pointer moved to (X, Y)
  click X Y                click at (X, Y)
  select SCREEN            home | library | store | settings
  lang CODE|NAME           switch language (pl_PL, en_US or a display name)
  dir PATH                 set the game directory
  pick-dir                 choose the game directory with the native picker
  bg PATH                  install a background image
  pick-bg                  choose a background with the native picker
  play                     launch the game
  resize W H | move X Y    window geometry changed
  wait MS                  let MS milliseconds of animation pass
  state                    print the whole shell state
  help | quit";

/// Result of handling a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(InputEvent),
    Wait(u64),
    Select(ScreenId),
    Language(String),
    Directory(PathBuf),
    PickDirectory,
    Background(PathBuf),
    PickBackground,
    Play,
    State,
    Help,
}

fn int_arg(args: &[&str], index: usize, usage: &str) -> Result<i32> {
    let raw = args.get(index).with_context(|| format!("usage: {usage}"))?;
    raw.parse()
        .with_context(|| format!("`{raw}` is not a number (usage: {usage})"))
}

fn two_ints(args: &[&str], usage: &str) -> Result<(i32, i32)> {
    if args.len() != 2 {
        bail!("usage: {usage}");
    }
    Ok((int_arg(args, 0, usage)?, int_arg(args, 1, usage)?))
}

fn rest(line: &str, cmd: &str, usage: &str) -> Result<String> {
    let value = line.trim_start()[cmd.len()..].trim();
    if value.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(value.to_string())
}

/// Parse one console line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let mut words = trimmed.split_whitespace();
    let cmd = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let command = match cmd.to_ascii_lowercase().as_str() {
        "enter" => Command::Event(InputEvent::PointerEnter),
        "leave" => Command::Event(InputEvent::PointerLeave),
        "hover" => {
            let (x, y) = two_ints(&args, "hover X Y")?;
            Command::Event(InputEvent::CursorMove { x, y })
        },
        "click" => {
            let (x, y) = two_ints(&args, "click X Y")?;
            Command::Event(InputEvent::PointerClick { x, y })
        },
        "resize" => {
            let (width, height) = two_ints(&args, "resize W H")?;
            Command::Event(InputEvent::WindowResized { width, height })
        },
        "move" => {
            let (x, y) = two_ints(&args, "move X Y")?;
            Command::Event(InputEvent::WindowMoved { x, y })
        },
        "wait" => {
            let ms = int_arg(&args, 0, "wait MS")?;
            let ms = u64::try_from(ms).context("wait needs a non-negative duration")?;
            Command::Wait(ms)
        },
        "select" => {
            let name = args.first().copied().unwrap_or_default();
            let screen = ScreenId::from_name(name).with_context(|| {
                format!("unknown screen `{name}` (home, library, store, settings)")
            })?;
            Command::Select(screen)
        },
        "lang" => Command::Language(rest(trimmed, cmd, "lang CODE|NAME")?),
        "dir" => Command::Directory(PathBuf::from(rest(trimmed, cmd, "dir PATH")?)),
        "bg" => Command::Background(PathBuf::from(rest(trimmed, cmd, "bg PATH")?)),
        "pick-dir" => Command::PickDirectory,
        "pick-bg" => Command::PickBackground,
        "play" => Command::Play,
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Event(InputEvent::Quit),
        other => bail!("unknown command `{other}` (try `help`)"),
    };
    Ok(Some(command))
}

/// Drives a controller from parsed commands with a virtual clock.
pub struct Console {
    app: ApplicationController<DesktopPlatform>,
    now_ms: u64,
}

impl Console {
    pub fn new(app: ApplicationController<DesktopPlatform>) -> Self {
        Self { app, now_ms: 0 }
    }

    pub fn app_mut(&mut self) -> &mut ApplicationController<DesktopPlatform> {
        &mut self.app
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Handle one command, then print any popups it raised.
    pub fn handle(&mut self, command: Command) -> InputResult {
        let result = self.dispatch(command);
        for message in self.app.platform_mut().take_messages() {
            println!("[popup] {}: {}", message.title, message.body);
        }
        result
    }

    fn dispatch(&mut self, command: Command) -> InputResult {
        match command {
            Command::Event(event) => return self.handle_event(&event),
            Command::Wait(ms) => {
                let end = self.now_ms + ms;
                while self.now_ms < end {
                    let now_ms = (self.now_ms + FRAME_MS).min(end);
                    self.handle_event(&InputEvent::Tick { now_ms });
                }
            },
            Command::Select(screen) => self.app.select_screen(screen),
            Command::Language(wanted) => {
                let known_display = self.app.localizer().code_for_display(&wanted).is_some();
                if known_display {
                    self.app.select_language_display(&wanted);
                } else {
                    if normalize_code(&wanted).is_none() {
                        println!("unknown language `{wanted}`, using the fallback");
                    }
                    self.app.set_language(&wanted);
                }
            },
            Command::Directory(path) => self.app.set_game_directory(&path),
            Command::PickDirectory => self.app.choose_game_directory(),
            Command::Background(path) => {
                self.app.set_background_image(&path);
            },
            Command::PickBackground => self.app.choose_background(),
            Command::Play => {
                if self.app.play() {
                    println!("game started");
                }
            },
            Command::State => {
                for line in crate::render::describe_state(&self.app.presentation()) {
                    println!("{line}");
                }
            },
            Command::Help => println!("{HELP}"),
        }
        InputResult::Continue
    }

    fn handle_event(&mut self, event: &InputEvent) -> InputResult {
        let now_ms = self.now_ms;
        match *event {
            InputEvent::CursorMove { x, y } => self.app.pointer_moved(x as f32, y as f32, now_ms),
            InputEvent::PointerEnter => self.app.pointer_enter(now_ms),
            InputEvent::PointerLeave => self.app.pointer_leave(now_ms),
            InputEvent::PointerClick { x, y } => {
                self.app.pointer_moved(x as f32, y as f32, now_ms);
                if self.app.pointer_clicked(x as f32, y as f32).is_none() {
                    log::debug!("Click at ({x}, {y}) hit nothing");
                }
            },
            InputEvent::WindowResized { width, height } => self.app.window_resized(width, height),
            InputEvent::WindowMoved { x, y } => self.app.window_moved(x, y),
            InputEvent::Tick { now_ms } => {
                self.now_ms = now_ms;
                self.app.tick(now_ms);
            },
            InputEvent::Quit => return InputResult::Quit,
        }
        if event.is_window_event() {
            let config = self.app.config();
            println!(
                "window: {}x{} at ({}, {})",
                config.window_size.width,
                config.window_size.height,
                config.window_position.x,
                config.window_position.y
            );
        }
        InputResult::Continue
    }
}
