//! WuWa launcher console entry point.
//!
//! Drives the launcher shell from line commands, either typed at a terminal
//! or read from a script with `--script FILE`. State changes are printed as
//! they are published. Type `help` for the command list.

mod input;
mod render;

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use input::{Console, InputResult, parse_command};
use render::ConsoleObserver;
use wuwa_core::ApplicationController;
use wuwa_core::geometry::{WindowGeometry, WindowPosition};
use wuwa_core::paths::AppPaths;
use wuwa_core::platform::DesktopPlatform;
use wuwa_core::settings::ShellSettings;

const USAGE: &str = "usage: wuwa-launcher [--script FILE]";

/// Where commands come from.
enum Source {
    Interactive,
    Script(PathBuf),
}

fn parse_args() -> Result<Option<Source>> {
    let mut args = std::env::args().skip(1);
    let mut source = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--script" => {
                let path = args.next().context("--script needs a file")?;
                source = Some(Source::Script(PathBuf::from(path)));
            },
            other => bail!("unexpected argument `{other}`\n{USAGE}"),
        }
    }
    match source {
        Some(source) => Ok(Some(source)),
        None if io::stdin().is_terminal() => Ok(Some(Source::Interactive)),
        None => bail!("no terminal attached; pass --script FILE\n{USAGE}"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(source) = parse_args()? else {
        println!("{USAGE}\n\n{}", input::HELP);
        return Ok(());
    };

    let paths = AppPaths::discover().context("cannot locate the application directory")?;
    let settings = ShellSettings::load(&paths.settings_file());
    let window = WindowGeometry {
        size: settings.window.size(),
        position: WindowPosition::new(0, 0),
    };
    log::info!(
        "Starting {} ({}x{})",
        settings.window.title,
        window.size.width,
        window.size.height
    );

    let mut app = ApplicationController::new(paths, settings, window, DesktopPlatform::new());
    let restored = app.restored_geometry();
    let size = restored.size.unwrap_or(window.size);
    println!(
        "window: {}x{} at ({}, {})",
        size.width, size.height, restored.position.x, restored.position.y
    );
    app.subscribe(Box::new(ConsoleObserver::new()));

    let mut console = Console::new(app);
    let interactive = matches!(source, Source::Interactive);
    let reader: Box<dyn BufRead> = match source {
        Source::Interactive => Box::new(io::stdin().lock()),
        Source::Script(path) => {
            let file = File::open(&path)
                .with_context(|| format!("cannot open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        },
    };

    run(&mut console, reader, interactive)?;
    log::debug!("Session ended at {} ms", console.now_ms());
    console.app_mut().shutdown();
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

/// Read commands until `quit` or end of input.
fn run(console: &mut Console, reader: Box<dyn BufRead>, interactive: bool) -> Result<()> {
    if interactive {
        prompt()?;
    }
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if !interactive && !line.trim().is_empty() {
            println!("> {}", line.trim());
        }
        match parse_command(&line) {
            Ok(Some(command)) => {
                if console.handle(command) == InputResult::Quit {
                    return Ok(());
                }
            },
            Ok(None) => {},
            Err(e) if interactive => println!("{e:#}"),
            Err(e) => println!("line {}: {e:#}", number + 1),
        }
        if interactive {
            prompt()?;
        }
    }
    Ok(())
}
