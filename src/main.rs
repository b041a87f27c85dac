// SPDX-License-Identifier: MPL-2.0
//! Headless shell driving a presentation from line commands on stdin.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use storydeck::audio::{format_clock, AutoplayPolicy, SimulatedResource};
use storydeck::celebration::ChannelEmitter;
use storydeck::config::{self, Config, DEFAULT_SIMULATED_TRACK_SECS};
use storydeck::error::{Error, Result};
use storydeck::interaction::InteractionView;
use storydeck::presentation::Presentation;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  next | prev | jump N     navigate
  play                     toggle audio
  track N | seek F         switch track / seek to fraction 0..1
  hold | release           press or release the hold gesture
  reveal                   open the reveal
  tap | pick N             cycle or select stepper entries
  status | help | quit";

struct Flags {
    config: Option<PathBuf>,
    autoplay_allowed: bool,
    track_secs: f64,
    verbose: bool,
}

fn parse_flags() -> Result<Flags> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        autoplay_allowed: args.contains("--autoplay-allowed"),
        verbose: args.contains(["-v", "--verbose"]),
        config: args
            .opt_value_from_str("--config")
            .map_err(|e| Error::Config(e.to_string()))?,
        track_secs: args
            .opt_value_from_str("--track-secs")
            .map_err(|e| Error::Config(e.to_string()))?
            .unwrap_or(DEFAULT_SIMULATED_TRACK_SECS),
    };
    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("ignoring unexpected arguments: {:?}", rest);
    }
    Ok(flags)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Next,
    Prev,
    Jump(isize),
    Play,
    Track(usize),
    Seek(f64),
    Hold,
    Release,
    Reveal,
    Tap,
    Pick(usize),
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match (words.next()?, words.next()) {
        ("next", None) => Command::Next,
        ("prev", None) => Command::Prev,
        ("jump", Some(n)) => Command::Jump(n.parse().ok()?),
        ("play", None) => Command::Play,
        ("track", Some(n)) => Command::Track(n.parse().ok()?),
        ("seek", Some(f)) => Command::Seek(f.parse().ok()?),
        ("hold", None) => Command::Hold,
        ("release", None) => Command::Release,
        ("reveal", None) => Command::Reveal,
        ("tap", None) => Command::Tap,
        ("pick", Some(n)) => Command::Pick(n.parse().ok()?),
        ("status", None) => Command::Status,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        _ => return None,
    };
    words.next().is_none().then_some(command)
}

/// One read from stdin.
#[derive(Debug, PartialEq)]
enum Input {
    Line(String),
    /// Unreadable line, already consumed.
    Skip,
    Eof,
}

/// Classifies a read result. Lines that are not valid UTF-8 are skipped;
/// other read errors end the shell.
fn classify_read(read: io::Result<Option<String>>) -> Result<Input> {
    match read {
        Ok(Some(line)) => Ok(Input::Line(line)),
        Ok(None) => Ok(Input::Eof),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            log::warn!("skipping unreadable input line: {}", err);
            Ok(Input::Skip)
        }
        Err(err) => Err(err.into()),
    }
}

type Shell = Presentation<SimulatedResource, ChannelEmitter>;

fn print_status(shell: &Shell) {
    let view = shell.view();
    let markers: String = shell
        .markers()
        .iter()
        .map(|m| match (m.current, m.visited) {
            (true, _) => '@',
            (false, true) => '#',
            (false, false) => '.',
        })
        .collect();
    let interaction = match view.interaction {
        Some(InteractionView::Hold { progress, status }) => {
            format!(" hold {:?} {}%", status, progress)
        }
        Some(InteractionView::Reveal { status }) => format!(" reveal {:?}", status),
        Some(InteractionView::Stepper { index, len }) => {
            format!(" stepper {}/{}", index + 1, len)
        }
        None => String::new(),
    };
    println!(
        "[{}] slide {}/{} {} ({}){}",
        markers,
        view.index + 1,
        view.total,
        view.key,
        view.renderer,
        interaction
    );

    let audio = shell.audio_snapshot();
    println!(
        "audio {} #{} \"{}\" by {} {} / {}",
        if audio.playing { "playing" } else { "paused" },
        audio.track_index,
        audio.title,
        audio.artist,
        format_clock(audio.current_time),
        format_clock(audio.duration)
    );
}

/// Applies one command. Returns `false` when the shell should exit.
fn run_command(shell: &mut Shell, command: Command) -> bool {
    match command {
        Command::Next => {
            shell.next();
        }
        Command::Prev => {
            shell.prev();
        }
        Command::Jump(target) => {
            shell.jump_to(target);
        }
        Command::Play => shell.toggle_audio(),
        Command::Track(index) => {
            shell.switch_track(index);
        }
        Command::Seek(fraction) => {
            shell.seek_to_fraction(fraction);
        }
        Command::Hold => {
            shell.press();
        }
        Command::Release => {
            shell.release();
        }
        Command::Reveal => {
            shell.reveal();
        }
        Command::Tap => {
            shell.tap();
        }
        Command::Pick(index) => {
            shell.pick(index);
        }
        Command::Status => {}
        Command::Help => {
            println!("{}", HELP);
            return true;
        }
        Command::Quit => return false,
    }
    print_status(shell);
    true
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let flags = parse_flags()?;
    let filter = if flags.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load().unwrap_or_else(|err| {
            log::warn!("using default configuration: {}", err);
            Config::default()
        }),
    };

    let policy = if flags.autoplay_allowed {
        AutoplayPolicy::Allowed
    } else {
        AutoplayPolicy::RequiresGesture
    };
    let resource = SimulatedResource::new(policy).with_track_secs(flags.track_secs);
    let (emitter, mut bursts) = ChannelEmitter::new();
    let mut shell = Presentation::from_config(&config, resource, emitter)?;

    println!("{}", HELP);
    print_status(&shell);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(Duration::from_secs(1));
    let mut last_second = None;

    loop {
        tokio::select! {
            read = lines.next_line() => {
                let line = match classify_read(read)? {
                    Input::Line(line) => line,
                    Input::Skip => {
                        println!("unreadable input ignored");
                        continue;
                    }
                    Input::Eof => break,
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(command) => {
                        shell.drain_messages();
                        if !run_command(&mut shell, command) {
                            break;
                        }
                    }
                    None => println!("unknown command: {}", line.trim()),
                }
            }
            message = shell.next_message() => {
                if let Some(message) = message {
                    shell.update(message);
                }
            }
            Some(burst) = bursts.recv() => {
                println!(
                    "*** {:?} burst: {} particles ***",
                    burst.kind,
                    burst.intensity.particles()
                );
            }
            _ = clock.tick() => {
                let audio = shell.audio_snapshot();
                let second = audio.current_time.floor() as u64;
                if audio.playing && last_second != Some(second) {
                    last_second = Some(second);
                    println!("  {} / {}", format_clock(audio.current_time), format_clock(audio.duration));
                }
            }
        }
    }
    Ok(())
}
