//! Volcano runner.
//!
//! Usage: `volcano [CONFIG.json] [--frames N] [--out DIR] [--every K] [--headless]`
//!
//! With the `window` feature the simulation opens in a window unless
//! `--headless` is given. Headless runs simulate `N` frames as fast as
//! possible and write every `K`-th frame into `DIR` as a PNG.

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};
use volcano::{Canvas, Eruptor, FrameClock, FrameDriver, FrameRecorder, SimulationConfig};

const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_EVERY: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    frames: u64,
    out: PathBuf,
    every: u64,
    headless: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            frames: DEFAULT_FRAMES,
            out: PathBuf::from("frames"),
            every: DEFAULT_EVERY,
            headless: !cfg!(feature = "window"),
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => options.frames = parse_value(arg, iter.next())?,
            "--every" => options.every = parse_value(arg, iter.next())?,
            "--out" => {
                options.out = iter
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| format!("{} needs a value", arg))?
            }
            "--headless" => options.headless = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            path if options.config.is_none() => options.config = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {}", extra)),
        }
    }
    Ok(options)
}

fn parse_value(flag: &str, value: Option<&String>) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} expects a non-negative integer, got {}", flag, value))
}

fn load_config(options: &Options) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    match &options.config {
        Some(path) => {
            let config = SimulationConfig::load(path)?;
            info!("loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            info!("using default config");
            Ok(SimulationConfig::default())
        }
    }
}

fn run_headless(config: &SimulationConfig, options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = FrameDriver::from_config(config)?;
    let recorder = FrameRecorder::new(&options.out, options.every)?;
    let mut canvas = Canvas::for_planet(driver.planet());
    let mut clock = FrameClock::unlimited();

    let mut spawned = 0;
    for _ in 0..options.frames {
        let stats = driver.advance();
        spawned += stats.spawned;
        clock.update();

        canvas.draw(driver.planet());
        recorder.record(stats.frame, &canvas)?;
    }

    info!(
        "simulated {} frames at {:.0} fps: {} particles spawned, {} still live",
        driver.frame(),
        clock.fps(),
        spawned,
        driver.planet().eruptor().particles().len()
    );
    Ok(())
}

#[cfg(feature = "window")]
fn run_windowed(config: &SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    let driver = FrameDriver::from_config(config)?;
    volcano::window::run(driver, config.fps)?;
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_windowed(_config: &SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    Err("built without the `window` feature; use --headless".into())
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(options)?;
    if options.headless {
        run_headless(&config, options)
    } else {
        run_windowed(&config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            error!("{}", msg);
            eprintln!("usage: volcano [CONFIG.json] [--frames N] [--out DIR] [--every K] [--headless]");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options.config, None);
        assert_eq!(options.frames, DEFAULT_FRAMES);
        assert_eq!(options.every, DEFAULT_EVERY);
    }

    #[test]
    fn test_full_command_line() {
        let options = parse_args(&args(&[
            "scene.json", "--frames", "120", "--out", "shots", "--every", "10", "--headless",
        ]))
        .unwrap();
        assert_eq!(options.config, Some(PathBuf::from("scene.json")));
        assert_eq!(options.frames, 120);
        assert_eq!(options.out, PathBuf::from("shots"));
        assert_eq!(options.every, 10);
        assert!(options.headless);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&args(&["--frames"])).is_err());
        assert!(parse_args(&args(&["--frames", "-3"])).is_err());
        assert!(parse_args(&args(&["--fast"])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
    }
}
