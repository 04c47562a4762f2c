use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

use trailstat::units::{Feet, Kilometers, Meters, Miles};
use trailstat::{TrackSummary, TripStatistics};

#[derive(Debug, StructOpt)]
struct Args {
    /// Print results as JSON, one object per line.
    #[structopt(long)]
    json: bool,

    /// Show distance in miles and elevation in feet.
    #[structopt(long)]
    imperial: bool,

    /// Also show statistics for each track separately.
    #[structopt(long)]
    per_track: bool,

    /// Log more (repeat for more detail). RUST_LOG overrides this.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// GPX files to analyze; `-` reads standard input.
    #[structopt(parse(from_os_str), required = true)]
    input_paths: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    input: &'a Path,
    #[serde(flatten)]
    stats: TripStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracks: Option<Vec<TrackSummary>>,
}

fn main() -> Result<()> {
    let args = Args::from_args();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut failed = 0;
    for path in &args.input_paths {
        if let Err(e) = process(&args, path) {
            eprintln!("{:?}: {:#}", path, e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} files could not be analyzed", failed, args.input_paths.len());
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = vec![];
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read GPX from stdin")?;
        Ok(buf)
    } else {
        fs::read(path).context("failed to read GPX file")
    }
}

fn process(args: &Args, path: &Path) -> Result<()> {
    let input = read_input(path)?;

    let stats = trailstat::analyze_bytes(&input).context("failed to analyze GPX")?;
    let tracks = if args.per_track {
        // analyze_bytes already checked the encoding.
        let text = String::from_utf8_lossy(&input);
        Some(trailstat::analyze_tracks(&text).context("failed to analyze GPX tracks")?)
    } else {
        None
    };

    if args.json {
        let report = Report { input: path, stats, tracks };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("input: {:?}", path);
    print_stats(args, "  ", &stats);
    for (tnum, track) in tracks.iter().flatten().enumerate() {
        println!(
            "  track {}: {} ({} segments, {} points)",
            tnum + 1,
            track.name.as_deref().unwrap_or("<unnamed>"),
            track.segments,
            track.points,
        );
        print_stats(args, "    ", &track.stats);
    }
    Ok(())
}

fn print_stats(args: &Args, indent: &str, stats: &TripStatistics) {
    let distance = Meters(stats.distance_km * 1000.);
    let gain = Meters(stats.elevation_gain as f64);
    if args.imperial {
        println!("{}distance: {}", indent, Miles(distance));
        println!("{}elevation gain: {}", indent, Feet(gain));
    } else {
        println!("{}distance: {}", indent, Kilometers::from(distance));
        println!("{}elevation gain: {}", indent, gain);
    }
    println!("{}duration: {}", indent, fmt_duration(stats.duration_minutes));
    println!("{}estimated calories: {} kcal", indent, stats.calories_burned);
}

fn fmt_duration(minutes: u64) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
