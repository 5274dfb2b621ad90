use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::thread;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command};
use crossbeam::channel;

use mandelgrid::util::image::Image;
use mandelgrid::{
    compute_dataset, CancellationToken, ColourMethod, ComplexNumber, ComplexRect, ComplexSize,
    ComputeOptions, FitPolicy, PixelSize, Progress,
};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    let index = s.find(separator)?;
    match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
        (Ok(l), Ok(r)) => Some((l, r)),
        _ => None,
    }
}

fn args() -> ArgMatches {
    Command::new("mandelgrid")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Concurrent tiled Mandelbrot set renderer")
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .takes_value(true)
                .value_name("FILE")
                .help("Output image file [default: output.png]"),
        )
        .arg(
            Arg::new("resolution")
                .long("resolution")
                .short('s')
                .takes_value(true)
                .value_name("WIDTHxHEIGHT")
                .help("Size of the output image [default: 1000x1000]"),
        )
        .arg(
            Arg::new("origin")
                .long("origin")
                .takes_value(true)
                .value_name("RE,IM")
                .help("Minimum corner of the crop [default: -2,-1.5]"),
        )
        .arg(
            Arg::new("plane-size")
                .long("plane-size")
                .takes_value(true)
                .value_name("W,H")
                .help("Extent of the crop on the complex plane [default: 3,3]"),
        )
        .arg(
            Arg::new("iterations")
                .long("iterations")
                .short('i')
                .takes_value(true)
                .value_name("N")
                .help("Iteration limit per point [default: 1000]"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .takes_value(true)
                .value_name("N")
                .help("Worker count [default: all logical cores]"),
        )
        .arg(
            Arg::new("fit")
                .long("fit")
                .short('f')
                .takes_value(true)
                .value_name("POLICY")
                .help("How the crop maps onto the grid: stretch, fill or fit [default: fill]"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('c')
                .takes_value(true)
                .value_name("FILE")
                .help("Settings file supplying defaults for the options above"),
        )
        .get_matches()
}

// Command line first, then the settings file, then the built-in default.
fn option_value(
    matches: &ArgMatches,
    settings: Option<&config::Config>,
    key: &str,
    default: &str,
) -> String {
    matches
        .get_one::<String>(key)
        .cloned()
        .or_else(|| settings.and_then(|s| s.get_string(key).ok()))
        .unwrap_or_else(|| default.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let matches = args();

    let settings = match matches.get_one::<String>("settings") {
        Some(path) => Some(
            config::Config::builder()
                .add_source(config::File::with_name(path))
                .build()
                .with_context(|| format!("could not read settings file {path}"))?,
        ),
        None => None,
    };
    let settings = settings.as_ref();

    let resolution = option_value(&matches, settings, "resolution", "1000x1000");
    let (width, height) = parse_pair::<usize>(&resolution, 'x')
        .ok_or_else(|| anyhow!("could not parse resolution {resolution:?}"))?;

    let origin = option_value(&matches, settings, "origin", "-2,-1.5");
    let (real, imaginary) = parse_pair::<f64>(&origin, ',')
        .ok_or_else(|| anyhow!("could not parse origin {origin:?}"))?;

    let plane_size = option_value(&matches, settings, "plane-size", "3,3");
    let (plane_width, plane_height) = parse_pair::<f64>(&plane_size, ',')
        .ok_or_else(|| anyhow!("could not parse plane size {plane_size:?}"))?;

    let iterations = option_value(&matches, settings, "iterations", "1000");
    let iteration_limit = iterations
        .parse::<u32>()
        .with_context(|| format!("could not parse iteration limit {iterations:?}"))?;

    let threads = option_value(&matches, settings, "threads", "");
    let threads = match threads.as_str() {
        "" => num_cpus::get(),
        other => other
            .parse::<usize>()
            .with_context(|| format!("could not parse thread count {other:?}"))?,
    };

    let fit = option_value(&matches, settings, "fit", "fill");
    let fit_policy = fit.parse::<FitPolicy>().map_err(|message| anyhow!(message))?;

    let output = option_value(&matches, settings, "output", "output.png");

    let crop = ComplexRect::new(
        ComplexNumber::new(real, imaginary),
        ComplexSize::new(plane_width, plane_height),
    );
    let options = ComputeOptions {
        resolution: PixelSize::new(width, height),
        iteration_limit,
        fit_policy,
        threads,
    };

    let (sender, receiver) = channel::unbounded::<Progress>();
    let printer = thread::spawn(move || {
        let mut last_percent = None;
        for progress in receiver.iter() {
            let fraction = progress.fraction_completed();
            if fraction.is_nan() {
                continue;
            }
            let percent = (fraction * 100.0).floor() as u64;
            if last_percent != Some(percent) {
                last_percent = Some(percent);
                print!("\r{:<14}{:>5}%", "Computing", percent);
                let _ = io::stdout().flush();
            }
        }
        println!();
    });

    let time = Instant::now();
    let dataset = compute_dataset(crop, &options, Some(sender), &CancellationToken::new())?;
    let _ = printer.join();
    println!("{:<14}{:>6} ms", "Computation", time.elapsed().as_millis());

    let time = Instant::now();
    let mut image = Image::new(width, height);
    ColourMethod::iteration().run(&dataset, &mut image);
    println!("{:<14}{:>6} ms", "Colouring", time.elapsed().as_millis());

    let time = Instant::now();
    image
        .save(Path::new(&output))
        .with_context(|| format!("could not save {output}"))?;
    println!("{:<14}{:>6} ms", "Saving", time.elapsed().as_millis());

    Ok(())
}
