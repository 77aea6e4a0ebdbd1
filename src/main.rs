use clap::{value_t, App, Arg, ArgMatches};
#[cfg(feature = "imageproc")]
use clap::values_t;

use std::path::{Path, PathBuf};
use std::process;

use pixelsort::{Criterion, Mask, SelectionRange, SortError, SortOptions};

fn main() {
    let matches = app().get_matches();

    let filter = if matches.is_present("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(err) = run(&matches) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn app() -> App<'static, 'static> {
    let app = App::new("pixelsort")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .arg(
            Arg::with_name("input")
                .help("The input image to sort.")
                .required(true)
                .takes_value(true),
        )
        .args(&[
            arg_output(),
            arg_mask(),
            arg_upper(),
            arg_lower(),
            arg_angle(),
            arg_sorting(),
            arg_reverse(),
            arg_verbose(),
        ]);
    #[cfg(feature = "imageproc")]
    let app = app.arg(arg_edges());
    app
}

fn run(matches: &ArgMatches<'_>) -> Result<(), SortError> {
    let input = Path::new(matches.value_of_os("input").unwrap_or_default());
    let image = image::open(input)?.to_rgba8();
    let output = matches
        .value_of_os("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let extension = input
                .extension()
                .and_then(std::ffi::OsStr::to_str)
                .unwrap_or("png");
            input.with_extension(["sorted", ".", extension].concat())
        });

    let options = options_from(matches);
    log::debug!("{:?}", options);

    let mask = match matches.value_of_os("mask") {
        Some(mask_path) => Some(Mask::from_gray(&image::open(mask_path)?.to_luma8())),
        None => None,
    };
    #[cfg(feature = "imageproc")]
    let mask = with_edges(matches, &image, mask);

    let sorted = pixelsort::sort_image(&image, &options, mask.as_ref())?;
    sorted.save(&output)?;
    log::debug!("wrote {}", output.display());
    Ok(())
}

fn options_from(matches: &ArgMatches<'_>) -> SortOptions {
    let criterion = value_t!(matches, "sorting", Criterion).unwrap_or_else(|e| e.exit());
    let lower = value_t!(matches, "lower", f64).unwrap_or_else(|e| e.exit());
    let upper = value_t!(matches, "upper", f64).unwrap_or_else(|e| e.exit());
    let angle = value_t!(matches, "angle", f64).unwrap_or_else(|e| e.exit());
    SortOptions {
        criterion,
        selection: SelectionRange::from_percent(lower, upper),
        // the command line takes angles counter-clockwise on screen, rows grow
        // downwards in the buffer
        angle: (360.0 - angle).rem_euclid(360.0),
        reverse: matches.is_present("reverse"),
    }
}

#[cfg(feature = "imageproc")]
fn with_edges(
    matches: &ArgMatches<'_>,
    image: &image::RgbaImage,
    mask: Option<Mask>,
) -> Option<Mask> {
    let (low, high) = match edge_thresholds(matches) {
        Some(thresholds) => thresholds,
        None => return mask,
    };
    let edges = pixelsort::mask::edges_canny(image, low, high);
    Some(match mask {
        Some(mut mask) => {
            mask.intersect(&edges);
            mask
        }
        None => edges,
    })
}

#[cfg(feature = "imageproc")]
fn edge_thresholds(matches: &ArgMatches<'_>) -> Option<(f32, f32)> {
    if !matches.is_present("edges") {
        return None;
    }
    let thresholds = values_t!(matches, "edges", f32).unwrap_or_else(|e| e.exit());
    // clap enforces exactly two values
    Some((thresholds[0], thresholds[1]))
}

fn is_number(value: String) -> Result<(), String> {
    value
        .parse::<f64>()
        .map(|_| ())
        .map_err(|_| format!("`{}` is not a number", value))
}

fn arg_sorting() -> Arg<'static, 'static> {
    Arg::with_name("sorting")
        .short("s")
        .long("sorting")
        .help("The criterion to sort pixels by.")
        .long_help(
            "The criterion to sort pixels by.\n\
                \n\
                Each pixel is reduced to a value between 0 and 255 by this criterion, \
                pixels are then ordered by that value and only pixels whose value lies \
                between the lower and upper threshold are sorted.",
        )
        .possible_values(&[
            "red",
            "green",
            "blue",
            "average",
            "minimum",
            "maximum",
            "value",
            "chroma",
            "hue",
            "saturation",
            "saturation-hsl",
            "lightness",
            "luma",
        ])
        .default_value("lightness")
        .takes_value(true)
}

fn arg_angle() -> Arg<'static, 'static> {
    Arg::with_name("angle")
        .short("a")
        .long("angle")
        .help("The angle in degrees of the lines pixels are sorted along.")
        .long_help(
            "The angle in degrees of the lines pixels are sorted along.\n\
                \n\
                0 sorts rows from left to right, angles grow counter-clockwise, so 90 \
                sorts columns from bottom to top. Any angle is accepted.",
        )
        .default_value("0")
        .allow_hyphen_values(true)
        .validator(is_number)
        .takes_value(true)
}

fn arg_upper() -> Arg<'static, 'static> {
    Arg::with_name("upper")
        .short("u")
        .long("upper")
        .help("The upper threshold in percent a pixel's value may not exceed to be sorted.")
        .default_value("100")
        .validator(is_number)
        .takes_value(true)
}

fn arg_lower() -> Arg<'static, 'static> {
    Arg::with_name("lower")
        .short("l")
        .long("lower")
        .help("The lower threshold in percent a pixel's value has to reach to be sorted.")
        .default_value("0")
        .validator(is_number)
        .takes_value(true)
}

fn arg_reverse() -> Arg<'static, 'static> {
    Arg::with_name("reverse")
        .short("r")
        .long("reverse")
        .help("Sort from the highest to the lowest value.")
}

fn arg_mask() -> Arg<'static, 'static> {
    Arg::with_name("mask")
        .short("m")
        .long("mask")
        .help("A file path to a gray image to mask parts of the input image.")
        .long_help(
            "A file path to a gray image to mask parts of the input image.\n\
             White pixels may be sorted, black pixels may not.",
        )
        .takes_value(true)
}

#[cfg(feature = "imageproc")]
fn arg_edges() -> Arg<'static, 'static> {
    Arg::with_name("edges")
        .short("e")
        .long("edges")
        .help("Stop bands at edges found with the given low and high Canny thresholds.")
        .long_help(
            "Stop bands at edges found with the given low and high Canny thresholds.\n\
                \n\
                Thresholds lie in the range of [0.0;1140.39).",
        )
        .number_of_values(2)
        .value_names(&["low", "high"])
        .validator(is_number)
        .takes_value(true)
}

fn arg_output() -> Arg<'static, 'static> {
    Arg::with_name("output")
        .short("o")
        .long("output")
        .help("A file path to save the output image to.")
        .takes_value(true)
}

fn arg_verbose() -> Arg<'static, 'static> {
    Arg::with_name("verbose")
        .short("v")
        .long("verbose")
        .help("Log what the sorter is doing.")
}
