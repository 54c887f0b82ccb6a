use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
    str::FromStr,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use trigrid::{
    render::svg::grid_to_svg, timed, GridConfig, GridGeometry, Picker, Point2,
    TriangleGrid, Viewport,
};
use validator::Validate;

/// CLI for rendering and hit-testing triangle grids via Trigrid.
#[derive(Debug, StructOpt)]
#[structopt(name = "trigrid")]
struct Opt {
    /// Path to a config file that defines the grid, its geometry and the
    /// canvas it's drawn on. Supported formats: JSON, TOML. If omitted, the
    /// default config is used
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// If given, output files will be saved to this directory. The exact
    /// files that appear in the directory are defined by the output formats.
    /// See `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the grid in. Supported formats:
    ///
    /// cfg - The full config object used for the grid, in TOML format
    ///
    /// svg - 2D rendering of the grid, with selected features highlighted
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// Canvas position to select, as `X,Y` in pixels from the top-left
    /// corner. Can be given multiple times. Each selection is printed to
    /// stdout as a line of JSON
    #[structopt(long)]
    select: Vec<PointArg>,

    /// Pan the camera so that this position is in the center of the canvas,
    /// as `X,Y` in unpanned grid pixels. By default the origin vertex is in
    /// the center
    #[structopt(long)]
    pan: Option<PointArg>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the full config in a human-readable file
    Cfg,
    /// Render the grid as a 2D SVG
    Svg,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Svg => "svg",
        }
    }
}

/// A 2D position passed on the command line, as `X,Y`
#[derive(Copy, Clone, Debug)]
struct PointArg(Point2);

impl FromStr for PointArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("expected X,Y but got {:?}", s))?;
        let x = x.trim().parse().context("invalid X")?;
        let y = y.trim().parse().context("invalid Y")?;
        Ok(Self(Point2::new(x, y)))
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<GridConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate an output form of the grid in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    config: &GridConfig,
    grid: &TriangleGrid<bool>,
    geometry: &GridGeometry,
    viewport: &Viewport,
) -> anyhow::Result<()> {
    let output_file_path = output_dir
        .join("grid")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = match output_format {
                OutputFormat::Cfg => toml::to_string_pretty(config)
                    .context("error serializing config")?
                    .into_bytes(),
                OutputFormat::Svg => {
                    grid_to_svg(grid, geometry, viewport, &config.selection)
                        .to_string()
                        .into_bytes()
                }
            };
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => {
            let config = load_config(config_path)?;
            info!("Loaded config from {:?}", config_path);
            config
        }
        None => GridConfig::default(),
    };
    config.validate().context("invalid config")?;

    let mut grid = TriangleGrid::from_size(config.size, |_| false)?;
    let geometry = GridGeometry::from_config(config.geometry)?;
    let mut viewport = Viewport::new(config.canvas)?;
    if let Some(PointArg(pan)) = opt.pan {
        viewport.pan_to(&geometry, pan.x, pan.y);
    }

    // Select each requested point, and mark it so it shows up in renders
    let picker = Picker::new(geometry, config.selection)?;
    for PointArg(pointer) in opt.select {
        let pick = picker.pick(&grid, viewport.to_grid(&geometry, pointer));
        println!("{}", serde_json::to_string(&pick)?);
        if let Some(data) = pick.selection.and_then(|f| grid.get_mut(f)) {
            *data = true;
        }
    }

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(&output_dir)?;

        for output_format in opt.output_formats {
            gen_output(
                &output_dir,
                output_format,
                &config,
                &grid,
                &geometry,
                &viewport,
            )?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let PointArg(point) = "12.5, -3".parse().unwrap();
        assert_eq!(point, Point2::new(12.5, -3.0));
        assert!("12.5".parse::<PointArg>().is_err());
        assert!("a,b".parse::<PointArg>().is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert!(matches!("svg".parse(), Ok(OutputFormat::Svg)));
        assert!(matches!("cfg".parse(), Ok(OutputFormat::Cfg)));
        assert!("stl".parse::<OutputFormat>().is_err());
    }
}
