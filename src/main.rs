use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use tracefinity::designer::{combined_bounds, simplify, smooth_ring, smoothing_epsilon};
use tracefinity::{
    init_logging, render_bin_svg, BinData, Fingerprint, SettingsManager, SmoothingTable, Tool,
    BUILD_DATE, VERSION,
};

const USAGE: &str = "\
Usage:
  tracefinity render <bin.json> [-o <out.svg>]
  tracefinity inspect <bin.json>
  tracefinity simplify <tool.json> --level <0..1>
  tracefinity settings
  tracefinity --version";

#[derive(Debug, PartialEq)]
enum Command {
    Render { input: PathBuf, output: Option<PathBuf> },
    Inspect { input: PathBuf },
    Simplify { input: PathBuf, level: f64 },
    Settings,
    Version,
    Help,
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        match name.as_str() {
            "render" => {
                let mut input = None;
                let mut output = None;
                let mut iter = rest.iter();
                while let Some(arg) = iter.next() {
                    match arg.as_str() {
                        "-o" | "--output" => {
                            let path = iter.next().context("missing value for --output")?;
                            output = Some(PathBuf::from(path));
                        }
                        _ if input.is_none() => input = Some(PathBuf::from(arg)),
                        other => bail!("unexpected argument '{}'", other),
                    }
                }
                let input = input.context("render needs a bin file")?;
                Ok(Command::Render { input, output })
            }
            "inspect" => match rest {
                [input] => Ok(Command::Inspect {
                    input: PathBuf::from(input),
                }),
                _ => bail!("inspect takes exactly one bin file"),
            },
            "simplify" => {
                let mut input = None;
                let mut level = None;
                let mut iter = rest.iter();
                while let Some(arg) = iter.next() {
                    match arg.as_str() {
                        "--level" | "-l" => {
                            let value = iter.next().context("missing value for --level")?;
                            let value: f64 = value
                                .parse()
                                .with_context(|| format!("invalid level '{}'", value))?;
                            if !(0.0..=1.0).contains(&value) {
                                bail!("level must be between 0 and 1");
                            }
                            level = Some(value);
                        }
                        _ if input.is_none() => input = Some(PathBuf::from(arg)),
                        other => bail!("unexpected argument '{}'", other),
                    }
                }
                Ok(Command::Simplify {
                    input: input.context("simplify needs a tool file")?,
                    level: level.context("simplify needs --level")?,
                })
            }
            "settings" => Ok(Command::Settings),
            "-V" | "--version" => Ok(Command::Version),
            "-h" | "--help" | "help" => Ok(Command::Help),
            other => bail!("unknown command '{}'\n\n{}", other, USAGE),
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn render(input: &Path, output: Option<&Path>) -> Result<()> {
    let bin: BinData = read_json(input)?;
    let svg = render_bin_svg(&bin, &SmoothingTable::new());
    match output {
        Some(path) => {
            std::fs::write(path, &svg).with_context(|| format!("writing {}", path.display()))?;
            info!("Rendered {} to {}", bin.id, path.display());
        }
        None => println!("{}", svg),
    }
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let bin: BinData = read_json(input)?;
    let config = &bin.bin_config;
    let fingerprint = Fingerprint::compute(
        config,
        &bin.placed_tools,
        &bin.text_labels,
        &SmoothingTable::new(),
    )?;

    println!("bin:         {}", bin.id);
    if let Some(name) = &bin.name {
        println!("name:        {}", name);
    }
    println!(
        "grid:        {} x {} ({:.0} x {:.0} mm, {} units high)",
        config.grid_x,
        config.grid_y,
        config.width_mm(),
        config.height_mm(),
        config.height_units
    );
    println!("tools:       {}", bin.placed_tools.len());
    println!("labels:      {}", bin.text_labels.len());
    match combined_bounds(&bin.placed_tools) {
        Some(b) => println!(
            "bbox:        ({:.2}, {:.2}) - ({:.2}, {:.2})",
            b.min_x, b.min_y, b.max_x, b.max_y
        ),
        None => println!("bbox:        -"),
    }
    println!("fingerprint: {}", fingerprint);
    Ok(())
}

fn simplify_tool(input: &Path, level: f64) -> Result<()> {
    let tool: Tool = read_json(input)?;
    let points = &tool.outline.points;
    let epsilon = smoothing_epsilon(points, level);
    let simplified = simplify(points, epsilon);
    let smoothed = smooth_ring(points, level);

    println!("tool:       {} ({})", tool.name, tool.id);
    println!("epsilon:    {:.3} mm", epsilon);
    println!("points:     {}", points.len());
    println!("simplified: {}", simplified.len());
    println!("smoothed:   {}", smoothed.len());
    Ok(())
}

fn show_settings() -> Result<()> {
    let manager = SettingsManager::open_default()?;
    println!("# {}", manager.path().display());
    println!("{}", serde_json::to_string_pretty(manager.settings())?);
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match Command::parse(&args)? {
        Command::Render { input, output } => render(&input, output.as_deref()),
        Command::Inspect { input } => inspect(&input),
        Command::Simplify { input, level } => simplify_tool(&input, level),
        Command::Settings => show_settings(),
        Command::Version => {
            println!("tracefinity {} (built {})", VERSION, BUILD_DATE);
            Ok(())
        }
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}
