//! Command line front end for the Game of Life loading orb

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use life_orb::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{BuiltinPattern, Grid, LifeStepper, PatternDecoder, RleDialect},
    orb::{Orb, SeededSource, Theme},
    utils::{color_enabled, format_grid_compact, SnapshotRenderer, Status, TerminalRenderer, TerminalStyle},
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "life_orb")]
#[command(about = "Game of Life loading orb")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// 40x40 orb with a random palette and pattern
    Orb,
    /// 30x30 flat-blue pulsar
    Spinner,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the orb in the terminal
    Run {
        /// Configuration file path (a preset is used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Built-in settings to start from when no config file is given
        #[arg(long, value_enum, default_value = "orb")]
        preset: Preset,

        /// Grid rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (overrides config)
        #[arg(long)]
        cols: Option<usize>,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        tick_ms: Option<u64>,

        /// Starting pattern (overrides config)
        #[arg(short, long)]
        pattern: Option<BuiltinPattern>,

        /// Inline RLE to start from instead of a built-in pattern
        #[arg(long)]
        rle: Option<String>,

        /// Palette (overrides config)
        #[arg(long)]
        theme: Option<Theme>,

        /// Seed for picking the unpinned theme/pattern
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: ansi, plain or json
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Stop after this many generations
        #[arg(short = 'n', long)]
        ticks: Option<u64>,

        /// Verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode an RLE pattern and show what it contains
    Decode {
        /// RLE text
        #[arg(conflicts_with = "pattern")]
        rle: Option<String>,

        /// Decode a built-in pattern instead
        #[arg(short, long)]
        pattern: Option<BuiltinPattern>,

        /// Treat the whole input as run body (no header filtering)
        #[arg(long)]
        bare: bool,
    },

    /// List the built-in patterns
    Patterns {
        /// Step each pattern and confirm its period
        #[arg(long)]
        verify: bool,
    },

    /// Create example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            preset,
            rows,
            cols,
            tick_ms,
            pattern,
            rle,
            theme,
            seed,
            format,
            ticks,
            verbose,
        } => {
            let overrides = CliOverrides {
                rows,
                cols,
                tick_ms,
                pattern,
                rle,
                theme,
                seed,
                format,
            };
            run_command(config, preset, overrides, ticks, verbose)
        }
        Commands::Decode { rle, pattern, bare } => decode_command(rle, pattern, bare),
        Commands::Patterns { verify } => patterns_command(verify),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config: Option<&Path>, preset: Preset) -> Result<Settings> {
    match config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(match preset {
            Preset::Orb => Settings::orb(),
            Preset::Spinner => Settings::spinner(),
        }),
    }
}

fn init_logging(level: log::LevelFilter) -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialize logger")
}

fn run_command(
    config_path: Option<PathBuf>,
    preset: Preset,
    overrides: CliOverrides,
    ticks: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(config_path.as_deref(), preset)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        settings.log_level()?
    };
    init_logging(level)?;

    let mut source = match settings.decoration.seed {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_clock(),
    };
    log::debug!("Decoration seed: {}", source.seed());

    let orb = Orb::from_settings(&settings, &mut source).context("Failed to build orb")?;
    log::info!(
        "Starting from {} ({} live cells) with theme {}",
        orb.pattern_name,
        orb.pattern.population(),
        orb.decoration.theme
    );

    let stdout = std::io::stdout().lock();
    match settings.render.format {
        OutputFormat::Json => orb.into_driver(SnapshotRenderer::new(stdout)).run(ticks),
        format => {
            let style = TerminalStyle {
                color: format == OutputFormat::Ansi && color_enabled(),
                orb_mask: settings.render.orb_mask,
                in_place: format == OutputFormat::Ansi,
            };
            orb.into_driver(TerminalRenderer::new(stdout, style)).run(ticks)
        }
    }
}

fn decode_command(rle: Option<String>, pattern: Option<BuiltinPattern>, bare: bool) -> Result<()> {
    let source = match (rle, pattern) {
        (Some(rle), _) => rle,
        (None, Some(pattern)) => pattern.rle().to_string(),
        (None, None) => anyhow::bail!("Provide RLE text or --pattern"),
    };

    let dialect = if bare { RleDialect::Bare } else { RleDialect::Annotated };
    let report = PatternDecoder::with_dialect(dialect).decode_with_report(&source);
    let pattern = &report.pattern;

    println!("{}", Status::Note.label("Decoded pattern:"));
    println!("  Live cells: {}", pattern.population());
    println!("  Bounding box: {}x{} (height x width)", pattern.height(), pattern.width());

    if !pattern.is_empty() {
        let preview = Grid::with_living(pattern.height(), pattern.width(), pattern.cells());
        println!("\n{}", format_grid_compact(&preview));
    }

    if report.anomalies.is_empty() {
        println!("{}", Status::Ok.label("No anomalies"));
    } else {
        println!("{}", Status::Warning.label(&format!("{} anomalies:", report.anomalies.len())));
        for anomaly in &report.anomalies {
            println!("  - {}", anomaly);
        }
    }

    Ok(())
}

fn patterns_command(verify: bool) -> Result<()> {
    println!("Pattern          | Size    | Cells | Period");
    println!("-----------------|---------|-------|-------");

    let mut failures = 0;
    for builtin in BuiltinPattern::ALL {
        let pattern = builtin.decode();
        let mut line = format!(
            "{:16} | {:>3}x{:<3} | {:5} | {}",
            builtin.name(),
            pattern.height(),
            pattern.width(),
            pattern.population(),
            builtin.period()
        );

        if verify {
            let grid = life_orb::seed(&pattern, 40, 40);
            let observed = LifeStepper::detect_period(&grid, builtin.period() * 2);
            if observed == Some(builtin.period()) {
                line.push_str(&format!("  {}", Status::Ok.label("ok")));
            } else {
                failures += 1;
                line.push_str(&format!("  {}", Status::Failed.label(&format!("observed {:?}", observed))));
            }
        }
        println!("{}", line);
    }

    if failures > 0 {
        anyhow::bail!("{} pattern(s) did not repeat at their listed period", failures);
    }
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", Status::Note.label("Writing example configuration..."));

    let config_dir = directory.join("config");
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)
        .with_context(|| format!("Failed to create directory {}", examples_dir.display()))?;

    let targets = [
        (config_dir.join("default.yaml"), Settings::orb()),
        (examples_dir.join("spinner.yaml"), Settings::spinner()),
        (examples_dir.join("pulsar_sunset.yaml"), {
            let mut settings = Settings::orb();
            settings.decoration.pattern = Some(BuiltinPattern::Pulsar);
            settings.decoration.theme = Some(Theme::Sunset);
            settings.decoration.seed = Some(7);
            settings
        }),
    ];

    for (path, settings) in targets {
        if path.exists() && !force {
            println!("Skipped: {} (already exists)", path.display());
            continue;
        }
        settings
            .to_file(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Created: {}", path.display());
    }

    println!("\n{}", Status::Ok.label("Setup complete!"));
    println!("Run: cargo run -- run --config {}", config_dir.join("default.yaml").display());
    Ok(())
}
