//! thermistor - command-line interface for thermistor lookup tables
//!
//! Builds tables from a TOML description, prints or exports them as source
//! code, and converts readings back into temperature.

mod render;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use thermistor::{Circuit, TableValue, ThermistorConfig, ValueType};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "thermistor")]
#[command(version)]
#[command(about = "Thermistor lookup tables: build, export and query", long_about = None)]
struct Cli {
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample thermistor description
    Init {
        /// Output file
        #[arg(value_name = "PATH", default_value = "thermistor.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a description and build its table
    Check {
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Print the lookup table
    Table {
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        #[arg(short, long, value_enum, default_value_t = TableFormat::Text)]
        format: TableFormat,
    },

    /// Emit the table as source code
    Export {
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        #[arg(short, long, value_enum)]
        lang: Language,

        /// Output file (stdout when absent)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Convert raw readings to temperature
    Lookup {
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Readings in table units (ohm or ADC counts)
        #[arg(value_name = "READING", required = true, allow_negative_numbers = true)]
        readings: Vec<f64>,
    },

    /// Evaluate the model without a table
    Convert {
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Resistance in ohm
        #[arg(long, value_name = "OHM", conflicts_with = "temp", required_unless_present = "temp")]
        res: Option<f64>,

        /// Temperature in degrees Celsius
        #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
        temp: Option<f64>,
    },

    /// Show package information
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum TableFormat {
    Text,
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Language {
    Rust,
    Cpp,
}

/// Calls a generic function with the storage type named by a [`ValueType`]
macro_rules! with_value_type {
    ($ty:expr, $func:ident($($arg:expr),*)) => {
        match $ty {
            ValueType::U8 => $func::<u8>($($arg),*),
            ValueType::U16 => $func::<u16>($($arg),*),
            ValueType::U32 => $func::<u32>($($arg),*),
            ValueType::U64 => $func::<u64>($($arg),*),
            ValueType::I16 => $func::<i16>($($arg),*),
            ValueType::I32 => $func::<i32>($($arg),*),
            ValueType::I64 => $func::<i64>($($arg),*),
            ValueType::F32 => $func::<f32>($($arg),*),
            ValueType::F64 => $func::<f64>($($arg),*),
        }
    };
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { path, force } => init_command(&path, force),
        Commands::Check { config } => check_command(&config),
        Commands::Table { config, format } => table_command(&config, format),
        Commands::Export {
            config,
            lang,
            output,
        } => export_command(&config, lang, output.as_deref()),
        Commands::Lookup { config, readings } => lookup_command(&config, &readings),
        Commands::Convert { config, res, temp } => convert_command(&config, res, temp),
        Commands::Info => {
            print_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: &Path) -> Result<ThermistorConfig> {
    let config = ThermistorConfig::from_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    debug!(name = %config.name, value_type = %config.value_type, "loaded description");
    Ok(config)
}

fn unit(config: &ThermistorConfig) -> &'static str {
    if config.circuit.is_adc() { "counts" } else { "ohm" }
}

// ============================================================================
// Commands
// ============================================================================

fn init_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let config = ThermistorConfig::default();
    fs::write(path, config.to_toml_string()?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "wrote sample description");
    println!("{} {}", "Created".green().bold(), path.display());
    Ok(())
}

fn check_command(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    with_value_type!(config.value_type, check_table(&config))
}

fn check_table<V: TableValue>(config: &ThermistorConfig) -> Result<()> {
    let lut = config.build_table::<V>()?;

    let smallest_step = lut
        .as_slice()
        .windows(2)
        .map(|pair| pair[0].to_f64() - pair[1].to_f64())
        .fold(f64::INFINITY, f64::min);

    println!("{} {}", "ok".green().bold(), config.name);
    println!("  entries:       {}", lut.len());
    println!(
        "  range:         {} .. {} C (step {} C)",
        lut.range().min(),
        lut.range().max(),
        lut.delta()
    );
    println!("  value type:    {}", V::TYPE_NAME);
    println!(
        "  values:        {} .. {} {}",
        lut[0],
        lut[lut.len() - 1],
        unit(config)
    );
    println!("  smallest step: {} {}", smallest_step, unit(config));
    Ok(())
}

fn table_command(path: &Path, format: TableFormat) -> Result<()> {
    let config = load_config(path)?;
    with_value_type!(config.value_type, print_table(&config, format))
}

fn print_table<V: TableValue>(config: &ThermistorConfig, format: TableFormat) -> Result<()> {
    let lut = config.build_table::<V>()?;
    let out = match format {
        TableFormat::Text => render::text(&lut, unit(config)),
        TableFormat::Csv => render::csv(&lut),
        TableFormat::Json => render::json(&config.name, &lut)?,
    };
    print!("{}", out);
    Ok(())
}

fn export_command(path: &Path, lang: Language, output: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let source = with_value_type!(config.value_type, export_table(&config, lang))?;

    match output {
        Some(output) => {
            fs::write(output, source)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("{} {}", "Exported".green().bold(), output.display());
        }
        None => print!("{}", source),
    }
    Ok(())
}

fn export_table<V: TableValue>(config: &ThermistorConfig, lang: Language) -> Result<String> {
    let lut = config.build_table::<V>()?;
    Ok(match lang {
        Language::Rust => render::rust(&config.name, &lut),
        Language::Cpp => render::cpp(&config.name, &lut),
    })
}

fn lookup_command(path: &Path, readings: &[f64]) -> Result<()> {
    let config = load_config(path)?;
    with_value_type!(config.value_type, lookup_readings(&config, readings))
}

fn lookup_readings<V: TableValue>(config: &ThermistorConfig, readings: &[f64]) -> Result<()> {
    let lut = config.build_table::<V>()?;

    for &raw in readings {
        if !config.value_type.is_float() && raw.fract() != 0.0 {
            bail!("reading {} is not an integer, table holds {}", raw, V::TYPE_NAME);
        }
        let Some(reading) = V::from_sample(raw) else {
            bail!("reading {} does not fit in {}", raw, V::TYPE_NAME);
        };
        let result = lut.interpolate(reading);

        match result.in_range() {
            Some(celsius) => println!("{} {} -> {:.3} C", reading, unit(config), celsius),
            None => println!(
                "{} {} -> {:.3} C {}",
                reading,
                unit(config),
                result.celsius,
                "(saturated)".yellow()
            ),
        }
    }
    Ok(())
}

fn convert_command(path: &Path, res: Option<f64>, temp: Option<f64>) -> Result<()> {
    let config = load_config(path)?;
    let equation = config.equation()?;

    match (res, temp) {
        (Some(res), _) => {
            if res <= 0.0 {
                bail!("resistance must be positive, got {}", res);
            }
            println!("{} ohm -> {:.3} C", res, equation.calculate_celsius(res));
        }
        (None, Some(temp)) => {
            let res = equation.calculate_res_celsius(temp);
            println!("{} C -> {:.3} ohm", temp, res);
            if config.circuit.is_adc() {
                let circuit = config.circuit()?;
                println!("{} C -> {} counts", temp, circuit.transform(res));
            }
        }
        (None, None) => bail!("either --res or --temp is required"),
    }
    Ok(())
}

fn print_info() {
    println!("{}", thermistor::NAME.bold());
    println!("  version:     {}", thermistor::VERSION);
    println!("  license:     {}", thermistor::LICENSE);
    println!("  authors:     {}", thermistor::AUTHORS);
    println!("  description: {}", thermistor::DESCRIPTION);
    println!("  topics:      thermistor, embedded");
    println!(
        "  value types: {}",
        ValueType::ALL.map(|ty| ty.as_str()).join(", ")
    );
    println!("  c++ export:  {}", render::CXX_FLAGS.join(" "));
}
