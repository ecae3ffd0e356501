use clap::{Parser, Subcommand};
use env_logger::Env;
use mrzkit::models::{CanonicalRecord, RawMrzFields};
use mrzkit::payload::{process_payload, ImageBase64Request};
use mrzkit::utils::MrzError;
use mrzkit::{MrzReader, Normalizer, NormalizerConfig, TextMrzReader};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mrzkit", version, about = "Normalize MRZ data read from identity documents")]
struct Cli {
    /// JSON file with normalizer settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Two-digit years below this expand to 20xx (overrides the config file)
    #[arg(long, global = true)]
    pivot: Option<u8>,

    /// Pretty-print the JSON record
    #[arg(long, global = true)]
    pretty: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a JSON raw field set (`null` means no MRZ was found)
    Normalize {
        /// JSON file, or `-` for stdin
        input: String,
    },
    /// Read an OCR text file, locate the MRZ and normalize it
    Text { path: PathBuf },
    /// Decode a base64 payload (bare or `{"image_base64": ...}`) and run it
    /// through the text reader
    Payload {
        /// Payload file, or `-` for stdin
        input: String,
    },
}

fn read_input(input: &str) -> Result<String, MrzError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(Path::new(input))?)
    }
}

fn load_config(cli: &Cli) -> Result<NormalizerConfig, MrzError> {
    let mut config = match &cli.config {
        Some(path) => NormalizerConfig::from_file(path)?,
        None => NormalizerConfig::default(),
    };
    if let Some(pivot) = cli.pivot {
        config.century_pivot = pivot;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<CanonicalRecord, MrzError> {
    let normalizer = Normalizer::with_config(load_config(cli)?);

    match &cli.command {
        Command::Normalize { input } => {
            let fields = RawMrzFields::from_json(&read_input(input)?)?;
            Ok(normalizer.normalize(fields.as_ref()))
        }
        Command::Text { path } => {
            let fields = TextMrzReader.read_mrz(path)?;
            Ok(normalizer.normalize(fields.as_ref()))
        }
        Command::Payload { input } => {
            let body = read_input(input)?;
            let payload = if body.trim_start().starts_with('{') {
                serde_json::from_str::<ImageBase64Request>(&body)?.image_base64
            } else {
                body
            };
            Ok(process_payload(&payload, &TextMrzReader, &normalizer))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let record = match run(&cli) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&record)
    } else {
        serde_json::to_string(&record)
    };
    match json {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
