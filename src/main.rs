//! Command-line front end: encode TEXT and write an SVG or PNG document to stdout.

use clap::error::ErrorKind;
use clap::Parser;
use qiraster::params::{DEFAULT_PADDING, DEFAULT_SCALE};
use qiraster::{render, OutputFormat, QrCodeEcc, QrCodeProvider, RasterParams, RenderRequest, Version};
use std::io::{self, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "qiraster", version)]
#[command(about = "Render text as a QR code in SVG or PNG format on standard output", long_about = None)]
struct Cli {
    /// Text to encode
    text: String,

    /// Error correction level
    #[arg(short = 'e', long = "ecc", value_enum, default_value_t = QrCodeEcc::Low)]
    ecc: QrCodeEcc,

    /// Version/size, 1 to 40 (default is automatic)
    #[arg(short = 'v', long = "symbol-version", value_parser = clap::value_parser!(u8).range(1..=40))]
    symbol_version: Option<u8>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Pixel size of one module
    #[arg(short = 's', long, default_value_t = DEFAULT_SCALE)]
    scale: u32,

    /// Quiet zone width in modules
    #[arg(short = 'p', long, default_value_t = DEFAULT_PADDING)]
    padding: u32,
}

fn run(cli: &Cli) -> qiraster::Result<()> {
    let request = RenderRequest {
        text: &cli.text,
        ecc: cli.ecc,
        version: cli.symbol_version.map(Version::new).transpose()?,
        format: cli.format,
        params: RasterParams::new(cli.scale, cli.padding)?,
    };
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    render(&QrCodeProvider, &request, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Collapses clap's first message paragraph (reason plus details such as the missing
/// argument names) onto a single line.
fn one_line(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let message = rendered
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let message = message.trim_start_matches("error: ");
    if message.is_empty() {
        "bad arguments".to_string()
    } else {
        message.to_string()
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("qiraster: {}", one_line(&e));
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("qiraster: {}", e);
            ExitCode::from(1)
        }
    }
}
