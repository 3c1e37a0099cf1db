use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use svg_gcode_gateway::{ConversionResult, Gateway, GatewayError, ToolpathConverter};

/// Read a conversion request as JSON and print the result as JSON.
#[derive(Parser, Debug)]
#[command(name = "svg-gcode-gateway", version)]
struct Cli {
    /// Request file; `-` reads standard input.
    #[arg(long, default_value = "-")]
    input: PathBuf,

    /// Directory for the scratch SVG file.
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Pretty-print the JSON result.
    #[arg(long)]
    pretty: bool,

    /// Log more to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &Path) -> io::Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut gateway = Gateway::new(ToolpathConverter::new());
    if let Some(dir) = &cli.temp_dir {
        gateway = gateway.with_temp_dir(dir);
    }

    let result = match read_input(&cli.input) {
        Ok(input) => gateway.handle(&input),
        Err(e) => {
            let err = GatewayError::Input(e);
            tracing::warn!(input = %cli.input.display(), error = %err, "could not read request");
            ConversionResult::failure(err)
        }
    };

    let json = match result.to_json(cli.pretty) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", json).and_then(|_| stdout.flush()) {
        eprintln!("Error writing result: {}", e);
        process::exit(1);
    }
}
