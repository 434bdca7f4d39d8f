use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use feed_serial::{format_line, parse_line, preview, Coordinate, Error, PortWriter};

const DEVICE_PROMPT: &str = "Enter the Serial Device Name: ";

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send coordinates to the device as a single line.
    Send {
        /// Path to serial device. Prompted for when omitted.
        #[arg(short, long)]
        device: Option<PathBuf>,

        /// Print the line instead of sending it.
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        input: Input,
    },
    /// Render the XY path of the coordinates as SVG.
    Preview {
        /// Location where SVG is written to.
        #[arg(short, long, default_value = "/tmp/feed-serial.svg")]
        output: PathBuf,

        #[command(flatten)]
        input: Input,
    },
}

/// Where the coordinates come from, formatted like `1,4,0;5,2,0;10,10,0`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    /// Coordinates given inline.
    #[arg(short, long)]
    coordinates: Option<String>,

    /// File containing coordinates.
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl Input {
    fn read(&self) -> Result<Vec<Coordinate>, Error> {
        match (&self.coordinates, &self.file) {
            (Some(line), _) => parse_line(line),
            (None, Some(path)) => {
                let text = fs::read_to_string(path).map_err(|source| Error::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_line(&text)
            }
            // clap requires one of both.
            (None, None) => Ok(vec![]),
        }
    }
}

/// Ask for the device name on `output` and read it from `input`.
fn prompt_device(mut input: impl BufRead, mut output: impl Write) -> Result<PathBuf, Error> {
    let stdin_error = |source| Error::Io {
        path: PathBuf::from("<stdin>"),
        source,
    };

    write!(output, "{}", DEVICE_PROMPT).map_err(stdin_error)?;
    output.flush().map_err(stdin_error)?;

    let mut name = String::new();
    input.read_line(&mut name).map_err(stdin_error)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(stdin_error(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no serial device name given",
        )));
    }

    Ok(PathBuf::from(name))
}

fn send(device: Option<&Path>, dry_run: bool, coordinates: &[Coordinate]) -> Result<(), Error> {
    let line = format_line(coordinates);

    if dry_run {
        println!("{}", line);
        return Ok(());
    }

    let device = match device {
        Some(device) => device.to_path_buf(),
        None => prompt_device(io::stdin().lock(), io::stdout())?,
    };

    let mut writer = PortWriter::open(&device)?;
    info!("Sending {} coordinates: {}", coordinates.len(), line);
    writer.send_line(&line)?;
    writer.close()?;

    Ok(())
}

fn run(cli: Cli) -> Result<(), Error> {
    match &cli.command {
        Commands::Send {
            device,
            dry_run,
            input,
        } => send(device.as_deref(), *dry_run, &input.read()?),
        Commands::Preview { output, input } => {
            preview::save(output, &input.read()?)?;
            println!("Preview written to {}.", output.display());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Cursor;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["feed-serial", "send", "--dry-run"]).is_err());
    }

    #[test]
    fn input_sources_are_exclusive() {
        let args = ["feed-serial", "send", "-c", "1,4,0", "-f", "coordinates.txt"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn read_inline_coordinates() {
        let cli = Cli::try_parse_from(["feed-serial", "send", "-d", "/dev/ttyACM0", "-c", "1,4,0;5,2,0;"])
            .unwrap();

        match cli.command {
            Commands::Send { device, input, .. } => {
                assert_eq!(device, Some(PathBuf::from("/dev/ttyACM0")));
                assert_eq!(
                    input.read().unwrap(),
                    vec![Coordinate::new(1, 4, 0), Coordinate::new(5, 2, 0)]
                );
            }
            other => panic!("Expected send command, got {:?}.", other),
        }
    }

    #[test]
    fn prompt_device_reads_trimmed_name() {
        let mut output = Vec::new();
        let device = prompt_device(Cursor::new("  /dev/ttyACM0 \r\n"), &mut output).unwrap();

        assert_eq!(device, PathBuf::from("/dev/ttyACM0"));
        assert_eq!(output, b"Enter the Serial Device Name: ");
    }

    #[test]
    fn prompt_device_reads_first_line_only() {
        let device = prompt_device(Cursor::new("/dev/ttyUSB0\n/dev/ttyACM0\n"), Vec::new()).unwrap();
        assert_eq!(device, PathBuf::from("/dev/ttyUSB0"));
    }

    #[test]
    fn prompt_device_rejects_empty_reply() {
        for reply in ["", "\n", "   \r\n"] {
            match prompt_device(Cursor::new(reply), Vec::new()) {
                Err(Error::Io { source, .. }) => {
                    assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof)
                }
                other => panic!("Expected error for {:?}, got {:?}.", reply, other),
            }
        }
    }

    #[test]
    fn dry_run_does_not_open_device() {
        let coordinates = [Coordinate::new(1, 4, 0)];
        send(Some(Path::new("/dev/does-not-exist")), true, &coordinates).unwrap();
    }
}
