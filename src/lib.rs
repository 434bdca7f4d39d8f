//! Send coordinates to a motion-control device over a serial connection.
//!
//! ```no_run
//! use feed_serial::{format_line, Coordinate, PortWriter};
//! use std::path::Path;
//!
//! let line = format_line(&[Coordinate::new(1, 4, 0), Coordinate::new(5, 2, 0)]);
//!
//! let mut writer = PortWriter::open(Path::new("/dev/ttyACM0"))?;
//! writer.send_line(&line)?;
//! writer.close()?;
//! # Ok::<(), feed_serial::Error>(())
//! ```
use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

pub mod command;
pub mod point;
pub mod port;
pub mod preview;

pub use command::{format_line, parse_line};
pub use point::Coordinate;
pub use port::PortWriter;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open serial device {}: {source}.", device.display())]
    DeviceOpen {
        device: PathBuf,
        source: serial::Error,
    },

    #[error("Failed to write line {line:?}: {source}.")]
    Write { line: String, source: io::Error },

    #[error("Coordinate {triple:?} has {found} components, expected 3.")]
    InvalidArity { triple: String, found: usize },

    #[error("Failed to parse component {component:?} as number: {source}.")]
    InvalidComponent {
        component: String,
        source: ParseFloatError,
    },

    #[error("Component {component:?} is not a finite number.")]
    NonFiniteComponent { component: String },

    #[error("Failed to flush transport: {source}.")]
    Flush { source: io::Error },

    #[error("I/O error on {}: {source}.", path.display())]
    Io { path: PathBuf, source: io::Error },
}
