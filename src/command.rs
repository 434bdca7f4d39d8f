//! The single-line command format understood by the firmware.
//!
//! A command is a list of coordinates, e.g. `1,4,0;5,2,0;10,10,0`. The
//! components of a coordinate are separated by `,` and the coordinates by `;`.

use crate::point::Coordinate;
use crate::Error;

/// Separator between two coordinates in a command line.
pub const COORDINATE_SEPARATOR: &str = ";";

/// Serialize `coordinates` into one command line.
///
/// The line has no trailing separator and no line terminator; the latter is
/// added by [`crate::port::PortWriter::send_line`].
pub fn format_line(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(Coordinate::to_string)
        .collect::<Vec<_>>()
        .join(COORDINATE_SEPARATOR)
}

/// Parse a command line back into coordinates.
///
/// Every non-empty line of `text` holds one or more coordinates, so both a
/// single command line and a file with one coordinate per line parse. One
/// trailing `;` per line is accepted.
pub fn parse_line(text: &str) -> Result<Vec<Coordinate>, Error> {
    let mut coordinates: Vec<Coordinate> = vec![];

    for line in text.lines() {
        let line = line.trim();
        let line = line.strip_suffix(COORDINATE_SEPARATOR).unwrap_or(line);

        if line.trim().is_empty() {
            continue;
        }

        for triple in line.split(COORDINATE_SEPARATOR) {
            coordinates.push(triple.parse::<Coordinate>()?);
        }
    }

    Ok(coordinates)
}
