use std::path;

use svg::node::element::path::Data;
use svg::node::element::Path;
use svg::Document;

use crate::point::Coordinate;
use crate::Error;

/// Margin around the drawing, in the unit of the coordinates.
const MARGIN: f32 = 1.0;

/// Path through the X and Y components of `coordinates`. The Z axis is ignored.
pub fn preview_data(coordinates: &[Coordinate]) -> Data {
    let mut points = coordinates.iter().map(|c| (c.x as f32, c.y as f32));

    let mut data = Data::new();
    if let Some(start) = points.next() {
        data = data.move_to(start);
    }

    points.fold(data, |data, point| data.line_to(point))
}

/// Render the movement through `coordinates` as SVG, mostly useful to check a
/// command before sending it to the device.
pub fn preview(coordinates: &[Coordinate]) -> Document {
    let (min_x, min_y, max_x, max_y) = get_boundaries(coordinates);

    let path = Path::new()
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", "0.1")
        .set("d", preview_data(coordinates));

    Document::new()
        .set(
            "viewBox",
            (
                min_x - MARGIN,
                min_y - MARGIN,
                max_x - min_x + 2.0 * MARGIN,
                max_y - min_y + 2.0 * MARGIN,
            ),
        )
        .add(path)
}

/// Save the preview of `coordinates` at `output`.
pub fn save(output: &path::Path, coordinates: &[Coordinate]) -> Result<(), Error> {
    svg::save(output, &preview(coordinates)).map_err(|source| Error::Io {
        path: output.to_path_buf(),
        source,
    })
}

/// Return the lowest and highest X and Y as `(min_x, min_y, max_x, max_y)`.
pub fn get_boundaries(coordinates: &[Coordinate]) -> (f32, f32, f32, f32) {
    let mut iter = coordinates.iter().map(|c| (c.x as f32, c.y as f32));
    let Some((x, y)) = iter.next() else {
        return (0.0, 0.0, 0.0, 0.0);
    };

    iter.fold((x, y, x, y), |(min_x, min_y, max_x, max_y), (x, y)| {
        (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::path::Command;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0, 0, 1),
            Coordinate::new(10, 0, 1),
            Coordinate::new(10, 10, 1),
            Coordinate::new(0, 10, 1),
            Coordinate::new(0, 0, 0),
        ]
    }

    #[test]
    fn test_preview_data() {
        let data = preview_data(&square());

        assert_eq!(data.len(), 5);
        assert!(matches!(data[0], Command::Move(..)));
        assert!(data[1..].iter().all(|cmd| matches!(cmd, Command::Line(..))));
    }

    #[test]
    fn test_preview_data_empty() {
        assert!(preview_data(&[]).is_empty());
    }

    #[test]
    fn test_get_boundaries() {
        let mut coordinates = square();
        coordinates.push(Coordinate::new(-2, 15, 0));

        assert_eq!(get_boundaries(&coordinates), (-2.0, 0.0, 10.0, 15.0));
        assert_eq!(get_boundaries(&[]), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_preview() {
        let document = preview(&square()).to_string();
        assert!(document.contains("<path"));
        assert!(document.contains("viewBox"));
    }
}
