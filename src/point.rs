use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Separator between the components of a single coordinate.
pub const COMPONENT_SEPARATOR: char = ',';

/// Position of the tool along the X, Y and Z axis.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    pub fn new(x: impl Into<f64>, y: impl Into<f64>, z: impl Into<f64>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }
}

/// Renders as `x,y,z`. Integral components are written without a decimal point.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{x}{sep}{y}{sep}{z}",
            x = self.x,
            y = self.y,
            z = self.z,
            sep = COMPONENT_SEPARATOR
        )
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(triple: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = triple.split(COMPONENT_SEPARATOR).map(str::trim).collect();

        // `split` always yields at least one item, so a blank triple counts as zero components.
        let found = match components.as_slice() {
            [""] => 0,
            _ => components.len(),
        };

        if let [x, y, z] = components.as_slice() {
            return Ok(Self {
                x: parse_component(x)?,
                y: parse_component(y)?,
                z: parse_component(z)?,
            });
        }

        Err(Error::InvalidArity {
            triple: triple.trim().to_string(),
            found,
        })
    }
}

fn parse_component(component: &str) -> Result<f64, Error> {
    let value: f64 = component
        .parse()
        .map_err(|source| Error::InvalidComponent {
            component: component.to_string(),
            source,
        })?;

    // `f64::from_str` accepts `inf` and `NaN`, neither of which the firmware understands.
    if !value.is_finite() {
        return Err(Error::NonFiniteComponent {
            component: component.to_string(),
        });
    }

    Ok(value)
}
