use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Axis-aligned rectangle in image pixel coordinates.
///
/// Maxima are exclusive: the covered pixels are
/// `x_min..x_max` by `y_min..y_max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl Region {
    /// Build a region from explicit bounds, swapping inverted pairs.
    pub fn new(x_min: usize, x_max: usize, y_min: usize, y_max: usize) -> Self {
        Self {
            x_min: x_min.min(x_max),
            x_max: x_min.max(x_max),
            y_min: y_min.min(y_max),
            y_max: y_min.max(y_max),
        }
    }

    /// Build a region from explicit bounds, rejecting inverted pairs.
    pub fn checked(
        x_min: usize,
        x_max: usize,
        y_min: usize,
        y_max: usize,
    ) -> Result<Self, RegionParseError> {
        if x_min > x_max {
            return Err(RegionParseError::Inverted {
                min_field: RegionField::XMin,
                max_field: RegionField::XMax,
                min: x_min,
                max: x_max,
            });
        }
        if y_min > y_max {
            return Err(RegionParseError::Inverted {
                min_field: RegionField::YMin,
                max_field: RegionField::YMax,
                min: y_min,
                max: y_max,
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Region spanning a whole `width` x `height` frame.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, width, 0, height)
    }

    /// Normalized region between two opposite corners, in any drag direction.
    /// Negative coordinates are pinned to zero.
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        let to_px = |v: f32| if v.is_finite() { v.max(0.0).round() as usize } else { 0 };
        Self::new(to_px(a.0), to_px(b.0), to_px(a.1), to_px(b.1))
    }

    /// Restrict the region to a `width` x `height` frame.
    pub fn clamp(&self, width: usize, height: usize) -> Self {
        Self {
            x_min: self.x_min.min(width),
            x_max: self.x_max.min(width),
            y_min: self.y_min.min(height),
            y_max: self.y_max.min(height),
        }
    }

    pub fn width(&self) -> usize {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> usize {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    pub fn x_range(&self) -> [usize; 2] {
        [self.x_min, self.x_max]
    }

    pub fn y_range(&self) -> [usize; 2] {
        [self.y_min, self.y_max]
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x {}..{}, y {}..{}",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

/// Which of the four numeric region fields an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionField {
    XMin,
    XMax,
    YMin,
    YMax,
}

impl std::fmt::Display for RegionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::XMin => write!(f, "X Min"),
            Self::XMax => write!(f, "X Max"),
            Self::YMin => write!(f, "Y Min"),
            Self::YMax => write!(f, "Y Max"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegionParseError {
    #[error("{field} is not a number: {input:?}")]
    NotANumber { field: RegionField, input: String },

    #[error("{field} must not be negative: {value}")]
    Negative { field: RegionField, value: i64 },

    #[error("{min_field} ({min}) is greater than {max_field} ({max})")]
    Inverted {
        min_field: RegionField,
        max_field: RegionField,
        min: usize,
        max: usize,
    },
}

/// The four region coordinates as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionFields {
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
}

impl RegionFields {
    pub fn from_region(region: &Region) -> Self {
        Self {
            x_min: region.x_min.to_string(),
            x_max: region.x_max.to_string(),
            y_min: region.y_min.to_string(),
            y_max: region.y_max.to_string(),
        }
    }

    /// Parse and validate all four fields.
    pub fn parse(&self) -> Result<Region, RegionParseError> {
        let x_min = parse_coordinate(RegionField::XMin, &self.x_min)?;
        let x_max = parse_coordinate(RegionField::XMax, &self.x_max)?;
        let y_min = parse_coordinate(RegionField::YMin, &self.y_min)?;
        let y_max = parse_coordinate(RegionField::YMax, &self.y_max)?;
        Region::checked(x_min, x_max, y_min, y_max)
    }
}

/// Parse one coordinate. Whole-valued decimals such as `"12.0"` are accepted.
pub fn parse_coordinate(field: RegionField, input: &str) -> Result<usize, RegionParseError> {
    let trimmed = input.trim();
    let not_a_number = || RegionParseError::NotANumber {
        field,
        input: input.to_string(),
    };

    let value = match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = trimmed.parse::<f64>().map_err(|_| not_a_number())?;
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(not_a_number());
            }
            f as i64
        }
    };

    usize::try_from(value).map_err(|_| RegionParseError::Negative { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_corners_is_normalized_in_every_direction() {
        let corners = [(2.0, 3.0), (10.0, 3.0), (2.0, 8.0), (10.0, 8.0)];
        for &a in &corners {
            for &b in &corners {
                let r = Region::from_corners(a, b);
                assert!(r.x_min <= r.x_max);
                assert!(r.y_min <= r.y_max);
            }
        }
        assert_eq!(
            Region::from_corners((10.0, 8.0), (2.0, 3.0)),
            Region::new(2, 10, 3, 8)
        );
    }

    #[test]
    fn clamp_limits_to_frame() {
        let r = Region::new(5, 50, 2, 40).clamp(20, 10);
        assert_eq!(r, Region::new(5, 20, 2, 10));
        let outside = Region::new(30, 50, 30, 40).clamp(20, 10);
        assert!(outside.is_empty());
    }

    #[test]
    fn parse_rejects_text_and_negatives() {
        let mut fields = RegionFields::from_region(&Region::new(1, 3, 1, 3));
        assert_eq!(fields.parse().unwrap(), Region::new(1, 3, 1, 3));

        fields.x_max = "abc".into();
        assert!(matches!(
            fields.parse(),
            Err(RegionParseError::NotANumber {
                field: RegionField::XMax,
                ..
            })
        ));

        fields.x_max = "-4".into();
        assert!(matches!(
            fields.parse(),
            Err(RegionParseError::Negative { value: -4, .. })
        ));
    }

    #[test]
    fn parse_rejects_inverted_bounds() {
        let fields = RegionFields {
            x_min: "1".into(),
            x_max: "3".into(),
            y_min: "9".into(),
            y_max: "2".into(),
        };
        assert!(matches!(
            fields.parse(),
            Err(RegionParseError::Inverted {
                min_field: RegionField::YMin,
                ..
            })
        ));
    }

    #[test]
    fn checked_keeps_valid_bounds_and_rejects_inverted_x() {
        assert_eq!(Region::checked(2, 5, 0, 0).unwrap(), Region::new(2, 5, 0, 0));
        assert_eq!(
            Region::checked(5, 2, 0, 4),
            Err(RegionParseError::Inverted {
                min_field: RegionField::XMin,
                max_field: RegionField::XMax,
                min: 5,
                max: 2,
            })
        );
    }

    #[test]
    fn parse_accepts_whole_decimals() {
        assert_eq!(parse_coordinate(RegionField::XMin, " 12.0 ").unwrap(), 12);
        assert!(parse_coordinate(RegionField::XMin, "12.5").is_err());
    }
}
