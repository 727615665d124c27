use std::{fmt::Display, iter::Sum};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:.4}, {:.4}", self.latitude, self.longitude))
    }
}

/// Mean of all coordinates, used to anchor popups for a whole line.
impl Sum for Coordinate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut count: usize = 0;
        let mut lat: f64 = 0.0;
        let mut lon: f64 = 0.0;
        iter.for_each(|coordinate| {
            count += 1;
            lat += coordinate.latitude;
            lon += coordinate.longitude;
        });
        let count = count as f64;
        Self {
            latitude: lat / count,
            longitude: lon / count,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Coordinate {
    /// Builds a coordinate only when both halves are present.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Some(Self {
            latitude: latitude?,
            longitude: longitude?,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Axis aligned lat/lng box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        points.for_each(|point| bounds.extend(point));
        Some(bounds)
    }

    pub fn extend(&mut self, point: &Coordinate) {
        self.south_west.latitude = self.south_west.latitude.min(point.latitude);
        self.south_west.longitude = self.south_west.longitude.min(point.longitude);
        self.north_east.latitude = self.north_east.latitude.max(point.latitude);
        self.north_east.longitude = self.north_east.longitude.max(point.longitude);
    }

    /// Grows the box on every side by `ratio` of its own height and width.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north_east.latitude - self.south_west.latitude).abs() * ratio;
        let lng_buffer = (self.north_east.longitude - self.south_west.longitude).abs() * ratio;
        Self {
            south_west: Coordinate {
                latitude: self.south_west.latitude - lat_buffer,
                longitude: self.south_west.longitude - lng_buffer,
            },
            north_east: Coordinate {
                latitude: self.north_east.latitude + lat_buffer,
                longitude: self.north_east.longitude + lng_buffer,
            },
        }
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }

    pub fn center(&self) -> Coordinate {
        [self.south_west, self.north_east].into_iter().sum()
    }
}

#[test]
fn mean_coordinate_test() {
    let center: Coordinate = [
        Coordinate::from((41.0, 2.0)),
        Coordinate::from((42.0, 3.0)),
    ]
    .into_iter()
    .sum();
    assert_eq!(center, Coordinate::from((41.5, 2.5)));
}

#[test]
fn bounds_pad_test() {
    let points = [Coordinate::from((41.0, 2.0)), Coordinate::from((42.0, 4.0))];
    let bounds = Bounds::from_points(&points).unwrap().pad(0.15);
    assert!((bounds.south_west.latitude - 40.85).abs() < 1e-9);
    assert!((bounds.north_east.longitude - 4.3).abs() < 1e-9);
    assert!(bounds.contains(&points[0]));
}

#[test]
fn empty_bounds_test() {
    assert!(Bounds::from_points(&[]).is_none());
}

#[test]
fn invalid_coordinate_test() {
    assert!(!Coordinate::from((f64::NAN, 2.0)).is_valid());
    assert!(!Coordinate::from((91.0, 2.0)).is_valid());
    assert!(Coordinate::from((41.38, 2.17)).is_valid());
}
