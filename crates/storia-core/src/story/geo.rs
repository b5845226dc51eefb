//! Geographic position attached to a story.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const POLE_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// A point on the globe. At the poles the longitude is undefined and must
/// be absent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates {
    pub lat: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lng: Option<f64>,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: Option<f64>) -> Self {
        Self { lat, lng }
    }

    pub const fn north_pole() -> Self {
        Self::new(POLE_LATITUDE, None)
    }

    pub const fn south_pole() -> Self {
        Self::new(-POLE_LATITUDE, None)
    }

    pub fn is_pole(&self) -> bool {
        self.lat == POLE_LATITUDE || self.lat == -POLE_LATITUDE
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.lat.is_finite() || self.lng.is_some_and(|lng| !lng.is_finite()) {
            return Err(GeoError::NotFinite);
        }

        if self.is_pole() {
            return match self.lng {
                Some(_) => Err(GeoError::LongitudeAtPole),
                None => Ok(()),
            };
        }

        if self.lat <= -POLE_LATITUDE || self.lat >= POLE_LATITUDE {
            return Err(GeoError::LatitudeOutOfRange);
        }

        match self.lng {
            None => Err(GeoError::MissingLongitude),
            Some(lng) if lng <= -MAX_LONGITUDE || lng > MAX_LONGITUDE => {
                Err(GeoError::LongitudeOutOfRange)
            }
            Some(_) => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("coordinates are not finite")]
    NotFinite,
    #[error("longitude must be absent at the poles")]
    LongitudeAtPole,
    #[error("latitude must lie strictly between -90 and 90")]
    LatitudeOutOfRange,
    #[error("longitude is required away from the poles")]
    MissingLongitude,
    #[error("longitude must lie in (-180, 180]")]
    LongitudeOutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poles_reject_longitude() {
        assert_eq!(Coordinates::north_pole().validate(), Ok(()));
        assert_eq!(Coordinates::south_pole().validate(), Ok(()));
        assert_eq!(
            Coordinates::new(-90.0, Some(0.0)).validate(),
            Err(GeoError::LongitudeAtPole)
        );
    }

    #[test]
    fn longitude_range_is_half_open() {
        assert_eq!(Coordinates::new(38.7, Some(180.0)).validate(), Ok(()));
        assert_eq!(
            Coordinates::new(38.7, Some(-180.0)).validate(),
            Err(GeoError::LongitudeOutOfRange)
        );
    }

    #[test]
    fn non_polar_points_need_longitude() {
        assert_eq!(
            Coordinates::new(10.0, None).validate(),
            Err(GeoError::MissingLongitude)
        );
        assert_eq!(
            Coordinates::new(91.0, Some(0.0)).validate(),
            Err(GeoError::LatitudeOutOfRange)
        );
        assert_eq!(
            Coordinates::new(f64::NAN, Some(0.0)).validate(),
            Err(GeoError::NotFinite)
        );
    }
}
