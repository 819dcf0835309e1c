/// Mean radius of the Earth, in meters
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Point on the Earth's surface, in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another coordinate, in meters
    ///
    /// Uses the haversine formula on a spherical Earth. Inputs are not range-checked.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = ((d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use speculoos::prelude::*;

    #[rstest]
    #[case(Coordinate::new(-23.1309312, -46.563328))]
    #[case(Coordinate::new(0.0, 0.0))]
    #[case(Coordinate::new(89.9, 179.9))]
    fn test_distance_same_point(#[case] point: Coordinate) {
        assert_that!(point.distance_to(&point)).is_equal_to(0.0);
    }

    #[rstest]
    #[case(
        Coordinate::new(-23.1309312, -46.563328),
        Coordinate::new(-23.0835318, -46.5407408)
    )]
    #[case(Coordinate::new(48.8566, 2.3522), Coordinate::new(51.5074, -0.1278))]
    #[case(Coordinate::new(10.0, 170.0), Coordinate::new(-10.0, -170.0))]
    fn test_distance_symmetric(#[case] a: Coordinate, #[case] b: Coordinate) {
        let ab = a.distance_to(&b);
        let ba = b.distance_to(&a);

        assert_that!((ab - ba).abs()).is_less_than(1e-6);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let res = Coordinate::new(0.0, 0.0).distance_to(&Coordinate::new(1.0, 0.0));

        // 6 371 km * pi / 180
        assert_that!((res - 111_194.93).abs()).is_less_than(1.0);
    }

    #[test]
    fn test_distance_short_range() {
        // Roughly 50 meters north
        let gym = Coordinate::new(-23.1309312, -46.563328);
        let user = Coordinate::new(-23.1304816, -46.563328);

        let res = gym.distance_to(&user);

        assert_that!(res).is_greater_than(45.0);
        assert_that!(res).is_less_than(55.0);
    }
}
