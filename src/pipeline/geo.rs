use crate::types::track::TrackPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in km between two points, spherical Earth.
pub fn haversine_distance_km(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Running distance in km at each point. Same length as `points`; starts at 0.
pub fn cumulative_distance_km(points: &[TrackPoint]) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            total += haversine_distance_km(&points[i - 1], point);
        }
        out.push(total);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn same_point_is_zero() {
        let p = TrackPoint::new(51.5074, -0.1278);
        assert_eq!(haversine_distance_km(&p, &p), 0.0);
    }

    #[test]
    fn london_to_paris() {
        let london = TrackPoint::new(51.5074, -0.1278);
        let paris = TrackPoint::new(48.8566, 2.3522);
        assert!(approx_eq(haversine_distance_km(&london, &paris), 343.5, 5.0));
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = TrackPoint::new(0.0, 0.0);
        let b = TrackPoint::new(1.0, 0.0);
        assert!(approx_eq(haversine_distance_km(&a, &b), 111.195, 0.01));
    }

    #[test]
    fn cumulative_short_inputs() {
        assert!(cumulative_distance_km(&[]).is_empty());
        assert_eq!(cumulative_distance_km(&[TrackPoint::new(10.0, 10.0)]), vec![0.0]);
    }

    #[test]
    fn cumulative_is_non_decreasing() {
        let points: Vec<TrackPoint> = [(52.52, 13.405), (52.5205, 13.406), (52.5205, 13.406), (52.519, 13.401)]
            .iter()
            .map(|&(lat, lon)| TrackPoint::new(lat, lon))
            .collect();
        let cumulative = cumulative_distance_km(&points);
        assert_eq!(cumulative.len(), points.len());
        assert_eq!(cumulative[0], 0.0);
        assert!(cumulative.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(cumulative[1], cumulative[2]);
    }
}
