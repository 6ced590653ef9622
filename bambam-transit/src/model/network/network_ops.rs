use geo::{Coord, Distance, Haversine, Point};

/// great-circle distance in meters between two WGS84 coordinates. computed
/// in f64 since f32 loses precision at city scale.
pub fn distance_meters(src: &Coord<f32>, dst: &Coord<f32>) -> f32 {
    let a = Point::new(src.x as f64, src.y as f64);
    let b = Point::new(dst.x as f64, dst.y as f64);
    Haversine.distance(a, b) as f32
}

/// linear interpolation between two coordinates, `fraction` in [0, 1].
pub fn interpolate(src: &Coord<f32>, dst: &Coord<f32>, fraction: f32) -> Coord<f32> {
    Coord {
        x: src.x + (dst.x - src.x) * fraction,
        y: src.y + (dst.y - src.y) * fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_meters() {
        // one thousandth of a degree of latitude is ~111 meters
        let a = Coord { x: 4.35, y: 50.840 };
        let b = Coord { x: 4.35, y: 50.841 };
        let d = distance_meters(&a, &b);
        assert!((d - 111.2).abs() < 1.0, "unexpected distance {d}");
        assert_eq!(distance_meters(&a, &a), 0.0);
    }

    #[test]
    fn test_interpolate() {
        let a = Coord { x: 0.0, y: 0.0 };
        let b = Coord { x: 2.0, y: -4.0 };
        assert_eq!(interpolate(&a, &b, 0.5), Coord { x: 1.0, y: -2.0 });
    }
}
