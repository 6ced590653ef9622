use geo::Coord;

/// number of bits per axis used when sorting vertices along the curve.
pub const DEFAULT_ORDER: u32 = 16;

/// position of a WGS84 coordinate along a Hilbert curve covering the globe
/// at the given order (2^order cells per axis).
pub fn distance(coord: &Coord<f32>, order: u32) -> u64 {
    let n: u64 = 1 << order;
    let x = scale(coord.x, -180.0, 180.0, n);
    let y = scale(coord.y, -90.0, 90.0, n);
    xy_to_d(n, x, y)
}

fn scale(value: f32, min: f64, max: f64, n: u64) -> u64 {
    let t = ((value as f64 - min) / (max - min)).clamp(0.0, 1.0);
    (t * (n - 1) as f64).round() as u64
}

fn xy_to_d(n: u64, mut x: u64, mut y: u64) -> u64 {
    let mut d: u64 = 0;
    let mut s = n / 2;
    while s > 0 {
        let rx = u64::from((x & s) > 0);
        let ry = u64::from((y & s) > 0);
        d += s * s * ((3 * rx) ^ ry);
        if ry == 0 {
            if rx == 1 {
                x = n - 1 - x;
                y = n - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }
        s /= 2;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_order_curve() {
        assert_eq!(xy_to_d(2, 0, 0), 0);
        assert_eq!(xy_to_d(2, 0, 1), 1);
        assert_eq!(xy_to_d(2, 1, 1), 2);
        assert_eq!(xy_to_d(2, 1, 0), 3);
    }

    #[test]
    fn test_nearby_coordinates_are_close_on_curve() {
        let a = distance(&Coord { x: 4.3517, y: 50.8466 }, DEFAULT_ORDER);
        let b = distance(&Coord { x: 4.3518, y: 50.8467 }, DEFAULT_ORDER);
        let far = distance(&Coord { x: -104.99, y: 39.74 }, DEFAULT_ORDER);
        assert!(a.abs_diff(b) < a.abs_diff(far));
    }
}
