//! 地理坐标值对象

use serde::{Deserialize, Serialize};

/// 平均地球半径（公里），IUGG 标准值
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// 经纬度坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// 创建坐标，校验取值范围
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("Latitude out of range: {}", latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("Longitude out of range: {}", longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// 计算到另一坐标的大圆距离（公里），使用 Haversine 公式
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(4.711, -74.0721).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let bogota = Coordinate::new(4.711, -74.0721).unwrap();
        assert!(bogota.distance_km(&bogota) < 1e-9);
    }

    #[test]
    fn test_distance_bogota_medellin() {
        let bogota = Coordinate::new(4.711, -74.0721).unwrap();
        let medellin = Coordinate::new(6.2442, -75.5812).unwrap();

        let distance = bogota.distance_km(&medellin);
        // 两市直线距离约 239 公里
        assert!((235.0..243.0).contains(&distance), "got {}", distance);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(4.711, -74.0721).unwrap();
        let b = Coordinate::new(10.3910, -75.4794).unwrap();
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    }
}
