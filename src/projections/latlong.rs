//!
//! Stub projection for geographic (lat/long) coordinates. The coordinates
//! are left untouched; the pipeline itself special-cases `ProjType::LongLat`
//! to convert degrees<->radians instead of calling `forward`/`inverse`.
//!
//! longlat: "Lat/long (Geodetic)"
//!

use crate::errors::Result;
use crate::parameters::ParamList;
use crate::proj::{ProjData, ProjType};

// Projection stub
super::projection! { latlong, longlat }

#[derive(Debug, Clone)]
pub(crate) struct Projection {}

impl Projection {
    pub fn latlong(p: &mut ProjData, _params: &ParamList) -> Result<Self> {
        p.proj_type = ProjType::LongLat;
        p.x0 = 0.;
        p.y0 = 0.;
        Ok(Self {})
    }

    pub fn longlat(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        Self::latlong(p, params)
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((lam, phi, z))
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((x, y, z))
    }

    pub const fn has_inverse() -> bool {
        true
    }

    pub const fn has_forward() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::proj::Proj;

    #[test]
    fn proj_latlong_init() {
        let p = Proj::from_proj_string("+proj=latlong +datum=WGS84").unwrap();

        assert_eq!(p.data().x0, 0.);
        assert_eq!(p.data().y0, 0.);
        assert!(p.data().is_latlong());
    }

    #[test]
    fn proj_longlat_to_longlat_is_identity() {
        let p_from = Proj::from_proj_string("+proj=longlat +datum=WGS84").unwrap();
        let p_to = Proj::from_proj_string("+proj=longlat +datum=WGS84").unwrap();

        let (lam, phi) = (2.3522219f64.to_radians(), 48.856614f64.to_radians());
        let mut points = [(lam, phi, 0.)];
        crate::transform::transform(&p_from, &p_to, &mut points, true).unwrap();

        assert_eq!(points[0], (lam, phi, 0.));
    }
}
