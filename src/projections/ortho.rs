//!
//! Orthographic azimuthal projection (view from infinite distance).
//! Spherical only; points on the far hemisphere have no image.
//!
//! See <https://proj.org/operations/projections/ortho.html>
//!
//! ortho: "Orthographic" "\n\tAzi, Sph"
//!
use crate::errors::{Error, Result};
use crate::math::consts::EPS_10;
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { ortho }

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    sinph0: f64,
    cosph0: f64,
}

impl Projection {
    pub fn ortho(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        p.ellps = crate::ellps::Ellipsoid::sphere(p.ellps.a)?;
        let (sinph0, cosph0) = p.phi0.sin_cos();
        Ok(Self { sinph0, cosph0 })
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (sinphi, cosphi) = phi.sin_cos();
        let coslam = lam.cos();

        let cosc = self.sinph0 * sinphi + self.cosph0 * cosphi * coslam;
        if cosc < -EPS_10 {
            return Err(Error::CoordTransOutsideProjectionDomain);
        }

        Ok((
            cosphi * lam.sin(),
            self.cosph0 * sinphi - self.sinph0 * cosphi * coslam,
            z,
        ))
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let rh = x.hypot(y);
        if rh > 1. + EPS_10 {
            return Err(Error::CoordTransOutsideProjectionDomain);
        }
        let rh = rh.min(1.);

        let cosc = (1. - rh * rh).sqrt();
        let sinc = rh;

        let phi = if rh < EPS_10 {
            self.sinph0.atan2(self.cosph0)
        } else {
            (cosc * self.sinph0 + y * sinc * self.cosph0 / rh).asin()
        };
        let lam = if rh < EPS_10 {
            0.
        } else {
            (x * sinc).atan2(rh * self.cosph0 * cosc - y * self.sinph0 * sinc)
        };

        Ok((lam, phi, z))
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
    use approx::assert_abs_diff_eq;

    #[test]
    fn proj_ortho_round_trips() {
        let p = Proj::from_proj_string("+proj=ortho +R=6370997").unwrap();
        let proj = p.projection();

        for &(lam, phi) in &[(0.1, 0.3), (-0.4, 0.5), (0.5, -0.2)] {
            let (x, y, z) = proj.forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = proj.inverse(x, y, z).unwrap();
            assert_abs_diff_eq!(lam, lam2, epsilon = 1e-8);
            assert_abs_diff_eq!(phi, phi2, epsilon = 1e-8);
        }
    }

    #[test]
    fn proj_ortho_rejects_back_hemisphere() {
        let p = Proj::from_proj_string("+proj=ortho +R=6370997").unwrap();
        let proj = p.projection();

        assert!(proj.forward(0., std::f64::consts::PI, 0.).is_err());
    }
}
