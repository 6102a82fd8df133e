//!
//! Sinusoidal (Sanson-Flamsteed) pseudocylindrical projection.
//!
//! See <https://proj.org/operations/projections/sinu.html>
//!
//! sinu: "Sinusoidal (Sanson-Flamsteed)" "\n\tPCyl, Sph&Ell"
//!
use crate::errors::Result;
use crate::math::{Enfn, enfn, inv_mlfn, mlfn};
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { sinu }

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    es: f64,
    en: Enfn,
}

impl Projection {
    pub fn sinu(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        let es = p.ellps.es;
        Ok(Self { es, en: enfn(es) })
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (sphi, cphi) = phi.sin_cos();
        let x = lam * cphi / (1. - self.es * sphi * sphi).sqrt();
        let y = mlfn(phi, sphi, cphi, &self.en);
        Ok((x, y, z))
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let phi = inv_mlfn(y, self.es, &self.en)?;
        let (sphi, cphi) = phi.sin_cos();
        let lam = if cphi.abs() < 1e-10 {
            0.
        } else {
            x * (1. - self.es * sphi * sphi).sqrt() / cphi
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

    fn round_trips(def: &str) {
        let p = Proj::from_proj_string(def).unwrap();
        let proj = p.projection();

        for &(lam, phi) in &[(0.0349, 0.0175), (-0.5, 0.6), (1.2, -0.3)] {
            let (x, y, z) = proj.forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = proj.inverse(x, y, z).unwrap();
            assert_abs_diff_eq!(lam, lam2, epsilon = 1e-9);
            assert_abs_diff_eq!(phi, phi2, epsilon = 1e-9);
        }
    }

    #[test]
    fn proj_sinu_spherical_round_trips() {
        round_trips("+proj=sinu +R=6370997");
    }

    #[test]
    fn proj_sinu_ellipsoidal_round_trips() {
        round_trips("+proj=sinu +ellps=GRS80");
    }
}
