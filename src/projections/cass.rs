//!
//! Cassini-Soldner.
//!
//! The spherical form is the classic transverse-aspect great-circle
//! construction; the ellipsoidal form follows Snyder's series
//! approximation (*Map Projections: A Working Manual*, eq. 14-9/14-11),
//! built on the meridional-arc machinery shared with `sinu`/`eqdc`.
//!
//! See <https://proj.org/operations/projections/cass.html>
//!
//! cass: "Cassini" "\n\tCyl, Sph&Ell"
//!
use crate::errors::Result;
use crate::math::{enfn, inv_mlfn, mlfn, Enfn};
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { cass }

#[derive(Debug, Clone)]
pub(crate) enum Projection {
    Spherical { phi0: f64 },
    Ellipsoidal { es: f64, ep2: f64, en: Enfn, m0: f64 },
}

use Projection::*;

impl Projection {
    pub fn cass(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        let el = &p.ellps;
        if el.is_sphere() {
            Ok(Spherical { phi0: p.phi0 })
        } else {
            let es = el.es;
            let en = enfn(es);
            let m0 = mlfn(p.phi0, p.phi0.sin(), p.phi0.cos(), &en);
            Ok(Ellipsoidal {
                es,
                ep2: es / el.one_es,
                en,
                m0,
            })
        }
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Spherical { phi0 } => {
                let x = (phi.cos() * lam.sin()).asin();
                let y = phi.tan().atan2(lam.cos()) - phi0;
                Ok((x, y, z))
            }
            Ellipsoidal { es, ep2, en, m0 } => {
                let (sphi, cphi) = phi.sin_cos();
                let t = phi.tan();
                let t2 = t * t;
                let n = 1. / (1. - es * sphi * sphi).sqrt();
                let c = ep2 * cphi * cphi;
                let a = lam * cphi;
                let a2 = a * a;
                let a3 = a2 * a;
                let a4 = a3 * a;
                let a5 = a4 * a;

                let x = n * (a - t2 * a3 / 6. - (8. - t2 + 8. * c) * t2 * a5 / 120.);
                let m = mlfn(phi, sphi, cphi, en);
                let y = m - m0 + n * t * (a2 / 2. + (5. - t2 + 6. * c) * a4 / 24.);

                Ok((x, y, z))
            }
        }
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Spherical { phi0 } => {
                let yy = y + phi0;
                let phi = (yy.sin() * x.cos()).asin();
                let lam = x.tan().atan2(yy.cos());
                Ok((lam, phi, z))
            }
            Ellipsoidal { es, ep2: _, en, m0 } => {
                let m1 = m0 + y;
                let phi1 = inv_mlfn(m1, *es, en)?;
                let (sphi1, cphi1) = phi1.sin_cos();
                let t1 = phi1.tan();
                let t1sq = t1 * t1;
                let n1 = 1. / (1. - es * sphi1 * sphi1).sqrt();
                let r1 = (1. - es) / (1. - es * sphi1 * sphi1).powf(1.5);
                let d = x / n1;
                let d2 = d * d;
                let d3 = d2 * d;
                let d4 = d3 * d;
                let d5 = d4 * d;

                let phi = phi1 - (n1 * t1 / r1) * (d2 / 2. - (1. + 3. * t1sq) * d4 / 24.);
                let lam = (d - t1sq * d3 / 3. + (1. + 3. * t1sq) * t1sq * d5 / 15.) / cphi1;

                Ok((lam, phi, z))
            }
        }
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

        for &(lam, phi) in &[(0.02, 0.3), (-0.03, 0.25), (0.01, -0.2)] {
            let (x, y, z) = proj.forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = proj.inverse(x, y, z).unwrap();
            assert_abs_diff_eq!(lam, lam2, epsilon = 1e-8);
            assert_abs_diff_eq!(phi, phi2, epsilon = 1e-8);
        }
    }

    #[test]
    fn proj_cass_spherical_round_trips() {
        round_trips("+proj=cass +R=6370997 +lat_0=0.4");
    }

    #[test]
    fn proj_cass_ellipsoidal_round_trips() {
        round_trips("+proj=cass +ellps=GRS80 +lat_0=0.4");
    }
}
