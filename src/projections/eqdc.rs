//!
//! Equidistant Conic.
//!
//! See <https://proj.org/operations/projections/eqdc.html>
//!
//! eqdc: "Equidistant Conic" "\n\tConic, Sph&Ell\n\tlat_1= and lat_2="
//!
use crate::errors::{Error, Result};
use crate::math::{consts::EPS_10, enfn, inv_mlfn, mlfn, msfn, Enfn};
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { eqdc }

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    n: f64,
    rho0: f64,
    c: f64,
    es: f64,
    ellips: bool,
    en: Enfn,
}

impl Projection {
    pub fn eqdc(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        let phi1 = params.try_angular_value("lat_1")?.unwrap_or(0.);
        let phi2 = params.try_angular_value("lat_2")?.unwrap_or(phi1);

        if (phi1 + phi2).abs() < EPS_10 {
            return Err(Error::ProjErrConicLatEqual);
        }

        let es = p.ellps.es;
        let en = enfn(es);
        let ml0 = mlfn(p.phi0, p.phi0.sin(), p.phi0.cos(), &en);

        let (sinphi, cosphi) = phi1.sin_cos();
        let mut n = sinphi;
        let secant = (phi1 - phi2).abs() >= EPS_10;
        let ellips = es > 0.;

        let (n_out, c, rho0);

        if ellips {
            let m1 = msfn(sinphi, cosphi, es);
            let ml1 = mlfn(phi1, sinphi, cosphi, &en);
            if secant {
                let (sinphi2, cosphi2) = phi2.sin_cos();
                n = (m1 - msfn(sinphi2, cosphi2, es)) / (mlfn(phi2, sinphi2, cosphi2, &en) - ml1);
            }
            n_out = n;
            c = ml1 + m1 / n;
            rho0 = c - ml0;
        } else {
            if secant {
                n = (cosphi - phi2.cos()) / (phi2 - phi1);
            }
            n_out = n;
            c = phi1 + cosphi / n;
            rho0 = c - p.phi0;
        }

        Ok(Self {
            n: n_out,
            rho0,
            c,
            es,
            ellips,
            en,
        })
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let rho = self.c
            - if self.ellips {
                mlfn(phi, phi.sin(), phi.cos(), &self.en)
            } else {
                phi
            };

        let lam = lam * self.n;
        Ok((rho * lam.sin(), self.rho0 - rho * lam.cos(), z))
    }

    #[inline(always)]
    pub fn inverse(&self, mut x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let mut yy = self.rho0 - y;
        let mut rho = x.hypot(yy);

        if rho.abs() < EPS_10 {
            return Ok((0., if self.n > 0. { crate::math::consts::FRAC_PI_2 } else { -crate::math::consts::FRAC_PI_2 }, z));
        }

        if self.n < 0. {
            rho = -rho;
            x = -x;
            yy = -yy;
        }

        let phi = self.c - rho;
        let phi = if self.ellips { inv_mlfn(phi, self.es, &self.en)? } else { phi };
        let lam = x.atan2(yy) / self.n;

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

        for &(lam, phi) in &[(0.03, 0.02), (-0.05, 0.04), (0.02, -0.01)] {
            let (x, y, z) = proj.forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = proj.inverse(x, y, z).unwrap();
            assert_abs_diff_eq!(lam, lam2, epsilon = 1e-8);
            assert_abs_diff_eq!(phi, phi2, epsilon = 1e-8);
        }
    }

    #[test]
    fn proj_eqdc_ellipsoidal_round_trips() {
        round_trips("+proj=eqdc +ellps=GRS80 +lat_1=0.5 +lat_2=1.2");
    }

    #[test]
    fn proj_eqdc_spherical_round_trips() {
        round_trips("+proj=eqdc +R=6370997 +lat_1=0.5 +lat_2=1.2");
    }

    #[test]
    fn proj_eqdc_single_parallel_round_trips() {
        round_trips("+proj=eqdc +ellps=GRS80 +lat_1=0.7");
    }
}
