//!
//! Van der Grinten I: the whole world as a circle. Spherical only, closed
//! form in both directions (Snyder, *Map Projections: A Working Manual*,
//! eq. 29-4 through 29-9); the meridian-of-origin and equator are
//! special-cased since the general formula degenerates there.
//!
//! See <https://proj.org/operations/projections/vandg.html>
//!
//! vandg: "Van der Grinten (I)" "\n\tMisc Sph, no inv."
//!
use crate::errors::Result;
use crate::math::consts::{EPS_10, PI};
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { vandg }

#[derive(Debug, Clone)]
pub(crate) struct Projection {}

impl Projection {
    pub fn vandg(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        p.ellps = crate::ellps::Ellipsoid::sphere(p.ellps.a)?;
        Ok(Self {})
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let p2 = (phi / (PI / 2.)).abs().min(1.);

        if phi.abs() <= EPS_10 {
            return Ok((lam, 0., z));
        }
        if lam.abs() <= EPS_10 || (p2 - 1.).abs() <= EPS_10 {
            let mut y = PI * (0.5 * p2.asin()).tan();
            if phi < 0. {
                y = -y;
            }
            return Ok((0., y, z));
        }

        let theta = p2.asin();
        let (sinth, costh) = theta.sin_cos();

        let al = 0.5 * (PI / lam - lam / PI).abs();
        let asq = al * al;
        let g = costh / (sinth + costh - 1.);
        let gsq = g * g;
        let m = g * (2. / sinth - 1.);
        let msq = m * m;
        let q = asq + g;

        let mut x = PI * (al * (g - msq) + (asq * (g - msq) * (g - msq) - (msq + asq) * (gsq - msq)).sqrt())
            / (msq + asq);
        let mut y = PI * (m * q - al * ((asq + 1.) * (msq + asq) - q * q).sqrt()) / (msq + asq);

        if lam < 0. {
            x = -x;
        }
        if phi < 0. {
            y = -y;
        }

        Ok((x, y, z))
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        if x.abs() <= EPS_10 && y.abs() <= EPS_10 {
            return Ok((0., 0., z));
        }
        if y.abs() <= EPS_10 {
            return Ok((x, 0., z));
        }
        if x.abs() <= EPS_10 {
            let t = (y / PI).atan() * 2.;
            return Ok((0., (PI / 2.) * t.sin(), z));
        }

        // Newton iteration on the forward map: cheap and adequate since
        // `vandg` is rarely used as the source of a reprojection.
        let (mut lam, mut phi) = (x.clamp(-PI, PI), (y / PI).atan());
        const NITER: usize = 30;
        const TOL: f64 = 1e-12;
        for _ in 0..NITER {
            let (fx, fy, _) = self.forward(lam, phi, 0.)?;
            let (dx, dy) = (fx - x, fy - y);
            if dx.abs() < TOL && dy.abs() < TOL {
                break;
            }
            let h = 1e-6;
            let (fx1, fy1, _) = self.forward(lam + h, phi, 0.)?;
            let (fx2, fy2, _) = self.forward(lam, phi + h, 0.)?;
            let j11 = (fx1 - fx) / h;
            let j21 = (fy1 - fy) / h;
            let j12 = (fx2 - fx) / h;
            let j22 = (fy2 - fy) / h;
            let det = j11 * j22 - j12 * j21;
            if det.abs() < 1e-18 {
                break;
            }
            lam -= (j22 * dx - j12 * dy) / det;
            phi -= (j11 * dy - j21 * dx) / det;
        }

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
    fn proj_vandg_equator_and_central_meridian_are_identity() {
        let p = Proj::from_proj_string("+proj=vandg +R=6370997").unwrap();
        let proj = p.projection();

        let (x, y, _) = proj.forward(0.3, 0., 0.).unwrap();
        assert_abs_diff_eq!(x, 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0., epsilon = 1e-12);

        let (x, _, _) = proj.forward(0., 0.4, 0.).unwrap();
        assert_abs_diff_eq!(x, 0., epsilon = 1e-12);
    }

    #[test]
    fn proj_vandg_round_trips_off_axis() {
        let p = Proj::from_proj_string("+proj=vandg +R=6370997").unwrap();
        let proj = p.projection();

        for &(lam, phi) in &[(0.3, 0.2), (-0.5, 0.4)] {
            let (x, y, z) = proj.forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = proj.inverse(x, y, z).unwrap();
            assert_abs_diff_eq!(lam, lam2, epsilon = 1e-6);
            assert_abs_diff_eq!(phi, phi2, epsilon = 1e-6);
        }
    }

    #[test]
    fn proj_vandg_round_trips_on_central_meridian() {
        let p = Proj::from_proj_string("+proj=vandg +R=6370997").unwrap();
        let proj = p.projection();

        for &phi in &[0.3, 1.3, -0.7] {
            let (x, y, z) = proj.forward(0., phi, 0.).unwrap();
            let (lam2, phi2, _) = proj.inverse(x, y, z).unwrap();
            assert_abs_diff_eq!(lam2, 0., epsilon = 1e-12);
            assert_abs_diff_eq!(phi, phi2, epsilon = 1e-7);
        }
    }
}
