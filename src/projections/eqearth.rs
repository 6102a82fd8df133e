//!
//! Equal Earth projection (Šavrić, Patterson & Jenny, 2018).
//!
//! A closed-form polynomial in an auxiliary parametric latitude; spherical
//! only, as in the original publication.
//!
//! See <https://proj.org/operations/projections/eqearth.html>
//!
//! eqearth: "Equal Earth" "\n\tPCyl, Sph"
//!
use crate::errors::{Error, Result};
use crate::math::consts::EPS_10;
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { eqearth }

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;
const M: f64 = 0.8660254037844386; // sqrt(3) / 2
const NITER: usize = 12;

#[derive(Debug, Clone)]
pub(crate) struct Projection {}

impl Projection {
    pub fn eqearth(p: &mut ProjData, _: &ParamList) -> Result<Self> {
        p.ellps = crate::ellps::Ellipsoid::sphere(p.ellps.a)?;
        Ok(Self {})
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let theta = (M * phi.sin()).asin();
        let theta2 = theta * theta;
        let theta6 = theta2 * theta2 * theta2;

        let x = lam * theta.cos() / (M * (A1 + 3. * A2 * theta2 + theta6 * (7. * A3 + 9. * A4 * theta2)));
        let y = theta * (A1 + A2 * theta2 + theta6 * (A3 + A4 * theta2));

        Ok((x, y, z))
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let mut theta = y;
        for _ in 0..NITER {
            let theta2 = theta * theta;
            let theta6 = theta2 * theta2 * theta2;
            let fy = theta * (A1 + A2 * theta2 + theta6 * (A3 + A4 * theta2)) - y;
            let fpy = A1 + 3. * A2 * theta2 + theta6 * (7. * A3 + 9. * A4 * theta2);
            let dtheta = fy / fpy;
            theta -= dtheta;
            if dtheta.abs() < EPS_10 {
                break;
            }
        }

        let theta2 = theta * theta;
        let theta6 = theta2 * theta2 * theta2;
        let coslat = theta.cos();
        if coslat.abs() < EPS_10 {
            return Err(Error::ToleranceConditionError);
        }

        let lam = M * x * (A1 + 3. * A2 * theta2 + theta6 * (7. * A3 + 9. * A4 * theta2)) / coslat;
        let phi = (theta.sin() / M).asin();

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
    fn proj_eqearth_origin_is_identity() {
        let p = Proj::from_proj_string("+proj=eqearth +R=6370997").unwrap();
        let proj = p.projection();

        let (x, y, _) = proj.forward(0., 0., 0.).unwrap();
        assert_abs_diff_eq!(x, 0., epsilon = 1e-9);
        assert_abs_diff_eq!(y, 0., epsilon = 1e-9);
    }

    #[test]
    fn proj_eqearth_round_trips() {
        let p = Proj::from_proj_string("+proj=eqearth +R=6370997").unwrap();
        let proj = p.projection();

        for &(lam, phi) in &[(0.3, 0.4), (-0.8, -0.5), (1.5, 0.9)] {
            let (x, y, z) = proj.forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = proj.inverse(x, y, z).unwrap();
            assert_abs_diff_eq!(lam, lam2, epsilon = 1e-9);
            assert_abs_diff_eq!(phi, phi2, epsilon = 1e-9);
        }
    }
}
