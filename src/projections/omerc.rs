//!
//! Hotine Oblique Mercator, azimuthal form (EPSG 9812/9815): a central line
//! defined by an origin latitude/longitude and an azimuth, rather than a
//! meridian.
//!
//! Two parameter styles exist in the wild: "Variant A", where the u
//! coordinate origin sits at the aposphere equator crossing, and
//! "Variant B", where it is shifted onto the projection center so the
//! center itself maps to (0, 0). We follow PROJ's own convention: variant
//! selection is never guessed from which parameters happen to be present,
//! only from an explicit `+no_uoff`/`+no_off` flag (selects variant A) or
//! its absence (variant B, the default). The two-point form
//! (`+lat_1`/`+lon_1`/`+lat_2`/`+lon_2`) is not implemented; only the
//! azimuth form (`+alpha`/`+lonc`) is.
//!
//! See <https://proj.org/operations/projections/omerc.html>
//!
//! omerc: "Oblique Mercator" "\n\tCyl, Sph&Ell\n\talpha= [gamma=] [no_rot]\n\tlonc= +lat_0="
//!
use crate::errors::{Error, Result};
use crate::math::{
    consts::{EPS_10, FRAC_PI_4},
    phi2, tsfn,
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { omerc }

#[derive(Debug, Clone)]
pub(crate) struct Projection {
    a: f64,
    b: f64,
    e: f64,
    big_e: f64,
    singam: f64,
    cosgam: f64,
    u_0: f64,
    no_rot: bool,
    v_pole_n: f64,
    v_pole_s: f64,
}

impl Projection {
    pub fn omerc(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        let no_rot = params.check_option("no_rot")?;
        let no_off = params.check_option("no_uoff")? || params.check_option("no_off")?;

        let alpha = params
            .try_angular_value("alpha")?
            .ok_or(Error::InvalidParameterValue("alpha"))?;
        let gamma = params.try_angular_value("gamma")?.unwrap_or(alpha);

        p.lam0 = params.try_angular_value("lonc")?.unwrap_or(0.);

        let el = &p.ellps;
        let phi0 = p.phi0;

        if (phi0.abs() - std::f64::consts::FRAC_PI_2).abs() <= EPS_10 {
            return Err(Error::InvalidParameterValue("lat_0"));
        }

        let (sinph0, cosph0) = phi0.sin_cos();
        let con = 1. - el.es * sinph0 * sinph0;

        let (b, a, big_d);
        if el.es > 0. {
            b = (1. + el.es * cosph0.powi(4) / el.one_es).sqrt();
            a = p.k0 * b * el.one_es.sqrt() / con;
            big_d = b * el.one_es.sqrt() / (cosph0 * con.sqrt());
        } else {
            b = 1.;
            a = p.k0;
            big_d = 1.;
        }

        let big_d = big_d.max(1.);
        let mut f = (big_d * big_d - 1.).max(0.).sqrt();
        if phi0 < 0. {
            f = -f;
        }
        let f = f + big_d;
        let big_e = if el.es > 0. {
            f * tsfn(phi0, sinph0, el.e).powf(b)
        } else {
            f
        };

        let (singam, cosgam) = gamma.sin_cos();

        let mut u_0 = 0.;
        if !no_off {
            u_0 = (a * (big_d * big_d - 1.).max(0.).sqrt().atan2(alpha.cos())).abs();
            if phi0 < 0. {
                u_0 = -u_0;
            }
        }

        let a_r_b = a / b;
        let v_pole_n = a_r_b * (FRAC_PI_4 - 0.5 * gamma).tan().ln();
        let v_pole_s = a_r_b * (FRAC_PI_4 + 0.5 * gamma).tan().ln();

        Ok(Self {
            a,
            b,
            e: el.e,
            big_e,
            singam,
            cosgam,
            u_0,
            no_rot,
            v_pole_n,
            v_pole_s,
        })
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let a_r_b = self.a / self.b;

        let (u, v);
        if (phi.abs() - std::f64::consts::FRAC_PI_2).abs() <= EPS_10 {
            v = if phi > 0. { self.v_pole_n } else { self.v_pole_s };
            u = a_r_b * phi;
        } else {
            let t = tsfn(phi, phi.sin(), self.e);
            let q = self.big_e / t.powf(self.b);
            let s = 0.5 * (q - 1. / q);
            let t2 = 0.5 * (q + 1. / q);
            let big_v = (self.b * lam).sin();
            let big_u = (s * self.singam - big_v * self.cosgam) / t2;
            if (big_u.abs() - 1.).abs() < EPS_10 {
                return Err(Error::CoordTransOutsideProjectionDomain);
            }
            v = 0.5 * a_r_b * ((1. - big_u) / (1. + big_u)).ln();
            let temp = (self.b * lam).cos();
            u = if temp.abs() < 1e-7 {
                self.a * lam
            } else {
                a_r_b * (s * self.cosgam + big_v * self.singam).atan2(temp)
            };
        }

        if self.no_rot {
            Ok((u, v, z))
        } else {
            let u = u - self.u_0;
            Ok((v * self.cosgam + u * self.singam, u * self.cosgam - v * self.singam, z))
        }
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (v, u);
        if self.no_rot {
            v = y;
            u = x;
        } else {
            v = x * self.cosgam - y * self.singam;
            u = y * self.cosgam + x * self.singam + self.u_0;
        }

        let b_r_a = self.b / self.a;
        let qp = (-b_r_a * v).exp();
        let sp = 0.5 * (qp - 1. / qp);
        let tp = 0.5 * (qp + 1. / qp);
        let vp = (b_r_a * u).sin();
        let up = (vp * self.cosgam + sp * self.singam) / tp;

        if (up.abs() - 1.).abs() < EPS_10 {
            let phi = if up > 0. { std::f64::consts::FRAC_PI_2 } else { -std::f64::consts::FRAC_PI_2 };
            return Ok((0., phi, z));
        }

        let ts = self.big_e / ((1. + up) / (1. - up)).sqrt();
        let phi = phi2(ts.powf(1. / self.b), self.e)?;
        let lam = -(1. / self.b) * (sp * self.cosgam - vp * self.singam).atan2((b_r_a * u).cos());

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

        for &(lam, phi) in &[(0.01, 0.4), (-0.02, 0.45), (0.015, 0.42)] {
            let (x, y, z) = proj.forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = proj.inverse(x, y, z).unwrap();
            assert_abs_diff_eq!(lam, lam2, epsilon = 1e-7);
            assert_abs_diff_eq!(phi, phi2, epsilon = 1e-7);
        }
    }

    #[test]
    fn proj_omerc_variant_b_round_trips() {
        round_trips("+proj=omerc +ellps=GRS80 +lat_0=45 +lonc=0 +alpha=15");
    }

    #[test]
    fn proj_omerc_variant_a_round_trips() {
        round_trips("+proj=omerc +ellps=GRS80 +lat_0=45 +lonc=0 +alpha=15 +no_uoff");
    }

    #[test]
    fn proj_omerc_spherical_round_trips() {
        round_trips("+proj=omerc +R=6370997 +lat_0=45 +lonc=0 +alpha=15");
    }
}
