//!
//! Shared numerical kernel for the projection and datum-shift libraries.
//!
//! These are the small closed-form and iterative routines that keep
//! reappearing across projections: angle normalization, the conformal/
//! authalic/meridional auxiliary latitudes (`tsfn`/`phi2`/`qsfn`/`authlat`,
//! `msfn`), the meridional-distance series (`enfn`/`mlfn`/`inv_mlfn`), and
//! the Vincenty direct/inverse geodesic solutions used by the ellipsoidal
//! azimuthal equidistant projection.
//!
#![allow(dead_code)]

pub mod consts;

mod aasincos;
mod vincenty;

pub(crate) use aasincos::{aacos, aasin, aatan2, asqrt};
pub(crate) use vincenty::{vincenty_direct, vincenty_inverse};

use consts::{EPS_10, FRAC_PI_2, PI, TWO_PI};

/// Normalize a longitude (radians) into `(-PI, PI]`.
#[inline]
pub(crate) fn adjlon(mut lon: f64) -> f64 {
    if lon.abs() <= PI {
        return lon;
    }
    lon += PI;
    lon -= TWO_PI * (lon / TWO_PI).floor();
    lon - PI
}

#[inline]
pub(crate) fn asinh(x: f64) -> f64 {
    x.asinh()
}

/// Meridional radius of curvature scale factor (Snyder eq. 4-20).
#[inline]
pub(crate) fn msfn(sinphi: f64, cosphi: f64, es: f64) -> f64 {
    cosphi / (1. - es * sinphi * sinphi).sqrt()
}

/// Isometric latitude function (Snyder eq. 7-7), used by the ellipsoidal
/// Lambert conformal conic and Mercator inverse iteration.
pub(crate) fn tsfn(phi: f64, sinphi: f64, e: f64) -> f64 {
    let con = e * sinphi;
    (0.5 * (FRAC_PI_2 - phi)).tan() / ((1. - con) / (1. + con)).powf(0.5 * e)
}

/// Inverse of [`tsfn`]: recovers the conformal latitude from the isometric
/// latitude `ts` by fixed-point iteration on the ellipsoid eccentricity.
///
/// Iterates to `1e-10` radians with a cap of 15 steps (Mercator/Lambert
/// conformal conic inverse); returns [`Error::NonInvPhi2Convergence`] if the
/// cap is exhausted.
pub(crate) fn phi2(ts: f64, e: f64) -> crate::errors::Result<f64> {
    use crate::errors::Error;

    const TOL: f64 = 1.0e-10;
    const MAX_ITER: usize = 15;

    let half_e = 0.5 * e;
    let mut phi = FRAC_PI_2 - 2. * ts.atan();
    for _ in 0..MAX_ITER {
        let con = e * phi.sin();
        let dphi = FRAC_PI_2 - 2. * (ts * ((1. - con) / (1. + con)).powf(half_e)).atan() - phi;
        phi += dphi;
        if dphi.abs() < TOL {
            return Ok(phi);
        }
    }
    Err(Error::NonInvPhi2Convergence)
}

/// Authalic-latitude helper `q(phi)` (Snyder eq. 3-12), used by the
/// equal-area projections (`cea`, `laea`).
pub(crate) fn qsfn(sinphi: f64, e: f64, one_es: f64) -> f64 {
    if e < EPS_10 {
        return 2. * sinphi;
    }
    let con = e * sinphi;
    one_es * (sinphi / (1. - con * con) - (0.5 / e) * ((1. - con) / (1. + con)).ln())
}

/// Coefficients of the authalic-latitude series (Snyder eq. 3-18),
/// precomputed once per ellipsoid in `init`.
pub(crate) type Apa = (f64, f64, f64);

pub(crate) fn authset(es: f64) -> Apa {
    let es2 = es * es;
    let es3 = es2 * es;
    (
        es * (1. / 3. + es * (31. / 180. + es * 517. / 5040.)),
        es2 * (23. / 360. + es * 251. / 3780.),
        es3 * (761. / 45360.),
    )
}

/// Recover the geographic latitude from the authalic latitude `beta` using
/// the series coefficients from [`authset`].
pub(crate) fn authlat(beta: f64, apa: Apa) -> f64 {
    beta + apa.0 * (2. * beta).sin() + apa.1 * (4. * beta).sin() + apa.2 * (6. * beta).sin()
}

/// Coefficients for the meridional-distance series (Snyder eq. 3-21).
pub(crate) type Enfn = [f64; 5];

#[rustfmt::skip]
pub(crate) fn enfn(es: f64) -> Enfn {
    const C00: f64 = 1.;
    const C02: f64 = 0.25;
    const C04: f64 = 0.046875;
    const C06: f64 = 0.01953125;
    const C08: f64 = 0.01068115234375;
    const C22: f64 = 0.75;
    const C44: f64 = 0.46875;
    const C46: f64 = 0.01302083333333333333;
    const C48: f64 = 0.00712076822916666666666;
    const C66: f64 = 0.36458333333333333333;
    const C68: f64 = 0.00569661458333333333333;
    const C88: f64 = 0.3076171875;

    let es2 = es * es;
    let es3 = es2 * es;
    let es4 = es3 * es;

    [
        C00 - es * (C02 + es * (C04 + es * (C06 + es * C08))),
        es * (C22 - es * (C04 + es * (C06 + es * C08))),
        es2 * (C44 - es * (C46 + es * C48)),
        es3 * (C66 - es * C68),
        es4 * C88,
    ]
}

/// Meridional arc distance from the equator to `phi` (Snyder eq. 3-21).
pub(crate) fn mlfn(phi: f64, sphi: f64, cphi: f64, en: &Enfn) -> f64 {
    let cphi = cphi * sphi;
    let sphi2 = sphi * sphi;
    en[0] * phi - cphi * (en[1] + sphi2 * (en[2] + sphi2 * (en[3] + sphi2 * en[4])))
}

/// Invert [`mlfn`] by Newton iteration: recover `phi` from a meridional arc
/// length `arg`. Iterates to `1e-11` with a cap of 10 steps.
pub(crate) fn inv_mlfn(arg: f64, es: f64, en: &Enfn) -> crate::errors::Result<f64> {
    use crate::errors::Error;

    const MAX_ITER: usize = 10;
    const EPS: f64 = 1.0e-11;

    let k = 1. / (1. - es);
    let mut phi = arg;
    for _ in 0..MAX_ITER {
        let s = phi.sin();
        let t = 1. - es * s * s;
        let dphi = (mlfn(phi, s, phi.cos(), en) - arg) * (t * t.sqrt()) * k;
        phi -= dphi;
        if dphi.abs() < EPS {
            return Ok(phi);
        }
    }
    Err(Error::InvMeridDistConvError)
}
