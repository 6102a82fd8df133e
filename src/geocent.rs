//!
//! Geodetic <-> geocentric (cartesian XYZ) conversion.
//!
//! Used both by the `geocent`/`cart` pseudo-projection and by the transform
//! pipeline when bridging between geographic and cartesian coordinates for
//! datum shifting (Bowring's method).
//!
use crate::errors::{Error, Result};
use crate::math::consts::{FRAC_PI_2, PI, TWO_PI};

const GENAU: f64 = 1.0e-12;
const GENAU2: f64 = GENAU * GENAU;
const MAXITER: usize = 30;
const FRAC_PI_2_EPS: f64 = 1.001 * FRAC_PI_2;

/// Convert geodetic coordinates (lon, lat, height in radians/meters) to
/// geocentric X/Y/Z, given the ellipsoid semi-major axis and `es`.
pub(crate) fn geodetic_to_geocentric(
    x: f64,
    y: f64,
    z: f64,
    a: f64,
    es: f64,
) -> Result<(f64, f64, f64)> {
    let mut lon = x;
    let mut lat = y;

    if lat < -FRAC_PI_2 && lat > -FRAC_PI_2_EPS {
        lat = -FRAC_PI_2
    } else if lat > FRAC_PI_2 && lat < FRAC_PI_2_EPS {
        lat = FRAC_PI_2
    } else if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
        return Err(Error::LatitudeOutOfRange);
    };

    if lon > PI {
        lon -= TWO_PI;
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    let rn = a / (1. - es * (sin_lat * sin_lat)).sqrt();
    Ok((
        (rn + z) * cos_lat * lon.cos(),
        (rn + z) * cos_lat * lon.sin(),
        ((rn * (1. - es)) + z) * sin_lat,
    ))
}

/// Convert geocentric X/Y/Z back to geodetic lon/lat/height, by Bowring's
/// iterative method (converges in 2-3 steps for normal heights).
pub(crate) fn geocentric_to_geodetic(
    x: f64,
    y: f64,
    z: f64,
    a: f64,
    es: f64,
    b: f64,
) -> Result<(f64, f64, f64)> {
    let d2 = (x * x) + (y * y);

    let p = d2.sqrt();
    let rr = (d2 + z * z).sqrt();

    let lon = if p / a < GENAU {
        if rr / a < GENAU {
            return Ok((0., FRAC_PI_2, -b));
        }
        0.
    } else {
        y.atan2(x)
    };

    let ct = z / rr;
    let st = p / rr;
    let mut rx = 1.0 / (1.0 - es * (2.0 - es) * st * st).sqrt();
    let mut cphi0 = st * (1.0 - es) * rx;
    let mut sphi0 = ct * rx;
    let (mut rk, mut rn, mut cphi, mut sphi, mut sdphi, mut height);

    let mut iter = 0;
    loop {
        iter += 1;
        rn = a / (1.0 - es * sphi0 * sphi0).sqrt();
        height = p * cphi0 + z * sphi0 - rn * (1.0 - es * sphi0 * sphi0);

        if (rn + height) == 0. {
            return Ok((lon, 0., height));
        }

        rk = es * rn / (rn + height);
        rx = 1.0 / (1.0 - rk * (2.0 - rk) * st * st).sqrt();
        cphi = st * (1.0 - rk) * rx;
        sphi = ct * rx;
        sdphi = sphi * cphi0 - cphi * sphi0;
        cphi0 = cphi;
        sphi0 = sphi;

        if sdphi * sdphi <= GENAU2 || iter >= MAXITER {
            break;
        }
    }

    Ok((lon, sphi.atan2(cphi.abs()), height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn roundtrips_on_the_equator() {
        let a = 6378137.0;
        let es = 0.0066943799901413165;
        let (x, y, z) = geodetic_to_geocentric(0., 0., 0., a, es).unwrap();
        assert_abs_diff_eq!(x, a, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 0., epsilon = 1e-6);
        assert_abs_diff_eq!(z, 0., epsilon = 1e-6);

        let b = a * (1. - es).sqrt() * (1.0 - es).sqrt();
        let (lon, lat, h) = geocentric_to_geodetic(x, y, z, a, es, b).unwrap();
        assert_abs_diff_eq!(lon, 0., epsilon = 1e-9);
        assert_abs_diff_eq!(lat, 0., epsilon = 1e-9);
        assert_abs_diff_eq!(h, 0., epsilon = 1e-3);
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let a = 6378137.0;
        let es = 0.0066943799901413165;
        assert!(geodetic_to_geocentric(0., 3.0, 0., a, es).is_err());
    }
}
