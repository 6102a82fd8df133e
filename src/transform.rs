//!
//! Overall coordinate system to coordinate system transformation: the
//! pipeline that drives reprojection and datum shifting between two
//! resolved [`Proj`] endpoints.
//!
use crate::datum::DatumTransform;
use crate::errors::{Error, Result};
use crate::geocent::{geocentric_to_geodetic, geodetic_to_geocentric};
use crate::math::{adjlon, consts::EPS_12, consts::FRAC_PI_2};
use crate::proj::{Axis, Proj};

/// Lets a transform be agnostic to the coordinate's storage: a single
/// `(f64, f64, f64)`, an array of them, or any caller type that can apply
/// a coordinate-mapping closure to itself.
///
/// ```
/// use geocrs::transform::{transform, Transform};
/// use geocrs::errors::Result;
///
/// struct Point { x: f64, y: f64, z: f64 }
///
/// impl Transform for Point {
///     fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
///     where
///         F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
///     {
///         let (x, y, z) = f(self.x, self.y, self.z)?;
///         self.x = x;
///         self.y = y;
///         self.z = z;
///         Ok(())
///     }
/// }
/// ```
pub trait Transform {
    fn transform_coordinates<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>;
}

/// Selects which way a per-stage adjustment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

use Direction::*;

/// Reproject and datum-shift `points` from `src` to `dst` in place.
///
/// Stages run in order: denormalize axes, projected-to-cartesian (for
/// geocentric sources), inverse projection, prime meridian, datum shift,
/// prime meridian, forward projection, cartesian-to-projected (for
/// geocentric destinations), normalize axes. The axis-permutation stages
/// (first and last) only run when `enforce_axis` is set; callers that
/// already work in normalized `enu` order, or that want to handle axis
/// order themselves, pass `false` to skip them.
pub fn transform<P>(src: &Proj, dst: &Proj, points: &mut P, enforce_axis: bool) -> Result<()>
where
    P: Transform + ?Sized,
{
    if !src.has_inverse() {
        return Err(Error::NoInverseProjectionDefined);
    }
    if !dst.has_forward() {
        return Err(Error::NoForwardProjectionDefined);
    }

    if enforce_axis {
        adjust_axes(src, Inverse, points)?;
    }
    geographic_to_cartesian(src, Inverse, points)?;
    projected_to_geographic(src, points)?;
    prime_meridian(src, Inverse, points)?;

    datum_transform(src, dst, points)?;

    prime_meridian(dst, Forward, points)?;
    geographic_to_cartesian(dst, Forward, points)?;
    geographic_to_projected(dst, points)?;
    if enforce_axis {
        adjust_axes(dst, Forward, points)?;
    }

    Ok(())
}

fn datum_transform<P>(src: &Proj, dst: &Proj, points: &mut P) -> Result<()>
where
    P: Transform + ?Sized,
{
    let src_datum = &src.data().datum;
    let dst_datum = &dst.data().datum;

    // As of PROJ's own behavior, datum transformation is skipped if either
    // side has no datum information, or if the two datums are identical.
    if src_datum.no_datum() || dst_datum.no_datum() || src_datum.is_identical_to(dst_datum) {
        return Ok(());
    }

    let xform = DatumTransform::new(src_datum.clone(), dst_datum.clone());
    points.transform_coordinates(|x, y, z| xform.transform(x, y, z))
}

fn projected_to_geographic<P>(p: &Proj, points: &mut P) -> Result<()>
where
    P: Transform + ?Sized,
{
    let data = p.data();
    if data.is_latlong() && !data.geoc {
        return Ok(());
    }

    let (lam0, x0, y0) = (data.lam0, data.x0, data.y0);
    let (ra, one_es, to_meter) = (data.ellps.ra, data.ellps.one_es, data.to_meter);
    let proj = p.projection();

    points.transform_coordinates(|x, y, z| {
        if x.is_nan() || y.is_nan() {
            return Err(Error::NanCoordinateValue);
        }
        let (mut lam, mut phi, z) = proj
            .inverse((x * to_meter - x0) * ra, (y * to_meter - y0) * ra, z)
            .map_err(Error::into_out_of_domain)?;
        lam += lam0;
        if !data.over {
            lam = adjlon(lam);
        }
        if data.geoc && (phi.abs() - FRAC_PI_2).abs() > EPS_12 {
            phi = (one_es * phi.tan()).atan();
        }
        Ok((lam, phi, z))
    })
}

fn geographic_to_projected<P>(p: &Proj, points: &mut P) -> Result<()>
where
    P: Transform + ?Sized,
{
    let data = p.data();
    if (data.is_latlong() && !data.geoc) || data.is_geocent() {
        return Ok(());
    }

    let (lam0, x0, y0) = (data.lam0, data.x0, data.y0);
    let (a, rone_es, to_meter) = (data.ellps.a, data.ellps.rone_es, data.to_meter);
    let proj = p.projection();
    let fr_meter = 1. / to_meter;

    points.transform_coordinates(|lam, phi, z| {
        if lam.is_nan() || phi.is_nan() {
            return Err(Error::NanCoordinateValue);
        }
        let t = phi.abs() - FRAC_PI_2;
        if t > EPS_12 || lam.abs() > 10. {
            return Err(Error::CoordinateOutOfRange);
        }
        let lam_in = if !data.over {
            adjlon(lam - lam0)
        } else {
            lam - lam0
        };
        let phi_in = if t.abs() <= EPS_12 {
            if phi < 0. {
                -FRAC_PI_2
            } else {
                FRAC_PI_2
            }
        } else if data.geoc {
            (rone_es * phi.tan()).atan()
        } else {
            phi
        };
        let (x, y, z) = proj
            .forward(lam_in, phi_in, z)
            .map_err(Error::into_out_of_domain)?;
        Ok((fr_meter * (a * x + x0), fr_meter * (a * y + y0), z))
    })
}

fn geographic_to_cartesian<P>(p: &Proj, dir: Direction, points: &mut P) -> Result<()>
where
    P: Transform + ?Sized,
{
    let data = p.data();
    if !data.is_geocent() {
        return Ok(());
    }

    let (a, b, es) = (data.ellps.a, data.ellps.b, data.ellps.es);
    let fac = data.to_meter;

    match dir {
        Forward => points
            .transform_coordinates(|x, y, z| {
                geodetic_to_geocentric(x, y, z, a, es).map(|(x, y, z)| (x * fac, y * fac, z * fac))
            }),
        Inverse => points
            .transform_coordinates(|x, y, z| {
                geocentric_to_geodetic(x * fac, y * fac, z * fac, a, es, b)
            }),
    }
}

fn prime_meridian<P>(p: &Proj, dir: Direction, points: &mut P) -> Result<()>
where
    P: Transform + ?Sized,
{
    let data = p.data();
    let mut pm = data.from_greenwich;
    if pm == 0. || data.is_geocent() || data.is_latlong() {
        return Ok(());
    }
    if dir == Forward {
        pm = -pm;
    }
    points.transform_coordinates(move |x, y, z| Ok((x + pm, y, z)))
}

fn adjust_axes<P>(p: &Proj, dir: Direction, points: &mut P) -> Result<()>
where
    P: Transform + ?Sized,
{
    let data = p.data();
    if data.normalized_axis() {
        return Ok(());
    }
    match dir {
        Forward => denormalize_axis(&data.axis, points),
        Inverse => normalize_axis(&data.axis, points),
    }
}

fn normalize_axis<P: Transform + ?Sized>(axis: &Axis, points: &mut P) -> Result<()> {
    points.transform_coordinates(|x, y, z| {
        let (mut x_out, mut y_out, mut z_out) = (x, y, z);
        axis.iter().enumerate().for_each(|(i, axe)| {
            let value = match i {
                0 => x,
                1 => y,
                _ => z,
            };
            match axe {
                b'e' => x_out = value,
                b'w' => x_out = -value,
                b'n' => y_out = value,
                b's' => y_out = -value,
                b'u' => z_out = value,
                b'd' => z_out = -value,
                _ => unreachable!("axis bytes are validated at derivation time"),
            }
        });
        Ok((x_out, y_out, z_out))
    })
}

fn denormalize_axis<P: Transform + ?Sized>(axis: &Axis, points: &mut P) -> Result<()> {
    points.transform_coordinates(|x, y, z| {
        let (mut x_out, mut y_out, mut z_out) = (x, y, z);
        axis.iter().enumerate().for_each(|(i, axe)| {
            let value = match axe {
                b'e' => x,
                b'w' => -x,
                b'n' => y,
                b's' => -y,
                b'u' => z,
                b'd' => -z,
                _ => unreachable!("axis bytes are validated at derivation time"),
            };
            match i {
                0 => x_out = value,
                1 => y_out = value,
                _ => z_out = value,
            }
        });
        Ok((x_out, y_out, z_out))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptors::transform_xy;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_transform_is_a_noop() {
        let p = Proj::from_proj_string("+proj=longlat +ellps=WGS84").unwrap();
        let (x, y) = transform_xy(&p, &p, 2.0f64.to_radians(), 48.0f64.to_radians()).unwrap();
        assert_abs_diff_eq!(x, 2.0f64.to_radians(), epsilon = 1e-12);
        assert_abs_diff_eq!(y, 48.0f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn merc_round_trips_through_longlat() {
        let from = Proj::from_proj_string("+proj=longlat +ellps=GRS80").unwrap();
        let to = Proj::from_proj_string("+proj=merc +ellps=GRS80").unwrap();

        let (x, y) = transform_xy(&from, &to, 2.0f64.to_radians(), 48.0f64.to_radians()).unwrap();
        let (lam, phi) = transform_xy(&to, &from, x, y).unwrap();

        assert_abs_diff_eq!(lam, 2.0f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(phi, 48.0f64.to_radians(), epsilon = 1e-9);
    }
}
