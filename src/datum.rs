//!
//! Datum shift: Helmert 3-/7-parameter transforms and grid-shift (nadgrids),
//! always routed through geocentric XYZ as the common intermediate.
//!
use crate::ellps::Ellipsoid;
use crate::errors::Result;
use crate::geocent::{geocentric_to_geodetic, geodetic_to_geocentric};
use crate::nadgrids::NadGrids;
use crate::transform::Direction;

use DatumParams::*;

/// Datum shift parameters, precedence resolved as `nadgrids` > `towgs84` >
/// named `datum` > none.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DatumParams {
    ToWGS84_0,
    ToWGS84_3(f64, f64, f64),
    ToWGS84_7(f64, f64, f64, f64, f64, f64, f64),
    NadGrids(NadGrids),
    NoDatum,
}

impl Default for DatumParams {
    fn default() -> Self {
        DatumParams::NoDatum
    }
}

/// A resolved datum: shift parameters plus the ellipsoid they apply to.
#[derive(Debug, Clone)]
pub(crate) struct Datum {
    params: DatumParams,
    a: f64,
    b: f64,
    es: f64,
}

impl Datum {
    pub fn new(ellps: &Ellipsoid, params: DatumParams) -> Self {
        Self {
            params,
            a: ellps.a,
            b: ellps.b,
            es: ellps.es,
        }
    }

    /// Geodetic -> WGS84 geocentric.
    pub fn towgs84(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match &self.params {
            ToWGS84_0 => geodetic_to_geocentric(x, y, z, self.a, self.es),
            ToWGS84_3(dx, dy, dz) => geodetic_to_geocentric(x, y, z, self.a, self.es)
                .map(|(x, y, z)| (x + dx, y + dy, z + dz)),
            ToWGS84_7(dx, dy, dz, rx, ry, rz, s) => {
                geodetic_to_geocentric(x, y, z, self.a, self.es).map(|(x, y, z)| {
                    (
                        dx + s * (x - rz * y + ry * z),
                        dy + s * (rz * x + y - rx * z),
                        dz + s * (-ry * x + rx * y + z),
                    )
                })
            }
            NadGrids(grids) => {
                let (lam, phi, z) = grids.apply_shift(Direction::Forward, x, y, z)?;
                geodetic_to_geocentric(lam, phi, z, self.a, self.es)
            }
            NoDatum => Ok((x, y, z)),
        }
    }

    /// WGS84 geocentric -> geodetic.
    pub fn fromwgs84(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match &self.params {
            ToWGS84_0 => geocentric_to_geodetic(x, y, z, self.a, self.es, self.b),
            ToWGS84_3(dx, dy, dz) => {
                geocentric_to_geodetic(x - dx, y - dy, z - dz, self.a, self.es, self.b)
            }
            ToWGS84_7(dx, dy, dz, rx, ry, rz, s) => {
                let (x, y, z) = ((x - dx) / s, (y - dy) / s, (z - dz) / s);
                geocentric_to_geodetic(
                    x + rz * y - ry * z,
                    -rz * x + y + rx * z,
                    ry * x - rx * y + z,
                    self.a,
                    self.es,
                    self.b,
                )
            }
            NadGrids(grids) => {
                let (lam, phi, z) = geocentric_to_geodetic(x, y, z, self.a, self.es, self.b)?;
                grids.apply_shift(Direction::Inverse, lam, phi, z)
            }
            NoDatum => Ok((x, y, z)),
        }
    }

    pub fn use_nadgrids(&self) -> bool {
        matches!(self.params, NadGrids(_))
    }

    pub fn no_datum(&self) -> bool {
        matches!(self.params, NoDatum)
    }

    /// Two datums are identical (no shift needed between them) if either
    /// both route through nadgrids, or their raw shift parameters match
    /// exactly, and their ellipsoid is close enough (`es` tolerance lets
    /// GRS80 and WGS84 compare equal).
    pub fn is_identical_to(&self, other: &Self) -> bool {
        (self.use_nadgrids() && other.use_nadgrids() || self.params == other.params)
            && self.a == other.a
            && (self.es - other.es).abs() < 0.000000000050
    }
}

const SRS_WGS84_SEMIMAJOR: f64 = 6378137.0;
const SRS_WGS84_SEMIMINOR: f64 = 6356752.314;
const SRS_WGS84_ES: f64 = 0.0066943799901413165;

/// A source/destination datum pair, precomputed once per [`crate::transform::transform`]
/// call rather than per-point.
pub(crate) struct DatumTransform {
    src: Datum,
    dst: Datum,
    identity: bool,
}

impl DatumTransform {
    pub fn new(mut src: Datum, mut dst: Datum) -> Self {
        // Grid-shift definitions are always referenced to WGS84.
        if src.use_nadgrids() {
            src.a = SRS_WGS84_SEMIMAJOR;
            src.b = SRS_WGS84_SEMIMINOR;
            src.es = SRS_WGS84_ES;
        }
        if dst.use_nadgrids() {
            dst.a = SRS_WGS84_SEMIMAJOR;
            dst.b = SRS_WGS84_SEMIMINOR;
            dst.es = SRS_WGS84_ES;
        }

        let identity = src.params == NoDatum
            || dst.params == NoDatum
            || src.is_identical_to(&dst)
            || (src.a == dst.a && src.es == dst.es && src.use_nadgrids() && dst.use_nadgrids());

        Self { src, dst, identity }
    }

    pub fn transform(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        if self.identity {
            Ok((x, y, z))
        } else {
            self.src
                .towgs84(x, y, z)
                .and_then(|(x, y, z)| self.dst.fromwgs84(x, y, z))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn grs80() -> Ellipsoid {
        Ellipsoid::from_a_rf(6378137.0, 298.257222101).unwrap()
    }

    #[test]
    fn no_datum_is_identity() {
        let d = Datum::new(&grs80(), DatumParams::NoDatum);
        let out = d.towgs84(1., 2., 3.).unwrap();
        assert_eq!(out, (1., 2., 3.));
    }

    #[test]
    fn towgs84_3_roundtrips_through_fromwgs84() {
        let ellps = grs80();
        let src = Datum::new(&ellps, DatumParams::ToWGS84_3(100., -50., 20.));
        let dst = Datum::new(&ellps, DatumParams::ToWGS84_0);

        let xform = DatumTransform::new(src, dst);
        assert!(!xform.identity);

        let (lon, lat, h) = (2.0f64.to_radians(), 48.0f64.to_radians(), 100.0);
        let (x, y, z) = xform.transform(lon, lat, h).unwrap();

        // Reconstruct the un-shifted geocentric point from the chain and
        // check it's close to the geodetic_to_geocentric of the original.
        let (gx, gy, gz) = geodetic_to_geocentric(lon, lat, h, ellps.a, ellps.es).unwrap();
        let (ux, uy, uz) = geodetic_to_geocentric(x, y, z, ellps.a, ellps.es).unwrap();
        assert_abs_diff_eq!(ux - gx, 100., epsilon = 1e-6);
        assert_abs_diff_eq!(uy - gy, -50., epsilon = 1e-6);
        assert_abs_diff_eq!(uz - gz, 20., epsilon = 1e-6);
    }

    #[test]
    fn identical_datums_skip_shift() {
        let ellps = grs80();
        let src = Datum::new(&ellps, DatumParams::ToWGS84_0);
        let dst = Datum::new(&ellps, DatumParams::ToWGS84_0);
        assert!(DatumTransform::new(src, dst).identity);
    }
}
