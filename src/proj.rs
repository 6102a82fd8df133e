//!
//! Projection installation.
//!
//! Turns a raw [`ParamList`] (or, via [`Definition`], any supported source
//! format) into a [`Proj`]: a resolved [`ProjData`] context plus the
//! dispatched [`ProjDelegate`] that does the actual forward/inverse work.
//! This is the one place derivation happens — ellipsoid, datum, prime
//! meridian, axis and unit resolution all funnel through [`Proj::init`] so
//! that every entry point (PROJ-string, WKT, PROJJSON, EPSG) gets identical
//! semantics.
//!
use crate::datum::{Datum, DatumParams};
use crate::datums::{self, DatumShift};
use crate::definition::Definition;
use crate::ellipsoids::{self, FlatteningParam};
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::nadgrids::NadGrids;
use crate::parameters::ParamList;
use crate::primemeridians;
use crate::projections::{self, ProjDelegate};
use crate::projstring;
use crate::units;

pub type Axis = [u8; 3];

const NORMALIZED_AXIS: Axis = [b'e', b'n', b'u'];

/// What kind of coordinates a projection's forward/inverse actually deal
/// in, beyond the generic "geographic <-> projected" case. Set by a
/// projection's own `init` (see `projections::geocent`, `projections::latlong`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ProjType {
    #[default]
    Other,
    LongLat,
    Geocentric,
}

/// The resolved, per-instance projection context: everything a
/// projection's `forward`/`inverse` and the transform pipeline need, after
/// all named lookups (ellipsoid, datum, unit, prime meridian) have been
/// applied. Mutable during `init` (individual projections may override
/// `x0`/`y0`/`k0`/`lam0`/`phi0`, e.g. `+proj=ups`), immutable afterwards.
#[derive(Debug)]
pub(crate) struct ProjData {
    pub ellps: Ellipsoid,
    pub(crate) datum: Datum,
    pub axis: Axis,
    pub to_meter: f64,
    pub from_greenwich: f64,
    pub(crate) proj_type: ProjType,
    pub geoc: bool,
    pub over: bool,
    pub lam0: f64,
    pub phi0: f64,
    pub k0: f64,
    pub x0: f64,
    pub y0: f64,
}

impl ProjData {
    #[inline]
    pub fn is_geocent(&self) -> bool {
        self.proj_type == ProjType::Geocentric
    }

    #[inline]
    pub fn is_latlong(&self) -> bool {
        self.proj_type == ProjType::LongLat
    }

    #[inline]
    pub fn normalized_axis(&self) -> bool {
        self.axis == NORMALIZED_AXIS
    }
}

fn resolve_datum_defn(params: &ParamList) -> Result<Option<&'static datums::DatumDefn>> {
    match params.try_value::<&str>("datum")? {
        Some(name) => datums::find_datum(name).map(Some).ok_or(Error::InvalidDatum),
        None => Ok(None),
    }
}

fn parse_towgs84_values(s: &str) -> Result<Vec<f64>> {
    let values: std::result::Result<Vec<f64>, _> =
        s.split(',').map(|v| v.trim().parse::<f64>()).collect();
    let values = values.map_err(|_| Error::InvalidToWGS84String)?;
    if values.len() != 3 && values.len() != 7 {
        return Err(Error::InvalidToWGS84String);
    }
    Ok(values)
}

fn towgs84_params(values: &[f64]) -> DatumParams {
    match values {
        [dx, dy, dz] => DatumParams::ToWGS84_3(*dx, *dy, *dz),
        [dx, dy, dz, rx, ry, rz, s] => DatumParams::ToWGS84_7(*dx, *dy, *dz, *rx, *ry, *rz, *s),
        _ => unreachable!("validated by parse_towgs84_values"),
    }
}

/// Precedence: `nadgrids` > `towgs84` > named `datum` > none.
fn resolve_datum_params(
    params: &ParamList,
    datum_defn: Option<&datums::DatumDefn>,
) -> Result<DatumParams> {
    if let Some(s) = params.try_value::<&str>("nadgrids")? {
        return Ok(DatumParams::NadGrids(NadGrids::new_grid_transform(s)?));
    }
    if let Some(s) = params.try_value::<&str>("towgs84")? {
        return Ok(towgs84_params(&parse_towgs84_values(s)?));
    }
    if let Some(defn) = datum_defn {
        return match defn.shift {
            DatumShift::ToWgs84_3(x, y, z) => Ok(DatumParams::ToWGS84_3(x, y, z)),
            DatumShift::NadGrids(s) => Ok(DatumParams::NadGrids(NadGrids::new_grid_transform(s)?)),
            DatumShift::None => Ok(DatumParams::NoDatum),
        };
    }
    Ok(DatumParams::NoDatum)
}

/// Resolve the ellipsoid: `+R` (sphere) overrides everything, else a named
/// `+ellps=` or the datum's ellipsoid provides the base `(a, rf_or_b)`
/// pair (falling back to WGS84), with `+a`/`+b`/`+rf`/`+f`/`+es`/`+e`
/// overriding individual parameters by precedence `rf` > `f` > `es` > `e`
/// > `b`. `+R_A` then collapses the result to the authalic sphere.
fn resolve_ellipsoid(
    params: &ParamList,
    datum_defn: Option<&datums::DatumDefn>,
) -> Result<Ellipsoid> {
    if let Some(r) = params.try_value::<f64>("R")? {
        return Ellipsoid::sphere(r);
    }

    let named = params.try_value::<&str>("ellps")?;
    let base_name = named.or_else(|| datum_defn.map(|d| d.ellipsoid));
    let base = match base_name {
        Some(name) => ellipsoids::find_ellipsoid(name).ok_or(Error::InvalidEllipsoid)?,
        None => &ellipsoids::constants::WGS84,
    };

    let a = params.try_value::<f64>("a")?.unwrap_or(base.a);

    let ellps = if let Some(rf) = params.try_value::<f64>("rf")? {
        Ellipsoid::from_a_rf(a, rf)?
    } else if let Some(f) = params.try_value::<f64>("f")? {
        Ellipsoid::from_a_f(a, f)?
    } else if let Some(es) = params.try_value::<f64>("es")? {
        Ellipsoid::from_a_f(a, 1. - (1. - es).sqrt())?
    } else if let Some(e) = params.try_value::<f64>("e")? {
        Ellipsoid::from_a_f(a, 1. - (1. - e * e).sqrt())?
    } else if let Some(b) = params.try_value::<f64>("b")? {
        Ellipsoid::from_a_b(a, b)?
    } else {
        match base.rf_or_b {
            FlatteningParam::MinorAxis(b) => Ellipsoid::from_a_b(a, b)?,
            FlatteningParam::InvFlat(rf) => Ellipsoid::from_a_rf(a, rf)?,
        }
    };

    if params.check_option("R_A")? {
        Ellipsoid::sphere(ellps.authalic_radius())
    } else {
        Ok(ellps)
    }
}

fn resolve_from_greenwich(params: &ParamList) -> Result<f64> {
    match params.try_value::<&str>("pm")? {
        None => Ok(0.),
        Some(pm) => match pm.parse::<f64>() {
            Ok(deg) => Ok(deg.to_radians()),
            Err(_) => primemeridians::find_prime_meridian(pm)
                .ok_or(Error::InvalidParameterValue("unknown prime meridian")),
        },
    }
}

fn resolve_axis(params: &ParamList) -> Result<Axis> {
    match params.try_value::<&str>("axis")? {
        None => Ok(NORMALIZED_AXIS),
        Some(arg) => {
            if arg.len() != 3 {
                return Err(Error::InvalidAxis);
            }
            let mut axis = [0u8; 3];
            let ew = arg.find(['e', 'w']).ok_or(Error::InvalidAxis)?;
            let ns = arg.find(['n', 's']).ok_or(Error::InvalidAxis)?;
            let ud = arg.find(['u', 'd']).ok_or(Error::InvalidAxis)?;
            let bytes = arg.as_bytes();
            axis[ew] = bytes[ew];
            axis[ns] = bytes[ns];
            axis[ud] = bytes[ud];
            Ok(axis)
        }
    }
}

fn resolve_to_meter(params: &ParamList) -> Result<f64> {
    if let Some(v) = params.try_value::<f64>("to_meter")? {
        return Ok(v);
    }
    match params.try_value::<&str>("units")? {
        None => Ok(1.),
        Some(name) => units::find_unit_to_meter(name)
            .ok_or_else(|| Error::InvalidParameterValue("unknown unit")),
    }
}

/// A fully resolved, ready-to-use CRS transform endpoint: a [`ProjData`]
/// context and the dispatched projection implementation.
#[derive(Debug)]
pub struct Proj {
    data: ProjData,
    delegate: ProjDelegate,
}

impl Proj {
    fn init(params: ParamList) -> Result<Self> {
        let proj_name = params
            .try_value::<&str>("proj")?
            .ok_or(Error::MissingProjectionError)?;

        let init = projections::find_projection(proj_name)
            .ok_or_else(|| Error::ProjectionNotFound(proj_name.to_string()))?;

        let datum_defn = resolve_datum_defn(&params)?;
        let datum_params = resolve_datum_params(&params, datum_defn)?;
        let ellps = resolve_ellipsoid(&params, datum_defn)?;
        let datum = Datum::new(&ellps, datum_params);

        let mut data = ProjData {
            ellps,
            datum,
            axis: resolve_axis(&params)?,
            to_meter: resolve_to_meter(&params)?,
            from_greenwich: resolve_from_greenwich(&params)?,
            proj_type: ProjType::Other,
            geoc: params.check_option("geoc")?,
            over: params.check_option("over")?,
            lam0: params.try_angular_value("lon_0")?.unwrap_or(0.),
            phi0: params.try_angular_value("lat_0")?.unwrap_or(0.),
            k0: params
                .try_value::<f64>("k_0")?
                .or(params.try_value::<f64>("k")?)
                .unwrap_or(1.),
            x0: params.try_value::<f64>("x_0")?.unwrap_or(0.),
            y0: params.try_value::<f64>("y_0")?.unwrap_or(0.),
        };

        let delegate = init.init(&mut data, &params)?;

        Ok(Self { data, delegate })
    }

    /// Build a `Proj` from a raw PROJ-string (`+proj=... +ellps=...`).
    pub fn from_proj_string(s: &str) -> Result<Self> {
        Self::init(projstring::parse(s)?)
    }

    /// Build a `Proj` from any supported CRS definition (PROJ-string, WKT,
    /// PROJJSON or `EPSG:<n>`), via [`Definition`]'s lowering to a
    /// PROJ-string.
    pub fn from_definition(def: &Definition) -> Result<Self> {
        Self::from_proj_string(&def.to_proj_string())
    }

    /// Build a `Proj` from any supported CRS definition string.
    pub fn from_user_string(s: &str) -> Result<Self> {
        Self::from_definition(&crate::definition::parse(s)?)
    }

    pub(crate) fn data(&self) -> &ProjData {
        &self.data
    }

    pub(crate) fn projection(&self) -> &ProjDelegate {
        &self.delegate
    }

    pub fn has_inverse(&self) -> bool {
        self.delegate.has_inverse()
    }

    pub fn has_forward(&self) -> bool {
        self.delegate.has_forward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn resolves_named_ellipsoid() {
        let p = Proj::from_proj_string("+proj=longlat +ellps=GRS80").unwrap();
        assert!(p.data().ellps.is_ellipsoid());
    }

    #[test]
    fn r_overrides_ellps_with_a_sphere() {
        let p = Proj::from_proj_string("+proj=longlat +R=6400000 +ellps=GRS80").unwrap();
        assert!(p.data().ellps.is_sphere());
        assert_eq!(p.data().ellps.a, 6400000.);
    }

    #[test]
    fn invalid_ellps_name_errors() {
        let err = Proj::from_proj_string("+proj=longlat +ellps=doesnotexist").unwrap_err();
        assert!(matches!(err, Error::InvalidEllipsoid));
    }

    #[test]
    fn unknown_projection_name_errors() {
        let err = Proj::from_proj_string("+proj=doesnotexist").unwrap_err();
        assert!(matches!(err, Error::ProjectionNotFound(_)));
    }

    #[test]
    fn named_datum_resolves_towgs84() {
        let p = Proj::from_proj_string("+proj=longlat +datum=NAD83").unwrap();
        assert!(!p.data().datum.no_datum());
    }

    #[test]
    fn explicit_towgs84_wins_over_datum() {
        let p = Proj::from_proj_string("+proj=longlat +datum=NAD83 +towgs84=1,2,3").unwrap();
        assert!(!p.data().datum.no_datum());
    }

    #[test]
    fn axis_must_be_three_distinct_letters() {
        let err = Proj::from_proj_string("+proj=longlat +axis=en").unwrap_err();
        assert!(matches!(err, Error::InvalidAxis));
    }

    #[test]
    fn units_resolve_to_meter_factor() {
        let p = Proj::from_proj_string("+proj=merc +units=ft").unwrap();
        assert_eq!(p.data().to_meter, 0.3048);
    }
}
