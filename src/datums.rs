//!
//! Named datum definitions (`+datum=`)
//!
//! Each entry resolves to an ellipsoid name and either a `towgs84` parameter
//! set or a `nadgrids` reference list, mirroring [`crate::ellipsoids`]'s
//! table shape.
//!
pub enum DatumShift {
    ToWgs84_3(f64, f64, f64),
    NadGrids(&'static str),
    None,
}

pub struct DatumDefn {
    pub id: &'static str,
    pub ellipsoid: &'static str,
    pub shift: DatumShift,
}

#[rustfmt::skip]
static DATUMS: &[DatumDefn] = &[
    DatumDefn { id: "WGS84",    ellipsoid: "WGS84",  shift: DatumShift::ToWgs84_3(0., 0., 0.) },
    DatumDefn { id: "GGRS87",   ellipsoid: "GRS80",  shift: DatumShift::ToWgs84_3(-199.87, 74.79, 246.62) },
    DatumDefn { id: "NAD83",    ellipsoid: "GRS80",  shift: DatumShift::ToWgs84_3(0., 0., 0.) },
    DatumDefn { id: "NAD27",    ellipsoid: "clrk66", shift: DatumShift::NadGrids("@conus,@null") },
    DatumDefn { id: "potsdam",  ellipsoid: "bessel", shift: DatumShift::ToWgs84_3(598.1, 73.7, 418.2) },
    DatumDefn { id: "carthage", ellipsoid: "clrk80", shift: DatumShift::ToWgs84_3(-263.0, 6.0, 431.0) },
    DatumDefn { id: "hermannskogel", ellipsoid: "bessel", shift: DatumShift::ToWgs84_3(577.326, 90.129, 463.919) },
    DatumDefn { id: "ire65",   ellipsoid: "mod_airy", shift: DatumShift::ToWgs84_3(482.530, -130.596, 564.557) },
    DatumDefn { id: "nzgd49",  ellipsoid: "intl",    shift: DatumShift::ToWgs84_3(59.47, -5.04, 187.44) },
    DatumDefn { id: "OSGB36",  ellipsoid: "airy",    shift: DatumShift::ToWgs84_3(446.448, -125.157, 542.060) },
];

/// Look up a named datum, case-insensitively.
pub fn find_datum(name: &str) -> Option<&'static DatumDefn> {
    DATUMS.iter().find(|d| d.id.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_is_identity() {
        let d = find_datum("wgs84").unwrap();
        matches!(d.shift, DatumShift::ToWgs84_3(x, y, z) if x == 0. && y == 0. && z == 0.);
    }

    #[test]
    fn unknown_datum_is_none() {
        assert!(find_datum("nonexistent").is_none());
    }
}
