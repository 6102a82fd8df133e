//!
//! Name tables shared by the WKT and PROJJSON lowering passes: OGC
//! `PROJECTION`/`METHOD` names and parameter names map to the PROJ
//! projection/parameter names the rest of the crate uses, and PROJJSON
//! axis directions map to the `enu`-style axis code `+axis=` uses.
//!
/// `PROJECTION["..."]` / `METHOD["..."]` name -> PROJ `+proj=` name.
pub(crate) fn proj_name_for_method(name: &str) -> Option<&'static str> {
    Some(match name {
        "Mercator" | "Mercator (variant A)" | "Mercator (1SP)" | "Popular Visualisation Pseudo Mercator" => "merc",
        "Transverse Mercator" | "Transverse_Mercator" => "tmerc",
        "Lambert Conic Conformal (1SP)" | "Lambert Conic Conformal (2SP)" | "Lambert_Conformal_Conic_2SP" => "lcc",
        "Albers Equal Area" | "Albers_Conic_Equal_Area" => "aea",
        "Lambert Azimuthal Equal Area" | "Lambert_Azimuthal_Equal_Area" => "laea",
        "Azimuthal Equidistant" | "Azimuthal_Equidistant" => "aeqd",
        "Equidistant Cylindrical" | "Equirectangular" => "eqc",
        "Equidistant Conic" => "eqdc",
        "Polar Stereographic (variant A)" | "Polar Stereographic (variant B)" | "Stereographic" => "stere",
        "Cylindrical Equal Area" => "cea",
        "Miller Cylindrical" => "mill",
        "Mollweide" => "moll",
        "Sinusoidal" => "sinu",
        "Orthographic" => "ortho",
        "Gnomonic" => "gnom",
        "Van der Grinten" => "vandg",
        "Robinson" => "robin",
        "Equal Earth" => "eqearth",
        "Hotine Oblique Mercator" | "Hotine Oblique Mercator (variant A)" | "Hotine Oblique Mercator (variant B)" => "omerc",
        _ => return None,
    })
}

/// WKT `PARAMETER["..."]` / PROJJSON parameter name -> the `Definition`
/// field name it should populate.
pub(crate) fn proj_param_for_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "Latitude of natural origin" | "latitude_of_origin" | "Latitude of 1st standard parallel" => "lat_0",
        "standard_parallel_1" => "lat_1",
        "standard_parallel_2" => "lat_2",
        "Latitude of 1st standard parallel, standard_parallel_1" => "lat_1",
        "Latitude of 2nd standard parallel" | "standard_parallel1" => "lat_1",
        "Latitude of false origin" => "lat_0",
        "Latitude of pseudo standard parallel" => "lat_ts",
        "Longitude of natural origin" | "central_meridian" | "Longitude of origin" => "lon_0",
        "Longitude of false origin" => "lon_0",
        "Longitude of projection centre" => "lon_c",
        "Azimuth of initial line" => "alpha",
        "Angle from Rectified to Skew Grid" => "gamma",
        "Scale factor at natural origin" | "scale_factor" => "k_0",
        "False easting" | "false_easting" => "x_0",
        "False northing" | "false_northing" => "y_0",
        "Easting at false origin" => "x_0",
        "Northing at false origin" => "y_0",
        _ => return None,
    })
}

/// PROJ `+proj=` name -> `METHOD["..."]` name, for the serializer. The
/// inverse of [`proj_name_for_method`]; picks one canonical WKT/PROJJSON
/// name per PROJ name (several method strings map to the same PROJ name on
/// the parse side, so this isn't a perfect inverse for all of them — `tmerc`
/// and `utm` both land on "Transverse Mercator", for instance).
pub(crate) fn wkt_method_for_proj_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "merc" => "Mercator",
        "tmerc" | "etmerc" | "utm" => "Transverse Mercator",
        "lcc" => "Lambert Conic Conformal (2SP)",
        "aea" => "Albers Equal Area",
        "laea" => "Lambert Azimuthal Equal Area",
        "aeqd" => "Azimuthal Equidistant",
        "eqc" => "Equidistant Cylindrical",
        "eqdc" => "Equidistant Conic",
        "stere" => "Polar Stereographic (variant A)",
        "cea" => "Cylindrical Equal Area",
        "mill" => "Miller Cylindrical",
        "moll" => "Mollweide",
        "sinu" => "Sinusoidal",
        "ortho" => "Orthographic",
        "gnom" => "Gnomonic",
        "vandg" => "Van der Grinten",
        "robin" => "Robinson",
        "eqearth" => "Equal Earth",
        "omerc" => "Hotine Oblique Mercator (variant A)",
        _ => return None,
    })
}

/// `Definition` field name -> `PARAMETER["..."]` name, for the serializer.
/// The inverse of [`proj_param_for_name`]; picks the one WKT/PROJJSON
/// parameter name per field that itself maps back to that field (several
/// parameter strings collapse onto one field on the parse side).
pub(crate) fn wkt_param_for_field(field: &str) -> Option<&'static str> {
    Some(match field {
        "lat_0" => "Latitude of natural origin",
        "lat_1" => "standard_parallel_1",
        "lat_2" => "standard_parallel_2",
        "lat_ts" => "Latitude of pseudo standard parallel",
        "lon_0" => "Longitude of natural origin",
        "lon_c" => "Longitude of projection centre",
        "alpha" => "Azimuth of initial line",
        "gamma" => "Angle from Rectified to Skew Grid",
        "k_0" => "Scale factor at natural origin",
        "x_0" => "False easting",
        "y_0" => "False northing",
        _ => return None,
    })
}

/// Reduce a PROJJSON `coordinate_system.axis` array to the crate's
/// three-letter axis code, in declaration order.
#[cfg(feature = "projjson")]
pub(crate) fn axis_code_from_projjson(axes: &[serde_json::Value]) -> String {
    axes.iter()
        .filter_map(|axis| axis.get("direction").and_then(serde_json::Value::as_str))
        .map(|dir| match dir {
            "north" => 'n',
            "south" => 's',
            "east" => 'e',
            "west" => 'w',
            "up" => 'u',
            "down" => 'd',
            _ => '\0',
        })
        .filter(|c| *c != '\0')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_method_names() {
        assert_eq!(proj_name_for_method("Mercator"), Some("merc"));
        assert_eq!(proj_name_for_method("Transverse Mercator"), Some("tmerc"));
        assert_eq!(proj_name_for_method("not a method"), None);
    }

    #[test]
    fn maps_common_parameter_names() {
        assert_eq!(proj_param_for_name("False easting"), Some("x_0"));
        assert_eq!(proj_param_for_name("Scale factor at natural origin"), Some("k_0"));
    }

    #[test]
    fn method_name_round_trips_through_both_directions() {
        let wkt_name = wkt_method_for_proj_name("merc").unwrap();
        assert_eq!(proj_name_for_method(wkt_name), Some("merc"));

        let wkt_name = wkt_method_for_proj_name("lcc").unwrap();
        assert_eq!(proj_name_for_method(wkt_name), Some("lcc"));
    }

    #[test]
    fn param_name_round_trips_through_both_directions() {
        for field in ["lat_0", "lat_1", "lat_2", "lon_0", "k_0", "x_0", "y_0"] {
            let wkt_name = wkt_param_for_field(field).unwrap();
            assert_eq!(proj_param_for_name(wkt_name), Some(field));
        }
    }
}
