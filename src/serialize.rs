//!
//! CRS serialization: the reverse of `definition::parse` and friends. Emits
//! a `Definition` back out as a PROJ-string, WKT2, or PROJJSON, and attempts
//! to identify a `Definition` against the hardcoded EPSG table.
//!
//! The WKT and PROJJSON emitters are the mirror image of `wkt::lower`/
//! `projjson::lower`: where those walk a parsed tree into `Definition`
//! fields, these walk `Definition` fields back into the same tree shape, so
//! that what this module writes, `wkt::parse`/`projjson::parse` can read
//! back.
//!
use crate::definition::{self, Definition};
use crate::epsg;
use crate::errors::Result;
use crate::wkt::methods;

/// Serialize a `Definition` as a PROJ-string. The public, spec-facing
/// counterpart to `Definition::to_proj_string`, which remains an internal
/// helper feeding `Proj::from_definition`.
pub fn serialize_proj(def: &Definition) -> String {
    def.to_proj_string()
}

/// Serialize a `Definition` as WKT2 (ISO 19162). Geographic definitions
/// (`proj_name` absent or `"longlat"`) emit a bare `GEOGCRS`; everything
/// else emits a `PROJCRS` wrapping a `BASEGEOGCRS` and a `CONVERSION`.
pub fn to_wkt(def: &Definition) -> String {
    match def.proj_name.as_deref() {
        None | Some("longlat") => geogcrs_wkt(def, "GEOGCRS"),
        Some(name) => {
            let base = geogcrs_wkt(def, "BASEGEOGCRS");
            let method = methods::wkt_method_for_proj_name(name).unwrap_or(name);
            let params: String = proj_parameters(def)
                .into_iter()
                .filter_map(|(field, value)| {
                    methods::wkt_param_for_field(field).map(|pname| format!(r#", PARAMETER["{pname}", {value}]"#))
                })
                .collect();
            let to_meter = def.to_meter.unwrap_or(1.0);
            let axis = axis_wkt_clauses(def.axis_or_default());

            format!(
                r#"PROJCRS["unnamed", {base}, CONVERSION["unnamed", METHOD["{method}"]{params}], LENGTHUNIT["metre", {to_meter}]{axis}]"#
            )
        }
    }
}

/// `def.a`/`def.rf` are only populated when the source definition spelled
/// them out explicitly; most definitions instead name an `ellps` and leave
/// the axes to be looked up. Resolve them here the same way `Proj`'s
/// derivation does, so the emitted ellipsoid isn't just a WGS84 default for
/// every other ellipsoid.
fn resolve_a_rf(def: &Definition) -> (f64, f64) {
    if let (Some(a), Some(rf)) = (def.a, def.rf) {
        return (a, rf);
    }
    if let Some(e) = def.ellps_name.as_deref().and_then(crate::ellipsoids::find_ellipsoid) {
        let rf = match e.rf_or_b {
            crate::ellipsoids::FlatteningParam::InvFlat(rf) => rf,
            crate::ellipsoids::FlatteningParam::MinorAxis(b) => e.a / (e.a - b),
        };
        return (def.a.unwrap_or(e.a), def.rf.unwrap_or(rf));
    }
    (def.a.unwrap_or(6378137.0), def.rf.unwrap_or(298.257223563))
}

fn geogcrs_wkt(def: &Definition, keyword: &str) -> String {
    let datum_name = def.datum_code.as_deref().unwrap_or("unknown");
    let ellps_name = def.ellps_name.as_deref().unwrap_or("unknown");
    let (a, rf) = resolve_a_rf(def);
    let pm = def.from_greenwich.map(f64::to_degrees).unwrap_or(0.0);

    let towgs84 = def
        .towgs84
        .as_ref()
        .map(|v| {
            format!(
                ", TOWGS84[{}]",
                v.iter().map(f64::to_string).collect::<Vec<_>>().join(", ")
            )
        })
        .unwrap_or_default();

    format!(
        r#"{keyword}["unnamed", DATUM["{datum_name}"{towgs84}], ELLIPSOID["{ellps_name}", {a}, {rf}], PRIMEM["Greenwich", {pm}]]"#
    )
}

fn axis_wkt_clauses(axis: &str) -> String {
    axis.chars()
        .filter_map(|c| {
            let (name, dir) = match c {
                'n' => ("Northing", "NORTH"),
                's' => ("Southing", "SOUTH"),
                'e' => ("Easting", "EAST"),
                'w' => ("Westing", "WEST"),
                'u' => ("Height", "UP"),
                'd' => ("Depth", "DOWN"),
                _ => return None,
            };
            Some(format!(r#", AXIS["{name}", {dir}]"#))
        })
        .collect()
}

/// Angular fields in degrees, linear/scale fields as-is, keyed by the same
/// `Definition` field name `wkt::methods`/`projjson` parameter tables use.
fn proj_parameters(def: &Definition) -> Vec<(&'static str, f64)> {
    let mut params = Vec::new();
    let mut push_angular = |field, value: Option<f64>| {
        if let Some(v) = value {
            params.push((field, v.to_degrees()));
        }
    };
    push_angular("lat_0", def.lat_0);
    push_angular("lat_1", def.lat_1);
    push_angular("lat_2", def.lat_2);
    push_angular("lat_ts", def.lat_ts);
    push_angular("lon_0", def.lon_0);
    push_angular("lon_c", def.lon_c);
    push_angular("alpha", def.alpha);
    push_angular("gamma", def.gamma);
    if let Some(v) = def.k_0 {
        params.push(("k_0", v));
    }
    if let Some(v) = def.x_0 {
        params.push(("x_0", v));
    }
    if let Some(v) = def.y_0 {
        params.push(("y_0", v));
    }
    params
}

/// Serialize a `Definition` as PROJJSON. Requires the `projjson` feature,
/// matching the feature-gating convention `projjson::parse` already uses.
#[cfg(feature = "projjson")]
pub fn to_projjson(def: &Definition) -> Result<String> {
    serde_json::to_string_pretty(&projjson_value(def)).map_err(|e| crate::errors::Error::BadSyntax(e.to_string()))
}

#[cfg(not(feature = "projjson"))]
pub fn to_projjson(_def: &Definition) -> Result<String> {
    Err(crate::errors::Error::Unsupported(
        "PROJJSON support requires the `projjson` feature".to_string(),
    ))
}

#[cfg(feature = "projjson")]
fn projjson_value(def: &Definition) -> serde_json::Value {
    let (a, rf) = resolve_a_rf(def);
    let datum = serde_json::json!({
        "type": "GeodeticReferenceFrame",
        "name": def.datum_code.clone().unwrap_or_else(|| "unknown".to_string()),
        "ellipsoid": {
            "name": def.ellps_name.clone().unwrap_or_else(|| "unknown".to_string()),
            "semi_major_axis": a,
            "inverse_flattening": rf,
        },
    });
    let axis: Vec<serde_json::Value> = def.axis_or_default().chars().map(axis_entry).collect();

    match def.proj_name.as_deref() {
        None | Some("longlat") => serde_json::json!({
            "type": "GeographicCRS",
            "name": "unnamed",
            "datum": datum,
            "coordinate_system": { "subtype": "ellipsoidal", "axis": axis },
        }),
        Some(name) => {
            let method_name = methods::wkt_method_for_proj_name(name).unwrap_or(name);
            let parameters: Vec<serde_json::Value> = proj_parameters(def)
                .into_iter()
                .filter_map(|(field, value)| {
                    methods::wkt_param_for_field(field).map(|pname| serde_json::json!({"name": pname, "value": value}))
                })
                .collect();
            serde_json::json!({
                "type": "ProjectedCRS",
                "name": "unnamed",
                "base_crs": {
                    "type": "GeographicCRS",
                    "name": "unnamed",
                    "datum": datum,
                },
                "conversion": {
                    "name": "unnamed",
                    "method": { "name": method_name },
                    "parameters": parameters,
                },
                "coordinate_system": { "subtype": "Cartesian", "axis": axis },
            })
        }
    }
}

#[cfg(feature = "projjson")]
fn axis_entry(code: char) -> serde_json::Value {
    let direction = match code {
        'n' => "north",
        's' => "south",
        'e' => "east",
        'w' => "west",
        'u' => "up",
        'd' => "down",
        _ => "east",
    };
    serde_json::json!({ "direction": direction })
}

/// Identify `def` against the hardcoded EPSG table: the first known code
/// whose resolved definition matches within the tolerances of §6
/// (`|Δa| < 0.1 m`, `|Δlat0|, |Δlon0| < 1e-9 rad`, `|Δk0| < 1e-9`,
/// `|Δx0|, |Δy0| < 0.01 m`), as `"EPSG:<code>"`. `None` if nothing matches.
pub fn identify_epsg(def: &Definition) -> Option<String> {
    epsg::known_codes()
        .find(|(_, proj_string)| {
            definition::parse(proj_string)
                .map(|candidate| matches_within_tolerance(def, &candidate))
                .unwrap_or(false)
        })
        .map(|(code, _)| format!("EPSG:{code}"))
}

fn matches_within_tolerance(a: &Definition, b: &Definition) -> bool {
    a.proj_name == b.proj_name
        && a.zone == b.zone
        && a.utm_south == b.utm_south
        && close_opt(a.a, b.a, 0.1)
        && close_opt(a.lat_0, b.lat_0, 1e-9)
        && close_opt(a.lon_0, b.lon_0, 1e-9)
        && close_opt(a.k_0, b.k_0, 1e-9)
        && close_opt(a.x_0, b.x_0, 0.01)
        && close_opt(a.y_0, b.y_0, 0.01)
}

fn close_opt(a: Option<f64>, b: Option<f64>, eps: f64) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => (x - y).abs() < eps,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn serialize_proj_round_trips_through_proj_parse() {
        let original = "+proj=merc +lat_ts=0 +ellps=WGS84 +x_0=0 +y_0=0";
        let def = definition::parse(original).unwrap();
        let serialized = serialize_proj(&def);
        let reparsed = definition::parse(&serialized).unwrap();
        assert_eq!(def.proj_name, reparsed.proj_name);
        assert_eq!(def.ellps_name, reparsed.ellps_name);
        assert_eq!(def.x_0, reparsed.x_0);
    }

    #[test]
    fn to_wkt_round_trips_a_mercator_projcrs() {
        let def = definition::parse("+proj=merc +ellps=WGS84 +lat_ts=0 +x_0=10 +y_0=20").unwrap();
        let wkt = to_wkt(&def);
        let reparsed = crate::wkt::parse(&wkt).unwrap();
        assert_eq!(reparsed.proj_name.as_deref(), Some("merc"));
        assert_abs_diff_eq!(reparsed.a.unwrap(), 6378137.0, epsilon = 1e-6);
        assert_abs_diff_eq!(reparsed.x_0.unwrap(), 10., epsilon = 1e-9);
        assert_abs_diff_eq!(reparsed.y_0.unwrap(), 20., epsilon = 1e-9);
    }

    #[test]
    fn to_wkt_round_trips_a_geogcrs() {
        let def = definition::parse("+proj=longlat +ellps=WGS84").unwrap();
        let wkt = to_wkt(&def);
        let reparsed = crate::wkt::parse(&wkt).unwrap();
        assert_eq!(reparsed.proj_name.as_deref(), Some("longlat"));
        assert_abs_diff_eq!(reparsed.a.unwrap(), 6378137.0, epsilon = 1e-6);
    }

    #[test]
    fn to_wkt_round_trips_lcc_standard_parallels() {
        let def = definition::parse("+proj=lcc +lat_1=44 +lat_2=49 +lat_0=46.5 +lon_0=3 +ellps=GRS80").unwrap();
        let wkt = to_wkt(&def);
        let reparsed = crate::wkt::parse(&wkt).unwrap();
        assert_abs_diff_eq!(reparsed.lat_1.unwrap(), def.lat_1.unwrap(), epsilon = 1e-9);
        assert_abs_diff_eq!(reparsed.lat_2.unwrap(), def.lat_2.unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn identify_epsg_finds_wgs84() {
        let def = definition::parse("+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs").unwrap();
        assert_eq!(identify_epsg(&def).as_deref(), Some("EPSG:4326"));
    }

    #[test]
    fn identify_epsg_finds_a_utm_zone() {
        let def = definition::parse("+proj=utm +zone=33 +ellps=WGS84 +datum=WGS84 +units=m +no_defs").unwrap();
        assert_eq!(identify_epsg(&def).as_deref(), Some("EPSG:32633"));
    }

    #[test]
    fn identify_epsg_none_for_unmatched_definition() {
        let def = definition::parse("+proj=merc +ellps=bessel +lat_ts=12").unwrap();
        assert_eq!(identify_epsg(&def), None);
    }

    #[cfg(feature = "projjson")]
    #[test]
    fn to_projjson_round_trips_a_mercator() {
        let def = definition::parse("+proj=merc +ellps=WGS84 +lat_ts=0").unwrap();
        let json = to_projjson(&def).unwrap();
        let reparsed = crate::projjson::parse(&json).unwrap();
        assert_eq!(reparsed.proj_name.as_deref(), Some("merc"));
        assert_abs_diff_eq!(reparsed.a.unwrap(), 6378137.0, epsilon = 1e-6);
    }
}
