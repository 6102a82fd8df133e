//!
//! PROJJSON decoding.
//!
//! PROJJSON objects describe a CRS as a `type`/`name`/`datum`/`conversion`/
//! `coordinate_system` tree (see the OGC PROJJSON schema). This module
//! walks that tree into a [`Definition`] using the same method/parameter
//! name table as the WKT lowering pass (`crate::wkt::methods`), since both
//! formats name projection methods and parameters identically.
//!
use crate::definition::Definition;
use crate::errors::{Error, Result};
use crate::wkt::methods;

#[cfg(feature = "projjson")]
pub fn parse(s: &str) -> Result<Definition> {
    let value: serde_json::Value =
        serde_json::from_str(s).map_err(|e| Error::BadSyntax(e.to_string()))?;
    lower(&value)
}

#[cfg(not(feature = "projjson"))]
pub fn parse(_s: &str) -> Result<Definition> {
    Err(Error::Unsupported(
        "PROJJSON support requires the `projjson` feature".to_string(),
    ))
}

#[cfg(feature = "projjson")]
fn lower(value: &serde_json::Value) -> Result<Definition> {
    let mut def = Definition::default();

    if let Some(base) = value.get("base_crs") {
        lower_into(base, &mut def)?;
    }
    lower_into(value, &mut def)?;

    if def.proj_name.is_none() {
        def.proj_name = Some("longlat".to_string());
    }
    Ok(def)
}

#[cfg(feature = "projjson")]
fn lower_into(value: &serde_json::Value, def: &mut Definition) -> Result<()> {
    if let Some(datum) = value.get("datum") {
        if let Some(ellps) = datum.get("ellipsoid") {
            if let Some(a) = ellps.get("semi_major_axis").and_then(|v| v.as_f64()) {
                def.a = Some(a);
            }
            if let Some(invf) = ellps.get("inverse_flattening").and_then(|v| v.as_f64()) {
                def.rf = Some(invf);
            }
            if let Some(name) = ellps.get("name").and_then(|v| v.as_str()) {
                def.ellps_name = Some(name.to_string());
            }
        }
        if let Some(name) = datum.get("name").and_then(|v| v.as_str()) {
            def.datum_code = Some(name.to_string());
        }
        if let Some(pm) = datum.get("prime_meridian") {
            if let Some(lon) = pm.get("longitude").and_then(|v| v.as_f64()) {
                def.from_greenwich = Some(lon.to_radians());
            }
        }
    }

    if let Some(conv) = value.get("conversion") {
        if let Some(method_name) = conv
            .get("method")
            .and_then(|m| m.get("name"))
            .and_then(|v| v.as_str())
        {
            def.proj_name = methods::proj_name_for_method(method_name)
                .map(str::to_string)
                .or(Some(method_name.to_string()));
        }
        if let Some(params) = conv.get("parameters").and_then(|v| v.as_array()) {
            for param in params {
                let (Some(name), Some(val)) = (
                    param.get("name").and_then(|v| v.as_str()),
                    param.get("value").and_then(|v| v.as_f64()),
                ) else {
                    continue;
                };
                apply_named_parameter(def, name, val);
            }
        }
    }

    if let Some(cs) = value.get("coordinate_system") {
        if let Some(axes) = cs.get("axis").and_then(|v| v.as_array()) {
            def.axis = Some(methods::axis_code_from_projjson(axes));
        }
    }

    Ok(())
}

#[cfg(feature = "projjson")]
fn apply_named_parameter(def: &mut Definition, name: &str, val: f64) {
    let Some(field) = methods::proj_param_for_name(name) else {
        return;
    };
    match field {
        "lat_0" => def.lat_0 = Some(val.to_radians()),
        "lat_1" => def.lat_1 = Some(val.to_radians()),
        "lat_2" => def.lat_2 = Some(val.to_radians()),
        "lat_ts" => def.lat_ts = Some(val.to_radians()),
        "lon_0" => def.lon_0 = Some(val.to_radians()),
        "lon_1" => def.lon_1 = Some(val.to_radians()),
        "lon_2" => def.lon_2 = Some(val.to_radians()),
        "lon_c" => def.lon_c = Some(val.to_radians()),
        "alpha" => def.alpha = Some(val.to_radians()),
        "gamma" => def.gamma = Some(val.to_radians()),
        "k_0" => def.k_0 = Some(val),
        "x_0" => def.x_0 = Some(val),
        "y_0" => def.y_0 = Some(val),
        _ => {}
    }
}
