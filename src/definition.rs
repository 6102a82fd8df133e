//!
//! `Definition`: the raw parsed CRS parameters, before derivation.
//!
//! A `Definition` is deliberately a flat bag of `Option`s with explicit
//! presence — unlike `ProjectionParams` it records what was *said*, not
//! what was *resolved*. Every angular field is stored in radians; lengths
//! stay in whatever unit the source definition used until derivation
//! applies `to_meter`.
//!
use crate::epsg;
use crate::errors::{Error, Result};
use crate::parameters::ParamList;
use crate::projjson;
use crate::projstring;
use crate::wkt;

#[derive(Debug, Clone, Default)]
pub struct Definition {
    pub proj_name: Option<String>,
    pub ellps_name: Option<String>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub rf: Option<f64>,
    pub datum_code: Option<String>,
    pub towgs84: Option<Vec<f64>>,
    pub nadgrids: Option<String>,
    pub lat_0: Option<f64>,
    pub lat_1: Option<f64>,
    pub lat_2: Option<f64>,
    pub lat_ts: Option<f64>,
    pub lon_0: Option<f64>,
    pub lon_1: Option<f64>,
    pub lon_2: Option<f64>,
    pub lon_c: Option<f64>,
    pub alpha: Option<f64>,
    pub gamma: Option<f64>,
    pub k_0: Option<f64>,
    pub x_0: Option<f64>,
    pub y_0: Option<f64>,
    pub units: Option<String>,
    pub to_meter: Option<f64>,
    pub pm: Option<String>,
    pub from_greenwich: Option<f64>,
    pub axis: Option<String>,
    pub zone: Option<i32>,
    pub utm_south: bool,
    pub no_defs: bool,
    pub over: bool,
    pub approx: bool,
    pub r_a: bool,
}

impl Definition {
    pub fn axis_or_default(&self) -> &str {
        self.axis.as_deref().unwrap_or("enu")
    }

    /// Re-serialize this definition as a PROJ-string, so that derivation
    /// logic only has to be written once (in [`crate::proj::Proj`]) instead
    /// of once per source format.
    pub fn to_proj_string(&self) -> String {
        let mut s = String::new();
        macro_rules! push {
            ($k:expr, $v:expr) => {
                s.push_str(&format!(" +{}={}", $k, $v))
            };
        }
        push!("proj", self.proj_name.as_deref().unwrap_or("longlat"));
        if let Some(v) = &self.ellps_name {
            push!("ellps", v);
        }
        if let Some(v) = self.a {
            push!("a", v);
        }
        if let Some(v) = self.b {
            push!("b", v);
        }
        if let Some(v) = self.rf {
            push!("rf", v);
        }
        if let Some(v) = &self.datum_code {
            push!("datum", v);
        }
        if let Some(v) = &self.towgs84 {
            let joined = v
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(",");
            push!("towgs84", joined);
        }
        if let Some(v) = &self.nadgrids {
            push!("nadgrids", v);
        }
        if let Some(v) = self.lat_0 {
            push!("lat_0", v.to_degrees());
        }
        if let Some(v) = self.lat_1 {
            push!("lat_1", v.to_degrees());
        }
        if let Some(v) = self.lat_2 {
            push!("lat_2", v.to_degrees());
        }
        if let Some(v) = self.lat_ts {
            push!("lat_ts", v.to_degrees());
        }
        if let Some(v) = self.lon_0 {
            push!("lon_0", v.to_degrees());
        }
        if let Some(v) = self.lon_1 {
            push!("lon_1", v.to_degrees());
        }
        if let Some(v) = self.lon_2 {
            push!("lon_2", v.to_degrees());
        }
        if let Some(v) = self.lon_c {
            push!("lon_c", v.to_degrees());
        }
        if let Some(v) = self.alpha {
            push!("alpha", v.to_degrees());
        }
        if let Some(v) = self.gamma {
            push!("gamma", v.to_degrees());
        }
        if let Some(v) = self.k_0 {
            push!("k_0", v);
        }
        if let Some(v) = self.x_0 {
            push!("x_0", v);
        }
        if let Some(v) = self.y_0 {
            push!("y_0", v);
        }
        if let Some(v) = &self.units {
            push!("units", v);
        }
        if let Some(v) = self.to_meter {
            push!("to_meter", v);
        }
        if let Some(v) = self.from_greenwich {
            push!("pm", v.to_degrees());
        }
        if let Some(v) = &self.axis {
            push!("axis", v);
        }
        if let Some(v) = self.zone {
            push!("zone", v);
        }
        if self.utm_south {
            s.push_str(" +south");
        }
        if self.no_defs {
            s.push_str(" +no_defs");
        }
        if self.over {
            s.push_str(" +over");
        }
        if self.approx {
            s.push_str(" +approx");
        }
        if self.r_a {
            s.push_str(" +R_A");
        }
        s.trim_start().to_string()
    }
}

/// Parse a CRS definition string, detecting its form per the order:
/// `EPSG:<n>`, PROJ-string, PROJJSON, WKT, then hardcoded short aliases.
pub fn parse(s: &str) -> Result<Definition> {
    let s = s.trim();

    if let Some(code) = s
        .strip_prefix("EPSG:")
        .or_else(|| s.strip_prefix("epsg:"))
    {
        if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
            return epsg::resolve(code);
        }
        return Err(Error::BadSyntax(s.to_string()));
    }

    if s.starts_with('+') {
        return from_paramlist(&projstring::parse(s)?);
    }

    if looks_like_projjson(s) {
        return projjson::parse(s);
    }

    if is_wkt_keyword(s) {
        return wkt::parse(s);
    }

    match s.to_ascii_uppercase().as_str() {
        "WGS84" => return epsg::resolve("4326"),
        "GOOGLE" => return epsg::resolve("3857"),
        _ => {}
    }

    Err(Error::Unsupported(s.to_string()))
}

fn looks_like_projjson(s: &str) -> bool {
    match s.find('{') {
        Some(pos) => s[..pos].contains("\"type\"") || s.trim_start().starts_with('{') && s.contains("\"type\""),
        None => false,
    }
}

const WKT_KEYWORDS: &[&str] = &[
    "PROJCS", "GEOGCS", "PROJCRS", "GEOGCRS", "BOUNDCRS", "COMPD_CS", "GEOCCS", "VERT_CS",
];

fn is_wkt_keyword(s: &str) -> bool {
    WKT_KEYWORDS.iter().any(|kw| s.starts_with(kw))
}

/// Lower a PROJ-string `ParamList` into a `Definition`.
pub fn from_paramlist(params: &ParamList) -> Result<Definition> {
    let mut def = Definition {
        proj_name: params.try_value::<&str>("proj")?.map(str::to_string),
        ellps_name: params.try_value::<&str>("ellps")?.map(str::to_string),
        a: params.try_value::<f64>("a")?,
        b: params.try_value::<f64>("b")?,
        rf: params.try_value::<f64>("rf")?.or_else(|| {
            params
                .try_value::<f64>("f")
                .ok()
                .flatten()
                .map(|f| 1. / f)
        }),
        datum_code: params.try_value::<&str>("datum")?.map(str::to_string),
        towgs84: parse_towgs84(params)?,
        nadgrids: params.try_value::<&str>("nadgrids")?.map(str::to_string),
        lat_0: params.try_angular_value("lat_0")?,
        lat_1: params.try_angular_value("lat_1")?,
        lat_2: params.try_angular_value("lat_2")?,
        lat_ts: params.try_angular_value("lat_ts")?,
        lon_0: params.try_angular_value("lon_0")?,
        lon_1: params.try_angular_value("lon_1")?,
        lon_2: params.try_angular_value("lon_2")?,
        lon_c: params.try_angular_value("lon_c")?,
        alpha: params.try_angular_value("alpha")?,
        gamma: params.try_angular_value("gamma")?,
        k_0: params
            .try_value::<f64>("k_0")?
            .or(params.try_value::<f64>("k")?),
        x_0: params.try_value::<f64>("x_0")?,
        y_0: params.try_value::<f64>("y_0")?,
        units: params.try_value::<&str>("units")?.map(str::to_string),
        to_meter: params.try_value::<f64>("to_meter")?,
        pm: params.try_value::<&str>("pm")?.map(str::to_string),
        from_greenwich: None,
        axis: params.try_value::<&str>("axis")?.map(str::to_string),
        zone: params.try_value::<i32>("zone")?,
        utm_south: params.check_option("south")?,
        no_defs: params.check_option("no_defs")?,
        over: params.check_option("over")?,
        approx: params.check_option("approx")?,
        r_a: params.check_option("R_A")?,
    };
    if let Some(pm) = &def.pm {
        def.from_greenwich = match pm.parse::<f64>() {
            Ok(deg) => Some(deg.to_radians()),
            Err(_) => crate::primemeridians::find_prime_meridian(pm),
        };
    }
    Ok(def)
}

fn parse_towgs84(params: &ParamList) -> Result<Option<Vec<f64>>> {
    let Some(raw) = params.try_value::<&str>("towgs84")? else {
        return Ok(None);
    };
    let values: std::result::Result<Vec<f64>, _> = raw.split(',').map(|v| v.trim().parse::<f64>()).collect();
    let values = values.map_err(|_| Error::InvalidToWGS84String)?;
    if values.len() != 3 && values.len() != 7 {
        return Err(Error::InvalidToWGS84String);
    }
    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowers_simple_proj_string() {
        let def = parse("+proj=merc +lat_ts=0 +ellps=WGS84").unwrap();
        assert_eq!(def.proj_name.as_deref(), Some("merc"));
        assert_eq!(def.ellps_name.as_deref(), Some("WGS84"));
        assert_eq!(def.lat_ts, Some(0.0));
    }

    #[test]
    fn towgs84_requires_3_or_7_values() {
        let err = parse("+proj=longlat +towgs84=1,2").unwrap_err();
        assert!(matches!(err, Error::InvalidToWGS84String));
    }

    #[test]
    fn wgs84_alias_resolves_to_epsg_4326() {
        let def = parse("WGS84").unwrap();
        assert_eq!(def.proj_name.as_deref(), Some("longlat"));
    }
}
