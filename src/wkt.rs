//!
//! WKT1 and WKT2 (ISO 19162) decoding.
//!
//! Both dialects share the same nested `KEYWORD[arg, arg, ...]` (or the
//! equivalent `KEYWORD(...)` form) shape, so this module parses the syntax
//! generically into a small [`Node`] tree once, then walks that tree
//! looking for the keywords that matter to a [`Definition`] — the WKT1 and
//! WKT2 keyword sets differ (`PROJCS`/`GEOGCS` vs `PROJCRS`/`GEOGCRS`, a
//! `CONVERSION`/`METHOD` wrapper in WKT2 where WKT1 has a bare
//! `PROJECTION`) but the leaf nodes (`PARAMETER`, `UNIT`, `AXIS`,
//! `TOWGS84`, `AUTHORITY`) are named identically, so one walk handles both.
//!
use crate::definition::Definition;
use crate::errors::{Error, Result};

pub(crate) mod methods;

/// One `KEYWORD[arg, arg, ...]` node. An argument is either a nested node,
/// a quoted string, or a bare (numeric or identifier) token.
#[derive(Debug, Clone)]
enum Arg {
    Node(Node),
    Str(String),
    Bare(String),
}

#[derive(Debug, Clone)]
struct Node {
    keyword: String,
    args: Vec<Arg>,
}

impl Node {
    fn child(&self, keyword: &str) -> Option<&Node> {
        self.args.iter().find_map(|a| match a {
            Arg::Node(n) if n.keyword.eq_ignore_ascii_case(keyword) => Some(n),
            _ => None,
        })
    }

    fn children(&self, keyword: &str) -> impl Iterator<Item = &Node> {
        self.args.iter().filter_map(move |a| match a {
            Arg::Node(n) if n.keyword.eq_ignore_ascii_case(keyword) => Some(n),
            _ => None,
        })
    }

    fn str_arg(&self, index: usize) -> Option<&str> {
        match self.args.get(index)? {
            Arg::Str(s) => Some(s.as_str()),
            Arg::Bare(s) => Some(s.as_str()),
            Arg::Node(_) => None,
        }
    }

    fn num_arg(&self, index: usize) -> Option<f64> {
        self.str_arg(index)?.parse().ok()
    }
}

mod tokenizer {
    use super::{Arg, Node};
    use crate::errors::{Error, Result};

    /// Parse one `KEYWORD[...]` node starting at `s`, returning the node
    /// and the remainder of the input past its closing bracket.
    pub(super) fn parse_node(s: &str) -> Result<(Node, &str)> {
        let s = s.trim_start();
        let kw_len = s
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(s.len());
        if kw_len == 0 {
            return Err(Error::BadSyntax(s.to_string()));
        }
        let keyword = s[..kw_len].to_string();
        let rest = s[kw_len..].trim_start();

        let Some(open) = rest.chars().next().filter(|c| *c == '[' || *c == '(') else {
            // A bare keyword with no argument list (rare, but tolerated).
            return Ok((Node { keyword, args: vec![] }, rest));
        };
        let close = if open == '[' { ']' } else { ')' };
        let mut args = Vec::new();
        let mut rest = &rest[1..];

        loop {
            rest = rest.trim_start();
            if let Some(r) = rest.strip_prefix(close) {
                return Ok((Node { keyword, args }, r));
            }
            if rest.starts_with('"') {
                let (text, r) = parse_quoted(rest)?;
                args.push(Arg::Str(text));
                rest = r;
            } else if rest
                .chars()
                .next()
                .map(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' || c == '+')
                .unwrap_or(false)
            {
                // Lookahead: is this a nested KEYWORD[...] or a bare token?
                let ident_len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                let after_ident = rest[ident_len..].trim_start();
                if after_ident.starts_with('[') || after_ident.starts_with('(') {
                    let (node, r) = parse_node(rest)?;
                    args.push(Arg::Node(node));
                    rest = r;
                } else {
                    let tok_len = rest
                        .find(|c: char| c == ',' || c == close)
                        .unwrap_or(rest.len());
                    args.push(Arg::Bare(rest[..tok_len].trim().to_string()));
                    rest = &rest[tok_len..];
                }
            } else {
                return Err(Error::BadSyntax(rest.to_string()));
            }
            rest = rest.trim_start();
            if let Some(r) = rest.strip_prefix(',') {
                rest = r;
            }
        }
    }

    fn parse_quoted(s: &str) -> Result<(String, &str)> {
        let rest = &s[1..];
        let end = rest
            .find('"')
            .ok_or_else(|| Error::BadSyntax("unterminated quoted string".to_string()))?;
        Ok((rest[..end].to_string(), &rest[end + 1..]))
    }
}

/// Parse a WKT1 or WKT2 CRS definition string into a [`Definition`].
pub fn parse(s: &str) -> Result<Definition> {
    let (root, _) = tokenizer::parse_node(s.trim())?;
    lower(&root)
}

fn lower(root: &Node) -> Result<Definition> {
    let mut def = Definition::default();

    match root.keyword.to_ascii_uppercase().as_str() {
        "GEOGCS" | "GEOGCRS" => {
            def.proj_name = Some("longlat".to_string());
            lower_geogcs(root, &mut def)?;
        }
        "PROJCS" | "PROJCRS" => {
            if let Some(base) = root.child("GEOGCS").or_else(|| root.child("BASEGEOGCRS")) {
                lower_geogcs(base, &mut def)?;
            }
            lower_projcs(root, &mut def)?;
        }
        "GEOCCS" => {
            def.proj_name = Some("geocent".to_string());
            lower_geogcs(root, &mut def)?;
        }
        "BOUNDCRS" => {
            if let Some(source) = root.child("SOURCECRS") {
                if let Some(inner) = source.args.iter().find_map(|a| match a {
                    Arg::Node(n) => Some(n),
                    _ => None,
                }) {
                    def = lower(inner)?;
                }
            }
            if let Some(abridged) = root.child("ABRIDGEDTRANSFORMATION") {
                apply_towgs84_from_params(abridged, &mut def);
            }
        }
        "COMPD_CS" => {
            if let Some(head) = root.args.iter().find_map(|a| match a {
                Arg::Node(n) => Some(n),
                _ => None,
            }) {
                def = lower(head)?;
            }
        }
        _ => return Err(Error::Unsupported(root.keyword.clone())),
    }

    Ok(def)
}

fn lower_geogcs(node: &Node, def: &mut Definition) -> Result<()> {
    if let Some(datum) = node.child("DATUM") {
        def.datum_code = datum.str_arg(0).map(str::to_string);
        if let Some(spheroid) = datum.child("SPHEROID") {
            lower_spheroid(spheroid, def);
        }
        if let Some(towgs84) = datum.child("TOWGS84") {
            def.towgs84 = Some(
                (0..towgs84.args.len())
                    .filter_map(|i| towgs84.num_arg(i))
                    .collect(),
            );
        }
    }
    if let Some(ellipsoid) = node.child("ELLIPSOID") {
        lower_spheroid(ellipsoid, def);
    }
    if let Some(pm) = node.child("PRIMEM").or_else(|| node.child("PRIMEMERIDIAN")) {
        def.from_greenwich = pm.num_arg(1).map(f64::to_radians);
    }
    if let Some(unit) = node.child("AXISUNIT").or_else(|| node.child("ANGULARUNIT")) {
        def.units = unit.str_arg(0).map(str::to_string);
    }
    Ok(())
}

fn lower_spheroid(node: &Node, def: &mut Definition) {
    def.ellps_name = node.str_arg(0).map(str::to_string);
    def.a = node.num_arg(1);
    def.rf = node.num_arg(2);
}

fn lower_projcs(node: &Node, def: &mut Definition) -> Result<()> {
    let method_name = node
        .child("PROJECTION")
        .and_then(|p| p.str_arg(0))
        .or_else(|| {
            node.child("CONVERSION")
                .and_then(|c| c.child("METHOD"))
                .and_then(|m| m.str_arg(0))
        });

    if let Some(name) = method_name {
        def.proj_name = methods::proj_name_for_method(name)
            .map(str::to_string)
            .or_else(|| Some(name.to_string()));
    } else {
        def.proj_name = Some("longlat".to_string());
    }

    // WKT1 carries PARAMETER[...] as direct children of PROJCS; WKT2 nests
    // them under a CONVERSION node instead.
    let params_parent = node.child("CONVERSION").unwrap_or(node);
    for param in params_parent.children("PARAMETER") {
        let (Some(name), Some(value)) = (param.str_arg(0), param.num_arg(1)) else {
            continue;
        };
        apply_named_parameter(def, name, value);
    }

    if let Some(unit) = node.child("UNIT").or_else(|| node.child("LENGTHUNIT")) {
        def.units = unit.str_arg(0).map(str::to_string);
        if let Some(factor) = unit.num_arg(1) {
            def.to_meter = Some(factor);
        }
    }

    if let Some(axis_str) = axis_code_from_wkt(node) {
        def.axis = Some(axis_str);
    }

    Ok(())
}

fn apply_towgs84_from_params(node: &Node, def: &mut Definition) {
    let values: Vec<f64> = ["X_AXIS_TRANSLATION", "Y_AXIS_TRANSLATION", "Z_AXIS_TRANSLATION"]
        .iter()
        .filter_map(|kw| node.child(kw).and_then(|n| n.num_arg(0)))
        .collect();
    if values.len() == 3 {
        def.towgs84 = Some(values);
    }
}

fn apply_named_parameter(def: &mut Definition, wkt_name: &str, value: f64) {
    let Some(field) = methods::proj_param_for_name(wkt_name) else {
        return;
    };
    match field {
        "lat_0" => def.lat_0 = Some(value.to_radians()),
        "lat_1" => def.lat_1 = Some(value.to_radians()),
        "lat_2" => def.lat_2 = Some(value.to_radians()),
        "lat_ts" => def.lat_ts = Some(value.to_radians()),
        "lon_0" => def.lon_0 = Some(value.to_radians()),
        "lon_1" => def.lon_1 = Some(value.to_radians()),
        "lon_2" => def.lon_2 = Some(value.to_radians()),
        "lon_c" => def.lon_c = Some(value.to_radians()),
        "alpha" => def.alpha = Some(value.to_radians()),
        "gamma" => def.gamma = Some(value.to_radians()),
        "k_0" => def.k_0 = Some(value),
        "x_0" => def.x_0 = Some(value),
        "y_0" => def.y_0 = Some(value),
        _ => {}
    }
}

/// WKT1/WKT2 `AXIS["name", NORTH|SOUTH|EAST|WEST|UP|DOWN]` nodes, in
/// declaration order, reduced to the three-letter code the rest of the
/// crate uses (see [`crate::proj::Axis`]).
fn axis_code_from_wkt(node: &Node) -> Option<String> {
    let letters: String = node
        .children("AXIS")
        .filter_map(|ax| ax.str_arg(1).or_else(|| ax.str_arg(0)))
        .map(|dir| match dir.to_ascii_uppercase().as_str() {
            "NORTH" => 'n',
            "SOUTH" => 's',
            "EAST" => 'e',
            "WEST" => 'w',
            "UP" => 'u',
            "DOWN" => 'd',
            _ => '\0',
        })
        .filter(|c| *c != '\0')
        .collect();
    (letters.len() == 3).then_some(letters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_geogcs() {
        let wkt = r#"GEOGCS["WGS 84", DATUM["WGS_1984", SPHEROID["WGS 84", 6378137, 298.257223563]]]"#;
        let def = parse(wkt).unwrap();
        assert_eq!(def.proj_name.as_deref(), Some("longlat"));
        assert_eq!(def.a, Some(6378137.0));
        assert_eq!(def.rf, Some(298.257223563));
    }

    #[test]
    fn parses_projcs_with_mercator() {
        let wkt = concat!(
            r#"PROJCS["WGS 84 / Pseudo-Mercator","#,
            r#" GEOGCS["WGS 84", DATUM["WGS_1984", SPHEROID["WGS 84", 6378137, 298.257223563]]],"#,
            r#" PROJECTION["Mercator"],"#,
            r#" PARAMETER["central_meridian", 0],"#,
            r#" PARAMETER["false_easting", 0],"#,
            r#" PARAMETER["false_northing", 0]]"#,
        );
        let def = parse(wkt).unwrap();
        assert_eq!(def.proj_name.as_deref(), Some("merc"));
        assert_eq!(def.lon_0, Some(0.0));
        assert_eq!(def.a, Some(6378137.0));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse("PROJCS[").is_err());
    }
}
