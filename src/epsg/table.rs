//!
//! Hardcoded EPSG → PROJ-string table for the handful of codes the core
//! resolves without consulting a remote provider: 4326, 4269, 3857, and
//! every UTM zone (326xx north, 327xx south).
//!
/// The small set of codes always resolved locally, as PROJ-strings.
pub fn lookup(code: u32) -> Option<String> {
    match code {
        4326 => Some("+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs".to_string()),
        4269 => Some("+proj=longlat +ellps=GRS80 +datum=NAD83 +no_defs".to_string()),
        3857 => Some(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 \
             +units=m +nadgrids=@null +no_defs"
                .to_string(),
        ),
        32601..=32660 => Some(utm(code - 32600, false)),
        32701..=32760 => Some(utm(code - 32700, true)),
        _ => None,
    }
}

fn utm(zone: u32, south: bool) -> String {
    if south {
        format!("+proj=utm +zone={zone} +south +ellps=WGS84 +datum=WGS84 +units=m +no_defs")
    } else {
        format!("+proj=utm +zone={zone} +ellps=WGS84 +datum=WGS84 +units=m +no_defs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_wgs84() {
        assert!(lookup(4326).unwrap().contains("longlat"));
    }

    #[test]
    fn resolves_utm_zone_19n() {
        let s = lookup(32619).unwrap();
        assert!(s.contains("zone=19"));
        assert!(!s.contains("south"));
    }

    #[test]
    fn resolves_utm_zone_south() {
        let s = lookup(32719).unwrap();
        assert!(s.contains("south"));
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(lookup(1).is_none());
    }
}
