//!
//! Named prime meridians (`+pm=`)
//!
//! Values are longitudes west/east of Greenwich, in degrees; resolved to
//! radians at lookup time so callers never juggle units.
//!
use crate::math::consts::PI;

pub struct PrimeMeridianDefn {
    pub id: &'static str,
    pub deg: f64,
}

#[rustfmt::skip]
static PRIME_MERIDIANS: &[PrimeMeridianDefn] = &[
    PrimeMeridianDefn { id: "greenwich", deg: 0.0 },
    PrimeMeridianDefn { id: "lisbon",    deg: -9.131906111111 },
    PrimeMeridianDefn { id: "paris",     deg: 2.337229166667 },
    PrimeMeridianDefn { id: "bogota",    deg: -74.080916666667 },
    PrimeMeridianDefn { id: "madrid",    deg: -3.687938888889 },
    PrimeMeridianDefn { id: "rome",      deg: 12.452333333333 },
    PrimeMeridianDefn { id: "bern",      deg: 7.439583333333 },
    PrimeMeridianDefn { id: "jakarta",   deg: 106.807719444444 },
    PrimeMeridianDefn { id: "ferro",     deg: -17.666666666667 },
    PrimeMeridianDefn { id: "brussels",  deg: 4.367975 },
    PrimeMeridianDefn { id: "stockholm", deg: 18.058277777778 },
    PrimeMeridianDefn { id: "athens",    deg: 23.7163375 },
    PrimeMeridianDefn { id: "oslo",      deg: 10.722916666667 },
];

/// Resolve a named prime meridian to a `from_greenwich` offset in radians.
pub fn find_prime_meridian(name: &str) -> Option<f64> {
    PRIME_MERIDIANS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(name))
        .map(|p| p.deg * PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn greenwich_is_zero() {
        assert_eq!(find_prime_meridian("greenwich"), Some(0.0));
    }

    #[test]
    fn paris_matches_known_offset() {
        let rad = find_prime_meridian("paris").unwrap();
        assert_abs_diff_eq!(rad.to_degrees(), 2.337229166667, epsilon = 1e-9);
    }
}
