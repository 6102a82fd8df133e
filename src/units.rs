//!
//! Proj4 linear unit definitions
//!
//! Mirrors the shape of [`crate::ellipsoids`]: a flat static table resolved
//! by case-insensitive name, consulted when a `Definition`'s `units` field
//! is present instead of an explicit `to_meter`.
//!
pub struct UnitDefn {
    pub id: &'static str,
    pub to_meter: f64,
}

#[rustfmt::skip]
static UNITS: &[UnitDefn] = &[
    UnitDefn { id: "km",     to_meter: 1000.0 },
    UnitDefn { id: "m",      to_meter: 1.0 },
    UnitDefn { id: "dm",     to_meter: 0.1 },
    UnitDefn { id: "cm",     to_meter: 0.01 },
    UnitDefn { id: "mm",     to_meter: 0.001 },
    UnitDefn { id: "kmi",    to_meter: 1852.0 },
    UnitDefn { id: "in",     to_meter: 0.0254 },
    UnitDefn { id: "ft",     to_meter: 0.3048 },
    UnitDefn { id: "yd",     to_meter: 0.9144 },
    UnitDefn { id: "mi",     to_meter: 1609.344 },
    UnitDefn { id: "fath",   to_meter: 1.8288 },
    UnitDefn { id: "ch",     to_meter: 20.1168 },
    UnitDefn { id: "link",   to_meter: 0.201168 },
    UnitDefn { id: "us-in",  to_meter: 1.0 / 39.37 },
    UnitDefn { id: "us-ft",  to_meter: 0.304800609601219 },
    UnitDefn { id: "us-yd",  to_meter: 0.914401828803658 },
    UnitDefn { id: "us-ch",  to_meter: 20.11684023368047 },
    UnitDefn { id: "us-mi",  to_meter: 1609.347218694437 },
    UnitDefn { id: "ind-yd", to_meter: 0.91439523 },
    UnitDefn { id: "ind-ft", to_meter: 0.30479841 },
    UnitDefn { id: "ind-ch", to_meter: 20.11669506 },
];

/// Look up a named linear unit's `to_meter` factor, case-insensitively.
pub fn find_unit_to_meter(name: &str) -> Option<f64> {
    UNITS
        .iter()
        .find(|u| u.id.eq_ignore_ascii_case(name))
        .map(|u| u.to_meter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_units() {
        assert_eq!(find_unit_to_meter("m"), Some(1.0));
        assert_eq!(find_unit_to_meter("US-FT"), find_unit_to_meter("us-ft"));
        assert!(find_unit_to_meter("furlong").is_none());
    }
}
