//!
//! EPSG code resolution: a hardcoded table for the common codes, falling
//! back to a pluggable [`RemoteDefinitionProvider`] for everything else.
//!
//! GeoTIFF/NTv2-style HTTP fetching of remote EPSG catalogs is explicitly
//! out of scope for the core (spec §1); this module only defines the
//! abstract boundary and a process-wide memoization cache for whatever the
//! embedder plugs in.
//!
mod table;

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::definition::{self, Definition};
use crate::errors::{Error, Result};

/// Resolves an EPSG numeric code to a CRS definition string (a PROJ-string
/// or WKT) by some external means — typically an HTTP call to an EPSG
/// registry mirror. Implementations are synchronous: the core never
/// suspends, so any I/O must be performed by the embedder before this call
/// returns (spec §5).
pub trait RemoteDefinitionProvider: Send + Sync {
    fn fetch(&self, code: &str) -> Option<String>;
}

static REMOTE_PROVIDER: OnceLock<Mutex<Option<Box<dyn RemoteDefinitionProvider>>>> = OnceLock::new();
static MEMO: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();

fn remote_slot() -> &'static Mutex<Option<Box<dyn RemoteDefinitionProvider>>> {
    REMOTE_PROVIDER.get_or_init(|| Mutex::new(None))
}

fn memo() -> &'static Mutex<HashMap<String, String>> {
    MEMO.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Install the process-wide remote EPSG provider, replacing any previous
/// one. Not required for the codes the hardcoded table answers.
pub fn set_remote_provider<P: RemoteDefinitionProvider + 'static>(provider: P) {
    *remote_slot().lock().unwrap() = Some(Box::new(provider));
}

/// Every EPSG code the hardcoded table can answer, paired with its
/// PROJ-string. Used by the serializer's EPSG back-identification, which
/// otherwise has no way to enumerate what the table covers.
pub(crate) fn known_codes() -> impl Iterator<Item = (u32, String)> {
    (1..=32760u32).filter_map(|code| table::lookup(code).map(|s| (code, s)))
}

/// Resolve a numeric EPSG code (as ASCII digits) into a `Definition`.
pub fn resolve(code: &str) -> Result<Definition> {
    let n: u32 = code.parse().map_err(|_| Error::UnknownEpsg(code.to_string()))?;

    if let Some(s) = table::lookup(n) {
        return definition::parse(&s);
    }

    if let Some(cached) = memo().lock().unwrap().get(code) {
        return definition::parse(cached);
    }

    let fetched = {
        let guard = remote_slot().lock().unwrap();
        guard.as_ref().and_then(|p| p.fetch(code))
    };

    match fetched {
        Some(s) => {
            memo().lock().unwrap().insert(code.to_string(), s.clone());
            definition::parse(&s)
        }
        None => Err(Error::EpsgUnresolved(code.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);
    impl RemoteDefinitionProvider for Fixed {
        fn fetch(&self, _code: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn hardcoded_table_wins_over_remote() {
        set_remote_provider(Fixed("+proj=longlat +ellps=bessel"));
        let def = resolve("4326").unwrap();
        assert_eq!(def.ellps_name.as_deref(), Some("WGS84"));
    }

    struct Unavailable;
    impl RemoteDefinitionProvider for Unavailable {
        fn fetch(&self, _code: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn unresolved_when_remote_provider_has_no_answer() {
        set_remote_provider(Unavailable);
        let err = resolve("999999").unwrap_err();
        assert!(matches!(err, Error::EpsgUnresolved(_)));
    }
}
