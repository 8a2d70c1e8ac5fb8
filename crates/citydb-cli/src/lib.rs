//! citydb-cli
//! ==========
//!
//! Command-line front end for the [`citydb-core`] location resolver.
//!
//! This crate primarily provides a binary (`citydb`). The library target only
//! exists so the overview below is rendered alongside the core crate's docs.
//!
//! Usage
//! -----
//!
//! ```text
//! citydb --catalog meteo.db nearest --lat 56.95 --lon 24.11
//! citydb --catalog meteo.db nearest --lat 56.95 --lon 24.11 --respect-mode
//! citydb --catalog cities.json.gz name "Daugavpils"
//! citydb stats
//! citydb check
//! ```
//!
//! Matches are printed to stdout as JSON. While emergency mode is on, the
//! match carries an `emergency_override` field naming the priority settlement
//! that stands in for it. A query with no result prints
//! `null` and exits with status 1; any error exits with status 2. Logs go to
//! stderr and are filtered with `--log` / `CITYDB_LOG`.
#![cfg_attr(docsrs, feature(doc_cfg))]
