//! CSV route loader.
//!
//! # CSV format
//!
//! One row per route; headers are the camelCase field names of
//! [`Route`] (the lower-case aliases such as `upregularkm` and `timeperkm`
//! are accepted too).  Missing columns and malformed numbers decode to
//! neutral defaults, exactly as they do from JSON.
//!
//! ```csv
//! routeNumber,routeName,from,to,upRegularKm,downRegularKm,timePerKm,turnoutFromDepot,upTurnoutKm,downTurnoutKm
//! 12,Cross Town,Depot Gate,City Center,10,10,3,false,,
//! 7A,Harbour Loop,Harbour,Market,8,9,2.5,true,2,3
//! ```

use std::io::Read;
use std::path::Path;

use log::info;

use ft_core::Route;

use crate::{StoreError, StoreResult};

/// Load every route in the CSV file at `path`.
pub fn load_routes_csv(path: &Path) -> StoreResult<Vec<Route>> {
    let file = std::fs::File::open(path).map_err(StoreError::Io)?;
    let routes = load_routes_reader(file)?;
    info!("loaded {} routes from {}", routes.len(), path.display());
    Ok(routes)
}

/// Like [`load_routes_csv`] but accepts any `Read` source.
pub fn load_routes_reader<R: Read>(reader: R) -> StoreResult<Vec<Route>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<Route>()
        .map(|row| row.map_err(|e| StoreError::Parse(e.to_string())))
        .collect()
}
