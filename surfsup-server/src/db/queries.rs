//! SQL built once from the reflected schema
//!
//! Numeric columns are wrapped in `CAST(.. AS REAL)` so values stored as
//! integers decode as `f64`. `CAST(NULL AS REAL)` stays NULL, which keeps
//! empty aggregates and missing readings nullable.

use super::schema::{Schema, SchemaError};

/// Prepared SQL text for every query the API issues
#[derive(Debug, Clone)]
pub struct Queries {
    pub max_date: String,
    pub min_date: String,
    pub count_measurements: String,
    pub precipitation_after: String,
    pub tobs_after_for_station: String,
    pub temperature_stats_from: String,
    pub temperature_stats_between: String,
    pub station_ids: String,
    pub count_stations: String,
    pub list_stations: String,
}

impl Queries {
    pub fn prepare(schema: &Schema) -> Result<Self, SchemaError> {
        let m = &schema.measurement;
        let measurement = m.table_ident();
        let station = m.column_ident("station")?;
        let date = m.column_ident("date")?;
        let prcp = m.column_ident("prcp")?;
        let tobs = m.column_ident("tobs")?;

        let s = &schema.station;
        let stations = s.table_ident();
        let station_id = s.column_ident("station")?;
        let name = s.column_ident("name")?;
        let latitude = s.column_ident("latitude")?;
        let longitude = s.column_ident("longitude")?;
        let elevation = s.column_ident("elevation")?;

        let stats = format!(
            "SELECT CAST(MIN({tobs}) AS REAL), CAST(AVG({tobs}) AS REAL), CAST(MAX({tobs}) AS REAL) \
             FROM {measurement}"
        );

        Ok(Self {
            max_date: format!("SELECT MAX({date}) FROM {measurement}"),
            min_date: format!("SELECT MIN({date}) FROM {measurement}"),
            count_measurements: format!("SELECT COUNT(*) FROM {measurement}"),
            precipitation_after: format!(
                "SELECT {date}, CAST({prcp} AS REAL) FROM {measurement} WHERE {date} > ?1"
            ),
            tobs_after_for_station: format!(
                "SELECT {date}, CAST({tobs} AS REAL) FROM {measurement} \
                 WHERE {date} > ?1 AND {station} = ?2"
            ),
            temperature_stats_from: format!("{stats} WHERE {date} >= ?1"),
            temperature_stats_between: format!("{stats} WHERE {date} >= ?1 AND {date} <= ?2"),
            // Distinct ids in order of first appearance in the table
            station_ids: format!(
                "SELECT {station_id} FROM {stations} \
                 WHERE {station_id} IS NOT NULL \
                 GROUP BY {station_id} ORDER BY MIN(rowid)"
            ),
            count_stations: format!("SELECT COUNT(*) FROM {stations}"),
            list_stations: format!(
                "SELECT {station_id} AS station, {name} AS name, \
                 CAST({latitude} AS REAL) AS latitude, \
                 CAST({longitude} AS REAL) AS longitude, \
                 CAST({elevation} AS REAL) AS elevation \
                 FROM {stations} ORDER BY {station_id}"
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{Column, Entity};

    fn entity(name: &'static str, table: &str, columns: &[&str]) -> Entity {
        Entity {
            name,
            table: table.to_string(),
            columns: columns
                .iter()
                .map(|c| Column {
                    name: c.to_string(),
                    decl_type: String::new(),
                    not_null: false,
                    primary_key: false,
                })
                .collect(),
        }
    }

    fn schema() -> Schema {
        Schema {
            measurement: entity("Measurement", "measurement", &["station", "date", "prcp", "tobs"]),
            station: entity(
                "Station",
                "station",
                &["station", "name", "latitude", "longitude", "elevation"],
            ),
        }
    }

    #[test]
    fn range_query_is_inclusive_on_both_ends() {
        let q = Queries::prepare(&schema()).unwrap();
        assert!(q
            .temperature_stats_between
            .ends_with("WHERE \"date\" >= ?1 AND \"date\" <= ?2"));
    }

    #[test]
    fn station_ids_keep_table_order() {
        let q = Queries::prepare(&schema()).unwrap();
        assert!(q
            .station_ids
            .ends_with("GROUP BY \"station\" ORDER BY MIN(rowid)"));
    }

    #[test]
    fn trailing_window_excludes_cutoff_day() {
        let q = Queries::prepare(&schema()).unwrap();
        assert!(q.precipitation_after.ends_with("WHERE \"date\" > ?1"));
        assert!(q
            .tobs_after_for_station
            .ends_with("WHERE \"date\" > ?1 AND \"station\" = ?2"));
    }

    #[test]
    fn missing_column_fails_prepare() {
        let mut s = schema();
        s.measurement.columns.retain(|c| c.name != "prcp");
        assert!(matches!(
            Queries::prepare(&s),
            Err(SchemaError::MissingColumn { .. })
        ));
    }
}
