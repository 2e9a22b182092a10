//! Merges observed history with forecast output for charting.

use crate::types::forecast_point::ForecastPoint;
use crate::types::merged_record::MergedRecord;
use crate::types::observation_table::ObservationTable;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Full outer merge of observed values and forecast fields, keyed on date.
///
/// Every date present in the table appears with the parameter's value (or
/// absent, exactly as the table stores it); forecast fields are overlaid
/// verbatim by date. The result is ascending with one record per date.
pub fn merge_history_and_forecast(
    table: &ObservationTable,
    parameter: &str,
    forecast: &[ForecastPoint],
) -> Vec<MergedRecord> {
    let mut merged: BTreeMap<NaiveDate, MergedRecord> = BTreeMap::new();
    for (date, observed) in table.observed(parameter) {
        merged.insert(date, MergedRecord::history_only(date, observed));
    }
    for point in forecast {
        let record = merged
            .entry(point.date)
            .or_insert_with(|| MergedRecord::history_only(point.date, None));
        record.center = Some(point.center);
        record.lower = Some(point.lower);
        record.upper = Some(point.upper);
    }
    merged.into_values().collect()
}
