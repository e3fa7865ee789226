use super::demand::{DemandRecord, DemandSeries};
use crate::error::{Result, SimError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, io, path::Path};

/// Series exposed to the chart. The exposed compartment is internal to the
/// model and never charted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    Susceptible,
    Infectious,
    Recovered,
    NeedsIcu,
}

impl Series {
    pub const ALL: [Series; 4] = [
        Series::Susceptible,
        Series::Infectious,
        Series::Recovered,
        Series::NeedsIcu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Series::Susceptible => "susceptible",
            Series::Infectious => "infectious",
            Series::Recovered => "recovered",
            Series::NeedsIcu => "needs_icu",
        }
    }

    /// Value of this series on a given day, if defined.
    pub fn value(self, record: &DemandRecord) -> Option<u64> {
        match self {
            Series::Susceptible => Some(record.day.susceptible),
            Series::Infectious => Some(record.day.infectious),
            Series::Recovered => Some(record.day.recovered),
            Series::NeedsIcu => record.needs_icu,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Long format chart row.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub series: Series,
    pub count: u64,
}

/// Melt the demand series into long format rows.
///
/// Rows are grouped by series (in [`Series::ALL`] order) and sorted by date
/// within each group. Days on which a series is undefined produce no row.
pub fn to_chart_rows(series: &DemandSeries) -> Vec<ChartRow> {
    let records = series.records();
    let mut rows = Vec::with_capacity(Series::ALL.len() * records.len());
    for &s in Series::ALL.iter() {
        rows.extend(records.iter().filter_map(|r| {
            s.value(r).map(|count| ChartRow {
                date: r.day.date,
                series: s,
                count,
            })
        }));
    }
    rows
}

/// Serialize chart rows as CSV with a `date,type,count` header.
pub fn render_csv(rows: &[ChartRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows {
        writer.serialize(row)?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| SimError::Io(e.into_error()))?;
    String::from_utf8(data).map_err(|e| SimError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write chart rows to a CSV file.
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[ChartRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
