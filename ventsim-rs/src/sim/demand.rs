use super::trajectory::{round_count, DayRecord, Trajectory};
use crate::{
    error::{Result, SimError},
    models::Compartment,
    params::ICU_ADMISSION_LAG,
    utils::Window,
    Real,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Estimate the number of occupied ICU beds on each day.
///
/// Daily ICU arrivals are `round(infectious * icu_rate)` shifted forward by
/// [`ICU_ADMISSION_LAG`] days. Occupancy is approximated by the sum of the
/// arrivals of the last `mean_days_icu` days, so the first
/// `ICU_ADMISSION_LAG + mean_days_icu - 1` days have no estimate (`None`).
/// This is not a census model: it only holds while arrivals change slowly
/// compared to the length of a stay.
pub fn derive_icu_demand(
    infectious: &[u64],
    icu_rate: Real,
    mean_days_icu: u32,
) -> Result<Vec<Option<u64>>> {
    if mean_days_icu == 0 {
        return Err(SimError::invalid("mean_days_icu must be at least 1"));
    }
    if !(icu_rate.is_finite() && icu_rate >= 0.0) {
        return Err(SimError::invalid(format!(
            "icu rate must be a non-negative number, got {}",
            icu_rate
        )));
    }

    let arrivals: Vec<u64> = infectious
        .iter()
        .map(|&i| round_count(i as Real * icu_rate))
        .collect();
    let mut window = Window::new(mean_days_icu as usize);
    let demand = (0..arrivals.len())
        .map(|t| {
            if t < ICU_ADMISSION_LAG {
                return None;
            }
            window.add(arrivals[t - ICU_ADMISSION_LAG]);
            window.full_sum()
        })
        .collect();
    Ok(demand)
}

/// A trajectory day together with its ICU demand estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DemandRecord {
    #[serde(flatten)]
    pub day: DayRecord,
    pub needs_icu: Option<u64>,
}

/// Trajectory decorated with the ICU demand column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DemandSeries {
    mean_days_icu: u32,
    records: Vec<DemandRecord>,
}

impl DemandSeries {
    pub fn from_trajectory(
        trajectory: &Trajectory,
        icu_rate: Real,
        mean_days_icu: u32,
    ) -> Result<Self> {
        let infectious = trajectory.column(Compartment::Infectious);
        let demand = derive_icu_demand(&infectious, icu_rate, mean_days_icu)?;
        let records = trajectory
            .records()
            .iter()
            .zip(demand)
            .map(|(day, needs_icu)| DemandRecord {
                day: *day,
                needs_icu,
            })
            .collect();
        Ok(DemandSeries {
            mean_days_icu,
            records,
        })
    }

    pub fn records(&self) -> &[DemandRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn mean_days_icu(&self) -> u32 {
        self.mean_days_icu
    }

    /// First day offset with a defined demand estimate.
    pub fn first_defined_day(&self) -> usize {
        ICU_ADMISSION_LAG + self.mean_days_icu as usize - 1
    }

    pub fn needs_icu(&self) -> Vec<Option<u64>> {
        self.records.iter().map(|r| r.needs_icu).collect()
    }

    /// Highest estimated ICU demand and the first date it is reached.
    pub fn peak(&self) -> Option<(NaiveDate, u64)> {
        let mut peak: Option<(NaiveDate, u64)> = None;
        for r in &self.records {
            if let Some(n) = r.needs_icu {
                match peak {
                    Some((_, best)) if best >= n => {}
                    _ => peak = Some((r.day.date, n)),
                }
            }
        }
        peak
    }

    /// Number of days on which estimated demand exceeds the given number of
    /// ICU beds.
    pub fn days_over_capacity(&self, capacity: u64) -> usize {
        self.records
            .iter()
            .filter(|r| r.needs_icu.map_or(false, |n| n > capacity))
            .count()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::{to_chart_rows, Series};

    fn trajectory(infectious: &[u64]) -> Trajectory {
        let start = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        let records = infectious
            .iter()
            .enumerate()
            .map(|(day, &i)| DayRecord {
                day: day as u32,
                date: start + chrono::Duration::days(day as i64),
                susceptible: 10_000 - i,
                exposed: 0,
                infectious: i,
                recovered: 0,
            })
            .collect();
        Trajectory::from_records(10_000, records)
    }

    #[test]
    fn undefined_until_window_is_full() {
        let demand = derive_icu_demand(&[100; 30], 0.02, 3).unwrap();
        assert_eq!(demand.len(), 30);
        for (t, value) in demand.iter().enumerate() {
            if t < 12 {
                assert_eq!(*value, None, "day {}", t);
            } else {
                assert_eq!(*value, Some(6), "day {}", t);
            }
        }
    }

    #[test]
    fn arrivals_are_shifted_by_admission_lag() {
        let mut infectious = vec![0; 20];
        infectious[0] = 50;
        let demand = derive_icu_demand(&infectious, 0.02, 1).unwrap();
        assert_eq!(demand[9], None);
        assert_eq!(demand[10], Some(1));
        assert!(demand[11..].iter().all(|d| *d == Some(0)));
    }

    #[test]
    fn half_bed_arrivals_round_to_even() {
        let demand = derive_icu_demand(&[25; 11], 0.02, 1).unwrap();
        assert_eq!(demand[10], Some(0));

        // 0.5, 1.5, 2.5 and 3.5 arrivals
        let mut infectious = vec![0; 14];
        infectious[..4].copy_from_slice(&[25, 75, 125, 175]);
        let demand = derive_icu_demand(&infectious, 0.02, 1).unwrap();
        assert_eq!(demand[10..], [Some(0), Some(2), Some(2), Some(4)]);
    }

    #[test]
    fn tie_days_reach_the_chart_rounded_to_even() {
        let mut infectious = vec![0; 16];
        infectious[0] = 25;
        infectious[1] = 125;
        let series = DemandSeries::from_trajectory(&trajectory(&infectious), 0.02, 2).unwrap();
        let rows = to_chart_rows(&series);
        let icu: Vec<u64> = rows
            .iter()
            .filter(|r| r.series == Series::NeedsIcu)
            .map(|r| r.count)
            .collect();
        // windows over arrivals 0 and 2, then 2 and 0, then zeros
        assert_eq!(icu, vec![2, 2, 0, 0, 0]);
    }

    #[test]
    fn rejects_zero_day_stays() {
        assert!(matches!(
            derive_icu_demand(&[1, 2, 3], 0.02, 0),
            Err(SimError::InvalidInput(_))
        ));
        assert!(derive_icu_demand(&[1, 2, 3], Real::NAN, 2).is_err());
    }

    #[test]
    fn short_series_stays_undefined() {
        let demand = derive_icu_demand(&[100; 12], 0.02, 5).unwrap();
        assert!(demand.iter().all(Option::is_none));
    }

    #[test]
    fn narrower_window_never_increases_demand() {
        let infectious: Vec<u64> = (0..120).map(|t| (t * t) as u64).collect();
        let wide = derive_icu_demand(&infectious, 0.02, 10).unwrap();
        let narrow = derive_icu_demand(&infectious, 0.02, 1).unwrap();
        for (w, n) in wide.iter().zip(narrow.iter()) {
            if let (Some(w), Some(n)) = (w, n) {
                assert!(n <= w);
            }
        }
    }

    #[test]
    fn series_summaries() {
        let mut infectious = vec![0; 40];
        for (t, i) in infectious.iter_mut().enumerate().skip(5).take(10) {
            *i = 100 * t as u64;
        }
        let series = DemandSeries::from_trajectory(&trajectory(&infectious), 0.01, 2).unwrap();
        assert_eq!(series.len(), 40);
        assert_eq!(series.first_defined_day(), 11);
        assert!(series.records()[10].needs_icu.is_none());
        assert!(series.records()[11].needs_icu.is_some());

        // arrivals are t for t in 5..15, the best 2-day window is 13 + 14
        let (date, peak) = series.peak().unwrap();
        assert_eq!(peak, 27);
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 8).unwrap());
        assert_eq!(series.days_over_capacity(20), 4);
        assert_eq!(series.days_over_capacity(1000), 0);
    }
}
