use crate::db::StationActivity;

/// Min/avg/max over a set of temperature observations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSummary {
    pub min: f64,
    /// Mean rounded to one decimal place
    pub avg: f64,
    pub max: f64,
}

/// Round to one decimal place, halves away from zero
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Summarize observations; `None` when there are none
pub fn summarize<I>(temperatures: I) -> Option<TemperatureSummary>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in temperatures {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    if count == 0 {
        return None;
    }

    Some(TemperatureSummary {
        min,
        avg: round_tenths(sum / count as f64),
        max,
    })
}

/// Station with the most rows, ties going to the smallest station id
pub fn most_active<I>(activity: I) -> Option<StationActivity>
where
    I: IntoIterator<Item = StationActivity>,
{
    activity.into_iter().max_by(|a, b| {
        a.observations
            .cmp(&b.observations)
            .then_with(|| b.station_id.cmp(&a.station_id))
    })
}
