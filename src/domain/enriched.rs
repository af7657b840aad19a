//! Enriched day records and the tail-alignment merge.

use crate::domain::candle::Candle;
use crate::domain::error::PivotError;
use crate::domain::levels::{
    CamarillaLevels, DemarkPoints, FloorPivots, LevelKind, LevelRecord, WoodiePoints,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// A candle plus the level records attached to it, keyed by field name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDay {
    #[serde(flatten)]
    pub candle: Candle,
    #[serde(flatten)]
    pub levels: BTreeMap<String, LevelRecord>,
}

impl EnrichedDay {
    pub fn new(candle: Candle) -> Self {
        Self {
            candle,
            levels: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&LevelRecord> {
        self.levels.get(field)
    }

    pub fn floor(&self) -> Option<&FloorPivots> {
        match self.levels.get(LevelKind::Floor.field()) {
            Some(LevelRecord::Floor(f)) => Some(f),
            _ => None,
        }
    }

    pub fn tom(&self) -> Option<&DemarkPoints> {
        match self.levels.get(LevelKind::Demark.field()) {
            Some(LevelRecord::Demark(d)) => Some(d),
            _ => None,
        }
    }

    pub fn wood(&self) -> Option<&WoodiePoints> {
        match self.levels.get(LevelKind::Woodie.field()) {
            Some(LevelRecord::Woodie(w)) => Some(w),
            _ => None,
        }
    }

    pub fn cam(&self) -> Option<&CamarillaLevels> {
        match self.levels.get(LevelKind::Camarilla.field()) {
            Some(LevelRecord::Camarilla(c)) => Some(c),
            _ => None,
        }
    }
}

impl From<Candle> for EnrichedDay {
    fn from(candle: Candle) -> Self {
        Self::new(candle)
    }
}

/// Attach `additions` to the tail of `reference` under `field`.
///
/// `additions[j]` lands on `reference[m - k + j]`, so a shorter series is
/// right-aligned against the most recent days. Returns a new sequence;
/// an existing entry under the same field is overwritten.
pub fn merge_aligned<T>(
    reference: &[EnrichedDay],
    additions: &[T],
    field: &str,
) -> Result<Vec<EnrichedDay>, PivotError>
where
    T: Clone + Into<LevelRecord>,
{
    if field.trim().is_empty() {
        return Err(PivotError::Alignment {
            reason: "unable to append values, no field given".into(),
        });
    }

    let m = reference.len();
    let k = additions.len();
    if k > m {
        return Err(PivotError::Alignment {
            reason: format!("cannot align {k} values onto {m} days under '{field}'"),
        });
    }

    let offset = m - k;
    let mut merged = reference.to_vec();
    for (day, add) in merged[offset..].iter_mut().zip(additions) {
        day.levels.insert(field.to_string(), add.clone().into());
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(n: usize) -> Vec<EnrichedDay> {
        (0..n)
            .map(|i| EnrichedDay::new(Candle::new(i as f64, i as f64, i as f64, i as f64)))
            .collect()
    }

    fn tom(v: f64) -> DemarkPoints {
        DemarkPoints { low: v, high: v }
    }

    #[test]
    fn merge_equal_length_aligns_index_for_index() {
        let reference = days(5);
        let additions: Vec<DemarkPoints> = (0..5).map(|i| tom(i as f64 * 10.0)).collect();
        let merged = merge_aligned(&reference, &additions, "x").unwrap();

        assert_eq!(merged[0].get("x"), Some(&LevelRecord::Demark(additions[0])));
        assert_eq!(merged[4].get("x"), Some(&LevelRecord::Demark(additions[4])));
    }

    #[test]
    fn merge_shorter_additions_right_aligned() {
        let reference = days(5);
        let additions = vec![tom(1.0), tom(2.0)];
        let merged = merge_aligned(&reference, &additions, "tom").unwrap();

        assert!(merged[0].tom().is_none());
        assert!(merged[2].tom().is_none());
        assert_eq!(merged[3].tom(), Some(&tom(1.0)));
        assert_eq!(merged[4].tom(), Some(&tom(2.0)));
    }

    #[test]
    fn merge_without_field_fails() {
        let reference = days(2);
        let additions = vec![tom(1.0), tom(2.0)];
        let err = merge_aligned(&reference, &additions, "").unwrap_err();
        assert!(matches!(err, PivotError::Alignment { .. }));
    }

    #[test]
    fn merge_longer_additions_fails() {
        let reference = days(1);
        let additions = vec![tom(1.0), tom(2.0)];
        let err = merge_aligned(&reference, &additions, "tom").unwrap_err();
        assert!(matches!(err, PivotError::Alignment { .. }));
    }

    #[test]
    fn merge_does_not_touch_reference() {
        let reference = days(3);
        let additions = vec![tom(1.0), tom(2.0), tom(3.0)];
        let _ = merge_aligned(&reference, &additions, "tom").unwrap();
        assert!(reference.iter().all(|d| d.levels.is_empty()));
    }

    #[test]
    fn merge_same_field_twice_overwrites() {
        let reference = days(2);
        let first = merge_aligned(&reference, &[tom(1.0), tom(2.0)], "tom").unwrap();
        let second = merge_aligned(&first, &[tom(7.0), tom(8.0)], "tom").unwrap();

        assert_eq!(second[0].levels.len(), 1);
        assert_eq!(second[1].tom(), Some(&tom(8.0)));
    }

    #[test]
    fn merge_empty_additions_is_noop() {
        let reference = days(3);
        let merged = merge_aligned::<DemarkPoints>(&reference, &[], "tom").unwrap();
        assert_eq!(merged, reference);
    }

    #[test]
    fn typed_accessor_rejects_mismatched_record() {
        let reference = days(1);
        let merged = merge_aligned(&reference, &[tom(1.0)], "floor").unwrap();
        assert!(merged[0].floor().is_none());
        assert!(merged[0].get("floor").is_some());
    }

    #[test]
    fn enriched_day_serializes_flat() {
        let reference = days(1);
        let merged = merge_aligned(&reference, &[tom(1.0)], "tom").unwrap();
        let json = serde_json::to_value(&merged[0]).unwrap();
        assert_eq!(json["open"], 0.0);
        assert_eq!(json["tom"]["high"], 1.0);
    }
}
