//! Derived egg statistics and the engine-agnostic aggregations.
//!
//! # Invariants
//! - Per-chicken stats contain every chicken, zero-egg chickens included.
//! - Per-chicken stats are ordered by `chicken_name ASC, chicken_id ASC`.
//! - Per-day stats contain only dates with at least one record, `date ASC`.
//! - Totals of either view sum to the number of egg records.

use super::chicken::{Chicken, ChickenId};
use super::egg_record::EggRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Egg total for one chicken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChickenEggStats {
    pub chicken_id: ChickenId,
    pub chicken_name: String,
    pub total_eggs: u64,
}

/// Egg total for one calendar day, across all chickens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEggStats {
    pub date: NaiveDate,
    pub total_eggs: u64,
}

/// Counts eggs per chicken with outer-join semantics.
pub fn aggregate_chicken_egg_stats(
    chickens: &[Chicken],
    eggs: &[EggRecord],
) -> Vec<ChickenEggStats> {
    let mut totals: HashMap<ChickenId, u64> = HashMap::with_capacity(chickens.len());
    for egg in eggs {
        *totals.entry(egg.chicken_id).or_default() += 1;
    }

    let mut stats: Vec<ChickenEggStats> = chickens
        .iter()
        .map(|chicken| ChickenEggStats {
            chicken_id: chicken.id,
            chicken_name: chicken.name.clone(),
            total_eggs: totals.get(&chicken.id).copied().unwrap_or(0),
        })
        .collect();
    stats.sort_by(|left, right| {
        left.chicken_name
            .cmp(&right.chicken_name)
            .then(left.chicken_id.cmp(&right.chicken_id))
    });
    stats
}

/// Counts eggs per distinct laid date.
pub fn aggregate_daily_egg_stats(eggs: &[EggRecord]) -> Vec<DailyEggStats> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for egg in eggs {
        *totals.entry(egg.laid_date).or_default() += 1;
    }

    totals
        .into_iter()
        .map(|(date, total_eggs)| DailyEggStats { date, total_eggs })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{aggregate_chicken_egg_stats, aggregate_daily_egg_stats};
    use crate::model::chicken::Chicken;
    use crate::model::egg_record::EggRecord;
    use chrono::NaiveDate;

    fn chicken(id: i64, name: &str) -> Chicken {
        Chicken {
            id,
            name: name.to_string(),
            created_at: 0,
        }
    }

    fn egg(id: i64, chicken_id: i64, day: u32) -> EggRecord {
        EggRecord {
            id,
            chicken_id,
            laid_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            created_at: 0,
        }
    }

    #[test]
    fn chicken_stats_include_zero_egg_chickens() {
        let chickens = [chicken(1, "Henrietta"), chicken(2, "Blanche")];
        let eggs = [egg(1, 1, 1), egg(2, 1, 1)];

        let stats = aggregate_chicken_egg_stats(&chickens, &eggs);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].chicken_name, "Blanche");
        assert_eq!(stats[0].total_eggs, 0);
        assert_eq!(stats[1].chicken_name, "Henrietta");
        assert_eq!(stats[1].total_eggs, 2);
    }

    #[test]
    fn duplicate_names_keep_store_order() {
        let chickens = [chicken(3, "Mabel"), chicken(1, "Mabel"), chicken(2, "Ada")];
        let ids: Vec<i64> = aggregate_chicken_egg_stats(&chickens, &[])
            .into_iter()
            .map(|row| row.chicken_id)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn name_ordering_is_byte_wise() {
        let chickens = [chicken(1, "alice"), chicken(2, "Zara"), chicken(3, "Alice")];
        let names: Vec<String> = aggregate_chicken_egg_stats(&chickens, &[])
            .into_iter()
            .map(|row| row.chicken_name)
            .collect();
        assert_eq!(names, vec!["Alice", "Zara", "alice"]);
    }

    #[test]
    fn daily_stats_group_across_chickens_and_skip_empty_days() {
        let eggs = [egg(1, 1, 5), egg(2, 2, 1), egg(3, 1, 5), egg(4, 2, 5)];

        let stats = aggregate_daily_egg_stats(&eggs);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(stats[0].total_eggs, 1);
        assert_eq!(stats[1].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(stats[1].total_eggs, 3);
    }

    #[test]
    fn empty_inputs_give_empty_views() {
        assert!(aggregate_chicken_egg_stats(&[], &[]).is_empty());
        assert!(aggregate_daily_egg_stats(&[]).is_empty());
    }
}
