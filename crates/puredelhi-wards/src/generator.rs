use chrono::{Duration, Utc};
use puredelhi_core::{
    Confidence, HistoricalDay, PollutantData, PollutionLevel, SourceContribution, WardData, Zone,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;
use uuid::Uuid;

use crate::names::WARD_NAMES;

/// Number of municipal wards in Delhi.
pub const WARD_COUNT: usize = 274;

/// Samples in the short-term trend array, one every two hours.
pub const TREND_SAMPLES: usize = 24;

/// Days in the band calendar.
pub const HISTORY_DAYS: usize = 30;

const SOURCE_CATEGORIES: [&str; 4] = ["Vehicles", "Construction", "Waste Burning", "Industry"];

/// Relative band weights per zone, ordered Good..Severe. The industrial
/// north and trans-Yamuna east skew into the upper bands; south Delhi
/// carries the greener residential belts.
fn band_weights(zone: Zone) -> [u32; 6] {
    match zone {
        Zone::North => [2, 8, 25, 30, 25, 10],
        Zone::East => [2, 6, 22, 30, 28, 12],
        Zone::West => [4, 10, 28, 30, 20, 8],
        Zone::South => [8, 17, 30, 25, 15, 5],
        Zone::Central => [5, 12, 28, 28, 20, 7],
    }
}

const ALL_LEVELS: [PollutionLevel; 6] = [
    PollutionLevel::Good,
    PollutionLevel::Satisfactory,
    PollutionLevel::Moderate,
    PollutionLevel::Poor,
    PollutionLevel::VeryPoor,
    PollutionLevel::Severe,
];

/// Generate the full 274-ward dataset from a seed. Calls with the same
/// seed produce the same data apart from `last_updated`.
pub fn generate_wards(seed: u64) -> Vec<WardData> {
    let mut rng = StdRng::seed_from_u64(seed);
    let now = Utc::now();

    let mut wards: Vec<WardData> = (0..WARD_COUNT)
        .map(|idx| {
            let number = (idx + 1) as u16;
            let zone = Zone::from_index(idx);
            let aqi = sample_aqi(&mut rng, zone);

            WardData {
                id: Uuid::from_bytes(rng.random::<[u8; 16]>()),
                name: ward_name(idx),
                number,
                zone,
                aqi,
                level: PollutionLevel::from_aqi(aqi),
                metrics: derive_metrics(&mut rng, aqi),
                trend24h: generate_trend(&mut rng, aqi),
                history30d: generate_history(&mut rng, aqi, now),
                sources: generate_sources(&mut rng),
                // Filled in by assign_rankings below.
                rank_zone: 0,
                rank_overall: 0,
                yoy_change: rng.random_range(-15..=15),
                confidence: if rng.random_bool(0.7) {
                    Confidence::High
                } else {
                    Confidence::Medium
                },
                last_updated: now,
            }
        })
        .collect();

    assign_rankings(&mut wards);
    debug!(wards = wards.len(), seed, "Generated ward dataset");
    wards
}

fn ward_name(idx: usize) -> String {
    let base = WARD_NAMES[idx % WARD_NAMES.len()];
    let cycle = idx / WARD_NAMES.len();
    if cycle == 0 {
        base.to_string()
    } else {
        format!("{} Sector {}", base, cycle + 1)
    }
}

/// Draw an AQI from the zone's band distribution, uniform within the
/// chosen band.
fn sample_aqi(rng: &mut StdRng, zone: Zone) -> u16 {
    let weights = band_weights(zone);
    let total: u32 = weights.iter().sum();
    let mut pick = rng.random_range(0..total);

    for (level, weight) in ALL_LEVELS.iter().zip(weights) {
        if pick < weight {
            let (lo, hi) = level.aqi_range();
            return rng.random_range(lo..=hi);
        }
        pick -= weight;
    }
    unreachable!("band weights exhausted")
}

/// Derive pollutant concentrations from the index with bounded jitter.
/// PM2.5 and PM10 dominate, the way CPCB sub-index arithmetic works out
/// for Delhi winters.
fn derive_metrics(rng: &mut StdRng, aqi: u16) -> PollutantData {
    let aqi = aqi as f32;
    let jitter = |rng: &mut StdRng, spread: f32| rng.random_range(-spread..=spread);

    PollutantData {
        pm25: round1((aqi * 0.55 + jitter(rng, aqi * 0.08)).max(2.0)),
        pm10: round1((aqi * 0.92 + jitter(rng, aqi * 0.10)).max(5.0)),
        no2: round1((aqi * 0.15 + jitter(rng, 6.0)).max(1.0)),
        so2: round1((aqi * 0.045 + jitter(rng, 2.0)).max(0.5)),
        co: round2((aqi * 0.008 + jitter(rng, 0.3)).max(0.1)),
        o3: round1((aqi * 0.12 + jitter(rng, 8.0)).max(1.0)),
        nh3: round1((aqi * 0.05 + jitter(rng, 3.0)).max(0.5)),
    }
}

fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Random-walk the short-term trend around the current reading. The walk
/// runs backward from the present so the final sample is the live AQI.
fn generate_trend(rng: &mut StdRng, aqi: u16) -> Vec<u16> {
    let lo = aqi.saturating_sub(60);
    let hi = (aqi + 60).min(500);

    let mut samples = Vec::with_capacity(TREND_SAMPLES);
    let mut current = aqi as i32;
    samples.push(aqi);
    for _ in 1..TREND_SAMPLES {
        current += rng.random_range(-12..=12);
        current = current.clamp(lo as i32, hi as i32);
        samples.push(current as u16);
    }
    samples.reverse();
    samples
}

/// Thirty daily readings ending yesterday, each classified into its own
/// band.
fn generate_history(
    rng: &mut StdRng,
    aqi: u16,
    now: chrono::DateTime<Utc>,
) -> Vec<HistoricalDay> {
    let today = now.date_naive();
    (0..HISTORY_DAYS)
        .map(|i| {
            let date = today - Duration::days((HISTORY_DAYS - i) as i64);
            let day_aqi =
                ((aqi as i32) + rng.random_range(-80..=80)).clamp(0, 500) as u16;
            HistoricalDay {
                date,
                aqi: day_aqi,
                level: PollutionLevel::from_aqi(day_aqi),
            }
        })
        .collect()
}

/// Source split over the four tracked categories; integer percentages
/// that always sum to 100, with industry absorbing the remainder.
fn generate_sources(rng: &mut StdRng) -> Vec<SourceContribution> {
    let vehicles = 30 + rng.random_range(0..=20);
    let construction = 10 + rng.random_range(0..=15);
    let waste = 5 + rng.random_range(0..=10);
    let industry = 100 - vehicles - construction - waste;

    SOURCE_CATEGORIES
        .iter()
        .zip([vehicles, construction, waste, industry])
        .map(|(category, percentage)| SourceContribution {
            category: (*category).to_string(),
            percentage: percentage as u8,
        })
        .collect()
}

/// Rank wards overall and within their zone, 1 = cleanest. Ties break on
/// ward number so rankings are stable across identical readings.
fn assign_rankings(wards: &mut [WardData]) {
    let mut order: Vec<usize> = (0..wards.len()).collect();
    order.sort_by_key(|&i| (wards[i].aqi, wards[i].number));
    for (rank, &i) in order.iter().enumerate() {
        wards[i].rank_overall = (rank + 1) as u16;
    }

    for zone in Zone::ALL {
        let mut members: Vec<usize> = (0..wards.len())
            .filter(|&i| wards[i].zone == zone)
            .collect();
        members.sort_by_key(|&i| (wards[i].aqi, wards[i].number));
        for (rank, &i) in members.iter().enumerate() {
            wards[i].rank_zone = (rank + 1) as u16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generates_exactly_274_wards() {
        let wards = generate_wards(42);
        assert_eq!(wards.len(), WARD_COUNT);
    }

    #[test]
    fn ward_numbers_are_sequential_and_names_unique() {
        let wards = generate_wards(42);
        for (idx, ward) in wards.iter().enumerate() {
            assert_eq!(ward.number as usize, idx + 1);
        }
        let names: HashSet<&str> = wards.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names.len(), WARD_COUNT);
    }

    #[test]
    fn levels_match_band_classification() {
        for ward in generate_wards(7) {
            assert!(ward.aqi <= 500);
            assert_eq!(ward.level, PollutionLevel::from_aqi(ward.aqi));
            for day in &ward.history30d {
                assert_eq!(day.level, PollutionLevel::from_aqi(day.aqi));
            }
        }
    }

    #[test]
    fn trend_and_history_have_fixed_lengths() {
        for ward in generate_wards(7) {
            assert_eq!(ward.trend24h.len(), TREND_SAMPLES);
            assert_eq!(ward.history30d.len(), HISTORY_DAYS);
            assert_eq!(*ward.trend24h.last().unwrap(), ward.aqi);
        }
    }

    #[test]
    fn history_ends_yesterday() {
        let today = Utc::now().date_naive();
        for ward in generate_wards(3) {
            let last = ward.history30d.last().unwrap();
            assert_eq!(last.date, today - Duration::days(1));
            let first = ward.history30d.first().unwrap();
            assert_eq!(first.date, today - Duration::days(HISTORY_DAYS as i64));
        }
    }

    #[test]
    fn source_percentages_sum_to_100() {
        for ward in generate_wards(11) {
            let total: u32 = ward.sources.iter().map(|s| s.percentage as u32).sum();
            assert_eq!(total, 100, "ward {} sources {:?}", ward.number, ward.sources);
            assert_eq!(ward.sources.len(), 4);
        }
    }

    #[test]
    fn overall_ranking_is_a_permutation() {
        let wards = generate_wards(13);
        let ranks: HashSet<u16> = wards.iter().map(|w| w.rank_overall).collect();
        assert_eq!(ranks.len(), WARD_COUNT);
        assert!(ranks.contains(&1));
        assert!(ranks.contains(&(WARD_COUNT as u16)));

        // Rank 1 is the cleanest ward.
        let best = wards.iter().min_by_key(|w| (w.aqi, w.number)).unwrap();
        assert_eq!(best.rank_overall, 1);
    }

    #[test]
    fn zone_rankings_are_permutations_within_each_zone() {
        let wards = generate_wards(13);
        for zone in Zone::ALL {
            let members: Vec<&WardData> = wards.iter().filter(|w| w.zone == zone).collect();
            let ranks: HashSet<u16> = members.iter().map(|w| w.rank_zone).collect();
            assert_eq!(ranks.len(), members.len());
            assert!(ranks.contains(&1));
            assert!(ranks.contains(&(members.len() as u16)));
        }
    }

    #[test]
    fn ranking_orders_by_aqi() {
        let wards = generate_wards(17);
        let mut sorted: Vec<&WardData> = wards.iter().collect();
        sorted.sort_by_key(|w| w.rank_overall);
        for pair in sorted.windows(2) {
            assert!(pair[0].aqi <= pair[1].aqi);
        }
    }

    #[test]
    fn same_seed_reproduces_the_dataset() {
        let a = generate_wards(99);
        let b = generate_wards(99);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.name, y.name);
            assert_eq!(x.aqi, y.aqi);
            assert_eq!(x.metrics, y.metrics);
            assert_eq!(x.trend24h, y.trend24h);
            assert_eq!(x.sources, y.sources);
            assert_eq!(x.rank_overall, y.rank_overall);
            assert_eq!(x.rank_zone, y.rank_zone);
            assert_eq!(x.yoy_change, y.yoy_change);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_wards(1);
        let b = generate_wards(2);
        assert!(a.iter().zip(&b).any(|(x, y)| x.aqi != y.aqi));
    }

    #[test]
    fn zones_split_evenly() {
        let wards = generate_wards(5);
        for zone in Zone::ALL {
            let count = wards.iter().filter(|w| w.zone == zone).count();
            // 274 wards over 5 zones: 55/55/55/55/54.
            assert!(count == 54 || count == 55, "{zone}: {count}");
        }
    }
}
