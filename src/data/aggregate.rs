//! County aggregation
//!
//! Groups team rows by fips code. Team names are joined with `", "` in
//! input order and the count columns are summed exactly. Output is ordered
//! by ascending fips.

use std::collections::BTreeMap;

use super::types::{RegionRecord, TeamRecord};

/// Separator used when joining team names of one county
pub const TEAM_SEPARATOR: &str = ", ";

/// Aggregate team rows into one row per county
pub fn aggregate_by_region(teams: &[TeamRecord]) -> Vec<RegionRecord> {
    let mut regions: BTreeMap<u32, RegionRecord> = BTreeMap::new();

    for team in teams {
        let region = regions.entry(team.fips).or_insert_with(|| RegionRecord {
            fips: team.fips,
            teams: String::new(),
            championships: 0,
            points: 0,
            mvps: 0,
            finals_mvps: 0,
            all_nba_first_team: 0,
            leading_scorer: 0,
            years_existed: 0,
        });

        if !region.teams.is_empty() {
            region.teams.push_str(TEAM_SEPARATOR);
        }
        region.teams.push_str(&team.team);

        region.championships += team.championships;
        region.points += team.points;
        region.mvps += team.mvps;
        region.finals_mvps += team.finals_mvps;
        region.all_nba_first_team += team.all_nba_first_team;
        region.leading_scorer += team.leading_scorer;
        region.years_existed += team.years_existed;
    }

    regions.into_values().collect()
}
