//! Small in-memory dataset shared by unit tests

use geojson::FeatureCollection;
use std::sync::Arc;

use super::context::DataContext;
use super::loader::{parse_counties, parse_teams};
use super::types::TeamRecord;

pub const SAMPLE_CSV: &str = "\
Team,State,fips,Founded,Yrs Existed,Championships,Points,MVPs,Finals MVPs,All-NBA First Team Selections,Leading Scorer,Percentage of Points Scored,text
Los Angeles Lakers,California,6037,1947,76,17,450000,8,9,33,7,12.5%,Lakers
Los Angeles Clippers,California,6037,1970,53,0,310000,1,0,4,1,6.1,Clippers
New York Knicks,New York,36061,1946,77,2,398000,,1,5,3,7.4,Knicks
Chicago Bulls,Illinois,17031,1966,57,6,401000,5,6,10,10,7.0,Bulls
";

pub const SAMPLE_COUNTIES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "id": "06037", "properties": {"NAME": "Los Angeles"},
     "geometry": {"type": "Polygon", "coordinates": [[[-118.9, 34.8], [-117.6, 34.8], [-117.6, 33.7], [-118.9, 33.7], [-118.9, 34.8]]]}},
    {"type": "Feature", "id": "36061", "properties": {"NAME": "New York"},
     "geometry": {"type": "Polygon", "coordinates": [[[-74.05, 40.88], [-73.9, 40.88], [-73.9, 40.68], [-74.05, 40.68], [-74.05, 40.88]]]}},
    {"type": "Feature", "id": "17031", "properties": {"NAME": "Cook"},
     "geometry": {"type": "Polygon", "coordinates": [[[-88.3, 42.2], [-87.5, 42.2], [-87.5, 41.5], [-88.3, 41.5], [-88.3, 42.2]]]}}
  ]
}"#;

/// A team row with only name, county and points set
pub fn team(name: &str, fips: u32, points: u64) -> TeamRecord {
    TeamRecord {
        team: name.to_string(),
        state: "Somewhere".to_string(),
        fips,
        founded: 1950,
        years_existed: 10,
        championships: 0,
        points,
        mvps: 0,
        finals_mvps: 0,
        all_nba_first_team: 0,
        leading_scorer: 0,
        percentage_of_points: 0.0,
        text: name.to_string(),
    }
}

pub fn sample_counties() -> FeatureCollection {
    parse_counties(SAMPLE_COUNTIES).unwrap()
}

pub fn sample_context() -> Arc<DataContext> {
    let teams = parse_teams(SAMPLE_CSV).unwrap();
    Arc::new(DataContext::new(teams, sample_counties()).unwrap())
}
