//! Static catalog for the F1 dataset: the upload manifest, the seven
//! table entities with their column lists, and the constructor
//! headquarters lookup. External- and internal-table generation both read
//! from [`ENTITIES`], so the two sides cannot drift apart.

pub mod types;

pub use types::{Column, Entity, Headquarters, Shape, SqlType};

use types::SqlType::{BigInt, Double, Text};

/// Every CSV file one run expects to find locally and copy to S3, in upload
/// order. Only the first seven feed tables; the rest are staged for later
/// analytics work.
pub static MANIFEST: [&str; 13] = [
    "circuits.csv",
    "races.csv",
    "drivers.csv",
    "constructors.csv",
    "results.csv",
    "lap_times.csv",
    "qualifying.csv",
    "constructor_results.csv",
    "constructor_standings.csv",
    "driver_standings.csv",
    "pit_stops.csv",
    "sprint_results.csv",
    "status.csv",
];

const fn col(name: &'static str, ty: SqlType) -> Column {
    Column {
        name,
        ty,
        cast: None,
    }
}

const fn cast(name: &'static str, ty: SqlType, target: SqlType) -> Column {
    Column {
        name,
        ty,
        cast: Some(target),
    }
}

static CIRCUITS: [Column; 9] = [
    col("circuitId", BigInt),
    col("circuitRef", Text),
    col("name", Text),
    col("location", Text),
    col("country", Text),
    col("lat", Double),
    col("lng", Double),
    col("alt", Double),
    col("url", Text),
];

static RACES: [Column; 18] = [
    col("raceId", BigInt),
    col("year", BigInt),
    col("round", BigInt),
    col("circuitId", BigInt),
    col("name", Text),
    col("date", Text),
    col("time", Text),
    col("url", Text),
    col("fp1_date", Text),
    col("fp1_time", Text),
    col("fp2_date", Text),
    col("fp2_time", Text),
    col("fp3_date", Text),
    col("fp3_time", Text),
    col("quali_date", Text),
    col("quali_time", Text),
    col("sprint_date", Text),
    col("sprint_time", Text),
];

static DRIVERS: [Column; 9] = [
    col("driverId", BigInt),
    col("driverRef", Text),
    col("number", Text),
    col("code", Text),
    col("forename", Text),
    col("surname", Text),
    col("dob", Text),
    col("nationality", Text),
    col("url", Text),
];

static CONSTRUCTORS: [Column; 5] = [
    col("constructorId", BigInt),
    col("constructorRef", Text),
    col("name", Text),
    col("nationality", Text),
    col("url", Text),
];

// Several result fields arrive as text because the source uses "\N" for
// "not classified"; the internal table casts them anyway, matching the
// original pipeline. Non-numeric values there fail at script execution.
static RESULTS: [Column; 18] = [
    col("resultId", BigInt),
    col("raceId", BigInt),
    col("driverId", BigInt),
    col("constructorId", BigInt),
    cast("number", Text, BigInt),
    col("grid", BigInt),
    cast("position", Text, BigInt),
    col("positionText", Text),
    col("positionOrder", BigInt),
    col("points", Double),
    cast("laps", Text, BigInt),
    col("time", Text),
    cast("milliseconds", Text, BigInt),
    cast("fastestLap", Text, BigInt),
    cast("rank", Text, BigInt),
    col("fastestLapTime", Text),
    cast("fastestLapSpeed", Text, Double),
    col("statusId", BigInt),
];

static LAP_TIMES: [Column; 6] = [
    col("raceId", BigInt),
    col("driverId", BigInt),
    col("lap", BigInt),
    col("position", BigInt),
    col("time", Text),
    col("milliseconds", BigInt),
];

static QUALIFYING: [Column; 9] = [
    col("qualifyId", BigInt),
    col("raceId", BigInt),
    col("driverId", BigInt),
    col("constructorId", BigInt),
    col("number", BigInt),
    col("position", BigInt),
    col("q1", Text),
    col("q2", Text),
    col("q3", Text),
];

/// The seven entities that get an external/internal table pair, in the
/// order their statements appear in the generated script.
pub static ENTITIES: [Entity; 7] = [
    Entity {
        table: "circuits",
        file: "circuits.csv",
        columns: &CIRCUITS,
        shape: Shape::CircuitPoint,
    },
    Entity {
        table: "races",
        file: "races.csv",
        columns: &RACES,
        shape: Shape::SelectStar,
    },
    Entity {
        table: "drivers",
        file: "drivers.csv",
        columns: &DRIVERS,
        shape: Shape::SelectStar,
    },
    Entity {
        table: "constructors",
        file: "constructors.csv",
        columns: &CONSTRUCTORS,
        shape: Shape::ConstructorHq,
    },
    Entity {
        table: "results",
        file: "results.csv",
        columns: &RESULTS,
        shape: Shape::CastColumns,
    },
    Entity {
        table: "lap_times",
        file: "lap_times.csv",
        columns: &LAP_TIMES,
        shape: Shape::SelectStar,
    },
    Entity {
        table: "qualifying",
        file: "qualifying.csv",
        columns: &QUALIFYING,
        shape: Shape::SelectStar,
    },
];

/// Closed lookup from team-name substring to factory coordinates,
/// evaluated in this order with first match winning. Teams missing from
/// the list get a NULL location; extending it means editing this table.
pub static HQ_LOOKUP: [Headquarters; 10] = [
    Headquarters {
        pattern: "Mercedes",
        lng: -1.4167,
        lat: 52.0786,
    },
    Headquarters {
        pattern: "Red Bull",
        lng: -0.4694,
        lat: 52.0603,
    },
    Headquarters {
        pattern: "Ferrari",
        lng: 10.8639,
        lat: 44.5322,
    },
    Headquarters {
        pattern: "McLaren",
        lng: -0.5489,
        lat: 51.3408,
    },
    Headquarters {
        pattern: "Alpine",
        lng: -1.3833,
        lat: 51.2986,
    },
    Headquarters {
        pattern: "AlphaTauri",
        lng: 11.1972,
        lat: 44.8936,
    },
    Headquarters {
        pattern: "Aston Martin",
        lng: -1.4514,
        lat: 52.0719,
    },
    Headquarters {
        pattern: "Williams",
        lng: -0.8492,
        lat: 51.6181,
    },
    Headquarters {
        pattern: "Alfa Romeo",
        lng: 8.5603,
        lat: 47.4581,
    },
    Headquarters {
        pattern: "Haas",
        lng: -82.5361,
        lat: 35.3492,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_file_is_in_the_manifest() {
        for entity in &ENTITIES {
            assert!(
                MANIFEST.contains(&entity.file),
                "{} missing from manifest",
                entity.file
            );
        }
    }

    #[test]
    fn manifest_lists_thirteen_files_without_duplicates() {
        let mut names: Vec<&str> = MANIFEST.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn results_casts_match_the_pipeline() {
        let results = ENTITIES.iter().find(|e| e.table == "results").unwrap();
        let cast_names: Vec<&str> = results
            .columns
            .iter()
            .filter(|c| c.cast.is_some())
            .map(|c| c.name)
            .collect();
        assert_eq!(
            cast_names,
            vec![
                "number",
                "position",
                "laps",
                "milliseconds",
                "fastestLap",
                "rank",
                "fastestLapSpeed"
            ]
        );
        // Raw text fields for times and classification stay untyped.
        for name in ["positionText", "time", "fastestLapTime"] {
            let column = results.columns.iter().find(|c| c.name == name).unwrap();
            assert_eq!(column.ty, SqlType::Text);
            assert!(column.cast.is_none());
        }
    }

    #[test]
    fn hq_lookup_is_the_fixed_ten_teams() {
        assert_eq!(HQ_LOOKUP.len(), 10);
        let ferrari = HQ_LOOKUP.iter().find(|h| h.pattern == "Ferrari").unwrap();
        assert_eq!((ferrari.lng, ferrari.lat), (10.8639, 44.5322));
        // Mercedes outranks everything else in match order.
        assert_eq!(HQ_LOOKUP[0].pattern, "Mercedes");
    }

    #[test]
    fn only_results_uses_cast_columns() {
        for entity in &ENTITIES {
            let has_casts = entity.columns.iter().any(|c| c.cast.is_some());
            assert_eq!(has_casts, entity.shape == Shape::CastColumns);
        }
    }
}
