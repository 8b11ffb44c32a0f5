//! Firebolt setup-script generation. Everything here is pure string
//! templating over the static catalog in [`crate::schema`]; the only
//! outside input besides bucket and prefix is the wall clock stamped into
//! the header comment.

use chrono::{DateTime, Local};

use crate::schema::{Entity, Shape, ENTITIES, HQ_LOOKUP};

pub const DATABASE: &str = "f1_geospatial_analytics";

/// Render the full setup script for `s3://{bucket}/{prefix}/`, stamped
/// with the current local time.
pub fn generate(bucket: &str, prefix: &str) -> String {
    generate_at(bucket, prefix, Local::now())
}

/// Deterministic variant of [`generate`] with an explicit timestamp.
pub fn generate_at(bucket: &str, prefix: &str, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "-- ================================================\n\
         -- F1 Geospatial Analytics - Firebolt Setup Script\n\
         -- Generated on: {}\n\
         -- ================================================\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str(&format!(
        "-- Create database\n\
         CREATE DATABASE IF NOT EXISTS {DATABASE};\n\
         USE {DATABASE};\n\n"
    ));

    // Dropping both halves of every pair keeps re-runs clean.
    out.push_str("-- Drop existing tables if they exist\n");
    for entity in &ENTITIES {
        out.push_str(&format!("DROP TABLE IF EXISTS {};\n", entity.table));
    }
    out.push('\n');
    for entity in &ENTITIES {
        out.push_str(&format!(
            "DROP TABLE IF EXISTS {};\n",
            entity.external_table()
        ));
    }
    out.push('\n');

    out.push_str("-- Create external tables pointing to S3 data\n");
    for entity in &ENTITIES {
        out.push_str(&external_table(entity, bucket, prefix));
        out.push('\n');
    }

    out.push_str("-- Create internal tables with geospatial features\n");
    for entity in &ENTITIES {
        out.push_str(&internal_table(entity));
        out.push('\n');
    }

    out.push_str(&row_count_report());
    out.push('\n');
    out.push_str(SAMPLE_QUERY);
    out
}

fn external_table(entity: &Entity, bucket: &str, prefix: &str) -> String {
    let columns = entity
        .columns
        .iter()
        .map(|c| format!("  {} {}", c.name, c.ty.as_sql()))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "CREATE EXTERNAL TABLE {ext} (\n\
         {columns}\n\
         )\n\
         URL = 's3://{bucket}/{prefix}/'\n\
         OBJECT_PATTERN = '{file}'\n\
         TYPE = (CSV SKIP_HEADER_ROWS = 1);\n",
        ext = entity.external_table(),
        file = entity.file,
    )
}

fn internal_table(entity: &Entity) -> String {
    if entity.shape == Shape::SelectStar {
        return format!(
            "CREATE TABLE {table} AS\nSELECT * FROM {ext};\n",
            table = entity.table,
            ext = entity.external_table(),
        );
    }

    let columns = projection(entity).join(",\n  ");
    let mut sql = format!(
        "CREATE TABLE {table} AS\nSELECT\n  {columns}\nFROM {ext}",
        table = entity.table,
        ext = entity.external_table(),
    );
    if entity.shape == Shape::CircuitPoint {
        sql.push_str("\nWHERE lat IS NOT NULL AND lng IS NOT NULL");
    }
    sql.push_str(";\n");
    sql
}

/// Per-column select list for a projected internal table. Derived point
/// columns slot in just before the trailing `url`, where the hand-written
/// script put them.
fn projection(entity: &Entity) -> Vec<String> {
    let mut lines = Vec::with_capacity(entity.columns.len() + 1);
    for column in entity.columns {
        if column.name == "url" {
            match entity.shape {
                Shape::CircuitPoint => {
                    lines.push("ST_GeogPoint(lng, lat) AS circuit_location".to_string());
                }
                Shape::ConstructorHq => lines.push(hq_case()),
                _ => {}
            }
        }
        lines.push(match column.cast {
            Some(target) => format!(
                "CAST({name} AS {ty}) as {name}",
                name = column.name,
                ty = target.as_sql()
            ),
            None => column.name.to_string(),
        });
    }
    lines
}

/// First matching substring wins; teams outside the lookup fall through
/// to NULL.
fn hq_case() -> String {
    let mut case = String::from("CASE\n");
    for hq in &HQ_LOOKUP {
        case.push_str(&format!(
            "    WHEN name LIKE '%{}%' THEN ST_GeogPoint({}, {})\n",
            hq.pattern, hq.lng, hq.lat
        ));
    }
    case.push_str("    ELSE NULL\n  END AS hq_location");
    case
}

fn row_count_report() -> String {
    let mut out = String::from("-- Verify data ingestion\n");
    for (i, entity) in ENTITIES.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!(
                "SELECT '{0}' as table_name, COUNT(*) as row_count FROM {0}\n",
                entity.table
            ));
        } else {
            out.push_str(&format!(
                "UNION ALL\nSELECT '{0}', COUNT(*) FROM {0}\n",
                entity.table
            ));
        }
    }
    out.push_str("ORDER BY table_name;\n");
    out
}

static SAMPLE_QUERY: &str = "-- Sample geospatial query to verify setup\n\
SELECT\n\
\x20 name,\n\
\x20 location,\n\
\x20 country,\n\
\x20 ST_AsText(circuit_location) as coordinates\n\
FROM circuits\n\
WHERE circuit_location IS NOT NULL\n\
LIMIT 5;\n";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_script() -> String {
        let at = Local.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap();
        generate_at("acme-data", "f1-data/20240315", at)
    }

    #[test]
    fn output_is_deterministic_for_fixed_inputs() {
        assert_eq!(fixed_script(), fixed_script());
        assert!(fixed_script().contains("-- Generated on: 2024-03-15 12:30:00"));
    }

    #[test]
    fn one_table_pair_per_entity() {
        let script = fixed_script();
        assert_eq!(script.matches("CREATE EXTERNAL TABLE ").count(), 7);
        assert_eq!(script.matches("CREATE TABLE ").count(), 7);
        assert_eq!(script.matches("DROP TABLE IF EXISTS ").count(), 14);
    }

    #[test]
    fn external_tables_point_at_the_run_prefix() {
        let script = fixed_script();
        assert_eq!(
            script
                .matches("URL = 's3://acme-data/f1-data/20240315/'")
                .count(),
            7
        );
        assert!(script.contains("OBJECT_PATTERN = 'qualifying.csv'"));
        assert_eq!(
            script.matches("TYPE = (CSV SKIP_HEADER_ROWS = 1);").count(),
            7
        );
    }

    #[test]
    fn pass_through_tables_select_star() {
        let script = fixed_script();
        for table in ["races", "drivers", "lap_times", "qualifying"] {
            let expected = format!("CREATE TABLE {table} AS\nSELECT * FROM {table}_ext;");
            assert!(script.contains(&expected), "missing pass-through {table}");
        }
    }

    #[test]
    fn circuits_gain_a_point_and_drop_null_coordinates() {
        let script = fixed_script();
        assert!(script.contains("ST_GeogPoint(lng, lat) AS circuit_location,\n  url\nFROM circuits_ext"));
        assert!(script.contains("WHERE lat IS NOT NULL AND lng IS NOT NULL;"));
    }

    #[test]
    fn constructor_case_follows_lookup_order_and_ends_null() {
        let script = fixed_script();
        assert!(script.contains("WHEN name LIKE '%Ferrari%' THEN ST_GeogPoint(10.8639, 44.5322)"));
        let positions: Vec<usize> = HQ_LOOKUP
            .iter()
            .map(|hq| {
                script
                    .find(&format!("WHEN name LIKE '%{}%'", hq.pattern))
                    .expect("every lookup team appears")
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(script.contains("ELSE NULL\n  END AS hq_location"));
    }

    #[test]
    fn results_casts_are_emitted_verbatim() {
        let script = fixed_script();
        assert!(script.contains("CAST(number AS BIGINT) as number"));
        assert!(script.contains("CAST(milliseconds AS BIGINT) as milliseconds"));
        assert!(script.contains("CAST(fastestLapSpeed AS DOUBLE PRECISION) as fastestLapSpeed"));
        // Classification text stays text.
        assert!(script.contains("\n  positionText,"));
        assert!(!script.contains("CAST(positionText"));
    }

    #[test]
    fn verification_queries_close_out_the_script() {
        let script = fixed_script();
        assert_eq!(script.matches("UNION ALL").count(), 6);
        assert!(script.contains(
            "SELECT 'circuits' as table_name, COUNT(*) as row_count FROM circuits"
        ));
        assert!(script.trim_end().ends_with("LIMIT 5;"));
        assert!(script.contains("ORDER BY table_name;"));
    }
}
