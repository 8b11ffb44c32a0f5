// src/schema/types.rs

/// Primitive SQL types used by the Firebolt table definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    BigInt,
    Double,
    Text,
}

impl SqlType {
    pub fn as_sql(self) -> &'static str {
        match self {
            SqlType::BigInt => "BIGINT",
            SqlType::Double => "DOUBLE PRECISION",
            SqlType::Text => "TEXT",
        }
    }
}

/// A single column of an external table. `cast` is the target type when the
/// internal table re-types this column; `None` means it is carried as-is.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub ty: SqlType,
    pub cast: Option<SqlType>,
}

/// How an entity's internal table is materialized from its external table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `SELECT * FROM <table>_ext`.
    SelectStar,
    /// Every column plus a geography point built from lng/lat, keeping only
    /// rows where both coordinates are present.
    CircuitPoint,
    /// Every column plus a headquarters point assigned by substring-matching
    /// the team name against the fixed lookup.
    ConstructorHq,
    /// Every column, applying the per-column casts.
    CastColumns,
}

/// One CSV-backed entity: internal table name, source file, ordered columns,
/// and the internal materialization shape. The external table is always
/// named `<table>_ext`.
#[derive(Debug, Clone, Copy)]
pub struct Entity {
    pub table: &'static str,
    pub file: &'static str,
    pub columns: &'static [Column],
    pub shape: Shape,
}

impl Entity {
    pub fn external_table(&self) -> String {
        format!("{}_ext", self.table)
    }
}

/// A constructor headquarters: team-name substring plus (lng, lat).
#[derive(Debug, Clone, Copy)]
pub struct Headquarters {
    pub pattern: &'static str,
    pub lng: f64,
    pub lat: f64,
}
