use crate::types::indicator::Indicator;
use serde::Serialize;
use std::collections::BTreeMap;

pub type Snapshot = BTreeMap<Indicator, f64>;

/// A representative indicator snapshot for an inclusive year range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochEntry {
    pub name: String,
    pub start_year: i64,
    pub end_year: i64,
    pub values: Snapshot,
}

impl EpochEntry {
    pub fn new(name: impl Into<String>, start_year: i64, end_year: i64, values: Snapshot) -> Self {
        Self {
            name: name.into(),
            start_year,
            end_year,
            values,
        }
    }

    pub fn contains(&self, year: i64) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}

/// Ordered, read-only epoch table with a fallback for years it does not cover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochTable {
    entries: Vec<EpochEntry>,
    fallback: EpochEntry,
}

impl EpochTable {
    pub fn new(entries: Vec<EpochEntry>, fallback: EpochEntry) -> Self {
        Self { entries, fallback }
    }

    pub fn builtin() -> Self {
        let entries = vec![
            epoch(
                "Early Modern",
                1500,
                1699,
                [1_000.0, 0.55, 15.0, 800.0, 15.0, 30.0, 40.0, 20.0, 8.0],
            ),
            epoch(
                "Enlightenment",
                1700,
                1788,
                [1_200.0, 0.58, 20.0, 950.0, 25.0, 33.0, 38.0, 28.0, 10.0],
            ),
            epoch(
                "Age of Revolutions",
                1789,
                1848,
                [1_500.0, 0.60, 40.0, 1_100.0, 35.0, 35.0, 36.0, 40.0, 14.0],
            ),
            epoch(
                "Industrial Age",
                1849,
                1913,
                [3_000.0, 0.55, 30.0, 2_200.0, 55.0, 42.0, 32.0, 60.0, 30.0],
            ),
            epoch(
                "World Wars",
                1914,
                1945,
                [5_000.0, 0.50, 60.0, 3_800.0, 70.0, 52.0, 25.0, 80.0, 40.0],
            ),
            epoch(
                "Post-War",
                1946,
                1990,
                [15_000.0, 0.38, 35.0, 11_000.0, 88.0, 68.0, 20.0, 110.0, 60.0],
            ),
            epoch(
                "Globalization",
                1991,
                2024,
                [35_000.0, 0.40, 25.0, 28_000.0, 95.0, 76.0, 13.0, 140.0, 75.0],
            ),
        ];
        Self::new(entries, Self::contemporary_default())
    }

    /// Snapshot used when no interval contains the requested year.
    pub fn contemporary_default() -> EpochEntry {
        epoch(
            "Contemporary default",
            i64::MIN,
            i64::MAX,
            [45_000.0, 0.38, 20.0, 35_000.0, 97.0, 79.0, 11.0, 150.0, 80.0],
        )
    }

    pub fn entries(&self) -> &[EpochEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &EpochEntry {
        &self.fallback
    }

    /// First entry whose interval contains `year`, or the fallback.
    pub fn resolve(&self, year: i64) -> &EpochEntry {
        self.entries
            .iter()
            .find(|entry| entry.contains(year))
            .unwrap_or(&self.fallback)
    }

    pub fn lookup(&self, year: i64) -> &Snapshot {
        &self.resolve(year).values
    }
}

impl Default for EpochTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn epoch(name: &str, start_year: i64, end_year: i64, values: [f64; 9]) -> EpochEntry {
    let values = Indicator::ALL.into_iter().zip(values).collect();
    EpochEntry::new(name, start_year, end_year, values)
}
