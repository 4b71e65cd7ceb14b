use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected raw range of an indicator, used for normalization and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    GdpPerCapita,
    GiniCoefficient,
    PoliticalEvents,
    AverageIncome,
    LiteracyRate,
    LifeExpectancy,
    BirthRate,
    PopulationDensity,
    UrbanizationRate,
}

impl Indicator {
    pub const ALL: [Indicator; 9] = [
        Indicator::GdpPerCapita,
        Indicator::GiniCoefficient,
        Indicator::PoliticalEvents,
        Indicator::AverageIncome,
        Indicator::LiteracyRate,
        Indicator::LifeExpectancy,
        Indicator::BirthRate,
        Indicator::PopulationDensity,
        Indicator::UrbanizationRate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Indicator::GdpPerCapita => "gdp_per_capita",
            Indicator::GiniCoefficient => "gini_coefficient",
            Indicator::PoliticalEvents => "political_events",
            Indicator::AverageIncome => "average_income",
            Indicator::LiteracyRate => "literacy_rate",
            Indicator::LifeExpectancy => "life_expectancy",
            Indicator::BirthRate => "birth_rate",
            Indicator::PopulationDensity => "population_density",
            Indicator::UrbanizationRate => "urbanization_rate",
        }
    }

    pub fn from_name(name: &str) -> Option<Indicator> {
        Self::ALL
            .into_iter()
            .find(|indicator| indicator.name() == name.trim())
    }

    pub fn domain(self) -> Domain {
        match self {
            Indicator::GdpPerCapita => Domain::new(0.0, 100_000.0),
            Indicator::GiniCoefficient => Domain::new(0.0, 1.0),
            Indicator::PoliticalEvents => Domain::new(0.0, 100.0),
            Indicator::AverageIncome => Domain::new(0.0, 100_000.0),
            Indicator::LiteracyRate => Domain::new(0.0, 100.0),
            Indicator::LifeExpectancy => Domain::new(20.0, 90.0),
            Indicator::BirthRate => Domain::new(5.0, 60.0),
            Indicator::PopulationDensity => Domain::new(0.0, 1_000.0),
            Indicator::UrbanizationRate => Domain::new(0.0, 100.0),
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Indicator::GdpPerCapita | Indicator::GiniCoefficient | Indicator::PoliticalEvents => {
                Dimension::HistoricalEpoch
            }
            Indicator::AverageIncome | Indicator::LiteracyRate => Dimension::SocialRange,
            Indicator::LifeExpectancy | Indicator::BirthRate => Dimension::AgeRange,
            Indicator::PopulationDensity | Indicator::UrbanizationRate => {
                Dimension::PopulationRange
            }
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    HistoricalEpoch,
    SocialRange,
    AgeRange,
    PopulationRange,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::HistoricalEpoch,
        Dimension::SocialRange,
        Dimension::AgeRange,
        Dimension::PopulationRange,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for indicator in Indicator::ALL {
            assert_eq!(Indicator::from_name(indicator.name()), Some(indicator));
        }
        assert_eq!(Indicator::from_name("unemployment"), None);
    }

    #[test]
    fn every_dimension_owns_its_indicators() {
        let sizes = Dimension::ALL.map(|dimension| {
            Indicator::ALL
                .iter()
                .filter(|indicator| indicator.dimension() == dimension)
                .count()
        });
        assert_eq!(sizes, [3, 2, 2, 2]);
    }

    #[test]
    fn domains_are_ordered() {
        for indicator in Indicator::ALL {
            let domain = indicator.domain();
            assert!(domain.min < domain.max, "{indicator} domain is inverted");
        }
    }
}
