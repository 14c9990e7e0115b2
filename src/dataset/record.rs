use serde::{Deserialize, Serialize};

/// Divisor applied to raw population counts at load time.
pub const POPULATION_UNIT: f64 = 1_000_000.0;

/// One country/year observation.
///
/// `population` is expressed in millions. Fertility and life expectancy were
/// present in the source row; they may still be `NaN` when the source value
/// was not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    pub year: String,
    pub fertility: f64,
    pub life_expectancy: f64,
    pub population: f64,
}

impl CountryRecord {
    /// Builds a record from a population already expressed in millions.
    #[must_use]
    pub fn new(
        country: impl Into<String>,
        year: impl Into<String>,
        fertility: f64,
        life_expectancy: f64,
        population_millions: f64,
    ) -> Self {
        Self {
            country: country.into(),
            year: year.into(),
            fertility,
            life_expectancy,
            population: population_millions,
        }
    }

    /// Builds a record from a raw head count, rescaling it to millions.
    #[must_use]
    pub fn from_raw_population(
        country: impl Into<String>,
        year: impl Into<String>,
        fertility: f64,
        life_expectancy: f64,
        raw_population: f64,
    ) -> Self {
        Self::new(
            country,
            year,
            fertility,
            life_expectancy,
            raw_population / POPULATION_UNIT,
        )
    }

    /// Numeric year, `NaN` when the label is not a number.
    #[must_use]
    pub fn year_value(&self) -> f64 {
        self.year.trim().parse().unwrap_or(f64::NAN)
    }
}

/// Numeric column a chart axis reads from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordField {
    Year,
    Fertility,
    LifeExpectancy,
    Population,
}

impl RecordField {
    #[must_use]
    pub fn value(self, record: &CountryRecord) -> f64 {
        match self {
            Self::Year => record.year_value(),
            Self::Fertility => record.fertility,
            Self::LifeExpectancy => record.life_expectancy,
            Self::Population => record.population,
        }
    }

    /// Column name in the source table.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Fertility => "fertility",
            Self::LifeExpectancy => "life_expectancy",
            Self::Population => "population",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryRecord, RecordField};

    #[test]
    fn raw_population_is_rescaled_to_millions() {
        let record = CountryRecord::from_raw_population("A", "1980", 2.0, 70.0, 2_500_000.0);
        assert_eq!(record.population, 2.5);
    }

    #[test]
    fn non_numeric_year_reads_as_nan() {
        let record = CountryRecord::new("A", "n/a", 2.0, 70.0, 1.0);
        assert!(RecordField::Year.value(&record).is_nan());
        assert_eq!(RecordField::LifeExpectancy.value(&record), 70.0);
    }
}
