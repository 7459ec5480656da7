use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    pub initial_deposit: f64,
    /// Added at the end of every deposit period. Negative values are accepted
    /// but are not modelled as withdrawals in any special way.
    pub regular_deposit: f64,
    pub years: u32,
    /// Nominal annual rate in percent, so `5.0` is 5%.
    pub annual_interest_rate_percent: f64,
    pub deposit_frequency: u32,
    pub compound_frequency: u32,
}

impl ProjectionInput {
    pub fn total_deposit_periods(&self) -> u64 {
        u64::from(self.years) * u64::from(self.deposit_frequency)
    }

    pub fn rate_per_compound_period(&self) -> f64 {
        (self.annual_interest_rate_percent / 100.0) / f64::from(self.compound_frequency)
    }

    pub fn total_contributions(&self) -> f64 {
        self.initial_deposit
            + self.regular_deposit * f64::from(self.years) * f64::from(self.deposit_frequency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSample {
    pub time_years: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub samples: Vec<ProjectionSample>,
    pub result: ProjectionResult,
}
