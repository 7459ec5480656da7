use super::error::ProjectionError;
use super::types::{Projection, ProjectionInput, ProjectionResult, ProjectionSample};

// Upfront reservation cap; longer horizons grow the vector as they go.
const PREALLOCATED_SAMPLES_LIMIT: usize = 1 << 16;

/// Compounding has to happen at least as often as deposits.
///
/// Zero frequencies are degenerate rather than unsupported: a zero deposit
/// frequency has no periods and a zero compound frequency never compounds.
pub fn check_frequency_pair(
    deposit_frequency: u32,
    compound_frequency: u32,
) -> Result<(), ProjectionError> {
    if compound_frequency != 0 && compound_frequency < deposit_frequency {
        return Err(ProjectionError::UnsupportedFrequencyPair {
            deposit: deposit_frequency,
            compound: compound_frequency,
        });
    }
    Ok(())
}

/// Compounding boundaries inside deposit period `period` (1-based).
///
/// Boundaries sit at `k / compound_frequency` years and deposits at
/// `period / deposit_frequency` years on the same timeline. A period owns the
/// boundaries after the previous deposit up to and including its own, so a
/// full year always compounds exactly `compound_frequency` times even when the
/// two frequencies do not divide evenly.
fn compounding_steps_in_period(
    period: u64,
    deposit_frequency: u32,
    compound_frequency: u32,
) -> u64 {
    let through =
        |p: u64| u128::from(p) * u128::from(compound_frequency) / u128::from(deposit_frequency);
    u64::try_from(through(period) - through(period - 1)).unwrap_or(u64::MAX)
}

/// Simulates the balance period by period.
///
/// Each deposit period first applies the compounding that falls inside it,
/// then receives the regular deposit, then emits a sample. Numeric inputs are
/// taken as given: NaN or infinite values flow through to the output instead
/// of being rejected.
pub fn project(input: &ProjectionInput) -> Result<Projection, ProjectionError> {
    check_frequency_pair(input.deposit_frequency, input.compound_frequency)?;
    let periods_per_year = f64::from(input.deposit_frequency);
    let total_periods = input.total_deposit_periods();
    let growth = 1.0 + input.rate_per_compound_period();

    let capacity = usize::try_from(total_periods)
        .unwrap_or(usize::MAX)
        .min(PREALLOCATED_SAMPLES_LIMIT)
        + 1;
    let mut samples = Vec::with_capacity(capacity);
    let mut balance = input.initial_deposit;
    samples.push(ProjectionSample {
        time_years: 0.0,
        balance,
    });

    for period in 1..=total_periods {
        let steps =
            compounding_steps_in_period(period, input.deposit_frequency, input.compound_frequency);
        for _ in 0..steps {
            balance *= growth;
        }
        balance += input.regular_deposit;
        samples.push(ProjectionSample {
            time_years: period as f64 / periods_per_year,
            balance,
        });
    }

    let total_contributions = input.total_contributions();
    Ok(Projection {
        samples,
        result: ProjectionResult {
            final_balance: balance,
            total_contributions,
            total_interest: balance - total_contributions,
        },
    })
}
