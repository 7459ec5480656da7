use std::fmt;

use serde::{Deserialize, Serialize};

/// How often per year a deposit is made or interest is capitalised.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Annually,
    #[serde(alias = "semiAnnually", alias = "semi_annually")]
    SemiAnnually,
    Quarterly,
    #[default]
    Monthly,
    Weekly,
    Daily,
}

impl Frequency {
    /// Used whenever a label is not one of the known ones.
    pub const DEFAULT: Frequency = Frequency::Monthly;

    pub const ALL: [Frequency; 6] = [
        Frequency::Annually,
        Frequency::SemiAnnually,
        Frequency::Quarterly,
        Frequency::Monthly,
        Frequency::Weekly,
        Frequency::Daily,
    ];

    pub const fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Annually => 1,
            Frequency::SemiAnnually => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Weekly => 52,
            Frequency::Daily => 365,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Frequency::Annually => "annually",
            Frequency::SemiAnnually => "semi-annually",
            Frequency::Quarterly => "quarterly",
            Frequency::Monthly => "monthly",
            Frequency::Weekly => "weekly",
            Frequency::Daily => "daily",
        }
    }

    /// Exact label match; `None` for anything outside the enumeration.
    pub fn from_label(label: &str) -> Option<Frequency> {
        Frequency::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Periods per year for a frequency label. Unknown labels fall back to
/// [`Frequency::DEFAULT`] (monthly, 12) rather than failing.
pub fn resolve(label: &str) -> u32 {
    Frequency::from_label(label)
        .unwrap_or(Frequency::DEFAULT)
        .periods_per_year()
}
