// Named mount points on the dashboard page
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MountTarget {
    #[serde(rename = "mainChart")]
    MainChart,
    #[serde(rename = "pieChart")]
    PieChart,
    #[serde(rename = "comparisonChart")]
    ComparisonChart,
}

impl MountTarget {
    pub const ALL: [MountTarget; 3] = [
        MountTarget::MainChart,
        MountTarget::PieChart,
        MountTarget::ComparisonChart,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            MountTarget::MainChart => "mainChart",
            MountTarget::PieChart => "pieChart",
            MountTarget::ComparisonChart => "comparisonChart",
        }
    }
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MountTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MountTarget::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| format!("unknown mount target '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_ids() {
        for target in MountTarget::ALL {
            assert_eq!(target.id().parse::<MountTarget>(), Ok(target));
        }
        assert!("lineChart".parse::<MountTarget>().is_err());
    }
}
