//! Label tables mapping row labels to metric keys.
//!
//! Rules are evaluated in order and the first match wins. Overlapping labels
//! ("Number of Microinverters Online" vs "Number of Microinverters") rely on
//! that order, so a new label variant gets its own row here.

use crate::envoy::helper::{parse_energy, parse_int, parse_power};
use crate::error::ParseError;
use crate::model::{MetricKey, MetricValue};

/// How a row label is compared against a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelMatch {
    /// Label contains the substring
    Contains(&'static str),
    /// Label contains the first substring and not the second
    ContainsExcluding(&'static str, &'static str),
    /// Label equals the string exactly
    Exact(&'static str),
}

impl LabelMatch {
    pub fn matches(&self, label: &str) -> bool {
        match self {
            LabelMatch::Contains(needle) => label.contains(*needle),
            LabelMatch::ContainsExcluding(needle, excluded) => {
                label.contains(*needle) && !label.contains(*excluded)
            }
            LabelMatch::Exact(expected) => label == *expected,
        }
    }
}

/// Normalization applied to the raw value cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueParser {
    /// Watts, from a W/kW token
    Power,
    /// Watt-hours, from a Wh/kWh/MWh token
    Energy,
    /// Plain integer count
    Int,
    /// Kept verbatim
    Text,
}

impl ValueParser {
    pub fn parse(&self, raw: &str) -> Result<MetricValue, ParseError> {
        match self {
            ValueParser::Power => parse_power(raw).map(MetricValue::Float),
            ValueParser::Energy => parse_energy(raw).map(MetricValue::Float),
            ValueParser::Int => parse_int(raw).map(MetricValue::Int),
            ValueParser::Text => Ok(MetricValue::Text(raw.to_string())),
        }
    }

    /// Parses `raw`, degrading to Absent on failure.
    pub fn value_for(&self, key: MetricKey, raw: &str) -> MetricValue {
        match self.parse(raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(key = %key, raw = raw, error = %err, "Could not parse value");
                MetricValue::Absent
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRule {
    pub matcher: LabelMatch,
    pub key: MetricKey,
    pub parser: ValueParser,
}

const fn rule(matcher: LabelMatch, key: MetricKey, parser: ValueParser) -> LabelRule {
    LabelRule {
        matcher,
        key,
        parser,
    }
}

/// Rows of the `/home` system overview table.
pub const HOME_RULES: &[LabelRule] = &[
    rule(
        LabelMatch::Contains("Lifetime generation"),
        MetricKey::LifetimeEnergy,
        ValueParser::Energy,
    ),
    rule(
        LabelMatch::Contains("Currently generating"),
        MetricKey::CurrentPower,
        ValueParser::Power,
    ),
    rule(
        LabelMatch::Contains("Number of Microinverters Online"),
        MetricKey::InvertersOnline,
        ValueParser::Int,
    ),
    rule(
        LabelMatch::ContainsExcluding("Number of Microinverters", "Online"),
        MetricKey::InvertersTotal,
        ValueParser::Int,
    ),
    rule(
        LabelMatch::Contains("Current Software Version"),
        MetricKey::SoftwareVersion,
        ValueParser::Text,
    ),
    rule(
        LabelMatch::Contains("Database Size"),
        MetricKey::DatabaseSize,
        ValueParser::Text,
    ),
    rule(
        LabelMatch::Contains("Envoy IP Address"),
        MetricKey::IpAddress,
        ValueParser::Text,
    ),
];

/// Rows of the `/production` energy table.
pub const PRODUCTION_RULES: &[LabelRule] = &[
    rule(
        LabelMatch::Exact("Currently"),
        MetricKey::CurrentPowerProduction,
        ValueParser::Power,
    ),
    rule(
        LabelMatch::Exact("Today"),
        MetricKey::TodayEnergy,
        ValueParser::Energy,
    ),
    rule(
        LabelMatch::Exact("Past Week"),
        MetricKey::WeekEnergy,
        ValueParser::Energy,
    ),
    rule(
        LabelMatch::Exact("Since Installation"),
        MetricKey::LifetimeEnergyProduction,
        ValueParser::Energy,
    ),
];

/// First rule in `rules` whose matcher accepts `label`.
pub fn find_rule<'a>(rules: &'a [LabelRule], label: &str) -> Option<&'a LabelRule> {
    rules.iter().find(|rule| rule.matcher.matches(label))
}
