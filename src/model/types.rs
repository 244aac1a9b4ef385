use std::fmt;
use std::str::FromStr;

/// The two status pages served by the Envoy.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Page {
    /// System overview: lifetime totals, inverter counts, device info
    Home,
    /// Energy production: current power and period totals
    Production,
}

impl Page {
    /// Path of the page relative to the Envoy host.
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/home",
            Page::Production => "/production",
        }
    }

    /// Keys this page is responsible for.
    pub fn keys(&self) -> impl Iterator<Item = MetricKey> + '_ {
        MetricKey::ALL.iter().copied().filter(move |key| key.page() == *self)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Page::Home => write!(f, "home"),
            Page::Production => write!(f, "production"),
        }
    }
}

/// Semantic fields scraped from the Envoy pages.
///
/// The set is closed: each key is produced by exactly one [`Page`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum MetricKey {
    CurrentPower,
    CurrentPowerProduction,
    TodayEnergy,
    WeekEnergy,
    LifetimeEnergy,
    LifetimeEnergyProduction,
    InvertersOnline,
    InvertersTotal,
    SoftwareVersion,
    DatabaseSize,
    IpAddress,
    MicroinvertersStatus,
    WebStatus,
    SystemLiveSince,
}

impl MetricKey {
    pub const ALL: [MetricKey; 14] = [
        MetricKey::CurrentPower,
        MetricKey::CurrentPowerProduction,
        MetricKey::TodayEnergy,
        MetricKey::WeekEnergy,
        MetricKey::LifetimeEnergy,
        MetricKey::LifetimeEnergyProduction,
        MetricKey::InvertersOnline,
        MetricKey::InvertersTotal,
        MetricKey::SoftwareVersion,
        MetricKey::DatabaseSize,
        MetricKey::IpAddress,
        MetricKey::MicroinvertersStatus,
        MetricKey::WebStatus,
        MetricKey::SystemLiveSince,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::CurrentPower => "current_power",
            MetricKey::CurrentPowerProduction => "current_power_production",
            MetricKey::TodayEnergy => "today_energy",
            MetricKey::WeekEnergy => "week_energy",
            MetricKey::LifetimeEnergy => "lifetime_energy",
            MetricKey::LifetimeEnergyProduction => "lifetime_energy_production",
            MetricKey::InvertersOnline => "inverters_online",
            MetricKey::InvertersTotal => "inverters_total",
            MetricKey::SoftwareVersion => "software_version",
            MetricKey::DatabaseSize => "database_size",
            MetricKey::IpAddress => "ip_address",
            MetricKey::MicroinvertersStatus => "microinverters_status",
            MetricKey::WebStatus => "web_status",
            MetricKey::SystemLiveSince => "system_live_since",
        }
    }

    /// The page whose extractor produces this key.
    pub fn page(&self) -> Page {
        match self {
            MetricKey::CurrentPower
            | MetricKey::LifetimeEnergy
            | MetricKey::InvertersOnline
            | MetricKey::InvertersTotal
            | MetricKey::SoftwareVersion
            | MetricKey::DatabaseSize
            | MetricKey::IpAddress
            | MetricKey::MicroinvertersStatus
            | MetricKey::WebStatus => Page::Home,
            MetricKey::CurrentPowerProduction
            | MetricKey::TodayEnergy
            | MetricKey::WeekEnergy
            | MetricKey::LifetimeEnergyProduction
            | MetricKey::SystemLiveSince => Page::Production,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown metric key '{}'", s))
    }
}

/// Online/offline marker derived from the page's status elements.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Status {
    Online,
    Offline,
}

impl Status {
    pub fn from_online(online: bool) -> Self {
        if online {
            Status::Online
        } else {
            Status::Offline
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Online => write!(f, "online"),
            Status::Offline => write!(f, "offline"),
        }
    }
}

/// A scraped value.
///
/// `Absent` means the field was not found or did not parse; it is never
/// conflated with zero or an empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetricValue {
    Float(f64),
    Int(i64),
    Text(String),
    Status(Status),
    #[default]
    Absent,
}

impl MetricValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, MetricValue::Absent)
    }

    #[cfg(test)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Float(v) => Some(*v),
            MetricValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetricValue::Float(v) => write!(f, "{}", v),
            MetricValue::Int(v) => write!(f, "{}", v),
            MetricValue::Text(v) => f.write_str(v),
            MetricValue::Status(v) => write!(f, "{}", v),
            MetricValue::Absent => write!(f, "unknown"),
        }
    }
}

/// Units attached to published sensor values.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Unit {
    /// Watts (W) - for instantaneous power
    Watt,
    /// Watt-hours (Wh) - for accumulated energy
    WattHour,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unit::Watt => write!(f, "W"),
            Unit::WattHour => write!(f, "Wh"),
        }
    }
}
