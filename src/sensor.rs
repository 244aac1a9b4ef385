//! Sensor descriptions and the publisher that reports every new snapshot.

use std::fmt;
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;

use crate::envoy::{Coordinator, SnapshotReceiver};
use crate::model::{MetricKey, MetricValue, Unit};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeviceClass {
    Power,
    Energy,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Power => "power",
            DeviceClass::Energy => "energy",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StateClass {
    Measurement,
    TotalIncreasing,
}

impl StateClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateClass::Measurement => "measurement",
            StateClass::TotalIncreasing => "total_increasing",
        }
    }
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata for one published metric.
#[derive(Debug, Clone, Copy)]
pub struct SensorDescription {
    pub key: MetricKey,
    pub name: &'static str,
    pub unit: Option<Unit>,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
}

const fn power(key: MetricKey, name: &'static str) -> SensorDescription {
    SensorDescription {
        key,
        name,
        unit: Some(Unit::Watt),
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
    }
}

const fn energy(key: MetricKey, name: &'static str) -> SensorDescription {
    SensorDescription {
        key,
        name,
        unit: Some(Unit::WattHour),
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
    }
}

const fn info(key: MetricKey, name: &'static str) -> SensorDescription {
    SensorDescription {
        key,
        name,
        unit: None,
        device_class: None,
        state_class: None,
    }
}

pub const SENSOR_DESCRIPTIONS: [SensorDescription; 14] = [
    power(MetricKey::CurrentPower, "Current Power"),
    power(MetricKey::CurrentPowerProduction, "Current Power Production"),
    energy(MetricKey::TodayEnergy, "Today Energy"),
    energy(MetricKey::WeekEnergy, "Week Energy"),
    energy(MetricKey::LifetimeEnergy, "Lifetime Energy"),
    energy(MetricKey::LifetimeEnergyProduction, "Lifetime Energy Production"),
    info(MetricKey::InvertersOnline, "Inverters Online"),
    info(MetricKey::InvertersTotal, "Inverters Total"),
    info(MetricKey::SoftwareVersion, "Software Version"),
    info(MetricKey::DatabaseSize, "Database Size"),
    info(MetricKey::IpAddress, "IP Address"),
    info(MetricKey::MicroinvertersStatus, "Microinverters Status"),
    info(MetricKey::WebStatus, "Web Status"),
    info(MetricKey::SystemLiveSince, "System Live Since"),
];

/// One metric bound to a specific Envoy host.
#[derive(Debug, Clone)]
pub struct EnvoySensor {
    pub description: SensorDescription,
    pub name: String,
    pub unique_id: String,
}

impl EnvoySensor {
    pub fn new(host: &str, description: SensorDescription) -> Self {
        Self {
            description,
            name: format!("Enphase Envoy {}", description.name),
            unique_id: format!("{}_{}", host, description.key),
        }
    }

    pub fn key(&self) -> MetricKey {
        self.description.key
    }

    /// Current value as held by the coordinator.
    pub fn native_value(&self, coordinator: &Coordinator) -> MetricValue {
        coordinator.get(self.key())
    }
}

pub fn envoy_sensors(host: &str) -> Vec<EnvoySensor> {
    SENSOR_DESCRIPTIONS
        .iter()
        .map(|description| EnvoySensor::new(host, *description))
        .collect()
}

/// Logs every sensor's current value and returns how many were known.
pub fn publish_sensors(sensors: &[EnvoySensor], coordinator: &Coordinator) -> usize {
    let mut known = 0;
    for sensor in sensors {
        let value = sensor.native_value(coordinator);
        if !value.is_absent() {
            known += 1;
        }
        let description = &sensor.description;
        let unit = description
            .unit
            .map(|unit| unit.to_string())
            .unwrap_or_default();
        tracing::info!(
            sensor = %sensor.unique_id,
            value = %value,
            unit = %unit,
            device_class = description.device_class.map(|class| class.as_str()),
            state_class = description.state_class.map(|class| class.as_str()),
            "{}",
            sensor.name
        );
    }
    known
}

/// Spawns the publisher for `coordinator`. The task ends once the
/// coordinator is dropped.
pub fn spawn_publisher(
    coordinator: &Arc<Coordinator>,
    sensors: Vec<EnvoySensor>,
) -> JoinHandle<()> {
    let receiver = coordinator.subscribe();
    tokio::spawn(run_publisher(Arc::downgrade(coordinator), receiver, sensors))
}

async fn run_publisher(
    coordinator: Weak<Coordinator>,
    mut receiver: SnapshotReceiver,
    sensors: Vec<EnvoySensor>,
) {
    while receiver.changed().await.is_ok() {
        receiver.borrow_and_update();
        let Some(coordinator) = coordinator.upgrade() else {
            break;
        };
        if let Some(snapshot) = coordinator.latest() {
            tracing::debug!(
                collected_at = %snapshot.collected_at().format("%Y-%m-%d %H:%M:%S"),
                "Publishing snapshot"
            );
            let known = publish_sensors(&sensors, &coordinator);
            tracing::debug!(known, total = sensors.len(), "Published sensors");
        }
    }
    tracing::debug!("Snapshot channel closed, publisher stopping.");
}
