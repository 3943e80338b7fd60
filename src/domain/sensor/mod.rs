//! IoT sensor event logging.
//!
//! A reading (temperature, humidity) is classified into an event type, scaled
//! to a signed fixed-point value with six decimals, and logged with
//! `logSensorEvent`. The service charges the sensor's client a fixed number of
//! credits per event type.
//!
//! Logging is a plain transaction: the wallet signs the transaction itself and
//! no payment is attached.

pub mod abi;
pub mod client;

use alloy_primitives::{b256, B256, I256, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};
use crate::shared::canonical::join_message;
use crate::shared::{now_unix_seconds, require_non_empty, scale_signed_floor, CanonicalField};
use abi::ISensorService;

/// Decimal places of the logged value.
pub const VALUE_DECIMALS: u32 = 6;

/// Batch hash used when readings are logged one at a time.
pub const DEFAULT_BATCH_HASH: B256 =
    b256!("0000000000000000000000000000000000000000000000000000000000000001");

pub const LOG_SENSOR_EVENT_FUNCTION: &str = "logSensorEvent";

// ─── Event types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum SensorEventType {
    Normal = 0,
    TempHigh = 1,
    TempLow = 2,
    HumidityHigh = 3,
    HumidityLow = 4,
    DoorOpen = 5,
    PowerFailure = 6,
    SensorError = 7,
}

impl SensorEventType {
    pub const ALL: [SensorEventType; 8] = [
        SensorEventType::Normal,
        SensorEventType::TempHigh,
        SensorEventType::TempLow,
        SensorEventType::HumidityHigh,
        SensorEventType::HumidityLow,
        SensorEventType::DoorOpen,
        SensorEventType::PowerFailure,
        SensorEventType::SensorError,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Credits charged per logged event.
    pub fn cost(&self) -> u64 {
        match self {
            SensorEventType::Normal => 0,
            SensorEventType::DoorOpen => 2,
            SensorEventType::PowerFailure => 5,
            _ => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorEventType::Normal => "NORMAL",
            SensorEventType::TempHigh => "TEMP_HIGH",
            SensorEventType::TempLow => "TEMP_LOW",
            SensorEventType::HumidityHigh => "HUMIDITY_HIGH",
            SensorEventType::HumidityLow => "HUMIDITY_LOW",
            SensorEventType::DoorOpen => "DOOR_OPEN",
            SensorEventType::PowerFailure => "POWER_FAILURE",
            SensorEventType::SensorError => "SENSOR_ERROR",
        }
    }

    /// Temperature thresholds win over humidity; bounds are exclusive.
    ///
    /// | Condition | Event |
    /// |-----------|-------|
    /// | temp > 10 | `TEMP_HIGH` |
    /// | temp < -10 | `TEMP_LOW` |
    /// | humidity > 80 | `HUMIDITY_HIGH` |
    /// | humidity < 30 | `HUMIDITY_LOW` |
    /// | otherwise | `NORMAL` |
    pub fn classify(temperature: Decimal, humidity: Decimal) -> Self {
        if temperature > Decimal::from(10) {
            SensorEventType::TempHigh
        } else if temperature < Decimal::from(-10) {
            SensorEventType::TempLow
        } else if humidity > Decimal::from(80) {
            SensorEventType::HumidityHigh
        } else if humidity < Decimal::from(30) {
            SensorEventType::HumidityLow
        } else {
            SensorEventType::Normal
        }
    }
}

impl TryFrom<u8> for SensorEventType {
    type Error = SdkError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
            .ok_or_else(|| SdkError::Validation(format!("unknown sensor event type {}", code)))
    }
}

impl std::fmt::Display for SensorEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Reading → event ─────────────────────────────────────────────────────────

/// A raw reading as the sensor reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_username: String,
    /// Degrees Celsius.
    pub temperature: Decimal,
    /// Relative humidity, percent.
    pub humidity: Decimal,
    /// Unix seconds; `None` means now.
    #[serde(default)]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub batch_hash: Option<B256>,
    /// Overrides classification, e.g. for door or power events.
    #[serde(default)]
    pub event_type: Option<SensorEventType>,
}

impl SensorReading {
    pub fn new(sensor_username: impl Into<String>, temperature: Decimal, humidity: Decimal) -> Self {
        Self {
            sensor_username: sensor_username.into(),
            temperature,
            humidity,
            timestamp: None,
            batch_hash: None,
            event_type: None,
        }
    }

    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn in_batch(mut self, batch_hash: B256) -> Self {
        self.batch_hash = Some(batch_hash);
        self
    }

    pub fn with_event_type(mut self, event_type: SensorEventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn event_type(&self) -> SensorEventType {
        self.event_type
            .unwrap_or_else(|| SensorEventType::classify(self.temperature, self.humidity))
    }

    /// Resolve defaults and scale the temperature to `floor(t × 10^6)`.
    pub fn to_event(&self) -> SdkResult<SensorEvent> {
        require_non_empty("sensor username", &self.sensor_username)?;
        Ok(SensorEvent {
            sensor_username: self.sensor_username.clone(),
            value: scale_signed_floor(self.temperature, VALUE_DECIMALS)?,
            timestamp: self.timestamp.unwrap_or_else(now_unix_seconds),
            event_type: self.event_type(),
            batch_hash: self.batch_hash.unwrap_or(DEFAULT_BATCH_HASH),
        })
    }
}

/// The exact arguments of one `logSensorEvent` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorEvent {
    pub sensor_username: String,
    pub value: I256,
    pub timestamp: u64,
    pub event_type: SensorEventType,
    pub batch_hash: B256,
}

impl SensorEvent {
    pub fn cost(&self) -> u64 {
        self.event_type.cost()
    }

    /// `"{evvmID},logSensorEvent,{sensor},{value},{timestamp},{eventType},{batchHash}"`
    pub fn canonical_message(&self, evvm_id: U256) -> String {
        join_message(
            evvm_id,
            LOG_SENSOR_EVENT_FUNCTION,
            &[
                self.sensor_username.canonical(),
                self.value.canonical(),
                self.timestamp.canonical(),
                self.event_type.code().canonical(),
                self.batch_hash.canonical(),
            ],
        )
    }

    pub fn to_call(&self) -> ISensorService::logSensorEventCall {
        ISensorService::logSensorEventCall {
            sensorUsername: self.sensor_username.clone(),
            value: self.value,
            timestamp: self.timestamp,
            eventType: self.event_type.code(),
            batchHash: self.batch_hash,
        }
    }
}
