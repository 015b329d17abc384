//! Traffic sign interpretation

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use alerting::{AlertClass, AlertClock, AlertRequest, MessageKey, SpeechParam, TimestampMs};

use crate::units::{mph_to_kph, Units};
use crate::AdasConfig;

/// Traffic sign types reported by the perception service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignType {
    /// Speed limit, number in mph
    SpeedLimit,
    Stop,
    RoundaboutWarning,
    RoundaboutRegulatory,
    Yield,
    GasStation,
    SchoolZone,
    PedestrianCrossing,
    SpeedBump,
    /// Any sign this crate has no policy for
    #[serde(other)]
    Other,
}

/// Which classifier score a policy gates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceField {
    Type,
    Number,
}

/// What a qualifying sign reading leads to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignPolicy {
    /// Replace the held limit when the number changes, then announce it
    SpeedLimit { threshold: f32 },
    /// Speak `key` through the debounce clock under `class`
    Announce {
        field: ConfidenceField,
        threshold: f32,
        class: AlertClass,
        key: MessageKey,
    },
}

impl SignPolicy {
    pub fn field(&self) -> ConfidenceField {
        match self {
            SignPolicy::SpeedLimit { .. } => ConfidenceField::Number,
            SignPolicy::Announce { field, .. } => *field,
        }
    }

    pub fn threshold(&self) -> f32 {
        match self {
            SignPolicy::SpeedLimit { threshold } | SignPolicy::Announce { threshold, .. } => {
                *threshold
            }
        }
    }
}

/// One classified sign detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignEvent {
    pub sign_type: SignType,
    /// Number printed on the sign, if any
    #[serde(default)]
    pub number: Option<f32>,
    /// Confidence of the sign type
    pub type_confidence: f32,
    /// Confidence of the number
    #[serde(default)]
    pub number_confidence: f32,
}

impl SignEvent {
    pub fn confidence(&self, field: ConfidenceField) -> f32 {
        match field {
            ConfidenceField::Type => self.type_confidence,
            ConfidenceField::Number => self.number_confidence,
        }
    }
}

/// Currently posted speed limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimit {
    /// Limit in mph
    pub value: f32,
    /// Number confidence of the reading that set it
    pub confidence: f32,
    /// Sign type that set it
    pub detection: SignType,
}

impl SpeedLimit {
    /// Limit as whole mph
    pub fn whole_mph(&self) -> u32 {
        self.value as u32
    }
}

/// Result of interpreting one batch of sign events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignReport {
    /// The held speed limit was replaced
    pub limit_changed: bool,
    /// Audible alerts that passed the debounce clock, in arrival order
    pub alerts: Vec<AlertRequest>,
}

/// Turns classified sign readings into speed limit updates and alerts
pub struct SignInterpreter {
    config: AdasConfig,
}

impl SignInterpreter {
    pub fn new(config: &AdasConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Policy for a sign type. Informational signs have none.
    pub fn policy(&self, sign_type: SignType) -> Option<SignPolicy> {
        let announce = |threshold, class, key| SignPolicy::Announce {
            field: ConfidenceField::Type,
            threshold,
            class,
            key,
        };

        match sign_type {
            SignType::SpeedLimit => Some(SignPolicy::SpeedLimit {
                threshold: self.config.speed_limit_confidence,
            }),
            SignType::Stop => Some(announce(
                self.config.stop_confidence,
                AlertClass::StopSign,
                MessageKey::Stop,
            )),
            SignType::RoundaboutWarning => Some(announce(
                self.config.roundabout_warning_confidence,
                AlertClass::RoundaboutWarning,
                MessageKey::Rotary,
            )),
            SignType::RoundaboutRegulatory => Some(announce(
                self.config.roundabout_regulatory_confidence,
                AlertClass::RoundaboutRegulatory,
                MessageKey::Rotary,
            )),
            SignType::SpeedBump => Some(announce(
                self.config.speed_bump_confidence,
                AlertClass::SpeedBump,
                MessageKey::Bump,
            )),
            SignType::Yield
            | SignType::GasStation
            | SignType::SchoolZone
            | SignType::PedestrianCrossing
            | SignType::Other => None,
        }
    }

    /// Interpret a batch of sign events in arrival order.
    ///
    /// Conflicting speed limit readings in one batch resolve to the last one.
    pub fn interpret(
        &self,
        batch: &[SignEvent],
        held: &mut Option<SpeedLimit>,
        clock: &mut AlertClock,
        units: Units,
        now: TimestampMs,
    ) -> SignReport {
        let mut report = SignReport::default();

        for event in batch {
            let Some(policy) = self.policy(event.sign_type) else {
                debug!("Informational sign {:?}", event.sign_type);
                continue;
            };

            let confidence = event.confidence(policy.field());
            if confidence < policy.threshold() {
                debug!(
                    "Sign {:?} discarded: confidence {} < {}",
                    event.sign_type,
                    confidence,
                    policy.threshold()
                );
                continue;
            }

            match policy {
                SignPolicy::SpeedLimit { .. } => {
                    let Some(number) = event.number else {
                        debug!("Speed limit sign without a number");
                        continue;
                    };
                    if held.is_some_and(|limit| limit.value == number) {
                        continue;
                    }

                    info!("Speed limit changed to {} mph", number);
                    *held = Some(SpeedLimit {
                        value: number,
                        confidence,
                        detection: event.sign_type,
                    });
                    report.limit_changed = true;

                    if clock.try_fire(AlertClass::SpeedLimitAnnounce, now) {
                        report.alerts.push(limit_announcement(number, units));
                    }
                }
                SignPolicy::Announce { class, key, .. } => {
                    if clock.try_fire(class, now) {
                        report.alerts.push(AlertRequest::simple(class, key));
                    }
                }
            }
        }

        report
    }
}

/// Spoken speed limit in the preferred units
pub fn limit_announcement(limit_mph: f32, units: Units) -> AlertRequest {
    let mph = SpeechParam::Number(limit_mph as u32);
    let kph = SpeechParam::Number(mph_to_kph(limit_mph) as u32);

    let params = match units {
        Units::Both => vec![
            mph,
            SpeechParam::Key(MessageKey::Both),
            kph,
            SpeechParam::Key(MessageKey::Metric),
        ],
        Units::Imperial => vec![mph, SpeechParam::Key(MessageKey::Imperial)],
        Units::Metric => vec![kph, SpeechParam::Key(MessageKey::Metric)],
    };

    AlertRequest {
        class: AlertClass::SpeedLimitAnnounce,
        key: MessageKey::Limit,
        params,
    }
}
