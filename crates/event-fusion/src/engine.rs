//! Frame processing

use std::time::Duration;
use tracing::{debug, info, warn};

use adas::{AdasConfig, SignInterpreter, SpeedMonitor, SpeedSample, VisualRequest};
use alerting::{MessageKey, RefreshGate, TimestampMs};
use poi::{Destination, GeoCoordinate, PoiConfig, VisibilityFilter, WorldProjector};

use crate::{FrameEvent, Frame, FusionConfig, OutboundAction, SessionState};

/// Driver-alert decision engine
pub struct DriveAssist<P> {
    state: SessionState,
    interpreter: SignInterpreter,
    monitor: SpeedMonitor,
    filter: VisibilityFilter,
    places_gate: RefreshGate,
    adas_config: AdasConfig,
    poi_config: PoiConfig,
    projector: P,
}

impl<P: WorldProjector> DriveAssist<P> {
    /// Create an engine with a fresh session
    pub fn new(config: FusionConfig, projector: P) -> Self {
        let state = SessionState::new(config.alerting.clone(), config.units);
        Self::with_state(config, projector, state)
    }

    /// Create an engine around an existing session
    pub fn with_state(config: FusionConfig, projector: P, state: SessionState) -> Self {
        info!("Creating drive assist engine, units {:?}", state.units);
        Self {
            interpreter: SignInterpreter::new(&config.adas),
            monitor: SpeedMonitor::new(&config.adas),
            filter: VisibilityFilter::new(&config.poi),
            places_gate: RefreshGate::new(Duration::from_millis(config.poi.refresh_interval_ms)),
            adas_config: config.adas,
            poi_config: config.poi,
            state,
            projector,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    /// Process one frame and return the side effects to perform, in order
    pub fn process_frame(&mut self, frame: Frame) -> Vec<OutboundAction> {
        let now = frame.timestamp_ms;
        let mut actions = Vec::new();

        match frame.event {
            FrameEvent::CameraUpdated { calibrated } => {
                if calibrated != self.state.calibrated {
                    info!("Camera calibrated: {}", calibrated);
                }
                self.state.calibrated = calibrated;
            }
            FrameEvent::VehicleState {
                speed_mps,
                location,
            } => self.on_vehicle_state(speed_mps, location, now, &mut actions),
            FrameEvent::SignsClassified { signs } => {
                let report = self.interpreter.interpret(
                    &signs,
                    &mut self.state.speed_limit,
                    &mut self.state.clock,
                    self.state.units,
                    now,
                );
                actions.extend(report.alerts.into_iter().map(OutboundAction::Speak));

                if report.limit_changed {
                    let positive = self.state.speed_limit.is_some_and(|l| l.whole_mph() > 0);
                    if positive && !self.state.limit_shown {
                        self.state.limit_shown = true;
                        actions.push(OutboundAction::Visual(VisualRequest::SpeedLimitVisible));
                    }
                    self.update_speed(now, &mut actions);
                }
            }
            FrameEvent::CollisionsUpdated { objects } => {
                self.state.collisions.replace(objects, &self.adas_config)
            }
            FrameEvent::FrameCompleted => {
                self.update_speed(now, &mut actions);
                if let Some(stationary) = self.state.telemetry.is_stationary() {
                    actions.push(OutboundAction::Visual(VisualRequest::VehicleStationary {
                        stationary,
                    }));
                }
                actions.push(OutboundAction::Visual(VisualRequest::SlowDownIndicator {
                    active: self.state.collisions.critical_active(),
                }));
            }
            FrameEvent::PlacesFound { places } => {
                let held = self
                    .state
                    .pois
                    .replace_places(places, &self.poi_config.categories);
                debug!("Holding {} nearby places", held);
            }
            FrameEvent::PlacesSearchFailed { reason } => {
                warn!("Place search failed, keeping previous places: {}", reason);
            }
            FrameEvent::DestinationResolved { destination } => self.on_destination(destination),
            FrameEvent::DestinationNotFound => {
                info!("Destination not found");
                self.state.pois.clear_destination();
                actions.push(OutboundAction::DestinationUnresolved {
                    title: MessageKey::Try,
                    address: MessageKey::Understand,
                });
            }
            FrameEvent::UnitsChanged { units } => {
                info!("Units changed to {:?}", units);
                self.state.units = units;
            }
        }

        actions
    }

    fn on_vehicle_state(
        &mut self,
        speed_mps: f32,
        location: Option<GeoCoordinate>,
        now: TimestampMs,
        actions: &mut Vec<OutboundAction>,
    ) {
        let sample = match SpeedSample::new(speed_mps, now) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Dropping vehicle state: {}", e);
                return;
            }
        };
        if let Err(e) = self.state.telemetry.update(sample) {
            warn!("Dropping vehicle state: {}", e);
            return;
        }

        match location.map(|l| (l, l.validate())) {
            Some((l, Ok(()))) => {
                self.state.location = Some(l);
                self.projector.vehicle_moved(l);
            }
            Some((_, Err(e))) => warn!("Ignoring vehicle location: {}", e),
            None => {}
        }

        if let Some(near) = self.state.location {
            if self.places_gate.try_acquire(now) {
                actions.push(OutboundAction::RefreshPlaces {
                    near,
                    radius_m: self.poi_config.search_radius_m,
                    limit: self.poi_config.search_limit,
                    categories: self.poi_config.categories.clone(),
                });
            }
        }

        let pois = self.filter.visible(
            self.state.calibrated,
            self.state.pois.candidates(),
            &self.projector,
        );
        actions.push(OutboundAction::ShowPointsOfInterest { pois });
    }

    fn on_destination(&mut self, destination: Destination) {
        if let Err(e) = destination.coordinate.validate() {
            warn!("Ignoring destination {}: {}", destination.name, e);
            return;
        }
        info!("Destination set: {}", destination.name);
        self.state.pois.set_destination(destination);
    }

    /// Shared by completed frames and speed limit changes
    fn update_speed(&mut self, now: TimestampMs, actions: &mut Vec<OutboundAction>) {
        let Some(speed) = self.state.telemetry.speed_mps() else {
            return;
        };
        let Some(report) = self.monitor.evaluate(
            speed,
            self.state.speed_limit.as_ref(),
            self.state.units,
            &mut self.state.clock,
            now,
        ) else {
            return;
        };

        actions.extend(
            VisualRequest::from_assessment(&report.assessment)
                .into_iter()
                .map(OutboundAction::Visual),
        );
        actions.extend(report.alert.map(OutboundAction::Speak));
    }
}
