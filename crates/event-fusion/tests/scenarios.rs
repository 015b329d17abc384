//! End-to-end driving scenarios through the fusion engine

use adas::{CollisionObject, DangerLevel, DisplayUnit, SignEvent, SignType, Units, VisualRequest};
use alerting::{AlertClass, MessageKey};
use event_fusion::{DriveAssist, Frame, FrameEvent, FusionConfig, OutboundAction};
use poi::{Destination, GeoCoordinate, Place, WorldCoordinate, WorldProjector, DESTINATION_GLYPH};

/// Projects a coordinate `lon * 10` meters straight ahead of the camera
struct LonAhead;

impl WorldProjector for LonAhead {
    fn geo_to_world(&self, coordinate: GeoCoordinate) -> Option<WorldCoordinate> {
        Some(WorldCoordinate {
            x: coordinate.lon * 10.0,
            y: 0.0,
            z: 0.0,
        })
    }
}

fn engine_with_units(units: Units) -> DriveAssist<LonAhead> {
    let config = FusionConfig {
        units,
        ..Default::default()
    };
    DriveAssist::new(config, LonAhead)
}

fn vehicle(speed_mps: f32) -> FrameEvent {
    FrameEvent::VehicleState {
        speed_mps,
        location: Some(GeoCoordinate { lon: 10.0, lat: 10.0 }),
    }
}

fn limit_sign(number: f32, number_confidence: f32) -> FrameEvent {
    FrameEvent::SignsClassified {
        signs: vec![SignEvent {
            sign_type: SignType::SpeedLimit,
            number: Some(number),
            type_confidence: 0.99,
            number_confidence,
        }],
    }
}

fn collisions(levels: &[DangerLevel]) -> FrameEvent {
    FrameEvent::CollisionsUpdated {
        objects: levels
            .iter()
            .map(|&danger| CollisionObject {
                danger: Some(danger),
                ttc_s: None,
                bbox: [0.1, 0.1, 0.2, 0.2],
                frame_id: 7,
            })
            .collect(),
    }
}

fn spoken(actions: &[OutboundAction]) -> Vec<AlertClass> {
    actions
        .iter()
        .filter_map(|a| match a {
            OutboundAction::Speak(req) => Some(req.class),
            _ => None,
        })
        .collect()
}

fn visuals(actions: &[OutboundAction]) -> Vec<VisualRequest> {
    actions
        .iter()
        .filter_map(|a| match a {
            OutboundAction::Visual(v) => Some(v.clone()),
            _ => None,
        })
        .collect()
}

fn slow_down_active(actions: &[OutboundAction]) -> Option<bool> {
    visuals(actions).into_iter().find_map(|v| match v {
        VisualRequest::SlowDownIndicator { active } => Some(active),
        _ => None,
    })
}

fn shown_pois(actions: &[OutboundAction]) -> Option<Vec<String>> {
    actions.iter().find_map(|a| match a {
        OutboundAction::ShowPointsOfInterest { pois } => {
            Some(pois.iter().map(|p| p.poi.label.clone()).collect())
        }
        _ => None,
    })
}

#[test]
fn seventy_in_a_fifty_five_warns_once() {
    let mut engine = engine_with_units(Units::Imperial);
    engine.process_frame(Frame::new(0, vehicle(31.3)));

    let actions = engine.process_frame(Frame::new(100, limit_sign(55.0, 0.95)));
    // Limit announcement, then the recomputed readout and overspeed warning
    assert_eq!(spoken(&actions), vec![AlertClass::SpeedLimitAnnounce, AlertClass::Overspeed]);

    let v = visuals(&actions);
    assert!(v.contains(&VisualRequest::SpeedLimitVisible));
    assert!(v.contains(&VisualRequest::SpeedReadout {
        speed: 70,
        limit: 55,
        unit: DisplayUnit::Mph,
    }));
    assert!(v.iter().any(|r| matches!(
        r,
        VisualRequest::OverspeedTint { intensity: Some(i) } if *i > 0.0
    )));

    // Next frame still over, but inside the overspeed window
    let actions = engine.process_frame(Frame::new(200, FrameEvent::FrameCompleted));
    assert!(spoken(&actions).is_empty());
    assert!(visuals(&actions).iter().any(|r| matches!(
        r,
        VisualRequest::OverspeedTint { intensity: Some(_) }
    )));

    // Window reopens after 4 s
    let actions = engine.process_frame(Frame::new(4_100, FrameEvent::FrameCompleted));
    assert_eq!(spoken(&actions), vec![AlertClass::Overspeed]);
}

#[test]
fn low_confidence_limit_changes_nothing() {
    let mut engine = engine_with_units(Units::Both);
    engine.process_frame(Frame::new(0, vehicle(31.3)));

    let actions = engine.process_frame(Frame::new(100, limit_sign(55.0, 0.85)));
    assert!(actions.is_empty());
    assert!(engine.state().speed_limit.is_none());

    // Monitor stays inert without a limit
    let actions = engine.process_frame(Frame::new(200, FrameEvent::FrameCompleted));
    assert!(spoken(&actions).is_empty());
    assert!(!visuals(&actions)
        .iter()
        .any(|v| matches!(v, VisualRequest::SpeedReadout { .. })));
}

#[test]
fn redetected_limit_is_not_reannounced() {
    let mut engine = engine_with_units(Units::Both);
    engine.process_frame(Frame::new(0, limit_sign(30.0, 0.95)));

    for t in [5_000, 10_000, 20_000] {
        let actions = engine.process_frame(Frame::new(t, limit_sign(30.0, 0.97)));
        assert!(actions.is_empty());
    }
    assert_eq!(engine.state().clock.fire_count(AlertClass::SpeedLimitAnnounce), 1);
}

#[test]
fn announcement_follows_units() {
    let mut engine = engine_with_units(Units::Both);
    let actions = engine.process_frame(Frame::new(0, limit_sign(55.0, 0.95)));
    let OutboundAction::Speak(req) = &actions[0] else {
        panic!("expected a spoken limit, got {:?}", actions);
    };
    assert_eq!(req.utterance(), "Limit 55 Both 88 Metric");

    engine.process_frame(Frame::new(1, FrameEvent::UnitsChanged { units: Units::Metric }));
    let actions = engine.process_frame(Frame::new(5_000, limit_sign(65.0, 0.95)));
    let OutboundAction::Speak(req) = &actions[0] else {
        panic!("expected a spoken limit, got {:?}", actions);
    };
    assert_eq!(req.key, MessageKey::Limit);
    assert_eq!(req.utterance(), "Limit 104 Metric");
}

#[test]
fn alert_classes_debounce_independently() {
    let mut engine = engine_with_units(Units::Both);
    engine.process_frame(Frame::new(0, vehicle(31.3)));

    let batch = FrameEvent::SignsClassified {
        signs: vec![
            SignEvent {
                sign_type: SignType::Stop,
                number: None,
                type_confidence: 0.995,
                number_confidence: 0.0,
            },
            SignEvent {
                sign_type: SignType::SpeedLimit,
                number: Some(55.0),
                type_confidence: 0.99,
                number_confidence: 0.95,
            },
        ],
    };
    let actions = engine.process_frame(Frame::new(0, batch));
    assert_eq!(
        spoken(&actions),
        vec![AlertClass::StopSign, AlertClass::SpeedLimitAnnounce, AlertClass::Overspeed]
    );
}

#[test]
fn collision_indicator_tracks_latest_frame() {
    let mut engine = engine_with_units(Units::Both);

    engine.process_frame(Frame::new(0, collisions(&[DangerLevel::Warning, DangerLevel::Critical])));
    let actions = engine.process_frame(Frame::new(1, FrameEvent::FrameCompleted));
    assert_eq!(slow_down_active(&actions), Some(true));

    engine.process_frame(Frame::new(2, collisions(&[DangerLevel::Warning])));
    let actions = engine.process_frame(Frame::new(3, FrameEvent::FrameCompleted));
    assert_eq!(slow_down_active(&actions), Some(false));

    engine.process_frame(Frame::new(4, collisions(&[DangerLevel::Critical])));
    engine.process_frame(Frame::new(5, collisions(&[])));
    let actions = engine.process_frame(Frame::new(6, FrameEvent::FrameCompleted));
    assert_eq!(slow_down_active(&actions), Some(false));
    assert!(engine.state().collisions.objects().is_empty());
}

#[test]
fn time_to_collision_drives_indicator() {
    let mut engine = engine_with_units(Units::Both);
    let timed = |ttc_s: f32| FrameEvent::CollisionsUpdated {
        objects: vec![CollisionObject {
            danger: None,
            ttc_s: Some(ttc_s),
            bbox: [0.3, 0.3, 0.1, 0.1],
            frame_id: 9,
        }],
    };

    engine.process_frame(Frame::new(0, timed(2.5)));
    let actions = engine.process_frame(Frame::new(1, FrameEvent::FrameCompleted));
    assert_eq!(slow_down_active(&actions), Some(true));
    assert_eq!(engine.state().collisions.overall(), DangerLevel::Critical);

    engine.process_frame(Frame::new(2, timed(10.0)));
    let actions = engine.process_frame(Frame::new(3, FrameEvent::FrameCompleted));
    assert_eq!(slow_down_active(&actions), Some(false));
    assert_eq!(engine.state().collisions.overall(), DangerLevel::Warning);
}

#[test]
fn stationary_vehicle_is_reported() {
    let mut engine = engine_with_units(Units::Both);
    engine.process_frame(Frame::new(0, vehicle(0.0)));
    let actions = engine.process_frame(Frame::new(1, FrameEvent::FrameCompleted));
    assert!(visuals(&actions).contains(&VisualRequest::VehicleStationary { stationary: true }));

    engine.process_frame(Frame::new(2, vehicle(12.0)));
    let actions = engine.process_frame(Frame::new(3, FrameEvent::FrameCompleted));
    assert!(visuals(&actions).contains(&VisualRequest::VehicleStationary { stationary: false }));
}

#[test]
fn place_search_is_rate_limited() {
    let mut engine = engine_with_units(Units::Both);

    let refreshes = |actions: &[OutboundAction]| {
        actions
            .iter()
            .filter(|a| matches!(a, OutboundAction::RefreshPlaces { .. }))
            .count()
    };

    assert_eq!(refreshes(&engine.process_frame(Frame::new(0, vehicle(10.0)))), 1);
    assert_eq!(refreshes(&engine.process_frame(Frame::new(1_000, vehicle(10.0)))), 0);
    assert_eq!(refreshes(&engine.process_frame(Frame::new(1_999, vehicle(10.0)))), 0);
    assert_eq!(refreshes(&engine.process_frame(Frame::new(2_000, vehicle(10.0)))), 1);

    let actions = engine.process_frame(Frame::new(4_500, vehicle(10.0)));
    let Some(OutboundAction::RefreshPlaces { near, radius_m, limit, categories }) =
        actions.iter().find(|a| matches!(a, OutboundAction::RefreshPlaces { .. }))
    else {
        panic!("expected a place refresh");
    };
    assert_eq!(*near, GeoCoordinate { lon: 10.0, lat: 10.0 });
    assert_eq!(*radius_m, 1_000);
    assert_eq!(*limit, 90);
    assert_eq!(categories.len(), 15);
}

#[test]
fn no_place_search_without_position() {
    let mut engine = engine_with_units(Units::Both);
    let actions = engine.process_frame(Frame::new(
        0,
        FrameEvent::VehicleState {
            speed_mps: 10.0,
            location: None,
        },
    ));
    assert!(!actions
        .iter()
        .any(|a| matches!(a, OutboundAction::RefreshPlaces { .. })));
}

#[test]
fn points_of_interest_visibility() {
    let mut engine = engine_with_units(Units::Both);
    let place = |name: &str, ahead_m: f64| Place {
        id: None,
        name: name.to_string(),
        coordinate: GeoCoordinate { lon: ahead_m / 10.0, lat: 42.0 },
        categories: vec!["gas-station".to_string()],
    };
    engine.process_frame(Frame::new(
        0,
        FrameEvent::PlacesFound {
            places: vec![place("far", 501.0), place("near", 499.0), place("behind", -20.0)],
        },
    ));

    // Camera not calibrated yet
    let actions = engine.process_frame(Frame::new(10, vehicle(10.0)));
    assert_eq!(shown_pois(&actions), Some(vec![]));

    engine.process_frame(Frame::new(20, FrameEvent::CameraUpdated { calibrated: true }));
    let actions = engine.process_frame(Frame::new(30, vehicle(10.0)));
    assert_eq!(shown_pois(&actions), Some(vec!["near".to_string()]));

    // Failed refresh keeps the held places
    engine.process_frame(Frame::new(
        40,
        FrameEvent::PlacesSearchFailed {
            reason: "offline".to_string(),
        },
    ));
    let actions = engine.process_frame(Frame::new(50, vehicle(10.0)));
    assert_eq!(shown_pois(&actions), Some(vec!["near".to_string()]));
}

#[test]
fn destination_marker_requires_address() {
    let mut engine = engine_with_units(Units::Both);
    engine.process_frame(Frame::new(0, FrameEvent::CameraUpdated { calibrated: true }));

    let destination = |address: Option<&str>| Destination {
        coordinate: GeoCoordinate { lon: 12.0, lat: 42.0 },
        name: "Campus Center".to_string(),
        address: address.map(str::to_string),
    };

    engine.process_frame(Frame::new(
        1,
        FrameEvent::DestinationResolved {
            destination: destination(None),
        },
    ));
    let actions = engine.process_frame(Frame::new(2, vehicle(5.0)));
    assert_eq!(shown_pois(&actions), Some(vec![]));

    engine.process_frame(Frame::new(
        3,
        FrameEvent::DestinationResolved {
            destination: destination(Some("1 University Dr")),
        },
    ));
    let actions = engine.process_frame(Frame::new(4, vehicle(5.0)));
    let pois = actions
        .iter()
        .find_map(|a| match a {
            OutboundAction::ShowPointsOfInterest { pois } => Some(pois.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(pois.len(), 1);
    assert_eq!(pois[0].poi.glyph, DESTINATION_GLYPH);
    assert_eq!(pois[0].poi.label, "Campus Center");

    engine.process_frame(Frame::new(5, FrameEvent::DestinationNotFound));
    let actions = engine.process_frame(Frame::new(6, vehicle(5.0)));
    assert_eq!(shown_pois(&actions), Some(vec![]));
}

#[test]
fn frames_deserialize_from_json_lines() {
    let lines = [
        r#"{"timestamp_ms":0,"type":"camera_updated","calibrated":true}"#,
        r#"{"timestamp_ms":10,"type":"vehicle_state","speed_mps":31.3,"location":{"lon":-72.5,"lat":42.3}}"#,
        r#"{"timestamp_ms":20,"type":"signs_classified","signs":[{"sign_type":"speed-limit","number":55,"type_confidence":0.99,"number_confidence":0.95}]}"#,
        r#"{"timestamp_ms":30,"type":"collisions_updated","objects":[{"danger":"critical","bbox":[0.1,0.2,0.3,0.4],"frame_id":3}]}"#,
        r#"{"timestamp_ms":40,"type":"frame_completed"}"#,
        r#"{"timestamp_ms":50,"type":"units_changed","units":"metric"}"#,
    ];

    let mut engine = engine_with_units(Units::Both);
    let mut all = Vec::new();
    for line in lines {
        let frame: Frame = serde_json::from_str(line).unwrap();
        all.extend(engine.process_frame(frame));
    }

    assert!(spoken(&all).contains(&AlertClass::Overspeed));
    assert_eq!(slow_down_active(&all), Some(true));
    assert_eq!(engine.state().units, Units::Metric);

    let json = serde_json::to_string(&all[0]).unwrap();
    assert!(json.contains("\"action\""));
}
