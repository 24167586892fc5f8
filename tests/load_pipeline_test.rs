// ABOUTME: Integration tests for the load pipeline - JSON session input through engine and calculator
// ABOUTME: Exercises the serde contract embedders rely on, not the per-method math
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

mod common;

use common::{days_ago, strength_session};
use loadguard::load::{LoadCalculationEngine, LoadCalculator, LoadMethod, WeeklyRecommendation};
use loadguard::models::{ExperienceLevel, Session};
use serde_json::json;
use uuid::Uuid;

fn session_from_json(value: serde_json::Value) -> Session {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_json_session_with_heart_rate_uses_trimp() {
    let session = session_from_json(json!({
        "id": Uuid::new_v4(),
        "user_id": Uuid::new_v4(),
        "date": "2026-03-02",
        "duration_minutes": 60.0,
        "heart_rate": { "avg_hr": 150.0, "max_hr": 190.0, "rest_hr": 60.0 },
        "rpe": 7.0
    }));

    let result = LoadCalculationEngine::default().compute_load(&session).unwrap();
    assert_eq!(result.method_used, LoadMethod::Trimp);

    // the wire format names the method with its published label
    let serialized = serde_json::to_value(&result).unwrap();
    assert_eq!(serialized["method_used"], "TRIMP");
    assert_eq!(serialized["confidence"], 0.95);
}

#[test]
fn test_json_session_with_zones_uses_weighted_minutes() {
    let session = session_from_json(json!({
        "id": Uuid::new_v4(),
        "user_id": Uuid::new_v4(),
        "date": "2026-03-02",
        "duration_minutes": 30.0,
        "zone_distribution": { "Z1": 20.0, "Z4": 10.0 }
    }));

    let result = LoadCalculationEngine::default().compute_load(&session).unwrap();
    assert_eq!(result.method_used, LoadMethod::ZoneRpe);
    // 20 x 1 + 10 x 7
    assert!((result.total_load - 90.0).abs() < f64::EPSILON);
}

#[test]
fn test_weekly_summary_hits_tier_target_window() {
    let user = Uuid::new_v4();
    // two sessions totalling 300, the intermediate weekly target
    let sessions = vec![
        strength_session(user, days_ago(5), 150.0),
        strength_session(user, days_ago(2), 150.0),
    ];

    let calculator = LoadCalculator::new(ExperienceLevel::Intermediate);
    let summary = calculator.calculate_weekly_load(&sessions);
    assert_eq!(summary.recommendation, WeeklyRecommendation::Optimal);
    assert!((summary.total_load - 300.0).abs() < f64::EPSILON);
    assert_eq!(summary.daily.len(), 2);
}

#[test]
fn test_minimal_json_session_roundtrips() {
    let session = session_from_json(json!({
        "id": Uuid::new_v4(),
        "user_id": Uuid::new_v4(),
        "date": "2026-03-02"
    }));
    assert!(session.exercises.is_empty());
    assert!(session.modifications.is_empty());

    // absent optionals stay off the wire
    let value = serde_json::to_value(&session).unwrap();
    assert!(value.get("heart_rate").is_none());
    assert!(value.get("rpe").is_none());
}
