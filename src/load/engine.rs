// ABOUTME: Pure load calculation engine converting one session into a single comparable load score
// ABOUTME: Fixed priority cascade - TRIMP, zone distribution, RPE x duration, MET-minutes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! Single-session load calculation.
//!
//! The engine picks the most physiologically precise method whose required
//! fields are present and valid, in a fixed priority order. The computation
//! is pure and deterministic: identical inputs always produce identical
//! results, which keeps substitute implementations comparable.

use super::constants::{met, rpe, trimp, validation, zones};
use super::{met_value, rpe_zone_multiplier, zone_load_weight};
use crate::errors::{EngineError, EngineResult};
use crate::models::{Gender, IntensityZone, Session};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Athlete parameters used for heart-rate defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Athlete age in years, used to estimate max HR when unmeasured
    pub age: u32,
    /// Gender, selects the max-HR estimate and TRIMP weighting factor
    pub gender: Gender,
    /// Resting heart rate, bpm
    pub rest_hr: f64,
    /// Measured maximum heart rate, bpm, when known
    pub max_hr: Option<f64>,
}

impl Default for AthleteProfile {
    fn default() -> Self {
        Self {
            age: trimp::DEFAULT_AGE,
            gender: Gender::Male,
            rest_hr: trimp::DEFAULT_REST_HR,
            max_hr: None,
        }
    }
}

impl AthleteProfile {
    /// Age/gender max-HR estimate used when no measurement exists.
    ///
    /// Male-style `220 - age`, female-style `206 - 0.88 x age`.
    #[must_use]
    pub fn estimated_max_hr(&self) -> f64 {
        match self.gender {
            Gender::Male => 220.0 - f64::from(self.age),
            Gender::Female => 0.88f64.mul_add(-f64::from(self.age), 206.0),
        }
    }

    /// TRIMP gender weighting factor
    #[must_use]
    pub const fn trimp_factor(&self) -> f64 {
        match self.gender {
            Gender::Male => trimp::MALE_GENDER_FACTOR,
            Gender::Female => trimp::FEMALE_GENDER_FACTOR,
        }
    }
}

/// Method that produced a load score, in descending precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadMethod {
    /// Banister training impulse from heart-rate reserve
    #[serde(rename = "TRIMP")]
    Trimp,
    /// Weighted minutes-in-zone
    #[serde(rename = "Zone_RPE")]
    ZoneRpe,
    /// Perceived exertion times duration
    #[serde(rename = "RPE_Duration")]
    RpeDuration,
    /// Metabolic-equivalent minutes
    #[serde(rename = "MET_Minutes")]
    MetMinutes,
}

/// Output of a single load computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResult {
    /// The comparable load score, non-negative, rounded to 2 decimals
    pub total_load: f64,
    /// First method in priority order whose required fields were valid
    pub method_used: LoadMethod,
    /// Fixed confidence constant for the method
    pub confidence: f64,
    /// Method-specific intermediate values
    pub breakdown: serde_json::Value,
    /// Diagnostic fields
    pub details: serde_json::Value,
}

/// Result of validating a session's telemetry before load calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionValidation {
    /// False when load cannot be computed at all
    pub valid: bool,
    /// Blocking problems
    pub errors: Vec<String>,
    /// Suspicious but non-blocking problems
    pub warnings: Vec<String>,
}

/// Stateless single-session load calculator
#[derive(Debug, Clone, Default)]
pub struct LoadCalculationEngine {
    profile: AthleteProfile,
}

impl LoadCalculationEngine {
    /// Create an engine with the given athlete profile
    #[must_use]
    pub const fn new(profile: AthleteProfile) -> Self {
        Self { profile }
    }

    /// Compute a single load score for a session.
    ///
    /// The first method in priority order (TRIMP, zone distribution,
    /// RPE x duration, MET-minutes) whose required fields are present and
    /// valid wins.
    ///
    /// # Errors
    /// `EngineError::InvalidInput` when `duration_minutes` is present but
    /// non-finite or non-positive; `EngineError::InsufficientData` when no
    /// method is satisfiable.
    pub fn compute_load(&self, session: &Session) -> EngineResult<LoadResult> {
        if let Some(duration) = session.duration_minutes {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "duration_minutes must be a finite number > 0, got {duration}"
                )));
            }
        }

        self.try_trimp(session)
            .or_else(|| self.try_zone_distribution(session))
            .or_else(|| Self::try_rpe_duration(session))
            .or_else(|| Self::try_met_minutes(session))
            .ok_or_else(|| {
                EngineError::insufficient_data(
                    "no load method satisfiable: need HR, zone, RPE or modality data with duration",
                )
            })
    }

    /// Banister TRIMP from heart-rate reserve
    fn try_trimp(&self, session: &Session) -> Option<LoadResult> {
        let duration = session.duration_minutes?;
        let hr = session.heart_rate.as_ref()?;

        let max_hr = hr
            .max_hr
            .or(self.profile.max_hr)
            .unwrap_or_else(|| self.profile.estimated_max_hr());
        let rest_hr = hr.rest_hr.unwrap_or(self.profile.rest_hr);
        if max_hr <= rest_hr {
            return None;
        }

        let reserve_fraction = ((hr.avg_hr - rest_hr) / (max_hr - rest_hr)).clamp(0.0, 1.0);
        let factor = self.profile.trimp_factor();
        let total = round2(duration * reserve_fraction * factor.powf(reserve_fraction));

        Some(LoadResult {
            total_load: total,
            method_used: LoadMethod::Trimp,
            confidence: trimp::CONFIDENCE,
            breakdown: json!({
                "avg_hr": hr.avg_hr,
                "max_hr": max_hr,
                "rest_hr": rest_hr,
                "hr_reserve_fraction": round2(reserve_fraction),
                "gender_factor": factor,
            }),
            details: json!({ "duration_minutes": duration }),
        })
    }

    /// Weighted minutes-in-zone; zero total falls through to the next method
    fn try_zone_distribution(&self, session: &Session) -> Option<LoadResult> {
        let duration = session.duration_minutes?;
        let distribution = session.zone_distribution.as_ref()?;

        let mut total = 0.0;
        let mut contributions = serde_json::Map::new();
        for (label, &minutes) in distribution {
            if minutes <= 0.0 {
                continue;
            }
            let Some(zone) = IntensityZone::normalize(label) else {
                continue;
            };
            let contribution = minutes * zone_load_weight(zone);
            total += contribution;
            contributions.insert(label.clone(), json!(round2(contribution)));
        }

        if total <= 0.0 {
            return None;
        }

        Some(LoadResult {
            total_load: round2(total),
            method_used: LoadMethod::ZoneRpe,
            confidence: zones::CONFIDENCE,
            breakdown: serde_json::Value::Object(contributions),
            details: json!({ "duration_minutes": duration }),
        })
    }

    /// RPE x duration, scaled by the zone multiplier when a zone is present
    fn try_rpe_duration(session: &Session) -> Option<LoadResult> {
        let duration = session.duration_minutes?;
        let raw_rpe = session.rpe?;

        let effective_rpe = if raw_rpe <= 0.0 {
            rpe::MIN
        } else {
            raw_rpe.clamp(rpe::MIN, rpe::MAX)
        };
        let zone_multiplier = session.intensity_zone.map_or(1.0, rpe_zone_multiplier);
        let total = round2(effective_rpe * duration * zone_multiplier);

        Some(LoadResult {
            total_load: total,
            method_used: LoadMethod::RpeDuration,
            confidence: rpe::CONFIDENCE,
            breakdown: json!({
                "rpe": effective_rpe,
                "zone_multiplier": zone_multiplier,
            }),
            details: json!({ "duration_minutes": duration }),
        })
    }

    /// MET-minutes lookup by modality and zone
    fn try_met_minutes(session: &Session) -> Option<LoadResult> {
        let duration = session.duration_minutes?;
        let modality = session.modality?;
        let zone = session.intensity_zone?;

        let met = met_value(modality, zone);
        let total = round2(met * duration * met::LOAD_ADJUSTMENT);

        Some(LoadResult {
            total_load: total,
            method_used: LoadMethod::MetMinutes,
            confidence: met::CONFIDENCE,
            breakdown: json!({
                "met_value": met,
                "adjustment": met::LOAD_ADJUSTMENT,
            }),
            details: json!({ "duration_minutes": duration }),
        })
    }

    /// Validate session telemetry before load calculation.
    ///
    /// Errors block load calculation; warnings flag suspicious data that is
    /// still usable.
    #[must_use]
    pub fn validate_session(session: &Session) -> SessionValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        match session.duration_minutes {
            None => errors.push("duration_minutes is required".to_owned()),
            Some(d) if !d.is_finite() || d <= 0.0 => {
                errors.push(format!("duration_minutes must be > 0, got {d}"));
            }
            Some(_) => {}
        }

        if let Some(hr) = &session.heart_rate {
            if hr.avg_hr < validation::MIN_AVG_HR || hr.avg_hr > validation::MAX_AVG_HR {
                warnings.push(format!(
                    "avg_hr {} outside plausible range [{}, {}]",
                    hr.avg_hr,
                    validation::MIN_AVG_HR,
                    validation::MAX_AVG_HR
                ));
            }
        }

        if let Some(rpe_value) = session.rpe {
            if !(rpe::MIN..=rpe::MAX).contains(&rpe_value) {
                warnings.push(format!("rpe {rpe_value} outside [1, 10]"));
            }
        }

        if let (Some(distribution), Some(duration)) =
            (&session.zone_distribution, session.duration_minutes)
        {
            let zone_minutes: f64 = distribution.values().filter(|m| **m > 0.0).sum();
            if (zone_minutes - duration).abs() > validation::ZONE_MINUTES_TOLERANCE {
                warnings.push(format!(
                    "zone minutes {zone_minutes} differ from duration {duration} by more than {} minutes",
                    validation::ZONE_MINUTES_TOLERANCE
                ));
            }
        }

        SessionValidation {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Round to two decimal places, the precision of all reported load values
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
