// ABOUTME: Stateful guardrail monitor - ramp checks, missed-day and pain handling, session validation
// ABOUTME: Decides on protective adjustments, persists them and rewrites upcoming HIIT sessions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

//! The guardrail monitor.
//!
//! Error policy, by contract: ramp checks and the missed-day/pain handlers
//! absorb internal failures and report them as structured `Error` outcomes;
//! session validation fails **open** (`valid: true`) on any internal error so
//! that a bug can never block training. Within one check the write order is
//! strict: adjustment persisted, sessions rewritten, event published, audit
//! recorded - a later read always observes the adjustment that caused it.
//!
//! Writes for one user are serialized through a per-user async lock, so two
//! in-flight triggers cannot interleave their adjustments.

use super::ramp::{
    analyze_ramp_rate, calculate_ramp_rate, exceeds_threshold, hiit_reduction, RampAnalysis,
    RampSeverity, WeeklyTotal,
};
use crate::audit::{AuditRecord, AuditSink, AuditTrigger};
use crate::config::GuardrailConfig;
use crate::events::{EngineEvent, EventBus};
use crate::load::{ComprehensiveLoad, IntensityRecommendation, LoadCalculator, LoadStatus};
use crate::models::{
    AdjustmentType, BlockType, GuardrailAction, GuardrailAdjustment, Session, SessionModification,
};
use crate::storage::{AdjustmentStore, SessionStore};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Modification reason recorded on sessions rewritten by the ramp guardrail
pub const REASON_RAMP_RATE: &str = "guardrail_ramp_rate";

/// Tags that mark a session as high intensity regardless of telemetry
const HIGH_INTENSITY_TAGS: [&str; 3] = ["hiit", "anaerobic_capacity", "vo2"];

/// Floor for reduced interval-style target intensity
const MIN_TARGET_INTENSITY: f64 = 0.6;

/// Reduction at or above which structured blocks step down two zones
const TWO_ZONE_STEP_REDUCTION: f64 = 0.3;

/// Tolerance applied to the expected intensity under a downshift window
const INTENSITY_TOLERANCE: f64 = 1.1;

/// Missed days below which no action is taken
const MISSED_DAYS_FLOOR: u32 = 3;

/// Reduction accrued per missed day, and its cap
const MISSED_DAY_REDUCTION_RATE: f64 = 0.15;
const MISSED_DAYS_MAX_REDUCTION: f64 = 0.4;

/// Gradual-return window cap, days
const GRADUAL_RETURN_MAX_DAYS: i64 = 7;

/// Pain handling: baseline level, baseline reduction, per-level step, window
const PAIN_BASELINE_LEVEL: f64 = 5.0;
const PAIN_BASELINE_REDUCTION: f64 = 0.30;
const PAIN_LEVEL_STEP: f64 = 0.05;
const PAIN_WINDOW_DAYS: i64 = 14;

/// How long a HIIT reduction stays in force, days
const REDUCE_HIIT_WINDOW_DAYS: i64 = 7;

/// Extra recovery days attached to a high-severity ramp breach
const HIGH_SEVERITY_RECOVERY_DAYS: i64 = 2;

/// Deload-week reduction applied after repeated ramp breaches
const DELOAD_WEEK_REDUCTION: f64 = 0.25;

/// Outcome of a weekly ramp-rate check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RampCheck {
    /// Fewer than two weeks of history
    InsufficientData {
        /// Plain-language explanation
        message: String,
    },
    /// Ramp at or below the tier threshold
    WithinLimits {
        /// Observed week-over-week change
        ramp_rate: f64,
        /// Tier threshold it was compared against
        threshold: f64,
        /// Plain-language explanation
        message: String,
    },
    /// Ramp exceeded the threshold and guardrails were applied
    GuardrailApplied {
        /// Observed week-over-week change
        ramp_rate: f64,
        /// Tier threshold it was compared against
        threshold: f64,
        /// Actions taken, in application order
        actions: Vec<GuardrailAction>,
        /// Plain-language explanation
        message: String,
    },
    /// The check itself failed; reported rather than thrown
    Error {
        /// What went wrong
        message: String,
    },
}

/// Outcome of a missed-days check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MissedDaysOutcome {
    /// Too few missed days to matter
    NoAction {
        /// Plain-language explanation
        message: String,
    },
    /// A gradual-return downshift was applied
    DownshiftApplied {
        /// Fractional reduction during the return window
        reduction: f64,
        /// Length of the return window in days
        duration_days: i64,
        /// Plain-language explanation
        message: String,
    },
    /// The check itself failed; reported rather than thrown
    Error {
        /// What went wrong
        message: String,
    },
}

/// Outcome of a pain report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainFlagOutcome {
    /// Actions taken; empty when the handler failed internally
    pub actions: Vec<GuardrailAction>,
    /// Plain-language explanation
    pub message: String,
}

/// Why a planned session was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The tier's consecutive-training-day limit was reached
    ConsecutiveDaysExceeded,
    /// The session conflicts with an active adjustment
    ViolatesAdjustment,
}

/// Verdict on a planned session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedSessionVerdict {
    /// Whether the session may proceed as planned
    pub valid: bool,
    /// Set when the session was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
    /// Plain-language explanation
    pub message: String,
}

impl PlannedSessionVerdict {
    fn allowed(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            reason: None,
            message: message.into(),
        }
    }

    fn rejected(reason: RejectionReason, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            message: message.into(),
        }
    }
}

/// One entry in the per-user trigger history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRecord {
    /// When the trigger fired
    pub at: DateTime<Utc>,
    /// What fired
    pub trigger: AuditTrigger,
    /// Actions that were taken
    pub actions: Vec<GuardrailAction>,
}

/// Store-backed load overview, the dashboard-facing aggregate entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOverview {
    /// All aggregates computed
    Ready {
        /// Combined internal/external load and risk
        comprehensive: ComprehensiveLoad,
        /// Today's load against the trailing week
        current: LoadStatus,
        /// Bounded multipliers for upcoming workouts
        workout: IntensityRecommendation,
    },
    /// Aggregation failed; degraded result instead of a thrown error
    Error {
        /// What went wrong
        message: String,
    },
}

/// Stateful safety layer watching load trends and session cadence.
///
/// All collaborators are injected; the monitor holds no global state beyond
/// its own per-user history and locks.
pub struct LoadGuardrails {
    sessions: Arc<dyn SessionStore>,
    adjustments: Arc<dyn AdjustmentStore>,
    events: EventBus,
    audit: Arc<dyn AuditSink>,
    calculator: LoadCalculator,
    config: GuardrailConfig,
    history: DashMap<Uuid, VecDeque<TriggerRecord>>,
    user_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl LoadGuardrails {
    /// Create a monitor with injected collaborators
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        adjustments: Arc<dyn AdjustmentStore>,
        events: EventBus,
        audit: Arc<dyn AuditSink>,
        config: GuardrailConfig,
    ) -> Self {
        let calculator = LoadCalculator::new(config.experience_level);
        Self {
            sessions,
            adjustments,
            events,
            audit,
            calculator,
            config,
            history: DashMap::new(),
            user_locks: DashMap::new(),
        }
    }

    /// The aggregate calculator built for the configured tier
    #[must_use]
    pub const fn calculator(&self) -> &LoadCalculator {
        &self.calculator
    }

    /// Snapshot of the capped per-user trigger history
    #[must_use]
    pub fn trigger_history(&self, user_id: Uuid) -> Vec<TriggerRecord> {
        self.history
            .get(&user_id)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Check the current week's load ramp against the tier threshold and
    /// apply guardrails when it is exceeded.
    pub async fn check_weekly_ramp_rate(&self, user_id: Uuid) -> RampCheck {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        match self.check_ramp_inner(user_id).await {
            Ok(check) => check,
            Err(err) => {
                tracing::warn!(%user_id, "ramp check failed: {err:#}");
                RampCheck::Error {
                    message: format!("ramp check failed: {err}"),
                }
            }
        }
    }

    async fn check_ramp_inner(&self, user_id: Uuid) -> anyhow::Result<RampCheck> {
        let weekly_totals = self.weekly_totals(user_id).await?;
        if weekly_totals.len() < 2 {
            return Ok(RampCheck::InsufficientData {
                message: "need at least two weeks of training history".to_owned(),
            });
        }

        let current = weekly_totals[weekly_totals.len() - 1].total;
        let previous = weekly_totals[weekly_totals.len() - 2].total;
        let ramp_rate = calculate_ramp_rate(current, previous);
        let thresholds = self.config.thresholds();
        let threshold = thresholds.max_weekly_increase;

        if !exceeds_threshold(ramp_rate, threshold) {
            return Ok(RampCheck::WithinLimits {
                ramp_rate,
                threshold,
                message: format!(
                    "weekly load change {:.0}% is within the {:.0}% limit",
                    ramp_rate * 100.0,
                    threshold * 100.0
                ),
            });
        }

        let analysis = analyze_ramp_rate(&weekly_totals, &thresholds);
        let actions = self.apply_ramp_rate_guardrails(user_id, &analysis).await?;

        Ok(RampCheck::GuardrailApplied {
            ramp_rate,
            threshold,
            actions,
            message: format!(
                "weekly load rose {:.0}%, above the {:.0}% limit; training was adjusted",
                ramp_rate * 100.0,
                threshold * 100.0
            ),
        })
    }

    /// Apply guardrails for an already-analyzed ramp breach.
    ///
    /// Normally invoked through [`Self::check_weekly_ramp_rate`], which holds
    /// the per-user lock.
    pub async fn apply_ramp_rate_guardrails(
        &self,
        user_id: Uuid,
        analysis: &RampAnalysis,
    ) -> anyhow::Result<Vec<GuardrailAction>> {
        let thresholds = self.config.thresholds();
        let reduction = hiit_reduction(&thresholds, analysis.ramp_rate);

        let mut actions = vec![GuardrailAction::ReduceHiit { reduction }];
        if analysis.severity == RampSeverity::High {
            actions.push(GuardrailAction::ExtendRecovery {
                days: HIGH_SEVERITY_RECOVERY_DAYS,
            });
        }
        if analysis.consecutive_increases >= 2 {
            actions.push(GuardrailAction::DeloadWeek {
                reduction: DELOAD_WEEK_REDUCTION,
            });
        }

        let sessions_affected = self.apply_session_modifications(user_id, &actions).await?;
        self.push_history(user_id, AuditTrigger::GuardrailTriggered, &actions);

        self.events.publish(EngineEvent::GuardrailApplied {
            user_id,
            kind: AdjustmentType::ReduceHiit,
            reduction,
            sessions_affected,
        });
        self.audit.record(AuditRecord::new(
            user_id,
            AuditTrigger::GuardrailTriggered,
            json!({
                "ramp_rate": analysis.ramp_rate,
                "severity": analysis.severity,
                "consecutive_increases": analysis.consecutive_increases,
                "reduction": reduction,
                "sessions_affected": sessions_affected,
            }),
        ));

        Ok(actions)
    }

    /// Respond to a training gap. Below three missed days nothing happens;
    /// otherwise a gradual-return downshift is applied.
    pub async fn handle_missed_days(&self, user_id: Uuid, missed_days: u32) -> MissedDaysOutcome {
        if missed_days < MISSED_DAYS_FLOOR {
            return MissedDaysOutcome::NoAction {
                message: format!("{missed_days} missed days need no adjustment"),
            };
        }

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let reduction =
            (f64::from(missed_days) * MISSED_DAY_REDUCTION_RATE).min(MISSED_DAYS_MAX_REDUCTION);
        let duration_days = i64::from(missed_days).min(GRADUAL_RETURN_MAX_DAYS);
        let actions = vec![GuardrailAction::GradualReturn {
            reduction,
            days: duration_days,
        }];

        if let Err(err) = self.apply_session_modifications(user_id, &actions).await {
            tracing::warn!(%user_id, "missed-days handling failed: {err:#}");
            return MissedDaysOutcome::Error {
                message: format!("missed-days handling failed: {err}"),
            };
        }

        self.push_history(user_id, AuditTrigger::MissedDaysAdjustment, &actions);
        self.audit.record(AuditRecord::new(
            user_id,
            AuditTrigger::MissedDaysAdjustment,
            json!({
                "missed_days": missed_days,
                "reduction": reduction,
                "duration_days": duration_days,
            }),
        ));

        MissedDaysOutcome::DownshiftApplied {
            reduction,
            duration_days,
            message: format!(
                "after {missed_days} missed days, load is reduced {:.0}% for {duration_days} days",
                reduction * 100.0
            ),
        }
    }

    /// Respond to a pain report with a 14-day immediate downshift scaled by
    /// pain level (level 5 is the baseline).
    pub async fn handle_pain_flag(
        &self,
        user_id: Uuid,
        pain_level: u8,
        location: &str,
    ) -> PainFlagOutcome {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let reduction = PAIN_LEVEL_STEP
            .mul_add(
                f64::from(pain_level) - PAIN_BASELINE_LEVEL,
                PAIN_BASELINE_REDUCTION,
            )
            .clamp(0.0, super::ramp::MAX_REDUCTION);
        let actions = vec![GuardrailAction::ImmediateDownshift {
            reduction,
            days: PAIN_WINDOW_DAYS,
            pain_location: location.to_owned(),
        }];

        if let Err(err) = self.apply_session_modifications(user_id, &actions).await {
            tracing::warn!(%user_id, "pain flag handling failed: {err:#}");
            return PainFlagOutcome {
                actions: Vec::new(),
                message: format!("pain flag handling failed: {err}"),
            };
        }

        self.push_history(user_id, AuditTrigger::PainFlagResponse, &actions);
        self.audit.record(AuditRecord::new(
            user_id,
            AuditTrigger::PainFlagResponse,
            json!({
                "pain_level": pain_level,
                "location": location,
                "reduction": reduction,
                "duration_days": PAIN_WINDOW_DAYS,
            }),
        ));

        PainFlagOutcome {
            actions,
            message: format!(
                "pain at {location} (level {pain_level}): intensity reduced {:.0}% for {PAIN_WINDOW_DAYS} days",
                reduction * 100.0
            ),
        }
    }

    /// Validate a planned session against cadence limits and active
    /// adjustments. Fails open: any internal error allows the session.
    pub async fn validate_planned_session(
        &self,
        user_id: Uuid,
        session: &Session,
    ) -> PlannedSessionVerdict {
        match self.validate_inner(user_id, session).await {
            Ok(verdict) => verdict,
            Err(err) => {
                tracing::warn!(%user_id, "session validation degraded, allowing session: {err:#}");
                PlannedSessionVerdict::allowed(format!(
                    "validation degraded, session allowed: {err}"
                ))
            }
        }
    }

    async fn validate_inner(
        &self,
        user_id: Uuid,
        session: &Session,
    ) -> anyhow::Result<PlannedSessionVerdict> {
        let today = Utc::now().date_naive();
        let thresholds = self.config.thresholds();

        let recorded = self.sessions.user_sessions(user_id).await?;
        let training_dates: HashSet<NaiveDate> = recorded.iter().map(|s| s.date).collect();
        let mut consecutive = 0;
        let mut day = today;
        while training_dates.contains(&day) {
            consecutive += 1;
            day -= Duration::days(1);
        }
        if consecutive >= thresholds.consecutive_days_limit {
            return Ok(PlannedSessionVerdict::rejected(
                RejectionReason::ConsecutiveDaysExceeded,
                format!(
                    "{consecutive} consecutive training days reach the limit of {}; rest first",
                    thresholds.consecutive_days_limit
                ),
            ));
        }

        let active = self.adjustments.active_adjustments(user_id, today).await?;
        for adjustment in &active {
            match adjustment.kind {
                AdjustmentType::ReduceHiit => {
                    if Self::is_high_intensity_session(session)
                        && !session.has_modification(REASON_RAMP_RATE)
                    {
                        return Ok(PlannedSessionVerdict::rejected(
                            RejectionReason::ViolatesAdjustment,
                            "a HIIT reduction is active; this session has not been adjusted yet"
                                .to_owned(),
                        ));
                    }
                }
                AdjustmentType::ImmediateDownshift | AdjustmentType::GradualReturn => {
                    if adjustment.covers(session.date) {
                        let expected = 1.0 - adjustment.reduction;
                        if session.planned_intensity() > expected * INTENSITY_TOLERANCE {
                            return Ok(PlannedSessionVerdict::rejected(
                                RejectionReason::ViolatesAdjustment,
                                format!(
                                    "planned intensity {:.2} exceeds the {:.2} allowed during {}",
                                    session.planned_intensity(),
                                    expected * INTENSITY_TOLERANCE,
                                    adjustment.reason
                                ),
                            ));
                        }
                    }
                }
                AdjustmentType::ExtendRecovery | AdjustmentType::DeloadWeek => {}
            }
        }

        Ok(PlannedSessionVerdict::allowed("session fits current limits"))
    }

    /// Dispatch guardrail actions to their effectors; returns the number of
    /// sessions rewritten.
    pub async fn apply_session_modifications(
        &self,
        user_id: Uuid,
        actions: &[GuardrailAction],
    ) -> anyhow::Result<usize> {
        let today = Utc::now().date_naive();
        let mut sessions_affected = 0;

        for action in actions {
            match action {
                GuardrailAction::ReduceHiit { reduction } => {
                    // the persisted adjustment is what blocks newly planned
                    // HIIT sessions; the rewrites only cover already-planned ones
                    let adjustment = GuardrailAdjustment::new(
                        AdjustmentType::ReduceHiit,
                        *reduction,
                        today,
                        Some(REDUCE_HIIT_WINDOW_DAYS),
                        "high-intensity work reduced after a sharp load increase",
                    );
                    self.adjustments.save_adjustment(user_id, &adjustment).await?;
                    sessions_affected += self.modify_upcoming_hiit(user_id, *reduction).await?;
                }
                GuardrailAction::ExtendRecovery { days } => {
                    let adjustment = GuardrailAdjustment::new(
                        AdjustmentType::ExtendRecovery,
                        0.0,
                        today,
                        Some(*days),
                        "additional recovery scheduled after a sharp load increase",
                    );
                    self.adjustments.save_adjustment(user_id, &adjustment).await?;
                }
                GuardrailAction::DeloadWeek { reduction } => {
                    let adjustment = GuardrailAdjustment::new(
                        AdjustmentType::DeloadWeek,
                        *reduction,
                        today,
                        Some(7),
                        "deload week after repeated load increases",
                    );
                    self.adjustments.save_adjustment(user_id, &adjustment).await?;
                }
                GuardrailAction::GradualReturn { reduction, days } => {
                    let adjustment = GuardrailAdjustment::new(
                        AdjustmentType::GradualReturn,
                        *reduction,
                        today,
                        Some(*days),
                        "gradual return after missed training days",
                    );
                    self.adjustments.save_adjustment(user_id, &adjustment).await?;
                }
                GuardrailAction::ImmediateDownshift {
                    reduction,
                    days,
                    pain_location,
                } => {
                    let mut adjustment = GuardrailAdjustment::new(
                        AdjustmentType::ImmediateDownshift,
                        *reduction,
                        today,
                        Some(*days),
                        "immediate downshift after a pain report",
                    );
                    adjustment.pain_location = Some(pain_location.clone());
                    self.adjustments.save_adjustment(user_id, &adjustment).await?;
                }
            }
        }

        Ok(sessions_affected)
    }

    /// Rewrite the next upcoming high-intensity sessions (at most the
    /// configured window, normally 2) with the given reduction.
    async fn modify_upcoming_hiit(&self, user_id: Uuid, reduction: f64) -> anyhow::Result<usize> {
        let today = Utc::now().date_naive();
        let upcoming = self
            .sessions
            .upcoming_sessions(user_id, today, self.config.upcoming_days)
            .await?;

        let targets: Vec<&Session> = upcoming
            .iter()
            .filter(|s| {
                Self::is_high_intensity_session(s) && !s.has_modification(REASON_RAMP_RATE)
            })
            .take(self.config.hiit_sessions_window)
            .collect();

        let mut modified = 0;
        for session in targets {
            let updated = apply_hiit_reduction(session, reduction, Utc::now());
            self.sessions.save_session(user_id, &updated).await?;
            modified += 1;
        }

        Ok(modified)
    }

    /// Whether a session counts as high intensity: HIIT-class tags, primary
    /// zone Z4/Z5, RPE at or above 8, or a main block in Z4/Z5.
    #[must_use]
    pub fn is_high_intensity_session(session: &Session) -> bool {
        if session
            .tags
            .iter()
            .any(|tag| HIGH_INTENSITY_TAGS.iter().any(|h| tag.eq_ignore_ascii_case(h)))
        {
            return true;
        }
        if session
            .intensity_zone
            .is_some_and(crate::models::IntensityZone::is_high_intensity)
        {
            return true;
        }
        if session
            .rpe
            .is_some_and(|rpe| rpe >= crate::load::constants::rpe::HIGH_INTENSITY)
        {
            return true;
        }
        session.structure.as_ref().is_some_and(|blocks| {
            blocks.iter().any(|b| {
                b.block_type == BlockType::Main
                    && b.intensity
                        .is_some_and(crate::models::IntensityZone::is_high_intensity)
            })
        })
    }

    /// Store-backed load overview; aggregation failures degrade into
    /// [`LoadOverview::Error`] instead of propagating.
    pub async fn load_overview(&self, user_id: Uuid) -> LoadOverview {
        match self.load_overview_inner(user_id).await {
            Ok(overview) => overview,
            Err(err) => {
                tracing::warn!(%user_id, "load overview failed: {err:#}");
                LoadOverview::Error {
                    message: format!("load overview failed: {err}"),
                }
            }
        }
    }

    async fn load_overview_inner(&self, user_id: Uuid) -> anyhow::Result<LoadOverview> {
        let sessions = self.sessions.user_sessions(user_id).await?;
        let activities = self.sessions.external_activities(user_id).await?;
        let today = Utc::now().date_naive();

        let comprehensive = self.calculator.calculate_comprehensive_load(&sessions, &activities);
        let current = LoadCalculator::current_load_status(&sessions, &activities, today);
        let workout = self
            .calculator
            .workout_intensity_recommendations(&current, comprehensive.total_load);

        Ok(LoadOverview::Ready {
            comprehensive,
            current,
            workout,
        })
    }

    /// React to an inbound notification: completed sessions trigger a ramp
    /// check, pain reports a downshift, planned sessions a validation.
    pub async fn handle_event(&self, event: &EngineEvent) {
        match event {
            EngineEvent::SessionCompleted { user_id } => {
                let check = self.check_weekly_ramp_rate(*user_id).await;
                tracing::debug!(user_id = %user_id, ?check, "ramp check after completed session");
            }
            EngineEvent::PainReported {
                user_id,
                level,
                location,
            } => {
                self.handle_pain_flag(*user_id, *level, location).await;
            }
            EngineEvent::SessionPlanned { user_id, session_id } => {
                match self.sessions.user_sessions(*user_id).await {
                    Ok(sessions) => {
                        if let Some(session) = sessions.iter().find(|s| s.id == *session_id) {
                            let verdict = self.validate_planned_session(*user_id, session).await;
                            tracing::debug!(user_id = %user_id, ?verdict, "planned session validated");
                        }
                    }
                    Err(err) => {
                        tracing::warn!(user_id = %user_id, "could not load planned session: {err:#}");
                    }
                }
            }
            EngineEvent::GuardrailApplied { .. } => {}
        }
    }

    /// Bucket a user's sessions into trailing 7-day totals, oldest first.
    /// Week 0 ends today; empty leading weeks before the first session are
    /// dropped so short histories report as insufficient data.
    async fn weekly_totals(&self, user_id: Uuid) -> anyhow::Result<Vec<WeeklyTotal>> {
        let sessions = self.sessions.user_sessions(user_id).await?;
        let today = Utc::now().date_naive();

        let Some(oldest) = sessions.iter().map(|s| s.date).min() else {
            return Ok(Vec::new());
        };

        let spanned_weeks = ((today - oldest).num_days() / 7 + 1)
            .clamp(1, self.config.weekly_history_weeks as i64) as usize;

        let mut totals = Vec::with_capacity(spanned_weeks);
        for week_back in (0..spanned_weeks).rev() {
            let end = today - Duration::days(7 * week_back as i64);
            let start = end - Duration::days(6);
            let total: f64 = sessions
                .iter()
                .filter(|s| s.date >= start && s.date <= end)
                .map(|s| LoadCalculator::calculate_session_load(s).total)
                .sum();
            totals.push(WeeklyTotal {
                week_start: start,
                total,
            });
        }

        Ok(totals)
    }

    fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.user_locks.entry(user_id).or_default().value().clone()
    }

    fn push_history(&self, user_id: Uuid, trigger: AuditTrigger, actions: &[GuardrailAction]) {
        let mut entry = self.history.entry(user_id).or_default();
        entry.push_back(TriggerRecord {
            at: Utc::now(),
            trigger,
            actions: actions.to_vec(),
        });
        while entry.len() > self.config.history_cap {
            entry.pop_front();
        }
    }
}

/// Pure reduction of one high-intensity session.
///
/// Structured-block sessions step their main and interval block zones down
/// one level (two when the reduction is 0.3 or more); interval-style sessions
/// scale `target_intensity` by `1 - reduction`, floored at 0.6. The caller
/// persists the returned session.
#[must_use]
pub fn apply_hiit_reduction(session: &Session, reduction: f64, applied_at: DateTime<Utc>) -> Session {
    let mut updated = session.clone();

    if let Some(blocks) = updated.structure.as_mut() {
        let levels = if reduction >= TWO_ZONE_STEP_REDUCTION { 2 } else { 1 };
        for block in blocks
            .iter_mut()
            .filter(|b| matches!(b.block_type, BlockType::Main | BlockType::Interval))
        {
            if let Some(zone) = block.intensity {
                block.intensity = Some(zone.step_down(levels));
            }
        }
    } else {
        let target = updated
            .target_intensity
            .unwrap_or_else(|| session.planned_intensity());
        updated.target_intensity = Some((target * (1.0 - reduction)).max(MIN_TARGET_INTENSITY));
    }

    updated.modifications.push(SessionModification {
        kind: "intensity_reduction".to_owned(),
        reduction,
        reason: REASON_RAMP_RATE.to_owned(),
        applied_at,
    });

    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IntensityZone, IntervalBlock};
    use std::collections::BTreeSet;

    fn hiit_session() -> Session {
        let mut session = Session::new(Uuid::new_v4(), Utc::now().date_naive());
        session.tags = BTreeSet::from(["HIIT".to_owned()]);
        session.target_intensity = Some(0.95);
        session
    }

    #[test]
    fn test_high_intensity_detection() {
        assert!(LoadGuardrails::is_high_intensity_session(&hiit_session()));

        let mut zoned = Session::new(Uuid::new_v4(), Utc::now().date_naive());
        zoned.intensity_zone = Some(IntensityZone::Z4);
        assert!(LoadGuardrails::is_high_intensity_session(&zoned));

        let mut hard_rpe = Session::new(Uuid::new_v4(), Utc::now().date_naive());
        hard_rpe.rpe = Some(8.5);
        assert!(LoadGuardrails::is_high_intensity_session(&hard_rpe));

        let mut structured = Session::new(Uuid::new_v4(), Utc::now().date_naive());
        structured.structure = Some(vec![IntervalBlock {
            block_type: BlockType::Main,
            intensity: Some(IntensityZone::Z5),
            duration_minutes: Some(20.0),
            sets: None,
            work_duration_minutes: None,
            description: None,
        }]);
        assert!(LoadGuardrails::is_high_intensity_session(&structured));

        let easy = Session::new(Uuid::new_v4(), Utc::now().date_naive());
        assert!(!LoadGuardrails::is_high_intensity_session(&easy));
    }

    #[test]
    fn test_hiit_reduction_scales_target_intensity() {
        let session = hiit_session();
        let updated = apply_hiit_reduction(&session, 0.2, Utc::now());
        assert!((updated.target_intensity.unwrap() - 0.76).abs() < 1e-12);
        assert!(updated.has_modification(REASON_RAMP_RATE));
        // original untouched
        assert!((session.target_intensity.unwrap() - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hiit_reduction_floors_at_min_intensity() {
        let mut session = hiit_session();
        session.target_intensity = Some(0.65);
        let updated = apply_hiit_reduction(&session, 0.5, Utc::now());
        assert!((updated.target_intensity.unwrap() - MIN_TARGET_INTENSITY).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hiit_reduction_steps_structured_blocks() {
        let mut session = hiit_session();
        session.structure = Some(vec![
            IntervalBlock {
                block_type: BlockType::Warmup,
                intensity: Some(IntensityZone::Z2),
                duration_minutes: Some(10.0),
                sets: None,
                work_duration_minutes: None,
                description: None,
            },
            IntervalBlock {
                block_type: BlockType::Main,
                intensity: Some(IntensityZone::Z5),
                duration_minutes: Some(20.0),
                sets: None,
                work_duration_minutes: None,
                description: None,
            },
        ]);

        let one_step = apply_hiit_reduction(&session, 0.2, Utc::now());
        let blocks = one_step.structure.as_ref().unwrap();
        assert_eq!(blocks[0].intensity, Some(IntensityZone::Z2)); // warmup untouched
        assert_eq!(blocks[1].intensity, Some(IntensityZone::Z4));

        let two_steps = apply_hiit_reduction(&session, 0.35, Utc::now());
        assert_eq!(
            two_steps.structure.as_ref().unwrap()[1].intensity,
            Some(IntensityZone::Z3)
        );
    }
}
