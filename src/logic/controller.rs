//! Presentation Controller
//!
//! Owns the submission state machine and the view state the page renders:
//!
//! ```text
//! Idle/Displaying --submit--> Submitting --success--> Displaying
//!                                        --failure--> Failed
//! ```
//!
//! Submissions are serialized: a submit while one is in flight is rejected
//! rather than raced. Each successful cycle bumps a sequence number before
//! its animation starts, which retires any still-running animation from an
//! earlier cycle. On failure nothing of the previously displayed result is
//! touched.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::constants::HIGH_RISK_THRESHOLD;
use crate::error::{AppError, AppResult};
use crate::logic::animator;
use crate::logic::form::{FieldSpec, FormState, FIELDS};
use crate::logic::insight::{self, deriver, PersonalizedTip, TipCatalog};
use crate::logic::predict::{PredictClient, PredictConfig};

/// Submission cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Submitting,
    Displaying,
    Failed,
}

/// Presentation branch for a scored result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    /// Exactly 0.5 routes to the low branch
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}

/// Everything the page needs to render the result section
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub phase: Phase,
    pub assessment_id: Option<Uuid>,
    /// Animated percentage currently on screen, 0..=100
    pub display_percent: u8,
    pub probability: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    /// Narrative insight sentences, one per personalized tip
    pub insights: Vec<String>,
    pub tips: Vec<PersonalizedTip>,
    /// Set on the low-risk branch instead of insights/tips
    pub reassurance: Option<String>,
    pub last_error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            assessment_id: None,
            display_percent: 0,
            probability: None,
            risk_level: None,
            insights: Vec::new(),
            tips: Vec::new(),
            reassurance: None,
            last_error: None,
            completed_at: None,
        }
    }
}

struct Inner {
    form: RwLock<FormState>,
    view: RwLock<ViewState>,
    /// Animation cycle sequence. Bumped when a fresh animation starts;
    /// stale tick closures compare against it before every write.
    animation_seq: AtomicU64,
    /// Submit guard; set for the whole Submitting phase
    in_flight: AtomicBool,
}

/// Cloneable handle over the shared presentation state
#[derive(Clone)]
pub struct AssessmentController {
    inner: Arc<Inner>,
    client: Arc<PredictClient>,
    catalog: Arc<TipCatalog>,
    animation_duration_ms: u64,
    animation_step_ms: u64,
}

impl AssessmentController {
    pub fn new(config: &Config, catalog: TipCatalog) -> Self {
        let client = PredictClient::new(PredictConfig {
            base_url: config.predict_url.clone(),
            timeout_secs: config.request_timeout_secs,
        });

        Self {
            inner: Arc::new(Inner {
                form: RwLock::new(FormState::new()),
                view: RwLock::new(ViewState::default()),
                animation_seq: AtomicU64::new(0),
                in_flight: AtomicBool::new(false),
            }),
            client: Arc::new(client),
            catalog: Arc::new(catalog),
            animation_duration_ms: config.animation_duration_ms,
            animation_step_ms: config.animation_step_ms,
        }
    }

    // ------------------------------------------------------------------
    // Form access
    // ------------------------------------------------------------------

    /// Set one raw form value (no validation at write time)
    pub fn set_field(&self, field: &str, value: String) -> AppResult<()> {
        self.inner.form.write().set(field, value)
    }

    /// Current raw value of one field
    pub fn field_value(&self, field: &str) -> String {
        self.inner.form.read().get(field).to_string()
    }

    /// (spec, raw value) for every field, in display order
    pub fn fields(&self) -> Vec<(&'static FieldSpec, String)> {
        let form = self.inner.form.read();
        FIELDS
            .iter()
            .map(|spec| (spec, form.get(spec.name).to_string()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Submission cycle
    // ------------------------------------------------------------------

    /// Run one full submission cycle: validate, score, derive, animate.
    ///
    /// Returns the view state as it stands right after the transition;
    /// the score animation keeps updating `display_percent` afterwards.
    pub async fn submit(&self) -> AppResult<ViewState> {
        if self.inner.in_flight.swap(true, Ordering::SeqCst) {
            return Err(AppError::SubmissionInProgress);
        }

        let result = self.run_cycle().await;
        self.inner.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(view) => Ok(view),
            Err(err) => {
                // Failure leaves the previously displayed result intact
                tracing::error!("Prediction error: {}", err);
                let mut view = self.inner.view.write();
                view.phase = Phase::Failed;
                view.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn run_cycle(&self) -> AppResult<ViewState> {
        let payload = self.inner.form.read().to_payload()?;

        {
            let mut view = self.inner.view.write();
            view.phase = Phase::Submitting;
        }

        let response = self.client.submit(&payload).await?;

        let target = (response.probability * 100.0).round() as u8;
        let tips = deriver::derive(&response.contributions, &self.catalog);
        let insights: Vec<String> = tips
            .iter()
            .map(|t| deriver::message_for(&t.feature, &self.catalog))
            .collect();
        let risk_level = RiskLevel::from_probability(response.probability);

        tracing::info!(
            "Prediction complete: probability={:.3} risk={:?} tips={}",
            response.probability,
            risk_level,
            tips.len()
        );

        // Retire any animation still running from an earlier cycle, then
        // publish the fresh result with the counter reset to zero.
        let seq = self.inner.animation_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let snapshot = {
            let mut view = self.inner.view.write();
            view.phase = Phase::Displaying;
            view.assessment_id = Some(Uuid::new_v4());
            view.display_percent = 0;
            view.probability = Some(response.probability);
            view.risk_level = Some(risk_level);
            view.insights = insights;
            view.tips = tips;
            view.reassurance = match risk_level {
                RiskLevel::Low => Some(insight::LOW_RISK_REASSURANCE.to_string()),
                RiskLevel::High => None,
            };
            view.last_error = None;
            view.completed_at = Some(Utc::now());
            view.clone()
        };

        self.spawn_animation(seq, target);

        Ok(snapshot)
    }

    /// Drive `display_percent` from 0 toward `target` on a background
    /// task. Frames from a superseded cycle are refused by the sequence
    /// check, so overlapping animations can never interleave writes.
    fn spawn_animation(&self, seq: u64, target: u8) {
        let plan = animator::frame_plan(target, self.animation_duration_ms, self.animation_step_ms);
        let step_ms = self.animation_step_ms;
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            animator::run(plan, step_ms, move |frame| {
                if inner.animation_seq.load(Ordering::SeqCst) != seq {
                    return false;
                }
                inner.view.write().display_percent = frame;
                true
            })
            .await;
        });
    }

    // ------------------------------------------------------------------
    // View access
    // ------------------------------------------------------------------

    /// Snapshot of the current view state
    pub fn view(&self) -> ViewState {
        self.inner.view.read().clone()
    }
}
