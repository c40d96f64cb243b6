// ── Booking workflow ──
//
// One state machine per booking attempt:
//
//   Idle -> Configuring -> Previewing -> Confirming -> Submitting
//                                                   -> Succeeded | Failed
//
// `Previewing` is transient (estimator in flight, confirm disabled);
// `Succeeded`/`Failed` are terminal for the attempt. The availability
// check always precedes reservation creation, and a stale preview
// (superseded by a newer edit) is discarded via a generation counter.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use tracing::{debug, warn};

use rentley_api::ApiClient;
use rentley_api::types::CreateRentalRequest;

use crate::error::CoreError;
use crate::model::{Principal, Reservation, Vehicle};
use crate::pricing::{self, PriceBreakdown, PricingError};

/// Fallback location id when neither the draft nor the vehicle carries
/// one (the platform's seed location).
const DEFAULT_LOCATION_ID: i64 = 1;

fn default_pickup_time() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).expect("valid time")
}

fn default_return_time() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).expect("valid time")
}

/// In-progress, unsubmitted reservation request.
///
/// Date and time-of-day are tracked separately and combined only at
/// submission. The attached breakdown is invalidated by every
/// date-range edit.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub vehicle: Vehicle,
    pub pickup_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub pickup_time: NaiveTime,
    pub return_time: NaiveTime,
    pub pickup_location: String,
    pub return_location: String,
    pub pickup_location_id: Option<i64>,
    pub return_location_id: Option<i64>,
    pub notes: Option<String>,
    pub breakdown: Option<PriceBreakdown>,
}

impl BookingDraft {
    fn for_vehicle(vehicle: Vehicle) -> Self {
        let location_name = vehicle.location_name().unwrap_or_default().to_owned();
        let location_id = vehicle.location.as_ref().map(|l| l.id);
        Self {
            vehicle,
            pickup_date: None,
            return_date: None,
            pickup_time: default_pickup_time(),
            return_time: default_return_time(),
            pickup_location: location_name.clone(),
            return_location: location_name,
            pickup_location_id: location_id,
            return_location_id: location_id,
            notes: None,
            breakdown: None,
        }
    }
}

/// Workflow state. `Succeeded` carries the server-confirmed result.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingState {
    Idle,
    Configuring,
    Previewing,
    Confirming,
    Submitting,
    Succeeded(Reservation),
    Failed { reason: String },
}

impl BookingState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Configuring => "configuring",
            Self::Previewing => "previewing",
            Self::Confirming => "confirming",
            Self::Submitting => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Reasons a confirm transition is refused. The state stays
/// `Configuring` (or wherever it was) and the reason is shown.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfirmBlocked {
    #[error("pickup and return dates must both be set")]
    MissingDates,

    #[error("pickup date {pickup} is in the past")]
    PickupInPast { pickup: NaiveDate },

    #[error("return date must be after the pickup date")]
    ReturnNotAfterPickup,

    #[error("no price preview is attached yet")]
    NoPricing,

    #[error("the price preview is still being computed")]
    PreviewInFlight,

    #[error("cannot confirm from state '{state}'")]
    WrongState { state: String },
}

/// State machine for a single booking attempt.
pub struct BookingFlow {
    state: BookingState,
    draft: Option<BookingDraft>,
    /// Bumped on every date-range edit; a preview result is applied
    /// only if its generation still matches (last-edit-wins).
    preview_generation: u64,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            state: BookingState::Idle,
            draft: None,
            preview_generation: 0,
        }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn draft(&self) -> Option<&BookingDraft> {
        self.draft.as_ref()
    }

    // ── Configuring ──────────────────────────────────────────────────

    /// Open the booking dialog for a vehicle: `Idle -> Configuring`.
    ///
    /// Pickup/return locations default to the vehicle's current
    /// location; times default to 10:00 / 18:00.
    pub fn begin(&mut self, vehicle: Vehicle) -> Result<(), CoreError> {
        if self.state != BookingState::Idle {
            return Err(CoreError::ValidationFailed {
                message: format!("a booking attempt is already {}", self.state.name()),
            });
        }
        debug!(vehicle_id = vehicle.id, "booking flow opened");
        self.draft = Some(BookingDraft::for_vehicle(vehicle));
        self.state = BookingState::Configuring;
        Ok(())
    }

    /// Edit the date range. Invalidates the attached breakdown, bumps
    /// the preview generation, and moves to `Previewing`. Returns the
    /// generation to pass back into [`apply_preview`](Self::apply_preview).
    pub fn set_dates(
        &mut self,
        pickup: NaiveDate,
        ret: NaiveDate,
    ) -> Result<u64, CoreError> {
        let draft = self.editable_draft()?;
        draft.pickup_date = Some(pickup);
        draft.return_date = Some(ret);
        draft.breakdown = None;

        self.preview_generation += 1;
        self.state = BookingState::Previewing;
        Ok(self.preview_generation)
    }

    /// Edit pickup/return time-of-day. Does not touch pricing: the
    /// estimate is date-based.
    pub fn set_times(
        &mut self,
        pickup_time: NaiveTime,
        return_time: NaiveTime,
    ) -> Result<(), CoreError> {
        let draft = self.editable_draft()?;
        draft.pickup_time = pickup_time;
        draft.return_time = return_time;
        Ok(())
    }

    pub fn set_pickup_location(
        &mut self,
        name: impl Into<String>,
        id: Option<i64>,
    ) -> Result<(), CoreError> {
        let draft = self.editable_draft()?;
        draft.pickup_location = name.into();
        if id.is_some() {
            draft.pickup_location_id = id;
        }
        Ok(())
    }

    pub fn set_return_location(
        &mut self,
        name: impl Into<String>,
        id: Option<i64>,
    ) -> Result<(), CoreError> {
        let draft = self.editable_draft()?;
        draft.return_location = name.into();
        if id.is_some() {
            draft.return_location_id = id;
        }
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>) -> Result<(), CoreError> {
        let draft = self.editable_draft()?;
        draft.notes = notes;
        Ok(())
    }

    // ── Previewing ───────────────────────────────────────────────────

    /// Attach a computed preview, if it is still current.
    ///
    /// Returns `false` (and discards the breakdown) when a newer edit
    /// superseded the request that produced it. On success the state
    /// returns to `Configuring` -- `Previewing` is not a resting state.
    pub fn apply_preview(&mut self, generation: u64, breakdown: PriceBreakdown) -> bool {
        if generation != self.preview_generation {
            debug!(generation, current = self.preview_generation, "stale preview discarded");
            return false;
        }
        if let Some(draft) = self.draft.as_mut() {
            draft.breakdown = Some(breakdown);
        }
        if self.state == BookingState::Previewing {
            self.state = BookingState::Configuring;
        }
        true
    }

    /// Record that the current preview attempt ended without a result
    /// (terminal input error). The state returns to `Configuring` so
    /// the user can fix the dates.
    pub fn abort_preview(&mut self, generation: u64) {
        if generation == self.preview_generation && self.state == BookingState::Previewing {
            self.state = BookingState::Configuring;
        }
    }

    /// Run the estimator for the current draft and attach the result.
    ///
    /// Convenience wrapper used by sequential consumers (the CLI): the
    /// generation bookkeeping still applies, so a caller interleaving
    /// edits gets last-edit-wins behavior for free.
    pub async fn refresh_preview(&mut self, client: &ApiClient) -> Result<(), PricingError> {
        let (vehicle_id, rate, pickup, ret) = {
            let Some(draft) = self.draft.as_ref() else {
                return Ok(());
            };
            let (Some(pickup), Some(ret)) = (draft.pickup_date, draft.return_date) else {
                return Ok(());
            };
            (draft.vehicle.id, draft.vehicle.daily_rate, pickup, ret)
        };

        if self.state == BookingState::Configuring {
            self.preview_generation += 1;
            self.state = BookingState::Previewing;
        }
        let generation = self.preview_generation;

        match pricing::quote(client, vehicle_id, rate, pickup, ret).await {
            Ok(breakdown) => {
                self.apply_preview(generation, breakdown);
                Ok(())
            }
            Err(err) => {
                self.abort_preview(generation);
                Err(err)
            }
        }
    }

    // ── Confirming ───────────────────────────────────────────────────

    /// `Configuring -> Confirming`, if every precondition holds.
    ///
    /// `today` is supplied by the caller so the boundary rule
    /// (pickup >= today) stays clock-free and testable.
    pub fn confirm(&mut self, today: NaiveDate) -> Result<(), ConfirmBlocked> {
        match self.state {
            BookingState::Configuring => {}
            BookingState::Previewing => return Err(ConfirmBlocked::PreviewInFlight),
            _ => {
                return Err(ConfirmBlocked::WrongState {
                    state: self.state.name().to_owned(),
                });
            }
        }

        let Some(draft) = self.draft.as_ref() else {
            return Err(ConfirmBlocked::WrongState {
                state: self.state.name().to_owned(),
            });
        };

        let (Some(pickup), Some(ret)) = (draft.pickup_date, draft.return_date) else {
            return Err(ConfirmBlocked::MissingDates);
        };
        if pickup < today {
            return Err(ConfirmBlocked::PickupInPast { pickup });
        }
        if ret <= pickup {
            return Err(ConfirmBlocked::ReturnNotAfterPickup);
        }
        if draft.breakdown.is_none() {
            return Err(ConfirmBlocked::NoPricing);
        }

        self.state = BookingState::Confirming;
        Ok(())
    }

    // ── Submitting ───────────────────────────────────────────────────

    /// `Confirming -> Submitting -> Succeeded | Failed`.
    ///
    /// Combines date + time into full timestamps, checks availability,
    /// and only then creates the reservation. Remote failures land in
    /// the terminal `Failed` state (with the server's message when one
    /// is supplied), never in an `Err` -- the caller always gets a
    /// state to render, and `retry()` leads back to `Configuring`.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        customer: &Principal,
    ) -> Result<&BookingState, CoreError> {
        if self.state != BookingState::Confirming {
            return Err(CoreError::ValidationFailed {
                message: format!("cannot submit from state '{}'", self.state.name()),
            });
        }
        let Some(draft) = self.draft.clone() else {
            return Err(CoreError::Internal("confirming without a draft".into()));
        };
        let (Some(pickup_date), Some(return_date)) = (draft.pickup_date, draft.return_date) else {
            return Err(CoreError::Internal("confirming without dates".into()));
        };

        self.state = BookingState::Submitting;

        let pickup = pickup_date.and_time(draft.pickup_time);
        let return_at = return_date.and_time(draft.return_time);

        // 1. Availability gate -- creation is never attempted when this
        //    says no (or cannot be reached).
        match client
            .is_vehicle_available(draft.vehicle.id, pickup, return_at)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(vehicle_id = draft.vehicle.id, "vehicle unavailable for range");
                self.state = BookingState::Failed {
                    reason: "vehicle not available for requested range".into(),
                };
                return Ok(&self.state);
            }
            Err(err) => {
                self.state = BookingState::Failed {
                    reason: CoreError::from(err).to_string(),
                };
                return Ok(&self.state);
            }
        }

        // 2. Reservation creation.
        let request = CreateRentalRequest {
            customer_id: customer.user_id,
            vehicle_id: draft.vehicle.id,
            pickup_location_id: draft
                .pickup_location_id
                .unwrap_or(DEFAULT_LOCATION_ID),
            return_location_id: draft
                .return_location_id
                .unwrap_or(DEFAULT_LOCATION_ID),
            planned_pickup_date: pickup,
            planned_return_date: return_at,
            created_by: customer.user_id,
        };

        let outcome = match client.create_rental(&request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.state = BookingState::Failed {
                    reason: CoreError::from(err).to_string(),
                };
                return Ok(&self.state);
            }
        };

        if !outcome.succeeded() {
            self.state = BookingState::Failed {
                reason: outcome
                    .error_message
                    .unwrap_or_else(|| "reservation was rejected".into()),
            };
            return Ok(&self.state);
        }

        // Same day-count arithmetic as the estimator: no drift between
        // the preview and the receipt.
        let total_days = pricing::day_count(pickup_date, return_date).unwrap_or(1);
        let confirmed_amount = outcome
            .total_amount
            .or(draft.breakdown.as_ref().map(|b| b.total_price))
            .unwrap_or(0.0);

        let reservation = Reservation {
            rental_id: outcome.rental_id.unwrap_or_default(),
            confirmed_amount,
            pickup,
            return_at,
            total_days,
            vehicle_label: draft.vehicle.label(),
            vehicle_registration: draft.vehicle.registration.clone(),
            customer_name: customer.display_name(),
            pickup_location: draft.pickup_location.clone(),
            return_location: draft.return_location.clone(),
        };

        debug!(rental_id = reservation.rental_id, "reservation confirmed");
        self.state = BookingState::Succeeded(reservation);
        Ok(&self.state)
    }

    // ── Terminal transitions ─────────────────────────────────────────

    /// From `Failed`, back to `Configuring` with every edit preserved.
    pub fn retry(&mut self) -> bool {
        if matches!(self.state, BookingState::Failed { .. }) && self.draft.is_some() {
            self.state = BookingState::Configuring;
            true
        } else {
            false
        }
    }

    /// Dismiss a terminal result: back to `Idle`, draft discarded.
    pub fn dismiss(&mut self) {
        if matches!(
            self.state,
            BookingState::Succeeded(_) | BookingState::Failed { .. }
        ) {
            self.draft = None;
            self.state = BookingState::Idle;
        }
    }

    /// User cancellation. Honored from `Configuring`/`Previewing` only;
    /// there is no mid-flight abort once submission has started.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            BookingState::Configuring | BookingState::Previewing => {
                self.draft = None;
                self.state = BookingState::Idle;
                true
            }
            _ => false,
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn editable_draft(&mut self) -> Result<&mut BookingDraft, CoreError> {
        match self.state {
            BookingState::Configuring | BookingState::Previewing => self
                .draft
                .as_mut()
                .ok_or_else(|| CoreError::Internal("editable state without a draft".into())),
            _ => Err(CoreError::ValidationFailed {
                message: format!("the draft is not editable in state '{}'", self.state.name()),
            }),
        }
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}
