//! Price preview and booking handlers.
//!
//! `quote` is a read-only preview; `book` drives the full workflow:
//! configure -> preview -> confirm -> submit -> receipt.

use owo_colors::OwoColorize;

use rentley_api::ApiClient;
use rentley_core::booking::{BookingFlow, BookingState};
use rentley_core::{PriceBreakdown, SessionStore, Vehicle, pricing};

use crate::cli::{BookArgs, GlobalOpts, QuoteArgs};
use crate::error::CliError;
use crate::output;

use super::{session, util};

// ── Quote ───────────────────────────────────────────────────────────

pub async fn quote(
    client: &ApiClient,
    args: QuoteArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    session::attach_token(client);
    let vehicle = util::fetch_vehicle(client, args.vehicle).await?;

    let breakdown = pricing::quote(client, vehicle.id, vehicle.daily_rate, args.from, args.to)
        .await
        .map_err(|err| CliError::Validation {
            field: "dates".into(),
            reason: err.to_string(),
        })?;

    let out = output::render_single(
        &global.output,
        &breakdown,
        |b| format_breakdown(&vehicle, b),
        |b| format!("{:.2}", b.total_price),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn format_breakdown(vehicle: &Vehicle, b: &PriceBreakdown) -> String {
    let mut lines = vec![
        format!("Vehicle:            {} ({})", vehicle.label(), vehicle.registration),
        format!("Days:               {}", b.total_days),
        format!("Base price:         {}", output::money(b.base_price)),
    ];
    if b.weekend_surcharge > 0.0 {
        lines.push(format!(
            "Weekend surcharge:  +{}",
            output::money(b.weekend_surcharge)
        ));
    }
    if b.seasonal_adjustment != 0.0 {
        let sign = if b.seasonal_adjustment > 0.0 { "+" } else { "" };
        lines.push(format!(
            "Seasonal adj.:      {sign}{}",
            output::money(b.seasonal_adjustment)
        ));
    }
    if b.discount_amount > 0.0 {
        lines.push(format!("Discount:           -{}", output::money(b.discount_amount)));
    }
    lines.push(format!("Tax:                {}", output::money(b.tax_amount)));
    lines.push(format!("Total:              {}", output::money(b.total_price)));
    lines.push(format!(
        "Average per day:    {}",
        output::money(b.average_rate)
    ));
    if b.estimated {
        lines.push("(estimated locally -- server pricing was unavailable)".to_owned());
    }
    lines.join("\n")
}

// ── Book ────────────────────────────────────────────────────────────

pub async fn book(
    client: &ApiClient,
    store: &SessionStore,
    args: BookArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let principal = session::restore(client, store).await?;
    let vehicle = util::fetch_vehicle(client, args.vehicle).await?;

    let mut flow = BookingFlow::new();
    flow.begin(vehicle.clone()).map_err(CliError::from)?;
    flow.set_dates(args.from, args.to)?;

    if args.pickup_time.is_some() || args.return_time.is_some() {
        let (default_pickup, default_return) = match flow.draft() {
            Some(d) => (d.pickup_time, d.return_time),
            None => unreachable!("draft exists after begin"),
        };
        flow.set_times(
            args.pickup_time.unwrap_or(default_pickup),
            args.return_time.unwrap_or(default_return),
        )?;
    }
    if let Some(name) = args.pickup_location {
        flow.set_pickup_location(name, None)?;
    }
    if let Some(name) = args.return_location {
        flow.set_return_location(name, None)?;
    }
    flow.set_notes(args.notes)?;

    // Preview (remote with local fallback).
    let bar = util::spinner("Fetching price preview...", global.quiet);
    let preview_result = flow.refresh_preview(client).await;
    bar.finish_and_clear();
    preview_result.map_err(|err| CliError::Validation {
        field: "dates".into(),
        reason: err.to_string(),
    })?;

    let breakdown = flow
        .draft()
        .and_then(|d| d.breakdown.clone())
        .ok_or_else(|| CliError::ApiError {
            message: "no price preview available".into(),
        })?;

    if !global.quiet {
        eprintln!("{}", format_breakdown(&vehicle, &breakdown));
        eprintln!();
    }

    // User confirmation precedes the controller's own precondition check.
    if !util::confirm(
        &format!(
            "Reserve {} for {} day(s) at {}?",
            vehicle.label(),
            breakdown.total_days,
            output::money(breakdown.total_price)
        ),
        global.yes,
    )? {
        flow.cancel();
        if !global.quiet {
            eprintln!("Booking cancelled");
        }
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    flow.confirm(today).map_err(|err| CliError::Validation {
        field: "booking".into(),
        reason: err.to_string(),
    })?;

    let bar = util::spinner("Submitting reservation...", global.quiet);
    let submit_result = flow.submit(client, &principal).await;
    bar.finish_and_clear();
    let state = submit_result.map_err(CliError::from)?;

    match state {
        BookingState::Succeeded(reservation) => {
            if !global.quiet && output::should_color(&global.color) {
                eprintln!("{}", "✓ Reservation confirmed".green().bold());
            }
            let out = output::render_single(
                &global.output,
                reservation,
                |r| {
                    [
                        format!("Reservation:  #{}", r.rental_id),
                        format!("Vehicle:      {} ({})", r.vehicle_label, r.vehicle_registration),
                        format!("Customer:     {}", r.customer_name),
                        format!("Pickup:       {}  @ {}", r.pickup, r.pickup_location),
                        format!("Return:       {}  @ {}", r.return_at, r.return_location),
                        format!("Days:         {}", r.total_days),
                        format!("Total:        {}", output::money(r.confirmed_amount)),
                    ]
                    .join("\n")
                },
                |r| r.rental_id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
        BookingState::Failed { reason } => Err(CliError::BookingFailed {
            reason: reason.clone(),
        }),
        other => Err(CliError::ApiError {
            message: format!("unexpected workflow state after submit: {other:?}"),
        }),
    }
}
