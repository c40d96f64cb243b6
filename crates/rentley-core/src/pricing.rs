// ── Pricing estimation ──
//
// Price preview for a vehicle + date range. The remote breakdown is
// authoritative; when it cannot be obtained the local fallback computes
// a conservative estimate (no seasonal adjustment, no discount -- the
// fallback never applies a modifier it cannot verify). Both paths are
// plain functions returning `Result`, so each is testable on its own.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use rentley_api::ApiClient;
use rentley_api::types::BreakdownDto;

/// Surcharge applied per weekend day, as a fraction of the daily rate.
pub const WEEKEND_SURCHARGE_RATE: f64 = 0.20;

/// Tax rate applied by the local fallback on the pre-tax subtotal.
pub const FALLBACK_TAX_RATE: f64 = 0.18;

/// Tax share assumed when the remote total does not separate tax.
pub const REMOTE_TAX_ESTIMATE_RATE: f64 = 0.15;

/// Terminal input errors. No breakdown may be displayed when raised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("invalid date range: return ({end}) must be after pickup ({start})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid daily rate: {rate}")]
    InvalidRate { rate: f64 },
}

/// Itemized price estimate for a date range.
///
/// Ephemeral: recomputed whenever the vehicle or date range changes,
/// discarded once a booking is confirmed or abandoned.
/// Invariant: `total = base + weekend + seasonal - discount + tax`,
/// tax computed on the pre-tax subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub weekend_surcharge: f64,
    pub seasonal_adjustment: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total_price: f64,
    pub total_days: i64,
    pub average_rate: f64,
    /// `true` when the local fallback produced this preview; it is a
    /// best-effort estimate, not the authoritative server price.
    pub estimated: bool,
}

/// Whole days between pickup and return, always >= 1.
pub fn day_count(pickup: NaiveDate, ret: NaiveDate) -> Result<i64, PricingError> {
    if ret <= pickup {
        return Err(PricingError::InvalidRange {
            start: pickup,
            end: ret,
        });
    }
    Ok((ret - pickup).num_days())
}

/// Saturdays and Sundays in `[pickup, ret)` -- the rented nights.
pub fn weekend_days(pickup: NaiveDate, ret: NaiveDate) -> i64 {
    let mut count = 0;
    let mut day = pickup;
    while day < ret {
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        day = day
            .checked_add_days(Days::new(1))
            .unwrap_or(ret);
    }
    count
}

/// Local fallback computation.
pub fn estimate_local(
    daily_rate: f64,
    pickup: NaiveDate,
    ret: NaiveDate,
) -> Result<PriceBreakdown, PricingError> {
    if daily_rate <= 0.0 {
        return Err(PricingError::InvalidRate { rate: daily_rate });
    }
    let days = day_count(pickup, ret)?;

    #[allow(clippy::cast_precision_loss)]
    let base_price = daily_rate * days as f64;
    #[allow(clippy::cast_precision_loss)]
    let weekend_surcharge = weekend_days(pickup, ret) as f64 * daily_rate * WEEKEND_SURCHARGE_RATE;

    let subtotal = base_price + weekend_surcharge;
    let tax_amount = subtotal * FALLBACK_TAX_RATE;
    let total_price = subtotal + tax_amount;

    #[allow(clippy::cast_precision_loss)]
    let average_rate = total_price / days as f64;

    Ok(PriceBreakdown {
        base_price,
        weekend_surcharge,
        seasonal_adjustment: 0.0,
        discount_amount: 0.0,
        tax_amount,
        total_price,
        total_days: days,
        average_rate,
        estimated: true,
    })
}

/// Normalize a remote breakdown into the canonical shape.
///
/// The remote response comes in two shapes: fully itemized, or just the
/// raw inputs (`baseRate`, `totalDays`, `weekendDays`, `totalPrice`).
/// Missing itemization defaults to zero; missing tax is estimated as
/// 15% of the remote total.
pub fn from_remote(dto: &BreakdownDto, local_days: i64) -> PriceBreakdown {
    let total_days = dto.total_days.unwrap_or(local_days);
    let total_price = dto.total_price.unwrap_or(0.0);

    #[allow(clippy::cast_precision_loss)]
    let base_price = dto.base_price.unwrap_or_else(|| {
        dto.base_rate.unwrap_or(0.0) * total_days as f64
    });

    #[allow(clippy::cast_precision_loss)]
    let weekend_surcharge = dto.weekend_surcharge.unwrap_or_else(|| {
        dto.weekend_days.unwrap_or(0) as f64 * dto.base_rate.unwrap_or(0.0) * WEEKEND_SURCHARGE_RATE
    });

    let tax_amount = dto
        .tax_amount
        .unwrap_or(total_price * REMOTE_TAX_ESTIMATE_RATE);

    #[allow(clippy::cast_precision_loss)]
    let average_rate = dto.average_rate.unwrap_or(if total_days > 0 {
        total_price / total_days as f64
    } else {
        0.0
    });

    PriceBreakdown {
        base_price,
        weekend_surcharge,
        seasonal_adjustment: dto.seasonal_adjustment.unwrap_or(0.0),
        discount_amount: dto.discount_amount.unwrap_or(0.0),
        tax_amount,
        total_price,
        total_days,
        average_rate,
        estimated: false,
    }
}

/// Produce a price preview, preferring the authoritative remote path.
///
/// Input validation errors are terminal. A remote failure of any kind
/// (network, non-2xx, malformed payload) falls back to the local
/// estimate -- the fallback is the retry-equivalent; there is no
/// network retry loop.
pub async fn quote(
    client: &ApiClient,
    vehicle_id: i64,
    daily_rate: f64,
    pickup: NaiveDate,
    ret: NaiveDate,
) -> Result<PriceBreakdown, PricingError> {
    if daily_rate <= 0.0 {
        return Err(PricingError::InvalidRate { rate: daily_rate });
    }
    let days = day_count(pickup, ret)?;

    match client.pricing_breakdown(vehicle_id, pickup, ret).await {
        Ok(dto) => Ok(from_remote(&dto, days)),
        Err(err) => {
            debug!(vehicle_id, error = %err, "remote pricing unavailable, using local estimate");
            estimate_local(daily_rate, pickup, ret)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rentley_api::TransportConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EPS: f64 = 1e-9;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    // ── Day counting ─────────────────────────────────────────────────

    #[test]
    fn day_count_is_whole_days() {
        assert_eq!(day_count(date(2026, 9, 7), date(2026, 9, 9)).unwrap(), 2);
        assert_eq!(day_count(date(2026, 9, 7), date(2026, 9, 8)).unwrap(), 1);
    }

    #[test]
    fn return_equal_to_pickup_is_rejected() {
        let d = date(2026, 9, 7);
        assert_eq!(
            day_count(d, d),
            Err(PricingError::InvalidRange { start: d, end: d })
        );
    }

    #[test]
    fn return_before_pickup_is_rejected() {
        assert!(day_count(date(2026, 9, 9), date(2026, 9, 7)).is_err());
    }

    // ── Weekend scanning ─────────────────────────────────────────────

    #[test]
    fn weekday_only_range_has_no_weekend_days() {
        // Monday through Friday, return exclusive.
        assert_eq!(weekend_days(date(2026, 9, 7), date(2026, 9, 11)), 0);
    }

    #[test]
    fn friday_to_monday_spans_both_weekend_days() {
        assert_eq!(weekend_days(date(2026, 9, 4), date(2026, 9, 7)), 2);
    }

    #[test]
    fn return_day_is_excluded_from_the_scan() {
        // Friday -> Saturday: only Friday night is rented.
        assert_eq!(weekend_days(date(2026, 9, 4), date(2026, 9, 5)), 0);
    }

    // ── Fallback scenarios ───────────────────────────────────────────

    #[test]
    fn monday_to_wednesday_at_100() {
        // 2 days, no weekend.
        let b = estimate_local(100.0, date(2026, 9, 7), date(2026, 9, 9)).unwrap();
        assert_eq!(b.total_days, 2);
        assert_close(b.base_price, 200.0);
        assert_close(b.weekend_surcharge, 0.0);
        assert_close(b.tax_amount, 36.0);
        assert_close(b.total_price, 236.0);
        assert!(b.estimated);
    }

    #[test]
    fn friday_to_monday_at_100() {
        // 3 days spanning Saturday and Sunday.
        let b = estimate_local(100.0, date(2026, 9, 4), date(2026, 9, 7)).unwrap();
        assert_eq!(b.total_days, 3);
        assert_close(b.base_price, 300.0);
        assert_close(b.weekend_surcharge, 40.0);
        assert_close(b.tax_amount, 61.2);
        assert_close(b.total_price, 401.2);
    }

    #[test]
    fn fallback_identity_holds_across_inputs() {
        let rates = [1.0, 42.5, 100.0, 999.99];
        let ranges = [
            (date(2026, 9, 7), date(2026, 9, 9)),
            (date(2026, 9, 4), date(2026, 9, 7)),
            (date(2026, 12, 28), date(2027, 1, 11)),
        ];
        for rate in rates {
            for (pickup, ret) in ranges {
                let b = estimate_local(rate, pickup, ret).unwrap();
                assert_close(
                    b.total_price,
                    b.base_price + b.weekend_surcharge + b.tax_amount,
                );
                #[allow(clippy::cast_precision_loss)]
                let avg = b.total_price / b.total_days as f64;
                assert_close(b.average_rate, avg);
            }
        }
    }

    #[test]
    fn fallback_never_applies_seasonal_or_discount() {
        let b = estimate_local(100.0, date(2026, 7, 1), date(2026, 7, 15)).unwrap();
        assert_close(b.seasonal_adjustment, 0.0);
        assert_close(b.discount_amount, 0.0);
    }

    #[test]
    fn zero_and_negative_rates_are_rejected() {
        let pickup = date(2026, 9, 7);
        let ret = date(2026, 9, 9);
        assert!(matches!(
            estimate_local(0.0, pickup, ret),
            Err(PricingError::InvalidRate { .. })
        ));
        assert!(matches!(
            estimate_local(-5.0, pickup, ret),
            Err(PricingError::InvalidRate { .. })
        ));
    }

    // ── Remote normalization ─────────────────────────────────────────

    #[test]
    fn itemized_remote_shape_passes_through() {
        let dto = BreakdownDto {
            base_price: Some(200.0),
            weekend_surcharge: Some(0.0),
            tax_amount: Some(43.2),
            total_price: Some(283.2),
            total_days: Some(2),
            average_rate: Some(141.6),
            ..BreakdownDto::default()
        };
        let b = from_remote(&dto, 2);
        assert_close(b.base_price, 200.0);
        assert_close(b.tax_amount, 43.2);
        assert!(!b.estimated);
    }

    #[test]
    fn raw_remote_shape_is_derived() {
        let dto = BreakdownDto {
            base_rate: Some(100.0),
            total_days: Some(3),
            weekend_days: Some(2),
            total_price: Some(401.2),
            ..BreakdownDto::default()
        };
        let b = from_remote(&dto, 3);
        assert_close(b.base_price, 300.0);
        assert_close(b.weekend_surcharge, 40.0);
        // Tax was not separated: estimated as 15% of the total.
        assert_close(b.tax_amount, 401.2 * 0.15);
    }

    #[test]
    fn missing_remote_fields_default_to_zero() {
        let dto = BreakdownDto::default();
        let b = from_remote(&dto, 4);
        assert_close(b.base_price, 0.0);
        assert_close(b.seasonal_adjustment, 0.0);
        assert_close(b.discount_amount, 0.0);
        assert_eq!(b.total_days, 4);
    }

    // ── Quote orchestration ──────────────────────────────────────────

    async fn client_for(server: &MockServer) -> ApiClient {
        let base = url::Url::parse(&server.uri()).unwrap();
        ApiClient::new(base, &TransportConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn quote_prefers_the_remote_breakdown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pricing/breakdown"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "basePrice": 200.0,
                "weekendSurcharge": 0.0,
                "taxAmount": 30.0,
                "totalPrice": 230.0,
                "totalDays": 2,
                "averageRate": 115.0
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let b = quote(&client, 5, 100.0, date(2026, 9, 7), date(2026, 9, 9))
            .await
            .unwrap();

        assert!(!b.estimated);
        assert_close(b.total_price, 230.0);
    }

    #[tokio::test]
    async fn quote_falls_back_on_remote_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pricing/breakdown"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let b = quote(&client, 5, 100.0, date(2026, 9, 7), date(2026, 9, 9))
            .await
            .unwrap();

        assert!(b.estimated);
        assert_close(b.total_price, 236.0);
    }

    #[tokio::test]
    async fn quote_falls_back_on_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pricing/breakdown"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let b = quote(&client, 5, 100.0, date(2026, 9, 4), date(2026, 9, 7))
            .await
            .unwrap();

        assert!(b.estimated);
        assert_close(b.total_price, 401.2);
    }

    #[tokio::test]
    async fn quote_rejects_bad_inputs_before_any_network_call() {
        // No mock mounted: a request would fail the test through the
        // fallback marker; invalid inputs must error out first.
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        let same_day = date(2026, 9, 7);
        assert!(matches!(
            quote(&client, 5, 100.0, same_day, same_day).await,
            Err(PricingError::InvalidRange { .. })
        ));
        assert!(matches!(
            quote(&client, 5, 0.0, same_day, date(2026, 9, 9)).await,
            Err(PricingError::InvalidRate { .. })
        ));
    }
}
