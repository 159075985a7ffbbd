use crate::domain::promotion::{Promotion, PromotionStatus, RawPromotion, RedemptionType};
use crate::time::timestamp::parse_timestamp;
use chrono::{DateTime, Utc};

/// Whether a promotion is an enabled automatic promotion whose window contains `now`.
///
/// Both window ends are inclusive. A missing or unreadable `start_date` never matches; an empty
/// `end_date` means open-ended, an unreadable one never matches.
pub fn is_active(promo: &RawPromotion, now: DateTime<Utc>) -> bool {
    if promo.status != Some(PromotionStatus::Enabled) {
        return false;
    }
    if promo.redemption_type != Some(RedemptionType::Automatic) {
        return false;
    }

    let Some(starts) = promo.start_date.as_deref().and_then(parse_timestamp) else {
        return false;
    };
    if starts > now {
        return false;
    }

    match promo.end_date.as_deref().filter(|s| !s.trim().is_empty()) {
        None => true,
        Some(end) => parse_timestamp(end).is_some_and(|ends| now <= ends),
    }
}

/// Filters and projects upstream promotions, keeping upstream order.
pub fn select_active(promotions: Vec<RawPromotion>, now: DateTime<Utc>) -> Vec<Promotion> {
    promotions
        .into_iter()
        .filter(|p| is_active(p, now))
        .map(RawPromotion::into_projected)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::{json, Value};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn ts(dt: DateTime<Utc>) -> String {
        dt.to_rfc3339()
    }

    fn promo(id: i64, overrides: Value) -> RawPromotion {
        let mut base = json!({
            "id": id,
            "name": format!("Promo {id}"),
            "status": "ENABLED",
            "redemption_type": "AUTOMATIC",
            "start_date": ts(now() - Duration::days(1)),
            "end_date": null,
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn keeps_enabled_automatic_in_window() {
        let p = promo(1, json!({"end_date": ts(now() + Duration::days(1))}));
        assert!(is_active(&p, now()));
    }

    #[test]
    fn open_ended_when_end_date_absent_or_empty() {
        assert!(is_active(&promo(1, json!({})), now()));
        assert!(is_active(&promo(1, json!({"end_date": ""})), now()));
    }

    #[test]
    fn excludes_disabled_and_coupon_promotions() {
        assert!(!is_active(&promo(1, json!({"status": "DISABLED"})), now()));
        assert!(!is_active(&promo(1, json!({"status": "INVALID"})), now()));
        assert!(!is_active(&promo(1, json!({"redemption_type": "COUPON"})), now()));
    }

    #[test]
    fn excludes_future_start_and_past_end() {
        let future = promo(1, json!({"start_date": ts(now() + Duration::seconds(1))}));
        assert!(!is_active(&future, now()));

        let expired = promo(1, json!({"end_date": ts(now() - Duration::seconds(1))}));
        assert!(!is_active(&expired, now()));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let p = promo(1, json!({"start_date": ts(now()), "end_date": ts(now())}));
        assert!(is_active(&p, now()));
    }

    #[test]
    fn records_missing_name_or_kind_are_skipped_not_fatal() {
        let input: Vec<RawPromotion> = serde_json::from_value(json!([
            {
                "id": 1,
                "name": "Good",
                "status": "ENABLED",
                "redemption_type": "AUTOMATIC",
                "start_date": ts(now() - Duration::days(1)),
            },
            {
                "id": 2,
                "status": "DISABLED",
                "redemption_type": null,
                "start_date": ts(now() - Duration::days(1)),
            },
            {
                "id": 3,
                "name": "No status",
                "status": null,
                "redemption_type": "AUTOMATIC",
                "start_date": ts(now() - Duration::days(1)),
            }
        ]))
        .unwrap();

        let ids: Vec<i64> = select_active(input, now()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn unreadable_dates_exclude() {
        assert!(!is_active(&promo(1, json!({"start_date": null})), now()));
        assert!(!is_active(&promo(1, json!({"start_date": "soon"})), now()));
        assert!(!is_active(&promo(1, json!({"end_date": "never"})), now()));
    }

    #[test]
    fn select_active_preserves_upstream_order() {
        let input = vec![
            promo(3, json!({})),
            promo(9, json!({"status": "DISABLED"})),
            promo(1, json!({})),
            promo(5, json!({"start_date": ts(now() + Duration::days(3))})),
            promo(2, json!({"end_date": ts(now() + Duration::days(3))})),
        ];

        let ids: Vec<i64> = select_active(input, now()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn select_active_is_deterministic_for_fixed_now() {
        let input = vec![promo(1, json!({})), promo(2, json!({"redemption_type": "COUPON"}))];
        let a = select_active(input.clone(), now());
        let b = select_active(input, now());
        assert_eq!(a, b);
    }

    #[test]
    fn yesterday_sale_projects_fully() {
        let yesterday = ts(now() - Duration::days(1));
        let input = vec![promo(1, json!({"name": "Sale", "start_date": yesterday}))];

        let out = serde_json::to_value(select_active(input, now())).unwrap();
        assert_eq!(
            out,
            json!([{
                "id": 1,
                "name": "Sale",
                "label": "Sale",
                "type": "AUTOMATIC",
                "discount": null,
                "start_date": yesterday,
                "end_date": null,
            }])
        );
    }

    #[test]
    fn disabled_only_yields_empty_list() {
        let out = select_active(vec![promo(1, json!({"status": "DISABLED"}))], now());
        assert!(out.is_empty());
        assert_eq!(serde_json::to_string(&out).unwrap(), "[]");
    }
}
