use bigdecimal::BigDecimal;
use chrono::Utc;
use jewel_backoffice::models::{PurchaseField, RateState};
use jewel_backoffice::service::pricing;
use jewel_backoffice::PurchaseForm;
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn rate(value: i64, error: Option<&str>) -> RateState {
    RateState {
        rate: Some(BigDecimal::from(value)),
        currency: "₹".into(),
        loading: false,
        error: error.map(str::to_string),
        last_updated: Some(Utc::now()),
    }
}

/// 按表单顺序录入: 毛重、成色、损耗、倍率
fn entered(form: &mut PurchaseForm, gross: &str, stamp: &str, wastage: &str, multi: &str) {
    form.apply_edit(PurchaseField::GrossWeight, gross);
    form.apply_edit(PurchaseField::Stamp, stamp);
    form.apply_edit(PurchaseField::Wastage, wastage);
    form.apply_edit(PurchaseField::PurchaseMulti, multi);
}

#[test]
fn hallmark_necklace_end_to_end() {
    let mut form = PurchaseForm::new();
    form.apply_rate(&rate(6000, None));
    entered(&mut form, "10", "91.6", "2", "100");
    assert_eq!(form.value(PurchaseField::FineWeight), "9.360");
    assert_eq!(form.value(PurchaseField::PurchasePrice), "56160.00");

    form.apply_edit(PurchaseField::Discount, "5");
    assert_eq!(form.value(PurchaseField::PurchasePrice), "53352.00");

    form.apply_edit(PurchaseField::RawMaterial, "500");
    assert_eq!(form.value(PurchaseField::PurchasePrice), "53852.00");

    // 清空可选字段后回到基价
    form.apply_edit(PurchaseField::Discount, "");
    form.apply_edit(PurchaseField::RawMaterial, "");
    assert_eq!(form.value(PurchaseField::PurchasePrice), "56160.00");
}

#[test]
fn fine_weight_matches_closed_form() {
    let cases = [
        ("10", "91.6", "2"),
        ("4.25", "75", "3.5"),
        ("0.5", "58.5", "0"),
        ("123.456", "99.9", "0.1"),
        ("7", "0", "8"),
    ];
    for (gross, stamp, wastage) in cases {
        let mut form = PurchaseForm::new();
        entered(&mut form, gross, stamp, wastage, "");

        let expected = pricing::round_to(
            &(dec(gross) * (dec(stamp) + dec(wastage)) / BigDecimal::from(100)),
            3,
        );
        assert_eq!(form.derived().fine_weight, Some(expected), "{} {} {}", gross, stamp, wastage);
    }
}

#[test]
fn purchase_price_matches_closed_form() {
    let cases = [
        ("9.36", 6000, "100", "0", "0"),
        ("9.36", 6000, "100", "5", "500"),
        ("2.14", 68500, "92.5", "1.5", "0"),
        ("0.617", 56263, "110", "0", "1250.75"),
    ];
    for (fine, rate_value, multi, discount, raw) in cases {
        let price = pricing::purchase_price(
            &dec(fine),
            &BigDecimal::from(rate_value),
            &dec(multi),
            &dec(discount),
            &dec(raw),
        )
        .unwrap();

        let hundred = BigDecimal::from(100);
        let base = dec(fine) * BigDecimal::from(rate_value) * dec(multi) / hundred.clone();
        let expected = base.clone() - base * dec(discount) / hundred + dec(raw);
        assert_eq!(price, pricing::round_to(&expected, 2), "{}", fine);
    }
}

#[test]
fn boundaries_keep_prior_values() {
    let mut form = PurchaseForm::new();
    form.apply_rate(&rate(6000, None));
    entered(&mut form, "10", "91.6", "2", "100");

    form.apply_edit(PurchaseField::GrossWeight, "0");
    assert_eq!(form.value(PurchaseField::FineWeight), "9.360");

    form.apply_edit(PurchaseField::PurchaseMulti, "0");
    assert_eq!(form.value(PurchaseField::PurchasePrice), "56160.00");
}

#[test]
fn fallback_rate_fills_form_without_error_state() {
    let mut form = PurchaseForm::new();
    entered(&mut form, "10", "91.6", "2", "100");
    assert!(form.derived().purchase_price.is_none());

    assert!(form.apply_rate(&rate(68500, Some("Using approximate rate"))));
    assert_eq!(form.input().todays_rate, "68500");
    assert_eq!(form.rate_advisory(), Some("Using approximate rate"));
    assert_eq!(form.value(PurchaseField::PurchasePrice), "641160.00");
}

#[test]
fn independent_forms_do_not_share_state() {
    let mut first = PurchaseForm::new();
    let mut second = PurchaseForm::new();
    first.apply_rate(&rate(6000, None));
    entered(&mut first, "10", "91.6", "2", "100");

    assert!(second.derived().fine_weight.is_none());
    assert!(second.input().gross_weight.is_empty());
    second.apply_rate(&rate(7000, None));
    assert_eq!(first.input().todays_rate, "6000");
}
