use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;

/// 纯重保留 3 位小数
pub const FINE_WEIGHT_SCALE: i64 = 3;
/// 采购价保留 2 位小数
pub const PRICE_SCALE: i64 = 2;

/// 数字输入过滤: 空串, 或只含数字且至多一个小数点
pub fn is_numeric_text(text: &str) -> bool {
    let mut seen_dot = false;
    for c in text.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

/// 解析十进制文本; 空串、"." 或任何无法解析的内容都按 0 处理
pub fn parse_decimal(text: &str) -> BigDecimal {
    let text = text.trim();
    let normalized = match text {
        "" | "." => return BigDecimal::zero(),
        t if t.ends_with('.') => &t[..t.len() - 1],
        t => t,
    };
    let normalized = if normalized.starts_with('.') {
        format!("0{}", normalized)
    } else {
        normalized.to_string()
    };
    BigDecimal::from_str(&normalized).unwrap_or_else(|_| BigDecimal::zero())
}

/// 四舍五入到指定小数位, 并固定显示位数
pub fn round_to(value: &BigDecimal, scale: i64) -> BigDecimal {
    value.round(scale).with_scale(scale)
}

fn percent(value: &BigDecimal) -> BigDecimal {
    value.clone() / BigDecimal::from(100)
}

/// 纯重 = 毛重 * (成色% + 损耗%)
///
/// 仅当毛重 > 0 且结果 > 0 时返回; 否则返回 None, 调用方保留旧值。
pub fn fine_weight(
    gross_weight: &BigDecimal,
    stamp_percent: &BigDecimal,
    wastage_percent: &BigDecimal,
) -> Option<BigDecimal> {
    let zero = BigDecimal::zero();
    if *gross_weight <= zero {
        return None;
    }

    let value = gross_weight * (percent(stamp_percent) + percent(wastage_percent));
    if value > zero {
        Some(round_to(&value, FINE_WEIGHT_SCALE))
    } else {
        None
    }
}

/// 采购价:
/// 1. 基价 = 纯重 * 今日金价 * 采购倍率%
/// 2. 折扣 > 0 时扣减 基价 * 折扣%
/// 3. 原料成本 > 0 时加上原料成本
///
/// 纯重、金价、倍率任一不为正, 或结果不为正时返回 None。
pub fn purchase_price(
    fine_weight: &BigDecimal,
    todays_rate: &BigDecimal,
    multiplier_percent: &BigDecimal,
    discount_percent: &BigDecimal,
    raw_material_cost: &BigDecimal,
) -> Option<BigDecimal> {
    let zero = BigDecimal::zero();
    if *fine_weight <= zero || *todays_rate <= zero || *multiplier_percent <= zero {
        return None;
    }

    let mut value = fine_weight * todays_rate * percent(multiplier_percent);
    if *discount_percent > zero {
        let discount = &value * percent(discount_percent);
        value = &value - &discount;
    }
    if *raw_material_cost > zero {
        value = &value + raw_material_cost;
    }

    if value > zero {
        Some(round_to(&value, PRICE_SCALE))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn numeric_filter_accepts_digits_and_single_dot() {
        for ok in ["", "0", "12", "12.5", ".5", "5.", "."] {
            assert!(is_numeric_text(ok), "{:?}", ok);
        }
        for bad in ["1.2.3", "-1", "1e3", "12a", " 1", "1,000"] {
            assert!(!is_numeric_text(bad), "{:?}", bad);
        }
    }

    #[test]
    fn parse_treats_empty_and_garbage_as_zero() {
        assert_eq!(parse_decimal(""), BigDecimal::zero());
        assert_eq!(parse_decimal("."), BigDecimal::zero());
        assert_eq!(parse_decimal("abc"), BigDecimal::zero());
        assert_eq!(parse_decimal("5."), dec("5"));
        assert_eq!(parse_decimal(".25"), dec("0.25"));
        assert_eq!(parse_decimal("91.6"), dec("91.6"));
    }

    #[test]
    fn fine_weight_from_stamp_and_wastage() {
        let fw = fine_weight(&dec("10"), &dec("91.6"), &dec("2")).unwrap();
        assert_eq!(fw, dec("9.36"));
        assert_eq!(fw.to_string(), "9.360");
    }

    #[test]
    fn fine_weight_rounds_to_three_places() {
        // 1.2345 * 0.5 = 0.61725
        let fw = fine_weight(&dec("1.2345"), &dec("50"), &dec("0")).unwrap();
        assert_eq!(fw.to_string(), "0.617");
    }

    #[test]
    fn fine_weight_needs_positive_gross_and_result() {
        assert!(fine_weight(&dec("0"), &dec("91.6"), &dec("2")).is_none());
        assert!(fine_weight(&dec("10"), &dec("0"), &dec("0")).is_none());
    }

    #[test]
    fn purchase_price_base_discount_and_raw_material() {
        let fw = dec("9.36");
        let rate = dec("6000");
        let multi = dec("100");
        let zero = BigDecimal::zero();

        let base = purchase_price(&fw, &rate, &multi, &zero, &zero).unwrap();
        assert_eq!(base.to_string(), "56160.00");

        let discounted = purchase_price(&fw, &rate, &multi, &dec("5"), &zero).unwrap();
        assert_eq!(discounted, dec("53352"));

        let with_raw = purchase_price(&fw, &rate, &multi, &dec("5"), &dec("500")).unwrap();
        assert_eq!(with_raw, dec("53852"));
    }

    #[test]
    fn purchase_price_requires_all_factors() {
        let zero = BigDecimal::zero();
        assert!(purchase_price(&zero, &dec("6000"), &dec("100"), &zero, &zero).is_none());
        assert!(purchase_price(&dec("9.36"), &zero, &dec("100"), &zero, &zero).is_none());
        assert!(purchase_price(&dec("9.36"), &dec("6000"), &zero, &zero, &zero).is_none());
    }

    #[test]
    fn full_discount_yields_no_price() {
        let zero = BigDecimal::zero();
        assert!(purchase_price(&dec("1"), &dec("100"), &dec("100"), &dec("100"), &zero).is_none());
    }

    #[test]
    fn repeated_computation_is_stable() {
        let a = fine_weight(&dec("7.77"), &dec("75"), &dec("3.5")).unwrap();
        let b = fine_weight(&dec("7.77"), &dec("75"), &dec("3.5")).unwrap();
        assert_eq!(a, b);
        let pa = purchase_price(&a, &dec("68500"), &dec("98"), &dec("1.5"), &dec("250")).unwrap();
        let pb = purchase_price(&b, &dec("68500"), &dec("98"), &dec("1.5"), &dec("250")).unwrap();
        assert_eq!(pa, pb);
    }
}
