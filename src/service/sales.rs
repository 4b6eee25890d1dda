use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{sale_total, CatalogItem, NewSale, PaymentMethod, Sale, SaleLine};
use crate::store::SalesStore;

/// 正在录入的销售单: 逐行添加目录商品, 可按商品移除
#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    pub customer: String,
    pub payment_method: PaymentMethod,
    lines: Vec<SaleLine>,
}

impl SaleDraft {
    pub fn new(customer: impl Into<String>, payment_method: PaymentMethod) -> Self {
        Self {
            customer: customer.into(),
            payment_method,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    /// 数量为 0 时不添加
    pub fn add_item(&mut self, item: &CatalogItem, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        self.lines.push(item.line(quantity));
        true
    }

    /// 移除该商品的所有明细行, 返回移除的行数
    pub fn remove_item(&mut self, item_id: u64) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);
        before - self.lines.len()
    }

    pub fn total(&self) -> BigDecimal {
        sale_total(&self.lines)
    }

    /// 客户名和至少一行明细都有才可创建
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.customer.trim().is_empty() {
            missing.push("customer".to_string());
        }
        if self.lines.is_empty() {
            missing.push("items".to_string());
        }
        missing
    }
}

/// 按目录解析请求中的明细; 未知商品或数量为 0 的行记为不合格
pub fn draft_from_request(store: &SalesStore, request: NewSale) -> Result<SaleDraft, AppError> {
    let mut draft = SaleDraft::new(request.customer, request.payment_method);
    let mut invalid = Vec::new();

    for (index, line) in request.items.iter().enumerate() {
        match store.catalog_item(line.item_id) {
            Some(item) => {
                if !draft.add_item(item, line.quantity) {
                    invalid.push(format!("items[{}].quantity", index));
                }
            }
            None => invalid.push(format!("items[{}].item_id", index)),
        }
    }

    if invalid.is_empty() {
        invalid = draft.missing_fields();
    }
    if !invalid.is_empty() {
        return Err(AppError::Validation(invalid));
    }
    Ok(draft)
}

/// 校验并记录销售单
pub async fn create_sale(store: &SalesStore, request: NewSale, today: NaiveDate) -> Result<Sale, AppError> {
    let draft = draft_from_request(store, request)?;
    let sale = store
        .record(
            draft.customer.trim().to_string(),
            draft.payment_method,
            draft.lines,
            today,
        )
        .await;
    Ok(sale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SaleLineRequest;

    fn catalog_item(id: u64, name: &str, price: i64) -> CatalogItem {
        CatalogItem {
            id,
            name: name.into(),
            price: BigDecimal::from(price),
        }
    }

    fn request(customer: &str, items: &[(u64, u32)]) -> NewSale {
        NewSale {
            customer: customer.into(),
            payment_method: PaymentMethod::BankTransfer,
            items: items
                .iter()
                .map(|&(item_id, quantity)| SaleLineRequest { item_id, quantity })
                .collect(),
        }
    }

    #[test]
    fn draft_adds_and_removes_lines() {
        let ring = catalog_item(1, "Gold Ring", 32500);
        let chain = catalog_item(3, "Gold Chain", 28000);
        let mut draft = SaleDraft::new("Meera", PaymentMethod::Cash);

        assert!(draft.add_item(&ring, 2));
        assert!(draft.add_item(&chain, 1));
        assert!(draft.add_item(&ring, 1));
        assert!(!draft.add_item(&chain, 0));
        assert_eq!(draft.total(), BigDecimal::from(125500));

        assert_eq!(draft.remove_item(1), 2);
        assert_eq!(draft.remove_item(99), 0);
        assert_eq!(draft.total(), BigDecimal::from(28000));
        assert!(draft.missing_fields().is_empty());
    }

    #[test]
    fn empty_draft_reports_missing_fields() {
        let draft = SaleDraft::new("  ", PaymentMethod::Cash);
        assert_eq!(draft.missing_fields(), vec!["customer", "items"]);
    }

    #[tokio::test]
    async fn create_sale_prices_from_catalog() {
        let store = SalesStore::seeded();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let sale = create_sale(&store, request(" Meera Iyer ", &[(2, 1), (4, 2)]), today)
            .await
            .unwrap();

        assert_eq!(sale.id, "INV-005");
        assert_eq!(sale.customer, "Meera Iyer");
        assert_eq!(sale.date, today);
        assert_eq!(sale.total, BigDecimal::from(70000));
        assert_eq!(sale.items[1].name, "Pearl Earrings");
    }

    #[tokio::test]
    async fn create_sale_rejects_unknown_items_and_zero_quantity() {
        let store = SalesStore::seeded();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let err = create_sale(&store, request("Meera", &[(42, 1), (1, 0)]), today)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: items[0].item_id, items[1].quantity"
        );

        let err = create_sale(&store, request("", &[]), today).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: customer, items");
        assert_eq!(store.len().await, 4);
    }
}
