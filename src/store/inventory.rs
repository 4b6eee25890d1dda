use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::str::FromStr;
use tokio::sync::RwLock;

use super::StoreError;
use crate::models::{
    InventoryItem, InventoryPatch, InventoryQuery, NewInventoryItem, Page, SettlementMethod,
    SortDirection, SortField,
};

/// 库存存储 (按插入顺序保存)
#[derive(Debug)]
pub struct InventoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    items: IndexMap<u64, InventoryItem>,
    next_id: u64,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: IndexMap::new(),
                next_id: 1,
            }),
        }
    }

    /// 带演示数据的库存
    pub fn seeded() -> Self {
        let samples = [
            ("trialadd", "Earrings", "vendor2", "2", "2.14", "508220.72"),
            ("Botus LLoom", "Earrings", "ABC Jewels Inc.", "2", "2.16", "12636"),
            ("Pagi check", "Earrings", "vendor2", "5", "5.45", "24525"),
            ("Phone", "Bracelets", "ABC Jewels Inc.", "2", "2.14", "9630"),
            ("trial1", "Earrings", "vendor2", "4", "4.24", "20140"),
        ];

        let mut items = IndexMap::new();
        let mut next_id = 1;
        for (product, category, vendor, gross, fine, price) in samples {
            items.insert(
                next_id,
                InventoryItem {
                    id: next_id,
                    product: product.to_string(),
                    category: category.to_string(),
                    vendor: vendor.to_string(),
                    gross_weight: seed_decimal(gross),
                    fine_weight: seed_decimal(fine),
                    price: seed_decimal(price),
                    quantity: 1,
                    settlement: SettlementMethod::Cash,
                },
            );
            next_id += 1;
        }

        Self {
            inner: RwLock::new(Inner { items, next_id }),
        }
    }

    /// 过滤 -> 排序 -> 分页
    pub async fn list(&self, query: &InventoryQuery) -> Page<InventoryItem> {
        let inner = self.inner.read().await;
        let search = query.search.as_deref().map(str::to_lowercase);

        let mut matched: Vec<InventoryItem> = inner
            .items
            .values()
            .filter(|item| {
                if let Some(term) = &search {
                    if !item.product.to_lowercase().contains(term.as_str()) {
                        return false;
                    }
                }
                if query.category.as_ref().is_some_and(|c| &item.category != c) {
                    return false;
                }
                if query.vendor.as_ref().is_some_and(|v| &item.vendor != v) {
                    return false;
                }
                if query.settlement.is_some_and(|s| item.settlement != s) {
                    return false;
                }
                if query.min_price.as_ref().is_some_and(|min| item.price < *min) {
                    return false;
                }
                if query.max_price.as_ref().is_some_and(|max| item.price > *max) {
                    return false;
                }
                true
            })
            .cloned()
            .collect();
        drop(inner);

        if let Some(field) = query.sort {
            matched.sort_by(|a, b| {
                let ord = compare_by(field, a, b);
                match query.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        paginate(matched, query.page, query.per_page)
    }

    pub async fn get(&self, id: u64) -> Result<InventoryItem, StoreError> {
        self.inner
            .read()
            .await
            .items
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn add(&self, new_item: NewInventoryItem) -> InventoryItem {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let item = InventoryItem {
            id,
            product: new_item.product,
            category: new_item.category,
            vendor: new_item.vendor,
            gross_weight: new_item.gross_weight,
            fine_weight: new_item.fine_weight,
            price: new_item.price,
            quantity: new_item.quantity,
            settlement: new_item.settlement,
        };
        inner.items.insert(id, item.clone());
        tracing::info!("Inventory item {} added: {}", id, item.product);
        item
    }

    pub async fn update(&self, id: u64, patch: InventoryPatch) -> Result<InventoryItem, StoreError> {
        let mut inner = self.inner.write().await;
        let item = inner.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        item.apply(patch);
        tracing::info!("Inventory item {} updated", id);
        Ok(item.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        // shift_remove 保持其余条目的顺序
        match inner.items.shift_remove(&id) {
            Some(_) => {
                tracing::info!("Inventory item {} deleted", id);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// 批量删除, 返回实际删除的数量 (未知 id 忽略)
    pub async fn delete_many(&self, ids: &[u64]) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.items.len();
        inner.items.retain(|id, _| !ids.contains(id));
        let removed = before - inner.items.len();
        tracing::info!("Bulk delete removed {} inventory items", removed);
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }
}

fn seed_decimal(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap_or_else(|_| BigDecimal::zero())
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn settlement_key(s: SettlementMethod) -> &'static str {
    match s {
        SettlementMethod::Cash => "cash",
        SettlementMethod::BankTransfer => "bank_transfer",
        SettlementMethod::Credit => "credit",
        SettlementMethod::Other => "other",
    }
}

/// 数值列按数值比较, 文本列不区分大小写
fn compare_by(field: SortField, a: &InventoryItem, b: &InventoryItem) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Product => compare_text(&a.product, &b.product),
        SortField::Category => compare_text(&a.category, &b.category),
        SortField::Vendor => compare_text(&a.vendor, &b.vendor),
        SortField::GrossWeight => a.gross_weight.cmp(&b.gross_weight),
        SortField::FineWeight => a.fine_weight.cmp(&b.fine_weight),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::Settlement => settlement_key(a.settlement).cmp(settlement_key(b.settlement)),
    }
}

fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn products(page: &Page<InventoryItem>) -> Vec<&str> {
        page.items.iter().map(|i| i.product.as_str()).collect()
    }

    #[tokio::test]
    async fn seeded_lists_in_insertion_order() {
        let store = InventoryStore::seeded();
        let page = store.list(&InventoryQuery::default()).await;
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(
            products(&page),
            vec!["trialadd", "Botus LLoom", "Pagi check", "Phone", "trial1"]
        );
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let store = InventoryStore::seeded();
        let query = InventoryQuery {
            search: Some("TRIAL".into()),
            ..InventoryQuery::default()
        };
        assert_eq!(products(&store.list(&query).await), vec!["trialadd", "trial1"]);
    }

    #[tokio::test]
    async fn filters_combine() {
        let store = InventoryStore::seeded();
        let query = InventoryQuery {
            category: Some("Earrings".into()),
            vendor: Some("vendor2".into()),
            max_price: Some(dec("25000")),
            ..InventoryQuery::default()
        };
        assert_eq!(products(&store.list(&query).await), vec!["Pagi check", "trial1"]);

        let query = InventoryQuery {
            min_price: Some(dec("12636")),
            max_price: Some(dec("20140")),
            ..InventoryQuery::default()
        };
        assert_eq!(products(&store.list(&query).await), vec!["Botus LLoom", "trial1"]);

        let query = InventoryQuery {
            settlement: Some(SettlementMethod::Credit),
            ..InventoryQuery::default()
        };
        assert_eq!(store.list(&query).await.total, 0);
    }

    #[tokio::test]
    async fn sorts_numeric_and_text_columns() {
        let store = InventoryStore::seeded();
        let query = InventoryQuery {
            sort: Some(SortField::Price),
            direction: SortDirection::Desc,
            ..InventoryQuery::default()
        };
        assert_eq!(
            products(&store.list(&query).await),
            vec!["trialadd", "Pagi check", "trial1", "Botus LLoom", "Phone"]
        );

        let query = InventoryQuery {
            sort: Some(SortField::Product),
            ..InventoryQuery::default()
        };
        assert_eq!(
            products(&store.list(&query).await),
            vec!["Botus LLoom", "Pagi check", "Phone", "trial1", "trialadd"]
        );
    }

    #[tokio::test]
    async fn pages_are_clamped() {
        let store = InventoryStore::seeded();
        let query = InventoryQuery {
            per_page: 2,
            page: 3,
            ..InventoryQuery::default()
        };
        let page = store.list(&query).await;
        assert_eq!(page.total_pages, 3);
        assert_eq!(products(&page), vec!["trial1"]);

        let query = InventoryQuery {
            per_page: 2,
            page: 99,
            ..InventoryQuery::default()
        };
        assert_eq!(store.list(&query).await.page, 3);

        let empty = InventoryStore::new();
        let page = empty.list(&InventoryQuery { page: 0, ..InventoryQuery::default() }).await;
        assert_eq!((page.page, page.total_pages, page.total), (1, 1, 0));
    }

    #[tokio::test]
    async fn edit_delete_and_bulk_delete() {
        let store = InventoryStore::seeded();

        let updated = store
            .update(
                2,
                InventoryPatch {
                    price: Some(dec("13000")),
                    quantity: Some(3),
                    ..InventoryPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, dec("13000"));
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.product, "Botus LLoom");

        store.delete(1).await.unwrap();
        assert!(matches!(store.delete(1).await, Err(StoreError::NotFound(1))));
        assert!(matches!(
            store.update(42, InventoryPatch::default()).await,
            Err(StoreError::NotFound(42))
        ));

        assert_eq!(store.delete_many(&[3, 4, 99]).await, 2);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(5).await.unwrap().product, "trial1");
    }

    #[tokio::test]
    async fn added_items_get_fresh_ids() {
        let store = InventoryStore::seeded();
        store.delete(5).await.unwrap();
        let item = store
            .add(NewInventoryItem {
                product: "New Product".into(),
                category: "Earrings".into(),
                vendor: "ABC Jewels Inc.".into(),
                gross_weight: dec("3"),
                fine_weight: dec("3.15"),
                price: dec("15000"),
                quantity: 1,
                settlement: SettlementMethod::Cash,
            })
            .await;
        assert_eq!(item.id, 6);
        assert_eq!(store.get(6).await.unwrap(), item);
    }
}
