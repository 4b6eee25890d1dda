use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::models::{
    sale_total, CatalogItem, PaymentMethod, Sale, SaleLine, SaleStatus, SalesQuery,
};

/// 销售单存储 (最新的排在最前) + 可售商品目录
#[derive(Debug)]
pub struct SalesStore {
    catalog: Vec<CatalogItem>,
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    sales: IndexMap<String, Sale>,
    next_seq: u64,
}

fn invoice_id(seq: u64) -> String {
    format!("INV-{:03}", seq)
}

impl SalesStore {
    /// 带演示目录和四张历史销售单
    pub fn seeded() -> Self {
        let catalog: Vec<CatalogItem> = [
            (1, "Gold Ring", 32500),
            (2, "Diamond Earrings", 45000),
            (3, "Gold Chain", 28000),
            (4, "Pearl Earrings", 12500),
            (5, "Platinum Bracelet", 56000),
            (6, "Gold Necklace", 86500),
        ]
        .into_iter()
        .map(|(id, name, price)| CatalogItem {
            id,
            name: name.to_string(),
            price: BigDecimal::from(price),
        })
        .collect();

        let history = [
            ((2023, 12, 15), "Rajesh Mehta", vec![1], PaymentMethod::Cash, SaleStatus::Completed),
            ((2024, 1, 5), "Anita Sharma", vec![2, 3], PaymentMethod::BankTransfer, SaleStatus::Completed),
            ((2024, 1, 22), "Vikram Patel", vec![5], PaymentMethod::CreditCard, SaleStatus::Completed),
            ((2024, 2, 10), "Deepa Gupta", vec![6, 4], PaymentMethod::BankTransfer, SaleStatus::Pending),
        ];

        let mut sales = IndexMap::new();
        let mut next_seq = 1;
        for ((y, m, d), customer, item_ids, payment_method, status) in history {
            let items: Vec<SaleLine> = item_ids
                .iter()
                .filter_map(|id| catalog.iter().find(|c| c.id == *id))
                .map(|item| item.line(1))
                .collect();
            let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
                continue;
            };
            let id = invoice_id(next_seq);
            next_seq += 1;
            // 新单据插在最前
            sales.shift_insert(
                0,
                id.clone(),
                Sale {
                    id,
                    date,
                    customer: customer.to_string(),
                    total: sale_total(&items),
                    items,
                    payment_method,
                    status,
                },
            );
        }

        Self {
            catalog,
            inner: RwLock::new(Inner { sales, next_seq }),
        }
    }

    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    pub fn catalog_item(&self, id: u64) -> Option<&CatalogItem> {
        self.catalog.iter().find(|item| item.id == id)
    }

    /// 按关键字和日期范围筛选, 保持最新在前
    pub async fn list(&self, query: &SalesQuery, today: NaiveDate) -> Vec<Sale> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        self.inner
            .read()
            .await
            .sales
            .values()
            .filter(|sale| {
                let matches_search = search.as_ref().map_or(true, |term| {
                    sale.id.to_lowercase().contains(term.as_str())
                        || sale.customer.to_lowercase().contains(term.as_str())
                        || sale
                            .items
                            .iter()
                            .any(|item| item.name.to_lowercase().contains(term.as_str()))
                });
                matches_search && query.window.contains(sale.date, today)
            })
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<Sale> {
        self.inner.read().await.sales.get(id).cloned()
    }

    /// 记录一张已完成的销售单, 分配下一个发票号
    pub async fn record(
        &self,
        customer: String,
        payment_method: PaymentMethod,
        items: Vec<SaleLine>,
        date: NaiveDate,
    ) -> Sale {
        let mut inner = self.inner.write().await;
        let id = invoice_id(inner.next_seq);
        inner.next_seq += 1;

        let sale = Sale {
            id: id.clone(),
            date,
            customer,
            total: sale_total(&items),
            items,
            payment_method,
            status: SaleStatus::Completed,
        };
        inner.sales.shift_insert(0, id, sale.clone());
        tracing::info!("Sale {} recorded: {} total {}", sale.id, sale.customer, sale.total);
        sale
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.sales.len()
    }
}
