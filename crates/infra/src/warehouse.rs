//! Authoritative catalog state and the operations the API exposes.
//!
//! The catalog is loaded once when the warehouse opens and held behind one
//! writer lock per document (articles, products). Locks are always taken in
//! that order. Each mutation runs on a copy of the locked state, is flushed to
//! the backing document, and only then replaces the in-memory state, so a
//! failed flush leaves memory and disk agreeing with each other.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use warehouse_core::{DomainError, IdSequence, StockLedger};
use warehouse_inventory::{upsert_article, Article, ArticleUpsert};
use warehouse_products::{upsert_product, AddProduct, Product, ProductAssembly};
use warehouse_sales::{fulfill, Fulfillment, OrderLine};

use crate::catalog::{CatalogError, CatalogLoader};

#[derive(Debug, Error)]
pub enum WarehouseError {
    /// A catalog document could not be loaded.
    #[error("import failed: {0}")]
    Import(#[source] CatalogError),
    /// A mutation could not be written back.
    #[error("mutation failed: {0}")]
    Mutation(#[source] CatalogError),
    /// The products write failed and the articles document could not be put
    /// back, so the two documents on disk disagree.
    #[error("products write failed ({source}) and articles restore failed ({restore}); documents disagree")]
    Diverged {
        source: CatalogError,
        restore: CatalogError,
    },
    /// The request broke a domain rule.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// A previous holder of the lock panicked.
    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}

#[derive(Debug, Clone)]
struct ArticleBook {
    ledger: StockLedger<Article>,
    ids: IdSequence,
}

impl ArticleBook {
    fn new(ledger: StockLedger<Article>) -> Self {
        let ids = IdSequence::seeded(ledger.ids());
        Self { ledger, ids }
    }

    /// Swap in a freshly imported ledger without ever reissuing an id.
    fn replace(&mut self, ledger: StockLedger<Article>) {
        let seeded = IdSequence::seeded(ledger.ids());
        if seeded.peek() > self.ids.peek() {
            self.ids = seeded;
        }
        self.ledger = ledger;
    }
}

#[derive(Debug)]
pub struct Warehouse {
    loader: CatalogLoader,
    articles: Mutex<ArticleBook>,
    products: Mutex<StockLedger<Product>>,
}

impl Warehouse {
    /// Load both documents and take ownership of the catalog.
    pub fn open(loader: CatalogLoader) -> Result<Self, WarehouseError> {
        let articles = loader
            .load_article_ledger()
            .map_err(|e| import_failed("articles", e))?;
        let products = loader
            .load_product_ledger()
            .map_err(|e| import_failed("products", e))?;

        tracing::info!(
            articles = articles.len(),
            products = products.len(),
            "catalog loaded"
        );

        Ok(Self {
            loader,
            articles: Mutex::new(ArticleBook::new(articles)),
            products: Mutex::new(products),
        })
    }

    /// Re-read the articles document and make it the current state.
    pub fn import_articles(&self) -> Result<Vec<Article>, WarehouseError> {
        let mut book = self.lock_articles()?;
        let ledger = self
            .loader
            .load_article_ledger()
            .map_err(|e| import_failed("articles", e))?;
        book.replace(ledger);
        Ok(book.ledger.entries().to_vec())
    }

    /// Re-read the products document and make it the current state.
    pub fn import_products(&self) -> Result<Vec<Product>, WarehouseError> {
        let mut products = self.lock_products()?;
        *products = self
            .loader
            .load_product_ledger()
            .map_err(|e| import_failed("products", e))?;
        Ok(products.entries().to_vec())
    }

    pub fn articles(&self) -> Result<Vec<Article>, WarehouseError> {
        Ok(self.lock_articles()?.ledger.entries().to_vec())
    }

    /// Product name → stock on hand.
    pub fn product_stock(&self) -> Result<BTreeMap<String, u64>, WarehouseError> {
        let products = self.lock_products()?;
        Ok(products
            .stock_levels()
            .into_iter()
            .map(|(name, stock)| (name.as_str().to_string(), stock))
            .collect())
    }

    /// Restock the article called `name`, or add it. Returns every article.
    pub fn add_article(&self, name: &str, stock: u64) -> Result<Vec<Article>, WarehouseError> {
        let mut book = self.lock_articles()?;
        let mut next = book.clone();

        let outcome = upsert_article(&mut next.ledger, &mut next.ids, name, stock)?;
        self.loader
            .save_articles(next.ledger.entries())
            .map_err(|e| mutation_failed("articles", e))?;

        match &outcome {
            ArticleUpsert::Restocked { art_id, stock } => {
                tracing::info!(art_id = %art_id, stock, "article restocked");
            }
            ArticleUpsert::Created { art_id } => {
                tracing::info!(art_id = %art_id, name, "article created");
            }
        }

        *book = next;
        Ok(book.ledger.entries().to_vec())
    }

    /// Assemble product stock out of article stock.
    pub fn add_product(&self, request: &AddProduct) -> Result<ProductAssembly, WarehouseError> {
        let mut book = self.lock_articles()?;
        let mut products = self.lock_products()?;

        let mut next_articles = book.ledger.clone();
        let mut next_products = products.clone();
        let outcome = upsert_product(&mut next_products, &mut next_articles, request)?;
        if !outcome.is_assembled() {
            tracing::info!(product = %request.name, "not enough stock to add product");
            return Ok(outcome);
        }

        self.loader
            .save_articles(next_articles.entries())
            .map_err(|e| mutation_failed("articles", e))?;
        if let Err(e) = self.loader.save_products(next_products.entries()) {
            // Put the articles document back so both files still agree.
            if let Err(restore) = self.loader.save_articles(book.ledger.entries()) {
                tracing::error!(
                    products_error = %e,
                    restore_error = %restore,
                    "products write failed and articles could not be restored; documents disagree"
                );
                return Err(WarehouseError::Diverged { source: e, restore });
            }
            return Err(mutation_failed("products", e));
        }

        tracing::info!(product = %request.name, units = request.stock_to_add, "product stock assembled");
        book.ledger = next_articles;
        *products = next_products;
        Ok(outcome)
    }

    /// Fulfil an order all-or-nothing.
    pub fn place_order(&self, lines: &[OrderLine]) -> Result<Fulfillment, WarehouseError> {
        let mut products = self.lock_products()?;
        let mut next = products.clone();

        let outcome = fulfill(lines, &mut next);
        if let Fulfillment::Rejected { product, requested, available } = &outcome {
            tracing::info!(product = %product, requested, available = ?available, "order rejected");
            return Ok(outcome);
        }

        self.loader
            .save_products(next.entries())
            .map_err(|e| mutation_failed("products", e))?;
        tracing::info!(lines = lines.len(), "order fulfilled");
        *products = next;
        Ok(outcome)
    }

    fn lock_articles(&self) -> Result<MutexGuard<'_, ArticleBook>, WarehouseError> {
        self.articles
            .lock()
            .map_err(|_| WarehouseError::LockPoisoned("articles"))
    }

    fn lock_products(&self) -> Result<MutexGuard<'_, StockLedger<Product>>, WarehouseError> {
        self.products
            .lock()
            .map_err(|_| WarehouseError::LockPoisoned("products"))
    }
}

fn import_failed(what: &'static str, e: CatalogError) -> WarehouseError {
    tracing::error!(document = e.document(), error = %e, "error while importing {what}");
    WarehouseError::Import(e)
}

fn mutation_failed(what: &'static str, e: CatalogError) -> WarehouseError {
    tracing::error!(document = e.document(), error = %e, "error while writing {what}");
    WarehouseError::Mutation(e)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{CatalogError, DocumentStore, InMemoryDocumentStore};
    use warehouse_core::ArticleId;
    use warehouse_inventory::ArticleRequirement;
    use warehouse_products::ProductName;

    const ARTICLES: &str = r#"{"articles":[
        {"art_id":"1","name":"leg","stock":20},
        {"art_id":"2","name":"screw","stock":40}
    ]}"#;

    const PRODUCTS: &str = r#"{"products":[
        {"name":"Dining Chair","contain_articles":[{"art_id":"1","amount_of":4},{"art_id":"2","amount_of":8}],"price":100.0,"stock":2}
    ]}"#;

    /// Document store that starts failing writes once its budget runs out.
    #[derive(Debug)]
    struct FlakyStore {
        inner: InMemoryDocumentStore,
        writes_left: AtomicUsize,
    }

    impl FlakyStore {
        fn new(contents: &str) -> Self {
            Self {
                inner: InMemoryDocumentStore::with_contents("flaky", contents),
                writes_left: AtomicUsize::new(usize::MAX),
            }
        }

        fn fail_after(&self, writes: usize) {
            self.writes_left.store(writes, Ordering::SeqCst);
        }
    }

    impl DocumentStore for FlakyStore {
        fn name(&self) -> &str {
            self.inner.name()
        }

        fn read(&self) -> Result<Vec<u8>, CatalogError> {
            self.inner.read()
        }

        fn write(&self, bytes: &[u8]) -> Result<(), CatalogError> {
            let budget = self
                .writes_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
            if budget.is_err() {
                return Err(CatalogError::io("flaky", std::io::Error::other("disk full")));
            }
            self.inner.write(bytes)
        }
    }

    fn setup() -> (Warehouse, Arc<InMemoryDocumentStore>, Arc<InMemoryDocumentStore>) {
        let articles = Arc::new(InMemoryDocumentStore::with_contents("articles", ARTICLES));
        let products = Arc::new(InMemoryDocumentStore::with_contents("products", PRODUCTS));
        let loader = CatalogLoader::new(articles.clone(), products.clone());
        (Warehouse::open(loader).unwrap(), articles, products)
    }

    fn chair_request(stock_to_add: u64) -> AddProduct {
        AddProduct {
            name: ProductName::from("chair"),
            requirements: vec![ArticleRequirement::new("1", 4)],
            price: 50.0,
            stock_to_add,
        }
    }

    #[test]
    fn open_fails_when_a_document_is_missing() {
        let loader = CatalogLoader::new(
            Arc::new(InMemoryDocumentStore::with_contents("articles", ARTICLES)),
            Arc::new(InMemoryDocumentStore::empty("products")),
        );
        assert!(matches!(Warehouse::open(loader), Err(WarehouseError::Import(_))));
    }

    #[test]
    fn added_article_is_persisted_and_visible() {
        let (warehouse, articles_doc, _) = setup();

        let articles = warehouse.add_article("seat", 3).unwrap();

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[2], Article::new("3", "seat", 3));
        let saved = crate::catalog::document::decode_articles("a", &articles_doc.read().unwrap()).unwrap();
        assert_eq!(saved, articles);
    }

    #[test]
    fn mutations_survive_across_calls() {
        let (warehouse, _, _) = setup();
        warehouse.add_article("leg", 5).unwrap();
        warehouse.add_article("leg", 5).unwrap();
        let leg = warehouse
            .articles()
            .unwrap()
            .into_iter()
            .find(|a| a.art_id == ArticleId::from("1"))
            .unwrap();
        assert_eq!(leg.stock, 30);
    }

    #[test]
    fn assembling_a_product_consumes_articles_in_both_documents() {
        let (warehouse, articles_doc, products_doc) = setup();

        let outcome = warehouse.add_product(&chair_request(2)).unwrap();

        assert_eq!(outcome, ProductAssembly::Created);
        assert_eq!(warehouse.product_stock().unwrap().get("chair"), Some(&2));
        let saved_articles =
            crate::catalog::document::decode_articles("a", &articles_doc.read().unwrap()).unwrap();
        assert_eq!(saved_articles[0].stock, 12);
        let saved_products =
            crate::catalog::document::decode_products("p", &products_doc.read().unwrap()).unwrap();
        assert_eq!(saved_products.len(), 2);
    }

    #[test]
    fn shortfall_writes_nothing() {
        let (warehouse, articles_doc, _) = setup();
        let before = articles_doc.read().unwrap();

        let outcome = warehouse.add_product(&chair_request(6)).unwrap();

        assert!(!outcome.is_assembled());
        assert_eq!(articles_doc.read().unwrap(), before);
        assert!(!warehouse.product_stock().unwrap().contains_key("chair"));
    }

    #[test]
    fn order_decrements_and_rejection_keeps_stock() {
        let (warehouse, _, _) = setup();

        let ok = warehouse.place_order(&[OrderLine::new("Dining Chair", 1)]).unwrap();
        assert!(ok.is_fulfilled());
        assert_eq!(warehouse.product_stock().unwrap()["Dining Chair"], 1);

        let rejected = warehouse
            .place_order(&[OrderLine::new("Dining Chair", 1), OrderLine::new("Product1", 5)])
            .unwrap();
        assert!(!rejected.is_fulfilled());
        assert_eq!(warehouse.product_stock().unwrap()["Dining Chair"], 1);
    }

    #[test]
    fn failed_flush_leaves_state_unchanged() {
        let articles = Arc::new(FlakyStore::new(ARTICLES));
        let products = Arc::new(InMemoryDocumentStore::with_contents("products", PRODUCTS));
        let warehouse = Warehouse::open(CatalogLoader::new(articles.clone(), products)).unwrap();

        articles.fail_after(0);
        let err = warehouse.add_article("leg", 5).unwrap_err();

        assert!(matches!(err, WarehouseError::Mutation(_)));
        assert_eq!(warehouse.articles().unwrap()[0].stock, 20);
    }

    #[test]
    fn failed_products_flush_restores_articles_document() {
        let articles = Arc::new(InMemoryDocumentStore::with_contents("articles", ARTICLES));
        let products = Arc::new(FlakyStore::new(PRODUCTS));
        let warehouse = Warehouse::open(CatalogLoader::new(articles.clone(), products.clone())).unwrap();

        products.fail_after(0);
        let err = warehouse.add_product(&chair_request(1)).unwrap_err();

        assert!(matches!(err, WarehouseError::Mutation(_)));
        let saved = crate::catalog::document::decode_articles("a", &articles.read().unwrap()).unwrap();
        assert_eq!(saved[0].stock, 20);
        assert_eq!(warehouse.articles().unwrap()[0].stock, 20);
    }

    #[test]
    fn failed_restore_reports_diverged_documents() {
        let articles = Arc::new(FlakyStore::new(ARTICLES));
        let products = Arc::new(FlakyStore::new(PRODUCTS));
        let warehouse = Warehouse::open(CatalogLoader::new(articles.clone(), products.clone())).unwrap();

        // The consuming articles write lands, the products write and the restore do not.
        articles.fail_after(1);
        products.fail_after(0);
        let err = warehouse.add_product(&chair_request(1)).unwrap_err();

        assert!(matches!(err, WarehouseError::Diverged { .. }));
        assert!(err.to_string().contains("documents disagree"));
        let saved = crate::catalog::document::decode_articles("a", &articles.read().unwrap()).unwrap();
        assert_eq!(saved[0].stock, 16);
        assert_eq!(warehouse.articles().unwrap()[0].stock, 20);
        assert!(!warehouse.product_stock().unwrap().contains_key("chair"));
    }

    #[test]
    fn import_rereads_document_without_reusing_ids() {
        let (warehouse, articles_doc, _) = setup();
        warehouse.add_article("seat", 1).unwrap();

        // Someone shrinks the document behind our back.
        articles_doc
            .write(br#"{"articles":[{"art_id":"1","name":"leg","stock":1}]}"#)
            .unwrap();
        let imported = warehouse.import_articles().unwrap();
        assert_eq!(imported, vec![Article::new("1", "leg", 1)]);

        let after = warehouse.add_article("bolt", 1).unwrap();
        assert_eq!(after[1].art_id, ArticleId::from("4"));
    }

    #[test]
    fn blank_article_name_is_a_domain_error() {
        let (warehouse, _, _) = setup();
        assert!(matches!(warehouse.add_article(" ", 1), Err(WarehouseError::Domain(_))));
    }
}
