use serde::{Deserialize, Serialize};

use warehouse_core::{ArticleId, DomainError, DomainResult, Entity, IdSequence, StockLedger, Stocked};

/// A raw component with its own stock count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub art_id: ArticleId,
    pub name: String,
    pub stock: u64,
}

impl Article {
    pub fn new(art_id: impl Into<ArticleId>, name: impl Into<String>, stock: u64) -> Self {
        Self {
            art_id: art_id.into(),
            name: name.into(),
            stock,
        }
    }
}

impl Entity for Article {
    type Id = ArticleId;

    fn id(&self) -> &ArticleId {
        &self.art_id
    }
}

impl Stocked for Article {
    fn stock(&self) -> u64 {
        self.stock
    }

    fn stock_mut(&mut self) -> &mut u64 {
        &mut self.stock
    }
}

/// Bill-of-materials line: how many of an article one product unit needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRequirement {
    pub art_id: ArticleId,
    pub amount_of: u64,
}

impl ArticleRequirement {
    pub fn new(art_id: impl Into<ArticleId>, amount_of: u64) -> Self {
        Self {
            art_id: art_id.into(),
            amount_of,
        }
    }
}

/// What `upsert_article` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleUpsert {
    /// An article with the same name existed; its stock grew.
    Restocked { art_id: ArticleId, stock: u64 },
    /// No article had that name; a new one was appended.
    Created { art_id: ArticleId },
}

/// Add received stock to the article named `name`, creating it if needed.
///
/// Matching is by exact display name; the first match wins. New articles get
/// the next id from `ids`, never one already in the ledger.
pub fn upsert_article(
    articles: &mut StockLedger<Article>,
    ids: &mut IdSequence,
    name: &str,
    stock_delta: u64,
) -> DomainResult<ArticleUpsert> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("article name cannot be empty"));
    }

    if let Some(existing) = articles.find_mut(|a| a.name == name) {
        let stock = existing.stock_mut();
        *stock = stock
            .checked_add(stock_delta)
            .ok_or_else(|| DomainError::invariant("article stock overflow"))?;
        tracing::debug!(art_id = %existing.art_id, stock = existing.stock, "article restocked");
        return Ok(ArticleUpsert::Restocked {
            art_id: existing.art_id.clone(),
            stock: existing.stock,
        });
    }

    let art_id = ids.allocate(|candidate| articles.contains(candidate));
    articles.push(Article::new(art_id.clone(), name, stock_delta))?;
    tracing::debug!(art_id = %art_id, stock = stock_delta, "article created");
    Ok(ArticleUpsert::Created { art_id })
}
