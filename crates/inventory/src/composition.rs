//! Composition resolver: can a bill of materials be satisfied, and consuming it.

use std::collections::HashMap;

use warehouse_core::{ArticleId, DomainError, DomainResult, StockLedger, Stocked};

use crate::article::{Article, ArticleRequirement};

/// The first requirement that could not be met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub art_id: ArticleId,
    /// Total units needed, `None` if the product overflowed `u64`.
    pub required: Option<u64>,
    /// Units on hand, `None` if the article does not exist.
    pub available: Option<u64>,
}

/// Check `requirements × units` against article stock.
///
/// Requirements are visited in order and the first failing one is returned.
/// An article listed more than once is checked against its summed demand.
pub fn check_assembly(
    requirements: &[ArticleRequirement],
    units: u64,
    articles: &StockLedger<Article>,
) -> Result<(), Shortfall> {
    let mut demand: HashMap<&ArticleId, u64> = HashMap::with_capacity(requirements.len());

    for req in requirements {
        let available = articles.stock_of(&req.art_id);
        let needed = req
            .amount_of
            .checked_mul(units)
            .and_then(|n| n.checked_add(demand.get(&req.art_id).copied().unwrap_or(0)));

        match (needed, available) {
            (Some(needed), Some(available)) if needed <= available => {
                demand.insert(&req.art_id, needed);
            }
            (required, available) => {
                return Err(Shortfall {
                    art_id: req.art_id.clone(),
                    required,
                    available,
                });
            }
        }
    }

    Ok(())
}

/// True when every requirement can be met for `units` product units.
///
/// Insufficient stock is an expected outcome here, not an error.
pub fn can_assemble(
    requirements: &[ArticleRequirement],
    units: u64,
    articles: &StockLedger<Article>,
) -> bool {
    check_assembly(requirements, units, articles).is_ok()
}

/// Deduct `requirements × units` from article stock.
///
/// Must follow a successful [`can_assemble`] on the same ledger. If the ledger
/// cannot cover the demand nothing is deducted and an invariant error is
/// returned, so stock never goes negative.
pub fn consume(
    requirements: &[ArticleRequirement],
    units: u64,
    articles: &mut StockLedger<Article>,
) -> DomainResult<()> {
    if let Err(shortfall) = check_assembly(requirements, units, articles) {
        return Err(DomainError::invariant(format!(
            "cannot consume article {}: required {:?}, available {:?}",
            shortfall.art_id, shortfall.required, shortfall.available
        )));
    }

    for req in requirements {
        // Presence and amounts were verified above.
        if let Some(article) = articles.get_mut(&req.art_id) {
            *article.stock_mut() -= req.amount_of * units;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn legs(stock: u64) -> StockLedger<Article> {
        StockLedger::from_entries(vec![Article::new("1", "leg", stock)]).unwrap()
    }

    #[test]
    fn chair_needing_eight_legs_fits_in_twenty() {
        let mut articles = legs(20);
        let reqs = vec![ArticleRequirement::new("1", 4)];

        assert!(can_assemble(&reqs, 2, &articles));
        consume(&reqs, 2, &mut articles).unwrap();
        assert_eq!(articles.stock_of(&ArticleId::from("1")), Some(12));
    }

    #[test]
    fn exact_stock_is_enough() {
        let articles = legs(8);
        assert!(can_assemble(&[ArticleRequirement::new("1", 4)], 2, &articles));
    }

    #[test]
    fn one_short_fails() {
        let articles = legs(7);
        let reqs = [ArticleRequirement::new("1", 4)];
        assert!(!can_assemble(&reqs, 2, &articles));
        assert_eq!(
            check_assembly(&reqs, 2, &articles),
            Err(Shortfall {
                art_id: ArticleId::from("1"),
                required: Some(8),
                available: Some(7),
            })
        );
    }

    #[test]
    fn missing_article_fails() {
        let articles = legs(100);
        let reqs = [ArticleRequirement::new("1", 1), ArticleRequirement::new("9", 1)];
        let shortfall = check_assembly(&reqs, 1, &articles).unwrap_err();
        assert_eq!(shortfall.art_id, ArticleId::from("9"));
        assert_eq!(shortfall.available, None);
    }

    #[test]
    fn repeated_article_is_checked_against_summed_demand() {
        let articles = legs(6);
        let reqs = [ArticleRequirement::new("1", 4), ArticleRequirement::new("1", 4)];
        assert!(!can_assemble(&reqs, 1, &articles));
    }

    #[test]
    fn overflowing_demand_is_not_assemblable() {
        let articles = legs(u64::MAX);
        assert!(!can_assemble(&[ArticleRequirement::new("1", u64::MAX)], 2, &articles));
    }

    #[test]
    fn consume_without_enough_stock_leaves_ledger_untouched() {
        let mut articles = StockLedger::from_entries(vec![
            Article::new("1", "leg", 10),
            Article::new("2", "seat", 0),
        ])
        .unwrap();
        let reqs = [ArticleRequirement::new("1", 4), ArticleRequirement::new("2", 1)];

        let err = consume(&reqs, 1, &mut articles).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(articles.stock_of(&ArticleId::from("1")), Some(10));
    }

    #[test]
    fn zero_units_always_assemble() {
        let articles = legs(0);
        assert!(can_assemble(&[ArticleRequirement::new("1", 4)], 0, &articles));
    }

    fn arb_catalog() -> impl Strategy<Value = (Vec<u64>, Vec<(usize, u64)>, u64)> {
        (
            prop::collection::vec(0u64..50, 1..6),
            prop::collection::vec((0usize..8, 0u64..6), 0..6),
            0u64..6,
        )
    }

    proptest! {
        #[test]
        fn consume_after_can_assemble_never_goes_negative((stocks, lines, units) in arb_catalog()) {
            let mut articles = StockLedger::from_entries(
                stocks
                    .iter()
                    .enumerate()
                    .map(|(i, s)| Article::new(i.to_string(), format!("a{i}"), *s))
                    .collect(),
            )
            .unwrap();
            // Indices past the catalog reference missing articles.
            let reqs: Vec<_> = lines
                .iter()
                .map(|(i, amount)| ArticleRequirement::new(i.to_string(), *amount))
                .collect();

            if can_assemble(&reqs, units, &articles) {
                let before: u64 = articles.entries().iter().map(|a| a.stock).sum();
                consume(&reqs, units, &mut articles).unwrap();
                let after: u64 = articles.entries().iter().map(|a| a.stock).sum();
                let used: u64 = reqs.iter().map(|r| r.amount_of * units).sum();
                prop_assert_eq!(before - used, after);
            } else {
                prop_assert!(consume(&reqs, units, &mut articles).is_err());
            }
        }

        #[test]
        fn can_assemble_matches_per_article_totals((stocks, lines, units) in arb_catalog()) {
            let articles = StockLedger::from_entries(
                stocks
                    .iter()
                    .enumerate()
                    .map(|(i, s)| Article::new(i.to_string(), format!("a{i}"), *s))
                    .collect(),
            )
            .unwrap();
            let reqs: Vec<_> = lines
                .iter()
                .map(|(i, amount)| ArticleRequirement::new(i.to_string(), *amount))
                .collect();

            let mut totals: HashMap<usize, u64> = HashMap::new();
            for (i, amount) in &lines {
                *totals.entry(*i).or_default() += amount * units;
            }
            let expected = totals
                .iter()
                .all(|(i, need)| stocks.get(*i).is_some_and(|s| s >= need));

            prop_assert_eq!(can_assemble(&reqs, units, &articles), expected);
        }
    }
}
