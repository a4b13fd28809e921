use std::collections::HashMap;

use anyhow::Context;

use crate::{ReportLine, ShoppingReport};

/// Read-only view of the relational store, as far as the shopping list is
/// concerned. Injected rather than reached for, so the aggregation can be
/// driven against any backing state.
#[async_trait::async_trait]
pub trait CartStore: Send + Sync {
    /// Recipes currently in the user's cart.
    async fn cart_recipe_ids(&self, user_id: &str) -> anyhow::Result<Vec<String>>;

    /// All ingredient-usage rows for the given recipes.
    async fn ingredient_lines(&self, recipe_ids: &[String]) -> anyhow::Result<Vec<IngredientLine>>;

    /// Current reference data for one ingredient.
    async fn ingredient_info(&self, ingredient_id: &str) -> anyhow::Result<Option<IngredientInfo>>;
}

#[derive(Debug, Clone)]
pub struct IngredientLine {
    pub ingredient_id: String,
    pub amount: u64,
}

#[derive(Debug, Clone)]
pub struct IngredientInfo {
    pub name: String,
    pub measurement_unit: String,
}

pub struct Aggregator<S> {
    store: S,
}

impl<S: CartStore> Aggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fold the user's whole cart into one line per distinct ingredient.
    ///
    /// Grouping is by ingredient id; two ingredients that happen to share a
    /// display name stay separate. Names and units are read at report time,
    /// so later reference-data edits show up in the next download. Lines are
    /// sorted by name (id as tie-break) so the output is reproducible; the
    /// store's aggregate ordering is not relied upon.
    pub async fn generate_report(&self, user_id: &str) -> anyhow::Result<ShoppingReport> {
        let recipe_ids = self.store.cart_recipe_ids(user_id).await?;

        let mut totals: HashMap<String, u64> = HashMap::new();
        if !recipe_ids.is_empty() {
            for line in self.store.ingredient_lines(&recipe_ids).await? {
                let total = totals.entry(line.ingredient_id).or_insert(0);
                *total = total
                    .checked_add(line.amount)
                    .context("ingredient total overflowed")?;
            }
        }

        let mut lines = Vec::with_capacity(totals.len());
        for (ingredient_id, total_amount) in totals {
            let info = self
                .store
                .ingredient_info(&ingredient_id)
                .await?
                .with_context(|| format!("ingredient {ingredient_id} is referenced by a cart recipe but missing"))?;

            lines.push(ReportLine {
                ingredient_id,
                name: info.name,
                total_amount,
                measurement_unit: info.measurement_unit,
            });
        }

        lines.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.ingredient_id.cmp(&b.ingredient_id))
        });

        Ok(ShoppingReport::render(&lines))
    }
}
