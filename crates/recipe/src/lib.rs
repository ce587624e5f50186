//! Recipe catalog: ledger, filtering, annotation, pagination, author
//! subscriptions and the recipe write path.

mod annotation;
mod command;
mod filter;
mod membership;
mod query;
mod subscription;
mod types;

pub mod ledger;
pub mod pagination;
pub mod tag_match;

pub use annotation::{Annotations, Flags, annotate};
pub use command::{Command, IngredientAmount, RecipeInput, RecipeUpdate, replace_associations};
pub use filter::{QueryPlan, RecipeFilter, RecipeSet};
pub use membership::Membership;
pub use pagination::{Page, Pagination};
pub use query::{DEFAULT_RECIPES_LIMIT, Query, RecipesLimit};
pub use types::*;
