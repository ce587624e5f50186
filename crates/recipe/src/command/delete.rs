use foodgram_db::table::Recipe;
use foodgram_shared::{Error, Result};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Deletes the recipe; associations, favorites and cart entries go with
    /// it. Returns the stored image path so the caller can discard the file.
    pub async fn delete(&self, id: i64, editor: i64) -> Result<String> {
        let mut tx = self.0.write_db.begin().await?;
        let owner = super::load_owner(&mut tx, id).await?;

        if owner.author_id != editor {
            return Err(Error::Forbidden);
        }

        let (sql, values) = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(recipe = id, editor, "recipe deleted");

        Ok(owner.image)
    }
}
