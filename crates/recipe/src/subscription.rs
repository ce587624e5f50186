//! Following authors. A subscription is an existence-only (user, author) pair.

use foodgram_db::table::{Subscription, User};
use foodgram_shared::{Error, Result, bail};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::Command;

impl Command {
    /// `user` starts following `author`. Following yourself is rejected, a
    /// repeated subscription is `AlreadyExists`.
    pub async fn subscribe(&self, user: i64, author: i64) -> Result<()> {
        if user == author {
            bail!("cannot subscribe to yourself");
        }

        let mut tx = self.0.write_db.begin().await?;

        let (sql, values) = Query::select()
            .column(User::Id)
            .from(User::Table)
            .and_where(Expr::col(User::Id).eq(author))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(Error::NotFound("user"))?;

        let (sql, values) = Query::insert()
            .into_table(Subscription::Table)
            .columns([
                Subscription::UserId,
                Subscription::AuthorId,
                Subscription::CreatedAt,
            ])
            .values_panic([user.into(), author.into(), foodgram_shared::now().into()])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await
            .map_err(Error::exists_as("subscription"))?;

        tx.commit().await?;

        tracing::info!(user, author, "subscribed");

        Ok(())
    }

    /// Unsubscribing from an author you do not follow is not an error.
    pub async fn unsubscribe(&self, user: i64, author: i64) -> Result<()> {
        let (sql, values) = Query::delete()
            .from_table(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user))
            .and_where(Expr::col(Subscription::AuthorId).eq(author))
            .build_sqlx(SqliteQueryBuilder);

        let removed = sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?
            .rows_affected();

        tracing::debug!(user, author, removed, "unsubscribed");

        Ok(())
    }
}
