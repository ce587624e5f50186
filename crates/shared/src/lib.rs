mod error;
mod viewer;

pub use error::*;
pub use viewer::*;

/// Handle passed into every component for the lifetime of one request.
///
/// Reads go through `read_db`; mutations open their transaction on
/// `write_db`, which is expected to hold a single connection.
#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}

/// Current time as unix seconds.
pub fn now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
