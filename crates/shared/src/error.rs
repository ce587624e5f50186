use strum::AsRefStr;

#[derive(Debug, thiserror::Error, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    #[error("filtering by favorites or shopping cart requires an authenticated user")]
    InvalidFilterCombination,

    #[error("shopping cart is empty, nothing to export")]
    AggregationEmpty,

    #[error("forbidden")]
    Forbidden,

    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine readable kind, e.g. `not_found`.
    pub fn kind(&self) -> &str {
        self.as_ref()
    }

    /// Maps a storage error from a write on `what`, turning a unique
    /// violation into `AlreadyExists(what)`.
    pub fn exists_as(what: &'static str) -> impl FnOnce(sqlx::Error) -> Error {
        move |err| match Error::from(err) {
            Error::AlreadyExists(_) => Error::AlreadyExists(what),
            other => other,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        if let Some(db) = value.as_database_error() {
            if db.is_unique_violation() {
                return Self::AlreadyExists("record");
            }

            if db.is_foreign_key_violation() {
                return Self::Invalid("referenced record does not exist".to_owned());
            }

            if db.is_check_violation() {
                return Self::Invalid("value out of range".to_owned());
            }
        }

        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Invalid(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Invalid(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Invalid(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_snake_case() {
        assert_eq!(Error::NotFound("recipe").kind(), "not_found");
        assert_eq!(Error::AlreadyExists("favorite").kind(), "already_exists");
        assert_eq!(
            Error::InvalidFilterCombination.kind(),
            "invalid_filter_combination"
        );
        assert_eq!(Error::AggregationEmpty.kind(), "aggregation_empty");
    }

    #[test]
    fn row_not_found_is_unknown() {
        let err = Error::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), "unknown");
    }
}
