//! Key-value backend errors and their mapping onto core errors.

use folioadvisor_core::errors::{DatabaseError, Error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KvError {
    #[error("Redis unavailable: {0}")]
    Unavailable(String),

    #[error("Redis command failed: {0}")]
    Command(String),

    #[error("Key '{0}' holds a value of the wrong type")]
    WrongType(String),
}

impl From<redis::RedisError> for KvError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            KvError::Unavailable(err.to_string())
        } else {
            KvError::Command(err.to_string())
        }
    }
}

impl From<KvError> for Error {
    fn from(err: KvError) -> Self {
        match err {
            KvError::Unavailable(msg) => Error::Database(DatabaseError::ConnectionFailed(msg)),
            KvError::Command(msg) => Error::Database(DatabaseError::QueryFailed(msg)),
            KvError::WrongType(key) => Error::Database(DatabaseError::Corrupt(format!(
                "key '{key}' holds a value of the wrong type"
            ))),
        }
    }
}
