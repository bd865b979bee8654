use std::num::ParseIntError;
use thiserror::Error;

/// State the server wrote itself but cannot read back.
///
/// Always a 500; the details are logged and never sent to the client.
#[derive(Error, Debug)]
pub enum InternalError {
    /// The session holds a user id that is not a number.
    #[error("Session user id '{value}' is not a valid id: {source}")]
    SessionUserId {
        value: String,
        #[source]
        source: ParseIntError,
    },
}
