use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// Convenience `Error` enum for the balanced tree maps.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An insertion found an equal key already in the map. The map was not modified.
    KeyExists,
    /// A removal did not find the key. The map was not modified.
    KeyNotFound,
    /// The node storage could not grow to hold a new node.
    AllocationFailure(TryReserveError),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::AllocationFailure(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::AllocationFailure(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::KeyExists => write!(f, "key already exists"),
            Error::KeyNotFound => write!(f, "key not found"),
            Error::AllocationFailure(error) => write!(f, "allocation failure: {}", error),
        }
    }
}

/// Convenience `Result` type for the balanced tree maps.
pub type Result<T> = result::Result<T, Error>;
