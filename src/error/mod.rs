mod convert;
mod parse;
mod resolve;

pub use convert::{BoxError, ConvertError};
pub use parse::ParseError;
pub use resolve::ResolveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
