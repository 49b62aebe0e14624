pub use anyhow::{format_err, Context, Error, Result};
pub use itertools::{Either, Itertools};
