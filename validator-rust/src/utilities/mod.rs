pub mod json;
pub mod orders;
pub mod privacy;

use crate::errors::*;


/// Utility for building a closure that prefixes an error with the name of the offending argument.
pub fn prepend(text: &str) -> impl Fn(Error) -> Error + '_ {
    move |e| format!("{} {}", text, e).into()
}
