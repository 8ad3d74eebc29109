/// Catalogue compile command.
pub mod compile;
/// Registry-driven record construction command.
pub mod new;
/// Value and record printing helpers.
pub mod print;
/// Reply decode command.
pub mod reply;
/// Token stream inspection command.
pub mod tokens;

#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod util;
