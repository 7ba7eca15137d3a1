/// The finalized registry and the entries it holds.
///
/// Defines [`core::Registry`], the operator and function entry types, and the
/// capability traits their implementations are called through.
pub mod core;
/// Fluent construction of registries.
///
/// Entries are described with partial builders and validated when the
/// registry is finalized.
pub mod builder;
/// The built-in operators, functions and constants.
pub mod builtin;
