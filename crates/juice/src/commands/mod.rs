//! CLI command implementations.

pub(crate) mod compile;
pub(crate) mod directives;

pub(crate) use compile::CompileArgs;
pub(crate) use directives::DirectivesArgs;
