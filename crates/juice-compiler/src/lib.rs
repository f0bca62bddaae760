//! Directive compiler for Juice templates.
//!
//! This crate turns directive occurrences found in a template (`if`, `foreach`,
//! `include`, ...) into executable code fragments. The caller scans the template
//! and hands each occurrence to a [`TagCompiler`], which resolves the directive
//! through a [`DirectiveRegistry`] and tracks nesting on a [`NestingStack`].
//!
//! # Architecture
//!
//! - [`Directive`]: compilation behavior for one directive kind
//! - [`DirectiveRegistry`]: canonical names and single-hop aliases
//! - [`NestingStack`]: open closable directives, owned by one compilation pass
//! - [`StackView`]: what a directive sees of the stack (read all, write top context)
//! - [`TagCompiler`]: resolves, compiles, pushes/pops frames, wraps fragments
//! - [`CompilationPass`]: per-template driver that checks the stack is empty at the end
//!
//! The registry is built once and is read-only afterwards, so a single
//! [`TagCompiler`] can serve many passes running on separate threads.
//!
//! # Example
//!
//! ```
//! use juice_compiler::{NestingStack, TagCompiler};
//!
//! let compiler = TagCompiler::with_builtins();
//! let mut stack = NestingStack::new();
//!
//! let open = compiler.compile_opening("foreach", "$items as $item", &mut stack).unwrap();
//! assert_eq!(open.as_str(), "<?php foreach ($items as $item): ?>");
//! assert_eq!(stack.depth(), 1);
//!
//! let close = compiler.compile_closing("foreach", &mut stack).unwrap();
//! assert_eq!(close.as_str(), "<?php endforeach ?>");
//! assert!(stack.is_empty());
//! ```

pub mod builtins;
mod compiler;
mod directive;
mod error;
mod fragment;
mod pass;
mod registry;
mod stack;

pub use compiler::TagCompiler;
pub use directive::{Directive, Opening};
pub use error::CompileError;
pub use fragment::{Delimiters, Fragment};
pub use pass::CompilationPass;
pub use registry::DirectiveRegistry;
pub use stack::{Frame, FrameContext, NestingStack, StackView};
