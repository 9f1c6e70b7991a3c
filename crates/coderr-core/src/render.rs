//! Plain, verbose and compact rendering of error chains.
//!
//! Plain text is what users see. Verbose output walks the chain from the
//! root outwards and lists every captured stack, one frame per two lines.
//! Compact output carries the same history on a single line with only the
//! top frame of each stack.

use std::fmt::{self, Write};

use crate::error::Node;
use crate::{Error, Registry};

pub(crate) struct Renderer<'r> {
    registry: Option<&'r Registry>,
}

impl<'r> Renderer<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// Renders without coder lookups.
    pub(crate) fn detached() -> Self {
        Self { registry: None }
    }

    /// User facing text of the coder registered for `code`.
    fn external(&self, code: i32) -> Option<String> {
        let registry = self.registry?;
        let coder = registry.get_coder(code);
        let message = coder.message();
        (!message.is_empty()).then(|| message.to_string())
    }

    pub(crate) fn write_plain<W: Write>(&self, out: &mut W, err: &Error) -> fmt::Result {
        match err.node() {
            Node::Plain(message) => out.write_str(message),
            Node::Foreign(foreign) => write!(out, "{foreign}"),
            Node::Stack { error, .. } => self.write_plain(out, error),
            Node::Code { error, code, .. } => match self.external(*code) {
                Some(external) => out.write_str(&external),
                None => self.write_plain(out, error),
            },
            Node::Message { message, .. } => out.write_str(message),
        }
    }

    pub(crate) fn write_verbose<W: Write>(&self, out: &mut W, err: &Error) -> fmt::Result {
        match err.node() {
            Node::Plain(_) | Node::Foreign(_) => self.write_plain(out, err),
            Node::Stack { error, stack } => {
                self.write_verbose(out, error)?;
                stack.write_verbose(out, 0)
            }
            Node::Code {
                error,
                code,
                cause,
                stack,
                skip_depth,
            } => {
                if let Some(cause) = cause {
                    self.write_verbose(out, cause)?;
                    out.write_char('\n')?;
                }
                self.write_header(out, err, error, *code)?;
                stack.write_verbose(out, *skip_depth)
            }
            Node::Message { cause, message } => {
                self.write_verbose(out, cause)?;
                write!(out, "\n{message}")
            }
        }
    }

    pub(crate) fn write_compact<W: Write>(&self, out: &mut W, err: &Error) -> fmt::Result {
        match err.node() {
            Node::Plain(_) | Node::Foreign(_) => self.write_plain(out, err),
            Node::Stack { error, stack } => {
                self.write_compact(out, error)?;
                stack.write_compact(out, 0)
            }
            Node::Code {
                error,
                code,
                cause,
                stack,
                skip_depth,
            } => {
                if let Some(cause) = cause {
                    self.write_compact(out, cause)?;
                    out.write_str("; ")?;
                }
                self.write_header(out, err, error, *code)?;
                stack.write_compact(out, *skip_depth)
            }
            Node::Message { cause, message } => {
                self.write_compact(out, cause)?;
                write!(out, "; {message}")
            }
        }
    }

    /// `#{n} ({code}) {external}, {underlying}` where `n` counts the code
    /// nodes below this one.
    fn write_header<W: Write>(
        &self,
        out: &mut W,
        node: &Error,
        underlying: &Error,
        code: i32,
    ) -> fmt::Result {
        let depth = node
            .chain()
            .skip(1)
            .filter(|e| e.code().is_some())
            .count();
        write!(out, "#{depth} ({code}) ")?;
        if let Some(external) = self.external(code) {
            write!(out, "{external}, ")?;
        }
        self.write_plain(out, underlying)
    }

    pub(crate) fn plain(&self, err: &Error) -> String {
        let mut out = String::new();
        let _ = self.write_plain(&mut out, err);
        out
    }

    pub(crate) fn verbose(&self, err: &Error) -> String {
        let mut out = String::new();
        let _ = self.write_verbose(&mut out, err);
        out
    }

    pub(crate) fn compact(&self, err: &Error) -> String {
        let mut out = String::new();
        let _ = self.write_compact(&mut out, err);
        out
    }
}

impl Registry {
    /// Text for users and API responses.
    ///
    /// A code node shows the message registered for its code; every other
    /// node shows its own text.
    pub fn render_plain(&self, err: &Error) -> String {
        Renderer::new(self).plain(err)
    }

    /// Multi-line history for logs: each cause, then its stack trace.
    pub fn render_verbose(&self, err: &Error) -> String {
        Renderer::new(self).verbose(err)
    }

    /// Single-line history for structured logs.
    pub fn render_compact(&self, err: &Error) -> String {
        Renderer::new(self).compact(err)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stack::{Frame, Stack};
    use crate::Coder;

    fn frames(function: &str, line: u32) -> Stack {
        Stack::from_frames(vec![Frame::new(function, "src/lib.rs", line)])
    }

    fn registry() -> Registry {
        let registry = Registry::new();
        registry
            .register(Coder::new(1001, 400, "bad id"))
            .unwrap();
        registry
    }

    #[test]
    fn test_plain_uses_registered_message() {
        let registry = registry();
        let err = Error::coded(Error::new("id abc"), 1001, None, frames("app::load", 3), 0);
        assert_eq!(registry.render_plain(&err), "bad id");
        assert_eq!(err.to_string(), "id abc");
    }

    #[test]
    fn test_plain_unregistered_code_uses_unknown_text() {
        let registry = registry();
        let err = Error::coded(Error::new("x"), 4242, None, frames("app::load", 3), 0);
        assert_eq!(
            registry.render_plain(&err),
            "An internal server error occurred"
        );
    }

    #[test]
    fn test_verbose_code_chain() {
        let registry = registry();
        let root = Error::new("connection reset");
        let inner = Error::coded(root.clone(), 1001, Some(root), frames("app::db", 10), 0);
        let err = Error::coded(
            Error::new("load user"),
            1001,
            Some(inner.with_message("retrying")),
            frames("app::service", 20),
            0,
        );

        assert_eq!(
            registry.render_verbose(&err),
            "connection reset\n\
             #0 (1001) bad id, connection reset\n\
             app::db\n\tsrc/lib.rs:10\n\
             retrying\n\
             #1 (1001) bad id, load user\n\
             app::service\n\tsrc/lib.rs:20"
        );
    }

    #[test]
    fn test_compact_code_chain() {
        let registry = registry();
        let root = Error::new("connection reset");
        let inner = Error::coded(root.clone(), 1001, Some(root), frames("app::db", 10), 0);
        let err = inner.with_message("retrying");

        assert_eq!(
            registry.render_compact(&err),
            "connection reset; #0 (1001) bad id, connection reset [src/lib.rs:10 (app::db)]; retrying"
        );
    }

    #[test]
    fn test_stack_node_rendering() {
        let registry = registry();
        let err = Error::stacked(Error::new("eof"), frames("app::read", 5));
        assert_eq!(registry.render_plain(&err), "eof");
        assert_eq!(registry.render_verbose(&err), "eof\napp::read\n\tsrc/lib.rs:5");
        assert_eq!(registry.render_compact(&err), "eof [src/lib.rs:5 (app::read)]");
    }

    #[test]
    fn test_skip_depth_hides_frames() {
        let registry = registry();
        let stack = Stack::from_frames(vec![
            Frame::new("app::codes::new_bad_id", "src/codes.rs", 1),
            Frame::new("app::handler", "src/handler.rs", 9),
        ]);
        let err = Error::coded(Error::new("id abc"), 1001, None, stack, 1);
        assert_eq!(
            registry.render_compact(&err),
            "#0 (1001) bad id, id abc [src/handler.rs:9 (app::handler)]"
        );
    }

    #[test]
    fn test_detached_debug_omits_external_text() {
        let err = Error::coded(Error::new("id abc"), 1001, None, Stack::from_frames(vec![]), 0);
        assert_eq!(format!("{err:?}"), "#0 (1001) id abc");
    }
}
