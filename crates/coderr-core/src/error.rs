//! The error chain: plain roots, foreign roots and three wrapper kinds.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::render::Renderer;
use crate::status::Status;
use crate::{ErrorKind, Stack};

/// A node in an error chain.
///
/// `Error` is a cheap handle; cloning shares the node and everything below
/// it. Wrapping never copies the wrapped chain.
#[derive(Clone)]
pub struct Error {
    node: Arc<Node>,
}

pub(crate) enum Node {
    Plain(String),
    Foreign(Box<dyn StdError + Send + Sync + 'static>),
    Stack {
        error: Error,
        stack: Stack,
    },
    Code {
        /// Failure whose text this node renders.
        error: Error,
        code: i32,
        cause: Option<Error>,
        stack: Stack,
        skip_depth: usize,
    },
    Message {
        cause: Error,
        message: String,
    },
}

/// Options for [`Error::new_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeOptions {
    skip_depth: usize,
}

impl CodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide `depth` frames from the front of the captured stack.
    ///
    /// Meant for helper constructors that sit one level removed from the
    /// real call site.
    pub fn skip_depth(mut self, depth: usize) -> Self {
        self.skip_depth = depth;
        self
    }
}

// ── Constructors ──────────────────────────────────────────────────

impl Error {
    fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// A plain failure: no stack, no code.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_node(Node::Plain(message.into()))
    }

    /// Wrap a failure produced outside this crate as a chain root.
    pub fn from_std<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_node(Node::Foreign(Box::new(err)))
    }

    /// A plain failure with a stack captured at the call site.
    #[inline(never)]
    pub fn new_with_stack(message: impl Into<String>) -> Self {
        Self::stacked(Error::new(message), Stack::capture(1))
    }

    /// A coded failure whose own text is `message`.
    #[inline(never)]
    pub fn new_with_code(code: i32, message: impl Into<String>) -> Self {
        Self::coded(Error::new(message), code, None, Stack::capture(1), 0)
    }

    /// Same as [`Error::new_with_code`], with construction options.
    #[inline(never)]
    pub fn new_with_options(code: i32, message: impl Into<String>, options: CodeOptions) -> Self {
        Self::coded(
            Error::new(message),
            code,
            None,
            Stack::capture(1),
            options.skip_depth,
        )
    }

    pub(crate) fn stacked(error: Error, stack: Stack) -> Self {
        Self::from_node(Node::Stack { error, stack })
    }

    pub(crate) fn coded(
        error: Error,
        code: i32,
        cause: Option<Error>,
        stack: Stack,
        skip_depth: usize,
    ) -> Self {
        Self::from_node(Node::Code {
            error,
            code,
            cause,
            stack,
            skip_depth,
        })
    }
}

// ── Wrapping ──────────────────────────────────────────────────────

impl Error {
    /// Annotate with a stack trace taken here.
    ///
    /// A coded chain is re-stamped: a new code node keeps the code and the
    /// underlying failure of the outermost code node. A stack node is
    /// returned as is, keeping its first capture point.
    #[inline(never)]
    pub fn with_stack(self) -> Self {
        self.restack(Stack::capture(1))
    }

    /// Annotate with a stack trace and a message.
    ///
    /// On a coded chain the message becomes the text of a new code node.
    /// Otherwise a message node is added, plus a stack node when the chain
    /// has no stack yet.
    #[inline(never)]
    pub fn wrap_stack(self, message: impl Into<String>) -> Self {
        self.restack_with_message(message.into(), Stack::capture(1))
    }

    /// Classify with `code`. The newest code wins during resolution.
    #[inline(never)]
    pub fn with_code(self, code: i32) -> Self {
        self.recode(code, Stack::capture(1))
    }

    /// Classify with `code` and replace the rendered text with `message`.
    #[inline(never)]
    pub fn wrap_code(self, code: i32, message: impl Into<String>) -> Self {
        self.recode_with_message(code, message.into(), Stack::capture(1))
    }

    /// Layer a message over this error. Classification is unchanged.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self::from_node(Node::Message {
            cause: self,
            message: message.into(),
        })
    }

    pub(crate) fn restack(self, stack: Stack) -> Self {
        if let Some((error, code)) = self.code_node().map(|(e, c)| (e.clone(), c)) {
            return Self::coded(error, code, Some(self), stack, 0);
        }
        if self.kind() == ErrorKind::Stack {
            return self;
        }
        Self::stacked(self, stack)
    }

    pub(crate) fn restack_with_message(self, message: String, stack: Stack) -> Self {
        if let Some(code) = self.find_code() {
            return Self::coded(Error::new(message), code, Some(self), stack, 0);
        }
        let has_stack = self.chain().any(|e| e.kind() == ErrorKind::Stack);
        let annotated = self.with_message(message);
        if has_stack {
            annotated
        } else {
            Self::stacked(annotated, stack)
        }
    }

    pub(crate) fn recode(self, code: i32, stack: Stack) -> Self {
        let error = self.clone();
        Self::coded(error, code, Some(self), stack, 0)
    }

    pub(crate) fn recode_with_message(self, code: i32, message: String, stack: Stack) -> Self {
        Self::coded(Error::new(message), code, Some(self), stack, 0)
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Error {
    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    /// Kind of this node.
    pub fn kind(&self) -> ErrorKind {
        match &*self.node {
            Node::Plain(_) => ErrorKind::Plain,
            Node::Foreign(_) => ErrorKind::Foreign,
            Node::Stack { .. } => ErrorKind::Stack,
            Node::Code { .. } => ErrorKind::Code,
            Node::Message { .. } => ErrorKind::Message,
        }
    }

    /// The predecessor of this node, `None` at the root.
    ///
    /// A stack node's predecessor is the failure it wraps. A code node built
    /// from scratch has none.
    pub fn cause(&self) -> Option<&Error> {
        match &*self.node {
            Node::Plain(_) | Node::Foreign(_) => None,
            Node::Stack { error, .. } => Some(error),
            Node::Code { cause, .. } => cause.as_ref(),
            Node::Message { cause, .. } => Some(cause),
        }
    }

    /// Whether this node has no predecessor.
    pub fn is_root(&self) -> bool {
        self.cause().is_none()
    }

    /// Follow the cause relation to the innermost node.
    pub fn root_cause(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.cause() {
            err = cause;
        }
        err
    }

    /// Iterate this node and all of its predecessors, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The code carried by this node, if it is a code node.
    pub fn code(&self) -> Option<i32> {
        match &*self.node {
            Node::Code { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The code of the outermost code node in the chain.
    pub fn find_code(&self) -> Option<i32> {
        self.chain().find_map(Error::code)
    }

    fn code_node(&self) -> Option<(&Error, i32)> {
        self.chain().find_map(|e| match &*e.node {
            Node::Code { error, code, .. } => Some((error, *code)),
            _ => None,
        })
    }

    /// The stack captured by this node.
    pub fn stack(&self) -> Option<&Stack> {
        match &*self.node {
            Node::Stack { stack, .. } | Node::Code { stack, .. } => Some(stack),
            _ => None,
        }
    }

    /// Frames hidden from the front of this node's stack when rendering.
    pub fn skip_depth(&self) -> usize {
        match &*self.node {
            Node::Code { skip_depth, .. } => *skip_depth,
            _ => 0,
        }
    }

    /// The wrapped failure whose text a stack or code node shows.
    pub fn underlying(&self) -> Option<&Error> {
        match &*self.node {
            Node::Stack { error, .. } | Node::Code { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The text owned by a plain root or a message node.
    pub fn message(&self) -> Option<&str> {
        match &*self.node {
            Node::Plain(message) | Node::Message { message, .. } => Some(message),
            _ => None,
        }
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Error) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Find a foreign error of type `E` in the chain.
    ///
    /// Foreign roots are searched together with their own `source()` chains.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.chain().find_map(|e| match &*e.node {
            Node::Foreign(foreign) => {
                let mut current: Option<&(dyn StdError + 'static)> = Some(&**foreign);
                while let Some(err) = current {
                    if let Some(found) = err.downcast_ref::<E>() {
                        return Some(found);
                    }
                    current = err.source();
                }
                None
            }
            _ => None,
        })
    }

    /// A transport status this error was decoded from, if any.
    pub fn embedded_status(&self) -> Option<&Status> {
        self.downcast_ref::<Status>()
    }
}

/// Iterator over an error chain, see [`Error::chain`].
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

// ── Formatting ────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer::detached().write_plain(f, self)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer::detached().write_verbose(f, self)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &*self.node {
            Node::Foreign(foreign) => foreign.source(),
            _ => self.cause().map(|cause| cause as &(dyn StdError + 'static)),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::from_std(err)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::new(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::new(message)
    }
}
