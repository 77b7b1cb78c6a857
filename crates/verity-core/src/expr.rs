//! Deferred boolean expression trees.
//!
//! An [`Expr`] is either a leaf thunk or a binary node joining two shared
//! sub-trees under a [`Connective`]. Nothing is evaluated until
//! [`Expr::evaluate`] is called, and every call walks the tree again.

use std::fmt;
use std::mem;
use std::rc::Rc;

/// Leaf computation over a subject of type `T`
type Thunk<T> = Rc<dyn Fn(&T) -> anyhow::Result<bool>>;

/// Binary operator joining two sub-expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// Short-circuit logical AND
    And,
    /// Short-circuit logical OR
    Or,
}

impl Connective {
    /// Label handed to merge policies as the connector string
    pub fn as_str(&self) -> &'static str {
        match self {
            Connective::And => "And",
            Connective::Or => "Or",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Node<T> {
    Leaf(Thunk<T>),
    Binary {
        op: Connective,
        left: Rc<Expr<T>>,
        right: Rc<Expr<T>>,
    },
}

/// A deferred boolean expression over a subject of type `T`.
///
/// Sub-trees are reference counted and never mutated, so cloning and
/// combining are cheap and leave the operands untouched.
pub struct Expr<T = ()> {
    node: Node<T>,
}

/// Expression with no subject, evaluated purely from captured state
pub type Condition = Expr<()>;

/// Expression evaluated against a subject supplied at evaluation time
pub type Predicate<T> = Expr<T>;

impl<T> Expr<T> {
    /// Create a leaf from an infallible closure
    pub fn leaf<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self::fallible_leaf(move |subject| Ok(f(subject)))
    }

    /// Create a leaf whose evaluation may fail
    pub fn fallible_leaf<F>(f: F) -> Self
    where
        F: Fn(&T) -> anyhow::Result<bool> + 'static,
    {
        Self {
            node: Node::Leaf(Rc::new(f)),
        }
    }

    /// Join `self` and `other` under `op`. Neither side is evaluated.
    pub fn combine(&self, op: Connective, other: &Self) -> Self {
        Self {
            node: Node::Binary {
                op,
                left: Rc::new(self.clone()),
                right: Rc::new(other.clone()),
            },
        }
    }

    /// Short-circuit AND of `self` and `other`
    pub fn and(&self, other: &Self) -> Self {
        self.combine(Connective::And, other)
    }

    /// Short-circuit OR of `self` and `other`
    pub fn or(&self, other: &Self) -> Self {
        self.combine(Connective::Or, other)
    }

    /// Evaluate the tree against `subject`.
    ///
    /// The right operand of a node is skipped once the left operand decides
    /// the result. The first leaf error aborts evaluation and is returned as is.
    /// Evaluation keeps its own stack, so chains of any length are safe.
    pub fn evaluate(&self, subject: &T) -> anyhow::Result<bool> {
        // Right operands waiting on the value of their left sibling
        let mut pending: Vec<(Connective, &Expr<T>)> = Vec::new();
        let mut next = Some(self);
        let mut value = false;

        while let Some(mut expr) = next.take() {
            loop {
                match &expr.node {
                    Node::Leaf(thunk) => {
                        value = thunk(subject)?;
                        break;
                    }
                    Node::Binary { op, left, right } => {
                        pending.push((*op, right.as_ref()));
                        expr = left.as_ref();
                    }
                }
            }

            while let Some((op, right)) = pending.pop() {
                let decided = matches!(
                    (op, value),
                    (Connective::And, false) | (Connective::Or, true)
                );
                if !decided {
                    next = Some(right);
                    break;
                }
            }
        }

        Ok(value)
    }

    /// Root operator, or `None` for a leaf
    pub fn connective(&self) -> Option<Connective> {
        match &self.node {
            Node::Leaf(_) => None,
            Node::Binary { op, .. } => Some(*op),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    /// Left and right operands of a binary node
    pub fn operands(&self) -> Option<(&Expr<T>, &Expr<T>)> {
        match &self.node {
            Node::Leaf(_) => None,
            Node::Binary { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }

    /// Number of leaf thunks in the tree
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match &expr.node {
                Node::Leaf(_) => count += 1,
                Node::Binary { left, right, .. } => {
                    stack.push(left.as_ref());
                    stack.push(right.as_ref());
                }
            }
        }
        count
    }

    /// Height of the tree; a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((expr, level)) = stack.pop() {
            match &expr.node {
                Node::Leaf(_) => deepest = deepest.max(level),
                Node::Binary { left, right, .. } => {
                    stack.push((left.as_ref(), level + 1));
                    stack.push((right.as_ref(), level + 1));
                }
            }
        }
        deepest
    }

    /// Move this node's children into `work`, leaving `placeholder` behind
    fn detach_children(&mut self, placeholder: &Thunk<T>, work: &mut Vec<Rc<Expr<T>>>) {
        let node = mem::replace(&mut self.node, Node::Leaf(Rc::clone(placeholder)));
        if let Node::Binary { left, right, .. } = node {
            work.push(left);
            work.push(right);
        }
    }
}

impl Condition {
    /// Create a leaf condition from a zero-argument closure
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self::leaf(move |_: &()| f())
    }

    /// Create a leaf condition whose evaluation may fail
    pub fn from_fallible_fn<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<bool> + 'static,
    {
        Self::fallible_leaf(move |_: &()| f())
    }

    /// Evaluate a subject-less condition
    pub fn eval(&self) -> anyhow::Result<bool> {
        self.evaluate(&())
    }
}

impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        let node = match &self.node {
            Node::Leaf(thunk) => Node::Leaf(Rc::clone(thunk)),
            Node::Binary { op, left, right } => Node::Binary {
                op: *op,
                left: Rc::clone(left),
                right: Rc::clone(right),
            },
        };
        Self { node }
    }
}

impl<T> Drop for Expr<T> {
    fn drop(&mut self) {
        if self.is_leaf() {
            return;
        }

        // Unlink uniquely owned sub-trees one at a time so dropping a long
        // chain never recurses.
        let placeholder: Thunk<T> = Rc::new(|_: &T| -> anyhow::Result<bool> { Ok(false) });
        let mut work = Vec::new();
        self.detach_children(&placeholder, &mut work);
        while let Some(child) = work.pop() {
            if let Ok(mut expr) = Rc::try_unwrap(child) {
                expr.detach_children(&placeholder, &mut work);
            }
        }
    }
}

enum DebugItem<'a, T> {
    Node(&'a Expr<T>),
    Text(&'static str),
}

impl<T> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![DebugItem::Node(self)];
        while let Some(item) = stack.pop() {
            match item {
                DebugItem::Text(text) => f.write_str(text)?,
                DebugItem::Node(expr) => match &expr.node {
                    Node::Leaf(_) => f.write_str("Leaf")?,
                    Node::Binary { op, left, right } => {
                        f.write_str(op.as_str())?;
                        f.write_str("(")?;
                        stack.push(DebugItem::Text(")"));
                        stack.push(DebugItem::Node(right.as_ref()));
                        stack.push(DebugItem::Text(", "));
                        stack.push(DebugItem::Node(left.as_ref()));
                    }
                },
            }
        }
        Ok(())
    }
}
