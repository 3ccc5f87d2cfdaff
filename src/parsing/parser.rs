//! Tree-building parser
//!
//! The parser keeps one cursor, the current node, and a table mapping token
//! types to [`NodeFactory`]s. Each token is handed to the factory registered
//! for its type together with the current node. Whatever node the factory
//! returns becomes the new current node:
//!
//! - returning a freshly appended child descends into it,
//! - returning the parent ascends,
//! - returning nothing leaves the cursor where it is.
//!
//! There is no explicit stack. The parent links of the tree are the stack.

use super::diagnostics::Diagnostic;
use super::node::{Node, NodeId, NodeType, Span, Tagged, Tree};
use crate::lexing::{Token, TokenSink, TokenType};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Folds one token into the tree.
///
/// `current` is the parser's cursor. The returned node becomes the new cursor;
/// `None` keeps the cursor unchanged.
pub trait NodeFactory {
    fn build(&self, tree: &mut Tree, current: NodeId, token: &Token) -> Option<NodeId>;
}

impl<F> NodeFactory for F
where
    F: Fn(&mut Tree, NodeId, &Token) -> Option<NodeId>,
{
    fn build(&self, tree: &mut Tree, current: NodeId, token: &Token) -> Option<NodeId> {
        self(tree, current, token)
    }
}

/// Factory for tokens that should not appear in the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl NodeFactory for Ignore {
    fn build(&self, _tree: &mut Tree, _current: NodeId, _token: &Token) -> Option<NodeId> {
        None
    }
}

/// Factory moving the cursor to the parent of the current node.
///
/// At the root the cursor stays put.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascend;

pub fn ascend() -> Ascend {
    Ascend
}

impl NodeFactory for Ascend {
    fn build(&self, tree: &mut Tree, current: NodeId, _token: &Token) -> Option<NodeId> {
        tree.parent(current).ok()
    }
}

/// Factory appending a child to the current node and moving into it.
pub struct Descend<F> {
    make: F,
}

pub fn descend<F>(make: F) -> Descend<F>
where
    F: Fn(&Token) -> Node,
{
    Descend { make }
}

impl<F> NodeFactory for Descend<F>
where
    F: Fn(&Token) -> Node,
{
    fn build(&self, tree: &mut Tree, current: NodeId, token: &Token) -> Option<NodeId> {
        tree.append(current, (self.make)(token)).ok()
    }
}

/// Factory appending a child to the current node without moving.
pub struct Leaf<F> {
    make: F,
}

pub fn leaf<F>(make: F) -> Leaf<F>
where
    F: Fn(&Token) -> Node,
{
    Leaf { make }
}

impl<F> NodeFactory for Leaf<F>
where
    F: Fn(&Token) -> Node,
{
    fn build(&self, tree: &mut Tree, current: NodeId, token: &Token) -> Option<NodeId> {
        // the cursor always belongs to the tree
        let _ = tree.append(current, (self.make)(token));
        None
    }
}

/// Node builder producing a [`Tagged`] node that carries the token value.
pub fn tagged(node_type: NodeType) -> impl Fn(&Token) -> Node {
    move |token: &Token| Node::from_token(Tagged::new(node_type.clone(), token.value.clone()), token)
}

/// Outcome of feeding a single token to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The factory returned a node, which is now the cursor.
    Moved(NodeId),
    /// The factory returned nothing; the cursor did not move.
    Stayed,
    /// The token was discarded.
    Skipped(Diagnostic),
}

/// A finished tree together with everything that was skipped while building it.
#[derive(Debug)]
pub struct ParseOutcome {
    pub tree: Tree,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Parser {
    tree: Tree,
    current: NodeId,
    factories: HashMap<TokenType, Box<dyn NodeFactory>>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    /// A parser whose tree starts with a payload-less root of `root_type`.
    pub fn new(root_type: NodeType) -> Self {
        Parser::with_root(Node::new(Tagged::bare(root_type), Span::default()))
    }

    pub fn with_root(root: Node) -> Self {
        let tree = Tree::new(root);
        Parser {
            current: tree.root(),
            tree,
            factories: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Map `typ` to `factory`. A later registration for the same type replaces
    /// the earlier one.
    pub fn register(&mut self, typ: TokenType, factory: impl NodeFactory + 'static) -> &mut Self {
        if self.factories.insert(typ.clone(), Box::new(factory)).is_some() {
            debug!(target: "parsekit::parser", %typ, "replaced node factory");
        }
        self
    }

    pub fn step(&mut self, token: &Token) -> Step {
        let Some(factory) = self.factories.get(&token.typ) else {
            return self.skip(Diagnostic::unmapped(token));
        };

        match factory.build(&mut self.tree, self.current, token) {
            Some(next) if self.tree.contains(next) => {
                trace!(
                    target: "parsekit::parser",
                    typ = %token.typ,
                    from = self.current.index(),
                    to = next.index(),
                    "cursor moved"
                );
                self.current = next;
                Step::Moved(next)
            }
            Some(next) => self.skip(Diagnostic::unknown_node(token, next)),
            None => Step::Stayed,
        }
    }

    fn skip(&mut self, diagnostic: Diagnostic) -> Step {
        warn!(
            target: "parsekit::parser",
            typ = %diagnostic.token.typ,
            offset = diagnostic.token.offset,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic.clone());
        Step::Skipped(diagnostic)
    }

    /// Feed a whole token stream.
    pub fn parse<I>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            self.step(&token);
        }
        self
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn finish(self) -> ParseOutcome {
        ParseOutcome {
            tree: self.tree,
            diagnostics: self.diagnostics,
        }
    }
}

impl TokenSink for Parser {
    fn visit(&mut self, token: Token) {
        self.step(&token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::diagnostics::DiagnosticKind;

    const ROOT: NodeType = NodeType::new("ROOT");
    const LIST: NodeType = NodeType::new("LIST");
    const ATOM: NodeType = NodeType::new("ATOM");

    const START: TokenType = TokenType::new("START");
    const END: TokenType = TokenType::new("END");
    const SYMBOL: TokenType = TokenType::new("SYMBOL");
    const WS: TokenType = TokenType::new("WS");

    fn parser() -> Parser {
        let mut parser = Parser::new(ROOT);
        parser
            .register(START, descend(tagged(LIST)))
            .register(END, ascend())
            .register(SYMBOL, leaf(tagged(ATOM)))
            .register(WS, Ignore);
        parser
    }

    fn tok(typ: TokenType, value: &str, offset: usize) -> Token {
        Token::new(typ, value).at(offset)
    }

    #[test]
    fn test_descend_and_ascend_move_the_cursor() {
        let mut parser = parser();
        let root = parser.tree().root();

        let list = match parser.step(&tok(START, "(", 0)) {
            Step::Moved(id) => id,
            other => panic!("expected a move, got {:?}", other),
        };
        assert_eq!(parser.current(), list);
        assert_eq!(parser.tree().parent(list), Ok(root));

        assert_eq!(parser.step(&tok(SYMBOL, "a", 1)), Step::Stayed);
        assert_eq!(parser.current(), list);

        assert_eq!(parser.step(&tok(END, ")", 2)), Step::Moved(root));
        assert_eq!(parser.current(), root);
    }

    #[test]
    fn test_ascend_at_root_stays() {
        let mut parser = parser();
        assert_eq!(parser.step(&tok(END, ")", 0)), Step::Stayed);
        assert_eq!(parser.current(), parser.tree().root());
    }

    #[test]
    fn test_ignored_tokens_leave_no_trace() {
        let mut parser = parser();
        assert_eq!(parser.step(&tok(WS, " ", 0)), Step::Stayed);
        assert_eq!(parser.tree().len(), 1);
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn test_unmapped_token_is_skipped_with_diagnostic() {
        let mut parser = parser();
        let stray = tok(TokenType::new("NUMBER"), "42", 3);
        match parser.step(&stray) {
            Step::Skipped(diagnostic) => {
                assert_eq!(diagnostic.kind, DiagnosticKind::UnmappedTokenType);
                assert_eq!(diagnostic.token, stray);
            }
            other => panic!("expected a skip, got {:?}", other),
        }
        assert_eq!(parser.diagnostics().len(), 1);
        assert_eq!(parser.tree().len(), 1);

        // parsing carries on
        assert!(matches!(parser.step(&tok(START, "(", 5)), Step::Moved(_)));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut parser = parser();
        parser.register(SYMBOL, Ignore);
        parser.step(&tok(SYMBOL, "a", 0));
        assert_eq!(parser.tree().len(), 1);
    }

    #[test]
    fn test_closure_factories() {
        let mut parser = Parser::new(ROOT);
        parser.register(
            SYMBOL,
            |tree: &mut Tree, current: NodeId, token: &Token| -> Option<NodeId> {
                let node = Node::from_token(Tagged::new(ATOM, token.value.to_uppercase()), token);
                tree.append(current, node).unwrap();
                None
            },
        );
        parser.step(&tok(SYMBOL, "abc", 0));
        let tree = parser.tree();
        let child = tree.children(tree.root())[0];
        assert_eq!(tree[child].render(), "ABC");
    }

    #[test]
    fn test_factory_returning_foreign_node_is_reported() {
        let mut parser = Parser::new(ROOT);
        let mut other = Tree::new(Node::new(Tagged::bare(ROOT), Span::default()));
        let foreign = other
            .append(other.root(), Node::new(Tagged::bare(ATOM), Span::default()))
            .unwrap();
        parser.register(SYMBOL, move |_: &mut Tree, _: NodeId, _: &Token| Some(foreign));

        let step = parser.step(&tok(SYMBOL, "x", 0));
        assert!(matches!(
            step,
            Step::Skipped(Diagnostic { kind: DiagnosticKind::UnknownNode, .. })
        ));
        assert_eq!(parser.current(), parser.tree().root());
    }

    #[test]
    fn test_factory_appending_to_foreign_parent_stays() {
        let mut parser = Parser::new(ROOT);
        let mut other = Tree::new(Node::new(Tagged::bare(ROOT), Span::default()));
        let foreign = other
            .append(other.root(), Node::new(Tagged::bare(ATOM), Span::default()))
            .unwrap();
        parser.register(
            SYMBOL,
            move |tree: &mut Tree, _: NodeId, token: &Token| -> Option<NodeId> {
                tree.append(foreign, Node::from_token(Tagged::bare(ATOM), token)).ok()
            },
        );

        assert_eq!(parser.step(&tok(SYMBOL, "x", 0)), Step::Stayed);
        assert_eq!(parser.current(), parser.tree().root());
        assert_eq!(parser.tree().len(), 1);
    }

    #[test]
    fn test_parser_as_token_sink() {
        let mut parser = parser();
        for token in [
            tok(START, "(", 0),
            tok(SYMBOL, "a", 1),
            tok(WS, " ", 2),
            tok(START, "(", 3),
            tok(SYMBOL, "b", 4),
            tok(END, ")", 5),
            tok(END, ")", 6),
        ] {
            parser.visit(token);
        }
        let outcome = parser.finish();
        let shape: Vec<_> = outcome
            .tree
            .walk()
            .map(|(id, depth)| (outcome.tree[id].node_type(), depth))
            .collect();
        assert_eq!(
            shape,
            vec![(ROOT, 0), (LIST, 1), (ATOM, 2), (LIST, 2), (ATOM, 3)]
        );
        assert!(outcome.diagnostics.is_empty());
    }
}
