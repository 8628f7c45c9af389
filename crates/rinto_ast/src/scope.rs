//! Lexical scopes and the chain of scopes open while parsing

use crate::backend::{Backend, LoweredScope};
use crate::named::NamedObject;
use crate::statements::Statement;
use indexmap::IndexMap;
use itertools::Itertools;
use log::trace;
use rinto_common::{Located, Location};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Identifies a scope. The supercontext is always id 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const SUPERCONTEXT: ScopeId = ScopeId(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

/// A lexical region, owning the statements written in it and the objects declared in it.
///
/// A scope only refers to its parent by [ScopeId], it never owns it.
#[derive(Debug, Clone)]
pub struct Scope {
    id: ScopeId,
    parent: Option<ScopeId>,
    objects: IndexMap<String, NamedObject>,
    statements: Vec<Statement>,
}

impl Scope {
    pub fn new(id: ScopeId, parent: Option<ScopeId>) -> Self {
        Self {
            id,
            parent,
            objects: IndexMap::new(),
            statements: vec![],
        }
    }

    /// The parentless scope every lookup chain ends in
    pub fn supercontext() -> Self {
        Self::new(ScopeId::SUPERCONTEXT, None)
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn is_supercontext(&self) -> bool {
        self.parent.is_none()
    }

    /// Finds an object declared directly in this scope
    pub fn lookup(&self, identifier: &str) -> Option<&NamedObject> {
        self.objects.get(identifier)
    }

    /// Removes a declaration from this scope
    pub fn undefine(&mut self, identifier: &str) -> Option<NamedObject> {
        self.objects.shift_remove(identifier)
    }

    /// Objects declared in this scope, in declaration order
    pub fn objects(&self) -> impl Iterator<Item = &NamedObject> {
        self.objects.values()
    }

    pub fn push_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Retracts the most recently pushed statement
    pub fn pop_statement(&mut self) -> Option<Statement> {
        self.statements.pop()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn statement(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    /// Number of statements in this scope
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Moves the statements out of this scope, leaving its declarations in place
    pub fn take_statements(&mut self) -> Vec<Statement> {
        std::mem::take(&mut self.statements)
    }

    /// Lowers every statement of this scope, in order.
    ///
    /// Scope entry and exit are signalled by the block statement that owns the scope.
    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> LoweredScope<B::Statement> {
        let statements = self
            .statements
            .into_iter()
            .map(|statement| statement.lower(backend))
            .collect();
        LoweredScope {
            id: self.id,
            objects: self.objects.into_values().collect(),
            statements,
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            write!(f, "(scope)")
        } else {
            write!(f, "(scope {})", self.statements.iter().join(" "))
        }
    }
}

/// An identifier was declared twice in the same lookup chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate definition of '{}'", .previous.identifier())]
pub struct Redefinition {
    /// The declaration that was kept
    pub previous: NamedObject,
    /// Where the rejected declaration was written
    pub location: Location,
}

/// The scopes currently open, from the supercontext to the innermost scope.
///
/// Every scope in the chain is the parent of the one after it.
#[derive(Debug)]
pub struct ScopeChain {
    open: Vec<Scope>,
    next_id: usize,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeChain {
    /// Creates a chain containing only the supercontext
    pub fn new() -> Self {
        Self {
            open: vec![Scope::supercontext()],
            next_id: 1,
        }
    }

    /// The innermost open scope
    pub fn current(&self) -> &Scope {
        self.open.last().expect("scope chain always holds the supercontext")
    }

    pub fn current_mut(&mut self) -> &mut Scope {
        self.open
            .last_mut()
            .expect("scope chain always holds the supercontext")
    }

    pub fn supercontext(&self) -> &Scope {
        &self.open[0]
    }

    pub fn supercontext_mut(&mut self) -> &mut Scope {
        &mut self.open[0]
    }

    /// Number of scopes open inside the supercontext
    pub fn depth(&self) -> usize {
        self.open.len() - 1
    }

    /// Opens a new scope nested in the current one
    pub fn enter(&mut self) -> ScopeId {
        let id = ScopeId(self.next_id);
        self.next_id += 1;
        let parent = self.current().id();
        trace!("entering scope {id:?} (parent {parent:?})");
        self.open.push(Scope::new(id, Some(parent)));
        id
    }

    /// Closes the current scope, handing it back.
    ///
    /// # Panic
    /// Panics if no nested scope is open, the supercontext is never left.
    pub fn leave(&mut self) -> Scope {
        assert!(self.open.len() > 1, "the supercontext can not be left");
        let scope = self.open.pop().expect("a nested scope is open");
        trace!("leaving scope {:?}", scope.id());
        scope
    }

    /// Declares an identifier in the current scope.
    ///
    /// Fails if the identifier already resolves anywhere in the chain; the existing declaration is
    /// left untouched.
    pub fn define(
        &mut self,
        identifier: &str,
        location: Location,
    ) -> Result<NamedObject, Redefinition> {
        if let Some(previous) = self.resolve(identifier) {
            return Err(Redefinition {
                previous: previous.clone(),
                location,
            });
        }
        let object = NamedObject::new(identifier, location);
        trace!(
            "defined {identifier} at {} in {:?}",
            object.location(),
            self.current().id()
        );
        self.current_mut()
            .objects
            .insert(identifier.to_string(), object.clone());
        Ok(object)
    }

    /// Finds an object declared directly in the current scope
    pub fn lookup(&self, identifier: &str) -> Option<&NamedObject> {
        self.current().lookup(identifier)
    }

    /// Finds an object by walking from the current scope up to the supercontext
    pub fn resolve(&self, identifier: &str) -> Option<&NamedObject> {
        self.open
            .iter()
            .rev()
            .find_map(|scope| scope.lookup(identifier))
    }

    pub fn is_defined(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_some()
    }

    pub fn push_statement(&mut self, statement: Statement) {
        self.current_mut().push_statement(statement)
    }

    pub fn pop_statement(&mut self) -> Option<Statement> {
        self.current_mut().pop_statement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use test_log::test;

    fn at(line: usize) -> Location {
        Location::new(Path::new("main.rin"), 0, line, 0)
    }

    #[test]
    fn test_define_and_lookup() {
        let mut chain = ScopeChain::new();
        let x = chain.define("x", at(0)).unwrap();
        assert_eq!(chain.lookup("x"), Some(&x));
        assert!(chain.is_defined("x"));
        assert!(!chain.is_defined("y"));
    }

    #[test]
    fn test_redefinition_keeps_original() {
        let mut chain = ScopeChain::new();
        let x = chain.define("x", at(0)).unwrap();
        let err = chain.define("x", at(1)).unwrap_err();
        assert_eq!(err.previous, x);
        assert_eq!(err.location, at(1));
        assert_eq!(err.to_string(), "duplicate definition of 'x'");
        assert_eq!(chain.resolve("x").map(|x| x.location()), Some(at(0)));
    }

    #[test]
    fn test_redefinition_of_ancestor_is_rejected() {
        let mut chain = ScopeChain::new();
        chain.define("x", at(0)).unwrap();
        chain.enter();
        assert!(chain.define("x", at(1)).is_err());
    }

    #[test]
    fn test_lookup_is_local_but_resolve_walks_chain() {
        let mut chain = ScopeChain::new();
        chain.define("x", at(0)).unwrap();
        chain.enter();
        assert!(chain.lookup("x").is_none());
        assert!(chain.resolve("x").is_some());
        chain.define("y", at(1)).unwrap();
        let inner = chain.leave();
        assert!(inner.lookup("y").is_some());
        assert!(!chain.is_defined("y"));
    }

    #[test]
    fn test_parents_link_to_enclosing_scope() {
        let mut chain = ScopeChain::new();
        let first = chain.enter();
        let second = chain.enter();
        assert_ne!(first, second);
        assert_eq!(chain.current().parent(), Some(first));
        assert_eq!(chain.depth(), 2);
        chain.leave();
        assert_eq!(chain.current().parent(), Some(ScopeId::SUPERCONTEXT));
    }

    #[test]
    #[should_panic]
    fn test_supercontext_cannot_be_left() {
        let mut chain = ScopeChain::new();
        assert!(chain.current().is_supercontext());
        chain.leave();
    }

    #[test]
    fn test_push_and_pop_statements() {
        let mut chain = ScopeChain::new();
        chain.push_statement(Statement::Invalid(at(0)));
        chain.push_statement(Statement::Invalid(at(1)));
        assert_eq!(chain.current().len(), 2);
        assert!(matches!(chain.pop_statement(), Some(Statement::Invalid(location)) if location == at(1)));
        assert_eq!(chain.current().len(), 1);
    }

    #[test]
    fn test_undefine() {
        let mut scope = Scope::supercontext();
        scope.objects.insert("x".to_string(), NamedObject::new("x", at(0)));
        assert!(scope.undefine("x").is_some());
        assert!(scope.lookup("x").is_none());
        assert_eq!(scope.objects().count(), 0);
    }
}
