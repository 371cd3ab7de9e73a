//! Blocks holding sub-objects and lists.

use pdxscript_foundation::DiagnosticCode;
use pdxscript_language::{Statement, StatementId};

use crate::extractor::Extractor;
use crate::registry::{ObjectKey, RegistryKind};

/// `name = { key = some_key }`: a name given by localization key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameDeclaration {
    /// The localization key.
    pub key: String,
}

impl<'a> Extractor<'a> {
    /// Requires `id` to be a block with exactly `expected` children.
    pub fn block_children(
        &mut self,
        id: StatementId,
        expected: usize,
        action: &str,
    ) -> Option<&'a [StatementId]> {
        let children = self.block(id, action)?;
        if children.len() == expected {
            return Some(children);
        }
        let node_type = self.document.key(id);
        self.report(
            self.document.start(id),
            DiagnosticCode::InvalidNodeCountOfType,
            action,
            &[&expected, &node_type, &children.len()],
        );
        None
    }

    /// Requires `id` to be a block and returns its children.
    pub fn block(&mut self, id: StatementId, action: &str) -> Option<&'a [StatementId]> {
        let document = self.document;
        match document.statement(id) {
            Statement::Block(block) => Some(&block.children),
            other => {
                self.report(
                    document.start(id),
                    DiagnosticCode::InvalidNodeType,
                    action,
                    &[&"a block", &other.kind_name()],
                );
                None
            }
        }
    }

    /// Extracts `name = { key = some_key }`.
    pub fn name_declaration(&mut self, id: StatementId, action: &str) -> Option<NameDeclaration> {
        let &[child] = self.block_children(id, 1, action)? else {
            return None;
        };
        if self.document.key(child) != "key" {
            self.report(
                self.document.start(id),
                DiagnosticCode::MissingRequiredField,
                action,
                &[&"key", &"name declaration"],
            );
            return None;
        }
        let key = self.identifier(child, action)?;
        Some(NameDeclaration { key })
    }

    /// Extracts the bare entries of `key = { a b c }`.
    ///
    /// Every bad entry is reported; the list fails if any entry does.
    pub fn identifier_list(&mut self, id: StatementId, action: &str) -> Option<Vec<String>> {
        let document = self.document;
        let children = self.block(id, action)?;
        let mut entries = Vec::with_capacity(children.len());
        let mut ok = true;
        for &child in children {
            match document.statement(child) {
                Statement::KeyOnly(entry) => match self.identifier_token(entry.key, action) {
                    Some(name) => entries.push(name),
                    None => ok = false,
                },
                other => {
                    self.report(
                        document.start(child),
                        DiagnosticCode::InvalidNodeType,
                        action,
                        &[&"a key-only entry", &other.kind_name()],
                    );
                    ok = false;
                }
            }
        }
        ok.then_some(entries)
    }

    /// Extracts a list of keys that must all resolve in the `kind` registry.
    pub fn key_list(&mut self, id: StatementId, kind: RegistryKind, action: &str) -> Option<Vec<ObjectKey>> {
        let document = self.document;
        let children = self.block(id, action)?;
        let mut keys = Vec::with_capacity(children.len());
        let mut ok = true;
        for &child in children {
            match document.statement(child) {
                Statement::KeyOnly(entry) => match self.resolve_token(entry.key, kind, action) {
                    Some(key) => keys.push(key),
                    None => ok = false,
                },
                other => {
                    self.report(
                        document.start(child),
                        DiagnosticCode::InvalidNodeType,
                        action,
                        &[&"a key-only entry", &other.kind_name()],
                    );
                    ok = false;
                }
            }
        }
        ok.then_some(keys)
    }
}
