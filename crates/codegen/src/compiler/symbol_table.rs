//! Scope-indexed symbol table used during lowering.

use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub scope: Scope,
    pub index: u32,
    pub kind: VarKind,
}

struct Frame {
    bindings: IndexMap<String, Symbol>,
    next_index: u32,
}

impl Frame {
    fn new() -> Self {
        Frame {
            bindings: IndexMap::new(),
            next_index: 0,
        }
    }
}

/// Nested lexical scopes; the root scope is global. Indices are assigned
/// in declaration order within each scope.
pub struct SymbolTable {
    frames: Vec<Frame>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            frames: vec![Frame::new()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn leave_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn at_root(&self) -> bool {
        self.frames.len() == 1
    }

    pub fn define(&mut self, name: &str, kind: VarKind) -> Symbol {
        let scope = if self.at_root() {
            Scope::Global
        } else {
            Scope::Local
        };
        let frame = self.frames.last_mut().expect("root scope always present");
        let symbol = Symbol {
            name: name.to_string(),
            scope,
            index: frame.next_index,
            kind,
        };
        frame.next_index += 1;
        frame.bindings.insert(name.to_string(), symbol.clone());
        symbol
    }

    /// Walk outward to the root scope.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order_per_scope() {
        let mut table = SymbolTable::new();
        assert_eq!(table.define("a", VarKind::Var).index, 0);
        assert_eq!(table.define("b", VarKind::Const).index, 1);
        table.enter_scope();
        let inner = table.define("c", VarKind::Var);
        assert_eq!(inner.index, 0);
        assert_eq!(inner.scope, Scope::Local);
        table.leave_scope();
        assert_eq!(table.define("d", VarKind::Var).index, 2);
    }

    #[test]
    fn resolution_walks_outward_and_shadows() {
        let mut table = SymbolTable::new();
        table.define("x", VarKind::Var);
        table.enter_scope();
        assert_eq!(table.resolve("x").unwrap().scope, Scope::Global);
        table.define("x", VarKind::Const);
        assert_eq!(table.resolve("x").unwrap().scope, Scope::Local);
        table.leave_scope();
        assert_eq!(table.resolve("x").unwrap().kind, VarKind::Var);
        assert!(table.resolve("y").is_none());
    }
}
