//! Resolved type representation and the assignability oracle.

use indexmap::IndexMap;
use std::rc::Rc;

/// Family of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// `any`, the universal supertype. Its base is 1 so every base is
    /// divisible by it.
    Any,
    Primitive,
    Function,
    Iterable,
    Map,
    Struct,
    Trait,
    Union,
    Intersection,
    /// A typed literal `T(v)`.
    Literal,
}

/// Literal value carried by a typed literal's metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Rune(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// One generic slot of a parameterized type. `bound` is the constraint
/// while the slot is open and the concrete argument once one was applied;
/// `applied` records which of the two it is.
#[derive(Debug, Clone)]
pub struct GenericBinding {
    pub name: String,
    pub index: u32,
    pub bound: Rc<Type>,
    pub applied: bool,
}

/// Named entries attached to a type: generics, function parameters, the
/// return type, methods and structural properties. The non-generic
/// families share one ordered map, disambiguated by a reserved `#` key
/// prefix so user-visible property names can never collide with them.
#[derive(Debug, Clone, Default)]
pub struct ParameterStack {
    generics: Vec<GenericBinding>,
    entries: IndexMap<String, Rc<Type>>,
}

impl ParameterStack {
    pub fn new() -> Self {
        ParameterStack::default()
    }

    pub fn push_generic(&mut self, name: impl Into<String>, bound: Rc<Type>) {
        let index = self.generics.len() as u32;
        self.generics.push(GenericBinding {
            name: name.into(),
            index,
            bound,
            applied: false,
        });
    }

    pub fn generics(&self) -> &[GenericBinding] {
        &self.generics
    }

    /// Slots still awaiting a concrete argument.
    pub fn open_generics(&self) -> impl Iterator<Item = &GenericBinding> {
        self.generics.iter().filter(|binding| !binding.applied)
    }

    pub fn generic(&self, name: &str) -> Option<&GenericBinding> {
        self.generics.iter().find(|binding| binding.name == name)
    }

    pub fn generic_at(&self, index: u32) -> Option<&GenericBinding> {
        self.generics.get(index as usize)
    }

    /// Renames the generic at `index` and reopens it; a type definition
    /// re-exposes the slots of the type it extends under its own names.
    pub fn alias_generic(&mut self, index: u32, name: &str) {
        if let Some(binding) = self.generics.get_mut(index as usize) {
            binding.name = name.to_string();
            binding.applied = false;
        }
    }

    /// Binds the generic at `index` to a concrete argument, closing the
    /// slot.
    pub fn bind_generic(&mut self, index: u32, argument: Rc<Type>) {
        if let Some(binding) = self.generics.get_mut(index as usize) {
            binding.bound = argument;
            binding.applied = true;
        }
    }

    pub fn set_parameter(&mut self, index: u32, ty: Rc<Type>) {
        self.entries.insert(format!("#param:{index}"), ty);
    }

    pub fn parameter(&self, index: u32) -> Option<&Rc<Type>> {
        self.entries.get(&format!("#param:{index}"))
    }

    pub fn parameter_count(&self) -> usize {
        self.entries
            .keys()
            .filter(|key| key.starts_with("#param:"))
            .count()
    }

    pub fn set_return(&mut self, ty: Rc<Type>) {
        self.entries.insert("#return".to_string(), ty);
    }

    pub fn return_type(&self) -> Option<&Rc<Type>> {
        self.entries.get("#return")
    }

    pub fn set_method(&mut self, index: u32, ty: Rc<Type>) {
        self.entries.insert(format!("#method:{index}"), ty);
    }

    pub fn method(&self, index: u32) -> Option<&Rc<Type>> {
        self.entries.get(&format!("#method:{index}"))
    }

    pub fn set_property(&mut self, name: &str, ty: Rc<Type>) -> bool {
        self.entries.insert(name.to_string(), ty).is_none()
    }

    pub fn property(&self, name: &str) -> Option<&Rc<Type>> {
        self.entries.get(name)
    }

    /// Structural properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Rc<Type>)> {
        self.entries
            .iter()
            .filter(|(key, _)| !key.starts_with('#'))
            .map(|(key, ty)| (key.as_str(), ty))
    }
}

/// A resolved type. `base` is the product of the primes of the type and
/// all its ancestors; subtyping is divisibility of bases.
#[derive(Debug, Clone)]
pub struct Type {
    pub base: u128,
    pub kind: TypeKind,
    /// Concrete types this type was applied to; for operated types, the
    /// two operand sides.
    pub arguments: Vec<Rc<Type>>,
    pub parameters: ParameterStack,
    pub metadata: Option<LiteralValue>,
}

impl Type {
    pub fn new(base: u128, kind: TypeKind) -> Self {
        Type {
            base,
            kind,
            arguments: Vec::new(),
            parameters: ParameterStack::new(),
            metadata: None,
        }
    }

    pub fn any() -> Self {
        Type::new(1, TypeKind::Any)
    }

    /// Whether a value of `source` may be used where `self` is expected.
    ///
    /// Operated types are decomposed structurally before the divisibility
    /// check: a union target accepts when either side does, an
    /// intersection target only when both sides do; a union source must be
    /// accepted wholesale, an intersection source when either factor is.
    pub fn accepts(&self, source: &Type) -> bool {
        match self.kind {
            TypeKind::Union => {
                return self
                    .arguments
                    .iter()
                    .any(|side| side.accepts(source));
            }
            TypeKind::Intersection => {
                return self
                    .arguments
                    .iter()
                    .all(|side| side.accepts(source));
            }
            _ => {}
        }
        match source.kind {
            TypeKind::Union => source.arguments.iter().all(|side| self.accepts(side)),
            TypeKind::Intersection => {
                source.arguments.iter().any(|side| self.accepts(side))
            }
            _ => source.base % self.base == 0,
        }
    }
}
