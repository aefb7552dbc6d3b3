//! Built-in type registration.
//!
//! `set_comptime_builtins` claims the reserved primes in a fixed order:
//! function=11, iterable=13, map=17, uint8=19, uint16=23, uint32=29,
//! uint64=31, int8=37, int16=41, int32=43, int64=47, bool=53. The
//! remaining cardinals take the primes after those, and `any` sits at base
//! 1 so it accepts everything. Changing the order changes every base in
//! the system.

use super::{ParameterStack, Type, TypeKind, Typechecker};
use std::rc::Rc;

const COMPTIME: &[(&str, TypeKind)] = &[
    ("function", TypeKind::Function),
    ("iterable", TypeKind::Iterable),
    ("map", TypeKind::Map),
    ("uint8", TypeKind::Primitive),
    ("uint16", TypeKind::Primitive),
    ("uint32", TypeKind::Primitive),
    ("uint64", TypeKind::Primitive),
    ("int8", TypeKind::Primitive),
    ("int16", TypeKind::Primitive),
    ("int32", TypeKind::Primitive),
    ("int64", TypeKind::Primitive),
    ("bool", TypeKind::Primitive),
    ("int", TypeKind::Primitive),
    ("uint", TypeKind::Primitive),
    ("float32", TypeKind::Primitive),
    ("float64", TypeKind::Primitive),
];

const CAPITALIZED: &[(&str, &str)] = &[
    ("Uint8", "uint8"),
    ("Uint16", "uint16"),
    ("Uint32", "uint32"),
    ("Uint64", "uint64"),
    ("Int8", "int8"),
    ("Int16", "int16"),
    ("Int32", "int32"),
    ("Int64", "int64"),
    ("Bool", "bool"),
    ("Int", "int"),
    ("Uint", "uint"),
    ("Float32", "float32"),
    ("Float64", "float64"),
];

impl Typechecker {
    /// Pre-populate the symbol table with the primitive types.
    pub fn set_comptime_builtins(&mut self) {
        if self.symbols.contains_key("map") {
            return;
        }
        self.symbols
            .insert("any".to_string(), Rc::new(Type::any()));
        for (name, kind) in COMPTIME {
            let base = self.primes.next_prime();
            self.symbols
                .insert(name.to_string(), Rc::new(Type::new(base, *kind)));
        }
        // rune is a uint32 and string an iterable underneath
        let uint32 = self.existing("uint32");
        let rune = self.extend(&uint32, Vec::new(), ParameterStack::new());
        self.symbols.insert("rune".to_string(), rune);
        let iterable = self.existing("iterable");
        let string = self.extend(&iterable, Vec::new(), ParameterStack::new());
        self.symbols.insert("string".to_string(), string);
    }

    /// Define the conventional capitalized variants and the runtime
    /// standard types. Implies `set_comptime_builtins`.
    pub fn set_runtime_builtins(&mut self) {
        self.set_comptime_builtins();
        if self.symbols.contains_key("List") {
            return;
        }

        for (capital, lower) in CAPITALIZED {
            let parent = self.existing(lower);
            let child = self.extend(&parent, Vec::new(), ParameterStack::new());
            self.symbols.insert(capital.to_string(), child);
        }

        let uint32 = self.existing("Uint32");
        let rune = self.extend(&uint32, Vec::new(), ParameterStack::new());
        self.symbols.insert("Rune".to_string(), Rc::clone(&rune));

        let any = self.existing("any");
        let iterable = self.existing("iterable");
        let mut list_stack = ParameterStack::new();
        list_stack.push_generic("T", any);
        let list = self.extend(&iterable, Vec::new(), list_stack);
        self.symbols.insert("List".to_string(), Rc::clone(&list));

        let mut string_stack = list.parameters.clone();
        string_stack.bind_generic(0, Rc::clone(&rune));
        let string = self.extend(&list, vec![Rc::clone(&rune)], string_stack);
        self.symbols
            .insert("String".to_string(), Rc::clone(&string));

        // Printable: trait with a single method `string() String`
        let function = self.existing("function");
        let mut method_stack = ParameterStack::new();
        method_stack.set_return(string);
        let method = self.extend(&function, Vec::new(), method_stack);

        let map = self.existing("map");
        let mut trait_stack = ParameterStack::new();
        trait_stack.set_method(0, method);
        let mut printable = Type::new(map.base * self.primes.next_prime(), TypeKind::Trait);
        printable.parameters = trait_stack;
        self.symbols
            .insert("Printable".to_string(), Rc::new(printable));
    }

    fn existing(&self, name: &str) -> Rc<Type> {
        Rc::clone(
            self.symbols
                .get(name)
                .expect("builtin registered before use"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_primes_land_on_the_documented_bases() {
        let mut checker = Typechecker::new();
        checker.set_comptime_builtins();
        for (name, base) in [
            ("function", 11),
            ("iterable", 13),
            ("map", 17),
            ("uint8", 19),
            ("uint16", 23),
            ("uint32", 29),
            ("uint64", 31),
            ("int8", 37),
            ("int16", 41),
            ("int32", 43),
            ("int64", 47),
            ("bool", 53),
        ] {
            assert_eq!(checker.lookup(name).unwrap().base, base, "{name}");
        }
        assert_eq!(checker.lookup("any").unwrap().base, 1);
    }

    #[test]
    fn rune_and_string_extend_their_bases() {
        let mut checker = Typechecker::new();
        checker.set_comptime_builtins();
        assert_eq!(checker.lookup("rune").unwrap().base % 29, 0);
        assert_eq!(checker.lookup("string").unwrap().base % 13, 0);
    }

    #[test]
    fn runtime_builtins_are_descendants_of_their_primitives() {
        let mut checker = Typechecker::new();
        checker.set_runtime_builtins();
        let uint8 = Rc::clone(checker.lookup("uint8").unwrap());
        let capital = Rc::clone(checker.lookup("Uint8").unwrap());
        assert!(uint8.accepts(&capital));
        assert!(!capital.accepts(&uint8));

        let iterable = Rc::clone(checker.lookup("iterable").unwrap());
        let string = Rc::clone(checker.lookup("String").unwrap());
        let list = Rc::clone(checker.lookup("List").unwrap());
        assert!(iterable.accepts(&string));
        assert!(list.accepts(&string));

        let printable = checker.lookup("Printable").unwrap();
        assert!(printable.parameters.method(0).is_some());
    }

    #[test]
    fn runtime_builtins_are_idempotent() {
        let mut checker = Typechecker::new();
        checker.set_runtime_builtins();
        let base = checker.lookup("String").unwrap().base;
        checker.set_runtime_builtins();
        assert_eq!(checker.lookup("String").unwrap().base, base);
    }
}
