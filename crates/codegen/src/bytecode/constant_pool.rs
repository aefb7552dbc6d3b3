//! Append-only constant pool.

use super::value::Value;
use serde::Serialize;

/// Constants referenced by index from `Constant` instructions. Entries are
/// never deduplicated: indices are assigned in source-encounter order and
/// tests assert on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstantPool {
    constants: Vec<Value>,
}

impl ConstantPool {
    pub fn new() -> Self {
        ConstantPool::default()
    }

    pub fn add(&mut self, value: Value) -> u32 {
        self.constants.push(value);
        self.constants.len() as u32 - 1
    }

    pub fn get(&self, index: u32) -> Option<&Value> {
        self.constants.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.constants.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_sequential_without_dedup() {
        let mut pool = ConstantPool::new();
        assert_eq!(pool.add(Value::Integer(5)), 0);
        assert_eq!(pool.add(Value::Integer(5)), 1);
        assert_eq!(pool.add(Value::Str("5".to_string())), 2);
        assert_eq!(pool.len(), 3);
    }
}
