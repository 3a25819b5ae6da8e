//! Constant pool of an ABC file.
//!
//! Each kind of literal has its own table. Index 0 is reserved in every table,
//! so the first interned entry gets index 1.

use indexmap::IndexSet;

use crate::error::{Result, TaasError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstantPool {
    ints: IndexSet<i32>,
    uints: IndexSet<u32>,
    /// Stored by bit pattern so every double, NaN included, has one entry.
    doubles: IndexSet<u64>,
    strings: IndexSet<String>,
}

fn pool_index(position: usize) -> u32 {
    position as u32 + 1
}

fn lookup<'a, T>(table: &'a IndexSet<T>, pool: &'static str, index: u32) -> Result<&'a T> {
    index
        .checked_sub(1)
        .and_then(|position| table.get_index(position as usize))
        .ok_or(TaasError::MissingConstant { pool, index })
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `value`, adding it on first use.
    pub fn intern_int(&mut self, value: i32) -> u32 {
        pool_index(self.ints.insert_full(value).0)
    }

    pub fn intern_uint(&mut self, value: u32) -> u32 {
        pool_index(self.uints.insert_full(value).0)
    }

    pub fn intern_double(&mut self, value: f64) -> u32 {
        pool_index(self.doubles.insert_full(value.to_bits()).0)
    }

    pub fn intern_string(&mut self, value: &str) -> u32 {
        if let Some(position) = self.strings.get_index_of(value) {
            return pool_index(position);
        }
        pool_index(self.strings.insert_full(value.to_owned()).0)
    }

    pub fn int(&self, index: u32) -> Result<i32> {
        lookup(&self.ints, "int", index).copied()
    }

    pub fn uint(&self, index: u32) -> Result<u32> {
        lookup(&self.uints, "uint", index).copied()
    }

    pub fn double(&self, index: u32) -> Result<f64> {
        lookup(&self.doubles, "double", index).map(|bits| f64::from_bits(*bits))
    }

    pub fn string(&self, index: u32) -> Result<&str> {
        lookup(&self.strings, "string", index).map(String::as_str)
    }

    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }

    /// Total entries across all tables, reserved slots excluded.
    pub fn len(&self) -> usize {
        self.ints.len() + self.uints.len() + self.doubles.len() + self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
