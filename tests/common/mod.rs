//! DTO fixtures shared by the integration tests.
//!
//! `Employee` is the well-behaved reference DTO. The others each break one part of the contract.

#![allow(dead_code)]

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use dto_contract::{Dto, MapValueProvider};

// ============================================================================
// Employee
// ============================================================================

#[derive(Debug, Clone, Default, Hash)]
pub struct Employee {
    first_name: Option<String>,
    last_name: Option<String>,
    age: i64,
}

#[dto_contract::introspect]
impl Employee {
    /// Copy constructor.
    pub fn from_source(source: &Employee) -> Self {
        source.clone()
    }

    pub fn get_first_name(&self) -> Option<String> {
        self.first_name.clone()
    }

    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.first_name = first_name;
    }

    pub fn get_last_name(&self) -> Option<String> {
        self.last_name.clone()
    }

    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.last_name = last_name;
    }

    pub fn get_age(&self) -> i64 {
        self.age
    }

    pub fn set_age(&mut self, age: i64) {
        self.age = age;
    }

    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

impl Dto for Employee {
    /// Equal when `other` has no first name, otherwise a case-insensitive first-name match.
    fn equals(&self, other: &Self) -> bool {
        match (&self.first_name, &other.first_name) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(mine), Some(theirs)) => mine.eq_ignore_ascii_case(theirs),
        }
    }

    fn populate(&mut self, source: &Self) -> &mut Self {
        self.first_name = source.first_name.clone();
        self.last_name = source.last_name.clone();
        self.age = source.age;
        self
    }
}

pub fn employee_values() -> MapValueProvider {
    MapValueProvider::new()
        .with_input("first_name", "Foo")
        .with_input("last_name", "Bar")
        .with_input("age", 55)
        .with_default("first_name", None::<String>)
        .with_default("last_name", None::<String>)
        .with_default("age", 0)
}

// ============================================================================
// Badge: hash ignores `label`
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Badge {
    id: i64,
    label: String,
}

impl Hash for Badge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[dto_contract::introspect]
impl Badge {
    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn get_label(&self) -> String {
        self.label.clone()
    }

    pub fn set_label(&mut self, label: String) {
        self.label = label;
    }
}

impl Dto for Badge {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn populate(&mut self, source: &Self) -> &mut Self {
        self.clone_from(source);
        self
    }
}

pub fn badge_values() -> MapValueProvider {
    MapValueProvider::new().with_input("id", 7).with_input("label", "gold")
}

// ============================================================================
// Ledger: populate forgets `memo`
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Hash)]
pub struct Ledger {
    amount: i64,
    memo: Option<String>,
}

#[dto_contract::introspect]
impl Ledger {
    pub fn get_amount(&self) -> i64 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: i64) {
        self.amount = amount;
    }

    pub fn get_memo(&self) -> Option<String> {
        self.memo.clone()
    }

    pub fn set_memo(&mut self, memo: Option<String>) {
        self.memo = memo;
    }
}

impl Dto for Ledger {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn populate(&mut self, source: &Self) -> &mut Self {
        self.amount = source.amount;
        self
    }
}

pub fn ledger_values() -> MapValueProvider {
    MapValueProvider::new().with_input("amount", 120).with_input("memo", "rent")
}

// ============================================================================
// Gadget: one usable field, several unusable accessors
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Hash)]
pub struct Gadget {
    serial: u32,
    weight: i64,
    active: bool,
    cache: u32,
}

#[dto_contract::introspect]
impl Gadget {
    pub fn get_serial(&self) -> u32 {
        self.serial
    }

    pub fn get_weight(&self) -> i64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: i32) {
        self.weight = i64::from(weight);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn get_rows(&self, count: usize) -> Vec<u32> {
        vec![self.serial; count]
    }

    #[dto(skip)]
    pub fn get_cache(&self) -> u32 {
        self.cache
    }
}

impl Dto for Gadget {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn populate(&mut self, source: &Self) -> &mut Self {
        self.clone_from(source);
        self
    }
}

pub fn gadget_values() -> MapValueProvider {
    MapValueProvider::new().with_input("active", true)
}

// ============================================================================
// Fragile: mutator panics
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Hash)]
pub struct Fragile {
    name: String,
}

#[dto_contract::introspect]
impl Fragile {
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn set_name(&mut self, _name: String) {
        panic!("name is read-only");
    }
}

impl Dto for Fragile {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn populate(&mut self, source: &Self) -> &mut Self {
        self.clone_from(source);
        self
    }
}

pub fn fragile_values() -> MapValueProvider {
    MapValueProvider::new().with_input("name", "glass")
}

// ============================================================================
// Account: mutator returns an error
// ============================================================================

pub const ACCOUNT_CODE_LIMIT: i64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Hash)]
pub struct Account {
    code: i64,
}

#[dto_contract::introspect]
impl Account {
    pub fn get_code(&self) -> i64 {
        self.code
    }

    pub fn set_code(&mut self, code: i64) -> Result<(), String> {
        if code > ACCOUNT_CODE_LIMIT {
            return Err(format!("code {code} exceeds {ACCOUNT_CODE_LIMIT}"));
        }
        self.code = code;
        Ok(())
    }
}

impl Dto for Account {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn populate(&mut self, source: &Self) -> &mut Self {
        self.code = source.code;
        self
    }
}

pub fn account_values() -> MapValueProvider {
    MapValueProvider::new().with_input("code", 55)
}

// ============================================================================
// Unbuildable: `Default` panics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Unbuildable {
    id: i64,
}

impl Default for Unbuildable {
    fn default() -> Self {
        panic!("no default id available");
    }
}

#[dto_contract::introspect]
impl Unbuildable {
    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Dto for Unbuildable {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn populate(&mut self, source: &Self) -> &mut Self {
        self.id = source.id;
        self
    }
}

// ============================================================================
// Exhaustible: `Default` works for the first few instances only
// ============================================================================

static EXHAUSTIBLE_BUILT: AtomicUsize = AtomicUsize::new(0);

/// Instances `Exhaustible::default()` hands out before it starts panicking.
pub const EXHAUSTIBLE_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Exhaustible {
    id: i64,
}

impl Default for Exhaustible {
    fn default() -> Self {
        let built = EXHAUSTIBLE_BUILT.fetch_add(1, Ordering::SeqCst);
        assert!(built < EXHAUSTIBLE_LIMIT, "pool exhausted after {built} instances");
        Self { id: 0 }
    }
}

#[dto_contract::introspect]
impl Exhaustible {
    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Dto for Exhaustible {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn populate(&mut self, source: &Self) -> &mut Self {
        self.id = source.id;
        self
    }
}
