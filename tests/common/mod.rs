#![allow(dead_code)]

use sovran_collections::{Object, Value};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sovran_collections=debug".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

/// A small object with one property and one getter.
#[derive(Debug)]
pub struct Person {
    pub name: String,
    pub age: i64,
}

impl Object for Person {
    fn class_name(&self) -> &str {
        "Person"
    }

    fn instance_of(&self, name: &str) -> bool {
        matches!(name, "Person" | "Named")
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(self.name.clone().into()),
            _ => None,
        }
    }

    fn call_method(&self, name: &str) -> Option<Value> {
        match name {
            "getAge" => Some(self.age.into()),
            _ => None,
        }
    }
}

pub fn person(name: &str, age: i64) -> Value {
    Value::object(Person {
        name: name.to_string(),
        age,
    })
}

/// An enum-like object usable as a map key.
#[derive(Debug)]
pub enum Suit {
    Hearts,
    Spades,
}

impl Object for Suit {
    fn class_name(&self) -> &str {
        "Suit"
    }

    fn enum_name(&self) -> Option<&str> {
        Some(match self {
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        })
    }
}

pub fn ints<'a>(values: impl Iterator<Item = (&'a sovran_collections::Key, &'a Value)>) -> Vec<i64> {
    values.filter_map(|(_, v)| v.as_int()).collect()
}
