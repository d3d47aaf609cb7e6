//! Text addons

use tsubaki_addons::{register_addon, AddonContract};
use tsubaki_core::AddonOutput;

// ============ echo ============

/// Joins its arguments with single spaces
#[derive(Debug, Default)]
pub struct Echo;

impl AddonContract for Echo {
    fn execute(&self, args: &[String]) -> AddonOutput {
        AddonOutput::handled().with_callback(args.join(" "))
    }
}

register_addon!(Echo {
    kind: "echo",
    name: Some("echo"),
    domains: ["echo", "text"],
});

// ============ reverse ============

/// Reverses argument order and the characters of each argument.
/// Declares no name, so lookups reach it only through its type name.
#[derive(Debug, Default)]
pub struct Reverse;

impl AddonContract for Reverse {
    fn execute(&self, args: &[String]) -> AddonOutput {
        let reversed: Vec<String> = args
            .iter()
            .rev()
            .map(|a| a.chars().rev().collect())
            .collect();
        AddonOutput::handled().with_callback(reversed.join(" "))
    }
}

register_addon!(Reverse {
    kind: "reverse",
    name: None,
    domains: ["text", "reverse"],
});
