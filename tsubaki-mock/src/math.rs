//! Math addons

use tracing::debug;
use tsubaki_addons::{register_addon, AddonContract};
use tsubaki_core::AddonOutput;

// ============ sum ============

/// Sums integer arguments. The callback carries the `i64` total on success
/// or a message naming the offending argument on failure.
#[derive(Debug, Default)]
pub struct Sum;

impl AddonContract for Sum {
    fn execute(&self, args: &[String]) -> AddonOutput {
        let mut total: i64 = 0;
        for arg in args {
            let n = match arg.trim().parse::<i64>() {
                Ok(n) => n,
                Err(_) => {
                    return AddonOutput::failed().with_callback(format!("not an integer: '{}'", arg));
                }
            };
            total = match total.checked_add(n) {
                Some(t) => t,
                None => return AddonOutput::failed().with_callback("overflow".to_string()),
            };
        }
        debug!(total, "sum computed");
        AddonOutput::handled().with_callback(total)
    }
}

register_addon!(Sum {
    kind: "sum",
    name: Some("sum"),
    domains: ["math", "sum"],
});

// ============ maintenance ============

/// A switched-off addon: always declines
#[derive(Debug, Default)]
pub struct Maintenance;

impl AddonContract for Maintenance {
    fn execute(&self, _args: &[String]) -> AddonOutput {
        AddonOutput::declined()
    }
}

register_addon!(Maintenance {
    kind: "maintenance",
    name: Some("maintenance"),
    domains: ["math", "maintenance"],
    priority: 10,
});

#[cfg(test)]
mod tests {
    use super::*;
    use tsubaki_core::TriState;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sum() {
        let out = Sum.execute(&args(&["1", " 2 ", "-4"]));
        assert_eq!(out.state, TriState::Handled);
        assert_eq!(out.callback.unwrap().downcast::<i64>().unwrap(), -1);
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let out = Sum.execute(&[]);
        assert_eq!(out.callback.unwrap().downcast::<i64>().unwrap(), 0);
    }

    #[test]
    fn test_sum_rejects_non_integers() {
        let out = Sum.execute(&args(&["1", "two"]));
        assert_eq!(out.state, TriState::Failed);
        let msg = out.callback.unwrap().downcast::<String>().unwrap();
        assert!(msg.contains("two"));
    }

    #[test]
    fn test_sum_overflow_fails() {
        let out = Sum.execute(&[i64::MAX.to_string(), "1".to_string()]);
        assert_eq!(out.state, TriState::Failed);
    }

    #[test]
    fn test_maintenance_declines() {
        let out = Maintenance.execute(&args(&["1"]));
        assert_eq!(out.state, TriState::Declined);
        assert!(out.callback.is_none());
    }
}
