//! Reasoning parameter shaping
//!
//! The host hands over a flat parameter bag; the remote endpoint wants
//! reasoning controls nested under a single `reasoning` object. The four
//! reasoning-related keys are always removed from the bag, whether or
//! not they end up used.

use serde_json::{Map, Value};

const REASONING_BUDGET: &str = "reasoning_budget";
const ENABLE_THINKING: &str = "enable_thinking";
const REASONING_EFFORT: &str = "reasoning_effort";
const EXCLUDE_REASONING_TOKENS: &str = "exclude_reasoning_tokens";

/// Repack reasoning-related parameters into the nested `reasoning` shape
///
/// `enable_thinking == "dynamic"` forces the budget to -1, overriding
/// any explicit value. When no nested key ends up set, no `reasoning`
/// key is emitted at all.
pub fn shape_reasoning_params(params: &mut Map<String, Value>) {
    let budget = params.remove(REASONING_BUDGET).filter(|v| !v.is_null());
    let enable_thinking = params.remove(ENABLE_THINKING).filter(|v| !v.is_null());
    let effort = params.remove(REASONING_EFFORT).filter(|v| !v.is_null());
    let exclude = params.remove(EXCLUDE_REASONING_TOKENS).filter(|v| !v.is_null());

    let budget = if enable_thinking.as_ref().and_then(Value::as_str) == Some("dynamic") {
        Some(Value::from(-1))
    } else {
        budget
    };

    let mut reasoning = Map::new();
    if let Some(budget) = budget {
        reasoning.insert("max_tokens".to_owned(), budget);
    }
    if let Some(effort) = effort {
        reasoning.insert("effort".to_owned(), effort);
    }
    if let Some(exclude) = exclude {
        reasoning.insert("exclude".to_owned(), exclude);
    }

    if !reasoning.is_empty() {
        params.insert("reasoning".to_owned(), Value::Object(reasoning));
    }
}
