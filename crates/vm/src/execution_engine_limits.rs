//! Resource limits of one execution.

use neo_config::{
    VmLimitsConfig, MAX_INTEGER_SIZE, MAX_INVOCATION_STACK_SIZE, MAX_ITEM_SIZE, MAX_STACK_SIZE,
};

/// Limits enforced by the stack value system for one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionEngineLimits {
    /// Maximum number of live stack references.
    pub max_stack_size: usize,
    /// Maximum size in bytes of a single item, including its serialized form.
    pub max_item_size: usize,
    /// Maximum size in bytes of an integer.
    pub max_integer_size: usize,
    /// Maximum number of loaded contexts.
    pub max_invocation_stack_size: usize,
}

impl Default for ExecutionEngineLimits {
    fn default() -> Self {
        Self {
            max_stack_size: MAX_STACK_SIZE,
            max_item_size: MAX_ITEM_SIZE,
            max_integer_size: MAX_INTEGER_SIZE,
            max_invocation_stack_size: MAX_INVOCATION_STACK_SIZE,
        }
    }
}

impl From<&VmLimitsConfig> for ExecutionEngineLimits {
    fn from(config: &VmLimitsConfig) -> Self {
        Self {
            max_stack_size: config.max_stack_size,
            max_item_size: config.max_item_size,
            max_integer_size: config.max_integer_size,
            max_invocation_stack_size: config.max_invocation_stack_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = VmLimitsConfig {
            max_stack_size: 8,
            ..VmLimitsConfig::default()
        };
        let limits = ExecutionEngineLimits::from(&config);
        assert_eq!(limits.max_stack_size, 8);
        assert_eq!(limits.max_item_size, MAX_ITEM_SIZE);
    }
}
