//! Resolution of which hooks are active for a run.

use crate::hooks::{lookup, registry, HookMetadata, RuleType};
use std::collections::BTreeSet;

/// The set of hooks that are active for a run.
///
/// Mandatory hooks are always active. Opt-out hooks are active unless
/// explicitly disabled, opt-in hooks only when explicitly enabled. The
/// default value therefore activates all mandatory and opt-out hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    opted_out: BTreeSet<&'static str>,
    opted_in: BTreeSet<&'static str>,
}

impl Selection {
    /// Enable or disable a hook. Requests to change a mandatory hook are
    /// ignored; requests matching a hook's default state are no-ops.
    pub fn set_enabled(&mut self, hook: &HookMetadata, enabled: bool) {
        match hook.rule_type {
            RuleType::Mandatory => {},
            RuleType::OptOut => {
                if enabled {
                    self.opted_out.remove(hook.name);
                } else {
                    self.opted_out.insert(hook.name);
                }
            },
            RuleType::OptIn => {
                if enabled {
                    self.opted_in.insert(hook.name);
                } else {
                    self.opted_in.remove(hook.name);
                }
            },
        }
    }

    /// Enable or disable a hook by name. Unknown names are ignored.
    pub fn set_enabled_by_name(&mut self, name: &str, enabled: bool) {
        if let Some(hook) = lookup(name) {
            self.set_enabled(hook, enabled);
        }
    }

    /// Whether the given hook is active under this selection.
    pub fn is_active(&self, hook: &HookMetadata) -> bool {
        match hook.rule_type {
            RuleType::Mandatory => true,
            RuleType::OptOut => !self.opted_out.contains(hook.name),
            RuleType::OptIn => self.opted_in.contains(hook.name),
        }
    }

    /// All active hooks, in registry (alphabetical) order.
    pub fn active_hooks(&self) -> impl Iterator<Item = &'static HookMetadata> + '_ {
        registry().iter().filter(move |hook| self.is_active(hook))
    }
}
