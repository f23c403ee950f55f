//! Host callback surface
//!
//! The host proxy calls [`HookRegistry::dispatch`] once per completed
//! exchange, on its own callback thread. Hooks run in registration order; a
//! failing hook is logged and the rest still run, mirroring how proxy
//! frameworks treat a misbehaving addon.

use crate::models::Exchange;

/// A consumer of completed exchanges.
pub trait ExchangeHook: Send + Sync {
    /// Invoked once per completed request/response pair.
    fn on_exchange_complete(&self, exchange: &Exchange) -> anyhow::Result<()>;

    /// Short identifier used in error logs.
    fn name(&self) -> &str {
        "hook"
    }
}

/// Ordered set of hooks sharing one dispatch point.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn ExchangeHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn ExchangeHook>) {
        tracing::debug!("Registered exchange hook '{}'", hook.name());
        self.hooks.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Deliver `exchange` to every hook in registration order.
    ///
    /// Returns the number of hooks that failed; failures do not stop
    /// delivery to later hooks.
    pub fn dispatch(&self, exchange: &Exchange) -> usize {
        let mut failures = 0;
        for hook in &self.hooks {
            if let Err(e) = hook.on_exchange_complete(exchange) {
                failures += 1;
                tracing::error!(
                    "Exchange hook '{}' failed for exchange {}: {:#}",
                    hook.name(),
                    exchange.id,
                    e
                );
            }
        }
        failures
    }
}
