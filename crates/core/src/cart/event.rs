//! Cart change notifications.

use serde::Serialize;

/// Something the customer should be told about after a cart change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new row was appended.
    Added { name: String },
    /// An addition was merged into an existing row.
    QuantityChanged { name: String, quantity: u32 },
    /// A row was removed.
    Removed { name: String },
    /// Every row was removed.
    Cleared,
}

impl CartEvent {
    /// Short machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::QuantityChanged { .. } => "quantity_changed",
            Self::Removed { .. } => "removed",
            Self::Cleared => "cleared",
        }
    }

    /// Toast title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Added { .. } => "Added to cart",
            Self::QuantityChanged { .. } => "Cart updated",
            Self::Removed { .. } => "Removed from cart",
            Self::Cleared => "Cart cleared",
        }
    }

    /// Toast body.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Added { name } => format!("{name} added to your cart"),
            Self::QuantityChanged { name, quantity } => {
                format!("{name} quantity increased to {quantity}")
            }
            Self::Removed { name } => format!("{name} removed from your cart"),
            Self::Cleared => "All items have been removed from your cart".to_owned(),
        }
    }
}

/// Receives cart notifications.
///
/// Implementations must return promptly and must not panic; the cart calls
/// them after the mutation is complete and ignores what they do.
pub trait CartObserver: Send + Sync {
    fn notify(&self, event: &CartEvent);
}

/// Observer that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn notify(&self, _event: &CartEvent) {}
}

/// Observer that logs every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CartObserver for TracingObserver {
    fn notify(&self, event: &CartEvent) {
        tracing::info!(
            kind = event.kind(),
            title = event.title(),
            "{}",
            event.description()
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let event = CartEvent::QuantityChanged {
            name: "Espresso".to_owned(),
            quantity: 3,
        };
        assert_eq!(event.kind(), "quantity_changed");
        assert_eq!(event.title(), "Cart updated");
        assert_eq!(event.description(), "Espresso quantity increased to 3");

        assert_eq!(
            CartEvent::Cleared.description(),
            "All items have been removed from your cart"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let event = CartEvent::Removed {
            name: "Lemonade".to_owned(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "removed");
        assert_eq!(json["name"], "Lemonade");
    }
}
