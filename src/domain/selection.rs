use std::fmt;

use super::pricing::PricingRecommendation;

type Listener = Box<dyn FnMut(f64) + 'static>;

/// The price currently chosen in the pricing panel.
///
/// Starts unset, is reset to the recommended price whenever a recommendation
/// arrives and otherwise only changes through [`PricingSelection::select`].
/// A single listener is notified synchronously after every change.
#[derive(Default)]
pub struct PricingSelection {
    selected: Option<f64>,
    listener: Option<Listener>,
}

impl PricingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the selection to the recommendation's preferred price, dropping
    /// any earlier choice.
    pub fn initialize(&mut self, recommendation: &PricingRecommendation) {
        self.set(recommendation.recommended_price);
    }

    /// Accepts any price; callers decide which candidates to offer.
    pub fn select(&mut self, price: f64) {
        self.set(price);
    }

    pub fn current(&self) -> Option<f64> {
        self.selected
    }

    /// Registers the change listener, replacing the previous one.
    pub fn on_change(&mut self, callback: impl FnMut(f64) + 'static) {
        self.listener = Some(Box::new(callback));
    }

    pub fn clear_subscriber(&mut self) {
        self.listener = None;
    }

    fn set(&mut self, price: f64) {
        self.selected = Some(price);
        tracing::debug!(price, "pricing selection changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(price);
        }
    }
}

impl fmt::Debug for PricingSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingSelection")
            .field("selected", &self.selected)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::infra::estimator::fallback_recommendation;

    fn recommendation_at(price: f64) -> PricingRecommendation {
        let mut rec = fallback_recommendation();
        rec.recommended_price = price;
        rec.price_range.optimal = price;
        rec
    }

    fn recorder(selection: &mut PricingSelection) -> Rc<RefCell<Vec<f64>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        selection.on_change(move |price| sink.borrow_mut().push(price));
        seen
    }

    #[test]
    fn starts_unset() {
        assert_eq!(PricingSelection::new().current(), None);
    }

    #[test]
    fn initialize_selects_recommended_price() {
        let mut selection = PricingSelection::new();
        selection.initialize(&recommendation_at(3000.0));
        assert_eq!(selection.current(), Some(3000.0));
    }

    #[test]
    fn select_accepts_values_outside_the_offered_tiers() {
        let mut selection = PricingSelection::new();
        selection.initialize(&recommendation_at(2500.0));
        selection.select(1234.5);
        assert_eq!(selection.current(), Some(1234.5));
        selection.select(0.0);
        assert_eq!(selection.current(), Some(0.0));
    }

    #[test]
    fn reinitialize_overwrites_user_choice() {
        let mut selection = PricingSelection::new();
        selection.initialize(&recommendation_at(2500.0));
        selection.select(3500.0);
        selection.initialize(&recommendation_at(3000.0));
        assert_eq!(selection.current(), Some(3000.0));
    }

    #[test]
    fn notifies_once_per_change_in_call_order() {
        let mut selection = PricingSelection::new();
        let seen = recorder(&mut selection);

        selection.initialize(&recommendation_at(2500.0));
        selection.select(3500.0);
        selection.select(3500.0);
        selection.initialize(&recommendation_at(3000.0));

        assert_eq!(*seen.borrow(), vec![2500.0, 3500.0, 3500.0, 3000.0]);
    }

    #[test]
    fn new_subscriber_replaces_old_one() {
        let mut selection = PricingSelection::new();
        let first = recorder(&mut selection);
        selection.select(1.0);
        let second = recorder(&mut selection);
        selection.select(2.0);
        selection.clear_subscriber();
        selection.select(3.0);

        assert_eq!(*first.borrow(), vec![1.0]);
        assert_eq!(*second.borrow(), vec![2.0]);
        assert_eq!(selection.current(), Some(3.0));
    }

    #[test]
    fn tier_walkthrough_over_fallback_data() {
        let rec = fallback_recommendation();
        let mut selection = PricingSelection::new();
        selection.initialize(&rec);
        assert_eq!(selection.current(), Some(2500.0));

        selection.select(rec.price_range.maximum);
        assert_eq!(selection.current(), Some(3500.0));

        selection.select(rec.market_analysis.average_market_price);
        assert_eq!(selection.current(), Some(2800.0));
    }
}
