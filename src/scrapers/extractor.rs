use tracing::{debug, info};

use crate::error::{Result, ScoutError};
use crate::models::Availability;
use crate::scrapers::traits::PageSession;
use crate::scrapers::types::{Role, SelectorMap};
use crate::scrapers::wait::PollWait;

/// Reads the product fields from a loaded page
pub struct FieldExtractor<'a> {
    session: &'a dyn PageSession,
    selectors: &'a SelectorMap,
    wait: PollWait,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(session: &'a dyn PageSession, selectors: &'a SelectorMap, wait: PollWait) -> Self {
        Self {
            session,
            selectors,
            wait,
        }
    }

    /// Text of an element that must be on every product page.
    /// Fails with `ElementTimeout` if it never becomes visible.
    pub fn require_text(&self, role: Role) -> Result<String> {
        let locator = self.selectors.get(role);
        debug!("Waiting for {} ({})", role, locator);

        self.wait
            .poll(|| self.session.visible_text(locator))?
            .ok_or_else(|| ScoutError::ElementTimeout {
                role,
                locator: locator.clone(),
                waited: self.wait.timeout(),
            })
    }

    /// Whether an element becomes visible within the wait window
    pub fn is_present(&self, role: Role) -> Result<bool> {
        let locator = self.selectors.get(role);
        debug!("Checking presence of {} ({})", role, locator);

        let found = self
            .wait
            .poll(|| Ok(self.session.visible_text(locator)?.map(|_| ())))?;
        Ok(found.is_some())
    }

    pub fn description(&self) -> Result<String> {
        self.require_text(Role::Description)
    }

    pub fn price(&self) -> Result<String> {
        self.require_text(Role::Price)
    }

    pub fn availability(&self) -> Result<Availability> {
        let availability = Availability::from_presence(self.is_present(Role::BuyButton)?);
        info!("Buy button check: {}", availability);
        Ok(availability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::traits::MockPageSession;
    use crate::scrapers::types::Locator;
    use mockall::predicate::eq;
    use std::time::Duration;

    fn quick_wait() -> PollWait {
        PollWait::new(Duration::from_millis(30), Duration::from_millis(5))
    }

    #[test]
    fn test_require_text_returns_visible_text() {
        let selectors = SelectorMap::default();
        let mut session = MockPageSession::new();
        session
            .expect_visible_text()
            .with(eq(selectors.description.clone()))
            .times(1)
            .returning(|_| Ok(Some("Creatina Monohidratada 250g".to_string())));

        let extractor = FieldExtractor::new(&session, &selectors, quick_wait());
        assert_eq!(extractor.description().unwrap(), "Creatina Monohidratada 250g");
    }

    #[test]
    fn test_require_text_waits_for_late_element() {
        let selectors = SelectorMap::default();
        let mut session = MockPageSession::new();
        let mut calls = 0;
        session.expect_visible_text().returning(move |_| {
            calls += 1;
            Ok((calls >= 3).then(|| "R$ 89,90".to_string()))
        });

        let extractor = FieldExtractor::new(&session, &selectors, quick_wait());
        assert_eq!(extractor.price().unwrap(), "R$ 89,90");
    }

    #[test]
    fn test_missing_required_element_times_out() {
        let selectors = SelectorMap::default();
        let mut session = MockPageSession::new();
        session.expect_visible_text().returning(|_| Ok(None));

        let extractor = FieldExtractor::new(&session, &selectors, quick_wait());
        match extractor.price() {
            Err(ScoutError::ElementTimeout { role, locator, waited }) => {
                assert_eq!(role, Role::Price);
                assert_eq!(locator, selectors.price);
                assert_eq!(waited, Duration::from_millis(30));
            }
            other => panic!("expected ElementTimeout, got {:?}", other),
        }
    }

    #[test]
    fn test_buy_button_present_is_sim() {
        let selectors = SelectorMap::default();
        let mut session = MockPageSession::new();
        session
            .expect_visible_text()
            .with(eq(selectors.buy_button.clone()))
            .returning(|_| Ok(Some("Comprar".to_string())));

        let extractor = FieldExtractor::new(&session, &selectors, quick_wait());
        let availability = extractor.availability().unwrap();
        assert_eq!(availability, Availability::Available);
        assert_eq!(availability.to_string(), "SIM");
    }

    #[test]
    fn test_buy_button_absent_is_nao() {
        let selectors = SelectorMap::default();
        let mut session = MockPageSession::new();
        session.expect_visible_text().returning(|_| Ok(None));

        let extractor = FieldExtractor::new(&session, &selectors, quick_wait());
        let availability = extractor.availability().unwrap();
        assert_eq!(availability, Availability::Unavailable);
        assert_eq!(availability.to_string(), "NÃO");
    }

    #[test]
    fn test_session_failure_is_not_treated_as_absence() {
        let selectors = SelectorMap::default();
        let mut session = MockPageSession::new();
        session
            .expect_visible_text()
            .times(1)
            .returning(|_| Err(ScoutError::Session("target closed".to_string())));

        let extractor = FieldExtractor::new(&session, &selectors, quick_wait());
        assert!(matches!(
            extractor.availability(),
            Err(ScoutError::Session(_))
        ));
    }

    #[test]
    fn test_custom_selector_map_is_used() {
        let selectors = SelectorMap {
            description: Locator::xpath("//h1"),
            ..SelectorMap::default()
        };
        let mut session = MockPageSession::new();
        session
            .expect_visible_text()
            .with(eq(Locator::xpath("//h1")))
            .returning(|_| Ok(Some("Whey".to_string())));

        let extractor = FieldExtractor::new(&session, &selectors, quick_wait());
        assert_eq!(extractor.description().unwrap(), "Whey");
    }
}
