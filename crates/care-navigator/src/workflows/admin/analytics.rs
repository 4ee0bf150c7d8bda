use std::collections::BTreeMap;

use serde::Serialize;

use crate::workflows::navigator::domain::QuestionnaireResponse;
use crate::workflows::navigator::vocabulary::{Concern, PaymentType, Urgency};

/// Aggregate counts over a set of submitted questionnaires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseAnalytics {
    pub total: usize,
    pub by_concern: BTreeMap<Concern, usize>,
    pub by_urgency: BTreeMap<Urgency, usize>,
    pub by_payment: BTreeMap<PaymentType, usize>,
    pub crisis_count: usize,
    pub open_to_community_count: usize,
}

impl ResponseAnalytics {
    pub fn from_responses<'a, I>(responses: I) -> Self
    where
        I: IntoIterator<Item = &'a QuestionnaireResponse>,
    {
        let mut analytics = Self::default();
        for response in responses {
            analytics.record(response);
        }
        analytics
    }

    fn record(&mut self, response: &QuestionnaireResponse) {
        self.total += 1;
        *self.by_concern.entry(response.primary_concern).or_default() += 1;
        *self.by_urgency.entry(response.urgency).or_default() += 1;
        *self.by_payment.entry(response.payment_type).or_default() += 1;
        if response.urgency == Urgency::Crisis {
            self.crisis_count += 1;
        }
        if response.open_to_community_programs {
            self.open_to_community_count += 1;
        }
    }
}
