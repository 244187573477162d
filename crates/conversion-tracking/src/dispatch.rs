use {
    crate::{
        AnalyticsEvent,
        AnalyticsTracking,
        ContactSync,
        ConversionEvent,
        ConversionTracking,
        MarketingEvent,
        MarketingTracking,
        TrackError,
    },
    model::{CompletedDonation, PersonalData},
    std::sync::Arc,
};

#[derive(prometheus_metric_storage::MetricStorage, Clone, Debug)]
#[metric(subsystem = "side_effects")]
struct Metrics {
    /// Number of post-payment side-effect calls that failed.
    #[metric(labels("effect"))]
    failures: prometheus::IntCounterVec,
}

impl Metrics {
    fn get() -> &'static Self {
        Metrics::instance(observe::metrics::get_storage_registry()).unwrap()
    }
}

/// The post-payment notification fan-out.
pub struct SideEffects {
    analytics: Arc<dyn AnalyticsTracking>,
    conversion: Arc<dyn ConversionTracking>,
    marketing: Arc<dyn MarketingTracking>,
}

impl SideEffects {
    pub fn new(
        analytics: Arc<dyn AnalyticsTracking>,
        conversion: Arc<dyn ConversionTracking>,
        marketing: Arc<dyn MarketingTracking>,
    ) -> Self {
        Self {
            analytics,
            conversion,
            marketing,
        }
    }

    /// Notifies the trackers about a confirmed donation, one after another.
    ///
    /// Every call is isolated: a failure is logged and counted, never
    /// propagated, and the remaining trackers still run. Callers invoke this
    /// only after the success has been committed, so a broken tracker can
    /// delay the confirmation but never turn it into a payment failure.
    pub async fn dispatch(&self, completed: &CompletedDonation, personal: &PersonalData) {
        let analytics = AnalyticsEvent {
            event: AnalyticsEvent::PAYMENT_SUCCESS,
            value: completed.amount,
            donation_kind: completed.kind.as_ref().to_string(),
            payment_method: completed.method.as_ref().to_string(),
            transaction_id: completed.transaction_id.clone(),
        };
        record("analytics", self.analytics.payment_succeeded(&analytics)).await;

        let conversion = ConversionEvent {
            event_type: ConversionEvent::DONATION,
            transaction_id: completed.transaction_id.clone(),
            email: personal.email.clone(),
            document: personal.document.clone(),
            value: completed.amount,
            campaign: completed.campaign.clone(),
            collaborator: completed.collaborator.clone(),
        };
        record("conversion", self.conversion.donation_conversion(&conversion)).await;

        let marketing = MarketingEvent {
            event_id: MarketingEvent::DONATION_COMPLETED,
            email: personal.email.clone(),
            name: personal.name.clone(),
            phone: personal.phone.clone(),
            campaign: completed.campaign.clone(),
            collaborator: completed.collaborator.clone(),
        };
        record("marketing", self.marketing.donation_event(&marketing)).await;

        let contact = ContactSync {
            name: personal.name.clone(),
            email: personal.email.clone(),
            phone: personal.phone.clone(),
            document: personal.document.clone(),
        };
        record("contact_sync", self.conversion.sync_contact(&contact)).await;
    }
}

async fn record(effect: &str, call: impl Future<Output = Result<(), TrackError>>) {
    if let Err(err) = call.await {
        tracing::warn!(?err, effect, "post-payment side effect failed");
        Metrics::get().failures.with_label_values(&[effect]).inc();
    }
}
