//! Turns a finished wizard state into one payment call against the donor
//! backend, and drives everything that follows a confirmed payment.
//!
//! The submission has exactly four network shapes, picked by donor status
//! and instrument: a new donor's card or debit goes through "create donor
//! and pay", a returning donor's card is charged and their debit registered
//! against the existing account. Everything before the call resolves
//! locally: the debit login gate, the donation's own validation rules, and
//! the identity check. Once the backend confirms, the success is committed
//! (history appended, wizard state cleared) before any tracker hears about
//! it, so a broken tracker can never turn a paid donation into an error.

pub mod history;
mod payload;
pub mod receipt;

pub use history::{EntryHistory, HistoryStoring};

use {
    chrono::Utc,
    conversion_tracking::SideEffects,
    dso_api::{DonorApi, DsoError, FALLBACK_ERROR, Session},
    model::{CompletedDonation, DonationRecord, PaymentInstrument, PersonalData},
    std::sync::Arc,
    wizard::{FlowRules, StateStore, Step, StepInvalid, step_requirements},
};

#[derive(prometheus_metric_storage::MetricStorage, Clone, Debug)]
#[metric(subsystem = "checkout")]
struct Metrics {
    /// Donation submissions by outcome.
    #[metric(labels("outcome"))]
    submissions: prometheus::IntCounterVec,
}

impl Metrics {
    fn get() -> &'static Self {
        Metrics::instance(observe::metrics::get_storage_registry()).unwrap()
    }
}

/// Opens the login UI. Signalled when a submission needs a session that is
/// not there.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait LoginPrompting: Send + Sync {
    fn open_login(&self);
}

#[derive(Clone, Debug, Default)]
pub struct SubmitOptions {
    /// The payment call should create the donor's account too.
    pub new_donor: bool,
    /// Personal data to use as-is, taking precedence over the wizard state
    /// and the remote profile. Lets a caller submit exactly what the donor
    /// just typed without depending on state-update timing.
    pub direct_personal: Option<PersonalData>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Recurring debits need an authenticated donor. Not a hard failure:
    /// the login prompt has been opened and the submission can be retried
    /// once the donor is signed in.
    #[error("LOGIN_REQUIRED_FOR_DEBIT")]
    LoginRequiredForDebit,
    /// No payment instrument was ever selected. Nothing was sent.
    #[error("Dados da doação incompletos")]
    IncompleteDonation,
    /// The donation does not pass its own step rules. Nothing was sent.
    #[error(transparent)]
    Invalid(#[from] StepInvalid),
    /// Identity fields every payment needs are still empty. Nothing was
    /// sent.
    #[error("Dados pessoais incompletos. Campos faltando: {}", .missing.join(", "))]
    MissingPersonalFields { missing: Vec<&'static str> },
    /// The backend turned the payment down; the message is shown to the
    /// donor as the backend phrased it.
    #[error("{message}")]
    Backend { message: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// What the success view renders.
#[derive(Clone, Debug)]
pub struct Confirmation {
    pub record: CompletedDonation,
    /// Integrity hash over `record`.
    pub receipt: String,
    /// Route of the confirmation view, carrying the receipt.
    pub route: String,
}

/// The payment orchestrator.
pub struct Checkout {
    api: Arc<dyn DonorApi>,
    session: Session,
    effects: SideEffects,
    history: Arc<dyn HistoryStoring>,
    prompt: Arc<dyn LoginPrompting>,
    rules: FlowRules,
}

impl Checkout {
    pub fn new(
        api: Arc<dyn DonorApi>,
        session: Session,
        effects: SideEffects,
        history: Arc<dyn HistoryStoring>,
        prompt: Arc<dyn LoginPrompting>,
        rules: FlowRules,
    ) -> Self {
        Self {
            api,
            session,
            effects,
            history,
            prompt,
            rules,
        }
    }

    /// Submits the donation described by the wizard state.
    ///
    /// On success the wizard state is cleared and the donor's local history
    /// extended; the returned [`Confirmation`] carries the record and the
    /// route to navigate to. On any failure the state is left untouched so
    /// the donor can fix their input and retry.
    pub async fn submit(
        &self,
        store: &mut StateStore,
        options: SubmitOptions,
    ) -> Result<Confirmation, SubmitError> {
        let outcome = self.process(store, options).await;
        let label = match &outcome {
            Ok(_) => "completed",
            Err(SubmitError::LoginRequiredForDebit) => "login_required",
            Err(
                SubmitError::IncompleteDonation
                | SubmitError::Invalid(_)
                | SubmitError::MissingPersonalFields { .. },
            ) => "invalid",
            Err(SubmitError::Backend { .. }) => "rejected",
            Err(SubmitError::Other(_)) => "error",
        };
        Metrics::get().submissions.with_label_values(&[label]).inc();
        outcome
    }

    async fn process(
        &self,
        store: &mut StateStore,
        options: SubmitOptions,
    ) -> Result<Confirmation, SubmitError> {
        let state = store.state().clone();

        // The donation kind and value always exist in the typed state, so
        // the only representable incompleteness is a missing instrument.
        let Some(instrument) = state.payment.clone() else {
            return Err(SubmitError::IncompleteDonation);
        };
        let method = instrument.method();

        // Recurring debits run against a standing account. The session is
        // the authority here, not the state's logged-in mirror; a stale
        // mirror must not let a debit through without a token.
        if matches!(instrument, PaymentInstrument::BankDebit(_)) && !self.session.is_logged_in() {
            self.prompt.open_login();
            return Err(SubmitError::LoginRequiredForDebit);
        }

        step_requirements(&state, &self.rules, Step::Value)?;
        step_requirements(&state, &self.rules, Step::Payment)?;

        let token = if options.new_donor {
            None
        } else {
            Some(self.session.token().ok_or_else(|| {
                anyhow::anyhow!("returning donor submission without a session")
            })?)
        };

        let mut donor_id = None;
        let personal = match (options.direct_personal, &token) {
            (Some(personal), _) => personal,
            (None, None) => state.personal.clone(),
            (None, Some(token)) => {
                let profile = self.api.profile(token).await.map_err(rejection)?;
                donor_id = Some(profile.id.clone());
                profile.into()
            }
        };
        let missing = personal.missing_identity_fields();
        if !missing.is_empty() {
            return Err(SubmitError::MissingPersonalFields { missing });
        }

        let result = match (&token, instrument) {
            (None, instrument) => {
                let request = payload::create_donor_and_pay(&personal, &state.donation, instrument);
                self.api.create_donor_and_pay(&request).await
            }
            (Some(token), PaymentInstrument::CreditCard(card)) => {
                let request = payload::charge_card(&state.donation, card);
                self.api.charge_card(token, &request).await
            }
            (Some(token), PaymentInstrument::BankDebit(debit)) => {
                let request = payload::register_debit(&state.donation, debit);
                self.api.register_debit(token, &request).await
            }
        };
        let result = result.map_err(rejection)?;

        let record = CompletedDonation {
            transaction_id: result.transaction_id,
            kind: state.donation.kind,
            amount: state.donation.value,
            method,
            timestamp: Utc::now(),
            campaign: state.donation.campaign.clone(),
            collaborator: state.donation.collaborator.clone(),
        };
        let receipt = receipt::receipt(&record);
        tracing::info!(transaction = %record.transaction_id, "payment confirmed");

        // Commit before notifying anyone. From here on the donation is a
        // success no matter what the trackers or the local stores do.
        match result.donor_id.or(donor_id) {
            Some(donor_id) => {
                if let Err(err) = self.history.append(&donor_id, DonationRecord::from(&record)) {
                    tracing::warn!(?err, "failed to append the local donation record");
                }
            }
            None => tracing::debug!("no donor id, skipping the local donation record"),
        }
        if let Err(err) = store.reset() {
            tracing::warn!(?err, "failed to clear the wizard state after payment");
        }

        self.effects.dispatch(&record, &personal).await;

        let route = receipt::success_route(&receipt);
        Ok(Confirmation {
            record,
            receipt,
            route,
        })
    }
}

/// Backend messages travel to the donor as phrased; transport and decoding
/// failures get the generic fallback.
fn rejection(err: DsoError) -> SubmitError {
    match err {
        DsoError::Api { message, .. } => SubmitError::Backend { message },
        err => {
            tracing::warn!(?err, "payment call failed in transit");
            SubmitError::Backend {
                message: FALLBACK_ERROR.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        conversion_tracking::{
            analytics::MockAnalyticsTracking,
            conversion::MockConversionTracking,
            marketing::MockMarketingTracking,
        },
        dso_api::{
            MockDonorApi,
            dto::{AccessToken, DonorProfile, TransactionResult},
        },
        local_store::{DONATION_STATE_KEY, EntryStoring, MemoryStore, SESSION_TOKEN_KEY},
        model::{
            CardData,
            DebitData,
            DebitDay,
            DonationFields,
            DonationKind,
            PaymentMethod,
            RecordStatus,
        },
        rust_decimal::Decimal,
        wizard::DonationState,
    };

    fn card() -> CardData {
        CardData {
            holder_name: "MARIA F SILVA".to_string(),
            card_number: "5555666677778884".to_string(),
            expiry_month: "04".to_string(),
            expiry_year: "2029".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn debit() -> DebitData {
        DebitData {
            bank_code: "341".to_string(),
            branch_number: "1234".to_string(),
            branch_digit: "5".to_string(),
            account_number: "67890".to_string(),
            account_digit: "1".to_string(),
            account_type: "checking".to_string(),
            debit_day: DebitDay::Day15,
        }
    }

    fn personal() -> PersonalData {
        PersonalData {
            name: "Maria da Silva".to_string(),
            email: "maria@example.com".to_string(),
            document: "52998224725".to_string(),
            phone: "11987654321".to_string(),
            ..Default::default()
        }
    }

    fn state(kind: DonationKind, value: u32, instrument: PaymentInstrument) -> DonationState {
        DonationState {
            personal: personal(),
            payment: Some(instrument),
            donation: DonationFields {
                kind,
                value: Decimal::from(value),
                child_id: (kind == DonationKind::Sponsorship).then(|| "abc".to_string()),
                campaign: None,
                collaborator: None,
            },
            step: Step::Payment,
            logged_in: false,
        }
    }

    fn seeded_store(entries: &Arc<MemoryStore>, state: &DonationState) -> StateStore {
        local_store::write_json(entries.as_ref(), DONATION_STATE_KEY, state).unwrap();
        StateStore::load_or_default(entries.clone())
    }

    fn result(transaction_id: &str, donor_id: Option<&str>) -> TransactionResult {
        TransactionResult {
            transaction_id: transaction_id.to_string(),
            status: "completed".to_string(),
            donor_id: donor_id.map(str::to_string),
            message: None,
        }
    }

    /// Trackers that must not hear anything.
    fn quiet_trackers() -> SideEffects {
        SideEffects::new(
            Arc::new(MockAnalyticsTracking::new()),
            Arc::new(MockConversionTracking::new()),
            Arc::new(MockMarketingTracking::new()),
        )
    }

    /// Trackers that expect exactly one confirmed donation.
    fn notified_trackers() -> SideEffects {
        let mut analytics = MockAnalyticsTracking::new();
        analytics
            .expect_payment_succeeded()
            .times(1)
            .returning(|_| Ok(()));
        let mut conversion = MockConversionTracking::new();
        conversion
            .expect_donation_conversion()
            .times(1)
            .returning(|_| Ok(()));
        conversion.expect_sync_contact().times(1).returning(|_| Ok(()));
        let mut marketing = MockMarketingTracking::new();
        marketing
            .expect_donation_event()
            .times(1)
            .returning(|_| Ok(()));
        SideEffects::new(Arc::new(analytics), Arc::new(conversion), Arc::new(marketing))
    }

    fn checkout(
        api: MockDonorApi,
        entries: &Arc<MemoryStore>,
        effects: SideEffects,
        prompt: MockLoginPrompting,
    ) -> Checkout {
        Checkout::new(
            Arc::new(api),
            Session::new(entries.clone()),
            effects,
            Arc::new(EntryHistory::new(entries.clone())),
            Arc::new(prompt),
            FlowRules::default(),
        )
    }

    #[tokio::test]
    async fn new_donor_card_payment_creates_the_donor_and_commits() {
        observe::tracing::initialize_reentrant("checkout=debug");
        let entries = Arc::new(MemoryStore::new());
        let mut store = seeded_store(
            &entries,
            &state(
                DonationKind::Donate,
                50,
                PaymentInstrument::CreditCard(card()),
            ),
        );

        let mut api = MockDonorApi::new();
        api.expect_create_donor_and_pay()
            .withf(|request| {
                request.value == Decimal::from(50)
                    && request.donate_type == "donate"
                    && request.email == "maria@example.com"
                    && matches!(request.instrument, PaymentInstrument::CreditCard(_))
            })
            .times(1)
            .returning(|_| Ok(result("tx-1845", Some("donor-9"))));

        let checkout = checkout(api, &entries, notified_trackers(), MockLoginPrompting::new());
        let confirmation = checkout
            .submit(
                &mut store,
                SubmitOptions {
                    new_donor: true,
                    direct_personal: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(confirmation.record.transaction_id, "tx-1845");
        assert_eq!(confirmation.record.kind, DonationKind::Donate);
        assert_eq!(confirmation.record.method, PaymentMethod::CreditCard);
        assert_eq!(confirmation.receipt.len(), 64);
        assert_eq!(
            confirmation.route,
            format!("/donation/success?receipt={}", confirmation.receipt)
        );

        // The success is committed locally: record appended, state cleared.
        let history = EntryHistory::new(entries.clone());
        let records = history.list("donor-9").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, Decimal::from(50));
        assert_eq!(records[0].kind, "single");
        assert_eq!(records[0].status, RecordStatus::Completed);
        assert_eq!(store.state(), &DonationState::default());
        assert_eq!(entries.read(DONATION_STATE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn incomplete_bank_fields_never_reach_the_network() {
        let entries = Arc::new(MemoryStore::new());
        entries.write(SESSION_TOKEN_KEY, "tok-1").unwrap();
        let seeded = state(
            DonationKind::Sponsorship,
            74,
            PaymentInstrument::BankDebit(DebitData {
                bank_code: "341".to_string(),
                ..Default::default()
            }),
        );
        let mut store = seeded_store(&entries, &seeded);

        // No expectations: any backend call is a test failure.
        let checkout = checkout(
            MockDonorApi::new(),
            &entries,
            quiet_trackers(),
            MockLoginPrompting::new(),
        );
        let err = checkout
            .submit(&mut store, SubmitOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Invalid(StepInvalid::MissingPaymentFields { .. })
        ));
        // The state survives for a retry.
        assert_eq!(store.state(), &seeded);
        assert!(entries.read(DONATION_STATE_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn submitting_without_an_instrument_is_incomplete() {
        let entries = Arc::new(MemoryStore::new());
        let mut seeded = state(
            DonationKind::Donate,
            50,
            PaymentInstrument::CreditCard(card()),
        );
        seeded.payment = None;
        let mut store = seeded_store(&entries, &seeded);

        let checkout = checkout(
            MockDonorApi::new(),
            &entries,
            quiet_trackers(),
            MockLoginPrompting::new(),
        );
        let err = checkout
            .submit(&mut store, SubmitOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::IncompleteDonation));
        assert_eq!(err.to_string(), "Dados da doação incompletos");
    }

    #[tokio::test]
    async fn debit_without_a_session_opens_the_login_prompt() {
        let entries = Arc::new(MemoryStore::new());
        let mut store = seeded_store(
            &entries,
            &state(
                DonationKind::Recurrent,
                40,
                PaymentInstrument::BankDebit(debit()),
            ),
        );

        let mut prompt = MockLoginPrompting::new();
        prompt.expect_open_login().times(1).return_const(());

        let checkout = checkout(MockDonorApi::new(), &entries, quiet_trackers(), prompt);
        let err = checkout
            .submit(&mut store, SubmitOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::LoginRequiredForDebit));
        assert_eq!(err.to_string(), "LOGIN_REQUIRED_FOR_DEBIT");
    }

    #[tokio::test]
    async fn stale_logged_in_mirror_does_not_bypass_the_debit_gate() {
        let entries = Arc::new(MemoryStore::new());
        let mut seeded = state(
            DonationKind::Recurrent,
            40,
            PaymentInstrument::BankDebit(debit()),
        );
        seeded.logged_in = true;
        let mut store = seeded_store(&entries, &seeded);

        let mut prompt = MockLoginPrompting::new();
        prompt.expect_open_login().times(1).return_const(());

        let checkout = checkout(MockDonorApi::new(), &entries, quiet_trackers(), prompt);
        let err = checkout
            .submit(&mut store, SubmitOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::LoginRequiredForDebit));
    }

    #[tokio::test]
    async fn returning_donor_card_is_charged_against_the_profile() {
        let entries = Arc::new(MemoryStore::new());
        entries.write(SESSION_TOKEN_KEY, "tok-1").unwrap();
        let mut seeded = state(
            DonationKind::Donate,
            100,
            PaymentInstrument::CreditCard(card()),
        );
        seeded.personal = PersonalData::default();
        seeded.logged_in = true;
        let mut store = seeded_store(&entries, &seeded);

        let mut api = MockDonorApi::new();
        api.expect_profile()
            .withf(|token: &AccessToken| token.as_str() == "tok-1")
            .times(1)
            .returning(|_| {
                Ok(DonorProfile {
                    id: "donor-3".to_string(),
                    name: "Maria da Silva".to_string(),
                    email: "maria@example.com".to_string(),
                    document: "52998224725".to_string(),
                    phone: String::new(),
                    birth_date: None,
                    gender: String::new(),
                    address: Default::default(),
                })
            });
        api.expect_charge_card()
            .withf(|token: &AccessToken, request| {
                token.as_str() == "tok-1"
                    && request.value == Decimal::from(100)
                    && request.donate_type == "donate"
            })
            .times(1)
            .returning(|_, _| Ok(result("tx-2001", None)));

        let checkout = checkout(api, &entries, notified_trackers(), MockLoginPrompting::new());
        let confirmation = checkout
            .submit(&mut store, SubmitOptions::default())
            .await
            .unwrap();
        assert_eq!(confirmation.record.transaction_id, "tx-2001");

        // No donor id in the response, so the history is keyed by the
        // profile the personal data came from.
        let history = EntryHistory::new(entries.clone());
        assert_eq!(history.list("donor-3").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn returning_donor_debit_registers_against_the_account() {
        let entries = Arc::new(MemoryStore::new());
        entries.write(SESSION_TOKEN_KEY, "tok-2").unwrap();
        let mut seeded = state(
            DonationKind::Sponsorship,
            74,
            PaymentInstrument::BankDebit(debit()),
        );
        seeded.logged_in = true;
        let mut store = seeded_store(&entries, &seeded);

        let mut api = MockDonorApi::new();
        api.expect_register_debit()
            .withf(|_, request| {
                request.donate_type == "sponsorship"
                    && request.child_id == Some(vec!["abc".to_string()])
                    && request.debit.bank_code == "341"
            })
            .times(1)
            .returning(|_, _| Ok(result("tx-2002", Some("donor-3"))));

        let checkout = checkout(api, &entries, notified_trackers(), MockLoginPrompting::new());
        let confirmation = checkout
            .submit(
                &mut store,
                SubmitOptions {
                    new_donor: false,
                    direct_personal: Some(personal()),
                },
            )
            .await
            .unwrap();
        assert_eq!(confirmation.record.method, PaymentMethod::Debit);
        assert_eq!(confirmation.record.kind, DonationKind::Sponsorship);
    }

    #[tokio::test]
    async fn backend_rejection_keeps_the_state_for_a_retry() {
        let entries = Arc::new(MemoryStore::new());
        let seeded = state(
            DonationKind::Donate,
            50,
            PaymentInstrument::CreditCard(card()),
        );
        let mut store = seeded_store(&entries, &seeded);

        let mut api = MockDonorApi::new();
        api.expect_create_donor_and_pay().times(1).returning(|_| {
            Err(DsoError::Api {
                status: reqwest::StatusCode::PAYMENT_REQUIRED,
                message: "Cartão recusado pela operadora".to_string(),
            })
        });

        let checkout = checkout(api, &entries, quiet_trackers(), MockLoginPrompting::new());
        let err = checkout
            .submit(
                &mut store,
                SubmitOptions {
                    new_donor: true,
                    direct_personal: None,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Cartão recusado pela operadora");
        assert_eq!(store.state(), &seeded);
        let history = EntryHistory::new(entries.clone());
        assert!(history.list("donor-9").unwrap().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_the_generic_message() {
        let entries = Arc::new(MemoryStore::new());
        let mut store = seeded_store(
            &entries,
            &state(
                DonationKind::Donate,
                50,
                PaymentInstrument::CreditCard(card()),
            ),
        );

        let mut api = MockDonorApi::new();
        api.expect_create_donor_and_pay().times(1).returning(|_| {
            Err(DsoError::Decode(
                serde_json::from_str::<TransactionResult>("{").unwrap_err(),
            ))
        });

        let checkout = checkout(api, &entries, quiet_trackers(), MockLoginPrompting::new());
        let err = checkout
            .submit(
                &mut store,
                SubmitOptions {
                    new_donor: true,
                    direct_personal: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_ERROR);
    }

    #[tokio::test]
    async fn missing_identity_fields_fail_before_any_call() {
        let entries = Arc::new(MemoryStore::new());
        let mut seeded = state(
            DonationKind::Donate,
            50,
            PaymentInstrument::CreditCard(card()),
        );
        seeded.personal = PersonalData::default();
        let mut store = seeded_store(&entries, &seeded);

        let checkout = checkout(
            MockDonorApi::new(),
            &entries,
            quiet_trackers(),
            MockLoginPrompting::new(),
        );
        let err = checkout
            .submit(
                &mut store,
                SubmitOptions {
                    new_donor: true,
                    direct_personal: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Dados pessoais incompletos. Campos faltando: e-mail, nome, CPF"
        );
    }

    #[tokio::test]
    async fn direct_personal_data_takes_precedence_over_the_state() {
        let entries = Arc::new(MemoryStore::new());
        let mut seeded = state(
            DonationKind::Donate,
            20,
            PaymentInstrument::CreditCard(card()),
        );
        seeded.personal = PersonalData::default();
        let mut store = seeded_store(&entries, &seeded);

        let mut api = MockDonorApi::new();
        api.expect_create_donor_and_pay()
            .withf(|request| request.name == "Maria da Silva")
            .times(1)
            .returning(|_| Ok(result("tx-3003", Some("donor-5"))));

        let checkout = checkout(api, &entries, notified_trackers(), MockLoginPrompting::new());
        checkout
            .submit(
                &mut store,
                SubmitOptions {
                    new_donor: true,
                    direct_personal: Some(personal()),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn returning_donor_without_a_session_is_an_error() {
        let entries = Arc::new(MemoryStore::new());
        let mut store = seeded_store(
            &entries,
            &state(
                DonationKind::Donate,
                50,
                PaymentInstrument::CreditCard(card()),
            ),
        );

        let checkout = checkout(
            MockDonorApi::new(),
            &entries,
            quiet_trackers(),
            MockLoginPrompting::new(),
        );
        let err = checkout
            .submit(&mut store, SubmitOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Other(_)));
    }

    #[tokio::test]
    async fn failing_trackers_do_not_fail_the_confirmation() {
        let entries = Arc::new(MemoryStore::new());
        let mut store = seeded_store(
            &entries,
            &state(
                DonationKind::Donate,
                50,
                PaymentInstrument::CreditCard(card()),
            ),
        );

        let mut api = MockDonorApi::new();
        api.expect_create_donor_and_pay()
            .times(1)
            .returning(|_| Ok(result("tx-4004", Some("donor-9"))));

        let mut analytics = MockAnalyticsTracking::new();
        analytics
            .expect_payment_succeeded()
            .times(1)
            .returning(|_| Err(conversion_tracking::TrackError::Status(
                reqwest::StatusCode::BAD_GATEWAY,
            )));
        let mut conversion = MockConversionTracking::new();
        conversion
            .expect_donation_conversion()
            .times(1)
            .returning(|_| Ok(()));
        conversion.expect_sync_contact().times(1).returning(|_| Ok(()));
        let mut marketing = MockMarketingTracking::new();
        marketing
            .expect_donation_event()
            .times(1)
            .returning(|_| Ok(()));
        let effects = SideEffects::new(
            Arc::new(analytics),
            Arc::new(conversion),
            Arc::new(marketing),
        );

        let checkout = checkout(api, &entries, effects, MockLoginPrompting::new());
        let confirmation = checkout
            .submit(
                &mut store,
                SubmitOptions {
                    new_donor: true,
                    direct_personal: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(confirmation.record.transaction_id, "tx-4004");
        assert_eq!(store.state(), &DonationState::default());
    }
}
