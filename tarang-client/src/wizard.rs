use chrono::NaiveDate;

use tarang_core::billing::{self, BillingQuote};
use tarang_core::booking::{
    BookerDetails, CreateBookingPayload, PackageType, PaymentInfo, PaymentMethod, TravelDetails,
    MAX_TRAVELERS, MIN_TRAVELERS,
};

/// Where a wizard run currently stands. Rendering is a projection of this
/// value; the machine itself knows nothing about the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Idle,
    PackageSelected,
    TypeSelected,
    DetailsEntered,
    TravelInfoEntered,
    BillingReviewed,
    Submitted,
}

impl WizardStep {
    fn index(self) -> u8 {
        match self {
            WizardStep::Idle => 0,
            WizardStep::PackageSelected => 1,
            WizardStep::TypeSelected => 2,
            WizardStep::DetailsEntered => 3,
            WizardStep::TravelInfoEntered => 4,
            WizardStep::BillingReviewed => 5,
            WizardStep::Submitted => 6,
        }
    }
}

/// Per-person price for each tier. The storefront supplies these alongside
/// the package card.
#[derive(Debug, Clone, Copy)]
pub struct TierPrices {
    pub budget: f64,
    pub standard: f64,
    pub luxury: f64,
}

impl Default for TierPrices {
    fn default() -> Self {
        Self {
            budget: 1000.0,
            standard: 2000.0,
            luxury: 3500.0,
        }
    }
}

impl TierPrices {
    pub fn price_for(&self, tier: PackageType) -> f64 {
        match tier {
            PackageType::Budget => self.budget,
            PackageType::Standard => self.standard,
            PackageType::Luxury => self.luxury,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WizardError {
    #[error("invalid wizard transition from {from:?} to {to:?}")]
    InvalidTransition { from: WizardStep, to: WizardStep },

    #[error("Please enter name, email, and phone.")]
    ContactDetailsRequired,

    #[error("Please select number of travelers and travel date.")]
    TravelInfoRequired,

    #[error("Number of travelers must be between {MIN_TRAVELERS} and {MAX_TRAVELERS}.")]
    TravelerCountOutOfRange(u32),

    #[error("Please choose a date on or after {today}.")]
    PastTravelDate { today: NaiveDate },

    #[error("Please choose a payment method.")]
    PaymentMethodRequired,
}

/// The multi-step booking form as an explicit state machine. One successful
/// run yields exactly one booking payload; the accumulated selections live
/// here and nowhere else.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    prices: TierPrices,
    package_name: String,
    package_type: Option<PackageType>,
    price_per_person: f64,
    booker_name: String,
    booker_email: String,
    booker_phone: String,
    travelers: Option<u32>,
    travel_date: Option<NaiveDate>,
    quote: Option<BillingQuote>,
}

impl BookingWizard {
    pub fn new(prices: TierPrices) -> Self {
        Self {
            step: WizardStep::Idle,
            prices,
            package_name: String::new(),
            package_type: None,
            price_per_person: 0.0,
            booker_name: String::new(),
            booker_email: String::new(),
            booker_phone: String::new(),
            travelers: None,
            travel_date: None,
            quote: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Billing quote computed on entering the review step.
    pub fn quote(&self) -> Option<BillingQuote> {
        self.quote
    }

    /// Begin a run for a package. Replaces any run in progress.
    pub fn open(&mut self, package_name: &str) {
        self.reset();
        self.package_name = package_name.trim().to_string();
        self.step = WizardStep::PackageSelected;
    }

    /// Abandon the run from any step.
    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn choose_type(&mut self, tier: PackageType) -> Result<(), WizardError> {
        self.guard_forward(WizardStep::TypeSelected)?;
        self.package_type = Some(tier);
        self.price_per_person = self.prices.price_for(tier);
        self.step = WizardStep::TypeSelected;
        Ok(())
    }

    pub fn enter_details(
        &mut self,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<(), WizardError> {
        self.guard_forward(WizardStep::DetailsEntered)?;

        let (name, email, phone) = (name.trim(), email.trim(), phone.trim());
        if name.is_empty() || email.is_empty() || phone.is_empty() {
            return Err(WizardError::ContactDetailsRequired);
        }

        self.booker_name = name.to_string();
        self.booker_email = email.to_string();
        self.booker_phone = phone.to_string();
        self.step = WizardStep::DetailsEntered;
        Ok(())
    }

    /// `today` is supplied by the caller so the guard is deterministic.
    pub fn enter_travel_info(
        &mut self,
        travelers: Option<u32>,
        travel_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), WizardError> {
        self.guard_forward(WizardStep::TravelInfoEntered)?;

        let (travelers, travel_date) = match (travelers, travel_date) {
            (Some(n), Some(d)) => (n, d),
            _ => return Err(WizardError::TravelInfoRequired),
        };
        if !(MIN_TRAVELERS..=MAX_TRAVELERS).contains(&travelers) {
            return Err(WizardError::TravelerCountOutOfRange(travelers));
        }
        if travel_date < today {
            return Err(WizardError::PastTravelDate { today });
        }

        self.travelers = Some(travelers);
        self.travel_date = Some(travel_date);
        self.step = WizardStep::TravelInfoEntered;
        Ok(())
    }

    /// No guard: always reachable once the prior steps passed. Computes the
    /// billing breakdown on entry.
    pub fn review_billing(&mut self) -> Result<BillingQuote, WizardError> {
        self.guard_forward(WizardStep::BillingReviewed)?;

        let quote = billing::quote(
            self.price_per_person,
            self.travelers.unwrap_or(MIN_TRAVELERS),
        );
        self.quote = Some(quote);
        self.step = WizardStep::BillingReviewed;
        Ok(quote)
    }

    /// Finalize the run. Returns the single booking payload built from the
    /// accumulated state and clears the wizard; what happens to the payload
    /// afterwards (submitted or saved locally) is the caller's concern.
    pub fn submit(
        &mut self,
        method: Option<PaymentMethod>,
    ) -> Result<CreateBookingPayload, WizardError> {
        self.guard_forward(WizardStep::Submitted)?;

        let method = match method {
            Some(PaymentMethod::Pending) | None => return Err(WizardError::PaymentMethodRequired),
            Some(m) => m,
        };

        let quote = self.quote.expect("billing reviewed before submit");
        let payload = CreateBookingPayload {
            package_name: self.package_name.clone(),
            package_type: self.package_type.expect("type chosen before submit"),
            price: self.price_per_person,
            booker_details: BookerDetails {
                name: self.booker_name.clone(),
                email: self.booker_email.clone(),
                phone: self.booker_phone.clone(),
            },
            travel_details: TravelDetails {
                number_of_travelers: self.travelers.expect("travel info entered before submit"),
                travel_date: self.travel_date.expect("travel info entered before submit"),
            },
            payment: Some(PaymentInfo {
                method,
                ..Default::default()
            }),
            total_amount: Some(quote.subtotal),
        };

        self.reset();
        self.step = WizardStep::Submitted;
        Ok(payload)
    }

    /// Step back to any earlier step. Unguarded; entered data stays put.
    pub fn back_to(&mut self, target: WizardStep) -> Result<(), WizardError> {
        let active = !matches!(self.step, WizardStep::Idle | WizardStep::Submitted);
        let earlier = target.index() < self.step.index();
        if !active || !earlier || target == WizardStep::Idle {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: target,
            });
        }
        self.step = target;
        Ok(())
    }

    /// Forward transitions are only legal from the immediately preceding
    /// step or later (the "later" case covers a back_to followed by a redo).
    fn guard_forward(&self, target: WizardStep) -> Result<(), WizardError> {
        let active = !matches!(self.step, WizardStep::Idle | WizardStep::Submitted);
        if !active || self.step.index() + 1 < target.index() {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: target,
            });
        }
        Ok(())
    }

    fn reset(&mut self) {
        let prices = self.prices;
        *self = Self::new(prices);
    }
}
