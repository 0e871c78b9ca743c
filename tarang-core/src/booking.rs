use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing;

/// Traveler count bounds enforced on every booking.
pub const MIN_TRAVELERS: u32 = 1;
pub const MAX_TRAVELERS: u32 = 10;

/// Pricing tier of a package.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PackageType {
    Budget,
    Standard,
    Luxury,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Budget => "Budget",
            PackageType::Standard => "Standard",
            PackageType::Luxury => "Luxury",
        }
    }
}

impl std::str::FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Budget" => Ok(PackageType::Budget),
            "Standard" => Ok(PackageType::Standard),
            "Luxury" => Ok(PackageType::Luxury),
            other => Err(format!("unknown package type: {other}")),
        }
    }
}

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(BookingStatus::Pending),
            "Confirmed" => Ok(BookingStatus::Confirmed),
            "Cancelled" => Ok(BookingStatus::Cancelled),
            "Completed" => Ok(BookingStatus::Completed),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "UPI")]
    Upi,
    Card,
    NetBanking,
    #[default]
    Pending,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::NetBanking => "NetBanking",
            PaymentMethod::Pending => "Pending",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPI" => Ok(PaymentMethod::Upi),
            "Card" => Ok(PaymentMethod::Card),
            "NetBanking" => Ok(PaymentMethod::NetBanking),
            "Pending" => Ok(PaymentMethod::Pending),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PaymentStatus::Pending),
            "Completed" => Ok(PaymentStatus::Completed),
            "Failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Contact details of the person placing the booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelDetails {
    pub number_of_travelers: u32,
    pub travel_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentInfo {
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Outcome of the confirmation-email dispatch, written back onto the
/// booking record as a best-effort secondary update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOutcome {
    #[serde(default)]
    pub confirmation_email_sent: bool,
    pub confirmation_email_at: Option<DateTime<Utc>>,
    pub confirmation_email_error: Option<String>,
}

impl NotificationOutcome {
    pub fn sent(at: DateTime<Utc>) -> Self {
        Self {
            confirmation_email_sent: true,
            confirmation_email_at: Some(at),
            confirmation_email_error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            confirmation_email_sent: false,
            confirmation_email_at: None,
            confirmation_email_error: Some(error.into()),
        }
    }
}

/// One customer's reservation record for a travel package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub package_name: String,
    pub package_type: PackageType,
    pub price: f64,
    pub booker_details: BookerDetails,
    pub travel_details: TravelDetails,
    #[serde(default)]
    pub payment: PaymentInfo,
    pub total_amount: f64,
    pub status: BookingStatus,
    #[serde(flatten)]
    pub notification: NotificationOutcome,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Build a new Pending booking from a validated payload. The id and
    /// creation timestamp assigned here are immutable afterwards.
    pub fn from_payload(payload: CreateBookingPayload) -> Result<Self, ValidationError> {
        let payload = payload.normalized();
        payload.validate()?;

        let total_amount = payload
            .total_amount
            .unwrap_or(payload.price * payload.travel_details.number_of_travelers as f64);

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            package_name: payload.package_name,
            package_type: payload.package_type,
            price: payload.price,
            booker_details: payload.booker_details,
            travel_details: payload.travel_details,
            payment: payload.payment.unwrap_or_default(),
            total_amount,
            status: BookingStatus::Pending,
            notification: NotificationOutcome::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_status(&mut self, new_status: BookingStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }
}

/// Booking submission body: the booking minus server-assigned fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub package_name: String,
    pub package_type: PackageType,
    pub price: f64,
    pub booker_details: BookerDetails,
    pub travel_details: TravelDetails,
    #[serde(default)]
    pub payment: Option<PaymentInfo>,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

impl CreateBookingPayload {
    /// Trim all text fields; Mongo's schema did this via `trim: true`.
    pub fn normalized(mut self) -> Self {
        self.package_name = self.package_name.trim().to_string();
        self.booker_details.name = self.booker_details.name.trim().to_string();
        self.booker_details.email = self.booker_details.email.trim().to_string();
        self.booker_details.phone = self.booker_details.phone.trim().to_string();
        self
    }

    /// Check every invariant before the payload reaches persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.package_name.trim().is_empty() {
            return Err(ValidationError::MissingField("packageName"));
        }
        if self.booker_details.name.trim().is_empty() {
            return Err(ValidationError::MissingField("bookerDetails.name"));
        }
        if self.booker_details.email.trim().is_empty() {
            return Err(ValidationError::MissingField("bookerDetails.email"));
        }
        if self.booker_details.phone.trim().is_empty() {
            return Err(ValidationError::MissingField("bookerDetails.phone"));
        }
        if !(self.price > 0.0) {
            return Err(ValidationError::NonPositivePrice(self.price));
        }
        let travelers = self.travel_details.number_of_travelers;
        if !(MIN_TRAVELERS..=MAX_TRAVELERS).contains(&travelers) {
            return Err(ValidationError::TravelerCountOutOfRange(travelers));
        }
        if let Some(total) = self.total_amount {
            if total < 0.0 {
                return Err(ValidationError::NegativeTotal(total));
            }
        }
        Ok(())
    }

    /// The billing quote this payload implies.
    pub fn quote(&self) -> billing::BillingQuote {
        billing::quote(self.price, self.travel_details.number_of_travelers)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("numberOfTravelers must be between {MIN_TRAVELERS} and {MAX_TRAVELERS}, got {0}")]
    TravelerCountOutOfRange(u32),

    #[error("price must be a positive number, got {0}")]
    NonPositivePrice(f64),

    #[error("totalAmount must not be negative, got {0}")]
    NegativeTotal(f64),
}
