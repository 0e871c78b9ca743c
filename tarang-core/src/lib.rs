pub mod billing;
pub mod booking;
pub mod repository;

pub use booking::{
    Booking, BookingStatus, BookerDetails, CreateBookingPayload, NotificationOutcome,
    PackageType, PaymentInfo, PaymentMethod, PaymentStatus, TravelDetails, ValidationError,
};
pub use repository::{BookingStore, StoreError};
