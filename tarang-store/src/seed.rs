use chrono::NaiveDate;
use tracing::info;

use tarang_core::booking::{
    Booking, BookerDetails, BookingStatus, CreateBookingPayload, PackageType, TravelDetails,
};
use tarang_core::repository::{BookingStore, StoreError};

/// Insert a fixed set of demo bookings through the store. Used by demos and
/// manual dashboard testing against an empty database.
pub async fn seed_demo_bookings(store: &dyn BookingStore) -> Result<usize, StoreError> {
    let samples = [
        (
            "Bali Adventure Package",
            PackageType::Standard,
            1200.0,
            "John Smith",
            "john.smith@email.com",
            "+1-555-214-9083",
            2,
            NaiveDate::from_ymd_opt(2026, 11, 12).unwrap(),
            BookingStatus::Confirmed,
        ),
        (
            "Paris Romantic Getaway",
            PackageType::Luxury,
            1800.0,
            "Sarah Johnson",
            "sarah.johnson@email.com",
            "+1-555-771-2248",
            2,
            NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
            BookingStatus::Pending,
        ),
        (
            "Tokyo Cultural Tour",
            PackageType::Standard,
            2000.0,
            "Michael Brown",
            "michael.brown@email.com",
            "+1-555-430-5512",
            4,
            NaiveDate::from_ymd_opt(2027, 1, 22).unwrap(),
            BookingStatus::Confirmed,
        ),
        (
            "Maldives Beach Resort",
            PackageType::Luxury,
            3000.0,
            "Emma Davis",
            "emma.davis@email.com",
            "+1-555-902-7736",
            3,
            NaiveDate::from_ymd_opt(2026, 12, 28).unwrap(),
            BookingStatus::Cancelled,
        ),
        (
            "Thailand Island Hopping",
            PackageType::Budget,
            1400.0,
            "David Garcia",
            "david.garcia@email.com",
            "+1-555-118-6659",
            1,
            NaiveDate::from_ymd_opt(2027, 2, 9).unwrap(),
            BookingStatus::Pending,
        ),
    ];

    let mut inserted = 0;
    for (package, tier, price, name, email, phone, travelers, date, status) in samples {
        let mut booking = Booking::from_payload(CreateBookingPayload {
            package_name: package.to_string(),
            package_type: tier,
            price,
            booker_details: BookerDetails {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
            },
            travel_details: TravelDetails {
                number_of_travelers: travelers,
                travel_date: date,
            },
            payment: None,
            total_amount: None,
        })
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        booking.status = status;
        store.insert(&booking).await?;
        inserted += 1;
    }

    info!("Seeded {} demo bookings", inserted);
    Ok(inserted)
}
