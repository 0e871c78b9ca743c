use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use tarang_core::booking::{
    Booking, BookerDetails, BookingStatus, NotificationOutcome, PaymentInfo, TravelDetails,
};
use tarang_core::repository::{BookingStore, StoreError};

/// Postgres-backed booking collection.
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    package_name: String,
    package_type: String,
    price: f64,
    booker_name: String,
    booker_email: String,
    booker_phone: String,
    number_of_travelers: i32,
    travel_date: NaiveDate,
    payment_method: String,
    payment_status: String,
    total_amount: f64,
    status: String,
    confirmation_email_sent: bool,
    confirmation_email_at: Option<DateTime<Utc>>,
    confirmation_email_error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, StoreError> {
        Ok(Booking {
            id: self.id,
            package_name: self.package_name,
            package_type: self.package_type.parse().map_err(StoreError::Backend)?,
            price: self.price,
            booker_details: BookerDetails {
                name: self.booker_name,
                email: self.booker_email,
                phone: self.booker_phone,
            },
            travel_details: TravelDetails {
                number_of_travelers: self.number_of_travelers as u32,
                travel_date: self.travel_date,
            },
            payment: PaymentInfo {
                method: self.payment_method.parse().map_err(StoreError::Backend)?,
                status: self.payment_status.parse().map_err(StoreError::Backend)?,
            },
            total_amount: self.total_amount,
            status: self.status.parse().map_err(StoreError::Backend)?,
            notification: NotificationOutcome {
                confirmation_email_sent: self.confirmation_email_sent,
                confirmation_email_at: self.confirmation_email_at,
                confirmation_email_error: self.confirmation_email_error,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn map_sqlx(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, package_name, package_type, price,
                booker_name, booker_email, booker_phone,
                number_of_travelers, travel_date,
                payment_method, payment_status,
                total_amount, status,
                confirmation_email_sent, confirmation_email_at, confirmation_email_error,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(booking.id)
        .bind(&booking.package_name)
        .bind(booking.package_type.as_str())
        .bind(booking.price)
        .bind(&booking.booker_details.name)
        .bind(&booking.booker_details.email)
        .bind(&booking.booker_details.phone)
        .bind(booking.travel_details.number_of_travelers as i32)
        .bind(booking.travel_details.travel_date)
        .bind(booking.payment.method.as_str())
        .bind(booking.payment.status.as_str())
        .bind(booking.total_amount)
        .bind(booking.status.as_str())
        .bind(booking.notification.confirmation_email_sent)
        .bind(booking.notification.confirmation_email_at)
        .bind(&booking.notification.confirmation_email_error)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let rows: Vec<BookingRow> =
            sqlx::query_as("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Booking, StoreError> {
        let row: Option<BookingRow> = sqlx::query_as("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.ok_or(StoreError::NotFound(id))?.into_booking()
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking, StoreError> {
        let row: Option<BookingRow> = sqlx::query_as(
            "UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.ok_or(StoreError::NotFound(id))?.into_booking()
    }

    async fn record_notification(
        &self,
        id: Uuid,
        outcome: &NotificationOutcome,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET confirmation_email_sent = $1,
                confirmation_email_at = $2,
                confirmation_email_error = $3
            WHERE id = $4
            "#,
        )
        .bind(outcome.confirmation_email_sent)
        .bind(outcome.confirmation_email_at)
        .bind(&outcome.confirmation_email_error)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<Booking, StoreError> {
        let row: Option<BookingRow> =
            sqlx::query_as("DELETE FROM bookings WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        row.ok_or(StoreError::NotFound(id))?.into_booking()
    }

    async fn clear_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM bookings")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
